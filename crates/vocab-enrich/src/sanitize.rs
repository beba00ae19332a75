/// Replace every character that is not alphanumeric, `_` or `-` with `_`.
///
/// Letters and digits from any script are kept.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// File name a downloaded image is stored under
pub fn image_file_name(name_hint: &str) -> String {
    format!("{}.png", sanitize_file_stem(name_hint))
}
