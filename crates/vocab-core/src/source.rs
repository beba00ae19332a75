use std::io::ErrorKind;
use std::path::Path;

use vocab_types::WordToken;

/// Read the word list: one word per line, blank lines dropped.
///
/// Duplicates are kept in file order. A missing or unreadable file yields an
/// empty list; the problem is logged and never returned.
pub fn read_words(path: &Path) -> Vec<WordToken> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!("Input file {} not found", path.display());
            return Vec::new();
        }
        Err(e) => {
            tracing::error!("Error reading {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    let words: Vec<WordToken> = content.lines().filter_map(WordToken::parse).collect();
    tracing::info!("Loaded {} words from {}", words.len(), path.display());
    words
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_strs(words: &[WordToken]) -> Vec<&str> {
        words.iter().map(WordToken::as_str).collect()
    }

    #[test]
    fn test_lines_are_trimmed_and_blanks_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "  apple\n\n\tbanana  \r\n   \ncherry").unwrap();

        assert_eq!(as_strs(&read_words(&path)), ["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_duplicates_are_preserved_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, "cat\ndog\ncat\n").unwrap();

        assert_eq!(as_strs(&read_words(&path)), ["cat", "dog", "cat"]);
    }

    #[test]
    fn test_count_matches_non_empty_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        let content = "ice cream\n don't \n\nكتاب\n  \nnaïve\n";
        std::fs::write(&path, content).unwrap();

        let expected: Vec<&str> = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert_eq!(as_strs(&read_words(&path)), expected);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_words(&dir.path().join("nope.txt")).is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.txt");
        std::fs::write(&path, [b'c', b'a', b't', b'\n', 0xff, 0xfe, b'\n']).unwrap();

        assert!(read_words(&path).is_empty());
    }
}
