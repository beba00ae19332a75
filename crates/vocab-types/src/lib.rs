pub mod types;

pub use types::{VocabularyRecord, WordDetails, WordToken};
