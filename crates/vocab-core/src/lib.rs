pub mod error;
pub mod pipeline;
pub mod source;
pub mod store;

pub use error::{PipelineError, StoreError};
pub use pipeline::{Enrichers, Pipeline, SyncReport};
pub use source::read_words;
pub use store::VocabularyStore;
