mod client;
mod prompt;

pub use client::GeminiTextClient;
pub use prompt::PromptTemplate;
