mod client;

pub use client::PixazoImageClient;
