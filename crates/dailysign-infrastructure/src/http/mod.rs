pub mod client;

pub use client::{ClientOptions, HttpClient, HttpMethod, RetryConfig};
