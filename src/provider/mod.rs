// External recipe search provider integration

pub mod client;
pub mod extract;
pub mod models;

pub use client::SearchClient;
pub use extract::extract_recipes;
pub use models::SearchResponse;
