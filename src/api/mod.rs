// API module - HTTP collaborators (accounts, documents, export, recovery)
mod client;
mod models;

pub use client::ApiClient;
pub use models::{DocumentId, DocumentSummary, Theme};
