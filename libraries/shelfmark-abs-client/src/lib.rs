//! Audiobookshelf Client
//!
//! HTTP client library for the parts of the Audiobookshelf API ShelfMark needs.
//!
//! # Features
//!
//! - **Libraries**: List libraries and page through their items
//! - **Progress**: Read the current user's media progress, mark items finished
//! - **Catalog**: `CatalogService` implementation joining items with progress
//!
//! # Example
//!
//! ```ignore
//! use shelfmark_abs_client::{AbsClient, AbsConfig};
//! use shelfmark_core::CatalogService;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AbsConfig::new("http://localhost:13378", "my-api-key");
//!     let client = AbsClient::new(config)?;
//!
//!     let user = client.progress().get_me().await?;
//!     println!("Connected as {}", user.username);
//!
//!     let catalog = client.list_catalog().await?;
//!     println!("Found {} books", catalog.len());
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod library;
mod progress;
mod types;

// Re-export main types
pub use client::AbsClient;
pub use error::{AbsClientError, Result};
pub use types::{
    AbsBookMetadata, AbsConfig, AbsLibrary, AbsLibraryItem, AbsMedia, AbsMediaProgress, AbsUser,
    LibrariesResponse, LibraryItemsPage, ProgressUpdate,
};

// Re-export sub-clients for direct use if needed
pub use library::LibraryClient;
pub use progress::ProgressClient;
