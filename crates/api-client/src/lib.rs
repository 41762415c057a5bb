//! Typed API client for the Snaplook visual product search backend
//!
//! This crate provides a unified HTTP client for the Snaplook backend:
//! authentication, image upload, image-based product search, product
//! details, and search history.
//!
//! # Features
//!
//! - **Environment-based configuration**: Load the base URL and timeout from
//!   environment variables
//! - **Instance-held auth state**: Bearer tokens live on the client handle,
//!   not in process-wide globals, so independent clients can coexist
//! - **Uniform error shape**: Every failure surfaces as one [`ApiError`],
//!   with a numeric status callers can branch on
//! - **Typed responses**: Response bodies decode into per-operation types;
//!   a shape mismatch is its own error, not a silent pass-through
//! - **Request correlation**: Track requests with unique IDs for debugging
//!
//! # Example
//!
//! ```rust,no_run
//! use snaplook_api_client::SnaplookClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SnaplookClient::new()?;
//!
//!     // Tokens are never applied automatically; the caller decides when.
//!     let session = client.auth().login("user@example.com", "hunter2").await?;
//!     client.set_auth_token(session.access_token);
//!
//!     let bytes = std::fs::read("look.jpg")?;
//!     let upload = client.images().upload("look.jpg", "image/jpeg", bytes).await?;
//!
//!     let results = client
//!         .products()
//!         .search_by_image(&upload.image_id, &Default::default())
//!         .await?;
//!     println!("{} matches", results.matches.len());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod content;
pub mod endpoints;
pub mod error;

pub use client::SnaplookClient;
pub use config::ClientConfig;
pub use content::ContentKind;
pub use error::{ApiError, ApiResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::SnaplookClient;
    pub use crate::config::ClientConfig;
    pub use crate::content::ContentKind;
    pub use crate::endpoints::{AuthApi, ImagesApi, ProductsApi};
    pub use crate::error::{ApiError, ApiResult};
}
