//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for a group of backend routes.
//!
//! ## Mapping to the backend
//!
//! | Module | Backend routes | Description |
//! |--------|----------------|-------------|
//! | `auth` | `/auth/*` | Login, registration, current profile |
//! | `images` | `/images/*` | Image upload and feature processing |
//! | `products` | `/products/*` | Visual search, details, history |

pub mod auth;
pub mod images;
pub mod products;

pub use auth::AuthApi;
pub use images::ImagesApi;
pub use products::ProductsApi;
