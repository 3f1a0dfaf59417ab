//! Web server module
//!
//! Provides the single search endpoint and a health check.

mod handlers;
mod routes;
mod state;
mod templates;

pub use handlers::{AppError, SearchParams, SearchResponse};
pub use routes::create_router;
pub use state::AppState;
pub use templates::Templates;
