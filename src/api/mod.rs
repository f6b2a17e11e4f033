//! HTTP surface for the prediction service.
//!
//! `api_router()` returns a composable `Router`; `server` owns the
//! listener lifecycle.

pub mod endpoints;
pub mod error;
pub mod middleware;
pub mod router;
pub mod server;
pub mod types;

pub use router::api_router;
pub use server::{start_server_on, ApiServer, ServerError, ServerSession};
pub use types::ApiContext;
