//! Vaultlink API
//!
//! Axum inbound surface for the archiving bridge. Exposed as a library so
//! integration tests can build the router against temporary directories.

pub mod api_doc;
pub mod error;
pub mod handlers;
pub mod setup;
pub mod state;

pub use setup::initialize_app;
pub use state::AppState;
