//! HTTP surface for the metro tracker.
//!
//! Exposes the interactive board, pin management, the widget refresh and
//! station search as a small JSON API.

mod dto;
mod error;
mod routes;
mod state;

pub use dto::*;
pub use error::WebError;
pub use routes::create_router;
pub use state::{AppState, Clock};
