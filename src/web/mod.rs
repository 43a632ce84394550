//! HTTP surface for the admin report pages.
//!
//! Every route passes the [`SessionGate`] before anything else runs; an
//! unauthenticated request is redirected to the login page without opening
//! the database.

mod error;
mod gate;
mod server;

pub use error::ApiError;
pub use gate::{SessionGate, TokenGate};
pub use server::{router, serve, AppState};
