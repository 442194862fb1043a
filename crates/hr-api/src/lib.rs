//! # HR API
//! 
//! HTTP handlers, middleware, form DTOs, and views.

pub mod handlers;
pub mod middleware;
pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
pub mod views;

pub use routes::build_router;
pub use state::AppState;
