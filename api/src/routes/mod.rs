//! API routes

pub mod content;
pub mod form;
pub mod health;
pub mod schema;
pub mod session;
pub mod submissions;
