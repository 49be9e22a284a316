//! Server-side domain models.
//!
//! - `discord` - upstream Discord records and their conversion to DTOs
//! - `user` - the authenticated principal

pub mod discord;
pub mod user;
