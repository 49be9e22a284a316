//! Data transfer objects shared by the server and its clients.

pub mod api;
pub mod discord;
pub mod resource;
