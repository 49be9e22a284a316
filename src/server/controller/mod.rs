//! HTTP request handlers.
//!
//! - `guild` - cached reads of guild resources and cache invalidation
//! - `channel` - bot-side channel and role creation
//! - `session` - logout, dropping cached session state

pub mod channel;
pub mod guild;
pub mod session;

#[cfg(test)]
mod test;
