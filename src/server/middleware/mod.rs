//! Request authentication.
//!
//! - `session` - `SessionGate`, the cached credential validation
//! - `auth` - `AuthGuard`, credential extraction and guild permission checks for
//!   request handlers

pub mod auth;
pub mod session;

#[cfg(test)]
mod test;
