//! Test fixtures shaped like Discord REST API responses.
//!
//! Each function returns a `serde_json::Value` carrying the fields Discord sends
//! for the record, including a few the dashboard ignores, so that decoding is
//! exercised against realistic payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use test_utils::fixture;
//!
//! let channel = fixture::channel::text(10, "general", 0);
//! let member = fixture::member::with_nick(1001, "alice", "Ali");
//! ```

pub mod channel;
pub mod guild;
pub mod member;
pub mod role;
