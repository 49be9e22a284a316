pub mod guild;
pub mod helper;

pub use guild::{GuildApi, HttpGuildApi};
