pub mod channel;
pub mod guild;
pub mod guild_member;
pub mod role;

pub use channel::UpstreamChannel;
pub use guild::UpstreamGuild;
pub use guild_member::{UpstreamMember, UpstreamUser};
pub use role::UpstreamRole;
