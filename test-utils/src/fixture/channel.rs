use serde_json::{json, Value};

/// Discord channel type for guild text channels.
pub const GUILD_TEXT: u8 = 0;
/// Discord channel type for channel categories.
pub const GUILD_CATEGORY: u8 = 4;

/// Creates a text channel record.
///
/// # Arguments
/// - `id` - Channel ID
/// - `name` - Channel name
/// - `position` - Position in the channel list
pub fn text(id: u64, name: &str, position: i32) -> Value {
    record(id, name, GUILD_TEXT, position, None)
}

/// Creates a text channel nested under a category channel.
pub fn nested(id: u64, name: &str, position: i32, parent_id: u64) -> Value {
    record(id, name, GUILD_TEXT, position, Some(parent_id))
}

/// Creates a category channel record.
pub fn category(id: u64, name: &str, position: i32) -> Value {
    record(id, name, GUILD_CATEGORY, position, None)
}

fn record(id: u64, name: &str, kind: u8, position: i32, parent_id: Option<u64>) -> Value {
    json!({
        "id": id.to_string(),
        "type": kind,
        "guild_id": "1",
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": [],
        "nsfw": false,
    })
}
