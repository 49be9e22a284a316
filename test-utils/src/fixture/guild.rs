use serde_json::{json, Value};

/// Creates a guild record as returned with `with_counts=true`.
///
/// # Arguments
/// - `id` - Guild ID
/// - `name` - Guild name
/// - `owner_id` - User ID of the guild owner
/// - `member_count` - Approximate member count
pub fn guild(id: u64, name: &str, owner_id: u64, member_count: u64) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "icon": null,
        "owner_id": owner_id.to_string(),
        "roles": [],
        "emojis": [],
        "features": [],
        "approximate_member_count": member_count,
        "approximate_presence_count": 0,
    })
}
