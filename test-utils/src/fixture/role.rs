use serde_json::{json, Value};

/// Creates a role record.
///
/// # Arguments
/// - `id` - Role ID
/// - `name` - Role name
/// - `color` - RGB color as a 24-bit integer
/// - `position` - Position in the role hierarchy
pub fn role(id: u64, name: &str, color: u32, position: i16) -> Value {
    json!({
        "id": id.to_string(),
        "name": name,
        "color": color,
        "hoist": false,
        "position": position,
        "permissions": "0",
        "managed": false,
        "mentionable": true,
    })
}

/// Creates a role record managed by an integration, such as a bot's own role.
pub fn managed(id: u64, name: &str, position: i16) -> Value {
    let mut record = role(id, name, 0, position);
    record["managed"] = Value::Bool(true);
    record
}
