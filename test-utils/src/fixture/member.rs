use serde_json::{json, Value};

/// Creates a member whose user migrated to a unique username.
///
/// The user has no global name, a discriminator of "0" and no avatars.
pub fn member(user_id: u64, username: &str) -> Value {
    json!({
        "user": {
            "id": user_id.to_string(),
            "username": username,
            "global_name": null,
            "discriminator": "0",
            "avatar": null,
        },
        "nick": null,
        "avatar": null,
        "roles": [],
        "joined_at": "2024-01-01T00:00:00+00:00",
        "deaf": false,
        "mute": false,
    })
}

/// Creates a member with a guild nickname.
pub fn with_nick(user_id: u64, username: &str, nick: &str) -> Value {
    let mut record = member(user_id, username);
    record["nick"] = Value::String(nick.to_string());
    record
}

/// Creates a member with a global display name and both avatar kinds set.
pub fn with_profile(user_id: u64, username: &str, global_name: &str) -> Value {
    let mut record = member(user_id, username);
    record["user"]["global_name"] = Value::String(global_name.to_string());
    record["user"]["avatar"] = Value::String(format!("user_{}", user_id));
    record["avatar"] = Value::String(format!("guild_{}", user_id));
    record
}
