//! Discord guild metadata as exchanged between the server and its clients.
//!
//! Snowflake IDs travel as strings since they exceed the integer precision of
//! JavaScript consumers.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DiscordChannelDto {
    #[serde(with = "snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    /// Discord channel type (0 = text, 2 = voice, 4 = category, ...).
    pub kind: u8,
    pub position: i32,
    #[serde(with = "snowflake::option", default)]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>))]
    pub parent_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DiscordRoleDto {
    #[serde(with = "snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    /// Role color in hex format (e.g. "#FF5733").
    pub color: String,
    pub position: i16,
    pub managed: bool,
}

/// Minimal projection of a guild member.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DiscordMemberDto {
    #[serde(with = "snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub user_id: u64,
    pub username: String,
    /// Global display name, falling back to the username.
    pub display_name: String,
    pub discriminator: Option<String>,
    pub avatar: Option<String>,
    pub nickname: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DiscordGuildDto {
    #[serde(with = "snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub id: u64,
    pub name: String,
    pub icon: Option<String>,
    #[serde(with = "snowflake")]
    #[cfg_attr(feature = "server", schema(value_type = String))]
    pub owner_id: u64,
    pub approximate_member_count: Option<u64>,
}

/// Request body for creating a channel or role in a guild.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CreateNamedDto {
    pub name: String,
}

pub(crate) mod snowflake {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::Error;
        String::deserialize(deserializer)?
            .parse::<u64>()
            .map_err(D::Error::custom)
    }

    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(value: &Option<u64>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(id) => serializer.serialize_some(&id.to_string()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
        where
            D: Deserializer<'de>,
        {
            use serde::de::Error;
            Option::<String>::deserialize(deserializer)?
                .map(|id| id.parse::<u64>().map_err(D::Error::custom))
                .transpose()
        }
    }
}
