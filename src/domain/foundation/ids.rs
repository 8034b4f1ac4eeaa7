//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use uuid::Uuid;

/// Conversation identifier assigned by the transport (a chat id).
///
/// One wizard session exists per chat at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Creates a ChatId from the transport's numeric id.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw numeric id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChatId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Unique identifier for a persisted outcome record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Creates a new random RecordId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_id_parses_negative_group_ids() {
        let id: ChatId = "-100123".parse().unwrap();
        assert_eq!(id.as_i64(), -100123);
        assert_eq!(id.to_string(), "-100123");
    }

    #[test]
    fn chat_id_rejects_garbage() {
        assert!("abc".parse::<ChatId>().is_err());
    }

    #[test]
    fn chat_id_serializes_as_number() {
        let json = serde_json::to_string(&ChatId::new(42)).unwrap();
        assert_eq!(json, "42");
    }

    #[test]
    fn record_id_generates_unique_values() {
        assert_ne!(RecordId::new(), RecordId::new());
    }

    #[test]
    fn record_id_round_trips_through_display() {
        let id = RecordId::new();
        let parsed: RecordId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }
}
