//! Priority value object: how much a criterion matters to the user (1 to 5).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Criterion priority, 1 (low) to 5 (high).
///
/// Acts as the multiplier applied to a criterion's score triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Priority used when a selected criterion somehow has none assigned.
    pub const FALLBACK: Priority = Priority(1);

    /// Creates a Priority, returning error if outside 1..=5.
    pub fn new(value: u8) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "priority",
                Self::MIN as i32,
                Self::MAX as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        self.0
    }

    /// Returns the value as a score multiplier.
    pub fn multiplier(&self) -> i32 {
        self.0 as i32
    }

    /// All valid priorities in ascending order.
    pub fn all() -> impl Iterator<Item = Priority> {
        (Self::MIN..=Self::MAX).map(Priority)
    }
}

impl TryFrom<u8> for Priority {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Priority::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_accepts_one_through_five() {
        for v in 1..=5 {
            assert_eq!(Priority::new(v).unwrap().value(), v);
        }
    }

    #[test]
    fn priority_rejects_out_of_range() {
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(6).is_err());
    }

    #[test]
    fn priority_deserialization_enforces_range() {
        assert!(serde_json::from_str::<Priority>("3").is_ok());
        assert!(serde_json::from_str::<Priority>("9").is_err());
    }

    #[test]
    fn all_yields_five_priorities() {
        let values: Vec<u8> = Priority::all().map(|p| p.value()).collect();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn fallback_is_lowest_priority() {
        assert_eq!(Priority::FALLBACK.multiplier(), 1);
    }
}
