//! Correlation types for tracking scheduler cycles
//!
//! A cycle is one fetch-and-save pass. Every log line emitted while a
//! cycle runs carries its id so an operator can follow a single pass
//! through the fetcher, the store and the change log.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single fetch-and-save cycle
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CycleId(String);

impl CycleId {
    /// Generate a new CycleId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_ids_are_unique() {
        let a = CycleId::new();
        let b = CycleId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cycle_ids_sort_by_creation() {
        let a = CycleId::new();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = CycleId::new();
        assert!(a.as_str() < b.as_str());
    }

    #[test]
    fn test_cycle_id_serde_is_transparent_string() {
        let id = CycleId::from_string("cycle-1".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"cycle-1\"");
        let back: CycleId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
        assert_eq!(back.to_string(), "cycle-1");
    }
}
