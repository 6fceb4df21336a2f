use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle tracking of a stored aggregate instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft delete flag
    pub is_deleted: bool,
    pub is_posted: bool,
    /// Optimistic locking version, bumped on every write
    pub version: i32,
}

impl EntityMetadata {
    /// Metadata for a record created at `now`
    pub fn new_at(now: DateTime<Utc>) -> Self {
        Self {
            created_at: now,
            updated_at: now,
            is_deleted: false,
            is_posted: false,
            version: 0,
        }
    }

    pub fn new() -> Self {
        Self::new_at(Utc::now())
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn increment_version(&mut self) {
        self.version += 1;
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_at_sets_both_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let meta = EntityMetadata::new_at(now);
        assert_eq!(meta.created_at, now);
        assert_eq!(meta.updated_at, now);
        assert!(!meta.is_deleted);
        assert_eq!(meta.version, 0);
    }

    #[test]
    fn test_increment_version() {
        let mut meta = EntityMetadata::new();
        meta.increment_version();
        meta.increment_version();
        assert_eq!(meta.version, 2);
    }
}
