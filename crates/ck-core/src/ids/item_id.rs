use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Stable identifier of a clipboard history item.
///
/// Assigned once at creation and never reassigned for the life of the item.
/// Generated ids are time-prefixed so that lexicographic comparison of ids
/// created on the same device roughly follows creation order, with a random
/// suffix to keep rapid-fire additions within the same millisecond unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a fresh id derived from the given epoch-millis timestamp.
    pub fn generate(now_ms: i64) -> Self {
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("{}-{}", now_ms, &suffix[..8]))
    }
}

impl_id!(ItemId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_unique_within_the_same_millisecond() {
        let a = ItemId::generate(1700000000000);
        let b = ItemId::generate(1700000000000);
        assert_ne!(a, b);
    }

    #[test]
    fn generated_ids_are_time_prefixed() {
        let id = ItemId::generate(1700000000000);
        assert!(id.as_str().starts_with("1700000000000-"));
    }
}
