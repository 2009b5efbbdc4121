//! Reconciliation of the local history against the downloaded remote set.

use crate::clipboard::{ClipboardItem, SyncStatus};

/// Merge local items with the records downloaded from the server.
///
/// The remote set is the base result: for any id present on both sides the
/// server copy wins wholesale, with no timestamp comparison. Last-writer-wins
/// is therefore delegated to "whatever the server currently holds", which is
/// what lets every device converge on the same state. The trade-off is
/// deliberate and visible: a local edit to an already-synced item (say a
/// favorite toggled offline) is overwritten by the server copy on the next
/// sync.
///
/// Local items whose id the server does not know are kept and re-marked
/// [`SyncStatus::Pending`] — they are local creations the server has not
/// acknowledged yet. The merged set comes back sorted newest-first.
pub fn merge_remote_wins(
    local: Vec<ClipboardItem>,
    remote: Vec<ClipboardItem>,
) -> Vec<ClipboardItem> {
    let mut merged = remote;

    for mut local_item in local {
        let known_remotely = merged.iter().any(|remote_item| remote_item.id == local_item.id);
        if !known_remotely {
            local_item.sync_status = Some(SyncStatus::Pending);
            merged.push(local_item);
        }
    }

    merged.sort_by(|a, b| b.timestamp_ms.cmp(&a.timestamp_ms));
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{classify, ContentType};
    use crate::ids::ItemId;

    fn item(id: &str, content: &str, timestamp_ms: i64) -> ClipboardItem {
        let mut item = ClipboardItem::candidate(content, classify(content), timestamp_ms, None);
        item.id = ItemId::from(id);
        item
    }

    #[test]
    fn remote_wins_for_shared_ids() {
        let mut local = item("1", "x", 10);
        local.sync_status = Some(SyncStatus::Pending);
        let remote = item("1", "y", 5);

        let merged = merge_remote_wins(vec![local], vec![remote]);

        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].content, "y");
    }

    #[test]
    fn remote_wins_even_when_local_is_newer() {
        // No timestamp comparison: server state is authoritative.
        let mut local = item("1", "local edit", 100);
        local.is_favorite = true;
        let remote = item("1", "server copy", 1);

        let merged = merge_remote_wins(vec![local], vec![remote]);

        assert_eq!(merged[0].content, "server copy");
        assert!(!merged[0].is_favorite);
    }

    #[test]
    fn local_only_items_survive_as_pending() {
        let local = item("2", "unacknowledged", 7);
        let remote = item("1", "known", 9);

        let merged = merge_remote_wins(vec![local], vec![remote]);

        assert_eq!(merged.len(), 2);
        let survivor = merged.iter().find(|i| i.id.as_str() == "2").unwrap();
        assert_eq!(survivor.sync_status, Some(SyncStatus::Pending));
    }

    #[test]
    fn merged_set_is_sorted_newest_first() {
        let locals = vec![item("a", "1", 3), item("b", "2", 11)];
        let remotes = vec![item("c", "3", 7), item("d", "4", 1)];

        let merged = merge_remote_wins(locals, remotes);

        let timestamps: Vec<i64> = merged.iter().map(|i| i.timestamp_ms).collect();
        assert_eq!(timestamps, vec![11, 7, 3, 1]);
    }

    #[test]
    fn conflict_status_survives_the_merge() {
        // Reserved tag: never assigned by this policy, but never dropped either.
        let mut remote = item("1", "x", 5);
        remote.sync_status = Some(SyncStatus::Conflict);
        remote.content_type = ContentType::Code;

        let merged = merge_remote_wins(vec![], vec![remote]);
        assert_eq!(merged[0].sync_status, Some(SyncStatus::Conflict));
    }

    #[test]
    fn merging_empty_sides_is_fine() {
        assert!(merge_remote_wins(vec![], vec![]).is_empty());
    }
}
