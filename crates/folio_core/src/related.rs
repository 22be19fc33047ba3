//! Related-items adjacency
//!
//! Directed, not necessarily symmetric: `a -> b` says `a`'s detail panel
//! links to `b`. Only edges whose target exists are kept, so lookups never
//! produce a dangling id.

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::content::{ItemId, TimelineItem};

/// Adjacency list of related orbit items with O(1) membership checks
#[derive(Clone, Debug, Default)]
pub struct RelatedGraph {
    /// Outgoing edges in declaration order
    edges: FxHashMap<ItemId, SmallVec<[ItemId; 4]>>,
    /// Same edges as a set, for `is_related`
    pairs: FxHashSet<(ItemId, ItemId)>,
    known: FxHashSet<ItemId>,
}

impl RelatedGraph {
    pub fn from_items(items: &[TimelineItem]) -> Self {
        let known: FxHashSet<ItemId> = items.iter().map(|i| i.id).collect();
        let mut edges: FxHashMap<ItemId, SmallVec<[ItemId; 4]>> = FxHashMap::default();
        let mut pairs = FxHashSet::default();

        for item in items {
            let out = edges.entry(item.id).or_default();
            for &target in &item.related_ids {
                if target == item.id {
                    continue;
                }
                if !known.contains(&target) {
                    tracing::debug!(from = item.id, to = target, "unresolved related id");
                    continue;
                }
                if pairs.insert((item.id, target)) {
                    out.push(target);
                }
            }
        }

        Self {
            edges,
            pairs,
            known,
        }
    }

    /// Resolved related ids of `id`, in declaration order
    pub fn related(&self, id: ItemId) -> &[ItemId] {
        self.edges.get(&id).map(|e| e.as_slice()).unwrap_or(&[])
    }

    /// True if `from` lists `to` as related
    pub fn is_related(&self, from: ItemId, to: ItemId) -> bool {
        self.pairs.contains(&(from, to))
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.known.contains(&id)
    }

    /// Number of resolved edges
    pub fn edge_count(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<TimelineItem> {
        vec![
            TimelineItem::new(1, "one").with_related([2, 3, 1]),
            TimelineItem::new(2, "two").with_related([1, 42]),
            TimelineItem::new(3, "three"),
        ]
    }

    #[test]
    fn test_related_keeps_order_and_skips_self() {
        let graph = RelatedGraph::from_items(&items());
        assert_eq!(graph.related(1), &[2, 3]);
        assert!(!graph.is_related(1, 1));
    }

    #[test]
    fn test_unresolved_targets_are_dropped() {
        let graph = RelatedGraph::from_items(&items());
        assert_eq!(graph.related(2), &[1]);
        assert!(!graph.contains(42));
        assert_eq!(graph.related(42), &[] as &[ItemId]);
    }

    #[test]
    fn test_not_symmetric() {
        let graph = RelatedGraph::from_items(&items());
        assert!(graph.is_related(1, 3));
        assert!(!graph.is_related(3, 1));
        assert_eq!(graph.edge_count(), 3);
    }
}
