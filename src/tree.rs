//! Materialises a flat heading list into an ordered forest.
//!
//! Records are placed under the parent they name. Top-level records become roots and records
//! whose parent is absent from the input are dropped. Every sibling group is then sorted by
//! `order_index`, keeping input order for ties.
//!
//! When an id appears more than once the last occurrence wins and earlier ones are dropped, so a
//! node is never emitted twice. Cycles are not detected: records on a cycle have no path to a
//! root and simply never appear in the output.

use crate::heading::{HeadingNode, HeadingRecord};
use std::collections::HashMap;

/// An ordered forest plus the document total of the input it was built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HeadingTree {
    /// Top-level headings in display order.
    pub roots: Vec<HeadingNode>,
    /// Documents across every input record, including ones dropped from the forest.
    pub total_documents: usize,
}

impl HeadingTree {
    #[must_use]
    /// Builds the forest and counts documents in one pass over the caller's snapshot.
    pub fn from_records(records: &[HeadingRecord]) -> Self {
        Self {
            roots: build_tree(records),
            total_documents: count_documents(records),
        }
    }

    #[must_use]
    /// Whether there is nothing to display.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    #[must_use]
    /// Number of headings reachable from the roots.
    pub fn heading_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&HeadingNode> = self.roots.iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(&node.children);
        }
        count
    }

    #[must_use]
    /// Completion percentage across the whole forest.
    pub fn completion(&self) -> f64 {
        forest_completion(&self.roots)
    }
}

#[must_use]
/// Converts flat heading records into an ordered forest.
///
/// The input is only borrowed; every node in the result owns a clone of its record.
pub fn build_tree(records: &[HeadingRecord]) -> Vec<HeadingNode> {
    let mut owner: HashMap<i64, usize> = HashMap::with_capacity(records.len());
    for (pos, record) in records.iter().enumerate() {
        if let Some(previous) = owner.insert(record.id, pos) {
            tracing::warn!(
                id = record.id,
                dropped = previous,
                kept = pos,
                "duplicate heading id, keeping the last occurrence"
            );
        }
    }

    let mut roots = Vec::new();
    let mut children: HashMap<i64, Vec<usize>> = HashMap::new();
    let mut orphans = 0usize;

    for (pos, record) in records.iter().enumerate() {
        if owner.get(&record.id) != Some(&pos) {
            continue;
        }
        match record.parent_heading_id {
            None => roots.push(pos),
            Some(parent) if owner.contains_key(&parent) => {
                children.entry(parent).or_default().push(pos);
            }
            Some(parent) => {
                orphans += 1;
                tracing::debug!(id = record.id, parent, "dropping orphan heading");
            }
        }
    }

    if orphans > 0 {
        tracing::debug!(orphans, "headings without a resolvable parent were dropped");
    }

    // Pre-order walk from the roots. Child lists are consumed by parent id, so every kept
    // record is reached at most once and records on a cycle are never reached.
    let mut order = Vec::with_capacity(records.len());
    let mut child_positions: HashMap<usize, Vec<usize>> = HashMap::new();
    let mut pending = roots.clone();
    while let Some(pos) = pending.pop() {
        order.push(pos);
        if let Some(kids) = children.remove(&records[pos].id) {
            pending.extend(kids.iter().copied());
            child_positions.insert(pos, kids);
        }
    }

    // Children precede their parent in reverse pre-order, so each node is assembled from
    // finished subtrees without recursing.
    let mut built: Vec<Option<HeadingNode>> = std::iter::repeat_with(|| None)
        .take(records.len())
        .collect();
    for &pos in order.iter().rev() {
        let mut node = HeadingNode::new(records[pos].clone());
        if let Some(kids) = child_positions.remove(&pos) {
            node.children = kids.into_iter().filter_map(|kid| built[kid].take()).collect();
            // stable: equal order keys keep input order
            node.children.sort_by_key(|child| child.record.order_index);
        }
        built[pos] = Some(node);
    }

    let mut forest: Vec<HeadingNode> = roots
        .into_iter()
        .filter_map(|pos| built[pos].take())
        .collect();
    forest.sort_by_key(|node| node.record.order_index);
    forest
}

#[must_use]
/// Sums attached documents over the flat input, independent of tree placement.
pub fn count_documents(records: &[HeadingRecord]) -> usize {
    records.iter().map(|r| r.documents.len()).sum()
}

#[must_use]
/// Percentage of a heading considered complete.
///
/// A heading holding documents is complete. A bare leaf is not. Otherwise completion is the
/// mean of the children's.
pub fn node_completion(node: &HeadingNode) -> f64 {
    if !node.record.documents.is_empty() {
        return 100.0;
    }
    forest_completion(&node.children)
}

#[must_use]
#[allow(clippy::cast_precision_loss)]
/// Mean completion of a sibling group, zero when the group is empty.
pub fn forest_completion(nodes: &[HeadingNode]) -> f64 {
    if nodes.is_empty() {
        return 0.0;
    }
    nodes.iter().map(node_completion).sum::<f64>() / nodes.len() as f64
}

#[cfg(test)]
#[path = "tests/tree.rs"]
mod tests;
