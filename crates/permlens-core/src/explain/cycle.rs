//! Semantic cycle detection over check traces.
//!
//! A trace is an owned tree, so it has no structural back-edges. A recursive
//! permission shows up as the same `(resource, permission)` pair appearing
//! twice along a walk. The two detectors below are not interchangeable:
//!
//! - [`WalkDedup`] is shared by a whole top-level render. Once a key has been
//!   seen anywhere in the pre-order walk, every later occurrence is a revisit,
//!   including ones in unrelated sibling branches.
//! - [`is_part_of_cycle`] looks ahead from one node with a path-scoped set, so
//!   converging branches (diamonds) are not reported.

use crate::model::CheckTraceNode;
use std::collections::HashSet;

/// `<type>:<id>#<permission>` identity of a check.
pub fn cycle_key(node: &CheckTraceNode) -> String {
    format!("{}#{}", node.resource, node.permission)
}

/// Keys already expanded during one render.
#[derive(Debug, Default)]
pub struct WalkDedup {
    seen: HashSet<String>,
}

impl WalkDedup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node`; true when its key had already been recorded.
    pub fn revisit(&mut self, node: &CheckTraceNode) -> bool {
        !self.seen.insert(cycle_key(node))
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// True when some descendant of `node` repeats a key already on its path,
/// `node` itself included.
///
/// Nodes without intermediate children end the search without being
/// compared, so a leaf repeating an ancestor is not a cycle.
pub fn is_part_of_cycle(node: &CheckTraceNode) -> bool {
    lookahead(node, &mut HashSet::new())
}

fn lookahead(node: &CheckTraceNode, path: &mut HashSet<String>) -> bool {
    let Some(sub_traces) = node.sub_traces() else {
        return false;
    };

    let key = cycle_key(node);
    if path.contains(&key) {
        return true;
    }

    path.insert(key.clone());
    let found = sub_traces.iter().any(|sub| lookahead(sub, path));
    path.remove(&key);
    found
}
