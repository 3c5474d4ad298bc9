//! Edge usage counting for closure checks.

use hashbrown::HashMap;

/// How many faces use each undirected edge of a mesh.
///
/// A closed (watertight) mesh uses every edge exactly twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Number of distinct undirected edges.
    pub edge_count: usize,
    /// Edges used by exactly one face.
    pub boundary_edges: usize,
    /// Edges used by more than two faces.
    pub non_manifold_edges: usize,
}

impl EdgeReport {
    /// `true` when every edge is shared by exactly two faces.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.boundary_edges == 0 && self.non_manifold_edges == 0
    }
}

/// Count edge usage over faces given as vertex keys.
///
/// Collapsed edges (both ends the same key) are ignored.
pub(crate) fn edge_report<K>(faces: impl Iterator<Item = [K; 3]>) -> EdgeReport
where
    K: Copy + Ord + std::hash::Hash,
{
    let mut usage: HashMap<(K, K), usize> = HashMap::new();
    for [a, b, c] in faces {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            if u == v {
                continue;
            }
            let key = if u < v { (u, v) } else { (v, u) };
            *usage.entry(key).or_insert(0) += 1;
        }
    }

    let mut report = EdgeReport {
        edge_count: usage.len(),
        ..EdgeReport::default()
    };
    for &count in usage.values() {
        match count {
            1 => report.boundary_edges += 1,
            2 => {}
            _ => report.non_manifold_edges += 1,
        }
    }
    report
}
