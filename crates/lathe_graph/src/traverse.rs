//! Breadth-first walks over the edge set.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::model::{Edge, Hop};

/// Adjacency lists built from a snapshot of the edge relation.
///
/// Edges arrive in ascending storage-key order and each list keeps
/// that order, so every walk below visits neighbors deterministically.
pub(crate) struct Adjacency {
    out: BTreeMap<String, Vec<Edge>>,
}

impl Adjacency {
    pub(crate) fn from_edges(edges: Vec<Edge>) -> Self {
        let mut out: BTreeMap<String, Vec<Edge>> = BTreeMap::new();
        for edge in edges {
            out.entry(edge.from.clone()).or_default().push(edge);
        }
        Adjacency { out }
    }

    fn out_edges(&self, kind: &str) -> &[Edge] {
        match self.out.get(kind) {
            Some(edges) => edges,
            None => &[],
        }
    }

    /// Whether `to` is reachable from `from`. A kind reaches itself.
    pub(crate) fn reaches(&self, from: &str, to: &str) -> bool {
        if from == to {
            return true;
        }
        let mut visited = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(from.to_string());
        queue.push_back(from.to_string());
        while let Some(current) = queue.pop_front() {
            for edge in self.out_edges(&current) {
                if edge.to == to {
                    return true;
                }
                if visited.insert(edge.to.clone()) {
                    queue.push_back(edge.to.clone());
                }
            }
        }
        false
    }

    /// Shortest path by hop count, or `None` when unreachable.
    ///
    /// Among equal-length paths the winner is the first one discovered
    /// when neighbors expand in ascending edge-key order, so ties
    /// resolve the same way on every call.
    pub(crate) fn shortest_route(&self, from: &str, to: &str) -> Option<Vec<Hop>> {
        let mut visited = HashSet::new();
        let mut parent: HashMap<String, (String, Hop)> = HashMap::new();
        let mut queue = VecDeque::new();
        visited.insert(from.to_string());
        queue.push_back(from.to_string());
        while let Some(current) = queue.pop_front() {
            if current == to {
                let mut path = Vec::new();
                let mut node = current;
                while let Some((prev, hop)) = parent.get(&node) {
                    path.push(hop.clone());
                    node = prev.clone();
                }
                path.reverse();
                return Some(path);
            }
            for edge in self.out_edges(&current) {
                if visited.insert(edge.to.clone()) {
                    let hop = Hop {
                        kind: edge.to.clone(),
                        relation: edge.relation.clone(),
                        transform: edge.transform.clone(),
                    };
                    parent.insert(edge.to.clone(), (current.clone(), hop));
                    queue.push_back(edge.to.clone());
                }
            }
        }
        None
    }

    /// Every kind reachable from `start` by one or more hops, in
    /// breadth-first discovery order. Excludes `start` itself.
    pub(crate) fn closure_from(&self, start: &str) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::new();
        seen.insert(start.to_string());
        queue.push_back(start.to_string());
        while let Some(current) = queue.pop_front() {
            for edge in self.out_edges(&current) {
                if seen.insert(edge.to.clone()) {
                    order.push(edge.to.clone());
                    queue.push_back(edge.to.clone());
                }
            }
        }
        order
    }
}
