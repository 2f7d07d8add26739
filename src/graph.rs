//! Undirected friend graph over string user ids.
//!
//! [`FriendGraph`] keeps one insertion-ordered neighbor set per vertex. The
//! ordering only makes query output deterministic; it carries no meaning.
//! The adjacency relation is kept symmetric by every mutating method, and a
//! method that returns an error leaves the graph untouched.

use std::collections::{HashMap, HashSet, VecDeque};

use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

/// Errors produced by graph operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The operation referenced an id that is not a vertex.
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    /// An edge from a vertex to itself was requested.
    #[error("self-loop on vertex: {0}")]
    SelfLoop(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;

/// Adjacency-list graph of friendships.
#[derive(Debug, Clone, Default)]
pub struct FriendGraph {
    adjacency: IndexMap<String, IndexSet<String>>,
}

impl FriendGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `id` with no friends. Returns `false` if it was already present.
    pub fn add_vertex(&mut self, id: &str) -> bool {
        if self.adjacency.contains_key(id) {
            return false;
        }
        self.adjacency.insert(id.to_string(), IndexSet::new());
        true
    }

    /// Removes `id` and every edge touching it.
    pub fn remove_vertex(&mut self, id: &str) -> Result<()> {
        let neighbors = self
            .adjacency
            .shift_remove(id)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))?;
        // symmetry means only former neighbors can still mention `id`
        for neighbor in &neighbors {
            if let Some(list) = self.adjacency.get_mut(neighbor) {
                list.shift_remove(id);
            }
        }
        Ok(())
    }

    /// Connects `u` and `v`. Returns `false` if they were already connected.
    pub fn add_edge(&mut self, u: &str, v: &str) -> Result<bool> {
        self.require(u)?;
        self.require(v)?;
        if u == v {
            return Err(GraphError::SelfLoop(u.to_string()));
        }
        if self.has_edge(u, v) {
            return Ok(false);
        }
        self.link(u, v, true);
        Ok(true)
    }

    /// Disconnects `u` and `v`. Returns `false` if there was no edge.
    pub fn remove_edge(&mut self, u: &str, v: &str) -> Result<bool> {
        self.require(u)?;
        self.require(v)?;
        if !self.has_edge(u, v) {
            return Ok(false);
        }
        self.link(u, v, false);
        Ok(true)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|neighbors| neighbors.contains(v))
    }

    /// Friends of `id` in the order the friendships were made.
    pub fn neighbors(&self, id: &str) -> Result<Vec<String>> {
        Ok(self.require(id)?.iter().cloned().collect())
    }

    pub fn degree(&self, id: &str) -> Result<usize> {
        Ok(self.require(id)?.len())
    }

    /// All vertices in registration order.
    pub fn vertices(&self) -> Vec<String> {
        self.adjacency.keys().cloned().collect()
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(IndexSet::len).sum::<usize>() / 2
    }

    /// Friends shared by `a` and `b`, in `a`'s neighbor order.
    pub fn mutual_friends(&self, a: &str, b: &str) -> Result<Vec<String>> {
        let friends_a = self.require(a)?;
        let friends_b = self.require(b)?;
        let lookup: HashSet<&str> = friends_b.iter().map(String::as_str).collect();
        Ok(friends_a
            .iter()
            .filter(|friend| lookup.contains(friend.as_str()))
            .cloned()
            .collect())
    }

    /// Friends-of-friends of `id` that are not already its friends.
    ///
    /// Breadth-first search stopped at distance two. Every vertex keeps the
    /// distance at which it was first reached, so a candidate reachable
    /// through several friends is reported once.
    pub fn suggest(&self, id: &str) -> Result<Vec<String>> {
        self.require(id)?;
        let mut suggestions = Vec::new();
        let mut distance: HashMap<&str, usize> = HashMap::new();
        let mut queue: VecDeque<&str> = VecDeque::new();

        distance.insert(id, 0);
        queue.push_back(id);

        while let Some(current) = queue.pop_front() {
            let depth = distance[current];
            if depth >= 2 {
                continue;
            }
            for neighbor in &self.adjacency[current] {
                if distance.contains_key(neighbor.as_str()) {
                    continue;
                }
                distance.insert(neighbor.as_str(), depth + 1);
                queue.push_back(neighbor.as_str());
                if depth + 1 == 2 {
                    suggestions.push(neighbor.clone());
                }
            }
        }
        Ok(suggestions)
    }

    /// Splits the vertex set into maximal connected groups.
    ///
    /// Groups come out in the order of their first vertex; members of a group
    /// are listed in depth-first preorder.
    pub fn connected_components(&self) -> Vec<Vec<String>> {
        let mut components = Vec::new();
        let mut visited: HashSet<&str> = HashSet::new();

        for start in self.adjacency.keys() {
            if visited.contains(start.as_str()) {
                continue;
            }
            let mut component = Vec::new();
            let mut stack: Vec<&str> = vec![start.as_str()];
            while let Some(node) = stack.pop() {
                if !visited.insert(node) {
                    continue;
                }
                component.push(node.to_string());
                // reversed so the first-stored neighbor is walked first
                for neighbor in self.adjacency[node].iter().rev() {
                    if !visited.contains(neighbor.as_str()) {
                        stack.push(neighbor.as_str());
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// `(id, degree)` pairs, highest degree first.
    ///
    /// Ties keep registration order.
    pub fn rank_by_degree(&self) -> Vec<(String, usize)> {
        let mut ranking: Vec<(String, usize)> = self
            .adjacency
            .iter()
            .map(|(id, neighbors)| (id.clone(), neighbors.len()))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1)); // stable
        ranking
    }

    fn require(&self, id: &str) -> Result<&IndexSet<String>> {
        self.adjacency
            .get(id)
            .ok_or_else(|| GraphError::UnknownVertex(id.to_string()))
    }

    // both ends must already be vertices
    fn link(&mut self, u: &str, v: &str, connect: bool) {
        for (from, to) in [(u, v), (v, u)] {
            if let Some(neighbors) = self.adjacency.get_mut(from) {
                if connect {
                    neighbors.insert(to.to_string());
                } else {
                    neighbors.shift_remove(to);
                }
            }
        }
    }
}
