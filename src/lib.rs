//! Toy social network built around an undirected friend graph.
//!
//! [`graph::FriendGraph`] holds the friendships and answers the graph
//! queries (mutual friends, two-hop suggestions, connected groups, degree
//! ranking). [`network::SocialNetwork`] adds profiles, a recently-viewed
//! stack and a message queue on top, and [`console::Console`] drives it from
//! a line-based menu.

pub mod console;
pub mod graph;
pub mod message;
pub mod network;
pub mod profile;
pub mod seed;

pub use graph::{FriendGraph, GraphError};
pub use network::{NetworkError, SocialNetwork};
