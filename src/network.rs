//! Service layer wiring profiles, the friend graph, viewing history and the
//! message queue together.
//!
//! [`SocialNetwork`] validates every id against the profile store before it
//! touches the graph, so graph errors only surface here if the two ever
//! disagree.

use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info};

use crate::graph::{FriendGraph, GraphError};
use crate::message::{Message, MessageQueue};
use crate::profile::User;

/// Errors produced by network operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkError {
    #[error("user ID '{0}' already exists")]
    UserExists(String),

    #[error("user '{0}' not found")]
    UserNotFound(String),

    #[error("'{0}' and '{1}' are already friends")]
    AlreadyFriends(String, String),

    #[error("'{0}' and '{1}' are not friends")]
    NotFriends(String, String),

    #[error("user '{0}' cannot befriend themselves")]
    SelfFriendship(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[derive(Debug, Default)]
pub struct SocialNetwork {
    profiles: IndexMap<String, User>,
    graph: FriendGraph,
    recently_viewed: Vec<String>, // top of the stack is the last element
    messages: MessageQueue,
}

impl SocialNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&mut self, id: &str, name: &str, age: u32, email: &str) -> Result<&User> {
        if id.is_empty() {
            debug!("rejected user with empty id");
            return Err(NetworkError::InvalidInput("user ID must not be empty".to_string()));
        }
        if self.profiles.contains_key(id) {
            debug!(user = id, "rejected duplicate user");
            return Err(NetworkError::UserExists(id.to_string()));
        }
        self.graph.add_vertex(id);
        info!(user = id, name, "user added");
        self.profiles
            .insert(id.to_string(), User::new(id, name, age, email));
        Ok(&self.profiles[id])
    }

    /// Removes the user's profile and every friendship they had.
    pub fn delete_user(&mut self, id: &str) -> Result<User> {
        self.check(id)?;
        self.graph.remove_vertex(id)?;
        let user = self
            .profiles
            .shift_remove(id)
            .ok_or_else(|| NetworkError::UserNotFound(id.to_string()))?;
        info!(user = id, "user deleted");
        Ok(user)
    }

    pub fn add_friend(&mut self, a: &str, b: &str) -> Result<()> {
        self.check_both(a, b)?;
        if a == b {
            debug!(user = a, "rejected self friendship");
            return Err(NetworkError::SelfFriendship(a.to_string()));
        }
        if !self.graph.add_edge(a, b)? {
            debug!(a, b, "already friends");
            return Err(NetworkError::AlreadyFriends(a.to_string(), b.to_string()));
        }
        info!(a, b, "friendship added");
        Ok(())
    }

    pub fn remove_friend(&mut self, a: &str, b: &str) -> Result<()> {
        self.check_both(a, b)?;
        if !self.graph.remove_edge(a, b)? {
            debug!(a, b, "not friends");
            return Err(NetworkError::NotFriends(a.to_string(), b.to_string()));
        }
        info!(a, b, "friendship removed");
        Ok(())
    }

    pub fn friends(&self, id: &str) -> Result<Vec<&User>> {
        self.check(id)?;
        Ok(self.lookup(self.graph.neighbors(id)?))
    }

    pub fn mutual_friends(&self, a: &str, b: &str) -> Result<Vec<&User>> {
        self.check_both(a, b)?;
        Ok(self.lookup(self.graph.mutual_friends(a, b)?))
    }

    pub fn suggest_friends(&self, id: &str) -> Result<Vec<&User>> {
        self.check(id)?;
        Ok(self.lookup(self.graph.suggest(id)?))
    }

    pub fn connected_groups(&self) -> Vec<Vec<String>> {
        self.graph.connected_components()
    }

    /// Returns the profile with its friend count and records the visit.
    pub fn view_profile(&mut self, id: &str) -> Result<(&User, usize)> {
        self.check(id)?;
        let friend_count = self.graph.degree(id)?;
        self.recently_viewed.push(id.to_string());
        debug!(user = id, "profile viewed");
        Ok((&self.profiles[id], friend_count))
    }

    /// Viewed ids, most recent first.
    pub fn recently_viewed(&self) -> impl Iterator<Item = &str> {
        self.recently_viewed.iter().rev().map(String::as_str)
    }

    pub fn send_message(&mut self, from: &str, to: &str, content: &str) -> Result<()> {
        self.check_both(from, to)?;
        self.messages.push(Message::new(from, to, content));
        info!(from, to, pending = self.messages.len(), "message queued");
        Ok(())
    }

    /// Delivers the oldest pending message, if any.
    pub fn deliver_next(&mut self) -> Option<Message> {
        let message = self.messages.pop()?;
        info!(from = %message.from, to = %message.to, "message delivered");
        Some(message)
    }

    pub fn pending_messages(&self) -> &MessageQueue {
        &self.messages
    }

    /// Users with their friend counts, most connected first.
    pub fn ranking(&self) -> Vec<(String, usize)> {
        self.graph.rank_by_degree()
    }

    pub fn most_connected(&self) -> Option<(String, usize)> {
        self.ranking().into_iter().next()
    }

    /// All profiles in registration order.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.profiles.values()
    }

    pub fn user(&self, id: &str) -> Option<&User> {
        self.profiles.get(id)
    }

    pub fn user_count(&self) -> usize {
        self.profiles.len()
    }

    /// The user's name, or the raw id once the profile is gone.
    pub fn display_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.profiles.get(id).map_or(id, |user| user.name.as_str())
    }

    pub fn graph(&self) -> &FriendGraph {
        &self.graph
    }

    fn check(&self, id: &str) -> Result<()> {
        if self.profiles.contains_key(id) {
            Ok(())
        } else {
            debug!(user = id, "user not found");
            Err(NetworkError::UserNotFound(id.to_string()))
        }
    }

    fn check_both(&self, a: &str, b: &str) -> Result<()> {
        self.check(a)?;
        self.check(b)
    }

    fn lookup(&self, ids: Vec<String>) -> Vec<&User> {
        ids.iter().filter_map(|id| self.profiles.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(users: &[&User]) -> Vec<String> {
        users.iter().map(|user| user.name.clone()).collect()
    }

    fn sample() -> SocialNetwork {
        let mut network = SocialNetwork::new();
        network.add_user("u1", "Alice", 22, "alice@mail.com").unwrap();
        network.add_user("u2", "Bob", 24, "bob@mail.com").unwrap();
        network.add_user("u3", "Charlie", 21, "charlie@mail.com").unwrap();
        network.add_user("u4", "Diana", 23, "diana@mail.com").unwrap();
        network.add_user("u5", "Eve", 25, "eve@mail.com").unwrap();
        network.add_user("u6", "Frank", 27, "frank@mail.com").unwrap();
        for (a, b) in [("u1", "u2"), ("u1", "u3"), ("u2", "u4"), ("u3", "u4"), ("u4", "u5")] {
            network.add_friend(a, b).unwrap();
        }
        network
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let mut network = sample();
        assert_eq!(
            network.add_user("u1", "Other", 30, "other@mail.com"),
            Err(NetworkError::UserExists("u1".to_string()))
        );
        assert_eq!(network.user("u1").unwrap().name, "Alice");
        assert!(network.add_user("", "Nobody", 1, "").is_err());
        assert_eq!(network.user_count(), 6);
    }

    #[test]
    fn test_delete_user() {
        let mut network = sample();
        let removed = network.delete_user("u4").unwrap();
        assert_eq!(removed.name, "Diana");
        assert!(network.user("u4").is_none());
        assert_eq!(names(&network.friends("u2").unwrap()), vec!["Alice"]);
        assert_eq!(
            network.delete_user("u4"),
            Err(NetworkError::UserNotFound("u4".to_string()))
        );
    }

    #[test]
    fn test_friendship_errors() {
        let mut network = sample();
        assert_eq!(
            network.add_friend("u2", "u1"),
            Err(NetworkError::AlreadyFriends("u2".to_string(), "u1".to_string()))
        );
        assert_eq!(
            network.add_friend("u1", "u1"),
            Err(NetworkError::SelfFriendship("u1".to_string()))
        );
        assert_eq!(
            network.remove_friend("u1", "u6"),
            Err(NetworkError::NotFriends("u1".to_string(), "u6".to_string()))
        );
        assert_eq!(
            network.add_friend("u1", "ghost"),
            Err(NetworkError::UserNotFound("ghost".to_string()))
        );
        network.remove_friend("u1", "u2").unwrap();
        assert_eq!(names(&network.friends("u1").unwrap()), vec!["Charlie"]);
    }

    #[test]
    fn test_queries() {
        let network = sample();
        assert_eq!(
            names(&network.mutual_friends("u1", "u4").unwrap()),
            vec!["Bob", "Charlie"]
        );
        assert_eq!(names(&network.suggest_friends("u1").unwrap()), vec!["Diana"]);
        assert_eq!(network.connected_groups().len(), 2);
        assert_eq!(network.most_connected(), Some(("u4".to_string(), 3)));
        assert!(network.suggest_friends("u9").is_err());
    }

    #[test]
    fn test_recently_viewed_is_lifo() {
        let mut network = sample();
        let (user, friends) = network.view_profile("u4").unwrap();
        assert_eq!(user.name, "Diana");
        assert_eq!(friends, 3);
        network.view_profile("u1").unwrap();
        network.view_profile("u4").unwrap();
        assert!(network.view_profile("u9").is_err());
        assert_eq!(
            network.recently_viewed().collect::<Vec<_>>(),
            vec!["u4", "u1", "u4"]
        );
        // viewing history does not drain
        assert_eq!(network.recently_viewed().count(), 3);
    }

    #[test]
    fn test_history_survives_deleted_user() {
        let mut network = sample();
        network.view_profile("u6").unwrap();
        network.delete_user("u6").unwrap();
        let viewed: Vec<&str> = network.recently_viewed().collect();
        assert_eq!(viewed, vec!["u6"]);
        assert_eq!(network.display_name("u6"), "u6");
        assert_eq!(network.display_name("u1"), "Alice");
    }

    #[test]
    fn test_message_queue() {
        let mut network = sample();
        network.send_message("u1", "u2", "Hey Bob!").unwrap();
        network.send_message("u3", "u1", "Let's connect!").unwrap();
        assert!(network.send_message("u1", "ghost", "hello?").is_err());
        assert_eq!(network.pending_messages().len(), 2);
        assert_eq!(network.deliver_next().unwrap().content, "Hey Bob!");
        assert_eq!(network.deliver_next().unwrap().content, "Let's connect!");
        assert!(network.deliver_next().is_none());
    }

    #[test]
    fn test_most_connected_empty() {
        let network = SocialNetwork::new();
        assert!(network.most_connected().is_none());
        assert_eq!(network.users().count(), 0);
    }
}
