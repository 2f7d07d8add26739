//! User profile records.

use std::fmt;

use serde::Deserialize;

/// Profile data kept alongside a user's vertex in the friend graph.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
}

impl User {
    pub fn new(id: &str, name: &str, age: u32, email: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            age,
            email: email.to_string(),
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[ID: {} | Name: {} | Age: {} | Email: {}]",
            self.id, self.name, self.age, self.email
        )
    }
}
