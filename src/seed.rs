//! Initial network contents: the built-in sample and CSV imports.
//!
//! CSV files are read once at startup and applied through
//! [`SocialNetwork`], so a row is held to the same rules as console input.
//! Rows the network rejects are skipped and counted; only an unreadable or
//! malformed file is an error.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::network::SocialNetwork;
use crate::profile::User;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Row of a friendships file: one undirected edge.
#[derive(Debug, Clone, Deserialize)]
struct FriendshipRecord {
    a: String,
    b: String,
}

/// How many rows were applied and how many the network turned down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub applied: usize,
    pub rejected: usize,
}

const SAMPLE_USERS: [(&str, &str, u32, &str); 6] = [
    ("u1", "Alice", 22, "alice@mail.com"),
    ("u2", "Bob", 24, "bob@mail.com"),
    ("u3", "Charlie", 21, "charlie@mail.com"),
    ("u4", "Diana", 23, "diana@mail.com"),
    ("u5", "Eve", 25, "eve@mail.com"),
    ("u6", "Frank", 27, "frank@mail.com"), // isolated
];

const SAMPLE_FRIENDSHIPS: [(&str, &str); 5] = [
    ("u1", "u2"),
    ("u1", "u3"),
    ("u2", "u4"),
    ("u3", "u4"),
    ("u4", "u5"),
];

const SAMPLE_MESSAGES: [(&str, &str, &str); 2] = [
    ("u1", "u2", "Hey Bob!"),
    ("u3", "u1", "Let's connect!"),
];

/// Loads six users, five friendships and two queued messages.
pub fn load_sample(network: &mut SocialNetwork) -> ImportReport {
    let mut report = ImportReport::default();
    for (id, name, age, email) in SAMPLE_USERS {
        report.record(network.add_user(id, name, age, email).map(|_| ()), "sample user");
    }
    for (a, b) in SAMPLE_FRIENDSHIPS {
        report.record(network.add_friend(a, b), "sample friendship");
    }
    for (from, to, content) in SAMPLE_MESSAGES {
        report.record(network.send_message(from, to, content), "sample message");
    }
    info!(applied = report.applied, rejected = report.rejected, "sample data loaded");
    report
}

/// Reads `id,name,age,email` rows (with header) into the network.
pub fn import_users<R: Read>(network: &mut SocialNetwork, reader: R) -> Result<ImportReport, SeedError> {
    let mut report = ImportReport::default();
    for row in csv_reader(reader).deserialize::<User>() {
        let user = row?;
        let outcome = network
            .add_user(&user.id, &user.name, user.age, &user.email)
            .map(|_| ());
        report.record(outcome, "user row");
    }
    info!(applied = report.applied, rejected = report.rejected, "users imported");
    Ok(report)
}

/// Reads `a,b` rows (with header) into the network as friendships.
pub fn import_friendships<R: Read>(
    network: &mut SocialNetwork,
    reader: R,
) -> Result<ImportReport, SeedError> {
    let mut report = ImportReport::default();
    for row in csv_reader(reader).deserialize::<FriendshipRecord>() {
        let record = row?;
        report.record(network.add_friend(&record.a, &record.b), "friendship row");
    }
    info!(applied = report.applied, rejected = report.rejected, "friendships imported");
    Ok(report)
}

pub fn import_users_from_path(network: &mut SocialNetwork, path: &Path) -> Result<ImportReport, SeedError> {
    import_users(network, open(path)?)
}

pub fn import_friendships_from_path(
    network: &mut SocialNetwork,
    path: &Path,
) -> Result<ImportReport, SeedError> {
    import_friendships(network, open(path)?)
}

fn open(path: &Path) -> Result<File, SeedError> {
    File::open(path).map_err(|source| SeedError::Open {
        path: path.to_path_buf(),
        source,
    })
}

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new().trim(Trim::All).from_reader(reader)
}

impl ImportReport {
    fn record<E: std::fmt::Display>(&mut self, outcome: Result<(), E>, what: &str) {
        match outcome {
            Ok(()) => self.applied += 1,
            Err(err) => {
                warn!(error = %err, "skipped {}", what);
                self.rejected += 1;
            }
        }
    }
}
