use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use social_graph::console::Console;
use social_graph::seed;
use social_graph::SocialNetwork;

/// Social network backend console.
#[derive(Parser)]
#[command(name = "social_graph", about = "In-memory social network console")]
struct Cli {
    /// CSV file of users to import (header: id,name,age,email).
    #[arg(long, env = "SOCIAL_GRAPH_USERS")]
    users: Option<PathBuf>,

    /// CSV file of friendships to import (header: a,b).
    #[arg(long, env = "SOCIAL_GRAPH_FRIENDSHIPS")]
    friendships: Option<PathBuf>,

    /// Start without the built-in sample users.
    #[arg(long)]
    no_sample: bool,

    /// Log filter directive, e.g. `info` or `social_graph=debug`.
    #[arg(long, default_value = "warn", env = "SOCIAL_GRAPH_LOG")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the console
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&cli.log_level).context("invalid log filter")?)
        .with_writer(io::stderr)
        .init();

    let mut network = SocialNetwork::new();
    if !cli.no_sample {
        seed::load_sample(&mut network);
    }
    if let Some(path) = &cli.users {
        seed::import_users_from_path(&mut network, path)
            .with_context(|| format!("importing users from {}", path.display()))?;
    }
    if let Some(path) = &cli.friendships {
        seed::import_friendships_from_path(&mut network, path)
            .with_context(|| format!("importing friendships from {}", path.display()))?;
    }
    tracing::info!(users = network.user_count(), "network ready");

    println!("============================================================");
    println!("              SOCIAL NETWORK BACKEND SYSTEM                 ");
    println!("============================================================");

    let stdin = io::stdin();
    Console::new(&mut network, stdin.lock(), io::stdout().lock())
        .run()
        .context("console I/O failed")
}
