//! CLI module for neokuzu.
//!
//! Subcommands:
//! - `query`: Run a Cypher query against a Kùzu database and print the rows

mod query;

use clap::{Parser, Subcommand};

/// neokuzu - neo4j-style query surface over embedded Kùzu
#[derive(Parser)]
#[command(name = "neokuzu")]
#[command(about = "Run Cypher queries against an embedded Kùzu database")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run a Cypher query and print each row as a JSON object
    Query {
        /// The Cypher query to execute
        cypher: String,

        /// Database path (overrides configuration)
        #[arg(long)]
        db: Option<String>,

        /// Named parameter as key=value; the value is parsed as JSON,
        /// falling back to a plain string
        #[arg(short, long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> color_eyre::Result<()> {
        match self.command {
            Command::Query {
                ref cypher,
                ref db,
                ref params,
            } => self.run_query(cypher, db.as_deref(), params).await,
        }
    }
}
