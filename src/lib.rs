//! neokuzu - neo4j-style query surface over embedded Kùzu
//!
//! An adapter that lets application code written against the reference
//! driver's async `execute_query` contract run unmodified on the embedded
//! Kùzu engine. Built with the `kuzu` feature it wraps the real engine;
//! without it, construction fails fast with a fixed message, the same way
//! an uninstalled engine library would.

pub mod cli;
pub mod config;
pub mod error;
pub mod graph;
