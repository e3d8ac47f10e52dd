//! Backend implementations.
//!
//! Each backend implements [`CypherExecutor`](crate::graph::CypherExecutor)
//! and exposes the neo4j driver's `(rows, summary, columns)` contract
//! through its client type.
//!
//! # Available Backends
//!
//! | Backend | Module | Feature |
//! |---------|--------|---------|
//! | Embedded Kùzu | [`kuzu`] | `kuzu` (stub without it) |

pub mod kuzu;
