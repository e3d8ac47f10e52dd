//! Graph abstraction layer over the embedded adapter.
//!
//! This module provides the driver-compatible query surface:
//!
//! - [`CypherExecutor`] - Execute Cypher queries against any backend
//! - [`Row`]/[`Params`] - Result rows and named parameters
//! - [`QueryOutput`]/[`Summary`] - The neo4j driver's three-part result shape
//! - [`Query`]/[`QueryExt`] - Fluent query construction
//!
//! # Usage
//!
//! ```ignore
//! use neokuzu::graph::backends::kuzu::KuzuClient;
//! use neokuzu::graph::QueryExt;
//!
//! let client = KuzuClient::open("./graph.kuzu").await?;
//!
//! // Builder surface
//! let rows = client
//!     .query("MATCH (n:Entity) WHERE n.id = $id RETURN n.name")
//!     .param("id", entity_id)
//!     .fetch_all()
//!     .await?;
//!
//! // Reference driver surface
//! let (rows, summary, columns) = client
//!     .execute_query("MATCH (n) RETURN n.name", Params::new())
//!     .await?;
//!
//! client.close().await?;
//! ```

mod macros;
mod query;
pub mod result;
mod row;
mod traits;

pub mod backends;

// Re-export core types
pub use query::{Query, QueryExt};
pub use result::{QueryOutput, RowCursor, Summary};
pub use row::{Params, Row};
pub use traits::CypherExecutor;

// Re-export macro (defined at crate root via #[macro_export])
#[doc(inline)]
pub use crate::cypher;
