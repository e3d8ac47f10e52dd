//! Core trait for executing Cypher against a backend.

use async_trait::async_trait;

use crate::error::DriverError;
use crate::graph::result::QueryOutput;
use crate::graph::row::Params;

/// Executes Cypher queries against a graph database.
///
/// All backends implement this trait; the query builder in
/// [`crate::graph::query`] works over any implementation.
#[async_trait]
pub trait CypherExecutor: Send + Sync {
    /// Executes a Cypher query and returns the fully materialized result.
    ///
    /// # Arguments
    ///
    /// * `cypher` - The Cypher query string
    /// * `params` - Named parameters to bind to the query
    async fn execute_cypher(
        &self,
        cypher: &str,
        params: Params,
    ) -> Result<QueryOutput, DriverError>;

    /// Executes a Cypher query and discards the result.
    ///
    /// Use this for mutations (CREATE, MERGE, DELETE, SET).
    async fn run_cypher(&self, cypher: &str, params: Params) -> Result<(), DriverError> {
        self.execute_cypher(cypher, params).await.map(|_| ())
    }
}
