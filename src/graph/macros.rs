//! Macro for convenient Cypher query construction.

/// Macro for inline Cypher queries with optional parameters.
///
/// Shorthand for creating and parameterizing a [`Query`](crate::graph::Query).
///
/// # Usage
///
/// ```ignore
/// use neokuzu::cypher;
///
/// // Query without parameters
/// let query = cypher!(client, "MATCH (n) RETURN n");
///
/// // Query with parameters
/// let query = cypher!(client, "MATCH (n) WHERE n.id = $id RETURN n", id = node_id);
///
/// // Execute the query
/// let rows = query.fetch_all().await?;
/// ```
#[macro_export]
macro_rules! cypher {
    // Query without parameters
    ($executor:expr, $query:expr) => {
        $executor.query($query)
    };
    // Query with parameters
    ($executor:expr, $query:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $executor.query($query)$(.param(stringify!($name), $value))+
    };
}
