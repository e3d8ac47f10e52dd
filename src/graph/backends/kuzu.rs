//! Embedded Kùzu backend.
//!
//! [`KuzuClient`] presents the neo4j driver's `execute_query` contract
//! over an embedded Kùzu database: construct against a filesystem path,
//! execute Cypher with named parameters, receive `(rows, summary, columns)`,
//! close. The summary slot is always absent; Kùzu produces no analogue.
//!
//! The engine is blocking, so every call runs on a blocking thread via
//! `spawn_blocking` and the caller's task suspends for the duration. The
//! adapter does not serialize concurrent use of one instance; callers that
//! need ordering between `execute_query` and `close` must provide it.
//!
//! # Example
//!
//! ```ignore
//! use neokuzu::graph::backends::kuzu::KuzuClient;
//! use neokuzu::graph::Params;
//!
//! let client = KuzuClient::open("./graph.kuzu").await?;
//! let (rows, summary, columns) = client
//!     .execute_query("MATCH (n) RETURN n.name", Params::new())
//!     .await?;
//! assert!(summary.is_none());
//! client.close().await?;
//! ```

use crate::graph::row::Params;

/// Parameter keys the neo4j driver uses for database selection and
/// routing. Accepted and silently discarded; they have no effect here.
pub const RESERVED_PARAM_KEYS: [&str; 2] = ["database_", "routing_"];

/// Removes the neo4j driver's routing/database-selection keys.
#[cfg_attr(not(feature = "kuzu"), allow(dead_code))]
fn strip_reserved(mut params: Params) -> Params {
    for key in RESERVED_PARAM_KEYS {
        if params.remove(key).is_some() {
            tracing::debug!(key, "discarding reserved routing parameter");
        }
    }
    params
}

#[cfg(feature = "kuzu")]
mod engine {
    use std::path::Path;
    use std::sync::{Arc, Mutex, PoisonError};

    use async_trait::async_trait;
    use kuzu::{Connection, Database, LogicalType, SystemConfig, Value};
    use serde_json::Value as JsonValue;
    use tokio::task;

    use crate::error::DriverError;
    use crate::graph::result::{drain, QueryOutput, RowCursor, Summary};
    use crate::graph::row::{Params, Row};
    use crate::graph::traits::CypherExecutor;

    use super::strip_reserved;

    /// Adapter over an embedded Kùzu database.
    ///
    /// Owns the database handle exclusively for its lifetime. Kùzu
    /// connections borrow the database, so a fresh connection is created
    /// per call on the blocking thread; the `Arc` keeps the engine alive
    /// while an in-flight query races a `close()`.
    pub struct KuzuClient {
        db: Mutex<Option<Arc<Database>>>,
    }

    impl KuzuClient {
        /// Opens the database at the given path.
        ///
        /// Engine errors during open propagate unchanged.
        pub async fn open(path: impl AsRef<Path>) -> Result<Self, DriverError> {
            let path = path.as_ref().to_path_buf();
            tracing::debug!(path = %path.display(), "opening Kùzu database");
            let db = task::spawn_blocking(move || Database::new(path, SystemConfig::default()))
                .await
                .map_err(join_error)??;
            Ok(Self {
                db: Mutex::new(Some(Arc::new(db))),
            })
        }

        /// Executes a Cypher query and returns the neo4j driver's
        /// `(rows, summary, columns)` triple.
        ///
        /// The reserved `database_` and `routing_` keys are discarded. An
        /// empty parameter set takes the engine's parameterless query path
        /// rather than binding an empty map. The full result set is drained
        /// into memory before returning; the summary is always `None`.
        pub async fn execute_query(
            &self,
            query: &str,
            params: Params,
        ) -> Result<(Vec<Row>, Option<Summary>, Vec<String>), DriverError> {
            Ok(self.execute(query, params).await?.into_parts())
        }

        /// Closes the adapter, releasing the database handle.
        ///
        /// A second close is a no-op; queries issued after close fail with
        /// [`DriverError::ConnectionClosed`].
        pub async fn close(&self) -> Result<(), DriverError> {
            let db = self
                .db
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(db) = db {
                task::spawn_blocking(move || drop(db))
                    .await
                    .map_err(join_error)?;
                tracing::debug!("Kùzu database closed");
            }
            Ok(())
        }

        async fn execute(&self, query: &str, params: Params) -> Result<QueryOutput, DriverError> {
            let params = strip_reserved(params);
            let db = self.handle()?;
            let query = query.to_string();
            task::spawn_blocking(move || run_query(&db, &query, params))
                .await
                .map_err(join_error)?
        }

        fn handle(&self) -> Result<Arc<Database>, DriverError> {
            self.db
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .as_ref()
                .cloned()
                .ok_or(DriverError::ConnectionClosed)
        }
    }

    #[async_trait]
    impl CypherExecutor for KuzuClient {
        async fn execute_cypher(
            &self,
            cypher: &str,
            params: Params,
        ) -> Result<QueryOutput, DriverError> {
            self.execute(cypher, params).await
        }
    }

    fn join_error(e: task::JoinError) -> DriverError {
        DriverError::Internal(format!("blocking task failed: {}", e))
    }

    /// Annotates an engine failure with the query text. Used for every step
    /// of query execution (prepare, bind, run), so the same user mistake
    /// surfaces the same way with or without parameters.
    fn query_error(e: kuzu::Error, query: &str) -> DriverError {
        DriverError::Query {
            message: e.to_string(),
            query: query.to_string(),
        }
    }

    /// Runs one query on a fresh connection and drains the result.
    fn run_query(db: &Database, query: &str, params: Params) -> Result<QueryOutput, DriverError> {
        let conn = Connection::new(db)?;

        let result = if params.is_empty() {
            conn.query(query).map_err(|e| query_error(e, query))?
        } else {
            let mut statement = conn.prepare(query).map_err(|e| query_error(e, query))?;
            let converted = params
                .into_iter()
                .map(|(name, value)| Ok((name, json_to_kuzu(value)?)))
                .collect::<Result<Vec<_>, DriverError>>()?;
            let bound: Vec<(&str, Value)> = converted
                .iter()
                .map(|(name, value)| (name.as_str(), value.clone()))
                .collect();
            conn.execute(&mut statement, bound)
                .map_err(|e| query_error(e, query))?
        };

        let columns = result.get_column_names();
        drain(EngineCursor {
            columns,
            result: result.into_iter(),
        })
    }

    /// Cursor over the engine's direct-iteration result protocol.
    ///
    /// Generic over the iterator so it also covers engine surfaces that
    /// only offer has-next/get-next polling, adapted as an iterator.
    struct EngineCursor<R> {
        columns: Vec<String>,
        result: R,
    }

    impl<R: Iterator<Item = Vec<Value>>> RowCursor for EngineCursor<R> {
        fn column_names(&self) -> Vec<String> {
            self.columns.clone()
        }

        fn try_next(&mut self) -> Result<Option<Vec<JsonValue>>, DriverError> {
            Ok(self
                .result
                .next()
                .map(|values| values.into_iter().map(kuzu_to_json).collect()))
        }
    }

    /// Converts a JSON parameter into the engine's value type.
    fn json_to_kuzu(value: JsonValue) -> Result<Value, DriverError> {
        Ok(match value {
            JsonValue::Null => Value::Null(LogicalType::Any),
            JsonValue::Bool(b) => Value::Bool(b),
            JsonValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int64(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Double(f)
                } else {
                    return Err(DriverError::Parameter(n.to_string()));
                }
            }
            JsonValue::String(s) => Value::String(s),
            JsonValue::Array(items) => Value::List(
                LogicalType::Any,
                items
                    .into_iter()
                    .map(json_to_kuzu)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            JsonValue::Object(fields) => Value::Struct(
                fields
                    .into_iter()
                    .map(|(name, v)| Ok((name, json_to_kuzu(v)?)))
                    .collect::<Result<Vec<_>, DriverError>>()?,
            ),
        })
    }

    /// Converts an engine value into JSON.
    ///
    /// Values with no JSON analogue (blobs, intervals, internal ids) fall
    /// back to their display form.
    fn kuzu_to_json(value: Value) -> JsonValue {
        match value {
            Value::Null(_) => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Int8(i) => JsonValue::Number(i.into()),
            Value::Int16(i) => JsonValue::Number(i.into()),
            Value::Int32(i) => JsonValue::Number(i.into()),
            Value::Int64(i) => JsonValue::Number(i.into()),
            Value::UInt8(i) => JsonValue::Number(i.into()),
            Value::UInt16(i) => JsonValue::Number(i.into()),
            Value::UInt32(i) => JsonValue::Number(i.into()),
            Value::UInt64(i) => JsonValue::Number(i.into()),
            Value::Float(f) => serde_json::Number::from_f64(f as f64)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::Double(d) => serde_json::Number::from_f64(d)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::String(s) => JsonValue::String(s),
            Value::List(_, items) | Value::Array(_, items) => {
                JsonValue::Array(items.into_iter().map(kuzu_to_json).collect())
            }
            Value::Struct(fields) => JsonValue::Object(
                fields
                    .into_iter()
                    .map(|(name, v)| (name, kuzu_to_json(v)))
                    .collect(),
            ),
            // Timestamps, dates, nodes, rels, blobs and the rest keep
            // their engine display form.
            other => JsonValue::String(other.to_string()),
        }
    }

}

#[cfg(feature = "kuzu")]
pub use engine::KuzuClient;

#[cfg(not(feature = "kuzu"))]
mod stub {
    use std::path::Path;

    use async_trait::async_trait;

    use crate::error::DriverError;
    use crate::graph::result::{QueryOutput, Summary};
    use crate::graph::row::{Params, Row};
    use crate::graph::traits::CypherExecutor;

    /// Stand-in for the adapter when the engine is not compiled in.
    ///
    /// Construction fails immediately with a fixed message, before any
    /// database file is touched. The type cannot be instantiated, so the
    /// remaining methods are unreachable but keep the surface identical.
    pub struct KuzuClient {
        _unconstructible: (),
    }

    impl KuzuClient {
        /// Always fails: the engine is not available in this build.
        pub async fn open(path: impl AsRef<Path>) -> Result<Self, DriverError> {
            let _ = path;
            Err(DriverError::KuzuUnavailable)
        }

        /// Unreachable in practice; kept for surface parity.
        pub async fn execute_query(
            &self,
            _query: &str,
            _params: Params,
        ) -> Result<(Vec<Row>, Option<Summary>, Vec<String>), DriverError> {
            Err(DriverError::KuzuUnavailable)
        }

        /// Unreachable in practice; kept for surface parity.
        pub async fn close(&self) -> Result<(), DriverError> {
            Err(DriverError::KuzuUnavailable)
        }
    }

    #[async_trait]
    impl CypherExecutor for KuzuClient {
        async fn execute_cypher(
            &self,
            _cypher: &str,
            _params: Params,
        ) -> Result<QueryOutput, DriverError> {
            Err(DriverError::KuzuUnavailable)
        }
    }
}

#[cfg(not(feature = "kuzu"))]
pub use stub::KuzuClient;
