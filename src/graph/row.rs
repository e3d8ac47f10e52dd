//! Row and parameter types for query results.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::DriverError;

/// Named parameters for Cypher queries.
///
/// A map of parameter names to JSON values that can be passed to queries.
pub type Params = HashMap<String, JsonValue>;

/// A single row from a query result.
///
/// Every row of one result shares the same column-name list, in the order
/// the engine reported the columns, so the key set of a row is always
/// identical to the result's column list. Values are stored positionally
/// and looked up by name through the shared list.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<[String]>,
    values: Vec<JsonValue>,
}

impl Row {
    /// Creates a row from a shared column list and positional values.
    ///
    /// Values are padded with null or truncated to the column count, so the
    /// row always has exactly one value per column.
    pub fn new(columns: Arc<[String]>, mut values: Vec<JsonValue>) -> Self {
        values.resize(columns.len(), JsonValue::Null);
        Self { columns, values }
    }

    /// Gets a value from the row by column name, deserializing to the requested type.
    ///
    /// # Errors
    ///
    /// Returns an error if the column is not found or if deserialization fails.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let id: String = row.get("id")?;
    /// let count: i64 = row.get("count")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, DriverError> {
        self.get_raw(key)
            .ok_or_else(|| DriverError::Internal(format!("column not found: {}", key)))
            .and_then(|v| {
                serde_json::from_value(v.clone()).map_err(|e| {
                    DriverError::Internal(format!("failed to deserialize '{}': {}", key, e))
                })
            })
    }

    /// Gets a value from the row, returning `None` if the column doesn't
    /// exist or holds null.
    ///
    /// Still returns an error if the value exists but deserialization fails.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, DriverError> {
        match self.get_raw(key) {
            Some(v) if v.is_null() => Ok(None),
            Some(v) => serde_json::from_value(v.clone()).map(Some).map_err(|e| {
                DriverError::Internal(format!("failed to deserialize '{}': {}", key, e))
            }),
            None => Ok(None),
        }
    }

    /// Returns the raw JSON value for a column, if the column exists.
    pub fn get_raw(&self, key: &str) -> Option<&JsonValue> {
        self.columns
            .iter()
            .position(|c| c == key)
            .map(|idx| &self.values[idx])
    }

    /// Returns the column names, in the result's discovery order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|s| s.as_str())
    }

    /// Returns the number of columns in this row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Consumes the row and returns a column-name-to-value map.
    pub fn into_inner(self) -> HashMap<String, JsonValue> {
        let Row { columns, values } = self;
        columns.iter().cloned().zip(values).collect()
    }
}
