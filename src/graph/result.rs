//! Query output shape and the row-drain protocol.
//!
//! The adapter mimics the neo4j driver's three-part return: an ordered
//! sequence of rows, an execution summary, and the ordered column-name list.
//! The underlying engine produces no summary object, so that slot is always
//! absent.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::error::DriverError;
use crate::graph::row::Row;

/// Placeholder for the neo4j driver's execution summary.
///
/// The engine never produces one, so this type is uninhabited and an
/// `Option<Summary>` is statically always `None`. It exists only to keep
/// the three-part return shape.
#[derive(Debug, Clone, Copy)]
pub enum Summary {}

/// The result of one query: all rows materialized, the always-absent
/// summary slot, and the column names in discovery order.
#[derive(Debug)]
pub struct QueryOutput {
    pub rows: Vec<Row>,
    pub summary: Option<Summary>,
    pub columns: Vec<String>,
}

impl QueryOutput {
    /// Splits into the neo4j driver's `(rows, summary, columns)` triple.
    pub fn into_parts(self) -> (Vec<Row>, Option<Summary>, Vec<String>) {
        (self.rows, self.summary, self.columns)
    }
}

/// A source of result rows using has-next/get-next polling.
///
/// Engines expose results either as a direct iterator or as an explicit
/// polling surface depending on version; both reduce to this shape. Backends
/// implement it for whichever protocol their engine offers and hand the
/// cursor to [`drain`], which is the only consumer.
pub trait RowCursor {
    /// The column names of the result, in discovery order.
    fn column_names(&self) -> Vec<String>;

    /// Fetches the next row of values, or `None` when the result is
    /// exhausted.
    fn try_next(&mut self) -> Result<Option<Vec<JsonValue>>, DriverError>;
}

/// Drains a cursor completely into a [`QueryOutput`].
///
/// The full result set is materialized in memory; there is no pagination or
/// streaming at this layer. Column names are fetched once and shared across
/// all rows, so every row's key set matches the column list.
pub fn drain<C: RowCursor>(mut cursor: C) -> Result<QueryOutput, DriverError> {
    let columns = cursor.column_names();
    let shared: Arc<[String]> = columns.clone().into();

    let mut rows = Vec::new();
    while let Some(values) = cursor.try_next()? {
        rows.push(Row::new(Arc::clone(&shared), values));
    }

    Ok(QueryOutput {
        rows,
        summary: None,
        columns,
    })
}
