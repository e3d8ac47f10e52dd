//! Query command handler.

use color_eyre::eyre::{eyre, Result};
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::graph::backends::kuzu::KuzuClient;
use crate::graph::{Params, Row};

use super::App;

impl App {
    /// Run a single Cypher query and print each row as a JSON object.
    pub async fn run_query(
        &self,
        cypher: &str,
        db: Option<&str>,
        raw_params: &[String],
    ) -> Result<()> {
        let path = match db {
            Some(path) => path.to_string(),
            None => Config::load()?.database.path,
        };

        let mut params = Params::new();
        for raw in raw_params {
            let (key, value) = parse_param(raw)?;
            params.insert(key, value);
        }

        tracing::info!(path = %path, "opening database");
        let client = KuzuClient::open(&path).await?;

        let (rows, _summary, columns) = client.execute_query(cypher, params).await?;
        tracing::debug!(?columns, row_count = rows.len(), "query complete");

        for row in &rows {
            println!("{}", row_to_json(row));
        }

        client.close().await?;
        Ok(())
    }
}

/// Parses a `key=value` parameter; the value is parsed as JSON, falling
/// back to a plain string.
fn parse_param(raw: &str) -> Result<(String, JsonValue)> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| eyre!("invalid parameter '{}', expected key=value", raw))?;
    if key.is_empty() {
        return Err(eyre!("invalid parameter '{}', empty key", raw));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| JsonValue::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Renders a row as a JSON object, columns in discovery order.
fn row_to_json(row: &Row) -> JsonValue {
    let mut map = serde_json::Map::new();
    for column in row.columns() {
        let value = row.get_raw(column).cloned().unwrap_or(JsonValue::Null);
        map.insert(column.to_string(), value);
    }
    JsonValue::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_parse_param_json_value() {
        let (key, value) = parse_param("count=42").unwrap();
        assert_eq!(key, "count");
        assert_eq!(value, json!(42));
    }

    #[test]
    fn test_parse_param_string_fallback() {
        let (key, value) = parse_param("name=alice").unwrap();
        assert_eq!(key, "name");
        assert_eq!(value, json!("alice"));
    }

    #[test]
    fn test_parse_param_value_with_equals() {
        let (key, value) = parse_param("expr=a=b").unwrap();
        assert_eq!(key, "expr");
        assert_eq!(value, json!("a=b"));
    }

    #[test]
    fn test_parse_param_rejects_missing_separator() {
        assert!(parse_param("novalue").is_err());
        assert!(parse_param("=v").is_err());
    }

    #[test]
    fn test_row_to_json_keeps_column_order() {
        let columns: Arc<[String]> = vec!["b".to_string(), "a".to_string()].into();
        let row = Row::new(columns, vec![json!(2), json!(1)]);
        let rendered = serde_json::to_string(&row_to_json(&row)).unwrap();
        assert_eq!(rendered, r#"{"b":2,"a":1}"#);
    }
}
