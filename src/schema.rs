//! Read-only schema model: tables, columns, indexes and foreign keys.
//!
//! The schema arrives as already-introspected JSON and is validated once at
//! load time. Everything downstream assumes the invariants checked here.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Schema object has no \"tables\" field")]
    MissingTables,
    #[error("Table at position {0} has an empty name")]
    EmptyTableName(usize),
    #[error("Duplicate table: {0}")]
    DuplicateTable(String),
    #[error("Table {table} has {count} primary indexes")]
    MultiplePrimaryIndexes { table: String, count: usize },
}

/// The `{"tables": [...]}` wrapper form of the input.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SchemaDocument {
    tables: Vec<Table>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Table {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
    #[serde(default)]
    pub indexes: Vec<Index>,
    #[serde(default)]
    pub foreign_keys: Vec<ForeignKey>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub typ: String,
    #[serde(default)]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub auto_increment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Index {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ForeignKey {
    #[serde(default)]
    pub columns: Vec<String>,
    pub foreign_table: String,
    #[serde(default)]
    pub foreign_columns: Vec<String>,
    #[serde(default)]
    pub on_update: Option<String>,
    #[serde(default)]
    pub on_delete: Option<String>,
}

impl Table {
    /// The primary index, if the table declares one.
    pub fn primary_index(&self) -> Option<&Index> {
        self.indexes.iter().find(|i| i.primary)
    }

    /// First column of the primary index.
    pub fn primary_key_column(&self) -> Option<&str> {
        self.primary_index()
            .and_then(|i| i.columns.first())
            .map(|c| c.as_str())
    }

    pub fn is_foreign_key_column(&self, column: &str) -> bool {
        self.foreign_keys
            .iter()
            .any(|fk| fk.columns.iter().any(|c| c == column))
    }
}

/// Validated, immutable schema with O(1) lookup by table name.
#[derive(Debug, Clone)]
pub struct Schema {
    tables: Vec<Table>,
    by_name: HashMap<String, usize>,
    // Number of foreign keys (from any table) targeting each table, by index.
    incoming: Vec<usize>,
}

impl Schema {
    pub fn new(tables: Vec<Table>) -> Result<Self, SchemaError> {
        let mut by_name = HashMap::with_capacity(tables.len());

        for (idx, table) in tables.iter().enumerate() {
            if table.name.trim().is_empty() {
                return Err(SchemaError::EmptyTableName(idx));
            }
            if by_name.insert(table.name.clone(), idx).is_some() {
                return Err(SchemaError::DuplicateTable(table.name.clone()));
            }

            let primary_count = table.indexes.iter().filter(|i| i.primary).count();
            if primary_count > 1 {
                return Err(SchemaError::MultiplePrimaryIndexes {
                    table: table.name.clone(),
                    count: primary_count,
                });
            }
        }

        let mut incoming = vec![0; tables.len()];
        for fk in tables.iter().flat_map(|t| &t.foreign_keys) {
            if let Some(&target) = by_name.get(fk.foreign_table.as_str()) {
                incoming[target] += 1;
            }
        }

        Ok(Self {
            tables,
            by_name,
            incoming,
        })
    }

    /// Parse a schema from JSON: either a bare array of tables or an object
    /// with a `tables` array.
    pub fn from_json(input: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(input)?;
        let tables: Vec<Table> = match value {
            Value::Object(map) if !map.contains_key("tables") => {
                return Err(SchemaError::MissingTables);
            }
            object @ Value::Object(_) => serde_json::from_value::<SchemaDocument>(object)?.tables,
            other => serde_json::from_value(other)?,
        };
        Self::new(tables)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.by_name.get(name).map(|&idx| &self.tables[idx])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn primary_key_column(&self, table: &str) -> Option<&str> {
        self.table(table).and_then(Table::primary_key_column)
    }

    /// Outgoing foreign keys of `table` plus foreign keys from any table
    /// (itself included) that target it. Unknown tables have no connectivity.
    pub fn connectivity(&self, table: &str) -> usize {
        match self.by_name.get(table) {
            Some(&idx) => self.tables[idx].foreign_keys.len() + self.incoming[idx],
            None => 0,
        }
    }

    /// Foreign keys from any table that reference `table`.
    pub fn foreign_keys_into<'a>(
        &'a self,
        table: &'a str,
    ) -> impl Iterator<Item = (&'a Table, &'a ForeignKey)> + 'a {
        self.tables.iter().flat_map(move |t| {
            t.foreign_keys
                .iter()
                .filter(move |fk| fk.foreign_table == table)
                .map(move |fk| (t, fk))
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn table(name: &str, fks: &[&str]) -> Table {
        Table {
            name: name.to_string(),
            columns: vec![Column {
                name: "id".to_string(),
                typ: "int".to_string(),
                nullable: false,
                default: None,
                auto_increment: true,
            }],
            indexes: vec![Index {
                name: "PRIMARY".to_string(),
                columns: vec!["id".to_string()],
                primary: true,
                unique: true,
            }],
            foreign_keys: fks
                .iter()
                .map(|target| ForeignKey {
                    columns: vec![format!("{}_id", target.to_lowercase())],
                    foreign_table: target.to_string(),
                    foreign_columns: vec!["id".to_string()],
                    on_update: None,
                    on_delete: Some("CASCADE".to_string()),
                })
                .collect(),
        }
    }

    #[test]
    fn test_parse_wire_format() {
        let input = r#"[
            {
                "name": "orders",
                "columns": [
                    {"name": "id", "type": "bigint", "nullable": false, "default": null, "autoIncrement": true},
                    {"name": "user_id", "type": "bigint", "nullable": false, "default": null, "autoIncrement": false}
                ],
                "indexes": [{"name": "PRIMARY", "columns": ["id"], "primary": true, "unique": true}],
                "foreignKeys": [{
                    "columns": ["user_id"],
                    "foreignTable": "users",
                    "foreignColumns": ["id"],
                    "onUpdate": null,
                    "onDelete": "CASCADE"
                }]
            },
            {"name": "users", "columns": [{"name": "id", "type": "bigint"}]}
        ]"#;

        let schema = Schema::from_json(input).unwrap();
        assert_eq!(schema.len(), 2);

        let orders = schema.table("orders").unwrap();
        assert!(orders.columns[0].auto_increment);
        assert_eq!(orders.foreign_keys[0].foreign_table, "users");
        assert_eq!(orders.foreign_keys[0].on_delete.as_deref(), Some("CASCADE"));
        assert!(orders.is_foreign_key_column("user_id"));

        let users = schema.table("users").unwrap();
        assert!(users.indexes.is_empty());
        assert!(!users.columns[0].nullable);
    }

    #[test]
    fn test_parse_wrapped_object() {
        let schema = Schema::from_json(r#"{"tables": [{"name": "a"}]}"#).unwrap();
        assert!(schema.contains("a"));
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let err = Schema::from_json(r#"{"tables": [{"name": "a"}], "extra": 1}"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_missing_tables_field() {
        let err = Schema::from_json(r#"{"tabels": []}"#).unwrap_err();
        assert!(matches!(err, SchemaError::MissingTables));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Schema::from_json(r#"[{"name": "a", "colour": "red"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_malformed_foreign_keys_rejected() {
        let err = Schema::from_json(r#"[{"name": "a", "foreignKeys": "nope"}]"#).unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_duplicate_table() {
        let err = Schema::new(vec![table("a", &[]), table("a", &[])]).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateTable(name) if name == "a"));
    }

    #[test]
    fn test_empty_table_name() {
        let err = Schema::new(vec![table("a", &[]), table(" ", &[])]).unwrap_err();
        assert!(matches!(err, SchemaError::EmptyTableName(1)));
    }

    #[test]
    fn test_multiple_primary_indexes() {
        let mut t = table("a", &[]);
        t.indexes.push(t.indexes[0].clone());
        let err = Schema::new(vec![t]).unwrap_err();
        assert!(matches!(err, SchemaError::MultiplePrimaryIndexes { count: 2, .. }));
    }

    #[test]
    fn test_primary_key_column() {
        let mut no_pk = table("b", &[]);
        no_pk.indexes[0].primary = false;
        let schema = Schema::new(vec![table("a", &[]), no_pk]).unwrap();

        assert_eq!(schema.primary_key_column("a"), Some("id"));
        assert_eq!(schema.primary_key_column("b"), None);
        assert_eq!(schema.primary_key_column("missing"), None);
    }

    #[test]
    fn test_connectivity() {
        let schema = Schema::new(vec![
            table("users", &[]),
            table("orders", &["users"]),
            table("items", &["orders", "ghost"]),
            table("tree", &["tree"]),
        ])
        .unwrap();

        assert_eq!(schema.connectivity("users"), 1);
        assert_eq!(schema.connectivity("orders"), 2);
        // Outgoing edges count even when the target is unknown.
        assert_eq!(schema.connectivity("items"), 2);
        assert_eq!(schema.connectivity("tree"), 2);
        assert_eq!(schema.connectivity("ghost"), 0);
    }

    #[test]
    fn test_foreign_keys_into() {
        let schema = Schema::new(vec![
            table("users", &[]),
            table("orders", &["users"]),
            table("posts", &["users"]),
        ])
        .unwrap();

        let sources: Vec<&str> = schema
            .foreign_keys_into("users")
            .map(|(t, _)| t.name.as_str())
            .collect();
        assert_eq!(sources, vec!["orders", "posts"]);
    }
}
