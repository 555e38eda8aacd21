//! Parameterized SQL queries.

use serde::{Deserialize, Serialize};

/// A named query parameter, referenced in the query text as `@name`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SqlParameter {
    /// Parameter name including the leading `@`.
    pub name: String,
    /// Parameter value.
    pub value: serde_json::Value,
}

/// A SQL query and its parameters, serialized as the query request body.
///
/// # Example
///
/// ```rust
/// use cosmos_rest::clients::cosmos::SqlQuery;
/// use serde_json::json;
///
/// let query = SqlQuery::new("SELECT * FROM c WHERE c.age > @age").param("@age", 21);
///
/// assert_eq!(
///     serde_json::to_value(&query).unwrap(),
///     json!({
///         "query": "SELECT * FROM c WHERE c.age > @age",
///         "parameters": [{"name": "@age", "value": 21}]
///     })
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SqlQuery {
    /// The query text.
    pub query: String,
    /// Parameters referenced by the query text.
    #[serde(default)]
    pub parameters: Vec<SqlParameter>,
}

impl SqlQuery {
    /// Creates a query without parameters.
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            parameters: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.parameters.push(SqlParameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }
}

impl From<&str> for SqlQuery {
    fn from(query: &str) -> Self {
        Self::new(query)
    }
}

impl From<String> for SqlQuery {
    fn from(query: String) -> Self {
        Self::new(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_without_parameters_sends_empty_list() {
        let value = serde_json::to_value(SqlQuery::from("SELECT * FROM root")).unwrap();
        assert_eq!(value, json!({"query": "SELECT * FROM root", "parameters": []}));
    }

    #[test]
    fn test_parameters_keep_insertion_order() {
        let query = SqlQuery::new("SELECT * FROM c WHERE c.a = @a AND c.b = @b")
            .param("@a", "x")
            .param("@b", json!([1, 2]));

        assert_eq!(query.parameters[0].name, "@a");
        assert_eq!(query.parameters[1].value, json!([1, 2]));
    }
}
