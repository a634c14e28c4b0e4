//! GraphQL request types.

use graphiql_explorer_core::Parameters;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The request object the explorer widget hands to the fetcher.
///
/// Serializes to the usual `{query, variables, operationName}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query string.
    pub query: String,

    /// Optional variables for the query.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Optional operation name (for documents with multiple operations).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "operationName"
    )]
    pub operation_name: Option<String>,

    /// Extensions (implementation-specific metadata).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLRequest {
    /// Create a new request from a query string.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
            extensions: None,
        }
    }

    /// Build the request the explorer would send for the given parameters.
    ///
    /// Variables that parse as JSON are sent as JSON; anything else is sent
    /// as a JSON string and left for the server to reject. Empty variables
    /// and an empty operation name are omitted.
    pub fn from_parameters(params: &Parameters) -> Self {
        let variables = match params.variables_json() {
            Ok(value) => value,
            Err(err) => {
                tracing::trace!(target: "graphiql_explorer_net::graphql", %err, "sending raw variables");
                params.variables().map(|raw| Value::String(raw.to_string()))
            }
        };

        Self {
            query: params.query().unwrap_or_default().to_string(),
            variables,
            operation_name: params
                .operation_name()
                .filter(|name| !name.is_empty())
                .map(str::to_string),
            extensions: None,
        }
    }

    /// Set a variable value.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let request = GraphQLRequest::new("query($id: ID!) { user(id: $id) { name } }")
    ///     .variable("id", "123");
    /// ```
    pub fn variable(mut self, name: impl Into<String>, value: impl Serialize) -> Self {
        let variables = self
            .variables
            .get_or_insert_with(|| Value::Object(Default::default()));
        if let Value::Object(map) = variables
            && let Ok(value) = serde_json::to_value(value)
        {
            map.insert(name.into(), value);
        }
        self
    }

    /// Set all variables from a serializable value.
    pub fn variables(mut self, variables: impl Serialize) -> Self {
        self.variables = serde_json::to_value(variables).ok();
        self
    }

    /// Set the operation name.
    ///
    /// Required when the query document contains multiple operations.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set extensions (implementation-specific metadata).
    pub fn extensions(mut self, extensions: impl Serialize) -> Self {
        self.extensions = serde_json::to_value(extensions).ok();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let request = GraphQLRequest::new("query Q { a }").operation_name("Q");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body, json!({"query": "query Q { a }", "operationName": "Q"}));
    }

    #[test]
    fn test_variables() {
        let request = GraphQLRequest::new("query($id: ID!) { user(id: $id) { name } }")
            .variable("id", "123")
            .variable("limit", 10);

        let vars = request.variables.unwrap();
        assert_eq!(vars["id"], "123");
        assert_eq!(vars["limit"], 10);
    }

    #[test]
    fn test_from_parameters() {
        let params = Parameters::parse(
            "?query=%7B%20a%20%7D&variables=%7B%22x%22%3A1%7D&operationName=",
        );
        let request = GraphQLRequest::from_parameters(&params);

        assert_eq!(request.query, "{ a }");
        assert_eq!(request.variables, Some(json!({"x": 1})));
        assert_eq!(request.operation_name, None);
    }

    #[test]
    fn test_from_parameters_with_invalid_variables() {
        let params = Parameters::parse("?query=x&variables=oops");
        let request = GraphQLRequest::from_parameters(&params);
        assert_eq!(request.variables, Some(json!("oops")));
    }

    #[test]
    fn test_from_empty_parameters() {
        let request = GraphQLRequest::from_parameters(&Parameters::new());
        assert_eq!(request, GraphQLRequest::new(""));
    }
}
