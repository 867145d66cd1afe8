//! Request builder.
//!
//! Turns an [`Endpoint`] plus parameters into a fully qualified
//! [`HttpRequest`]. The API authenticates with `api_id` / `api_key` query
//! parameters on every method, so they are always appended last, after the
//! operation's own query parameters.

use crate::config::ClientConfig;
use crate::endpoint::Endpoint;
use crate::error::ApiError;
use crate::http::HttpRequest;

pub const API_ID_PARAM: &str = "api_id";
pub const API_KEY_PARAM: &str = "api_key";

#[derive(Debug, Clone)]
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
    endpoint: &'a Endpoint,
    path: Vec<(&'a str, String)>,
    query: Vec<(&'a str, String)>,
    body: Option<String>,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ClientConfig, endpoint: &'a Endpoint) -> Self {
        Self {
            config,
            endpoint,
            path: Vec::new(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn path_param(mut self, name: &'a str, value: impl ToString) -> Self {
        self.path.push((name, value.to_string()));
        self
    }

    pub fn query_param(mut self, name: &'a str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    /// Attach an already serialized JSON body.
    pub fn body(mut self, json: impl Into<String>) -> Self {
        self.body = Some(json.into());
        self
    }

    /// Produce the request. `action` only feeds the error message.
    pub fn build(self, action: &str) -> Result<HttpRequest, ApiError> {
        let method = self.endpoint.method;
        let invalid = |reason: String| ApiError::InvalidRequest {
            method,
            action: action.to_string(),
            reason,
        };

        let path = expand_template(self.endpoint.template, &self.path).map_err(invalid)?;
        let mut url = url::Url::parse(&format!("{}/{}", self.config.base_url(), path))
            .map_err(|e| invalid(e.to_string()))?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &self.query {
                pairs.append_pair(name, value);
            }
            pairs.append_pair(API_ID_PARAM, self.config.api_id());
            pairs.append_pair(API_KEY_PARAM, self.config.api_key());
        }

        let headers = match self.body {
            Some(_) => vec![("content-type".to_string(), "application/json".to_string())],
            None => Vec::new(),
        };

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body: self.body,
        })
    }
}

/// Substitute `{name}` segments with percent-encoded values.
fn expand_template(template: &str, params: &[(&str, String)]) -> Result<String, String> {
    let mut path = template.to_string();
    for (name, value) in params {
        let placeholder = format!("{{{name}}}");
        if !path.contains(&placeholder) {
            return Err(format!("unknown path parameter '{name}' for '{template}'"));
        }
        path = path.replace(&placeholder, &urlencoding::encode(value));
    }
    if let Some(start) = path.find('{') {
        let rest = &path[start..];
        let end = rest.find('}').map_or(rest.len(), |i| i + 1);
        return Err(format!(
            "missing path parameter {} for '{template}'",
            &rest[..end]
        ));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::{ADD_ROLE, DELETE_USER, GET_ROLE, UPDATE_ROLE};
    use crate::http::HttpMethod;

    fn config() -> ClientConfig {
        ClientConfig::new("http://localhost:3000", "foo", "bar").unwrap()
    }

    #[test]
    fn credentials_are_appended_to_every_request() {
        let config = config();
        let req = RequestBuilder::new(&config, &ADD_ROLE)
            .body("{}")
            .build("adding Role")
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.url,
            "http://localhost:3000/user-management/v1/roles?api_id=foo&api_key=bar"
        );
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn path_parameters_are_substituted() {
        let config = config();
        let req = RequestBuilder::new(&config, &GET_ROLE)
            .path_param("roleId", 123)
            .build("reading Role 123")
            .unwrap();
        assert_eq!(
            req.url,
            "http://localhost:3000/user-management/v1/roles/123?api_id=foo&api_key=bar"
        );
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn operation_query_precedes_credentials() {
        let config = config();
        let req = RequestBuilder::new(&config, &DELETE_USER)
            .query_param("userEmail", "a+b@example.com")
            .query_param("accountId", 42)
            .build("deleting User")
            .unwrap();
        let names: Vec<String> = req.query_pairs().unwrap().into_iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["userEmail", "accountId", "api_id", "api_key"]);
        assert_eq!(req.query_pairs().unwrap()[0].1, "a+b@example.com");
    }

    #[test]
    fn credentials_are_encoded() {
        let config = ClientConfig::new("http://localhost", "id 1", "k&y=").unwrap();
        let req = RequestBuilder::new(&config, &ADD_ROLE).build("adding Role").unwrap();
        assert_eq!(
            req.query_pairs().unwrap(),
            vec![
                ("api_id".to_string(), "id 1".to_string()),
                ("api_key".to_string(), "k&y=".to_string()),
            ]
        );
    }

    #[test]
    fn missing_path_parameter_is_a_local_error() {
        let config = config();
        let err = RequestBuilder::new(&config, &UPDATE_ROLE)
            .build("updating Role")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error preparing HTTP PUT for updating Role: missing path parameter {roleId} for 'user-management/v1/roles/{roleId}'"
        );
    }

    #[test]
    fn unknown_path_parameter_is_rejected() {
        let config = config();
        let err = RequestBuilder::new(&config, &ADD_ROLE)
            .path_param("roleId", 1)
            .build("adding Role")
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest { .. }));
    }

    #[test]
    fn path_values_are_percent_encoded() {
        let path = expand_template("a/{x}/b", &[("x", "1/2".to_string())]).unwrap();
        assert_eq!(path, "a/1%2F2/b");
    }
}
