//! Query-parameter merging and encoding
//!
//! The merge works over plain JSON objects so callers can hand in anything
//! `serde_json::json!` produces. Later layers override earlier ones on key
//! collision; the final mapping never holds duplicate keys.

use crate::error::{Error, Result};
use crate::types::{JsonObject, JsonValue};
use once_cell::sync::Lazy;
use url::form_urlencoded;

/// Query parameters every searchable endpoint starts from
static SHARED_DEFAULT_PARAMS: Lazy<JsonObject> = Lazy::new(|| {
    let mut params = JsonObject::new();
    params.insert("limit".to_string(), JsonValue::from(100));
    params.insert("offset".to_string(), JsonValue::from(0));
    params
});

/// The default parameter layer shared by all searchable endpoints
pub fn shared_default_params() -> &'static JsonObject {
    &SHARED_DEFAULT_PARAMS
}

/// Options for building a search URL
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Endpoint-fixed parameters, e.g. a status filter. Must be a JSON object.
    pub base_params: Option<JsonValue>,
    /// Caller-supplied parameters: a JSON object or a pre-encoded query string
    pub query_params: Option<JsonValue>,
    /// When true, neither shared nor endpoint defaults appear in the result
    pub skip_defaults: bool,
    /// Accepted for call-site compatibility; does not alter the merge
    pub default_params_only: bool,
    /// Appended to the base path before the `?`
    pub path_suffix: Option<String>,
}

impl SearchOptions {
    /// Create empty search options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the endpoint-fixed base parameters
    #[must_use]
    pub fn base_params(mut self, params: JsonValue) -> Self {
        self.base_params = Some(params);
        self
    }

    /// Set the caller-supplied parameters (object or query string)
    #[must_use]
    pub fn query_params(mut self, params: impl Into<JsonValue>) -> Self {
        self.query_params = Some(params.into());
        self
    }

    /// Exclude both default layers from the merge
    #[must_use]
    pub fn skip_defaults(mut self) -> Self {
        self.skip_defaults = true;
        self
    }

    /// Append a suffix to the base path before the `?`
    #[must_use]
    pub fn path_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.path_suffix = Some(suffix.into());
        self
    }
}

/// Merges tiered default parameters with caller-supplied overrides
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    shared_defaults: JsonObject,
    endpoint_defaults: JsonObject,
}

impl QueryBuilder {
    /// Create a builder over the two default layers
    pub fn new(shared_defaults: JsonObject, endpoint_defaults: JsonObject) -> Self {
        Self {
            shared_defaults,
            endpoint_defaults,
        }
    }

    /// Merge the two default layers, or nothing when `skip_defaults` is set
    pub fn merge_defaults(&self, skip_defaults: bool) -> JsonObject {
        if skip_defaults {
            return JsonObject::new();
        }
        let mut merged = self.shared_defaults.clone();
        for (key, value) in &self.endpoint_defaults {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }

    /// Build the final query mapping.
    ///
    /// Precedence, lowest to highest: shared defaults, endpoint defaults,
    /// `base_params`, `query_params`. `query_params` may be an object or a
    /// pre-encoded query string; anything else is an `InvalidArgument` error,
    /// as is a non-object `base_params`.
    pub fn build(
        &self,
        base_params: Option<&JsonValue>,
        query_params: Option<&JsonValue>,
        skip_defaults: bool,
    ) -> Result<JsonObject> {
        let mut merged = self.merge_defaults(skip_defaults);

        if let Some(base) = base_params {
            let JsonValue::Object(base) = base else {
                return Err(Error::invalid_argument(format!(
                    "base_params must be an object, got {}",
                    json_type_name(base)
                )));
            };
            for (key, value) in base {
                merged.insert(key.clone(), value.clone());
            }
        }

        match query_params {
            Some(JsonValue::Object(params)) => {
                for (key, value) in params {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Some(JsonValue::String(query)) => {
                for (key, value) in parse_query_string(query) {
                    merged.insert(key, value);
                }
            }
            Some(other) => {
                return Err(Error::invalid_argument(format!(
                    "query_params must be an object or a string, got {}",
                    json_type_name(other)
                )));
            }
            None => {}
        }

        Ok(merged)
    }
}

/// Parse a URL-encoded query string into a parameter mapping.
///
/// Keys seen once collapse to a scalar string; repeated keys become lists.
pub(crate) fn parse_query_string(query: &str) -> JsonObject {
    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match grouped.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1.push(value.into_owned()),
            None => grouped.push((key.into_owned(), vec![value.into_owned()])),
        }
    }

    let mut params = JsonObject::new();
    for (key, mut values) in grouped {
        let value = if values.len() == 1 {
            JsonValue::String(values.swap_remove(0))
        } else {
            JsonValue::from(values)
        };
        params.insert(key, value);
    }
    params
}

/// URL-encode a parameter mapping.
///
/// Strings and numbers pass through in their plain form; booleans, nulls and
/// collections travel as JSON text so quote characters survive the encoding
/// unambiguously.
pub fn encode_query(params: &JsonObject) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in params {
        serializer.append_pair(key, &encode_value(value));
    }
    serializer.finish()
}

fn encode_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
