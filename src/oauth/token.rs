use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DoubanError;

/// Token response from the OAuth server, kept as the raw JSON object.
///
/// Douban returns fields beyond the standard ones (`douban_user_id`,
/// `douban_user_name`), so nothing is dropped on the way in. The accessors
/// cover the fields this client itself relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Token(Map<String, Value>);

impl Token {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Parse a token endpoint response body.
    ///
    /// The body must be a JSON object carrying a string `access_token`.
    pub fn from_slice(body: &[u8]) -> Result<Self, DoubanError> {
        let value: Value = serde_json::from_slice(body).map_err(|e| {
            DoubanError::Auth(format!("Failed to parse token response: {e}"))
        })?;
        let Value::Object(fields) = value else {
            return Err(DoubanError::Auth(
                "Token response is not a JSON object".to_string(),
            ));
        };
        let token = Self(fields);
        if token.access_token().is_none() {
            return Err(DoubanError::Auth(
                "Token response has no access_token".to_string(),
            ));
        }
        Ok(token)
    }

    pub fn access_token(&self) -> Option<&str> {
        self.0.get("access_token").and_then(Value::as_str)
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.0.get("refresh_token").and_then(Value::as_str)
    }

    pub fn token_type(&self) -> Option<&str> {
        self.0.get("token_type").and_then(Value::as_str)
    }

    /// Lifetime in seconds. Accepts numbers and numeric strings.
    pub fn expires_in(&self) -> Option<i64> {
        match self.0.get("expires_in")? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for Token {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
