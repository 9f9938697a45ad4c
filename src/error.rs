use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DoubanError {
    #[error("Transport error: {0}")]
    Transport(Box<dyn std::error::Error + Send + Sync>),

    #[error("OAuth error: {0}")]
    Auth(String),

    #[error("No access token available. Run: douban login")]
    AuthRequired,

    #[error("Request to {path} failed: {source}")]
    Request {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Error in config {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DoubanError {
    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            DoubanError::Transport(_) => "transport_error",
            DoubanError::Auth(_) => "auth_error",
            DoubanError::AuthRequired => "auth_required",
            DoubanError::Request { .. } => "request_error",
            DoubanError::Config { .. } => "config_error",
            DoubanError::Io(_) => "io_error",
        }
    }

    /// Whether the underlying cause of a resource request was a timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            DoubanError::Request { source, .. } => source
                .downcast_ref::<reqwest::Error>()
                .is_some_and(reqwest::Error::is_timeout),
            _ => false,
        }
    }

    pub fn path(&self) -> Option<&str> {
        match self {
            DoubanError::Request { path, .. } => Some(path),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(path) = self.path() {
            obj.insert("path".into(), serde_json::Value::String(path.to_string()));
        }
        obj.insert("message".into(), serde_json::Value::String(self.to_string()));
        obj.insert("code".into(), serde_json::Value::String(self.code().to_string()));
        serde_json::json!({ "error": obj })
    }
}
