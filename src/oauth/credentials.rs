use reqwest::Url;

use crate::error::DoubanError;

pub const AUTH_HOST: &str = "https://www.douban.com";
pub const API_HOST: &str = "https://api.douban.com";

const AUTHORIZE_PATH: &str = "/service/auth2/auth";
const TOKEN_PATH: &str = "/service/auth2/token";

/// Separator Douban expects between requested scopes.
pub const SCOPE_DELIMITER: &str = ",";

/// OAuth2 client registration. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    client_secret: String,
    redirect_uri: String,
    scope: Vec<String>,
}

impl Credentials {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        redirect_uri: impl Into<String>,
        scope: Vec<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            redirect_uri: redirect_uri.into(),
            scope,
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn client_secret(&self) -> &str {
        &self.client_secret
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn joined_scope(&self) -> String {
        self.scope.join(SCOPE_DELIMITER)
    }
}

/// Hosts the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    auth_host: Url,
    api_host: Url,
}

impl Endpoints {
    pub fn new(auth_host: &str, api_host: &str) -> Result<Self, DoubanError> {
        Ok(Self {
            auth_host: parse_host(auth_host)?,
            api_host: parse_host(api_host)?,
        })
    }

    pub fn authorize_url(&self) -> Url {
        join(&self.auth_host, AUTHORIZE_PATH)
    }

    pub fn token_url(&self) -> Url {
        join(&self.auth_host, TOKEN_PATH)
    }

    /// Absolute resource URL for a path that may carry its own query string.
    ///
    /// The path must start with `/` and the result always stays on the API
    /// host, so the bearer token is never sent elsewhere.
    pub fn api_url(&self, path: &str) -> Result<Url, DoubanError> {
        if !path.starts_with('/') {
            return Err(DoubanError::Transport(
                format!("Resource path '{path}' must start with '/'").into(),
            ));
        }
        let (path_part, query) = match path.split_once('?') {
            Some((p, q)) => (p, Some(q)),
            None => (path, None),
        };
        let mut url = join(&self.api_host, path_part);
        url.set_query(query);

        if url.host_str() != self.api_host.host_str()
            || url.port_or_known_default() != self.api_host.port_or_known_default()
        {
            return Err(DoubanError::Transport(
                format!("Resource path '{path}' leaves the API host").into(),
            ));
        }
        Ok(url)
    }

    pub fn auth_host(&self) -> &Url {
        &self.auth_host
    }

    pub fn api_host(&self) -> &Url {
        &self.api_host
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            auth_host: Url::parse(AUTH_HOST).expect("AUTH_HOST is a valid URL"),
            api_host: Url::parse(API_HOST).expect("API_HOST is a valid URL"),
        }
    }
}

fn parse_host(raw: &str) -> Result<Url, DoubanError> {
    let url = Url::parse(raw)
        .map_err(|e| DoubanError::Transport(format!("Invalid host URL '{raw}': {e}").into()))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(DoubanError::Transport(
            format!("Unsupported URL scheme '{scheme}' in '{raw}'").into(),
        )),
    }
}

fn join(host: &Url, path: &str) -> Url {
    let mut url = host.clone();
    let base = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{base}{path}"));
    url.set_query(None);
    url
}
