use std::path::PathBuf;

use crate::error::DoubanError;

use super::types::ClientConfig;

/// Expand environment variable references in a string.
///
/// Supported syntaxes:
/// - `${VAR}` - replaced with env var value; error if unset
/// - `${VAR:-fallback}` - replaced with env var value, or fallback if unset or empty
///
/// A `$` not followed by `{` is kept literally.
pub fn expand_env_vars(input: &str) -> Result<String, DoubanError> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("${") {
        result.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find('}').ok_or_else(|| {
            env_error(format!("Unclosed variable reference: ${{{after}"))
        })?;
        let expr = &after[..end];

        match expr.split_once(":-") {
            Some((name, fallback)) => match std::env::var(name) {
                Ok(val) if !val.is_empty() => result.push_str(&val),
                _ => result.push_str(fallback),
            },
            None => {
                let val = std::env::var(expr).map_err(|_| {
                    env_error(format!("Environment variable '{expr}' is not set"))
                })?;
                result.push_str(&val);
            }
        }
        rest = &after[end + 1..];
    }
    result.push_str(rest);

    Ok(result)
}

/// Expand environment variables in every string field of a config.
pub fn expand_client_config(config: &mut ClientConfig) -> Result<(), DoubanError> {
    for field in [
        &mut config.client_id,
        &mut config.client_secret,
        &mut config.redirect_uri,
        &mut config.auth_host,
        &mut config.api_host,
        &mut config.user_agent,
    ] {
        if let Some(value) = field {
            *value = expand_env_vars(value)?;
        }
    }
    for scope in &mut config.scope {
        *scope = expand_env_vars(scope)?;
    }
    Ok(())
}

fn env_error(detail: String) -> DoubanError {
    DoubanError::Config {
        path: PathBuf::from("<env>"),
        detail,
    }
}
