use std::io::Write;

use colored::Colorize;

use crate::error::DoubanError;
use crate::oauth::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Body bytes exactly as received.
    Raw,
    /// Re-indent JSON bodies; anything else falls back to raw.
    Pretty,
}

pub fn render_body(body: &[u8], mode: OutputMode) -> Vec<u8> {
    if mode == OutputMode::Pretty {
        if let Ok(value) = serde_json::from_slice::<serde_json::Value>(body) {
            if let Ok(mut pretty) = serde_json::to_vec_pretty(&value) {
                pretty.push(b'\n');
                return pretty;
            }
        }
    }
    body.to_vec()
}

pub fn write_body(body: &[u8], mode: OutputMode) -> Result<(), DoubanError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&render_body(body, mode))?;
    stdout.flush()?;
    Ok(())
}

pub fn print_token(token: &Token) {
    println!("{}", serde_json::to_string_pretty(token).unwrap_or_default());
}

/// Error text for stdout (`json_mode`) or stderr.
pub fn render_error(err: &DoubanError, json_mode: bool, is_tty: bool) -> String {
    if json_mode {
        return serde_json::to_string_pretty(&err.to_json()).unwrap_or_default();
    }
    let label = if is_tty {
        "Error".red().bold().to_string()
    } else {
        "Error".to_string()
    };
    format!("{label}: {err}")
}

pub fn print_error(err: &DoubanError, json_mode: bool, is_tty: bool) {
    let rendered = render_error(err, json_mode, is_tty);
    if json_mode {
        println!("{rendered}");
    } else {
        eprintln!("{rendered}");
    }
}
