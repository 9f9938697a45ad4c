use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use douban_client::cli::auth::{run_login, TokenSources};
use douban_client::cli::output::{print_error, print_token, write_body, OutputMode};
use douban_client::cli::resource::{
    run_book, run_celebrity, run_movie, run_user, BookCommand, CelebrityCommand, MovieCommand,
    UserCommand,
};
use douban_client::oauth::SCOPE_DELIMITER;
use douban_client::{ClientConfig, ConfigOverrides, DoubanError, ResourceClient, TokenManager};

#[derive(Parser)]
#[command(name = "douban", version, about = "Command-line client for the Douban API")]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// OAuth client id (API key)
    #[arg(long, global = true, env = "DOUBAN_CLIENT_ID")]
    client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "DOUBAN_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Redirect URI registered for the client
    #[arg(long, global = true, env = "DOUBAN_REDIRECT_URI")]
    redirect_uri: Option<String>,

    /// Requested scopes, comma separated
    #[arg(long, global = true, env = "DOUBAN_SCOPE", value_delimiter = ',')]
    scope: Option<Vec<String>>,

    /// JSON file holding a previously obtained token
    #[arg(long, global = true)]
    token_file: Option<PathBuf>,

    /// Access token to use for resource calls
    #[arg(long, global = true, env = "DOUBAN_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Refresh token to use for `refresh`
    #[arg(long, global = true, env = "DOUBAN_REFRESH_TOKEN", hide_env_values = true)]
    refresh_token: Option<String>,

    /// Re-indent JSON responses
    #[arg(long, global = true)]
    pretty: bool,

    /// Print errors as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the authorization URL
    AuthUrl,

    /// Authorize in the browser and print the resulting token
    Login {
        /// How long to wait for the redirect, in milliseconds
        #[arg(long, env = "DOUBAN_OAUTH_TIMEOUT_MS", default_value_t = 120_000)]
        timeout_ms: u64,

        /// Print the URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Exchange an authorization code for a token
    Exchange {
        /// Code from the redirect
        code: String,
    },

    /// Refresh the token given by --token-file / --refresh-token
    Refresh,

    /// GET an arbitrary API path, e.g. /v2/movie/subject/1292052
    Get {
        path: String,
    },

    /// User endpoints
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Book endpoints
    Book {
        #[command(subcommand)]
        action: BookCommand,
    },

    /// Movie endpoints
    Movie {
        #[command(subcommand)]
        action: MovieCommand,
    },

    /// Celebrity endpoints
    Celebrity {
        #[command(subcommand)]
        action: CelebrityCommand,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("DOUBAN_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json_mode = cli.json;

    if let Err(e) = run(cli).await {
        print_error(&e, json_mode, std::io::stderr().is_terminal());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DoubanError> {
    let overrides = ConfigOverrides {
        client_id: cli.client_id,
        client_secret: cli.client_secret,
        redirect_uri: cli.redirect_uri,
        scope: cli.scope.map(|scopes| {
            scopes
                .iter()
                .flat_map(|s| s.split(SCOPE_DELIMITER))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        }),
    };
    let config = douban_client::load_config(cli.config.as_deref(), overrides)?;
    let mode = if cli.pretty {
        OutputMode::Pretty
    } else {
        OutputMode::Raw
    };

    let sources = TokenSources {
        token_file: cli.token_file.as_deref(),
        access_token: cli.access_token.as_deref(),
        refresh_token: cli.refresh_token.as_deref(),
    };

    match cli.command {
        Commands::AuthUrl => {
            let tokens = token_manager(&config)?;
            println!("{}", tokens.authorization_url());
            Ok(())
        }
        Commands::Login {
            timeout_ms,
            no_browser,
        } => {
            let tokens = token_manager(&config)?;
            let token = run_login(&tokens, Duration::from_millis(timeout_ms), !no_browser).await?;
            print_token(&token);
            Ok(())
        }
        Commands::Exchange { code } => {
            let tokens = token_manager(&config)?;
            let token = tokens.exchange_code(&code).await?;
            print_token(&token);
            Ok(())
        }
        Commands::Refresh => {
            let tokens = token_manager(&config)?;
            if let Some(token) = sources.resolve()? {
                tokens.set_token(token);
            }
            let token = tokens.refresh_token().await?;
            print_token(&token);
            Ok(())
        }
        Commands::Get { path } => {
            let client = resource_client(&config, &sources)?;
            let path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
            write_body(&client.get(&path).await?, mode)
        }
        Commands::User { action } => {
            let client = resource_client(&config, &sources)?;
            write_body(&run_user(&client, action).await?, mode)
        }
        Commands::Book { action } => {
            let client = resource_client(&config, &sources)?;
            write_body(&run_book(&client, action).await?, mode)
        }
        Commands::Movie { action } => {
            let client = resource_client(&config, &sources)?;
            write_body(&run_movie(&client, action).await?, mode)
        }
        Commands::Celebrity { action } => {
            let client = resource_client(&config, &sources)?;
            write_body(&run_celebrity(&client, action).await?, mode)
        }
    }
}

fn token_manager(config: &ClientConfig) -> Result<TokenManager, DoubanError> {
    TokenManager::with_options(
        config.credentials()?,
        config.endpoints()?,
        &config.http_settings(),
    )
}

/// Resource calls only need a token, so missing client credentials are
/// tolerated here.
fn resource_client(
    config: &ClientConfig,
    sources: &TokenSources<'_>,
) -> Result<ResourceClient, DoubanError> {
    let credentials = config.credentials().unwrap_or_else(|_| {
        douban_client::Credentials::new(
            config.client_id.clone().unwrap_or_default(),
            String::new(),
            config.redirect_uri.clone().unwrap_or_default(),
            config.scope.clone(),
        )
    });
    let settings = config.http_settings();
    let http = settings.build_client()?;
    let tokens = TokenManager::with_client(credentials, config.endpoints()?, http.clone());
    let token = sources.resolve()?.ok_or(DoubanError::AuthRequired)?;
    tokens.set_token(token);
    Ok(ResourceClient::with_client(Arc::new(tokens), http))
}
