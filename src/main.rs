use std::io::Write as _;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use qwixkart_admin::auth::supabase::SupabaseAuth;
use qwixkart_admin::auth::{AuthError, SessionStore};
use qwixkart_admin::config::{
    AdminConfig, AuthTimeouts, ConfigError, DEFAULT_AUTH_CONNECT_TIMEOUT_SECS, DEFAULT_AUTH_REQUEST_TIMEOUT_SECS,
};
use qwixkart_admin::console::{self, Console, Reply};
use qwixkart_admin::navigation::Navigator;

#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error("stdin read failed: {0}")]
    Stdin(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "qwixkart-admin", about = "Qwixkart admin console")]
struct Cli {
    #[arg(long, env = "SUPABASE_URL")]
    supabase_url: String,

    #[arg(long, env = "SUPABASE_ANON_KEY", hide_env_values = true)]
    anon_key: String,

    #[arg(long, env = "AUTH_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_AUTH_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "AUTH_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_AUTH_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    /// Page to open on start-up.
    #[arg(long, default_value = "/")]
    start: String,
}

impl Cli {
    fn config(&self) -> Result<AdminConfig, ConfigError> {
        let timeouts = AuthTimeouts { request_secs: self.request_timeout_secs, connect_secs: self.connect_timeout_secs };
        AdminConfig::new(self.supabase_url.clone(), self.anon_key.clone(), timeouts)
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load ./.env before clap reads env-backed flags; a missing file is fine.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "admin console exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = cli.config()?;
    tracing::info!(url = %config.supabase_url, "admin console starting");

    let provider = Arc::new(SupabaseAuth::new(&config)?);
    let store = Arc::new(SessionStore::new(provider, config.timeouts.call_timeout()));
    let mut console = Console::new(Navigator::new(store));

    respond(&mut console, console::Command::Goto(cli.start)).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt();
        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }
        match console::parse_command(&line) {
            Ok(command) => {
                if !respond(&mut console, command).await {
                    break;
                }
            }
            Err(e) => eprintln!("{e}"),
        }
    }

    tracing::info!("admin console stopped");
    Ok(())
}

/// Execute and print. Returns `false` when the console should exit.
async fn respond(console: &mut Console, command: console::Command) -> bool {
    match console.execute(command).await {
        Ok(Reply::Text(text)) => println!("{text}"),
        Ok(Reply::Quit) => return false,
        Err(e) => eprintln!("error: {e}"),
    }
    true
}

fn prompt() {
    print!("admin> ");
    std::io::stdout().flush().ok();
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
