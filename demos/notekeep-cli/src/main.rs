use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use notekeep::api::DEFAULT_BASE_URL;
use notekeep::prelude::*;
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Terminal front end for a Notekeep backend.
#[derive(Parser, Debug)]
#[command(name = "notekeep", version, about)]
struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "NOTEKEEP_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Directory holding the persisted session token
    #[arg(long, global = true, env = "NOTEKEEP_STATE_DIR", default_value = ".notekeep")]
    state_dir: PathBuf,

    /// Browser `Cookie` header to recover a session from
    #[arg(long, global = true, env = "NOTEKEEP_COOKIE")]
    cookie: Option<String>,

    /// Log filter (trace, debug, info, warn, error, or an EnvFilter directive)
    #[arg(long, global = true, env = "NOTEKEEP_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Log in and persist the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "NOTEKEEP_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// End the session, locally and on the backend
    Logout,

    /// Validate the stored session and print who it belongs to
    Whoami,

    /// Open a path through the route guard and print what would render
    Open {
        /// e.g. `/dashboard` or `/addevents?date=2024-05-01`
        path: String,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), NotekeepError> {
    let mut config = ClientConfig::default()
        .with_base_url(cli.api_url)
        .with_state_dir(cli.state_dir);
    if let Some(cookie) = cli.cookie {
        config = config.with_cookie_header(cookie);
    }
    let mut app = Notekeep::builder().config(config).build()?;

    match cli.command {
        Command::Register {
            username,
            email,
            password,
        } => {
            app.submit_registration(&username, &email, &password).await?;
            println!("registered {username}; log in with `notekeep login --email {email}`");
        }
        Command::Login { email, password } => {
            let user = app.submit_login(&email, &password).await?;
            println!("logged in as {}", user.username);
        }
        Command::Logout => {
            app.logout().await?;
            println!("logged out");
        }
        Command::Whoami => {
            let state = app.session().initialize().await;
            match state.user() {
                Some(user) => match &user.email {
                    Some(email) => println!("{} <{email}>", user.username),
                    None => println!("{}", user.username),
                },
                None => println!("not logged in"),
            }
        }
        Command::Open { path } => {
            let nav = app.start(&path).await;
            print_navigation(&app, nav);
        }
    }
    Ok(())
}

fn print_navigation(app: &Notekeep, nav: Navigation) {
    match nav {
        Navigation::Render(route) => println!("render {route}"),
        Navigation::Redirect(route) => println!("redirect {route}"),
        Navigation::Loading => println!("loading"),
        Navigation::NotFound => println!("not found: {}", app.path()),
    }

    if !app.shows_chrome() {
        return;
    }
    let state = app.state();
    let shell = app.shell();
    for link in shell.top_bar() {
        println!("  [{}] {}", link.label, link.target());
    }
    if let Some(greeting) = shell.greeting(&state) {
        println!("  {greeting}");
    }
    for link in shell.sidebar_links(&state) {
        println!("  - {} → {}", link.label, link.target());
    }
}
