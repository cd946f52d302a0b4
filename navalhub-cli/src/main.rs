//! NavalHub CLI - Command-line front end for the workspace session
//!
//! Stands in for the login screen: signs in as a role, reports the landing
//! route, and shows or clears the persisted session.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use navalhub_core::{init_logging, NavalhubConfig};
use navalhub_session::{home_path_for, Role, SessionContext, SessionManager};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "navalhub")]
#[command(about = "Sign in to a NavalHub workspace and resolve its landing route")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current session
    Status,

    /// Sign in as a workspace role
    Login {
        /// Organisation email (blank uses the role's default)
        #[arg(short, long, default_value = "")]
        email: String,

        /// Password (not verified yet)
        #[arg(short, long)]
        password: String,

        /// Workspace role: administrative, technical or client
        #[arg(short, long, value_parser = parse_role, default_value = "administrative")]
        role: Role,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Print the landing route for a role (or the administrative default)
    Route {
        #[arg(short, long, value_parser = parse_role)]
        role: Option<Role>,
    },

    /// List the available workspace roles
    Roles,

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Write a default configuration file
        #[arg(long)]
        init: bool,

        /// Validate current configuration
        #[arg(long)]
        validate: bool,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;

    let mut logging_config = config.logging.clone();
    if cli.verbose {
        logging_config.level = "debug".to_string();
        logging_config
            .filter_directives
            .retain(|d| !d.starts_with("navalhub"));
    }
    init_logging(&logging_config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!("Starting NavalHub CLI v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Route { role } => {
            println!("{}", home_path_for(role));
        }
        Commands::Roles => handle_roles(),
        Commands::Config {
            show,
            init,
            validate,
        } => handle_config(&config, show, init, validate)?,
        Commands::Status => handle_status(&open_session(&config)?),
        Commands::Login {
            email,
            password,
            role,
        } => handle_login(&open_session(&config)?, &email, &password, role).await?,
        Commands::Logout => {
            open_session(&config)?
                .logout()
                .context("Failed to clear stored session")?;
            println!("Signed out");
        }
    }

    Ok(())
}

fn load_config(config_path: Option<&PathBuf>) -> Result<NavalhubConfig> {
    if let Some(path) = config_path {
        return NavalhubConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()));
    }

    // Try the default locations in order
    let default_paths = [
        dirs::config_dir().map(|d| d.join("navalhub").join("config.toml")),
        dirs::home_dir().map(|d| d.join(".navalhub").join("config.toml")),
        Some(PathBuf::from("navalhub.toml")),
    ];

    for path in default_paths.into_iter().flatten() {
        if path.exists() {
            return NavalhubConfig::from_file(&path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()));
        }
    }

    Ok(NavalhubConfig::default())
}

fn open_session(config: &NavalhubConfig) -> Result<SessionContext> {
    let manager =
        SessionManager::from_settings(&config.session).context("Failed to open session store")?;
    Ok(SessionContext::new(manager))
}

fn default_config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|d| d.join(".config")))
        .context("Could not determine a configuration directory")?;
    Ok(dir.join("navalhub").join("config.toml"))
}

fn handle_status(session: &SessionContext) {
    match session.user() {
        Some(user) => {
            println!("Signed in: {}", user.display_string());
            println!("Avatar:    {}", user.avatar);
            println!("Landing:   {}", session.home_path());
        }
        None => println!("Not signed in"),
    }
}

async fn handle_login(
    session: &SessionContext,
    email: &str,
    password: &str,
    role: Role,
) -> Result<()> {
    let profile = role.profile();
    println!("Signing in to {} ...", profile.title);

    match session.login(email, password, role).await {
        Ok(user) => {
            println!("Signed in: {}", user.display_string());
            println!("Navigate to {}", home_path_for(Some(role)));
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Login failed");
            Err(e).context("Login failed")
        }
    }
}

fn handle_roles() {
    for role in Role::ALL {
        let profile = role.profile();
        println!(
            "{:<15} {:<24} {:<40} {}",
            role.as_str(),
            profile.title,
            profile.subtitle,
            role.home_path()
        );
    }
}

fn handle_config(config: &NavalhubConfig, show: bool, init: bool, validate: bool) -> Result<()> {
    if init {
        let path = default_config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        NavalhubConfig::default().save_to_file(&path)?;
        println!("Wrote default configuration to {}", path.display());
    }

    if validate {
        config.validate()?;
        println!("Configuration is valid");
    }

    if show || !(init || validate) {
        println!("{}", toml::to_string_pretty(config)?);
    }

    Ok(())
}
