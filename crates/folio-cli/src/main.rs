use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use folio_core::{AppConfig, Route, Section};

mod commands;

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "A single-page portfolio site in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Read configuration from this file instead of ~/.config/folio/config.toml
    #[arg(long = "config", global = true)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the site in the terminal
    Run {
        /// Page to open, e.g. "/" or "/ThankYou"
        #[arg(long, default_value = "/", value_parser = parse_route)]
        path: Route,
        /// Start scrolled to this section, e.g. "projects" or "#contact"
        #[arg(short = 's', long)]
        section: Option<Section>,
    },
    /// Send a message through the contact form relay
    Contact {
        #[arg(short = 'n', long)]
        name: String,
        #[arg(short = 'e', long)]
        email: String,
        #[arg(short = 'm', long)]
        message: String,
    },
    /// Join the product waitlist
    Waitlist {
        /// Email address to sign up
        email: String,
        /// Extra provider field as NAME=VALUE (repeatable)
        #[arg(short = 'f', long = "field", value_parser = parse_key_val)]
        fields: Vec<(String, String)>,
    },
    /// Show or create the configuration file
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// List the project gallery
    Projects {
        /// Only show projects in this category
        #[arg(short = 'c', long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn parse_route(path: &str) -> Result<Route, std::convert::Infallible> {
    Ok(Route::parse(path))
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{}`", s))?;
    if name.trim().is_empty() {
        return Err(format!("missing field name in `{}`", s));
    }
    Ok((name.trim().to_string(), value.to_string()))
}

/// Install the tracing subscriber; the TUI logs to a file so the screen stays clean
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let path = config.log_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    let tui = matches!(cli.command, Some(Commands::Run { .. }) | None);
    init_logging(&config, tui)?;

    // Handle commands
    match cli.command {
        Some(Commands::Run { path, section }) => commands::run::run(config, path, section).await,
        None => commands::run::run(config, Route::Home, None).await,
        Some(Commands::Contact { name, email, message }) => {
            commands::contact::run(&config, &name, &email, &message).await
        }
        Some(Commands::Waitlist { email, fields }) => commands::waitlist::run(&config, &email, &fields).await,
        Some(Commands::Config { action }) => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::path(),
            ConfigAction::Init { force } => commands::config::init(force),
        },
        Some(Commands::Projects { category }) => commands::projects::run(&config, category.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_start_options() {
        let cli = Cli::try_parse_from(["folio", "run", "--path", "/ThankYou", "--section", "#projects"]).unwrap();
        match cli.command {
            Some(Commands::Run { path, section }) => {
                assert_eq!(path, Route::ThankYou);
                assert_eq!(section, Some(Section::Projects));
            }
            _ => panic!("expected run"),
        }

        let cli = Cli::try_parse_from(["folio", "run"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Run { path: Route::Home, section: None })));

        assert!(Cli::try_parse_from(["folio", "run", "--section", "blog"]).is_err());
    }

    #[test]
    fn test_waitlist_fields() {
        let cli = Cli::try_parse_from(["folio", "waitlist", "ada@example.io", "-f", "FNAME=Ada", "--field", "b_x=1"]).unwrap();
        match cli.command {
            Some(Commands::Waitlist { email, fields }) => {
                assert_eq!(email, "ada@example.io");
                assert_eq!(fields, vec![("FNAME".to_string(), "Ada".to_string()), ("b_x".to_string(), "1".to_string())]);
            }
            _ => panic!("expected waitlist"),
        }
        assert!(Cli::try_parse_from(["folio", "waitlist", "ada@example.io", "-f", "novalue"]).is_err());
    }
}
