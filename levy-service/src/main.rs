//! Point d'entrée CLI pour levy-service

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::{fmt, EnvFilter};

use levy_service::ServiceConfig;

// Charger .env au démarrage
fn load_env() {
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Parcours de demande de taxe environnementale, page de tracé du contour
#[derive(Parser)]
#[command(name = "levy-service")]
#[command(author, version)]
#[command(about = "Boundary drawing page, levy quote and applications for the environmental levy journey")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Preset (default/prototype) ou chemin vers une config JSON
    #[arg(long, default_value = "default", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    let config = ServiceConfig::from_env_or(&cli.config)?;
    debug!(field = %config.boundary_field, validate = config.validate_boundary_on_submit, "Config loaded");

    match cli.command {
        Commands::Render { value } => cli::cmd_render(&config, value.as_deref())?,
        Commands::Submit { value, details } => {
            cli::cmd_submit(&config, &value, details.as_deref())?
        }
        Commands::Draw { script, value } => cli::cmd_draw(&config, &script, value.as_deref())?,
        Commands::Quote { houses } => cli::cmd_quote(&config, houses)?,
        Commands::Export { value, output } => cli::cmd_export(&value, &output)?,
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Journaux sur stderr, stdout reste au JSON produit
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
