mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::config::ConfigSubcommand;
use nativephp_scaffold_core::MetadataPlacement;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "nativephp-scaffold",
    about = "Generate NativePHP Mobile plugin boilerplate from a vendor/plugin-name identifier",
    version,
    propagate_version = true
)]
struct Cli {
    /// Application root (default: nearest directory with an `artisan` file, else cwd)
    #[arg(long, global = true, env = "NATIVEPHP_SCAFFOLD_ROOT")]
    root: Option<PathBuf>,

    /// Config file (default: <root>/nativephp-scaffold.yaml)
    #[arg(long, global = true, env = "NATIVEPHP_SCAFFOLD_CONFIG")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new plugin
    New {
        /// Plugin identifier, e.g. acme/plugin-barcode-scanner
        identifier: String,

        /// Target directory (default: <root>/packages/<vendor>/<plugin-name>)
        #[arg(long)]
        path: Option<PathBuf>,

        /// Leave existing files untouched and report them as skipped
        #[arg(long)]
        no_clobber: bool,

        /// Show what would be written without touching the filesystem
        #[arg(long)]
        dry_run: bool,

        /// Where namespace metadata goes: manifest, composer or both
        #[arg(long, value_name = "PLACEMENT")]
        metadata: Option<MetadataPlacement>,
    },

    /// Show every naming form derived from an identifier
    Names {
        /// Plugin identifier, e.g. acme/plugin-barcode-scanner
        identifier: String,
    },

    /// List the files a scaffold contains
    Templates {
        /// Where namespace metadata goes: manifest, composer or both
        #[arg(long, value_name = "PLACEMENT")]
        metadata: Option<MetadataPlacement>,
    },

    /// Inspect and initialize the scaffold config file
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());
    let config_path = cli.config.as_deref();

    let result = match cli.command {
        Commands::New {
            identifier,
            path,
            no_clobber,
            dry_run,
            metadata,
        } => cmd::new::run(
            &root,
            config_path,
            cmd::new::NewArgs {
                identifier,
                path,
                no_clobber,
                dry_run,
                metadata,
            },
            cli.json,
        ),
        Commands::Names { identifier } => cmd::names::run(&identifier, cli.json),
        Commands::Templates { metadata } => {
            cmd::templates::run(&root, config_path, metadata, cli.json)
        }
        Commands::Config { subcommand } => {
            cmd::config::run(&root, config_path, subcommand, cli.json)
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
