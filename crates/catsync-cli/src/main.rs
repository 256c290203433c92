mod input;
mod transform;
mod validate;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use catsync_adapters::Platform;

#[derive(Debug, Parser)]
#[command(name = "catsync")]
#[command(about = "Convert e-commerce catalog exports into canonical product documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Convert a platform catalog payload into canonical products
    Transform {
        /// Source platform: prestashop, shopify or magento
        #[arg(long, short)]
        platform: Platform,
        /// JSON payload file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        /// Validate the converted products and include the report
        #[arg(long)]
        validate: bool,
        /// Field schema file (YAML or JSON); overrides `CATSYNC_SCHEMA_PATH`
        #[arg(long)]
        schema: Option<PathBuf>,
        /// Abort the PrestaShop batch on an item without `remoteId` or `sku`
        #[arg(long)]
        strict: bool,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Validate canonical documents (one object or an array) against the schema
    Validate {
        /// JSON document file, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Print the effective field schema as JSON
    Schema {
        #[arg(long)]
        schema: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<ExitCode> {
    let config = catsync_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Transform {
            platform,
            input,
            validate,
            schema,
            strict,
            pretty,
        } => transform::run_transform(
            &config,
            &transform::TransformArgs {
                platform,
                input,
                validate,
                schema,
                strict,
                pretty,
            },
        ),
        Commands::Validate { input, schema } => {
            validate::run_validate(&config, &input, schema.as_deref())
        }
        Commands::Schema { schema } => {
            let schema = input::resolve_schema(&config, schema.as_deref())?;
            input::write_json(&schema.to_json()?, true)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
