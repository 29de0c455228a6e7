use anyhow::{Context, Result};
use clap::Parser;
use graphql_sign::compat::{CapturingSink, ChainedSink, DiffOptions, EventSink, PrintingSink, SchemaDiff};
use graphql_sign::loader::{SchemaLocation, load_document};
use graphql_sign::schema::{Compatibility, Schema};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "graphql-sign")]
#[command(about = "Check GraphQL schema compatibility and generate semantic fingerprints")]
#[command(version)]
struct Args {
    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    #[command(about = "Compare two schemas for compatibility")]
    Compare {
        #[arg(help = "Old schema: introspection JSON file or endpoint URL")]
        old_schema: SchemaLocation,
        #[arg(help = "New schema: introspection JSON file or endpoint URL")]
        new_schema: SchemaLocation,
        #[arg(long, help = "Show detailed breaking change analysis")]
        detailed: bool,
    },
    #[command(about = "Generate semantic fingerprint for a schema")]
    Fingerprint {
        #[arg(help = "Introspection JSON file or endpoint URL")]
        schema: SchemaLocation,
    },
    #[command(about = "Report every difference between two schemas")]
    Diff {
        #[arg(help = "Old schema: introspection JSON file or endpoint URL")]
        old_schema: SchemaLocation,
        #[arg(help = "New schema: introspection JSON file or endpoint URL")]
        new_schema: SchemaLocation,
        #[arg(long, help = "Output format", value_enum, default_value = "text")]
        format: OutputFormat,
        #[arg(long, help = "Also compare directive applications")]
        enforce_directives: bool,
        #[arg(long, help = "YAML configuration file with a `diff` section")]
        config: Option<PathBuf>,
    },
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    match args.command {
        Commands::Compare {
            old_schema,
            new_schema,
            detailed,
        } => {
            let old_schema = Schema::load(&old_schema)?;
            let new_schema = Schema::load(&new_schema)?;

            let compatibility = old_schema.compare_with(&new_schema)?;

            match compatibility {
                Compatibility::Green => {
                    println!("Green: Schemas are semantically identical");
                }
                Compatibility::Yellow => {
                    println!("Yellow: New schema is backward-compatible with old schema");
                }
                Compatibility::Red => {
                    println!("Red: Breaking change detected");
                }
            }

            if detailed {
                let result = old_schema.check_breaking_changes(&new_schema)?;
                println!(
                    "Detailed analysis: {} breaking changes, {} dangerous changes found",
                    result.breaking_count, result.dangerous_count
                );
                for event in result.breakages().chain(result.dangers()) {
                    println!("  - {event}");
                }
            }

            if compatibility == Compatibility::Red {
                std::process::exit(1);
            }
        }
        Commands::Fingerprint { schema } => {
            let schema = Schema::load(&schema)?;
            println!("{}", schema.fingerprint);
        }
        Commands::Diff {
            old_schema,
            new_schema,
            format,
            enforce_directives,
            config,
        } => {
            // Build configuration
            let mut options = match &config {
                Some(path) => DiffOptions::from_yaml_file(path).with_context(|| {
                    format!("Failed to load configuration '{}'", path.display())
                })?,
                None => DiffOptions::default(),
            };
            if enforce_directives {
                options.enforce_directives = true;
            }

            let old_document = load_document(&old_schema)?;
            let new_document = load_document(&new_schema)?;
            let engine = SchemaDiff::new(options);

            let breaking_count = match format {
                OutputFormat::Json => {
                    let result = engine.check(&old_document, &new_document)?;
                    println!("{}", serde_json::to_string_pretty(&result)?);
                    result.breaking_count
                }
                OutputFormat::Text => {
                    let mut printer = PrintingSink::stdout();
                    let mut capture = CapturingSink::new();
                    let breaking_count = {
                        let mut sinks = ChainedSink::new(vec![
                            &mut printer as &mut dyn EventSink,
                            &mut capture,
                        ]);
                        engine.diff_schema(&old_document, &new_document, &mut sinks)?
                    };
                    print_category_summary(&capture);
                    breaking_count
                }
            };

            if breaking_count > 0 {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_category_summary(capture: &CapturingSink) {
    let mut counts = std::collections::BTreeMap::new();
    for event in capture.events() {
        if let Some(category) = event.category() {
            *counts.entry((event.level().to_string(), category.id())).or_insert(0usize) += 1;
        }
    }
    if counts.is_empty() {
        println!("No differences detected.");
        return;
    }
    println!("Summary:");
    for ((level, category), count) in counts {
        println!("  {level} {category}: {count}");
    }
}
