//! Declaration graph CLI
//!
//! Inspects the reference graph of a single schema document: DOT export,
//! statistics, and per-declaration usage queries.

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use godecl::config::{CompilerConfig, OutputFormat};
use godecl::graph::{branches, suggestions, DeclGraph, NodeKind};
use godecl::{document, Fingerprint, Schema};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "godecl-graph")]
#[command(about = "Inspect declaration reference graphs")]
struct Cli {
    /// Path to a config file (godecl.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the reference graph in GraphViz DOT format
    Dot {
        /// Schema document
        path: PathBuf,
        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print graph statistics as JSON
    Stats {
        /// Schema document
        path: PathBuf,
    },

    /// Show what a declaration uses and what uses it
    Uses {
        /// Schema document
        path: PathBuf,
        /// Declared name to look up
        name: String,
    },

    /// Print every containment path the recursion check walks
    Paths {
        /// Schema document
        path: PathBuf,
        /// Start from one root declaration instead of all of them
        #[arg(short, long)]
        root: Option<String>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = CompilerConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Dot { path, output } => {
            let schema = load_schema(&path)?;
            let dot = DeclGraph::from_schema(&schema).to_dot();

            if let Some(output) = output {
                fs::write(&output, dot)?;
                println!("✅ DOT graph written to {:?}", output);
            } else {
                print!("{}", dot);
            }
            Ok(())
        }

        Commands::Stats { path } => {
            let source = fs::read_to_string(&path)?;
            let schema = load_schema(&path)?;
            let graph = DeclGraph::from_schema(&schema);

            let mut stats = serde_json::json!({
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "path": path,
                "stats": graph.stats(),
                "cycles": graph.cycles(),
            });
            if config.output.include_fingerprint {
                stats["fingerprint"] = serde_json::json!(Fingerprint::from_source(&source));
            }

            let rendered = match config.output.format {
                OutputFormat::Pretty => serde_json::to_string_pretty(&stats)?,
                OutputFormat::Compact => serde_json::to_string(&stats)?,
            };
            println!("{}", rendered);
            Ok(())
        }

        Commands::Uses { path, name } => {
            let schema = load_schema(&path)?;
            let graph = DeclGraph::from_schema(&schema);

            let Some(kind) = graph.kind(&name) else {
                println!("❌ \"{}\" does not appear in the graph", name);
                let hints = suggestions(&schema, &name, config.suggestions.limit);
                if !hints.is_empty() {
                    println!("   did you mean: {}?", hints.join(", "));
                }
                std::process::exit(1);
            };

            let kind = match kind {
                NodeKind::Alias => "alias",
                NodeKind::Group => "group",
                NodeKind::Primitive => "primitive",
                NodeKind::Unresolved => "unresolved",
            };
            println!("🔍 {} ({})", name, kind);
            println!("   uses: {}", join_or_dash(&graph.references_out(&name)));
            println!("   used by: {}", join_or_dash(&graph.references_in(&name)));
            Ok(())
        }

        Commands::Paths { path, root } => {
            let schema = load_schema(&path)?;

            if let Some(name) = &root {
                if !schema.is_declared(name) {
                    println!("❌ \"{}\" is not a declared root name", name);
                    let hints = suggestions(&schema, name, config.suggestions.limit);
                    if !hints.is_empty() {
                        println!("   did you mean: {}?", hints.join(", "));
                    }
                    std::process::exit(1);
                }
            }

            let resolved = match &root {
                Some(name) => branches::resolve_root(&schema, name),
                None => branches::resolve(&schema),
            };

            let mut rows: Vec<(String, bool)> = resolved
                .iter()
                .map(|branch| (branch.to_string(), branch.contains_cycle()))
                .collect();
            rows.sort();

            for (rendered, cyclic) in &rows {
                if *cyclic {
                    println!("❌ {} (cycle)", rendered);
                } else {
                    println!("   {}", rendered);
                }
            }
            println!("🔍 {} containment path(s)", rows.len());
            Ok(())
        }
    }
}

fn load_schema(path: &PathBuf) -> Result<Schema, Box<dyn std::error::Error>> {
    Ok(Schema::new(document::load_path(path)?))
}

fn join_or_dash(names: &[&str]) -> String {
    if names.is_empty() {
        "-".to_string()
    } else {
        names.join(", ")
    }
}
