//! Schema validator CLI
//!
//! Runs the staged validation pipeline over a schema document (or every
//! document under a directory) and reports findings.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use godecl::config::{CompilerConfig, OutputFormat};
use godecl::{document, graph, validate, Fingerprint, Schema, ValidationError, ValidationReport};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "godecl-validate")]
#[command(about = "Validate flat schema documents")]
struct Cli {
    /// Schema file or directory to validate
    path: PathBuf,

    /// Write a JSON report to this file
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Path to a config file (godecl.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Disable "did you mean" hints
    #[arg(long)]
    no_suggestions: bool,
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
    let suggest = config.suggestions.enabled && !cli.no_suggestions;

    let paths = if cli.path.is_dir() {
        document::discover(&cli.path)
    } else {
        vec![cli.path.clone()]
    };
    if paths.is_empty() {
        return Err(format!("no schema documents under {:?}", cli.path).into());
    }

    println!("🔍 Validating {} document(s)", paths.len());

    let mut documents = Vec::new();
    let mut total_findings = 0;

    for path in &paths {
        let source = fs::read_to_string(path)?;
        let fingerprint = Fingerprint::from_source(&source);

        let mapping = match document::load_path(path) {
            Ok(mapping) => mapping,
            Err(e) => {
                println!("❌ {} - unreadable: {}", path.display(), e);
                total_findings += 1;
                documents.push(serde_json::json!({
                    "path": path,
                    "fingerprint": fingerprint,
                    "error": e.to_string(),
                }));
                continue;
            }
        };

        let schema = Schema::new(mapping);
        let report = validate(&schema);

        if report.is_clean() {
            println!(
                "✅ {} - clean ({} declarations)",
                path.display(),
                schema.declarations().count()
            );
        } else {
            println!("❌ {} - {} finding(s)", path.display(), report.len());
            for message in report.sorted_messages() {
                println!("   └─ {}", message);
            }
            if suggest {
                print_hints(&schema, &report, config.suggestions.limit);
            }
            total_findings += report.len();
        }

        let mut entry = serde_json::json!({
            "path": path,
            "clean": report.is_clean(),
            "findings": report.findings(),
            "messages": report.sorted_messages(),
        });
        if config.output.include_fingerprint {
            entry["fingerprint"] = serde_json::json!(fingerprint);
        }
        documents.push(entry);
    }

    if let Some(report_path) = &cli.report {
        let report = serde_json::json!({
            "generated_at": chrono::Utc::now().to_rfc3339(),
            "documents": documents,
            "total_findings": total_findings,
        });
        let report_json = match config.output.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&report)?,
            OutputFormat::Compact => serde_json::to_string(&report)?,
        };
        fs::write(report_path, report_json)?;
        println!("📄 Report written to {:?}", report_path);
    }

    println!();
    if total_findings > 0 {
        println!("❌ {} finding(s) in total", total_findings);
        std::process::exit(1);
    }
    println!("✅ All documents are valid");
    Ok(())
}

/// Fuzzy-ranked alternatives next to every unknown type name.
fn print_hints(schema: &Schema, report: &ValidationReport, limit: usize) {
    for finding in report.findings() {
        if let ValidationError::TypeNotFound { name, .. } = finding {
            let hints = graph::suggestions(schema, name, limit);
            if !hints.is_empty() {
                println!("      did you mean: {}?", hints.join(", "));
            }
        }
    }
}
