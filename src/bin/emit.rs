//! Go emitter CLI
//!
//! Compiles schema documents into Go source files. Each input document
//! becomes one `.go` file named after the document; documents with findings
//! produce no output and fail the run.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use godecl::config::CompilerConfig;
use godecl::{compile_path, document, CompileError, Fingerprint};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "godecl-emit")]
#[command(about = "Compile flat schema documents to Go source")]
struct Cli {
    /// Schema file or directory to compile
    path: PathBuf,

    /// Output directory for generated files (overrides config)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Print generated source instead of writing files
    #[arg(long)]
    stdout: bool,

    /// Path to a config file (godecl.toml)
    #[arg(short, long)]
    config: Option<String>,
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
    let out_dir = cli.out.clone().unwrap_or(config.output.dir);

    let paths = if cli.path.is_dir() {
        document::discover(&cli.path)
    } else {
        vec![cli.path.clone()]
    };
    if paths.is_empty() {
        return Err(format!("no schema documents under {:?}", cli.path).into());
    }

    if !cli.stdout {
        fs::create_dir_all(&out_dir)?;
    }

    let mut failed = 0;

    for path in &paths {
        match compile_path(path) {
            Ok(output) => {
                let stem = path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .ok_or_else(|| format!("unusable file name: {:?}", path))?;

                let mut code = output.code;
                if config.output.include_fingerprint {
                    let fingerprint = Fingerprint::from_source(&fs::read_to_string(path)?);
                    code = format!(
                        "// Code generated by godecl {} from {} (sha256 {}). DO NOT EDIT.\n\n{}",
                        env!("CARGO_PKG_VERSION"),
                        path.display(),
                        fingerprint.short(),
                        code
                    );
                }

                if cli.stdout {
                    println!("{}", code);
                    continue;
                }

                let target = out_dir.join(format!("{}.go", stem));
                fs::write(&target, &code)?;
                println!(
                    "✅ {} -> {} ({} types)",
                    path.display(),
                    target.display(),
                    output.type_count
                );
            }
            Err(CompileError::Validation(report)) => {
                println!("❌ {} - {} finding(s)", path.display(), report.len());
                for message in report.sorted_messages() {
                    println!("   └─ {}", message);
                }
                failed += 1;
            }
            Err(e) => {
                println!("❌ {} - {}", path.display(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        println!();
        println!("❌ {} document(s) failed", failed);
        std::process::exit(1);
    }
    Ok(())
}
