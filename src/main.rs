use anyhow::{Context, Result};
use clap::Parser;
use doccheck::{check_directory, report, CheckConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doccheck",
    version,
    about = "Verify and repair file headers and method docstrings in C++ sources"
)]
struct Cli {
    /// Directory to scan recursively
    #[arg(short = 'd', long = "directory", default_value = ".")]
    directory: PathBuf,

    /// Also check @param/@return docstrings of methods declared in headers
    #[arg(long = "docstrings")]
    docstrings: bool,

    /// Report header rewrites without writing them
    #[arg(short = 'n', long = "dry-run")]
    dry_run: bool,

    /// Debug logging and a listing of every matched declaration
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = CheckConfig {
        root: cli.directory,
        check_docstrings: cli.docstrings,
        dry_run: cli.dry_run,
        list_declarations: cli.verbose,
    };
    let reports = check_directory(&config)
        .with_context(|| format!("Failed to check {}", config.root.display()))?;

    for file in &reports {
        if cli.verbose && !file.declarations.is_empty() {
            println!("{}:", file.path.display());
            for decl in &file.declarations {
                println!("  {}", report::format_declaration(decl));
            }
        }
        if !file.changes.is_empty() {
            print!("{}", report::format_changes(&file.path, &file.changes, file.written));
        }
    }

    print!(
        "{}",
        report::format_issues(reports.iter().flat_map(|r| &r.issues))
    );
    Ok(())
}
