use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use partitioner::{HeaderPolicy, Request};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(author, version, about = "Partition the rows of a TSV file by its first column", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print the list of written files as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one file per distinct value of the first column
    Split {
        /// Input TSV file
        file: PathBuf,

        /// Treat the first line as a header row
        #[arg(long)]
        has_header: bool,
    },
    /// Spread each key's rows round-robin over N files
    Distribute {
        /// Input TSV file
        file: PathBuf,

        /// Number of output files
        #[arg(short, long = "count", allow_hyphen_values = true)]
        n: String,

        /// Treat the first line as a header row
        #[arg(long)]
        has_header: bool,

        /// When to write a header row: always, or only if the source has one
        #[arg(long, default_value = "always")]
        header_policy: HeaderPolicy,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

impl Commands {
    fn to_request(&self) -> Request {
        match self {
            Commands::Split { file, has_header } => Request::Split {
                path: file.clone(),
                has_header: *has_header,
            },
            Commands::Distribute {
                file,
                n,
                has_header,
                header_policy,
            } => Request::Distribute {
                path: file.clone(),
                has_header: *has_header,
                shard_count: n.clone(),
                header: *header_policy,
            },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.to_request().execute() {
        Ok(report) => {
            if cli.json {
                let json = report.to_json().context("Failed to serialize report")?;
                println!("{}", json);
            } else {
                for file in &report.files {
                    println!("{} ({} rows)", file.path.display(), file.rows);
                }
                println!("{}", report.notice());
            }
        }
        Err(e) => {
            eprintln!("{}: {}", e.kind(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
