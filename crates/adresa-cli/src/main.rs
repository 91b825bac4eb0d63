use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

use adresa_core::{CanonicalAddress, NormalizationTrace};

/// adresa — Bucharest address normalizer
///
/// Normalize raw Romanian addresses to the canonical, geocoder-friendly form
/// `StreetType StreetName, Number, Sector N, Bucuresti`.
#[derive(Parser)]
#[command(name = "adresa", version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log filter directive; overrides -v (e.g. "adresa_core=debug")
    #[arg(long, env = "ADRESA_LOG", global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize addresses given as arguments
    Normalize {
        /// Raw addresses
        #[arg(required = true)]
        addresses: Vec<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
        /// Exit 1 if any address has no recognized street type
        #[arg(long)]
        strict: bool,
    },

    /// Normalize one address per line from a file or stdin
    Batch {
        /// Input file; stdin when omitted or "-"
        file: Option<PathBuf>,
        /// Output as JSON Lines
        #[arg(long)]
        json: bool,
        /// Exit 1 if any address has no recognized street type
        #[arg(long)]
        strict: bool,
    },

    /// Show the output of every normalization stage
    Explain {
        /// Raw address
        address: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the canonicalization scheme version and fingerprint
    Scheme {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// One normalized address as emitted by `--json`
#[derive(Serialize)]
struct Record {
    input: String,
    canonical: String,
    street_type: Option<String>,
    street_name: Option<String>,
    number: Option<String>,
    sector: Option<u32>,
    degraded: bool,
}

impl Record {
    fn new(input: &str) -> Self {
        let address = adresa_core::parse_address(input);
        Record::from_address(input, address)
    }

    fn from_address(input: &str, address: CanonicalAddress) -> Self {
        let canonical = address.to_string();
        let degraded = address.is_degraded();
        let (street_type, street_name) = match address.street {
            Some(street) => (Some(street.street_type.to_string()), Some(street.name)),
            None => (None, None),
        };
        Record {
            input: input.to_string(),
            canonical,
            street_type,
            street_name,
            number: address.number,
            sector: address.sector,
            degraded,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log.as_deref());

    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            2
        }
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8, directive: Option<&str>) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let filter = directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::default().add_directive(level.into()));

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("Tracing subscriber already set; skipping re-initialization.");
    }
}

fn run(command: Commands) -> adresa_core::Result<i32> {
    match command {
        Commands::Normalize {
            addresses,
            json,
            strict,
        } => {
            let records: Vec<Record> = addresses.iter().map(|a| Record::new(a)).collect();
            let degraded = report_degraded(&records);

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
            } else {
                for record in &records {
                    writeln!(out, "{}", record.canonical)?;
                }
            }
            Ok(strict_exit_code(strict, degraded))
        }

        Commands::Batch { file, json, strict } => {
            let reader: Box<dyn BufRead> = match file {
                Some(path) if path.as_os_str() != "-" => {
                    Box::new(BufReader::new(File::open(&path)?))
                }
                _ => Box::new(BufReader::new(io::stdin())),
            };

            let stdout = io::stdout();
            let mut out = stdout.lock();
            let mut total = 0usize;
            let mut degraded = 0usize;
            for line in reader.lines() {
                let line = line?;
                let record = Record::new(&line);
                total += 1;
                if record.degraded {
                    degraded += 1;
                    tracing::warn!(line = total, input = %line, "no street type recognized");
                }
                if json {
                    writeln!(out, "{}", serde_json::to_string(&record)?)?;
                } else {
                    writeln!(out, "{}", record.canonical)?;
                }
            }
            out.flush()?;

            tracing::info!(total, degraded, "batch normalized");
            Ok(strict_exit_code(strict, degraded))
        }

        Commands::Explain { address, json } => {
            let trace = adresa_core::explain(&address);
            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&trace)?)?;
            } else {
                write_trace(&mut out, &trace)?;
            }
            Ok(0)
        }

        Commands::Scheme { json } => {
            let scheme = adresa_core::scheme();
            if json {
                println!("{}", serde_json::to_string_pretty(&scheme)?);
            } else {
                println!("scheme v{} {}", scheme.version, scheme.fingerprint);
            }
            Ok(0)
        }

        Commands::Version => {
            println!(
                "adresa {} (adresa-core {}, scheme v{})",
                env!("CARGO_PKG_VERSION"),
                env!("CARGO_PKG_VERSION"),
                adresa_core::SCHEME_VERSION
            );
            Ok(0)
        }
    }
}

fn write_trace(out: &mut impl Write, trace: &NormalizationTrace) -> io::Result<()> {
    let stages = [
        ("input", &trace.input),
        ("transliterated", &trace.transliterated),
        ("separated", &trace.separated),
        ("tokens", &trace.tokens),
        ("cleaned", &trace.cleaned),
        ("canonical", &trace.canonical),
    ];
    for (label, value) in stages {
        writeln!(out, "{:>15}  {}", label.bold(), value)?;
    }
    if trace.address.is_degraded() {
        writeln!(
            out,
            "{:>15}  {}",
            "note".bold(),
            "no street type recognized; fallback used".yellow()
        )?;
    }
    Ok(())
}

fn report_degraded(records: &[Record]) -> usize {
    let mut count = 0;
    for record in records.iter().filter(|r| r.degraded) {
        count += 1;
        tracing::warn!(input = %record.input, "no street type recognized");
    }
    count
}

fn strict_exit_code(strict: bool, degraded: usize) -> i32 {
    if strict && degraded > 0 {
        1
    } else {
        0
    }
}
