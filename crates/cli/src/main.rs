use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

mod prepare;
mod report;

#[derive(Parser)]
#[command(name = "orgfit")]
#[command(about = "Fit permission profiles to the components of a target org", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile an org's profiles against a target org's components
    Prepare(PrepareArgs),

    /// Inspect the known-component registry a target org yields
    Knowns(KnownsArgs),
}

#[derive(Args)]
struct PrepareArgs {
    /// Source archive holding the profiles to reconcile
    source: PathBuf,

    /// Target org archive the registry is built from
    #[arg(long)]
    target: PathBuf,

    /// Manually maintained component rows (identifier, category)
    #[arg(long, default_value = "knowns.csv")]
    knowns: PathBuf,

    /// Output archive path (default: orgfit-prepare-<epoch>.zip)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Operations log path (default: orgfit-prepare-<epoch>.csv)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct KnownsArgs {
    /// Target org archive the registry is built from
    #[arg(long)]
    target: PathBuf,

    /// Manually maintained component rows (identifier, category)
    #[arg(long, default_value = "knowns.csv")]
    knowns: PathBuf,

    /// Print per-category counts as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let mut cli = Cli::parse();

    // Auto-enable quiet mode when --json is used (to keep stdout clean for JSON parsing)
    let json_output = match &cli.command {
        Commands::Prepare(args) => args.json,
        Commands::Knowns(args) => args.json,
    };
    if json_output {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Prepare(args) => run_prepare(args),
        Commands::Knowns(args) => run_knowns(args),
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let epoch = unix_epoch();
    let options = prepare::PrepareOptions {
        source: args.source,
        target: args.target,
        knowns: args.knowns,
        out: args
            .out
            .unwrap_or_else(|| PathBuf::from(format!("orgfit-prepare-{epoch}.zip"))),
        log: args
            .log
            .unwrap_or_else(|| PathBuf::from(format!("orgfit-prepare-{epoch}.csv"))),
    };

    let report = prepare::run(&options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "Prepared {} profiles: {} entries added, {} removed",
            report.profiles, report.entries_added, report.entries_removed
        );
        eprintln!("Output archive: {}", report.out_path);
        eprintln!("Operations log: {}", report.log_path);
    }
    Ok(())
}

fn run_knowns(args: KnownsArgs) -> Result<()> {
    let registry = prepare::build_registry_from(&args.target, &args.knowns)?;
    let report = report::KnownsReport {
        registry: report::category_counts(&registry),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for count in &report.registry {
            eprintln!("{:>6}  {}", count.components, count.category);
        }
    }
    Ok(())
}

fn unix_epoch() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}
