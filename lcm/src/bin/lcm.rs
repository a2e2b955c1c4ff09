use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::EnvFilter;

use lcm::miner::{run, ItemsetSink, ItemsetWriter, MiningConfig};

fn init_tracing(verbose: u8, quiet: u8) {
    // INFO by default; each -v raises and each -q lowers it by one step
    let level = match verbose.saturating_add(1).saturating_sub(quiet) {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    let _ = set_global_default(subscriber);
}

#[derive(Parser)]
#[command(version, about = "Mine closed or frequent itemsets with LCM")]
struct Opts {
    /// Transaction file: one transaction per line, items separated by spaces
    input: PathBuf,

    /// Relative minimum support in (0, 1]
    #[arg(short = 's', long)]
    min_support: f64,

    /// Write itemsets here instead of printing them
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report every frequent itemset, not only closed ones
    #[arg(long)]
    all: bool,

    /// Shortest itemset to report
    #[arg(long, default_value_t = 1)]
    min_len: usize,

    /// Longest itemset to report
    #[arg(long)]
    max_len: Option<usize>,

    /// Split the search across threads (in-memory results only)
    #[arg(long)]
    parallel: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    quiet: u8,
}

fn main() {
    let opts = Opts::parse();
    init_tracing(opts.verbose, opts.quiet);
    if let Err(e) = execute(opts) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn execute(opts: Opts) -> lcm::miner::Result<()> {
    let config = MiningConfig::new(opts.min_support)
        .closed_only(!opts.all)
        .min_len(opts.min_len)
        .max_len(opts.max_len)
        .parallel(opts.parallel);

    let outcome = run(&opts.input, opts.output.as_deref(), &config)?;
    if let Some(itemsets) = outcome.itemsets {
        let mut writer = ItemsetWriter::new(io::stdout().lock());
        for (itemset, support) in itemsets.iter() {
            writer.emit(itemset, support)?;
        }
        writer.finish()?;
    }

    let stats = &outcome.stats;
    eprintln!(
        "{} itemsets from {} transactions (min count {}) in {} ms",
        stats.frequent_count,
        stats.transaction_count,
        stats.min_count,
        stats.elapsed_ms()
    );
    Ok(())
}
