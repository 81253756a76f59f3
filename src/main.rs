use std::process::ExitCode;

use clap::{ArgAction, Parser};
use fermi::config::DEFAULT_SAMPLES;
use fermi::output::{format_summary, OutputFields};
use fermi::{estimate, EstimateConfig, FermiResult};
use log::{debug, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

/// Fermi estimation using Monte Carlo simulation.
///
/// Write numbers as usual and uncertain quantities as ranges `low,high`,
/// e.g. `fermi "1e6,1e7 * 0.001,0.01"`.
#[derive(Parser, Debug)]
#[command(name = "fermi", version, about, long_about = None)]
struct Args {
    /// Arithmetic expression for estimation.
    expression: String,

    /// Number of Monte Carlo samples.
    #[arg(
        short = 'n',
        long = "samples",
        default_value_t = DEFAULT_SAMPLES as i64,
        allow_negative_numbers = true
    )]
    samples: i64,

    /// Output the mean of the estimate.
    #[arg(short, long)]
    mean: bool,

    /// Output the standard deviation of the estimate.
    #[arg(short, long)]
    std: bool,

    /// Output the 99% confidence interval of the estimate.
    #[arg(short, long)]
    ci: bool,

    /// Seed for the random number generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,

    /// Log more to standard error (repeat for more detail).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn fields(&self) -> OutputFields {
        let mut fields = OutputFields::empty();
        fields.set(OutputFields::MEAN, self.mean);
        fields.set(OutputFields::STD, self.std);
        fields.set(OutputFields::CI, self.ci);
        fields
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // Only fails if a logger is already installed
    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );
}

fn run(args: &Args) -> FermiResult<String> {
    let config = EstimateConfig {
        // Negative counts are rejected by validation just like zero
        samples: usize::try_from(args.samples).unwrap_or(0),
        seed: args.seed,
    };
    let estimate = estimate(&args.expression, &config)?;
    debug!("seed {}", estimate.seed);
    Ok(format_summary(&estimate.summary, args.fields()))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = ctrlc::set_handler(|| std::process::exit(1)) {
        warn!("could not install interrupt handler: {}", e);
    }

    match run(&args) {
        Ok(line) => {
            println!("{line}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("fermi: error: {e}");
            ExitCode::FAILURE
        }
    }
}
