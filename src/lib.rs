pub mod config;
pub mod data;
pub mod decode;
pub mod error;
pub mod export;
pub mod extract;
pub mod load;
pub mod plot;
pub mod resolve;
pub mod trace;

use config::Config;
use data::ResultSet;
use error::*;
use extract::{extract, ExtractOptions, Extraction};
use load::{vcd::VcdLoader, SrcBox};
use plot::Figure;

use clap::Parser;
use std::fs::create_dir_all;
use std::io::stderr;
use std::path::PathBuf;
use tracing::{error, info, subscriber::set_global_default};
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Layer, Registry};


/// Starts logging to stderr, filtered by `RUST_LOG` (default `info`).
pub fn start_logging() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let subscriber = Registry::default().with(
        fmt::layer()
            .without_time()
            .with_target(false)
            .with_writer(stderr)
            .with_filter(filter),
    );

    set_global_default(subscriber)?;

    Ok(())
}

fn load_source(input: &str) -> Result<SrcBox> {
    if input.ends_with(".vcd") {
        let loader = VcdLoader::new(PathBuf::from(input))?;
        Ok(Box::new(loader))
    } else {
        Err(Error::UnknownFileFormat(input.to_string()))
    }
}

/// Extract the requested signals, then export and plot them as configured.
///
/// Returns the extracted traces. Unresolved signals are reported and skipped,
/// except in single signal mode where the first failure is returned.
pub fn run(opts: Opts, config: &Config) -> Result<ResultSet> {
    let settings = config.settings();

    if opts.single {
        match opts.signals.len() {
            0 => return Err(Error::MissingArgument(
                "signals".into(), "Single signal mode needs a signal name".into())),
            1 => {}
            n => return Err(Error::TooManySignals(n)),
        }
    }

    let source = load_source(&opts.input)?;

    let bits = opts.bits.unwrap_or(settings.bits);
    let options = ExtractOptions {
        bits: if bits == 0 { None } else { Some(bits) },
        preserve_steps: !opts.single,
    };

    let Extraction { traces, failures } = extract(source.as_ref(), &opts.signals, &options)?;

    for (name, e) in failures {
        match &e {
            Error::NotFound(_) => error!("Signal '{}' not found in {}", name, opts.input),
            other => error!("Signal '{}' skipped: {}", name, other),
        }

        if opts.single {
            return Err(e);
        }
    }

    if traces.is_empty() {
        info!("No signals extracted from {}", opts.input);
        return Ok(traces);
    }

    if settings.csv && !opts.no_csv {
        let output_dir = opts.output_dir.as_ref().unwrap_or(&settings.output_dir);
        create_dir_all(output_dir)?;
        export::save_all(output_dir, &traces)?;
    }

    if settings.plot && !opts.no_plot {
        let title = match traces.keys().next() {
            Some(name) if opts.single => format!("Signal Trace: {}", name),
            _ => "Signal Traces".to_string(),
        };
        let timescale = source.load_timescale();
        let figure = Figure::from_traces(title, &traces)
            .with_timescale(timescale.as_deref());

        plot::show(&figure)?;
    }

    Ok(traces)
}

/// Extract signed signal traces from a VCD file into CSV files and a chart.
#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Opts {
    /// Input VCD file
    pub input: String,

    /// Signal names, fully qualified or a unique suffix (e.g. pos error_new pid_out)
    #[clap(required = true)]
    pub signals: Vec<String>,

    /// Decode width in bits, 0 to use the declared width of each signal
    #[clap(short, long)]
    pub bits: Option<u32>,

    /// Directory for the CSV files
    #[clap(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Extract exactly one signal without step points and fail if it is not found
    #[clap(long)]
    pub single: bool,

    /// Do not show the chart
    #[clap(long)]
    pub no_plot: bool,

    /// Do not write CSV files
    #[clap(long)]
    pub no_csv: bool,

    /// Read settings from this file instead of the config directory
    #[clap(long)]
    pub config: Option<PathBuf>,
}
