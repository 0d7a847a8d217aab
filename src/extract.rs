use crate::data::*;
use crate::error::*;
use crate::load::Source;
use crate::resolve::{resolve, Resolution};
use crate::trace::reconstruct;

use rayon::prelude::*;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy)]
pub struct ExtractOptions {
    /// Decode width. `None` uses the declared width of each signal.
    pub bits: Option<u32>,

    /// Insert held value samples before every change.
    pub preserve_steps: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            bits: Some(32),
            preserve_steps: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct Extraction {
    pub traces: ResultSet,

    /// Requests that could not be extracted, in request order.
    pub failures: Vec<(String, Error)>,
}

/// Resolve and reconstruct every requested signal.
///
/// Signals are handled independently and in parallel. A failing signal is
/// recorded in `failures` and does not affect the others.
pub fn extract<S>(source: &S, requested: &[String], options: &ExtractOptions) -> Result<Extraction>
    where
        S: Source + ?Sized
{
    let catalog = source.load_catalog()?;

    let outcomes: Vec<_> = requested.par_iter()
        .map(|name| (name, extract_one(source, &catalog, name, options)))
        .collect();

    let mut rv = Extraction::default();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(series) => {
                rv.traces.insert(name.clone(), series);
            }
            Err(e) => rv.failures.push((name.clone(), e)),
        }
    }

    Ok(rv)
}

fn extract_one<S>(
    source: &S,
    catalog: &SignalCatalog,
    requested: &str,
    options: &ExtractOptions,
) -> Result<TraceSeries>
    where
        S: Source + ?Sized
{
    let resolution = resolve(requested, catalog)?;

    match &resolution {
        Resolution::Exact(_) => {}
        Resolution::Suffix { name, .. } => {
            debug!("'{}' resolved to '{}'", requested, name);
        }
        Resolution::Ambiguous { name, candidates, .. } => {
            warn!("Multiple matches for '{}': {:?}. Taking '{}'.", requested, candidates, name);
        }
    }

    let handle = resolution.handle();
    let bits = match options.bits {
        Some(bits) => bits,
        None => source.load_width(handle)?,
    };

    let changes = source.load_changes(handle)?;
    reconstruct(changes, bits, options.preserve_steps)
}
