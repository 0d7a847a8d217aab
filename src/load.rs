pub mod vcd;

use crate::data::*;
use crate::error::*;

/// Names of all signals in a waveform.
pub trait LoadCatalog {
    fn load_catalog(&self) -> Result<SignalCatalog>;
}

/// Per signal change lists, ordered by time.
pub trait LoadChanges {
    fn load_changes(&self, handle: SignalHandle) -> Result<&[RawChange]>;

    /// Declared width of the signal in bits.
    fn load_width(&self, handle: SignalHandle) -> Result<u32>;
}

pub trait LoadTimescale {
    /// Time unit of the waveform, e.g. `1 ns`.
    fn load_timescale(&self) -> Option<String> {
        None
    }
}

/// Everything extraction needs from a waveform reader.
pub trait Source: LoadCatalog + LoadChanges + LoadTimescale + Sync {}

impl<T> Source for T where T: LoadCatalog + LoadChanges + LoadTimescale + Sync {}

pub type SrcBox = Box<dyn Source>;
