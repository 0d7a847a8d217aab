use indexmap::IndexMap;
use std::fmt;
use std::iter::FromIterator;

//
// Raw waveform data
//

/// Value of a signal after a change, as written in the waveform file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Digits over `0`, `1`, `x` and `z`, most significant first.
    Bits(String),
    Undefined,
}

impl RawValue {
    pub fn bits(s: impl Into<String>) -> Self {
        Self::Bits(s.into())
    }

    /// Digits of the value if it consists of `0` and `1` only.
    pub fn as_binary(&self) -> Option<&str> {
        match self {
            Self::Bits(s) if s.chars().all(|c| c == '0' || c == '1') => Some(s.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits(s) => f.write_str(s),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChange {
    pub time: u64,
    pub value: RawValue,
}

impl RawChange {
    pub fn new(time: u64, value: RawValue) -> Self {
        Self { time, value }
    }
}

//
// Catalog
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalHandle(pub usize);

impl fmt::Display for SignalHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Fully qualified signal names in declaration order.
#[derive(Debug, Clone, Default)]
pub struct SignalCatalog {
    entries: IndexMap<String, SignalHandle>,
}

impl SignalCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a name. A name declared twice keeps its first handle.
    pub fn insert(&mut self, name: impl Into<String>, handle: SignalHandle) {
        self.entries.entry(name.into()).or_insert(handle);
    }

    pub fn get(&self, name: &str) -> Option<SignalHandle> {
        self.entries.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SignalHandle)> {
        self.entries.iter().map(|(name, handle)| (name.as_str(), *handle))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, SignalHandle)> for SignalCatalog {
    fn from_iter<T: IntoIterator<Item = (S, SignalHandle)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (name, handle) in iter {
            catalog.insert(name, handle);
        }
        catalog
    }
}

//
// Decoded traces
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub time: u64,
    pub value: i64,
}

impl Sample {
    pub const fn new(time: u64, value: i64) -> Self {
        Self { time, value }
    }
}

impl From<(u64, i64)> for Sample {
    fn from((time, value): (u64, i64)) -> Self {
        Self::new(time, value)
    }
}

pub type TraceSeries = Vec<Sample>;

/// Traces by requested name, in request order.
pub type ResultSet = IndexMap<String, TraceSeries>;
