use crate::data::*;
use crate::error::*;

/// Outcome of looking up a requested signal name in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The request is a fully qualified catalog name.
    Exact(SignalHandle),

    /// Exactly one catalog name ends with the request.
    Suffix {
        name: String,
        handle: SignalHandle,
    },

    /// Several catalog names end with the request. The first one in catalog
    /// order is used.
    Ambiguous {
        name: String,
        handle: SignalHandle,
        candidates: Vec<String>,
    },
}

impl Resolution {
    pub fn handle(&self) -> SignalHandle {
        match self {
            Self::Exact(handle) => *handle,
            Self::Suffix { handle, .. } => *handle,
            Self::Ambiguous { handle, .. } => *handle,
        }
    }
}

pub fn resolve(requested: &str, catalog: &SignalCatalog) -> Result<Resolution> {
    if let Some(handle) = catalog.get(requested) {
        return Ok(Resolution::Exact(handle));
    }

    let mut matches = catalog.iter()
        .filter(|(name, _)| name.ends_with(requested));

    let (name, handle) = matches.next()
        .ok_or_else(|| Error::NotFound(requested.to_string()))?;
    let rest: Vec<_> = matches.map(|(name, _)| name.to_string()).collect();

    if rest.is_empty() {
        Ok(Resolution::Suffix {
            name: name.to_string(),
            handle,
        })
    } else {
        let mut candidates = Vec::with_capacity(rest.len() + 1);
        candidates.push(name.to_string());
        candidates.extend(rest);

        Ok(Resolution::Ambiguous {
            name: name.to_string(),
            handle,
            candidates,
        })
    }
}
