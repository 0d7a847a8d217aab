use crate::data::*;
use crate::decode::decode;
use crate::error::*;

/// Turn the change list of one signal into decoded samples.
///
/// Changes holding `x`, `z` or an undefined value are dropped without
/// touching the held value. With `preserve_steps` every change after the
/// first one is preceded by a sample at the same time carrying the previous
/// value, so that straight lines through the samples draw a step function.
pub fn reconstruct<'a, I>(events: I, bits: u32, preserve_steps: bool) -> Result<TraceSeries>
    where
        I: IntoIterator<Item = &'a RawChange>
{
    let mut rv = TraceSeries::new();
    let mut last: Option<i64> = None;

    for event in events {
        let raw = match event.value.as_binary() {
            Some(raw) => raw,
            None => continue,
        };

        let value = decode(raw, bits)?;

        if preserve_steps {
            if let Some(held) = last {
                rv.push(Sample::new(event.time, held));
            }
        }

        rv.push(Sample::new(event.time, value));
        last = Some(value);
    }

    Ok(rv)
}
