use crate::data::*;
use crate::error::*;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name used for the trace of `signal_name`.
pub fn csv_file_name(signal_name: &str) -> String {
    format!("{}.csv", signal_name.replace('.', "_"))
}

/// Write one trace as `time,<signal_name>` rows.
pub fn write_csv<W: Write>(mut writer: W, signal_name: &str, series: &[Sample]) -> Result<()> {
    writeln!(writer, "time,{}", signal_name)?;

    for sample in series {
        writeln!(writer, "{},{}", sample.time, sample.value)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save a trace into `dir` and return the path of the new file.
pub fn save_csv(dir: impl AsRef<Path>, signal_name: &str, series: &[Sample]) -> Result<PathBuf> {
    let path = dir.as_ref().join(csv_file_name(signal_name));
    let file = File::create(&path)?;
    write_csv(BufWriter::new(file), signal_name, series)?;

    info!("CSV saved as {}", path.display());
    Ok(path)
}

/// Save every trace of a result set, in result set order.
pub fn save_all(dir: impl AsRef<Path>, traces: &ResultSet) -> Result<Vec<PathBuf>> {
    traces.iter()
        .map(|(name, series)| save_csv(dir.as_ref(), name, series))
        .collect()
}


#[cfg(test)]
mod test {
    use super::*;
    use tempdir::TempDir;
    use std::fs::read_to_string;

    #[test]
    fn test_file_name() {
        assert_eq!("top_uut_pos.csv", csv_file_name("top.uut.pos"));
        assert_eq!("pos.csv", csv_file_name("pos"));
    }

    #[test]
    fn test_write_rows() {
        let mut out = Vec::new();
        let series = vec![Sample::new(0, 1), Sample::new(10, 1), Sample::new(10, -2)];
        write_csv(&mut out, "top.pos", &series).unwrap();

        assert_eq!("time,top.pos\n0,1\n10,1\n10,-2\n", String::from_utf8(out).unwrap());
    }

    #[test]
    fn test_save_header_only() {
        let tmpd = TempDir::new("wavetrace").unwrap();
        let path = save_csv(tmpd.path(), "top.idle", &[]).unwrap();

        assert_eq!(tmpd.path().join("top_idle.csv"), path);
        assert_eq!("time,top.idle\n", read_to_string(&path).unwrap());
    }

    #[test]
    fn test_save_all() {
        let tmpd = TempDir::new("wavetrace").unwrap();
        let mut traces = ResultSet::new();
        traces.insert("b".to_string(), vec![Sample::new(1, -1)]);
        traces.insert("a.x".to_string(), vec![]);

        let paths = save_all(tmpd.path(), &traces).unwrap();

        assert_eq!(vec![tmpd.path().join("b.csv"), tmpd.path().join("a_x.csv")], paths);
        assert_eq!("time,b\n1,-1\n", read_to_string(&paths[0]).unwrap());
    }
}
