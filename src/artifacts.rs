use super::*;
use std::io::Write;
use std::path::Path;

/// All-or-nothing artifact writes.
///
/// The body goes to a sibling temporary file that is atomically renamed
/// into place once fully written and flushed, so a mid-write failure
/// leaves nothing under the final name.
pub fn persist<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut buffer = std::io::BufWriter::new(&mut staged);
        fill(&mut buffer)?;
        buffer.flush()?;
    }
    staged.persist(path).map_err(|failure| Error::Io(failure.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_artifacts_land_complete() {
        let dir = tempfile::tempdir().expect("dir");
        let path = dir.path().join("out.csv");
        persist(&path, |file| writeln!(file, "Taxon,Cluster")).expect("persist");
        assert_eq!(std::fs::read_to_string(&path).expect("read"), "Taxon,Cluster\n");
    }

    #[test]
    fn failed_writes_leave_no_file_behind() {
        let dir = tempfile::tempdir().expect("dir");
        let path = dir.path().join("out.csv");
        let result = persist(&path, |file| {
            writeln!(file, "partial")?;
            Err(std::io::Error::other("disk fell over"))
        });
        assert!(result.is_err());
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).expect("dir").count(), 0);
    }
}
