use super::*;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Provider of scratch directories for the batch distance round.
///
/// Acquisition hands back a [`Scratch`] whose directory is removed when it
/// drops, so release happens on every exit path including unwinding.
/// Tests substitute a provider that records what was handed out.
pub trait Workspace {
    fn acquire(&self) -> Result<Scratch>;
}

/// A uniquely named scratch directory, removed on drop.
pub struct Scratch {
    dir: tempfile::TempDir,
}

impl From<tempfile::TempDir> for Scratch {
    fn from(dir: tempfile::TempDir) -> Self {
        Self { dir }
    }
}

impl Scratch {
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write sample names one per line for the distance backend.
    pub fn names_file(&self, names: &[&str]) -> Result<PathBuf> {
        let path = self.dir.path().join("queries.txt");
        let mut file = std::io::BufWriter::new(std::fs::File::create(&path)?);
        for name in names {
            writeln!(file, "{}", name)?;
        }
        file.flush()?;
        Ok(path)
    }
}

/// Default provider: uniquely suffixed directories under a fixed root.
pub struct TempWorkspace {
    root: PathBuf,
    prefix: String,
}

impl From<(&Path, &str)> for TempWorkspace {
    fn from((root, prefix): (&Path, &str)) -> Self {
        Self {
            root: root.to_path_buf(),
            prefix: prefix.to_string(),
        }
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::from((Path::new("."), "strainnet"))
    }
}

impl Workspace for TempWorkspace {
    fn acquire(&self) -> Result<Scratch> {
        let dir = tempfile::Builder::new()
            .prefix(self.prefix.as_str())
            .suffix("_tmp")
            .tempdir_in(&self.root)?;
        Ok(Scratch::from(dir))
    }
}
