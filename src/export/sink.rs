use std::fs;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::export::artifact::Artifact;
use crate::foundation::error::{WheelsError, WheelsResult};

/// Destination for finished exports (the "save file" step).
pub trait ExportSink {
    /// Persist one artifact. Implementations must not leave partial output behind on failure.
    fn save(&mut self, artifact: &Artifact) -> WheelsResult<()>;
}

/// In-memory sink for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySink {
    saved: Vec<Artifact>,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn saved(&self) -> &[Artifact] {
        &self.saved
    }
}

impl ExportSink for InMemorySink {
    fn save(&mut self, artifact: &Artifact) -> WheelsResult<()> {
        self.saved.push(artifact.clone());
        Ok(())
    }
}

/// [`DirSink`] configuration.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DirSinkOpts {
    /// Replace an existing file with the same name.
    pub overwrite: bool,
}

impl Default for DirSinkOpts {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

/// Writes artifacts into a directory under their own file names.
///
/// Each file is written to a hidden `.part` sibling first and renamed into place, so readers
/// never observe a half-written export.
#[derive(Debug, Clone)]
pub struct DirSink {
    dir: PathBuf,
    opts: DirSinkOpts,
}

impl DirSink {
    pub fn new(dir: impl Into<PathBuf>, opts: DirSinkOpts) -> Self {
        Self {
            dir: dir.into(),
            opts,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, artifact: &Artifact) -> PathBuf {
        self.dir.join(&artifact.file_name)
    }
}

/// Removes the temporary file on drop unless it was committed.
struct PartFile {
    path: PathBuf,
    committed: bool,
}

impl Drop for PartFile {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.path);
        }
    }
}

/// Move a finished part file to `dest`.
///
/// Without `overwrite` the file is hard-linked instead of renamed: linking fails when `dest`
/// already exists, even if it appeared after the up-front check. The guard then removes the part.
fn commit(part: &mut PartFile, dest: &Path, overwrite: bool) -> WheelsResult<()> {
    if overwrite {
        fs::rename(&part.path, dest)
            .with_context(|| format!("move export into '{}'", dest.display()))?;
        part.committed = true;
        return Ok(());
    }

    match fs::hard_link(&part.path, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Err(WheelsError::precondition(
            format!("'{}' already exists", dest.display()),
        )),
        Err(e) => Err(anyhow::Error::new(e)
            .context(format!("link export into '{}'", dest.display()))
            .into()),
    }
}

impl ExportSink for DirSink {
    fn save(&mut self, artifact: &Artifact) -> WheelsResult<()> {
        let name = Path::new(&artifact.file_name);
        if name.components().count() != 1 || name.file_name().is_none() {
            return Err(WheelsError::precondition(format!(
                "export file name must be a single path component: '{}'",
                artifact.file_name
            )));
        }

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;

        let dest = self.path_for(artifact);
        if !self.opts.overwrite && dest.exists() {
            return Err(WheelsError::precondition(format!(
                "'{}' already exists",
                dest.display()
            )));
        }

        let mut part = PartFile {
            path: self.dir.join(format!(".{}.part", artifact.file_name)),
            committed: false,
        };
        let mut f = fs::File::create(&part.path)
            .with_context(|| format!("create '{}'", part.path.display()))?;
        f.write_all(&artifact.bytes)
            .and_then(|()| f.sync_all())
            .with_context(|| format!("write '{}'", part.path.display()))?;
        drop(f);

        commit(&mut part, &dest, self.opts.overwrite)?;

        tracing::info!(path = %dest.display(), bytes = artifact.bytes.len(), "saved export");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
