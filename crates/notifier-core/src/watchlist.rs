//! Flat-file watch-list: one lowercase channel name per line.

use std::collections::HashSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::{Error, Result};

/// Trim, lowercase and dedupe `names`, keeping first-seen order. Names that
/// are empty after trimming are dropped.
pub fn normalize<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    names
        .into_iter()
        .map(|n| n.as_ref().trim().to_lowercase())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.clone()))
        .collect()
}

/// Reject names that cannot appear in the comma-joined channel query.
pub fn validate_channel(name: &str) -> Result<()> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed.contains(',') || trimmed.chars().any(char::is_whitespace) {
        return Err(Error::InvalidChannel(name.to_string()));
    }
    Ok(())
}

pub struct WatchListStore {
    path: PathBuf,
}

impl WatchListStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create an empty watch-list (and its parent directory) if none exists.
    pub fn ensure_exists(&self) -> Result<()> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        std::fs::write(&self.path, "").map_err(|e| Error::io(&self.path, e))?;
        info!("Created empty watch-list at {:?}", self.path);
        Ok(())
    }

    pub fn load(&self) -> Result<Vec<String>> {
        let content =
            std::fs::read_to_string(&self.path).map_err(|e| Error::io(&self.path, e))?;
        Ok(normalize(content.lines()))
    }

    /// Normalize `names` and replace the file contents with them.
    ///
    /// The new contents go to a temporary file in the same directory which is
    /// then renamed over the watch-list, so readers never see a partial file.
    /// An existing file keeps its permissions across the rename.
    pub fn save<I, S>(&self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = normalize(names);
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(|e| Error::io(&dir, e))?;
        tmp.write_all(names.join("\n").as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        match std::fs::metadata(&self.path) {
            Ok(meta) => tmp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| Error::io(tmp.path(), e))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::io(&self.path, e)),
        }
        tmp.persist(&self.path)
            .map_err(|e| Error::io(&self.path, e.error))?;

        debug!("Saved {} channels to {:?}", names.len(), self.path);
        Ok(())
    }

    /// Union the stored list with `names`. Every name is validated before
    /// anything is written.
    pub fn add<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        for name in names {
            validate_channel(name.as_ref())?;
        }
        let mut channels = self.load()?;
        channels.extend(names.iter().map(|n| n.as_ref().to_string()));
        self.save(channels)
    }

    /// Remove every stored channel matching one of `names`, ignoring case.
    pub fn delete<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let doomed: HashSet<String> = names
            .iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .collect();
        let mut channels = self.load()?;
        channels.retain(|c| !doomed.contains(&c.to_lowercase()));
        self.save(channels)
    }
}
