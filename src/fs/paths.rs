// src/fs/paths.rs

//! Path normalisation and container bind-mount derivation.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use crate::errors::{PolishError, Result};

/// Resolve `path` against the current working directory and lexically
/// normalise it (`.` dropped, `..` popped), without touching the filesystem.
///
/// Every path that ends up in a tool invocation goes through here first so
/// the command is valid from any working directory and inside a container.
pub fn absolutize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(PolishError::ConfigError(
            "empty path cannot be resolved".to_string(),
        ));
    }
    let absolute = std::path::absolute(path)?;
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Directory containing `file` after absolutising it.
///
/// The filesystem root is its own parent.
pub fn parent_dir(file: impl AsRef<Path>) -> Result<PathBuf> {
    let file = absolutize(file)?;
    Ok(file.parent().map(Path::to_path_buf).unwrap_or(file))
}

/// Set of host directories that must be visible inside the container.
///
/// Stored sorted so [`BindPaths::joined`] is stable between runs; equality is
/// plain set equality.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BindPaths {
    dirs: BTreeSet<PathBuf>,
}

impl BindPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind set covering the parent directory of every file in `files`.
    pub fn for_files<I, P>(files: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut binds = Self::new();
        for file in files {
            binds.add_file(file)?;
        }
        Ok(binds)
    }

    /// Expose the directory holding `file`.
    pub fn add_file(&mut self, file: impl AsRef<Path>) -> Result<()> {
        self.dirs.insert(parent_dir(file)?);
        Ok(())
    }

    /// Expose `dir` itself.
    pub fn add_dir(&mut self, dir: impl AsRef<Path>) -> Result<()> {
        self.dirs.insert(absolutize(dir)?);
        Ok(())
    }

    pub fn with_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        self.add_dir(dir)?;
        Ok(self)
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }

    /// Comma-separated form accepted by `apptainer run --bind`.
    pub fn joined(&self) -> String {
        self.dirs
            .iter()
            .map(|d| d.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(",")
    }
}
