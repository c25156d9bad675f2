//! Resolution of request paths against the document root.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::router::RouteError;

/// The directory every static and redirect path is resolved under.
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
    canonical: PathBuf,
}

impl DocumentRoot {
    /// # Errors
    ///
    /// Fails when `root` does not exist or can't be canonicalized.
    pub fn new(root: impl Into<PathBuf>) -> io::Result<Self> {
        let root = root.into();
        let canonical = fs::canonicalize(&root)?;
        Ok(Self { root, canonical })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Maps an already percent-decoded request path onto the file system.
    ///
    /// Empty and `.` segments are dropped and `..` pops one segment. Climbing
    /// above the root, or a NUL byte anywhere, resolves to nothing.
    ///
    /// # Errors
    ///
    /// [`RouteError::NotFound`] for paths that can't name anything under the root.
    pub fn resolve(&self, decoded_path: &str) -> Result<PathBuf, RouteError> {
        if decoded_path.contains('\0') {
            return Err(RouteError::NotFound);
        }

        let mut segments: Vec<&str> = Vec::new();
        for segment in decoded_path.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if segments.pop().is_none() {
                        return Err(RouteError::NotFound);
                    }
                }
                segment => segments.push(segment),
            }
        }

        let mut resolved = self.root.clone();
        for segment in segments {
            // a segment like `C:` or `\\server` must not replace the root
            if !matches!(Path::new(segment).components().next(), Some(Component::Normal(_))) {
                return Err(RouteError::NotFound);
            }
            resolved.push(segment);
        }
        Ok(resolved)
    }

    /// Rejects existing paths whose canonical form leaves the root, e.g. via a symlink.
    ///
    /// Paths that don't exist pass; reading them fails later anyway.
    ///
    /// # Errors
    ///
    /// [`RouteError::NotFound`] when `path` escapes the root.
    pub fn ensure_contained(&self, path: &Path) -> Result<(), RouteError> {
        match fs::canonicalize(path) {
            Ok(canonical) if !canonical.starts_with(&self.canonical) => Err(RouteError::NotFound),
            _ => Ok(()),
        }
    }

    /// Path of a file directly under the root, such as a page template.
    pub fn file(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
