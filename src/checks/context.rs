//! Probe context: audit root plus a per-run file content cache

use super::base::CheckError;
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::debug;

/// Read-only view of the audited project for one run.
///
/// Each target file is read at most once; several checks probing the same
/// file share its content. Missing files are cached as `None`.
pub struct ProbeContext {
    root: PathBuf,
    contents: RefCell<HashMap<PathBuf, Option<Rc<str>>>>,
}

impl ProbeContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            contents: RefCell::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a file relative to the audit root
    pub fn resolve(&self, relative: &Path) -> PathBuf {
        self.root.join(relative)
    }

    /// Content of `relative`, or `None` when the file does not exist
    pub fn read(&self, relative: &Path) -> Result<Option<Rc<str>>, CheckError> {
        let path = self.resolve(relative);
        if let Some(cached) = self.contents.borrow().get(&path) {
            return Ok(cached.clone());
        }

        let content = match std::fs::read(&path) {
            Ok(bytes) => {
                let text = String::from_utf8(bytes)
                    .map_err(|_| CheckError::NotUtf8 { path: path.clone() })?;
                debug!("Read {} ({} bytes)", path.display(), text.len());
                Some(Rc::from(text))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{} not found", path.display());
                None
            }
            Err(source) => return Err(CheckError::Read { path, source }),
        };

        self.contents.borrow_mut().insert(path, content.clone());
        Ok(content)
    }

    /// Number of distinct files looked up so far
    pub fn files_probed(&self) -> usize {
        self.contents.borrow().len()
    }
}
