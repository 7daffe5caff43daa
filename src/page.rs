//! # Page Module
//!
//! A [`Page`] is the only persisted entity of the wiki: a title and a raw body.
//! [`PageStore`] maps each title to a single `<title>.txt` file under its root
//! directory. The file holds exactly the body bytes, with no header, metadata or
//! encoding transform.
//!
//! Titles reaching the store must already have passed the router's validation
//! (`[a-zA-Z0-9]+`). The store does not re-check them; the router is the only
//! safety boundary between request paths and the filesystem.
//!
//! Saves are full-file overwrites without locking, so concurrent saves to the
//! same title resolve as last-write-wins.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::WikiError;

/// File extension of page files
pub const PAGE_EXTENSION: &str = "txt";

/// A wiki page: a title and its raw body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// Alphanumeric title, doubling as the filename stem
    pub title: String,
    /// Arbitrary body content, possibly empty
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// A page with no body, used when editing a title that has no file yet.
    pub fn empty(title: impl Into<String>) -> Self {
        Self::new(title, Vec::new())
    }

    /// Body as text for template substitution (invalid UTF-8 is replaced).
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Filesystem-backed page storage rooted at a single flat directory.
#[derive(Debug, Clone)]
pub struct PageStore {
    root: PathBuf,
}

impl PageStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the backing file for `title`: `<root>/<title>.txt`.
    #[must_use]
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.root.join(Self::file_name(title))
    }

    /// `<title>.txt`. Store errors carry only this name, never the root.
    fn file_name(title: &str) -> String {
        format!("{title}.{PAGE_EXTENSION}")
    }

    /// Read the page stored under `title`.
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::PageNotFound`] if the file does not exist and
    /// [`WikiError::Io`] for any other read failure.
    pub fn load(&self, title: &str) -> Result<Page, WikiError> {
        let path = self.path_for(title);
        match fs::read(&path) {
            Ok(body) => {
                debug!(title = %title, bytes = body.len(), "Page loaded");
                Ok(Page::new(title, body))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(title = %title, "Page not found");
                Err(WikiError::PageNotFound {
                    title: title.to_string(),
                })
            }
            Err(e) => {
                warn!(title = %title, path = %path.display(), error = %e, "Page load failed");
                Err(WikiError::io(Self::file_name(title), e))
            }
        }
    }

    /// Write `page.body` to its file, creating or truncating it.
    ///
    /// New files are created owner read/write only (`0600`).
    ///
    /// # Errors
    ///
    /// Returns [`WikiError::Io`] if the file cannot be opened or fully written.
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.path_for(&page.title);
        let result = Self::open_for_write(&path).and_then(|mut file| {
            file.write_all(&page.body)?;
            file.flush()
        });
        match result {
            Ok(()) => {
                debug!(title = %page.title, bytes = page.body.len(), "Page saved");
                Ok(())
            }
            Err(e) => {
                warn!(title = %page.title, path = %path.display(), error = %e, "Page save failed");
                Err(WikiError::io(Self::file_name(&page.title), e))
            }
        }
    }

    fn open_for_write(path: &Path) -> io::Result<fs::File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        options.open(path)
    }
}
