//! Per-document state for an editor session.
//!
//! Every open document is held as an `Arc<RwLock<AntFile>>`. A new version
//! is analyzed outside the lock and swapped in whole, so readers never see
//! a half-built analysis. Documents share nothing, which lets
//! [`AnalysisHost::reanalyze_all`] rebuild them in parallel.
//!
//! ## Usage
//!
//! ```ignore
//! let mut host = AnalysisHost::new();
//! host.set_document("file:///m.ant", 1, "S1 -> S2; k1*S1\n")?;
//!
//! let file = host.document("file:///m.ant")?;
//! let errors = file.read().get_errors();
//! ```

use std::sync::Arc;

use parking_lot::RwLock;
use rayon::prelude::*;
use rustc_hash::FxHashMap;

use crate::semantic::AnalysisOptions;

use super::file::AntFile;

/// Shared handle on one document's current analysis
pub type DocumentHandle = Arc<RwLock<AntFile>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("unknown document {0}")]
    UnknownDocument(Arc<str>),
    #[error("stale update for {uri}: version {attempted} is older than {current}")]
    StaleVersion {
        uri: Arc<str>,
        current: i32,
        attempted: i32,
    },
}

#[derive(Debug)]
struct Document {
    version: i32,
    file: DocumentHandle,
}

/// Owns the analysis of every open document.
#[derive(Debug, Default)]
pub struct AnalysisHost {
    documents: FxHashMap<Arc<str>, Document>,
    options: AnalysisOptions,
}

impl AnalysisHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: AnalysisOptions) -> Self {
        Self {
            documents: FxHashMap::default(),
            options,
        }
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Analyze `text` as `version` of `uri` and make it current.
    ///
    /// The newest version wins: an update older than the one held is
    /// rejected and the held analysis stays in place.
    pub fn set_document(
        &mut self,
        uri: &str,
        version: i32,
        text: &str,
    ) -> Result<DocumentHandle, HostError> {
        if let Some(current) = self.version(uri).filter(|current| version < *current) {
            tracing::warn!(uri, current, attempted = version, "dropping stale document update");
            return Err(HostError::StaleVersion {
                uri: Arc::from(uri),
                current,
                attempted: version,
            });
        }

        let file = AntFile::with_options(uri, text, &self.options);
        tracing::debug!(uri, version, "document replaced");
        let handle = match self.documents.get_mut(uri) {
            Some(existing) => {
                existing.version = version;
                *existing.file.write() = file;
                existing.file.clone()
            }
            None => {
                let handle = Arc::new(RwLock::new(file));
                self.documents.insert(
                    Arc::from(uri),
                    Document {
                        version,
                        file: handle.clone(),
                    },
                );
                handle
            }
        };
        Ok(handle)
    }

    pub fn document(&self, uri: &str) -> Result<DocumentHandle, HostError> {
        self.documents
            .get(uri)
            .map(|doc| doc.file.clone())
            .ok_or_else(|| HostError::UnknownDocument(Arc::from(uri)))
    }

    pub fn version(&self, uri: &str) -> Option<i32> {
        self.documents.get(uri).map(|doc| doc.version)
    }

    pub fn remove_document(&mut self, uri: &str) -> Result<(), HostError> {
        self.documents
            .remove(uri)
            .map(|_| ())
            .ok_or_else(|| HostError::UnknownDocument(Arc::from(uri)))
    }

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Replace the options and rebuild every document with them.
    pub fn set_options(&mut self, options: AnalysisOptions) {
        self.options = options;
        self.reanalyze_all();
    }

    /// Rebuild every document from its current text, in parallel.
    pub fn reanalyze_all(&self) {
        let handles: Vec<&DocumentHandle> = self.documents.values().map(|d| &d.file).collect();
        handles.par_iter().for_each(|handle| {
            let (path, text) = {
                let file = handle.read();
                (Arc::<str>::from(file.path()), Arc::<str>::from(file.text()))
            };
            let file = AntFile::with_options(path, text, &self.options);
            *handle.write() = file;
        });
        tracing::debug!(documents = handles.len(), "reanalyzed all documents");
    }
}
