//! Resolver
//!
//! Turns a [`ResourceReference`] into a filesystem path. Failures never
//! raise: they come back as `None`, and callers fall back to streaming the
//! resource's bytes instead.

use log::{debug, warn};
use std::path::{Path, PathBuf};

use crate::config::{FileIoConfig, ProviderConfig};
use crate::error::{FileIoError, FileIoResult};
use crate::resolve::provider::{ResolutionStrategy, classify};
use crate::resolve::query::{ContentQuery, ContentRequest, DATA_COLUMN, ROW_ID_SELECTION};
use crate::resolve::reference::ResourceReference;
use crate::storage::target::FileTarget;

pub struct ResourceResolver<Q> {
    query: Q,
    providers: ProviderConfig,
}

impl<Q: ContentQuery> ResourceResolver<Q> {
    pub fn new(query: Q, config: &FileIoConfig) -> Self {
        Self::with_providers(query, config.providers.clone())
    }

    pub fn with_providers(query: Q, providers: ProviderConfig) -> Self {
        Self { query, providers }
    }

    pub fn providers(&self) -> &ProviderConfig {
        &self.providers
    }

    /// The strategy [`resolve_path`](Self::resolve_path) will follow for `reference`
    pub fn strategy(&self, reference: &ResourceReference) -> ResolutionStrategy {
        classify(reference)
    }

    pub fn resolve_path(&self, reference: &ResourceReference) -> Option<PathBuf> {
        let path = match classify(reference) {
            ResolutionStrategy::PrimaryVolume { relative_path } => {
                Some(Path::new(&self.providers.external_storage_root).join(relative_path))
            }
            ResolutionStrategy::Downloads { row_id } => {
                let base = self.providers.downloads_base_address.trim_end_matches('/');
                self.data_path(&ContentRequest::data_column(format!("{base}/{row_id}")))
            }
            ResolutionStrategy::Media { collection, row_id } => {
                let request = ContentRequest::data_column(collection.address(&self.providers))
                    .filtered(ROW_ID_SELECTION, vec![row_id]);
                self.data_path(&request)
            }
            ResolutionStrategy::ContentLookup => {
                self.data_path(&ContentRequest::data_column(reference.content_address()))
            }
            ResolutionStrategy::LocalFile { path } => Some(path),
            ResolutionStrategy::Unresolved(reason) => {
                warn!("Cannot resolve {}: {}", reference, reason);
                None
            }
        };

        let path = path.filter(|p| !p.as_os_str().is_empty());
        debug!("Resolved {} to {:?}", reference, path);
        path
    }

    pub fn file_from_reference(&self, reference: &ResourceReference) -> Option<FileTarget> {
        self.resolve_path(reference)
            .and_then(|path| FileTarget::new(path).ok())
    }

    /// [`resolve_path`](Self::resolve_path) for callers that want an error value
    pub fn require_path(&self, reference: &ResourceReference) -> FileIoResult<PathBuf> {
        self.resolve_path(reference)
            .ok_or_else(|| FileIoError::Unresolved(reference.to_string()))
    }

    fn data_path(&self, request: &ContentRequest) -> Option<PathBuf> {
        self.data_column(request).map(PathBuf::from)
    }

    /// First row's [`DATA_COLUMN`] value, or `None` if the query yields no
    /// rows, lacks the column, or fails.
    pub fn data_column(&self, request: &ContentRequest) -> Option<String> {
        match self.query.query(request) {
            Ok(rows) => rows.into_iter().next()?.remove(DATA_COLUMN).flatten(),
            Err(e) => {
                warn!("Content query on {} failed: {}", request.address, e);
                None
            }
        }
    }
}
