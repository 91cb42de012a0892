//! Resource resolution
//!
//! Maps opaque resource references to filesystem paths.

pub mod provider;
pub mod query;
pub mod reference;
pub mod resolver;

pub use provider::{
    DOWNLOADS_AUTHORITY, EXTERNAL_STORAGE_AUTHORITY, MEDIA_AUTHORITY, MediaCollection,
    ProviderFamily, ResolutionStrategy, UnresolvedReason, classify,
};
pub use query::{
    ContentQuery, ContentRequest, ContentRow, ContentStreams, DATA_COLUMN, ROW_ID_SELECTION,
};
pub use reference::{ResourceReference, Scheme};
pub use resolver::ResourceResolver;
