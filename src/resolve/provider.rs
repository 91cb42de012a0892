//! Provider dispatch
//!
//! Decides how a [`ResourceReference`] maps to a filesystem path, based on
//! its scheme and the provider family its authority belongs to.

use std::fmt;
use std::path::PathBuf;

use crate::config::ProviderConfig;
use crate::resolve::reference::{ResourceReference, Scheme};

pub const EXTERNAL_STORAGE_AUTHORITY: &str = "com.android.externalstorage.documents";
pub const DOWNLOADS_AUTHORITY: &str = "com.android.providers.downloads.documents";
pub const MEDIA_AUTHORITY: &str = "com.android.providers.media.documents";

const PRIMARY_VOLUME: &str = "primary";

/// Backing system that issued a document reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFamily {
    ExternalStorage,
    Downloads,
    Media,
    Generic,
}

impl ProviderFamily {
    pub fn from_authority(authority: Option<&str>) -> Self {
        match authority {
            Some(EXTERNAL_STORAGE_AUTHORITY) => ProviderFamily::ExternalStorage,
            Some(DOWNLOADS_AUTHORITY) => ProviderFamily::Downloads,
            Some(MEDIA_AUTHORITY) => ProviderFamily::Media,
            _ => ProviderFamily::Generic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaCollection {
    Image,
    Video,
    Audio,
}

impl MediaCollection {
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        match media_type {
            "image" => Some(MediaCollection::Image),
            "video" => Some(MediaCollection::Video),
            "audio" => Some(MediaCollection::Audio),
            _ => None,
        }
    }

    pub fn address<'a>(&self, providers: &'a ProviderConfig) -> &'a str {
        match self {
            MediaCollection::Image => &providers.image_collection_address,
            MediaCollection::Video => &providers.video_collection_address,
            MediaCollection::Audio => &providers.audio_collection_address,
        }
    }
}

/// How a reference is turned into a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Relative path on the primary external volume
    PrimaryVolume { relative_path: String },
    /// Row of the public downloads table
    Downloads { row_id: u64 },
    /// Row of one of the media collections
    Media {
        collection: MediaCollection,
        row_id: String,
    },
    /// Query the reference's own provider, unfiltered
    ContentLookup,
    /// The identifier already is the path
    LocalFile { path: PathBuf },
    Unresolved(UnresolvedReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// Only the primary storage volume is mapped
    SecondaryVolume(String),
    MalformedDocumentId(String),
    UnknownMediaType(String),
    UnknownDocumentProvider(Option<String>),
    UnsupportedScheme(String),
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::SecondaryVolume(v) => write!(f, "volume {} is not mapped", v),
            UnresolvedReason::MalformedDocumentId(id) => write!(f, "malformed document id {}", id),
            UnresolvedReason::UnknownMediaType(t) => write!(f, "unknown media type {}", t),
            UnresolvedReason::UnknownDocumentProvider(a) => {
                write!(f, "unknown document provider {}", a.as_deref().unwrap_or("<none>"))
            }
            UnresolvedReason::UnsupportedScheme(s) => write!(f, "unsupported scheme {}", s),
        }
    }
}

/// Pick the resolution strategy for `reference`.
pub fn classify(reference: &ResourceReference) -> ResolutionStrategy {
    match reference.scheme() {
        Scheme::Document => classify_document(reference),
        Scheme::Content => ResolutionStrategy::ContentLookup,
        Scheme::File => ResolutionStrategy::LocalFile {
            path: PathBuf::from(reference.opaque_id()),
        },
        Scheme::Other(scheme) => {
            ResolutionStrategy::Unresolved(UnresolvedReason::UnsupportedScheme(scheme.clone()))
        }
    }
}

fn classify_document(reference: &ResourceReference) -> ResolutionStrategy {
    let document_id = reference.opaque_id();
    let malformed =
        || ResolutionStrategy::Unresolved(UnresolvedReason::MalformedDocumentId(document_id.into()));

    match ProviderFamily::from_authority(reference.authority()) {
        ProviderFamily::ExternalStorage => {
            let Some((volume, relative_path)) = document_id.split_once(':') else {
                return malformed();
            };
            if volume.eq_ignore_ascii_case(PRIMARY_VOLUME) {
                ResolutionStrategy::PrimaryVolume {
                    relative_path: relative_path.to_string(),
                }
            } else {
                ResolutionStrategy::Unresolved(UnresolvedReason::SecondaryVolume(volume.into()))
            }
        }
        ProviderFamily::Downloads => match document_id.parse::<u64>() {
            Ok(row_id) => ResolutionStrategy::Downloads { row_id },
            Err(_) => malformed(),
        },
        ProviderFamily::Media => {
            let Some((media_type, row_id)) = document_id.split_once(':') else {
                return malformed();
            };
            match MediaCollection::from_media_type(media_type) {
                Some(collection) => ResolutionStrategy::Media {
                    collection,
                    row_id: row_id.to_string(),
                },
                None => ResolutionStrategy::Unresolved(UnresolvedReason::UnknownMediaType(
                    media_type.into(),
                )),
            }
        }
        ProviderFamily::Generic => ResolutionStrategy::Unresolved(
            UnresolvedReason::UnknownDocumentProvider(reference.authority().map(str::to_string)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_volume_is_case_insensitive() {
        let reference = ResourceReference::document(EXTERNAL_STORAGE_AUTHORITY, "PRIMARY:Music/a.mp3");
        assert_eq!(
            classify(&reference),
            ResolutionStrategy::PrimaryVolume {
                relative_path: "Music/a.mp3".into()
            }
        );
    }

    #[test]
    fn secondary_volume_is_unresolved() {
        let reference = ResourceReference::document(EXTERNAL_STORAGE_AUTHORITY, "1234-ABCD:a.txt");
        assert_eq!(
            classify(&reference),
            ResolutionStrategy::Unresolved(UnresolvedReason::SecondaryVolume("1234-ABCD".into()))
        );
    }

    #[test]
    fn non_numeric_download_id_is_malformed() {
        let reference = ResourceReference::document(DOWNLOADS_AUTHORITY, "raw:/x");
        assert!(matches!(
            classify(&reference),
            ResolutionStrategy::Unresolved(UnresolvedReason::MalformedDocumentId(_))
        ));
    }

    #[test]
    fn media_document_without_type_is_malformed() {
        let reference = ResourceReference::document(MEDIA_AUTHORITY, "42");
        assert!(matches!(
            classify(&reference),
            ResolutionStrategy::Unresolved(UnresolvedReason::MalformedDocumentId(_))
        ));
    }

    #[test]
    fn unknown_document_provider_is_unresolved() {
        let reference = ResourceReference::document("com.example.docs", "abc");
        assert!(matches!(
            classify(&reference),
            ResolutionStrategy::Unresolved(UnresolvedReason::UnknownDocumentProvider(Some(_)))
        ));
    }
}
