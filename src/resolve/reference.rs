//! Resource references
//!
//! An opaque locator for a file-like resource: scheme, the authority of
//! the provider that issued it, and a provider-specific identifier.

use std::fmt;

use url::Url;

use crate::error::{FileIoError, FileIoResult};

/// Kind of locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `file://`, the identifier is a filesystem path
    File,
    /// `content://`, a row in some content provider
    Content,
    /// `content://` shaped as `/document/<id>` or `/tree/<id>/document/<id>`
    Document,
    Other(String),
}

/// Immutable resource locator
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceReference {
    scheme: Scheme,
    authority: Option<String>,
    opaque_id: String,
}

impl ResourceReference {
    pub fn new(scheme: Scheme, authority: Option<String>, opaque_id: impl Into<String>) -> Self {
        Self {
            scheme,
            authority: authority.filter(|a| !a.is_empty()),
            opaque_id: opaque_id.into(),
        }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self::new(Scheme::File, None, path)
    }

    /// Generic content reference; `path` starts with `/`.
    pub fn content(authority: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Scheme::Content, Some(authority.into()), path)
    }

    pub fn document(authority: impl Into<String>, document_id: impl Into<String>) -> Self {
        Self::new(Scheme::Document, Some(authority.into()), document_id)
    }

    /// Parse a URI such as `content://<authority>/document/image%3A42` or `file:///a/b.png`.
    pub fn parse(uri: &str) -> FileIoResult<Self> {
        let url = Url::parse(uri).map_err(|e| {
            FileIoError::InvalidArgument(format!("malformed resource reference {uri}: {e}"))
        })?;
        let authority = url.host_str().map(str::to_string);

        let reference = match url.scheme() {
            "file" => Self::new(Scheme::File, authority, decode(url.path())?),
            "content" => match document_id(&url) {
                Some(encoded) => Self::new(Scheme::Document, authority, decode(encoded)?),
                None => Self::new(Scheme::Content, authority, url.path()),
            },
            other => Self::new(Scheme::Other(other.to_string()), authority, url.path()),
        };
        Ok(reference)
    }

    pub fn scheme(&self) -> &Scheme {
        &self.scheme
    }

    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }

    pub fn opaque_id(&self) -> &str {
        &self.opaque_id
    }

    /// Address a content query for this reference is issued against
    pub fn content_address(&self) -> String {
        let authority = self.authority().unwrap_or_default();
        match &self.scheme {
            Scheme::File => format!("file://{}", self.opaque_id),
            Scheme::Content => format!("content://{}{}", authority, self.opaque_id),
            Scheme::Document => format!(
                "content://{}/document/{}",
                authority,
                urlencoding::encode(&self.opaque_id)
            ),
            Scheme::Other(scheme) => format!("{}://{}{}", scheme, authority, self.opaque_id),
        }
    }
}

impl fmt::Display for ResourceReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content_address())
    }
}

fn document_id(url: &Url) -> Option<&str> {
    let segments: Vec<&str> = url.path_segments()?.collect();
    match segments.as_slice() {
        ["document", id] | ["tree", _, "document", id] if !id.is_empty() => Some(*id),
        _ => None,
    }
}

fn decode(encoded: &str) -> FileIoResult<String> {
    urlencoding::decode(encoded)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| FileIoError::InvalidArgument(format!("bad escape in {encoded}: {e}")))
}
