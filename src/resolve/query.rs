//! Content provider capabilities
//!
//! The resolver never talks to a platform provider directly. It issues
//! [`ContentRequest`]s through [`ContentQuery`], and streams resources
//! through [`ContentStreams`], so both can be backed by fakes.

use std::collections::HashMap;
use std::io::{self, Read};

use crate::resolve::reference::ResourceReference;

/// Column holding the raw filesystem path of a provider row
pub const DATA_COLUMN: &str = "_data";

/// Selection filtering a collection by row id
pub const ROW_ID_SELECTION: &str = "_id=?";

/// One row of a query result, keyed by column name
pub type ContentRow = HashMap<String, Option<String>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentRequest {
    pub address: String,
    pub projection: Vec<String>,
    pub selection: Option<String>,
    pub selection_args: Vec<String>,
}

impl ContentRequest {
    /// Unfiltered request for the [`DATA_COLUMN`] of `address`
    pub fn data_column(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            projection: vec![DATA_COLUMN.to_string()],
            selection: None,
            selection_args: Vec::new(),
        }
    }

    pub fn filtered(mut self, selection: &str, selection_args: Vec<String>) -> Self {
        self.selection = Some(selection.to_string());
        self.selection_args = selection_args;
        self
    }
}

/// Queries a content provider
pub trait ContentQuery {
    fn query(&self, request: &ContentRequest) -> io::Result<Vec<ContentRow>>;
}

impl<T: ContentQuery + ?Sized> ContentQuery for &T {
    fn query(&self, request: &ContentRequest) -> io::Result<Vec<ContentRow>> {
        (**self).query(request)
    }
}

/// Opens the byte stream behind a resource reference
pub trait ContentStreams {
    fn open_stream(&self, reference: &ResourceReference) -> io::Result<Box<dyn Read>>;
}
