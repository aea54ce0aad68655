//! Response envelopes and list normalization.
//!
//! # Design
//! - Every server reply is wrapped as `{status, message, data}`.
//! - Paginated endpoints answer with one of two `data` shapes: the tuple
//!   `[rows, pageInfo]` or the record `{rows, pagination}`. [`ListPayload`] decodes
//!   either and [`ListPayload::normalize`] is the single place that maps them onto
//!   [`Pagination`].
//! - `perPage` is always the value the client asked for, never the server echo.

use serde::{Deserialize, Serialize};

/// Page size used before the caller asks for anything else.
pub const DEFAULT_PER_PAGE: u32 = 10;

const fn first_page() -> u32 {
    1
}

/// Standard `{status, message, data}` wrapper around a payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    /// Outcome marker, usually `"success"` or `"error"`.
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message suitable for a toast.
    #[serde(default)]
    pub message: Option<String>,
    /// Wrapped payload.
    pub data: T,
}

impl<T> ApiEnvelope<T> {
    /// Whether the server flagged the call as successful.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// Envelope for mutation replies where only the message matters.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageEnvelope {
    /// Outcome marker.
    #[serde(default)]
    pub status: Option<String>,
    /// Human-readable message suitable for a toast.
    #[serde(default)]
    pub message: Option<String>,
}

/// Pagination block as emitted by the server.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of rows across all pages.
    #[serde(default)]
    pub total: u64,
    /// Page the rows belong to.
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// Last available page.
    #[serde(default = "first_page")]
    pub last_page: u32,
}

impl Default for PageInfo {
    fn default() -> Self {
        Self {
            total: 0,
            current_page: 1,
            last_page: 1,
        }
    }
}

/// The two accepted `data` shapes of a paginated list reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListPayload<T> {
    /// `[rows, pageInfo]`
    Tuple(Vec<T>, PageInfo),
    /// `{rows, pagination}`; missing members fall back to an empty first page.
    Record {
        /// Rows on the current page.
        #[serde(default = "Vec::new")]
        rows: Vec<T>,
        /// Pagination block.
        #[serde(default)]
        pagination: PageInfo,
    },
}

impl<T> ListPayload<T> {
    /// Collapse either shape into rows plus client-side pagination state.
    #[must_use]
    pub fn normalize(self, requested_per_page: u32) -> ListPage<T> {
        let (items, info) = match self {
            Self::Tuple(rows, info) => (rows, info),
            Self::Record { rows, pagination } => (rows, pagination),
        };
        ListPage {
            items,
            pagination: Pagination {
                total: info.total,
                per_page: requested_per_page,
                current_page: info.current_page,
                last_page: info.last_page,
            },
        }
    }
}

/// Client-side pagination state held by every list store.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Total number of rows across all pages.
    pub total: u64,
    /// Requested page size.
    pub per_page: u32,
    /// Current page (1-based).
    pub current_page: u32,
    /// Last available page.
    pub last_page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            total: 0,
            per_page: DEFAULT_PER_PAGE,
            current_page: 1,
            last_page: 1,
        }
    }
}

impl Pagination {
    /// Fresh state using a custom page size.
    #[must_use]
    pub fn with_per_page(per_page: u32) -> Self {
        Self {
            per_page,
            ..Self::default()
        }
    }

    /// Apply caller overrides ahead of a fetch. Zero overrides are ignored.
    pub const fn apply(&mut self, request: PageRequest) {
        if let Some(page) = request.page
            && page > 0
        {
            self.current_page = page;
        }
        if let Some(per_page) = request.per_page
            && per_page > 0
        {
            self.per_page = per_page;
        }
    }

    /// Query parameters sent with a paginated `GET`.
    #[must_use]
    pub fn query(&self) -> Vec<(&'static str, String)> {
        vec![
            ("page", self.current_page.to_string()),
            ("per_page", self.per_page.to_string()),
        ]
    }
}

/// Optional `{page, perPage}` overrides accepted by fetch actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Page to load.
    pub page: Option<u32>,
    /// Page size to request.
    pub per_page: Option<u32>,
}

impl PageRequest {
    /// Request a specific page and size.
    #[must_use]
    pub const fn new(page: u32, per_page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
        }
    }

    /// Request a page, keeping the current size.
    #[must_use]
    pub const fn page(page: u32) -> Self {
        Self {
            page: Some(page),
            per_page: None,
        }
    }
}

/// Rows plus pagination produced by [`ListPayload::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    /// Rows on the current page.
    pub items: Vec<T>,
    /// Normalized pagination state.
    pub pagination: Pagination,
}

/// Non-paginated list reply: a bare array or `{data: [...]}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlainList<T> {
    /// Bare JSON array.
    Bare(Vec<T>),
    /// Array nested under `data`.
    Wrapped {
        /// Wrapped rows.
        data: Vec<T>,
    },
    /// Anything else; treated as an empty list.
    Other(serde_json::Value),
}

impl<T> PlainList<T> {
    /// Rows carried by the reply, empty when the shape is unrecognised.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Bare(rows) | Self::Wrapped { data: rows } => rows,
            Self::Other(_) => Vec::new(),
        }
    }
}

/// Full page metadata used by the notifications feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Page size.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
    /// Current page (1-based).
    #[serde(default = "first_page")]
    pub current_page: u32,
    /// Total number of rows.
    #[serde(default)]
    pub total: u64,
    /// Last available page.
    #[serde(default = "first_page")]
    pub last_page: u32,
    /// Index of the first row on this page.
    #[serde(default = "first_page_u64")]
    pub from: u64,
    /// Index of the last row on this page.
    #[serde(default)]
    pub to: u64,
    /// URL of the next page when one exists.
    #[serde(default)]
    pub next_page_url: Option<String>,
    /// Whether more pages follow.
    #[serde(default)]
    pub has_more_pages: bool,
}

const fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

const fn first_page_u64() -> u64 {
    1
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            current_page: 1,
            total: 0,
            last_page: 1,
            from: 1,
            to: 0,
            next_page_url: None,
            has_more_pages: false,
        }
    }
}
