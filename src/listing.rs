// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bucketlist listing: full dumps, name search and pagination.
//!
//! Every list returned here is expanded with its items. A non-empty `q`
//! selects search mode and ignores `page`/`limit`; otherwise the request is
//! paginated.

use url::form_urlencoded;

use crate::error::ApiError;
use crate::storage::{
    Database, ItemRepository, ListRepository, StorageError, StorageResult, StoredItem, StoredList,
    UserId,
};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 20;
pub const MAX_LIMIT: usize = 100;

const NO_MATCH: &str = "Specified bucketlist is not available";

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("Specified bucketlist is not available")]
    NoMatch,

    #[error("Invalid limit value: {0}")]
    InvalidLimit(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ListingError> for ApiError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::NoMatch => ApiError::not_found(NO_MATCH),
            ListingError::InvalidLimit(_) => ApiError::validation(err.to_string()),
            ListingError::Storage(e) => ApiError::from(e),
        }
    }
}

/// Validated page window. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: usize,
    pub limit: usize,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageQuery {
    /// Parse raw query values.
    ///
    /// An absent, non-numeric or zero page falls back to the first page.
    /// An absent limit uses the default; a non-numeric or zero limit is
    /// rejected, and anything above [`MAX_LIMIT`] is clamped.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Result<Self, ListingError> {
        let page = page
            .and_then(|p| p.trim().parse::<usize>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PAGE);

        let limit = match limit.map(str::trim).filter(|l| !l.is_empty()) {
            None => DEFAULT_LIMIT,
            Some(raw) => match raw.parse::<usize>() {
                Ok(0) | Err(_) => return Err(ListingError::InvalidLimit(raw.to_string())),
                Ok(n) => n.min(MAX_LIMIT),
            },
        };

        Ok(Self { page, limit })
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// What a listing call should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingRequest {
    Search(String),
    Page(PageQuery),
}

impl ListingRequest {
    pub fn from_params(
        q: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, ListingError> {
        match q.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => Ok(ListingRequest::Search(query.to_string())),
            None => PageQuery::parse(page, limit).map(ListingRequest::Page),
        }
    }
}

/// A bucketlist together with its items in creation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListWithItems {
    pub list: StoredList,
    pub items: Vec<StoredItem>,
}

/// One page of bucketlists plus navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub lists: Vec<ListWithItems>,
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page: Option<String>,
    pub previous_page: Option<String>,
}

/// Result of [`ListingEngine::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Search(Vec<ListWithItems>),
    Page(PageResult),
}

pub struct ListingEngine<'a> {
    lists: ListRepository<'a>,
    items: ItemRepository<'a>,
    endpoint: &'a str,
}

impl<'a> ListingEngine<'a> {
    /// `endpoint` is the path navigation links point back to.
    pub fn new(db: &'a Database, endpoint: &'a str) -> Self {
        Self {
            lists: ListRepository::new(db),
            items: ItemRepository::new(db),
            endpoint,
        }
    }

    pub fn run(&self, owner_id: UserId, request: ListingRequest) -> Result<Listing, ListingError> {
        match request {
            ListingRequest::Search(query) => self.search(owner_id, &query).map(Listing::Search),
            ListingRequest::Page(query) => Ok(Listing::Page(self.paginate(owner_id, query)?)),
        }
    }

    /// Every bucketlist the owner has, with items.
    pub fn list_all(&self, owner_id: UserId) -> StorageResult<Vec<ListWithItems>> {
        let lists = self.lists.list_by_owner(owner_id)?;
        self.expand(owner_id, lists)
    }

    /// Owner's bucketlists whose name contains `query`, ignoring case.
    ///
    /// # Errors
    /// - `NoMatch` when nothing matches
    pub fn search(&self, owner_id: UserId, query: &str) -> Result<Vec<ListWithItems>, ListingError> {
        let needle = query.trim().to_lowercase();
        let matches: Vec<StoredList> = self
            .lists
            .list_by_owner(owner_id)?
            .into_iter()
            .filter(|list| list.name.to_lowercase().contains(&needle))
            .collect();

        if matches.is_empty() {
            tracing::debug!(owner_id, query, "Search matched no bucketlists");
            return Err(ListingError::NoMatch);
        }

        Ok(self.expand(owner_id, matches)?)
    }

    pub fn paginate(&self, owner_id: UserId, query: PageQuery) -> StorageResult<PageResult> {
        let (lists, total) = self
            .lists
            .page_by_owner(owner_id, query.offset(), query.limit)?;

        let pages = total.div_ceil(query.limit);
        let has_next = query.page < pages;
        let has_previous = query.page > 1;

        Ok(PageResult {
            lists: self.expand(owner_id, lists)?,
            page: query.page,
            limit: query.limit,
            total,
            has_next,
            has_previous,
            next_page: has_next.then(|| self.page_link(query.page + 1, query.limit)),
            previous_page: has_previous.then(|| self.page_link(query.page - 1, query.limit)),
        })
    }

    fn page_link(&self, page: usize, limit: usize) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string())
            .finish();
        format!("{}?{}", self.endpoint, query)
    }

    fn expand(&self, owner_id: UserId, lists: Vec<StoredList>) -> StorageResult<Vec<ListWithItems>> {
        let mut expanded = Vec::with_capacity(lists.len());
        for list in lists {
            match self.items.list_by_list(owner_id, list.id) {
                Ok(items) => expanded.push(ListWithItems { list, items }),
                // Deleted between the two reads.
                Err(StorageError::NotFound(_)) => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(expanded)
    }
}
