//! Remote plant catalog.
//!
//! The catalog is a json-server style REST API: list endpoints accept
//! `_sort`, `_order`, `_page` and `_limit` query parameters and answer with a
//! JSON array. There is no caching, dedup, or retry at this layer.

mod client;

pub use client::HttpCatalogClient;

use std::fmt;

use crate::error::Result;
use crate::models::{Environment, Plant, PlantId};

pub const ENVIRONMENTS_RESOURCE: &str = "plants_environments";
pub const PLANTS_RESOURCE: &str = "plants";

/// Sort direction of a list query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => f.write_str("asc"),
            Self::Desc => f.write_str("desc"),
        }
    }
}

/// A list request against one catalog resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub resource: String,
    pub sort: Option<(String, SortOrder)>,
    /// 1-based page number and page size
    pub page: Option<(u32, u32)>,
}

impl ListQuery {
    pub fn new(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            sort: None,
            page: None,
        }
    }

    #[must_use]
    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some((field.into(), order));
        self
    }

    #[must_use]
    pub const fn paginated(mut self, page: u32, limit: u32) -> Self {
        self.page = Some((page, limit));
        self
    }

    /// Relative request path, e.g. `plants?_sort=name&_order=asc&_page=1&_limit=8`
    pub fn to_path(&self) -> String {
        let mut params = Vec::new();
        if let Some((field, order)) = &self.sort {
            params.push(format!("_sort={field}"));
            params.push(format!("_order={order}"));
        }
        if let Some((page, limit)) = self.page {
            params.push(format!("_page={page}"));
            params.push(format!("_limit={limit}"));
        }

        if params.is_empty() {
            self.resource.clone()
        } else {
            format!("{}?{}", self.resource, params.join("&"))
        }
    }
}

/// Environments, sorted by title.
pub fn environments_query() -> ListQuery {
    ListQuery::new(ENVIRONMENTS_RESOURCE).sorted_by("title", SortOrder::Asc)
}

/// One page of plants, sorted by name.
pub fn plants_query(page: u32, limit: u32) -> ListQuery {
    ListQuery::new(PLANTS_RESOURCE)
        .sorted_by("name", SortOrder::Asc)
        .paginated(page, limit)
}

/// Read access to the plant catalog
#[allow(async_fn_in_trait)]
pub trait PlantCatalog {
    /// All environments as published by the server (no `all` sentinel)
    async fn fetch_environments(&self) -> Result<Vec<Environment>>;

    /// One page of plants; `page` is 1-based
    async fn fetch_plants(&self, page: u32, limit: u32) -> Result<Vec<Plant>>;

    /// A single plant by id
    async fn fetch_plant(&self, id: &PlantId) -> Result<Plant>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environments_query_path() {
        assert_eq!(
            environments_query().to_path(),
            "plants_environments?_sort=title&_order=asc"
        );
    }

    #[test]
    fn plants_query_path() {
        assert_eq!(
            plants_query(3, 8).to_path(),
            "plants?_sort=name&_order=asc&_page=3&_limit=8"
        );
    }

    #[test]
    fn bare_query_path() {
        assert_eq!(ListQuery::new("plants").to_path(), "plants");
        assert_eq!(
            ListQuery::new("plants")
                .sorted_by("name", SortOrder::Desc)
                .to_path(),
            "plants?_sort=name&_order=desc"
        );
    }
}
