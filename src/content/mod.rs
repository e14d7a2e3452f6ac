pub mod items_query;
pub mod responses;

use anyhow::Result;
use async_trait::async_trait;

use crate::content::items_query::ItemsQuery;
use crate::content::responses::{ItemsResponse, TaxonomyResponse};

/// Remote content the store reads brewers and taxonomies from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn items(&self, query: &ItemsQuery) -> Result<ItemsResponse>;
    async fn taxonomy(&self, group: &str) -> Result<TaxonomyResponse>;
}
