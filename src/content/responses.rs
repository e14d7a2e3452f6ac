use serde::Deserialize;

use crate::types::brewer::Brewer;
use crate::types::taxonomy::TaxonomyGroup;

#[derive(Debug, Clone, Deserialize)]
pub struct ItemsResponse {
    pub items: Vec<Brewer>,

    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Pagination {
    pub count: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TaxonomyResponse {
    #[serde(flatten)]
    pub taxonomy: TaxonomyGroup,
}
