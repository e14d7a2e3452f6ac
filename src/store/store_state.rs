use std::collections::HashMap;

use crate::types::brewer::Brewer;
use crate::types::language_codes::LanguageCodes;
use crate::types::taxonomy::TaxonomyTerm;

/// Cached catalog content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoreState {
    pub brewers: HashMap<String, Vec<Brewer>>,
    pub manufacturers: Vec<TaxonomyTerm>,
    pub product_statuses: Vec<TaxonomyTerm>,
}

/// Empty cache: one brewer list per supported language, no taxonomy terms.
pub fn reset_store(languages: &LanguageCodes) -> StoreState {
    StoreState {
        brewers: languages.init_map(),
        manufacturers: Vec::new(),
        product_statuses: Vec::new(),
    }
}
