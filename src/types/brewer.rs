use serde::{Deserialize, Serialize};

use crate::types::price::Price;
use crate::types::taxonomy::TaxonomyTerm;

/// A coffee brewer content item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brewer {
    pub system: ItemSystem,
    pub elements: BrewerElements,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSystem {
    pub id: String,
    pub name: String,
    pub codename: String,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(rename = "type")]
    pub content_type: String,

    #[serde(default)]
    pub last_modified: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrewerElements {
    pub product_name: Element<String>,

    /* NOTE: number elements come back as null when left empty in the CMS */
    pub price: Element<Option<Price>>,

    #[serde(default)]
    pub image: Element<Vec<Asset>>,

    #[serde(default)]
    pub short_description: Element<String>,

    #[serde(default)]
    pub long_description: Element<String>,

    pub manufacturer: Element<Vec<TaxonomyTerm>>,

    pub product_status: Element<Vec<TaxonomyTerm>>,

    pub url_pattern: Element<String>,
}

/// Delivery API element wrapper; only `value` is kept.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element<T> {
    pub value: T,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub name: String,
    pub url: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, rename = "type")]
    pub mime_type: Option<String>,

    #[serde(default)]
    pub size: Option<u64>,
}

impl Brewer {
    pub fn product_name(&self) -> &str {
        &self.elements.product_name.value
    }

    /// URL slug used for direct lookups.
    pub fn slug(&self) -> &str {
        &self.elements.url_pattern.value
    }

    pub fn price(&self) -> Option<Price> {
        self.elements.price.value
    }

    pub fn manufacturer_codenames(&self) -> impl Iterator<Item = &str> {
        self.elements
            .manufacturer
            .value
            .iter()
            .map(|term| term.codename.as_str())
    }

    pub fn product_status_codenames(&self) -> impl Iterator<Item = &str> {
        self.elements
            .product_status
            .value
            .iter()
            .map(|term| term.codename.as_str())
    }

    pub fn image_url(&self) -> Option<&str> {
        self.elements.image.value.first().map(|asset| asset.url.as_str())
    }
}
