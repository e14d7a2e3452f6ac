use crate::types::brewer::Brewer;
use crate::types::price_range::PriceRange;

/// Facet selection for the brewer catalog.
///
/// Each facet is a set of selected values. An empty facet places no
/// restriction; a non-empty one requires the brewer to hit at least one of
/// its values. A brewer matches when it passes every facet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    manufacturers: Vec<String>,
    price_ranges: Vec<PriceRange>,
    product_statuses: Vec<String>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn matches(&self, brewer: &Brewer) -> bool {
        self.matches_manufacturers(brewer)
            && self.matches_price_ranges(brewer)
            && self.matches_product_statuses(brewer)
    }

    pub fn matches_manufacturers(&self, brewer: &Brewer) -> bool {
        if self.manufacturers.is_empty() {
            return true;
        }

        brewer
            .manufacturer_codenames()
            .any(|codename| self.manufacturers.iter().any(|selected| selected == codename))
    }

    pub fn matches_price_ranges(&self, brewer: &Brewer) -> bool {
        if self.price_ranges.is_empty() {
            return true;
        }

        let Some(price) = brewer.price() else {
            return false;
        };

        self.price_ranges.iter().any(|range| range.contains(price))
    }

    pub fn matches_product_statuses(&self, brewer: &Brewer) -> bool {
        if self.product_statuses.is_empty() {
            return true;
        }

        brewer
            .product_status_codenames()
            .any(|codename| self.product_statuses.iter().any(|selected| selected == codename))
    }

    pub fn toggle_manufacturer(&mut self, manufacturer: impl Into<String>) {
        toggle(&mut self.manufacturers, manufacturer.into());
    }

    pub fn toggle_price_range(&mut self, price_range: PriceRange) {
        toggle(&mut self.price_ranges, price_range);
    }

    pub fn toggle_product_status(&mut self, product_status: impl Into<String>) {
        toggle(&mut self.product_statuses, product_status.into());
    }

    pub fn manufacturers(&self) -> &[String] {
        &self.manufacturers
    }

    pub fn price_ranges(&self) -> &[PriceRange] {
        &self.price_ranges
    }

    pub fn product_statuses(&self) -> &[String] {
        &self.product_statuses
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
            && self.price_ranges.is_empty()
            && self.product_statuses.is_empty()
    }

    /// Matching brewers, in their original order.
    pub fn apply(&self, brewers: &[Brewer]) -> Vec<Brewer> {
        brewers
            .iter()
            .filter(|brewer| self.matches(brewer))
            .cloned()
            .collect()
    }
}

fn toggle<T: PartialEq>(selected: &mut Vec<T>, value: T) {
    match selected.iter().position(|existing| *existing == value) {
        Some(index) => {
            selected.remove(index);
        }
        None => selected.push(value),
    }
}
