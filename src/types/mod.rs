pub mod brewer;
pub mod language_codes;
pub mod price;
pub mod price_range;
pub mod taxonomy;
