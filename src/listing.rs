use crate::filter::brewer_filter::Filter;
use crate::types::brewer::Brewer;
use crate::types::price_range::PriceRange;
use crate::types::taxonomy::TaxonomyTerm;

/// How many brewers fall under one facet value.
#[derive(Debug, Clone, PartialEq)]
pub struct FacetCount {
    pub label: String,
    pub count: usize,
    pub selected: bool,
}

pub fn filter_summary(filter: &Filter) -> String {
    if filter.is_empty() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if !filter.manufacturers().is_empty() {
        parts.push(format!("manufacturer {}", filter.manufacturers().join(" | ")));
    }
    if !filter.price_ranges().is_empty() {
        let ranges: Vec<String> = filter.price_ranges().iter().map(|r| r.to_string()).collect();
        parts.push(format!("price {}", ranges.join(" | ")));
    }
    if !filter.product_statuses().is_empty() {
        parts.push(format!("status {}", filter.product_statuses().join(" | ")));
    }

    parts.join(" & ")
}

pub fn brewer_line(brewer: &Brewer) -> String {
    let price = match brewer.price() {
        Some(price) => price.to_string(),
        None => "-".to_string(),
    };
    let manufacturers: Vec<&str> = brewer.manufacturer_codenames().collect();
    let statuses: Vec<&str> = brewer.product_status_codenames().collect();

    format!(
        "{:<32} {:>9}  [{}] [{}]  /{}",
        brewer.product_name(),
        price,
        manufacturers.join(", "),
        statuses.join(", "),
        brewer.slug()
    )
}

pub fn brewer_details(brewer: &Brewer) -> Vec<String> {
    let mut lines = vec![
        brewer_line(brewer),
        format!("codename: {}", brewer.system.codename),
    ];

    if let Some(language) = &brewer.system.language {
        lines.push(format!("language: {language}"));
    }
    if let Some(url) = brewer.image_url() {
        lines.push(format!("image: {url}"));
    }
    if !brewer.elements.short_description.value.is_empty() {
        lines.push(format!("summary: {}", brewer.elements.short_description.value));
    }

    lines
}

pub fn manufacturer_counts(
    terms: &[TaxonomyTerm],
    brewers: &[Brewer],
    selected: &[String],
) -> Vec<FacetCount> {
    term_counts(terms, selected, |term| {
        brewers
            .iter()
            .filter(|brewer| brewer.manufacturer_codenames().any(|c| c == term.codename))
            .count()
    })
}

pub fn product_status_counts(
    terms: &[TaxonomyTerm],
    brewers: &[Brewer],
    selected: &[String],
) -> Vec<FacetCount> {
    term_counts(terms, selected, |term| {
        brewers
            .iter()
            .filter(|brewer| brewer.product_status_codenames().any(|c| c == term.codename))
            .count()
    })
}

pub fn price_range_counts(
    ranges: &[PriceRange],
    brewers: &[Brewer],
    selected: &[PriceRange],
) -> Vec<FacetCount> {
    ranges
        .iter()
        .map(|range| FacetCount {
            label: range.to_string(),
            count: brewers
                .iter()
                .filter(|brewer| brewer.price().is_some_and(|price| range.contains(price)))
                .count(),
            selected: selected.contains(range),
        })
        .collect()
}

fn term_counts(
    terms: &[TaxonomyTerm],
    selected: &[String],
    count: impl Fn(&TaxonomyTerm) -> usize,
) -> Vec<FacetCount> {
    terms
        .iter()
        .map(|term| FacetCount {
            label: format!("{} ({})", term.name, term.codename),
            count: count(term),
            selected: selected.contains(&term.codename),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::brewer::fixtures::brewer;
    use crate::types::taxonomy::fixtures::term;

    fn brewers() -> Vec<Brewer> {
        vec![
            brewer("aeropress", 30.0, &["aerobie"], &["bestseller"]),
            brewer("v60", 25.0, &["hario"], &["bestseller", "on_sale"]),
            brewer("chemex", 45.0, &["chemex"], &[]),
        ]
    }

    #[test]
    fn line_shows_price_facets_and_slug() {
        let line = brewer_line(&brewer("v60", 25.0, &["hario"], &["bestseller", "on_sale"]));

        assert!(line.starts_with("V60"));
        assert!(line.contains("25.00"));
        assert!(line.contains("[hario] [bestseller, on_sale]"));
        assert!(line.ends_with("/v60"));
    }

    #[test]
    fn counts_brewers_per_term_and_marks_selection() {
        let terms = vec![term("Hario", "hario"), term("Bodum", "bodum")];

        let counts = manufacturer_counts(&terms, &brewers(), &["bodum".to_string()]);

        assert_eq!(
            counts[0],
            FacetCount {
                label: "Hario (hario)".to_string(),
                count: 1,
                selected: false,
            }
        );
        assert_eq!(counts[1].count, 0);
        assert!(counts[1].selected);

        let statuses = product_status_counts(&[term("Bestseller", "bestseller")], &brewers(), &[]);
        assert_eq!(statuses[0].count, 2);
        assert!(!statuses[0].selected);
    }

    #[test]
    fn counts_brewers_per_price_range() {
        let ranges = vec![PriceRange::new(0.0, 30.0), PriceRange::new(30.0, 50.0)];

        let counts = price_range_counts(&ranges, &brewers(), &[PriceRange::new(30.0, 50.0)]);

        assert_eq!(counts[0].label, "0.00-30.00");
        assert_eq!(counts[0].count, 2);
        assert!(!counts[0].selected);
        assert_eq!(counts[1].count, 2);
        assert!(counts[1].selected);
    }

    #[test]
    fn summarizes_selected_facets() {
        let mut filter = Filter::new();
        assert_eq!(filter_summary(&filter), "none");

        filter.toggle_manufacturer("hario");
        filter.toggle_manufacturer("chemex");
        filter.toggle_price_range(PriceRange::new(20.0, 40.0));
        filter.toggle_product_status("on_sale");

        assert_eq!(
            filter_summary(&filter),
            "manufacturer hario | chemex & price 20.00-40.00 & status on_sale"
        );
    }

    #[test]
    fn details_include_codename_and_summary() {
        let lines = brewer_details(&brewer("hario-v60", 25.0, &["hario"], &[]));

        assert!(lines.contains(&"codename: hario_v60".to_string()));
        assert!(lines.contains(&"language: en-US".to_string()));
        assert!(lines.contains(&"summary: <p>Short</p>".to_string()));
    }
}
