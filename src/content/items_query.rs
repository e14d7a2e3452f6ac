use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ascending => write!(f, "asc"),
        }
    }
}

/// Listing query for content items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsQuery {
    content_type: Option<String>,
    order: Option<(String, SortOrder)>,
    language: Option<String>,
}

impl ItemsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.order = Some((field.into(), order));
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Delivery API query string pairs, in a stable order.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(3);

        if let Some(content_type) = &self.content_type {
            pairs.push(("system.type".to_string(), content_type.clone()));
        }
        if let Some((field, order)) = &self.order {
            pairs.push(("order".to_string(), format!("{field}[{order}]")));
        }
        if let Some(language) = &self.language {
            pairs.push(("language".to_string(), language.clone()));
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_type_order_and_language() {
        let query = ItemsQuery::new()
            .content_type("brewer")
            .order_by("elements.product_name", SortOrder::Ascending)
            .language("es-ES");

        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("system.type".to_string(), "brewer".to_string()),
                ("order".to_string(), "elements.product_name[asc]".to_string()),
                ("language".to_string(), "es-ES".to_string()),
            ]
        );
    }

    #[test]
    fn language_is_omitted_when_not_set() {
        let query = ItemsQuery::new()
            .content_type("brewer")
            .order_by("elements.price", SortOrder::Ascending);

        let pairs = query.to_query_pairs();

        assert_eq!(query.language_code(), None);
        assert!(pairs.iter().all(|(key, _)| key != "language"));
        assert!(pairs.contains(&("order".to_string(), "elements.price[asc]".to_string())));
    }
}
