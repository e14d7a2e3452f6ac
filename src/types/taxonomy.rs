use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    pub name: String,
    pub codename: String,

    /// Child terms; the store only ever works with the top level.
    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySystem {
    pub id: String,
    pub name: String,
    pub codename: String,

    #[serde(default)]
    pub last_modified: Option<String>,
}

/// A taxonomy group as returned by the delivery API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomyGroup {
    pub system: TaxonomySystem,

    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_nested_terms() {
        let raw = r#"{
            "system": {
                "id": "f30c7f72-e9ab-8832-2a57-62944a038809",
                "name": "Manufacturer",
                "codename": "manufacturer",
                "last_modified": "2019-03-01T10:32:55.7145127Z"
            },
            "terms": [
                { "name": "Aerobie", "codename": "aerobie", "terms": [] },
                {
                    "name": "Hario",
                    "codename": "hario",
                    "terms": [{ "name": "Hario Europe", "codename": "hario_europe" }]
                }
            ]
        }"#;

        let group: TaxonomyGroup = serde_json::from_str(raw).unwrap();

        assert_eq!(group.system.codename, "manufacturer");
        assert_eq!(group.terms.len(), 2);
        assert_eq!(group.terms[1].codename, "hario");
        assert_eq!(group.terms[1].terms[0].codename, "hario_europe");
    }
}
