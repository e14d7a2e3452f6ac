use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::content::ContentSource;
use crate::content::items_query::ItemsQuery;
use crate::content::responses::{ItemsResponse, TaxonomyResponse};
use crate::kontent::kontent_config::KontentConfig;

/// Delivery API client.
#[derive(Clone, Debug)]
pub struct KontentClient {
    http: reqwest::Client,
    base_url: Url,
    preview_api_key: Option<String>,
}

impl KontentClient {
    pub fn new(config: KontentConfig) -> Result<Self> {
        let base = format!(
            "{}/{}/",
            config.delivery_url.trim_end_matches('/'),
            config.project_id
        );
        let base_url =
            Url::parse(&base).with_context(|| format!("invalid delivery url {base}"))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            preview_api_key: config.preview_api_key,
        })
    }

    fn items_url(&self, query: &ItemsQuery) -> Result<Url> {
        let mut url = self.base_url.join("items").context("build items url failed")?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());

        Ok(url)
    }

    fn taxonomy_url(&self, group: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("delivery url cannot be a base"))?
            .pop_if_empty()
            .extend(["taxonomies", group]);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        tracing::debug!(%url, "delivery GET");

        let mut request = self.http.get(url.clone());
        if let Some(key) = &self.preview_api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .with_context(|| format!("delivery GET {url} failed"))?;

        let status = resp.status();
        let text = resp.text().await.context("read response body failed")?;

        if !status.is_success() {
            match serde_json::from_str::<DeliveryError>(&text) {
                Ok(error) => anyhow::bail!(
                    "delivery api error {status} (code {}, request {}): {}",
                    error.error_code,
                    error.request_id,
                    error.message
                ),
                Err(_) => anyhow::bail!("delivery http error {status}: {text}"),
            }
        }

        match serde_json::from_str(&text) {
            Ok(parsed) => Ok(parsed),
            Err(e) => {
                tracing::error!(error = %e, %url, "failed to parse delivery JSON response");
                anyhow::bail!("parse delivery response JSON failed: {e}");
            }
        }
    }
}

#[async_trait]
impl ContentSource for KontentClient {
    async fn items(&self, query: &ItemsQuery) -> Result<ItemsResponse> {
        let url = self.items_url(query)?;
        let response: ItemsResponse = self.get_json(url).await?;

        tracing::debug!(
            count = response.items.len(),
            total = ?response.pagination.as_ref().map(|page| page.count),
            language = ?query.language_code(),
            "items received"
        );

        Ok(response)
    }

    async fn taxonomy(&self, group: &str) -> Result<TaxonomyResponse> {
        let url = self.taxonomy_url(group)?;

        self.get_json(url).await
    }
}

#[derive(Debug, Deserialize)]
struct DeliveryError {
    message: String,

    #[serde(default)]
    request_id: String,

    #[serde(default)]
    error_code: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::items_query::SortOrder;

    fn client(delivery_url: &str) -> KontentClient {
        KontentClient::new(KontentConfig {
            project_id: "975bf280-fd91-488c-994c-2f04416e5ee3".to_string(),
            delivery_url: delivery_url.to_string(),
            preview_api_key: None,
        })
        .unwrap()
    }

    #[test]
    fn items_url_carries_query_pairs() {
        let query = ItemsQuery::new()
            .content_type("brewer")
            .order_by("elements.product_name", SortOrder::Ascending)
            .language("es-ES");

        let url = client("https://deliver.kontent.ai/").items_url(&query).unwrap();

        assert_eq!(url.path(), "/975bf280-fd91-488c-994c-2f04416e5ee3/items");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, query.to_query_pairs());
    }

    #[test]
    fn taxonomy_url_names_the_group() {
        let url = client("https://deliver.kontent.ai")
            .taxonomy_url("product_status")
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://deliver.kontent.ai/975bf280-fd91-488c-994c-2f04416e5ee3/taxonomies/product_status"
        );
    }

    #[test]
    fn rejects_invalid_delivery_url() {
        let result = KontentClient::new(KontentConfig {
            project_id: "project".to_string(),
            delivery_url: "not a url".to_string(),
            preview_api_key: None,
        });

        assert!(result.is_err());
    }
}
