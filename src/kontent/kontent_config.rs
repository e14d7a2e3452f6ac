use std::env;

pub const DELIVERY_URL: &str = "https://deliver.kontent.ai";
pub const PREVIEW_DELIVERY_URL: &str = "https://preview-deliver.kontent.ai";

#[derive(Clone)]
pub struct KontentConfig {
    pub project_id: String,
    pub delivery_url: String,
    pub preview_api_key: Option<String>,
}

impl KontentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let project_id = env::var("KONTENT_PROJECT_ID")
            .map_err(|_| anyhow::anyhow!("KONTENT_PROJECT_ID not set"))?;

        let preview_api_key = env::var("KONTENT_PREVIEW_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let delivery_url = env::var("KONTENT_DELIVERY_URL").unwrap_or_else(|_| {
            match preview_api_key {
                Some(_) => PREVIEW_DELIVERY_URL.to_string(),
                None => DELIVERY_URL.to_string(),
            }
        });

        Ok(Self {
            project_id,
            delivery_url,
            preview_api_key,
        })
    }
}

impl std::fmt::Debug for KontentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KontentConfig")
            .field("project_id", &self.project_id)
            .field("delivery_url", &self.delivery_url)
            .field("preview", &self.preview_api_key.is_some())
            .finish()
    }
}
