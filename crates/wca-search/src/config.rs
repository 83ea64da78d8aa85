use std::path::{Path, PathBuf};

use wca_common::wca_api::WcaClientConfig;

use crate::error::AppError;

const DEFAULT_REGULATIONS_PATH: &str = "data/wca-regulations.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub client: WcaClientConfig,
    pub regulations_path: String,
}

impl Config {
    /// Optional:
    /// - `WCA_REGULATIONS_PATH` (default: "data/wca-regulations.json"; the file must exist)
    /// - everything read by [`WcaClientConfig::from_env`]
    pub fn from_env() -> Result<Self, AppError> {
        let regulations_path = std::env::var("WCA_REGULATIONS_PATH")
            .unwrap_or_else(|_| DEFAULT_REGULATIONS_PATH.to_string());

        if !Path::new(&regulations_path).exists() {
            return Err(AppError::Config(format!(
                "required file not found: {regulations_path} (set WCA_REGULATIONS_PATH)"
            )));
        }

        let client = WcaClientConfig::from_env();
        if !client.base_url.starts_with("http://") && !client.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "WCA_BASE_URL must be an http(s) URL, got '{}'",
                client.base_url
            )));
        }

        Ok(Self {
            client,
            regulations_path,
        })
    }

    pub fn regulations_path(&self) -> PathBuf {
        Path::new(&self.regulations_path).to_path_buf()
    }

    pub fn site(&self) -> SiteUrls {
        SiteUrls::new(&self.client.base_url)
    }
}

/// Website locations baked into rendered cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    pub base_url: String,
    pub logo_url: String,
}

impl SiteUrls {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let logo_url = format!("{base_url}/files/WCAlogo_notext.svg");
        Self { base_url, logo_url }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn site_urls_derive_logo_from_base() {
        let site = SiteUrls::new("https://www.worldcubeassociation.org/");
        assert_eq!(site.base_url, "https://www.worldcubeassociation.org");
        assert_eq!(
            site.logo_url,
            "https://www.worldcubeassociation.org/files/WCAlogo_notext.svg"
        );
    }
}
