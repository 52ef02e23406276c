use std::time::Duration;

use reqwest::Url;

use crate::error::AppError;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const API_BASE_PATH: &str = "/api/v1/creditos";
pub const USER_AGENT: &str = "credito-busca";

/// Term search always asks for the first page of up to 100 records.
pub const TERM_PAGE: u32 = 0;
pub const TERM_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_url: String,
    pub timeout: Option<Duration>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ApiConfig {
    /// The server URL with the credit resource path appended.
    pub fn base_url(&self) -> Result<Url, AppError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        if url.query().is_some() || url.fragment().is_some() {
            return Err(AppError::InvalidUrl(format!(
                "{}: query and fragment are not allowed",
                self.api_url
            )));
        }

        url.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(format!("{}: not a base URL", self.api_url)))?
            .pop_if_empty()
            .extend(API_BASE_PATH.split('/').filter(|s| !s.is_empty()));
        Ok(url)
    }
}
