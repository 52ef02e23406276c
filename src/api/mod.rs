pub mod fixture;
pub mod http;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ApiConfig;
use crate::error::AppError;
use crate::models::{Credito, PageResponse};

/// Read-only access to the credit API. Failures are surfaced unchanged;
/// a missing record is `AppError::Status { status: 404 }`.
#[async_trait]
pub trait CreditoApi: Send + Sync {
    async fn lookup_by_credit_number(&self, numero: &str) -> Result<Credito, AppError>;
    async fn lookup_by_invoice_number(&self, nfse: &str) -> Result<Credito, AppError>;
    async fn search_by_term(&self, termo: &str) -> Result<PageResponse<Credito>, AppError>;
}

/// Build the access layer selected on the command line.
pub fn build_api(config: &ApiConfig, demo: bool) -> anyhow::Result<Arc<dyn CreditoApi>> {
    if demo {
        tracing::info!("Using built-in demo records");
        return Ok(Arc::new(fixture::FixtureApi::demo()));
    }
    Ok(Arc::new(http::HttpCreditoApi::new(config)?))
}
