use async_trait::async_trait;
use rust_decimal::Decimal;

use super::CreditoApi;
use crate::config::TERM_PAGE_SIZE;
use crate::error::AppError;
use crate::models::{Credito, PageResponse};

/// In-memory credit API for offline use (`--demo`) and tests.
/// Unknown keys answer like the server does: HTTP 404.
pub struct FixtureApi {
    records: Vec<Credito>,
}

impl FixtureApi {
    pub fn new(records: Vec<Credito>) -> Self {
        Self { records }
    }

    pub fn demo() -> Self {
        Self::new(vec![
            Credito {
                id: Some(1),
                numero_credito_constituido: "123456".into(),
                numero_nfse: "7891011".into(),
                data_constituicao: "2024-02-25".into(),
                valor_issqn: Some(Decimal::new(150075, 2)),
                tipo_credito: "ISSQN".into(),
                descricao: None,
                status: "ATIVO".into(),
                data_registro: Some("2024-02-25T10:15:30".into()),
                data_atualizacao: None,
                responsavel: Some("Maria Souza".into()),
                cnpj_empresa: Some("12.345.678/0001-90".into()),
            },
            Credito {
                id: Some(2),
                numero_credito_constituido: "789012".into(),
                numero_nfse: "7891012".into(),
                data_constituicao: "2024-02-26".into(),
                valor_issqn: Some(Decimal::new(120050, 2)),
                tipo_credito: "COMPLEMENTAR".into(),
                descricao: Some("Complemento de ISSQN".into()),
                status: "PENDENTE".into(),
                data_registro: Some("2024-02-26T09:00:00".into()),
                data_atualizacao: Some("2024-03-01T14:20:00".into()),
                responsavel: None,
                cnpj_empresa: Some("98.765.432/0001-10".into()),
            },
            Credito {
                id: Some(3),
                numero_credito_constituido: "654321".into(),
                numero_nfse: "1122334".into(),
                data_constituicao: "2024-01-15".into(),
                valor_issqn: Some(Decimal::new(80050, 2)),
                tipo_credito: "RETIFICACAO".into(),
                descricao: None,
                status: "INATIVO".into(),
                data_registro: Some("2024-01-15T08:30:00".into()),
                data_atualizacao: None,
                responsavel: None,
                cnpj_empresa: None,
            },
        ])
    }

    fn not_found() -> AppError {
        AppError::Status { status: 404 }
    }

    /// Case-insensitive substring match on either identifier.
    fn matches(credito: &Credito, termo: &str) -> bool {
        let termo = termo.to_lowercase();
        credito.numero_credito_constituido.to_lowercase().contains(&termo)
            || credito.numero_nfse.to_lowercase().contains(&termo)
    }
}

#[async_trait]
impl CreditoApi for FixtureApi {
    async fn lookup_by_credit_number(&self, numero: &str) -> Result<Credito, AppError> {
        self.records
            .iter()
            .find(|c| c.numero_credito_constituido == numero)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn lookup_by_invoice_number(&self, nfse: &str) -> Result<Credito, AppError> {
        // The server expects at most one record per invoice and answers 404
        // when the number is missing or shared by several records.
        let mut found = self.records.iter().filter(|c| c.numero_nfse == nfse);
        match (found.next(), found.next()) {
            (Some(credito), None) => Ok(credito.clone()),
            _ => Err(Self::not_found()),
        }
    }

    async fn search_by_term(&self, termo: &str) -> Result<PageResponse<Credito>, AppError> {
        let matching: Vec<Credito> = self
            .records
            .iter()
            .filter(|c| Self::matches(c, termo))
            .cloned()
            .collect();
        let total = matching.len();
        let size = TERM_PAGE_SIZE as usize;

        Ok(PageResponse {
            content: matching.into_iter().take(size).collect(),
            total_elements: total as u64,
            total_pages: total.div_ceil(size) as u32,
            size: TERM_PAGE_SIZE,
            number: 0,
        })
    }
}
