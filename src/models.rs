use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A fiscal credit record as served by the credit API. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credito {
    #[serde(default)]
    pub id: Option<i64>,
    pub numero_credito_constituido: String,
    #[serde(rename = "numeroNFSe")]
    pub numero_nfse: String,
    pub data_constituicao: String,
    #[serde(rename = "valorISSQN", default)]
    pub valor_issqn: Option<Decimal>,
    pub tipo_credito: String,
    #[serde(default)]
    pub descricao: Option<String>,
    pub status: String,
    #[serde(default)]
    pub data_registro: Option<String>,
    #[serde(default)]
    pub data_atualizacao: Option<String>,
    #[serde(default)]
    pub responsavel: Option<String>,
    #[serde(default)]
    pub cnpj_empresa: Option<String>,
}

/// Spring-style page envelope. Extra page metadata the server sends is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub size: u32,
    /// Zero-based page index.
    pub number: u32,
}

pub fn tipo_label(code: &str) -> &str {
    match code {
        "PRINCIPAL" => "Principal",
        "COMPLEMENTAR" => "Complementar",
        "ADICIONAL" => "Adicional",
        "RETIFICACAO" => "Retificação",
        "CANCELAMENTO" => "Cancelamento",
        other => other,
    }
}

pub fn status_label(code: &str) -> &str {
    match code {
        "ATIVO" => "Ativo",
        "INATIVO" => "Inativo",
        "PENDENTE" => "Pendente",
        "PROCESSANDO" => "Processando",
        "ERRO" => "Erro",
        other => other,
    }
}
