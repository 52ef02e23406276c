pub mod html;
pub mod json;
pub mod terminal;

use serde::Serialize;

use crate::app::View;
use crate::models::{Credito, PageResponse, status_label, tipo_label};
use crate::search::format::{format_currency, format_date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Terminal,
    Json,
    Html,
}

/// Result of a free-text term search, as rendered by the `term` command.
#[derive(Debug, Serialize)]
pub struct TermReport<'a> {
    pub title: &'a str,
    pub termo: &'a str,
    pub page: &'a PageResponse<Credito>,
}

pub fn render_view(view: &View<'_>, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Terminal => terminal::render_view(view),
        Format::Json => json::render(view),
        Format::Html => html::render_view(view),
    }
}

pub fn render_term(report: &TermReport<'_>, format: Format) -> anyhow::Result<String> {
    match format {
        Format::Terminal => terminal::render_term(report),
        Format::Json => json::render(report),
        Format::Html => html::render_term(report),
    }
}

/// Label/value pairs for a single record, formatted for display.
pub(crate) fn detail_rows(c: &Credito) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Número do Crédito", c.numero_credito_constituido.clone()),
        ("Número da NFS-e", c.numero_nfse.clone()),
        ("Data de Constituição", format_date(Some(c.data_constituicao.as_str()))),
        ("Valor ISSQN", format_currency(c.valor_issqn)),
        ("Tipo de Crédito", tipo_label(&c.tipo_credito).to_string()),
        ("Status", status_label(&c.status).to_string()),
        ("Responsável", or_dash(c.responsavel.as_deref())),
        ("CNPJ da Empresa", or_dash(c.cnpj_empresa.as_deref())),
        ("Data de Registro", format_date(c.data_registro.as_deref())),
        ("Última Atualização", format_date(c.data_atualizacao.as_deref())),
    ];
    if let Some(descricao) = c.descricao.as_deref().filter(|d| !d.trim().is_empty()) {
        rows.push(("Descrição", descricao.to_string()));
    }
    rows
}

pub(crate) const LIST_HEADER: [&str; 6] = [
    "Crédito",
    "NFS-e",
    "Data Constituição",
    "Valor ISSQN",
    "Tipo",
    "Status",
];

/// One table row per record for multi-record listings.
pub(crate) fn list_row(c: &Credito) -> [String; 6] {
    [
        c.numero_credito_constituido.clone(),
        c.numero_nfse.clone(),
        format_date(Some(c.data_constituicao.as_str())),
        format_currency(c.valor_issqn),
        tipo_label(&c.tipo_credito).to_string(),
        status_label(&c.status).to_string(),
    ]
}

pub(crate) fn page_footer(page: &PageResponse<Credito>) -> String {
    format!(
        "Página {} de {} - {} registro(s)",
        page.number + 1,
        page.total_pages.max(1),
        page.total_elements
    )
}

fn or_dash(value: Option<&str>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or("-")
        .to_string()
}
