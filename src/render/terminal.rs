use comfy_table::{Cell, Table};

use super::{LIST_HEADER, TermReport, detail_rows, list_row, page_footer};
use crate::app::View;

pub fn render_view(view: &View<'_>) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!("=== {} ===\n\n", view.title));
    output.push_str(&format!(
        "Buscar por: {}\nTermo:      {}\n\n",
        view.mode_label,
        if view.term.is_empty() { "-" } else { view.term }
    ));

    if view.loading {
        output.push_str("Buscando...\n");
    } else if let Some(credito) = view.results.first() {
        let mut table = Table::new();
        table.set_header(vec!["Campo", "Valor"]);
        for (label, value) in detail_rows(credito) {
            table.add_row(vec![Cell::new(label), Cell::new(value)]);
        }
        output.push_str(&table.to_string());
        output.push('\n');
    }

    // A rejected term is reported even while an earlier record is shown.
    if !view.error.is_empty() {
        output.push_str(view.error);
        output.push('\n');
    }

    Ok(output)
}

pub fn render_term(report: &TermReport<'_>) -> anyhow::Result<String> {
    let mut output = String::new();

    output.push_str(&format!("=== {} ===\n\n", report.title));
    output.push_str(&format!("Termo: {}\n\n", report.termo));

    if report.page.content.is_empty() {
        output.push_str("Nenhum crédito encontrado.\n");
        return Ok(output);
    }

    let mut table = Table::new();
    table.set_header(LIST_HEADER.to_vec());
    for c in &report.page.content {
        table.add_row(list_row(c).to_vec());
    }
    output.push_str(&table.to_string());
    output.push('\n');
    output.push_str(&page_footer(report.page));
    output.push('\n');

    Ok(output)
}
