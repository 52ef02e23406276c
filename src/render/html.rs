use super::{LIST_HEADER, TermReport, detail_rows, list_row, page_footer};
use crate::app::View;

pub fn render_view(view: &View<'_>) -> anyhow::Result<String> {
    let mut html = String::new();
    open_page(&mut html, view.title);

    html.push_str(&format!(
        "<section class=\"query\"><span class=\"label\">{}</span> <strong>{}</strong></section>\n",
        escape_html(view.mode_label),
        escape_html(if view.term.is_empty() { "-" } else { view.term }),
    ));

    if view.loading {
        html.push_str("<p class=\"loading\">Buscando...</p>\n");
    } else if let Some(credito) = view.results.first() {
        html.push_str("<table class=\"detail\">\n<tbody>\n");
        for (label, value) in detail_rows(credito) {
            html.push_str(&format!(
                "<tr><th>{}</th><td>{}</td></tr>\n",
                escape_html(label),
                escape_html(&value),
            ));
        }
        html.push_str("</tbody></table>\n");
    }

    if !view.error.is_empty() {
        let class = if view.empty_result { "empty" } else { "error" };
        html.push_str(&format!(
            "<p class=\"{class}\">{}</p>\n",
            escape_html(view.error)
        ));
    }

    close_page(&mut html);
    Ok(html)
}

pub fn render_term(report: &TermReport<'_>) -> anyhow::Result<String> {
    let mut html = String::new();
    open_page(&mut html, report.title);

    html.push_str(&format!(
        "<section class=\"query\"><span class=\"label\">Termo</span> <strong>{}</strong></section>\n",
        escape_html(report.termo)
    ));

    if report.page.content.is_empty() {
        html.push_str("<p class=\"empty\">Nenhum crédito encontrado.</p>\n");
    } else {
        html.push_str("<table>\n<thead><tr>");
        for h in LIST_HEADER {
            html.push_str(&format!("<th>{}</th>", escape_html(h)));
        }
        html.push_str("</tr></thead>\n<tbody>\n");
        for c in &report.page.content {
            html.push_str("<tr>");
            for cell in list_row(c) {
                html.push_str(&format!("<td>{}</td>", escape_html(&cell)));
            }
            html.push_str("</tr>\n");
        }
        html.push_str("</tbody></table>\n");
        html.push_str(&format!(
            "<p class=\"footer\">{}</p>\n",
            escape_html(&page_footer(report.page))
        ));
    }

    close_page(&mut html);
    Ok(html)
}

fn open_page(html: &mut String, title: &str) {
    html.push_str("<!DOCTYPE html>\n<html lang=\"pt-BR\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_html(title)));
    html.push_str("<style>\n");
    html.push_str("  body { font-family: system-ui, sans-serif; margin: 0; color: #1a1a1a; }\n");
    html.push_str("  header { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; padding: 20px; }\n");
    html.push_str("  header h1 { font-size: 24px; font-weight: 600; margin: 0; }\n");
    html.push_str("  main { max-width: 960px; margin: 0 auto; padding: 20px; }\n");
    html.push_str("  table { border-collapse: collapse; width: 100%; margin: 1rem 0; }\n");
    html.push_str("  th, td { border: 1px solid #ddd; padding: 0.5rem; text-align: left; }\n");
    html.push_str("  th { background: #f5f5f5; font-weight: 600; }\n");
    html.push_str("  .empty { color: #666; }\n");
    html.push_str("  .error { color: #b00020; }\n");
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!(
        "<header><h1>{}</h1></header>\n<main>\n",
        escape_html(title)
    ));
}

fn close_page(html: &mut String) {
    html.push_str("</main>\n</body>\n</html>\n");
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
