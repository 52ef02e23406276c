use anyhow::Context;

use crate::api::CreditoApi;
use crate::app::TITLE;
use crate::render::{Format, TermReport, render_term};
use crate::search::MSG_EMPTY_TERM;

pub async fn term(api: &dyn CreditoApi, termo: &str, format: Format) -> anyhow::Result<()> {
    let termo = termo.trim();
    if termo.is_empty() {
        anyhow::bail!(MSG_EMPTY_TERM);
    }

    let page = api
        .search_by_term(termo)
        .await
        .with_context(|| format!("Term search for '{termo}' failed"))?;
    tracing::info!(
        "Term '{}' matched {} credit(s), showing {}",
        termo,
        page.total_elements,
        page.content.len()
    );

    let report = TermReport {
        title: TITLE,
        termo,
        page: &page,
    };
    println!("{}", render_term(&report, format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixture::FixtureApi;

    #[tokio::test]
    async fn test_term_rejects_blank() {
        let err = term(&FixtureApi::demo(), " ", Format::Terminal)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_EMPTY_TERM);
    }

    #[tokio::test]
    async fn test_term_renders_matches() {
        term(&FixtureApi::demo(), "7891011", Format::Html)
            .await
            .unwrap();
    }
}
