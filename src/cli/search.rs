use crate::api::CreditoApi;
use crate::app::App;
use crate::render::{Format, render_view};
use crate::search::SearchMode;

pub async fn search(
    api: &dyn CreditoApi,
    mode: SearchMode,
    term: &str,
    format: Format,
) -> anyhow::Result<()> {
    let app = run(api, mode, term).await;
    println!("{}", render_view(&app.view(), format)?);
    Ok(())
}

async fn run(api: &dyn CreditoApi, mode: SearchMode, term: &str) -> App {
    let mut app = App::new();
    app.search.mode = mode;
    app.search.term = term.to_string();
    app.search.search(api).await;
    app
}
