use serde::Serialize;

use crate::models::Credito;
use crate::search::{SearchForm, SearchMode};

pub const TITLE: &str = "Consulta de Créditos";

/// Application shell: a fixed header hosting the credit search form.
#[derive(Debug)]
pub struct App {
    pub title: &'static str,
    pub search: SearchForm,
}

impl Default for App {
    fn default() -> Self {
        Self {
            title: TITLE,
            search: SearchForm::new(),
        }
    }
}

/// Snapshot of everything the renderers show.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<'a> {
    pub title: &'a str,
    pub mode: SearchMode,
    pub mode_label: &'a str,
    pub term: &'a str,
    pub loading: bool,
    pub results: &'a [Credito],
    pub error: &'a str,
    pub empty_result: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View<'_> {
        let form = &self.search;
        View {
            title: self.title,
            mode: form.mode,
            mode_label: form.mode.label(),
            term: &form.term,
            loading: form.is_loading(),
            results: form.results(),
            error: form.error(),
            empty_result: form.is_empty_result(),
        }
    }
}
