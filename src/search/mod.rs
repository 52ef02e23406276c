pub mod format;

use std::fmt;

use serde::Serialize;

use crate::api::CreditoApi;
use crate::error::{AppError, ErrorKind, classify_error};
use crate::models::Credito;

pub const MSG_EMPTY_TERM: &str = "Por favor, informe um termo para busca.";
pub const MSG_NOT_FOUND_CREDIT: &str = "Nenhum crédito encontrado com o número informado.";
pub const MSG_NOT_FOUND_INVOICE: &str =
    "Nenhum crédito encontrado com o número da NFS-e informado.";
pub const MSG_GENERIC_ERROR: &str = "Erro ao buscar crédito. Tente novamente.";

/// Which key the search term is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Constituted credit number
    #[default]
    #[value(alias = "credito")]
    Credit,
    /// NFS-e (service invoice) number
    #[value(alias = "nfse")]
    Invoice,
}

impl SearchMode {
    pub fn label(self) -> &'static str {
        match self {
            SearchMode::Credit => "Número do Crédito",
            SearchMode::Invoice => "Número da NFS-e",
        }
    }

    fn not_found_message(self) -> &'static str {
        match self {
            SearchMode::Credit => MSG_NOT_FOUND_CREDIT,
            SearchMode::Invoice => MSG_NOT_FOUND_INVOICE,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SearchMode::Credit => "credit",
            SearchMode::Invoice => "invoice",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", content = "detail", rename_all = "lowercase")]
pub enum SearchState {
    #[default]
    Idle,
    Loading,
    Found(Credito),
    Empty(String),
    Failed(String),
}

/// Handle for one dispatched lookup. Only the most recent ticket may
/// complete the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    pub mode: SearchMode,
    pub term: String,
}

#[derive(Debug, Default)]
pub struct SearchForm {
    pub mode: SearchMode,
    pub term: String,
    state: SearchState,
    validation: Option<String>,
    generation: u64,
    abandoned: bool,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading)
    }

    pub fn results(&self) -> &[Credito] {
        match &self.state {
            SearchState::Found(credito) => std::slice::from_ref(credito),
            _ => &[],
        }
    }

    /// Validation message first, then the message of the last outcome.
    pub fn error(&self) -> &str {
        if let Some(msg) = &self.validation {
            return msg;
        }
        match &self.state {
            SearchState::Empty(msg) | SearchState::Failed(msg) => msg.as_str(),
            _ => "",
        }
    }

    pub fn is_empty_result(&self) -> bool {
        matches!(self.state, SearchState::Empty(_))
    }

    /// Validate the term and enter `Loading`. Returns `None` when the term
    /// is blank (or the form was abandoned); nothing should be dispatched then.
    pub fn begin(&mut self) -> Option<Ticket> {
        if self.abandoned {
            return None;
        }
        let term = self.term.trim();
        if term.is_empty() {
            self.validation = Some(MSG_EMPTY_TERM.to_string());
            return None;
        }

        self.generation += 1;
        let ticket = Ticket {
            generation: self.generation,
            mode: self.mode,
            term: term.to_string(),
        };
        self.validation = None;
        self.state = SearchState::Loading;
        Some(ticket)
    }

    /// Apply the outcome of `ticket`'s lookup. Returns false if the ticket
    /// was superseded or the form abandoned, in which case nothing changes.
    pub fn finish(&mut self, ticket: &Ticket, outcome: Result<Credito, AppError>) -> bool {
        if self.abandoned || ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale result for {} '{}' (ticket {}, current {})",
                ticket.mode,
                ticket.term,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.state = match outcome {
            Ok(credito) => SearchState::Found(credito),
            Err(e) => match classify_error(&e) {
                ErrorKind::NotFound => {
                    tracing::info!("No credit for {} '{}'", ticket.mode, ticket.term);
                    SearchState::Empty(ticket.mode.not_found_message().to_string())
                }
                ErrorKind::Other => {
                    tracing::warn!("Lookup for {} '{}' failed: {e}", ticket.mode, ticket.term);
                    SearchState::Failed(MSG_GENERIC_ERROR.to_string())
                }
            },
        };
        true
    }

    /// Run one lookup for the current mode and term.
    pub async fn search(&mut self, api: &dyn CreditoApi) {
        let Some(ticket) = self.begin() else {
            return;
        };
        let outcome = lookup(api, &ticket).await;
        self.finish(&ticket, outcome);
    }

    /// Reset term, results and messages. A pending lookup keeps `Loading`.
    pub fn clear(&mut self) {
        self.term.clear();
        self.validation = None;
        if !self.is_loading() {
            self.state = SearchState::Idle;
        }
    }

    /// Tear the form down: every outstanding ticket becomes stale.
    pub fn abandon(&mut self) {
        self.abandoned = true;
        if self.is_loading() {
            self.state = SearchState::Idle;
        }
    }
}

/// Issue the lookup a ticket stands for.
pub async fn lookup(api: &dyn CreditoApi, ticket: &Ticket) -> Result<Credito, AppError> {
    match ticket.mode {
        SearchMode::Credit => api.lookup_by_credit_number(&ticket.term).await,
        SearchMode::Invoice => api.lookup_by_invoice_number(&ticket.term).await,
    }
}
