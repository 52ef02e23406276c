use std::sync::Arc;

use clap::ValueEnum;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::CreditoApi;
use crate::app::App;
use crate::error::AppError;
use crate::models::Credito;
use crate::render::{Format, render_view};
use crate::search::{SearchMode, Ticket, lookup};

const HELP: &str = "\
Type a number and press Enter to search.
  :mode credit|invoice   search by credit number or NFS-e
  :clear                 clear the form
  :help                  show this help
  :quit                  leave";

#[derive(Debug, PartialEq)]
enum Input {
    Term(String),
    Mode(SearchMode),
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Term(line.to_string());
    };

    let words: Vec<&str> = command.split_whitespace().collect();
    match words.as_slice() {
        ["quit" | "q" | "exit"] => Input::Quit,
        ["clear"] => Input::Clear,
        ["help" | "h"] => Input::Help,
        ["mode", mode] => SearchMode::from_str(mode, true)
            .map(Input::Mode)
            .unwrap_or_else(|_| Input::Unknown(trimmed.to_string())),
        _ => Input::Unknown(trimmed.to_string()),
    }
}

type Completion = (Ticket, Result<Credito, AppError>);

/// Line-driven search form. Lookups run as tasks so the form stays
/// responsive; a newer search supersedes any pending one.
pub async fn shell(api: Arc<dyn CreditoApi>, format: Format) -> anyhow::Result<()> {
    let mut app = App::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut pending: Vec<JoinHandle<()>> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}\n");
    show(&app, format)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Help => println!("{HELP}"),
                    Input::Unknown(cmd) => println!("Unknown command: {cmd} (try :help)"),
                    Input::Mode(mode) => {
                        app.search.mode = mode;
                        println!("Buscar por: {}", mode.label());
                    }
                    Input::Clear => {
                        app.search.clear();
                        show(&app, format)?;
                    }
                    Input::Term(term) => {
                        app.search.term = term;
                        if let Some(ticket) = app.search.begin() {
                            pending.retain(|handle| !handle.is_finished());
                            pending.push(dispatch(Arc::clone(&api), ticket, tx.clone()));
                        }
                        show(&app, format)?;
                    }
                }
            }
            Some((ticket, outcome)) = rx.recv() => {
                if app.search.finish(&ticket, outcome) {
                    show(&app, format)?;
                }
            }
        }
    }

    for handle in &pending {
        handle.abort();
    }
    app.search.abandon();
    tracing::debug!("Shell closed, {} lookup task(s) aborted", pending.len());
    Ok(())
}

fn dispatch(
    api: Arc<dyn CreditoApi>,
    ticket: Ticket,
    tx: mpsc::UnboundedSender<Completion>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let outcome = lookup(api.as_ref(), &ticket).await;
        if tx.send((ticket, outcome)).is_err() {
            tracing::debug!("Lookup finished after the shell closed");
        }
    })
}

fn show(app: &App, format: Format) -> anyhow::Result<()> {
    println!("{}", render_view(&app.view(), format)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixture::FixtureApi;

    #[test]
    fn test_parse_input() {
        assert_eq!(parse_input("123456"), Input::Term("123456".into()));
        assert_eq!(parse_input("  "), Input::Term("  ".into()));
        assert_eq!(parse_input(":quit"), Input::Quit);
        assert_eq!(parse_input(" :q "), Input::Quit);
        assert_eq!(parse_input(":clear"), Input::Clear);
        assert_eq!(parse_input(":help"), Input::Help);
        assert_eq!(parse_input(":mode invoice"), Input::Mode(SearchMode::Invoice));
        assert_eq!(parse_input(":mode NFSE"), Input::Mode(SearchMode::Invoice));
        assert_eq!(parse_input(":mode credito"), Input::Mode(SearchMode::Credit));
        assert_eq!(parse_input(":mode boleto"), Input::Unknown(":mode boleto".into()));
        assert_eq!(parse_input(":clear all"), Input::Unknown(":clear all".into()));
        assert_eq!(parse_input(":"), Input::Unknown(":".into()));
    }

    #[tokio::test]
    async fn test_dispatch_delivers_completion() {
        let mut app = App::new();
        app.search.term = "123456".into();
        let ticket = app.search.begin().unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        dispatch(Arc::new(FixtureApi::demo()), ticket, tx).await.unwrap();

        let (ticket, outcome) = rx.recv().await.unwrap();
        assert!(app.search.finish(&ticket, outcome));
        assert_eq!(app.search.results().len(), 1);
    }

    #[tokio::test]
    async fn test_superseded_dispatch_is_dropped() {
        let api: Arc<dyn CreditoApi> = Arc::new(FixtureApi::demo());
        let mut app = App::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        app.search.term = "123456".into();
        let first = app.search.begin().unwrap();
        app.search.term = "000000".into();
        let second = app.search.begin().unwrap();

        dispatch(Arc::clone(&api), first, tx.clone()).await.unwrap();
        dispatch(api, second, tx).await.unwrap();

        let (ticket, outcome) = rx.recv().await.unwrap();
        assert!(!app.search.finish(&ticket, outcome));
        let (ticket, outcome) = rx.recv().await.unwrap();
        assert!(app.search.finish(&ticket, outcome));
        assert!(app.search.is_empty_result());
    }
}
