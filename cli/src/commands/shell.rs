//! Line-oriented interactive shell over the dashboard router

use super::current_session;
use super::navigate::report;
use crate::config::CliConfigLoader;
use crate::output::{render_document, Snapshot};
use anyhow::Result;
use colored::*;
use safebite_core::router::{Element, UiEvent};
use safebite_core::{CredentialStore, Router};
use std::io::IsTerminal;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

/// Rows kept free for the chrome lines and the prompt
const CHROME_ROWS: u16 = 4;

const HELP: &str = "\
Commands:
  go <page>      navigate to a page
  click <page>   click a link carrying data-page=<page>
  scroll <row>   scroll the content container
  back           return to the previous page
  state          print navigation state as JSON
  help           show this help
  quit           leave the shell";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Go(String),
    Click(String),
    Scroll(u32),
    Back,
    State,
    Help,
    Quit,
    Empty,
    Invalid(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return ShellCommand::Empty;
        };
        let argument = words.next();

        match (command, argument) {
            ("go" | "g", Some(page)) => ShellCommand::Go(page.to_string()),
            ("click" | "c", Some(page)) => ShellCommand::Click(page.to_string()),
            ("scroll" | "s", Some(row)) => match row.parse() {
                Ok(row) => ShellCommand::Scroll(row),
                Err(_) => ShellCommand::Invalid(format!("Not a row number: {}", row)),
            },
            ("back" | "b", None) => ShellCommand::Back,
            ("state", None) => ShellCommand::State,
            ("help" | "?", None) => ShellCommand::Help,
            ("quit" | "exit" | "q", None) => ShellCommand::Quit,
            _ => ShellCommand::Invalid(format!("Unknown command: {}", line.trim())),
        }
    }
}

/// Run one shell command against the router; returns the text to print
///
/// `None` ends the session.
pub fn execute(router: &mut Router, command: ShellCommand) -> Option<String> {
    let output = match command {
        ShellCommand::Go(page) => {
            let outcome = router.navigate_to(page);
            report(&outcome);
            router.settle();
            render_document(router)
        }
        ShellCommand::Click(page) => {
            let event = UiEvent::on(Element::new("span")).through(Element::nav_link("a", page));
            if let Some(outcome) = router.dispatch(&event) {
                report(&outcome);
            }
            router.settle();
            render_document(router)
        }
        ShellCommand::Scroll(row) => {
            let applied = router.document_mut().container.scroll_to(row);
            debug!("Scrolled to row {} (asked for {})", applied, row);
            render_document(router)
        }
        ShellCommand::Back => match router.go_back() {
            Some(outcome) => {
                report(&outcome);
                router.settle();
                render_document(router)
            }
            None => "Nothing to go back to".yellow().to_string(),
        },
        ShellCommand::State => match Snapshot::capture(router).to_json() {
            Ok(json) => json,
            Err(e) => format!("Failed to serialize state: {}", e).red().to_string(),
        },
        ShellCommand::Help => HELP.to_string(),
        ShellCommand::Quit => return None,
        ShellCommand::Empty => String::new(),
        ShellCommand::Invalid(message) => format!("{} (try 'help')", message).red().to_string(),
    };
    Some(output)
}

/// Start the interactive shell
pub async fn shell_command(
    config_loader: CliConfigLoader,
    store: CredentialStore,
    viewport_from_flag: bool,
) -> Result<()> {
    let loaded = config_loader.load().await?;
    let session = current_session(&store).await;
    let mut router = crate::dashboard::build_router(&loaded.config, session.as_ref())?;

    if !viewport_from_flag && std::io::stdout().is_terminal() {
        if let Ok((_, rows)) = crossterm::terminal::size() {
            let rows = rows.saturating_sub(CHROME_ROWS).max(1);
            debug!("Using terminal height for the viewport: {} rows", rows);
            router.document_mut().container.set_viewport_rows(rows);
        }
    }

    info!("Starting shell with {} page(s)", router.registry().len());
    if let Some(outcome) = router.start() {
        report(&outcome);
        router.settle();
    }
    println!("{}", render_document(&router));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print_prompt(&router);
        let Some(line) = lines.next_line().await? else {
            break;
        };
        match execute(&mut router, ShellCommand::parse(&line)) {
            Some(output) if output.is_empty() => {}
            Some(output) => println!("{}", output),
            None => break,
        }
    }

    Ok(())
}

fn print_prompt(router: &Router) {
    use std::io::Write;

    let page = router
        .current_page()
        .map(|page| page.as_str())
        .unwrap_or("safebite");
    print!("{} ", format!("{}>", page).cyan().bold());
    let _ = std::io::stdout().flush();
}
