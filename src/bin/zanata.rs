//! Zanata CLI binary.
//!
//! A command-line interface for interacting with a Zanata server.

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;
use tabled::{Table, Tabled};
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;
use zanata::cli::{Cli, Command};
use zanata::{Iteration, KeyFileAuthorizer, PrettyPrint, Project, Session, Suggestion};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "warn";

#[tokio::main]
async fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let session = match open_session(&cli) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: Create zanata.ini with a [servers] group or pass --key-file");
            return ExitCode::FAILURE;
        }
    };

    match run(&session, cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn open_session(cli: &Cli) -> zanata::Result<Session> {
    let authorizer = match &cli.key_file {
        Some(path) => KeyFileAuthorizer::from_path(path)?,
        None => KeyFileAuthorizer::from_default_location()?,
    };
    Session::new(Arc::new(authorizer), &cli.domain)
}

async fn run(session: &Session, cli: Cli) -> zanata::Result<()> {
    match cli.command {
        Command::Projects => {
            let projects = session.get_projects(None).await?;
            output_list(&projects, cli.json, |p| ProjectRow::from(p))
        }
        Command::Project { id } => {
            let project = session.get_project(&id, None).await?;
            output_single(&project, cli.json)
        }
        Command::Iterations { project } => {
            let project = session.get_project(&project, None).await?;
            let iterations = project.get_iterations(None).await?;
            output_list(&iterations, cli.json, |i| IterationRow::from(&**i))
        }
        Command::Suggest { from, to, terms } => {
            let suggestions = session.get_suggestions(&terms, &from, &to, None).await?;
            output_list(&suggestions, cli.json, |s| SuggestionRow::from(s))
        }
        Command::Download {
            project,
            iteration,
            document,
            locale,
            output,
        } => {
            handle_download(
                session,
                &project,
                &iteration,
                &document,
                &locale,
                output.as_deref(),
            )
            .await
        }
    }
}

async fn handle_download(
    session: &Session,
    project_id: &str,
    iteration_id: &str,
    document: &str,
    locale: &str,
    output: Option<&Path>,
) -> zanata::Result<()> {
    let project = session.get_project(project_id, None).await?;
    let iterations = project.get_iterations(None).await?;
    let iteration = iterations
        .iter()
        .find(|i| i.id == iteration_id)
        .ok_or_else(|| zanata::ZanataError::NotFound {
            entity_type: "iteration",
            id: format!("{project_id}/{iteration_id}"),
        })?;

    let mut body = iteration
        .get_translated_documentation(document, locale, None)
        .await?;

    let mut writer: Box<dyn tokio::io::AsyncWrite + Unpin> = match output {
        Some(path) => Box::new(tokio::fs::File::create(path).await?),
        None => Box::new(tokio::io::stdout()),
    };
    while let Some(chunk) = body.chunk().await? {
        writer.write_all(&chunk).await?;
    }
    writer.flush().await?;

    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> zanata::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_list<T, R, F>(items: &[T], json: bool, to_row: F) -> zanata::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct ProjectRow {
    id: String,
    name: String,
    status: String,
}

impl From<&Project> for ProjectRow {
    fn from(p: &Project) -> Self {
        Self {
            id: p.id.clone(),
            name: p.name.clone(),
            status: p.status.to_string(),
        }
    }
}

#[derive(Tabled)]
struct IterationRow {
    id: String,
    status: String,
}

impl From<&Iteration> for IterationRow {
    fn from(i: &Iteration) -> Self {
        Self {
            id: i.id.clone(),
            status: i.status.to_string(),
        }
    }
}

#[derive(Tabled)]
struct SuggestionRow {
    source: String,
    target: String,
    similarity: String,
}

impl From<&Suggestion> for SuggestionRow {
    fn from(s: &Suggestion) -> Self {
        Self {
            source: s.source_contents.join(" | "),
            target: s.target_contents.join(" | "),
            similarity: s
                .similarity_percent
                .map(|p| format!("{p:.1}%"))
                .unwrap_or_default(),
        }
    }
}
