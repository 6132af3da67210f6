// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::{NoteAction, NoteViewer, NotesApi, NotesBoard};
use domain::{DomainError, DraftNote, PaginationState};
use infrastructure::{Config, HttpNotesApi};
use ports::{BrowseSession, TerminalPresenter};
use tracing::{debug, info};
use crate::cli::args::{Args, Command};

pub async fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notesview with arguments");

    // Initialize infrastructure
    let config = Config::resolve(args.config.as_deref())?;
    let base_url = match args.base_url {
        Some(url) => {
            debug!(%url, "Using base URL from command line");
            url
        }
        None => config.api.base_url.clone(),
    };
    let api = HttpNotesApi::new(&base_url, config.api.request_timeout())?;
    info!(base_url = %api.base_url(), "Using notes backend");

    let default_page_size = config.pagination.page_size;
    execute(api, args.command, default_page_size).await
}

/// Run one command against `api`
pub async fn execute<A: NotesApi + Clone>(
    api: A,
    command: Command,
    default_page_size: u32,
) -> Result<()> {
    let presenter = TerminalPresenter::new();

    match command {
        Command::List {
            page,
            page_size,
            json,
        } => {
            let pagination = PaginationState::new(page, page_size.unwrap_or(default_page_size));
            let mut board = NotesBoard::new(api, pagination);
            board
                .refresh()
                .await
                .map_err(|e| action_failed(NoteAction::Load, e))?;
            if json {
                let page = board.store().snapshot();
                println!("{}", serde_json::to_string_pretty(&page)?);
            } else {
                print!("{}", presenter.render_page(board.store()));
            }
        }
        Command::Show { note_id, json } => {
            let viewer = NoteViewer::new(api);
            info!(note_id, "Viewing note");
            let note = viewer
                .view_note(note_id)
                .await
                .map_err(|e| action_failed(NoteAction::View, e))?;
            debug!(?note, "Retrieved note");
            if json {
                println!("{}", serde_json::to_string_pretty(&note)?);
            } else {
                print!("{}", presenter.render_note(&note));
            }
        }
        Command::Add { title, content } => {
            let mut board = NotesBoard::new(api, PaginationState::default());
            *board.store_mut().draft_mut() = DraftNote::new(title, content);
            let note = board
                .add_note()
                .await
                .map_err(|e| action_failed(NoteAction::Create, e))?;
            println!("Created note {}", note.id);
        }
        Command::Edit {
            note_id,
            title,
            content,
        } => {
            if title.is_none() && content.is_none() {
                anyhow::bail!("Nothing to change: pass --title and/or --content");
            }
            let current = NoteViewer::new(api.clone())
                .view_note(note_id)
                .await
                .map_err(|e| action_failed(NoteAction::View, e))?;
            let title = title.unwrap_or(current.title);
            let content = content.unwrap_or(current.content);
            api.update_note(note_id, &title, &content)
                .await
                .map_err(|e| action_failed(NoteAction::Update, e))?;
            println!("Saved note {}", note_id);
        }
        Command::Delete { note_id } => {
            let mut board = NotesBoard::new(api, PaginationState::default());
            board
                .remove_note(note_id)
                .await
                .map_err(|e| action_failed(NoteAction::Delete, e))?;
            println!("Deleted note {}", note_id);
        }
        Command::Browse { page_size } => {
            let pagination = PaginationState::new(1, page_size.unwrap_or(default_page_size));
            let board = NotesBoard::new(api, pagination);
            let mut session = BrowseSession::new(board, std::io::stdout());
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            session.run(stdin).await.context("Browse session failed")?;
        }
    }

    Ok(())
}

fn action_failed(action: NoteAction, error: DomainError) -> anyhow::Error {
    anyhow::Error::new(error).context(action.failure_message())
}
