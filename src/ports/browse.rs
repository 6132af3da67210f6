// src/ports/browse.rs
use anyhow::{Context, Result};
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::application::{NoteAction, NoteViewer, NotesApi, NotesBoard};
use crate::domain::DomainError;
use crate::ports::TerminalPresenter;

const HELP: &str = "\
Commands:
  next | n                     next page
  prev | p                     previous page
  page N                       go to page N
  size N                       set page size (back to page 1)
  refresh | r                  reload the current page
  title TEXT                   set the draft title
  content TEXT                 set the draft content
  add                          create a note from the draft
  edit ID title|content TEXT   edit a note on this page
  save ID                      save edits to a note
  cancel ID                    discard edits to a note
  delete ID                    delete a note
  show ID                      show a single note
  help                         this text
  quit | q                     leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Next,
    Prev,
    Page(u32),
    Size(u32),
    Refresh,
    DraftTitle(String),
    DraftContent(String),
    Add,
    Edit { id: i64, field: EditField, text: String },
    Save(i64),
    Cancel(i64),
    Delete(i64),
    Show(i64),
    Help,
    Quit,
}

/// Parse one input line. Errors are messages for the user.
pub fn parse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let number = |what: &str| -> Result<i64, String> {
        rest.parse::<i64>()
            .map_err(|_| format!("Expected {} after '{}'", what, word))
    };
    let page_number = || -> Result<u32, String> {
        rest.parse::<u32>()
            .map_err(|_| format!("Expected a page number after '{}'", word))
    };

    match word {
        "next" | "n" => Ok(BrowseCommand::Next),
        "prev" | "p" => Ok(BrowseCommand::Prev),
        "page" => page_number().map(BrowseCommand::Page),
        "size" => page_number().map(BrowseCommand::Size),
        "refresh" | "r" => Ok(BrowseCommand::Refresh),
        "title" => Ok(BrowseCommand::DraftTitle(rest.to_string())),
        "content" => Ok(BrowseCommand::DraftContent(rest.to_string())),
        "add" => Ok(BrowseCommand::Add),
        "edit" => parse_edit(rest),
        "save" => number("a note id").map(BrowseCommand::Save),
        "cancel" => number("a note id").map(BrowseCommand::Cancel),
        "delete" => number("a note id").map(BrowseCommand::Delete),
        "show" => number("a note id").map(BrowseCommand::Show),
        "help" | "?" => Ok(BrowseCommand::Help),
        "quit" | "q" | "exit" => Ok(BrowseCommand::Quit),
        "" => Err(String::new()),
        other => Err(format!("Unknown command '{}', try 'help'", other)),
    }
}

fn parse_edit(rest: &str) -> Result<BrowseCommand, String> {
    let usage = || "Usage: edit ID title|content TEXT".to_string();
    let mut parts = rest.splitn(3, char::is_whitespace);
    let id = parts
        .next()
        .and_then(|s| s.parse::<i64>().ok())
        .ok_or_else(usage)?;
    let field = match parts.next() {
        Some("title") => EditField::Title,
        Some("content") => EditField::Content,
        _ => return Err(usage()),
    };
    let text = parts.next().unwrap_or("").trim().to_string();
    Ok(BrowseCommand::Edit { id, field, text })
}

/// Interactive, line-driven view over a [`NotesBoard`]
pub struct BrowseSession<A: NotesApi + Clone, W: Write> {
    board: NotesBoard<A>,
    viewer: NoteViewer<A>,
    presenter: TerminalPresenter,
    out: W,
}

impl<A: NotesApi + Clone, W: Write> BrowseSession<A, W> {
    pub fn new(board: NotesBoard<A>, out: W) -> Self {
        let viewer = NoteViewer::new(board.api().clone());
        Self {
            board,
            viewer,
            presenter: TerminalPresenter::new(),
            out,
        }
    }

    pub fn board(&self) -> &NotesBoard<A> {
        &self.board
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Load the first page, then process commands until `quit` or end of input
    pub async fn run<R: AsyncBufRead + Unpin>(&mut self, input: R) -> Result<()> {
        info!("Starting browse session");
        let result = self.board.refresh().await;
        self.report(NoteAction::Load, result.map(|_| true))?;

        let mut lines = input.lines();
        self.prompt()?;
        while let Some(line) = lines
            .next_line()
            .await
            .context("Failed to read command")?
        {
            match parse_command(&line) {
                Ok(BrowseCommand::Quit) => break,
                Ok(command) => {
                    debug!(?command, "Executing command");
                    self.execute(command).await?;
                }
                Err(message) if message.is_empty() => {}
                Err(message) => writeln!(self.out, "{}", message)?,
            }
            self.prompt()?;
        }

        self.board.store_mut().abandon_fetches();
        info!("Browse session finished");
        Ok(())
    }

    async fn execute(&mut self, command: BrowseCommand) -> Result<()> {
        match command {
            BrowseCommand::Next => {
                let moved = self.board.next().await;
                if let Ok(false) = moved {
                    writeln!(self.out, "Already on the last page")?;
                    return Ok(());
                }
                self.report(NoteAction::Load, moved)?;
            }
            BrowseCommand::Prev => {
                let moved = self.board.prev().await;
                if let Ok(false) = moved {
                    writeln!(self.out, "Already on the first page")?;
                    return Ok(());
                }
                self.report(NoteAction::Load, moved)?;
            }
            BrowseCommand::Page(n) => {
                let result = self.board.go_to_page(n).await;
                self.report(NoteAction::Load, result.map(|_| true))?;
            }
            BrowseCommand::Size(n) => {
                let result = self.board.set_page_size(n).await;
                self.report(NoteAction::Load, result.map(|_| true))?;
            }
            BrowseCommand::Refresh => {
                let result = self.board.refresh().await;
                self.report(NoteAction::Load, result.map(|_| true))?;
            }
            BrowseCommand::DraftTitle(text) => {
                self.board.store_mut().draft_mut().title = text;
            }
            BrowseCommand::DraftContent(text) => {
                self.board.store_mut().draft_mut().content = text;
            }
            BrowseCommand::Add => match self.board.add_note().await {
                Ok(note) => {
                    writeln!(self.out, "Created note {}", note.id)?;
                    self.render_page()?;
                }
                Err(e) => self.fail(NoteAction::Create, &e)?,
            },
            BrowseCommand::Edit { id, field, text } => {
                match self.board.store_mut().edit_mut(id) {
                    Ok(edit) => {
                        match field {
                            EditField::Title => edit.title = text,
                            EditField::Content => edit.content = text,
                        }
                        self.render_page()?;
                    }
                    Err(e) => self.fail(NoteAction::Update, &e)?,
                }
            }
            BrowseCommand::Save(id) => match self.board.save_note(id).await {
                Ok(_) => {
                    writeln!(self.out, "Saved note {}", id)?;
                    self.render_page()?;
                }
                Err(e) => self.fail(NoteAction::Update, &e)?,
            },
            BrowseCommand::Cancel(id) => match self.board.store_mut().cancel_edit(id) {
                Ok(()) => self.render_page()?,
                Err(e) => self.fail(NoteAction::Update, &e)?,
            },
            BrowseCommand::Delete(id) => match self.board.remove_note(id).await {
                Ok(()) => {
                    writeln!(self.out, "Deleted note {}", id)?;
                    self.render_page()?;
                }
                Err(e) => self.fail(NoteAction::Delete, &e)?,
            },
            BrowseCommand::Show(id) => match self.viewer.view_note(id).await {
                Ok(note) => write!(self.out, "{}", self.presenter.render_note(&note))?,
                Err(e) => self.fail(NoteAction::View, &e)?,
            },
            BrowseCommand::Help => writeln!(self.out, "{}", HELP)?,
            BrowseCommand::Quit => {}
        }
        Ok(())
    }

    fn report(&mut self, action: NoteAction, result: Result<bool, DomainError>) -> Result<()> {
        match result {
            Ok(_) => self.render_page(),
            Err(e) => self.fail(action, &e),
        }
    }

    fn render_page(&mut self) -> Result<()> {
        let page = self.presenter.render_page(self.board.store());
        write!(self.out, "{}", page)?;
        Ok(())
    }

    fn fail(&mut self, action: NoteAction, error: &DomainError) -> Result<()> {
        writeln!(self.out, "Error: {}", self.presenter.render_failure(action, error))?;
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_navigation_words_when_parsing_then_returns_commands() {
        assert_eq!(parse_command("next"), Ok(BrowseCommand::Next));
        assert_eq!(parse_command(" p "), Ok(BrowseCommand::Prev));
        assert_eq!(parse_command("page 4"), Ok(BrowseCommand::Page(4)));
        assert_eq!(parse_command("size 25"), Ok(BrowseCommand::Size(25)));
    }

    #[test]
    fn given_draft_text_when_parsing_then_keeps_inner_spaces() {
        assert_eq!(
            parse_command("title Shopping list for Monday"),
            Ok(BrowseCommand::DraftTitle("Shopping list for Monday".to_string()))
        );
    }

    #[test]
    fn given_edit_line_when_parsing_then_splits_id_field_and_text() {
        assert_eq!(
            parse_command("edit 12 content buy more milk"),
            Ok(BrowseCommand::Edit {
                id: 12,
                field: EditField::Content,
                text: "buy more milk".to_string(),
            })
        );
    }

    #[test]
    fn given_bad_input_when_parsing_then_returns_message() {
        assert!(parse_command("page x").is_err());
        assert!(parse_command("edit 3 colour red").is_err());
        assert!(parse_command("frobnicate").is_err());
        assert_eq!(parse_command("   "), Err(String::new()));
    }
}
