//! Line-oriented terminal front end.
//!
//! Each input line is one user gesture. Gestures become actions sent to the
//! store; whenever the store publishes a new revision the page is rendered
//! again from a fresh snapshot.

use crate::reducer::TaskStore;
use crate::row::TaskRow;
use crate::types::{AppState, TaskAction};
use crate::view::PageView;
use tasklist_runtime::StoreError;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::watch;

const HELP: &str = "\
Commands:
  type <text>     edit the input
  submit          submit the form
  add <text>      type and submit in one go
  check <n>       mark row n complete
  uncheck <n>     mark row n incomplete
  delete <n>      delete row n
  show            render the page
  json            dump state as JSON
  help            this text
  quit            leave
";

/// Errors raised while handling a line
#[derive(Error, Debug)]
pub enum ShellError {
    /// The first word is not a known command
    #[error("Unknown command `{0}` (try `help`)")]
    UnknownCommand(String),

    /// A row command came without a row number
    #[error("`{0}` needs a row number")]
    MissingRow(&'static str),

    /// The row argument is not a positive number
    #[error("`{0}` is not a row number")]
    BadRow(String),

    /// The row number is outside the list
    #[error("There is no row {0}")]
    NoSuchRow(usize),

    /// The store refused the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input line is not valid UTF-8
    #[error("Input is not valid UTF-8")]
    InvalidUtf8,

    /// The state snapshot could not be serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the input text
    Type(String),
    /// Submit the form
    Submit,
    /// Type then submit
    Add(String),
    /// Check the box of a row (1-based)
    Check(usize),
    /// Uncheck the box of a row (1-based)
    Uncheck(usize),
    /// Click the delete button of a row (1-based)
    Delete(usize),
    /// Render the page
    Show,
    /// Print the state as JSON
    Json,
    /// Print the command list
    Help,
    /// End the session
    Quit,
}

fn parse_row(command: &'static str, argument: &str) -> Result<usize, ShellError> {
    let argument = argument.trim();
    if argument.is_empty() {
        return Err(ShellError::MissingRow(command));
    }
    match argument.parse::<usize>() {
        Ok(row) if row > 0 => Ok(row),
        _ => Err(ShellError::BadRow(argument.to_string())),
    }
}

impl std::str::FromStr for Command {
    type Err = ShellError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));

        match word {
            // Text keeps its inner and trailing spaces; the form decides
            "type" => Ok(Self::Type(rest.to_string())),
            "add" => Ok(Self::Add(rest.to_string())),
            "submit" => Ok(Self::Submit),
            "check" => parse_row("check", rest).map(Self::Check),
            "uncheck" => parse_row("uncheck", rest).map(Self::Uncheck),
            "delete" => parse_row("delete", rest).map(Self::Delete),
            "show" => Ok(Self::Show),
            "json" => Ok(Self::Json),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(ShellError::UnknownCommand(other.to_string())),
        }
    }
}

/// What the shell should do after a command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Nothing to print beyond a possible re-render
    Done,
    /// Print this text
    Text(String),
    /// Render the page even if nothing changed
    Render,
    /// Stop reading input
    Quit,
}

/// Terminal session bound to one store
pub struct Shell {
    store: TaskStore,
    revisions: watch::Receiver<u64>,
}

impl Shell {
    /// Creates a shell over `store`
    #[must_use]
    pub fn new(store: TaskStore) -> Self {
        let revisions = store.subscribe();
        Self { store, revisions }
    }

    /// The store this shell drives
    #[must_use]
    pub const fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Current page, derived from a fresh snapshot
    pub async fn page(&self) -> PageView {
        self.store.state(PageView::from_state).await
    }

    /// Runs one command against the store
    ///
    /// # Errors
    ///
    /// Returns [`ShellError::NoSuchRow`] for rows outside the list,
    /// [`ShellError::Store`] when the store refuses an action and
    /// [`ShellError::Json`] when the snapshot cannot be serialized.
    pub async fn execute(&mut self, command: Command) -> Result<Reply, ShellError> {
        match command {
            Command::Type(text) => {
                self.dispatch(TaskAction::edit(text)).await?;
            },
            Command::Submit => {
                self.dispatch(TaskAction::SubmitForm).await?;
            },
            Command::Add(text) => {
                self.dispatch(TaskAction::edit(text)).await?;
                self.dispatch(TaskAction::SubmitForm).await?;
            },
            Command::Check(row) => self.row_gesture(row, |row| row.on_toggle(true)).await?,
            Command::Uncheck(row) => self.row_gesture(row, |row| row.on_toggle(false)).await?,
            Command::Delete(row) => self.row_gesture(row, TaskRow::on_delete_requested).await?,
            Command::Show => return Ok(Reply::Render),
            Command::Json => {
                let state: AppState = self.store.state(Clone::clone).await;
                let mut json = serde_json::to_string_pretty(&state)?;
                json.push('\n');
                return Ok(Reply::Text(json));
            },
            Command::Help => return Ok(Reply::Text(HELP.to_string())),
            Command::Quit => return Ok(Reply::Quit),
        }
        Ok(Reply::Done)
    }

    async fn dispatch(&self, action: TaskAction) -> Result<u64, StoreError> {
        let kind = if action.is_intent() {
            "intent"
        } else if action.is_event() {
            "event"
        } else {
            "other"
        };
        tracing::debug!(action = action.variant_name(), kind, "Dispatching");
        self.store.send(action).await
    }

    async fn row_gesture(
        &self,
        position: usize,
        gesture: impl FnOnce(&TaskRow) -> TaskAction,
    ) -> Result<(), ShellError> {
        let page = self.page().await;
        let row = page.row(position).ok_or(ShellError::NoSuchRow(position))?;
        self.dispatch(gesture(row)).await?;
        Ok(())
    }

    async fn render<W>(&mut self, output: &mut W) -> Result<(), ShellError>
    where
        W: AsyncWrite + Unpin,
    {
        self.revisions.mark_unchanged();
        let page = self.page().await;
        output.write_all(format!("\n{page}\n").as_bytes()).await?;
        output.flush().await?;
        Ok(())
    }

    /// Reads commands from `input` until it ends or `quit` is entered
    ///
    /// The page is rendered once at start and again after every command
    /// that produced a new store revision.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors and when the store has been closed. Bad commands
    /// and lines that are not UTF-8 only print a message.
    pub async fn run<R, W>(&mut self, mut input: R, mut output: W) -> Result<(), ShellError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        tracing::info!("Shell started");
        self.render(&mut output).await?;

        let mut buffer = Vec::new();
        loop {
            buffer.clear();
            if input.read_until(b'\n', &mut buffer).await? == 0 {
                break;
            }

            let reply = match std::str::from_utf8(&buffer) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => match line.trim_end_matches(['\r', '\n']).parse::<Command>() {
                    Ok(command) => self.execute(command).await,
                    Err(error) => Err(error),
                },
                Err(_) => Err(ShellError::InvalidUtf8),
            };

            match reply {
                Ok(Reply::Quit) => break,
                Ok(Reply::Done) => {},
                Ok(Reply::Text(text)) => output.write_all(text.as_bytes()).await?,
                Ok(Reply::Render) => self.render(&mut output).await?,
                Err(ShellError::Store(StoreError::Closed)) => return Err(StoreError::Closed.into()),
                Err(error @ (ShellError::Io(_) | ShellError::Json(_))) => return Err(error),
                Err(error) => {
                    let line = String::from_utf8_lossy(&buffer);
                    tracing::warn!(line = %line.trim_end(), %error, "Command rejected");
                    output.write_all(format!("{error}\n").as_bytes()).await?;
                },
            }

            if self.revisions.has_changed().unwrap_or(false) {
                self.render(&mut output).await?;
            }
            output.flush().await?;
        }

        tracing::info!("Shell finished");
        Ok(())
    }
}
