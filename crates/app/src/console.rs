//! Line-oriented console host.

use std::str::FromStr;
use std::sync::Arc;

use folio_ui::{ArticleItem, DetailState, ListState, Navigator};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::coordinator::{Intent, MainCoordinator, Render, ScreenKind};

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  user <name>      set the username
  pass <password>  set the password
  login            log in
  refresh          reload the article list
  open <index>     show an article
  back             return to the list
  logout           log out
  help             show this text
  quit             exit";

/// One parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forwarded to the visible screen.
    Intent(Intent),
    /// Print usage.
    Help,
    /// Leave the program.
    Quit,
}

/// A console line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command `{0}`; type `help`")]
    Unknown(String),

    /// The command is missing or has a malformed argument.
    #[error("usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();

        let intent = match word {
            "help" | "?" => return Ok(Self::Help),
            "quit" | "exit" => return Ok(Self::Quit),
            "user" => Intent::Username(rest.to_string()),
            "pass" => Intent::Password(rest.to_string()),
            "login" => Intent::Login,
            "refresh" => Intent::Refresh,
            "logout" => Intent::Logout,
            "back" => Intent::Back,
            "open" => Intent::Open(
                rest.parse()
                    .map_err(|_| CommandError::Usage("open <index>"))?,
            ),
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Self::Intent(intent))
    }
}

/// Text for one render event; `None` when there is nothing to show.
#[must_use]
pub fn describe(render: &Render) -> Option<String> {
    match render {
        Render::Screen(ScreenKind::Login) => Some("== Login ==".to_string()),
        Render::Screen(ScreenKind::List) => Some("== Articles ==".to_string()),
        Render::Screen(ScreenKind::Detail) => Some("== Article ==".to_string()),
        Render::HeaderImage(size) => Some(format!("(header image, {size} bytes)")),
        Render::LoginEnabled(enabled) => {
            Some(format!("login {}", if *enabled { "enabled" } else { "disabled" }))
        }
        Render::Loading(true) => Some("loading...".to_string()),
        Render::Loading(false) => None,
        Render::LoginResult(None) => Some("logged in".to_string()),
        Render::LoginResult(Some(error)) => Some(format!("login failed: {error}")),
        Render::List(ListState::Success(items)) => Some(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| format!("[{index}] {}", headline(item)))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        Render::List(state) => state.user_message().map(str::to_string),
        Render::Detail(DetailState::Success(item)) => {
            let mut text = headline(item);
            for part in [&item.summary, &item.content].into_iter().flatten() {
                text.push_str("\n\n");
                text.push_str(part);
            }
            Some(text)
        }
        Render::Detail(state) => state.user_message().map(str::to_string),
    }
}

fn headline(item: &ArticleItem) -> String {
    let title = item.title.as_deref().unwrap_or("(untitled)");
    match &item.date {
        Some(date) => format!("{title} ({date})"),
        None => title.to_string(),
    }
}

/// Runs the console until `quit` or end of input.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn run<R, W>(
    coordinator: Arc<MainCoordinator>,
    mut renders: mpsc::UnboundedReceiver<Render>,
    input: R,
    mut out: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    coordinator.start();

    loop {
        tokio::select! {
            Some(render) = renders.recv() => {
                if let Some(text) = describe(&render) {
                    out.write_all(text.as_bytes()).await?;
                    out.write_all(b"\n").await?;
                    out.flush().await?;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Intent(intent)) => coordinator.dispatch(intent),
                    Ok(Command::Help) => {
                        out.write_all(HELP.as_bytes()).await?;
                        out.write_all(b"\n").await?;
                    }
                    Ok(Command::Quit) => break,
                    Err(error) => {
                        out.write_all(format!("{error}\n").as_bytes()).await?;
                    }
                }
                out.flush().await?;
            }
        }
    }

    tracing::debug!("console closed");
    Ok(())
}
