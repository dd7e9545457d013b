use popcorn_core::{AppViewModel, Msg, MAX_USER_RATING};

use super::constants::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    Query(String),
    /// 1-based index into the result list.
    OpenResult(usize),
    Rate(u8),
    Add,
    Back,
    /// 1-based index into the watched list.
    DeleteWatched(usize),
    Help,
    Quit,
    Invalid(String),
}

pub fn parse_line(line: &str) -> UiCommand {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    let Some(command) = line.strip_prefix(COMMAND_PREFIX) else {
        return UiCommand::Query(line.to_string());
    };
    if command.starts_with(COMMAND_PREFIX) {
        return UiCommand::Query(command.to_string());
    }

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    if parts.next().is_some() {
        return UiCommand::Invalid(format!("too many arguments to :{name}"));
    }

    match (name, arg) {
        (CMD_OPEN, Some(n)) => parse_index(n).map_or_else(invalid_index, UiCommand::OpenResult),
        (CMD_DELETE, Some(n)) => {
            parse_index(n).map_or_else(invalid_index, UiCommand::DeleteWatched)
        }
        (CMD_RATE, Some(n)) => match n.parse::<u8>() {
            Ok(value) if (1..=MAX_USER_RATING).contains(&value) => UiCommand::Rate(value),
            _ => UiCommand::Invalid(format!("rating must be between 1 and {MAX_USER_RATING}")),
        },
        (CMD_ADD, None) => UiCommand::Add,
        (CMD_BACK, None) => UiCommand::Back,
        (CMD_HELP, None) => UiCommand::Help,
        (CMD_QUIT, None) | ("q", None) => UiCommand::Quit,
        _ => UiCommand::Invalid(format!("unknown command :{command}")),
    }
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|n| *n >= 1)
}

fn invalid_index() -> UiCommand {
    UiCommand::Invalid("expected a number starting at 1".to_string())
}

/// Turns a command into a message for the current view. `None` for
/// commands the app handles itself or indexes that do not exist.
pub fn resolve(command: UiCommand, view: &AppViewModel) -> Option<Msg> {
    match command {
        UiCommand::Query(query) => Some(Msg::QueryChanged(query)),
        UiCommand::OpenResult(n) => view
            .search
            .results
            .get(n - 1)
            .map(|result| Msg::MovieClicked(result.id.clone())),
        UiCommand::Rate(value) => Some(Msg::RatingChosen(value)),
        UiCommand::Add => Some(Msg::AddToWatchlistClicked),
        UiCommand::Back => Some(Msg::CloseDetail),
        UiCommand::DeleteWatched(n) => view
            .watched
            .get(n - 1)
            .map(|entry| Msg::DeleteWatched(entry.id.clone())),
        UiCommand::Help | UiCommand::Quit | UiCommand::Invalid(_) => None,
    }
}
