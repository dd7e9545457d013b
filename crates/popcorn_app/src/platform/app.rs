use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use popcorn_core::{update, AppState, Msg};
use popcorn_engine::{EngineHandle, FileBlobStore};
use popcorn_logging::{popcorn_info, popcorn_warn};

use super::effects::EffectRunner;
use super::persistence;
use super::ui;
use super::ui::input::UiCommand;
use crate::config::AppConfig;

/// Everything the UI loop reacts to, in arrival order.
pub enum AppInput {
    Line(String),
    Engine(Msg),
    /// Standard input reached end of file.
    Closed,
}

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let engine =
        EngineHandle::new(config.api_settings()).context("failed to start the request engine")?;
    let store = FileBlobStore::new(config.data_dir.clone());

    let (input_tx, input_rx) = mpsc::channel::<AppInput>();
    let runner = EffectRunner::new(engine, store, input_tx.clone());
    spawn_stdin_reader(input_tx);

    let mut app = App {
        state: AppState::default(),
        runner,
    };
    popcorn_info!("Popcorn started; data dir {:?}", config.data_dir);

    let restored = persistence::load_watchlist(app.runner.store());
    app.dispatch(Msg::RestoreWatchlist(restored));
    if !config.initial_query.trim().is_empty() {
        app.dispatch(Msg::QueryChanged(config.initial_query.clone()));
    }

    while let Ok(input) = input_rx.recv() {
        match input {
            AppInput::Line(line) => {
                if !app.handle_line(&line) {
                    break;
                }
            }
            AppInput::Engine(msg) => app.dispatch(msg),
            AppInput::Closed => break,
        }
    }

    popcorn_info!("Popcorn exiting");
    Ok(())
}

fn spawn_stdin_reader(input_tx: mpsc::Sender<AppInput>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(AppInput::Line(line)).is_err() {
                        return;
                    }
                }
                Err(err) => {
                    popcorn_warn!("Failed to read input: {}", err);
                    break;
                }
            }
        }
        let _ = input_tx.send(AppInput::Closed);
    });
}

struct App {
    state: AppState,
    runner: EffectRunner,
}

impl App {
    /// Returns `false` once the user asked to quit.
    fn handle_line(&mut self, line: &str) -> bool {
        match ui::input::parse_line(line) {
            UiCommand::Quit => return false,
            UiCommand::Help => print_lines(ui::constants::HELP_TEXT.lines()),
            UiCommand::Invalid(reason) => print_lines([reason.as_str()]),
            command => {
                let view = self.state.view();
                match ui::input::resolve(command, &view) {
                    Some(msg) => self.dispatch(msg),
                    None => print_lines(["no such entry"]),
                }
            }
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);

        if self.state.consume_dirty() {
            self.render();
        }
    }

    fn render(&self) {
        let view = self.state.view();
        print_lines(ui::render::render(&view));
    }
}

fn print_lines<I, S>(lines: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        if writeln!(out, "{}", line.as_ref()).is_err() {
            return;
        }
    }
    let _ = out.flush();
}
