use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tasklist_app::Controller;
use tracing::subscriber::NoSubscriber;

use crate::config::KeyBindingsConfig;

mod constants;
mod handlers;
mod selection;
mod view;
mod widgets;

use self::constants::TUI_TICK_RATE_MS;
use self::view::Ui;

/// Launch the interactive TUI.
pub fn run(controller: Controller, keybindings: KeyBindingsConfig) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, controller, keybindings)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    let controller = result?;
    let counts = controller.list().counts();
    tracing::info!(
        tasks = controller.list().len(),
        checked = counts.checked,
        removed = counts.removed,
        "tui session ended"
    );
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: Controller,
    keybindings: KeyBindingsConfig,
) -> Result<Controller> {
    let mut ui = Ui::new(controller, keybindings);

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)?
            && let CrosstermEvent::Key(key) = event::read()?
        {
            ui.handle_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    Ok(ui.controller)
}
