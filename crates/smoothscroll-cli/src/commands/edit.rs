use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::warn;

use smoothscroll_core::{FileStore, Settings};
use smoothscroll_engine::{
    panel::handle_key_event,
    PanelOutcome, SettingsPanel, SettingsPanelWidget, Theme,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

pub async fn run(store: &FileStore) -> Result<()> {
    let settings = Settings::load(store).await?;
    let theme = if truecolor() { Theme::default() } else { Theme::basic() };
    let mut panel = SettingsPanel::new(settings);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("smoothscroll settings"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut panel, &theme, store).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    panel: &mut SettingsPanel,
    theme: &Theme,
    store: &FileStore,
) -> Result<()> {
    loop {
        terminal.draw(|frame| SettingsPanelWidget::render(frame, panel, theme))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        // Only handle key press events, ignore release events
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match panel.handle(handle_key_event(key)) {
            PanelOutcome::Quit => break,
            PanelOutcome::Changed => {
                let saved = panel.settings().save(store).await;
                if let Err(e) = saved {
                    warn!(error = %e, "Failed to save settings");
                    panel.set_status(format!("Save failed: {}", e));
                }
            }
            PanelOutcome::None => {}
        }
    }

    Ok(())
}

fn truecolor() -> bool {
    std::env::var("COLORTERM")
        .map(|value| value == "truecolor" || value == "24bit")
        .unwrap_or(false)
}
