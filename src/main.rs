//! `lyricsync` - terminal karaoke player.
//!
//! Usage: `lyricsync [FILE_OR_QUERY]`. A query that is not a path is looked
//! up in `LYRICS_DIR`.

use std::time::Instant;
use std::{io, panic};

use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

use lyricsync::app::App;
use lyricsync::config::Config;
use lyricsync::constants::player::EVENT_POLL_MS;
use lyricsync::error::Result;
use lyricsync::input::command_for_key;
use lyricsync::library::resolve_lyrics_path;
use lyricsync::{logging, ui};

// Helper function to ensure the terminal is cleaned up on exit
fn cleanup_terminal<B: Backend + std::io::Write>(terminal: &mut Terminal<B>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    if let Some(log_file) = &config.log_file {
        logging::init_file_logging(log_file)?;
    }

    // Resolve and load before touching the terminal so errors print normally
    let mut app = App::new(config);
    if let Some(arg) = std::env::args().nth(1) {
        let path = resolve_lyrics_path(&arg, &app.config)?;
        app.load_path(&path)?;
    }

    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app).await;

    if let Err(e) = cleanup_terminal(&mut terminal) {
        eprintln!("Error cleaning up terminal: {e:?}");
    }

    if let Err(err) = res {
        eprintln!("{err}");
    }

    Ok(())
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    let poll = std::time::Duration::from_millis(EVENT_POLL_MS);
    let mut last_tick = Instant::now();

    loop {
        app.handle_updates(); // Deferred accents first

        let elapsed = last_tick.elapsed();
        if elapsed >= app.config.tick_interval {
            app.tick(elapsed);
            last_tick = Instant::now();
        }

        terminal.draw(|f| ui::draw(f, &app))?;

        if event::poll(poll)? {
            match event::read()? {
                event::Event::Key(key) => {
                    if let Some(command) = command_for_key(key) {
                        app.handle_command(command);
                    }
                }
                event::Event::Paste(text) => {
                    if let Err(e) = app.load_text(&text) {
                        app.error_message = Some(e.to_string());
                    }
                }
                _ => {}
            }
        } else {
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }

        if app.should_quit() {
            break;
        }
    }
    Ok(())
}
