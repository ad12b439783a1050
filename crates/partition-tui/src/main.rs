use anyhow::Result;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;

mod app;
mod event;
mod ui;

use app::App;
use event::{Event, EventHandler};

#[derive(Parser)]
#[command(author, version, about = "Terminal form for splitting and distributing TSV files", long_about = None)]
struct Args {
    /// TSV file to prefill in the form
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Setup terminal (raw mode, alternate screen)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 2. Run the form
    let mut app = App::new(args.file);
    let events = EventHandler::new(250);
    let res = run_app(&mut terminal, &mut app, &events);

    // 3. Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{:?}", err)
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        match events.next() {
            Ok(Event::Input(key)) => app.handle_key(key),
            Ok(Event::Tick) => {}
            // input thread is gone
            Err(_) => return Ok(()),
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
