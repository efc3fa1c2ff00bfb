use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, stdout, IsTerminal};
use std::time::{Duration, Instant};

use usra::app::{App, AppState};
use usra::layout::Layout;
use usra::voice;

#[derive(Parser)]
#[command(name = "usra")]
#[command(about = "Usra - AI companion shell with a draggable chat orb", long_about = None)]
struct Cli {
    /// Disable the greeting and listen voice-out
    #[arg(long)]
    quiet: bool,

    /// Enable debug logging (RUST_LOG also honored)
    #[arg(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if !stdout().is_terminal() {
        eprintln!("Usra needs an interactive terminal to run.");
        std::process::exit(1);
    }

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new()?;
    app.voice = voice::Voice::new(!cli.quiet);
    let size = terminal.size()?;
    app.orb.place_default(size.width, size.height);
    let mut layout = Layout::new();

    let res = run_app(&mut terminal, &mut app, &mut layout).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Persist language/theme choices made during the session.
    let _ = app.config.save();

    if let Err(err) = res {
        println!("{err:?}");
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    layout: &mut Layout,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(250);

    loop {
        let now = Instant::now();
        terminal.draw(|f| layout.render(f, app, now))?;

        let timeout = Duration::from_millis(50);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        app.state = AppState::Exiting;
                    } else {
                        app.handle_key(key);
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.update(Instant::now());
            last_tick = Instant::now();
        }

        if app.state == AppState::Exiting {
            return Ok(());
        }
    }
}
