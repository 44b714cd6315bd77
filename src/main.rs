//! Meridian - a terminal viewer for multi-dimensional netCDF variables.

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use meridian::app::{App, Theme};
use meridian::ui;
use meridian::viewer::ColorPalette;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "meridian", version)]
#[command(about = "A terminal viewer for slicing and plotting netCDF variables", long_about = None)]
struct Args {
    /// Path to the netCDF file to open
    file: PathBuf,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Heatmap color palette
    #[arg(long, value_enum, default_value_t = ColorPalette::Viridis)]
    palette: ColorPalette,

    /// UI theme
    #[arg(long, value_enum, default_value_t = Theme::GruvboxDark)]
    theme: Theme,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::DEBUG.to_string()));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting Meridian");
    }

    // Open the dataset before touching the terminal so errors land on a normal screen.
    let app = match App::open(&args.file, args.palette, args.theme) {
        Ok(app) => app,
        Err(err) => {
            tracing::error!(%err, "Failed to open dataset");
            eprintln!("Error: {}", err);
            std::process::exit(1);
        },
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    tracing::info!("Meridian exited");

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &mut app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == event::KeyEventKind::Press => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                },
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::Moved | MouseEventKind::Drag(MouseButton::Left) => {
                        app.pointer_moved(mouse.column, mouse.row);
                    },
                    MouseEventKind::Down(MouseButton::Left) => {
                        app.click(mouse.column, mouse.row);
                    },
                    MouseEventKind::ScrollDown => app.viewer.scroll_info_down(1),
                    MouseEventKind::ScrollUp => app.viewer.scroll_info_up(1),
                    _ => {},
                },
                _ => {},
            }
        }
    }
}
