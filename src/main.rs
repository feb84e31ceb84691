use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::Event,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wx_ticker::data::duration::{format_duration, parse_duration};
use wx_ticker::{
    events, ui, ActivityState, App, ConditionsProvider, FileSource, HazardsProvider, Phase,
    Rotation, SharedViewport, StaticSource, StdoutViewport, TickerConfig, TickerFeed, TickerHost,
};

#[derive(Parser, Debug)]
#[command(name = "wx-ticker")]
#[command(about = "Rotating current-conditions ticker for the terminal")]
struct Args {
    /// Path to a JSON feed file ({"conditions": {...}, "hazards": [...]})
    #[arg(short, long, default_value = "conditions.json", conflicts_with = "demo")]
    file: PathBuf,

    /// Use the built-in sample feed instead of a file
    #[arg(long)]
    demo: bool,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between restart attempts while the ticker waits for data
    #[arg(short, long, default_value = "1")]
    refresh: u64,

    /// Print renders to stdout instead of running the terminal UI
    #[arg(long)]
    headless: bool,

    /// Write logs to this file (the terminal UI owns stdout)
    #[arg(long)]
    log: Option<PathBuf>,

    /// Override the fixed panel dwell (e.g., "4s", "2500ms")
    #[arg(long)]
    dwell: Option<String>,
}

/// Provider pair plus a description for the status bar.
struct Sources {
    conditions: Arc<dyn ConditionsProvider>,
    hazards: Arc<dyn HazardsProvider>,
    description: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_tracing(args.headless, args.log.as_deref())?;

    let mut config = TickerConfig::load(args.config.as_deref())?;
    if let Some(ref dwell) = args.dwell {
        config.fixed_dwell = parse_duration(dwell)?;
    }

    let sources = if args.demo {
        let source = Arc::new(StaticSource::new(TickerFeed::sample()));
        Sources {
            conditions: source.clone(),
            hazards: source,
            description: "demo feed".to_string(),
        }
    } else {
        let source = Arc::new(FileSource::new(&args.file));
        let description = source.description().to_string();
        Sources {
            conditions: source.clone(),
            hazards: source,
            description,
        }
    };

    let refresh = Duration::from_secs(args.refresh.max(1));
    if args.headless {
        run_headless(sources, &config, refresh)
    } else {
        run_tui(sources, &config, refresh)
    }
}

/// Install the tracing subscriber.
///
/// Headless runs log to stderr. The terminal UI only logs when given a file.
fn init_tracing(headless: bool, log: Option<&Path>) -> Result<()> {
    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "wx_ticker=info".into())
    };

    if let Some(path) = log {
        let file = File::create(path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::registry()
            .with(filter())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if headless {
        tracing_subscriber::registry()
            .with(filter())
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }
    Ok(())
}

/// Run without a terminal UI: renders go to stdout until Ctrl-C.
fn run_headless(sources: Sources, config: &TickerConfig, refresh: Duration) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        // The headless host only ever shows the conditions view
        let (_activity_tx, activity) = watch::channel(ActivityState::eligible("current-weather"));

        let rotation = Rotation::new(
            sources.conditions,
            sources.hazards,
            Box::new(activity.clone()),
            Box::new(StdoutViewport),
        )
        .with_config(config);
        let host = TickerHost::launch(rotation, activity);
        info!(
            source = %sources.description,
            dwell = %format_duration(config.fixed_dwell),
            "Headless ticker running"
        );

        let mut ticks = tokio::time::interval(refresh);
        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    if host.phase() == Phase::Stalled {
                        host.start();
                    }
                }
                signal = tokio::signal::ctrl_c() => {
                    signal?;
                    break;
                }
            }
        }

        host.shutdown();
        Ok::<_, anyhow::Error>(())
    })
}

/// Run the terminal UI around a launched ticker.
fn run_tui(sources: Sources, config: &TickerConfig, refresh: Duration) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let viewport = SharedViewport::new();
    let (activity_tx, activity) = watch::channel(ActivityState::eligible("current-weather"));
    let error_source = sources.conditions.clone();
    let rotation = Rotation::new(
        sources.conditions,
        sources.hazards,
        Box::new(activity.clone()),
        Box::new(viewport.clone()),
    )
    .with_config(config);
    let panel_names = rotation.panels().names();
    let host = rt.block_on(async { TickerHost::launch(rotation, activity) });

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    let mut app = App::new(
        host,
        activity_tx,
        viewport,
        panel_names,
        &config.progress_view_id,
        &sources.description,
    )
    .with_error_source(error_source);

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 50;
    const MIN_HEIGHT: u16 = 10;

    while app.running {
        terminal.draw(|frame| {
            let area = frame.area();

            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(
                    0,
                    (area.height / 2).saturating_sub(2),
                    area.width,
                    5.min(area.height),
                );
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(6),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            ui::common::render_header(frame, app, chunks[0]);
            ui::common::render_tabs(frame, app, chunks[1]);
            ui::ticker::render(frame, app, chunks[2]);
            ui::common::render_status_bar(frame, app, chunks[3]);

            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Short timeout keeps the marquee moving
        if let Some(Event::Key(key)) = events::poll_event(Duration::from_millis(50))? {
            events::handle_key_event(app, key);
        }

        if last_refresh.elapsed() >= refresh {
            app.tick();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}
