use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use clap::{ArgAction, Parser};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use fleetwatch::data::export::{build_export, write_export};
use fleetwatch::data::UNKNOWN_TEAM;
use fleetwatch::settings::Overrides;
use fleetwatch::source::fetch_report;
use fleetwatch::{
    events, ui, App, DataSource, FileSource, FleetData, FleetReport, HttpSource, Settings,
    TeamFilter, Theme,
};

/// How long to wait for input before redrawing and polling the source.
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(name = "fleetwatch", version)]
#[command(about = "Terminal dashboard for sprite fleet health reports")]
struct Args {
    /// Path to the fleet report written by the probe
    #[arg(short, long, default_value = "fleet-status.json", conflicts_with = "url")]
    file: PathBuf,

    /// Fetch the fleet report from a URL instead of a file
    #[arg(short, long)]
    url: Option<String>,

    /// Settings file (TOML) with the team registry and fetch settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only show sprites of this team ("all" for every team)
    #[arg(short, long, default_value = "all")]
    team: TeamFilter,

    /// Seconds between automatic refreshes, 0 to disable (overrides settings)
    #[arg(short, long)]
    refresh: Option<u64>,

    /// HTTP request timeout in seconds (overrides settings)
    #[arg(long)]
    timeout: Option<u64>,

    /// Retries after a transient HTTP failure (overrides settings)
    #[arg(long)]
    retries: Option<u32>,

    /// Export the classified view to a JSON file and exit
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Write logs to this file (the dashboard owns the terminal)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _guard = init_logging(&args);

    let settings = Settings::load(args.config.as_deref())?.with_overrides(Overrides {
        refresh_secs: args.refresh,
        timeout_secs: args.timeout,
        retries: args.retries,
    })?;

    for (sprite, teams) in settings.teams.duplicate_members() {
        warn!(%sprite, ?teams, "sprite listed under more than one team, first one wins");
    }
    if let TeamFilter::Team(name) = &args.team {
        if settings.teams.get(name).is_none() && name != UNKNOWN_TEAM {
            warn!(team = %name, "team filter does not match any configured team");
        }
    }

    if let Some(ref export_path) = args.export {
        return export_to_file(&args, &settings, export_path);
    }

    match args.url {
        Some(ref url) => run_with_url(url, &args, settings),
        None => run_with_file(&args.file, &args, settings),
    }
}

/// Install the tracing subscriber.
///
/// Logs never go to the terminal while the dashboard is up: they are written
/// to `--log-file` if given. Export mode has no UI, so it logs to stderr.
fn init_logging(args: &Args) -> Option<WorkerGuard> {
    let level = match args.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("fleetwatch={level}")));

    if let Some(ref path) = args.log_file {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."));
        let name = path.file_name().unwrap_or(OsStr::new("fleetwatch.log"));

        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
            .init();
        return Some(guard);
    }

    if args.export.is_some() {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(io::stderr))
            .init();
    }
    None
}

/// Run with a file-based data source
fn run_with_file(path: &Path, args: &Args, settings: Settings) -> Result<()> {
    let source = Box::new(FileSource::new(path));
    run_tui(source, args, settings)
}

/// Run with an HTTP data source
fn run_with_url(url: &str, args: &Args, settings: Settings) -> Result<()> {
    // Fetches run on this runtime while the TUI owns the main thread
    let rt = tokio::runtime::Runtime::new()?;

    let mut builder = HttpSource::builder()
        .url(url)
        .timeout(settings.timeout())
        .retries(settings.retries);
    if let Some(interval) = settings.refresh_interval() {
        builder = builder.refresh_interval(interval);
    }
    let source = builder.build(rt.handle().clone())?;

    let result = run_tui(Box::new(source), args, settings);

    rt.shutdown_background();
    result
}

/// Run the TUI with the given data source
fn run_tui(source: Box<dyn DataSource>, args: &Args, settings: Settings) -> Result<()> {
    info!(source = %source.description(), "starting dashboard");

    // Probe the background before the alternate screen hides it
    let theme = Theme::auto_detect();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic);
    }));

    let mut app = App::new(source, settings.teams.clone(), theme)
        .with_team_filter(args.team.clone())
        .with_refresh_interval(settings.refresh_interval());
    app.tick();

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Some(event) = events::poll_event(TICK_RATE)? {
            events::handle_event(app, event);
        }

        app.tick();
    }

    Ok(())
}

/// Load the report once and write the classified view to a JSON file
fn export_to_file(args: &Args, settings: &Settings, export_path: &Path) -> Result<()> {
    let report = match args.url {
        Some(ref url) => {
            let rt = tokio::runtime::Runtime::new()?;
            let client = reqwest::Client::builder()
                .timeout(settings.timeout())
                .build()?;
            rt.block_on(fetch_report(&client, url, settings.retries))?
        }
        None => FleetReport::load(&args.file)?,
    };

    let data = FleetData::from_report(report, &settings.teams);
    for warning in &data.warnings {
        warn!(%warning, "fleet report counts are inconsistent");
    }

    let export = build_export(&data, &args.team, &settings.teams);
    write_export(export_path, &export)?;

    println!("Exported fleet status to: {}", export_path.display());
    Ok(())
}
