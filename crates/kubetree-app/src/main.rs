mod app;
mod app_log;
mod cli;
mod command;
mod event;
mod keybindings;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::EnvFilter;

use kubetree_config::AppConfig;
use kubetree_core::{quick_switch, ConfigStore, Configuration, KubeNamespaceLister, SelectionTree, SessionOutcome};

use crate::app::App;
use crate::cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(app_log::AppLogMakeWriter)
        .with_target(false)
        .without_time()
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let (settings, warnings) = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    for warning in warnings {
        tracing::warn!("{warning}");
    }

    let path = ConfigStore::resolve_path(cli.kubeconfig.as_deref())?;
    let store = ConfigStore::load(&path)?;

    if cli.list {
        print_contexts(store.config());
        return Ok(());
    }

    if let Some(target) = quick_switch::parse(&cli.args, store.config()) {
        store.switch_to(&target)?;
        return Ok(());
    }
    if !cli.args.is_empty() {
        tracing::debug!(args = ?cli.args, "arguments not recognised as a switch target, opening tree");
    }

    let lister = KubeNamespaceLister::new(store.path()).with_timeout(settings.list_timeout());
    let tree = SelectionTree::new(store.config());
    let app = App::new(tree, lister, &settings, store.path());

    if let SessionOutcome::Switch(target) = run_interactive(app).await? {
        store.switch_to(&target)?;
    }
    Ok(())
}

fn print_contexts(config: &Configuration) {
    for ctx in config.contexts() {
        let marker = if ctx.name == config.active_context() { '*' } else { ' ' };
        println!("{marker} {}\t{}", ctx.name, ctx.active_namespace());
    }
}

async fn run_interactive(mut app: App<KubeNamespaceLister>) -> anyhow::Result<SessionOutcome> {
    install_panic_hook();
    app_log::set_capture(true);

    terminal::enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(io::stdout());
    let result = match Terminal::new(backend) {
        Ok(mut terminal) => app.run(&mut terminal).await,
        Err(e) => Err(e.into()),
    };

    let restored = restore_terminal();
    app_log::release();
    restored?;

    result
}

fn restore_terminal() -> io::Result<()> {
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)
}

fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        app_log::release();
        original_hook(panic_info);
    }));
}
