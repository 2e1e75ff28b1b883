//! Turfbook terminal client
//!
//! Reads commands from stdin and prints the active screen to stdout. Logs go
//! to stderr.

use chrono::{Local, Offset};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use turfbook::app::{AppAction, AppEnvironment, AppReducer, AppState, Screen};
use turfbook::command::{Command, HELP, Resolved};
use turfbook::config::{Backend, Config};
use turfbook::gateway::{InMemoryRemoteStore, PostgrestClient, RemoteStore};
use turfbook::session::{FileSessionStore, SessionStore};
use turfbook::{admin, view};
use turfbook_core::environment::SystemClock;
use turfbook_runtime::Store;

type ClientStore = Store<AppState, AppAction, AppEnvironment, AppReducer>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "turfbook=info,turfbook_runtime=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;
    tracing::info!(backend = ?config.remote.backend, city = %config.booking.default_city, "Starting turfbook");

    let remote: Arc<dyn RemoteStore> = match config.remote.backend {
        Backend::PostgRest => Arc::new(PostgrestClient::from_config(&config.remote)?),
        Backend::Memory => Arc::new(InMemoryRemoteStore::seeded()),
    };
    let sessions = Arc::new(FileSessionStore::new(&config.session_file));
    let state = AppState::restore(sessions.load(), config.booking.default_city.clone());

    let env = AppEnvironment::new(Arc::new(SystemClock), remote, sessions)
        .with_config(&config)
        .with_offset(Local::now().offset().fix());
    let store = Store::new(state, AppReducer::new(), env.clone());
    let mut results = store.subscribe_actions();

    store.send(AppAction::Started).await?;
    draw(&store, &env).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if !handle_line(&store, &env, &line).await? {
                    break;
                }
            }
            result = results.recv() => match result {
                Ok(action) => {
                    if needs_redraw(&store, &action).await {
                        draw(&store, &env).await;
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!(skipped, "Render fell behind");
                    draw(&store, &env).await;
                },
                Err(RecvError::Closed) => break,
            },
        }
    }

    store.shutdown(Duration::from_secs(5)).await?;
    Ok(())
}

/// Run one input line; `false` means quit
async fn handle_line(
    store: &ClientStore,
    env: &AppEnvironment,
    line: &str,
) -> Result<bool, Box<dyn std::error::Error>> {
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(error) => {
            println!("{error}");
            return Ok(true);
        },
    };

    let window = env.booking_window();
    let resolved = match store.state(|s| command.resolve(s, &window)).await {
        Ok(resolved) => resolved,
        Err(error) => {
            println!("{error}");
            return Ok(true);
        },
    };

    match resolved {
        Resolved::Dispatch(action) => {
            store.send(action).await?;
            draw(store, env).await;
        },
        Resolved::Export(path) => {
            let rows = store
                .state(|s| match &s.screen {
                    Screen::Admin(view) => view.visible_rows(),
                    _ => Vec::new(),
                })
                .await;
            match admin::export_csv(&path, &rows) {
                Ok(()) => println!("Exported {} row(s) to {}", rows.len(), path.display()),
                Err(error) => println!("{error}"),
            }
        },
        Resolved::Help => println!("{HELP}"),
        Resolved::Show => draw(store, env).await,
        Resolved::Quit => return Ok(false),
    }
    Ok(true)
}

/// Hold ticks only matter to the screen when they clear the selection
async fn needs_redraw(store: &ClientStore, action: &AppAction) -> bool {
    match action {
        AppAction::HoldTick { .. } => {
            store
                .state(|s| matches!(&s.screen, Screen::Slots(selection) if selection.hold.is_empty()))
                .await
        },
        _ => true,
    }
}

async fn draw(store: &ClientStore, env: &AppEnvironment) {
    let window = env.booking_window();
    let screen = store.state(|s| view::render(s, &window)).await;
    println!("{screen}");
}
