use std::time::{Duration, Instant};

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vocab_cli::{
    app::{App, Outcome},
    config::Config,
    render::{help_text, render_view},
};
use vocab_core::{GameHost, LessonCatalog};

#[tokio::main]
async fn main() {
    // Logs go to stderr so they never mix with the game screen
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match LessonCatalog::load_files(&config.database_files) {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Failed to load lesson databases: {:#}", e);
            error!("Set VOCAB_DATABASE_FILES to a comma-separated list of database files.");
            std::process::exit(1);
        }
    };
    info!("Loaded {} lessons", catalog.lessons().len());

    let host = GameHost::new().with_timings(config.timings);
    let mut app = App::new(host, catalog);

    println!("{}", help_text());
    println!("{}", render_view(&app.host().view()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_tick = Instant::now();

    loop {
        let wait = app
            .next_timer_in()
            .map(|due| due.saturating_sub(last_tick.elapsed()));

        tokio::select! {
            line = lines.next_line() => {
                // Timers that came due while waiting for input land first
                if let Some(screen) = tick(&mut app, &mut last_tick) {
                    println!("{}", screen);
                }
                match line {
                    Ok(Some(line)) => match app.handle_line(&line) {
                        Outcome::Quit => break,
                        Outcome::Continue(text) if text.is_empty() => {}
                        Outcome::Continue(text) => println!("{}", text),
                    },
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                }
            }
            _ = sleep_or_wait(wait) => {
                if let Some(screen) = tick(&mut app, &mut last_tick) {
                    println!("{}", screen);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Interrupted");
                break;
            }
        }
    }
}

fn tick(app: &mut App, last_tick: &mut Instant) -> Option<String> {
    let now = Instant::now();
    let elapsed = now.duration_since(*last_tick);
    *last_tick = now;
    app.tick(elapsed)
}

async fn sleep_or_wait(wait: Option<Duration>) {
    match wait {
        Some(duration) => tokio::time::sleep(duration).await,
        None => std::future::pending::<()>().await,
    }
}
