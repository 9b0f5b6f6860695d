#![deny(clippy::implicit_return)]
#![allow(clippy::needless_return)]

mod application;
mod configuration;
mod domain;
mod infrastructure;

use std::env;
use std::process;
use std::sync::Arc;

use anyhow::bail;
use anyhow::Error;
use anyhow::Result;
use domain::models::BackendName;
use infrastructure::backends::BackendManager;
use infrastructure::documents::pdf::Pdf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Layer;
use yansi::Paint;

use crate::application::cli;
use crate::application::server;
use crate::application::server::AppState;
use crate::configuration::Config;
use crate::configuration::ConfigKey;

fn handle_error(err: Error) {
    eprintln!(
            "{}",
            Paint::red(format!(
                "Oh no! The interview server has failed with the following app version and error.\n\nVersion: {}\nCommit: {}\nError: {}",
                env!("CARGO_PKG_VERSION"),
                env!("VERGEN_GIT_DESCRIBE"),
                err
            ))
        );

    let backtrace = err.backtrace();
    if backtrace.to_string() == "disabled backtrace" {
        let args = env::args().collect::<Vec<String>>().join(" ");
        eprintln!("\nRunning the following can help explain further what the issue is:");
        eprintln!("\nRUST_BACKTRACE=1 {args}");
    } else {
        eprintln!("\n{}", backtrace);
    }

    process::exit(1);
}

/// Plain logs go to stdout. Setting MOCKINTERVIEW_LOG_DIR also writes JSON
/// lines to `server.log` in that directory. The returned guard must live until
/// exit so buffered lines are flushed.
fn init_tracing() -> Option<WorkerGuard> {
    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| return EnvFilter::new("mockinterview=info,tower_http=info"));
    let stdout_layer = tracing_subscriber::fmt::layer().with_filter(stdout_filter);

    let log_dir = match env::var("MOCKINTERVIEW_LOG_DIR") {
        Ok(dir) => dir,
        Err(_) => {
            tracing_subscriber::registry().with(stdout_layer).init();
            return None;
        }
    };

    let file_appender = tracing_appender::rolling::never(log_dir, "server.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| return EnvFilter::new("mockinterview=debug,tower_http=debug"));
    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(writer)
        .with_filter(file_filter);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(file_layer)
        .init();

    return Some(guard);
}

async fn start() -> Result<()> {
    let backend_name = Config::get(ConfigKey::Backend);
    let backend = match BackendName::parse(backend_name.to_string()) {
        Some(name) => BackendManager::get(name)?,
        None => bail!(format!("Unknown backend '{backend_name}'")),
    };
    backend.health_check().await?;

    let state = AppState::new(
        backend,
        Arc::new(Pdf::default()),
        Config::interview_settings()?,
    );

    return server::serve(
        state,
        &Config::get(ConfigKey::Host),
        Config::get_parsed::<u16>(ConfigKey::Port)?,
        Config::get_parsed::<usize>(ConfigKey::MaxUploadBytes)?,
    )
    .await;
}

#[tokio::main]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let _guard = init_tracing();

    let ready = match cli::parse().await {
        Ok(ready) => ready,
        Err(err) => {
            handle_error(err);
            return;
        }
    };
    if !ready {
        process::exit(0);
    }

    if let Err(err) = start().await {
        handle_error(err);
    }
}
