//! Interactive terminal task list.
//!
//! Reads one command per line from stdin and re-renders the page on stdout.
//! Logs go to stderr.

use anyhow::Context;
use tasklist::shell::Shell;
use tasklist::{Config, TaskEnvironment, new_store};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = Config::from_env().context("loading configuration")?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_new(&config.log_filter).context("parsing log filter")?)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        id_strategy = ?config.id_strategy,
        max_feedback_actions = config.max_feedback_actions,
        "Configuration loaded"
    );

    let store = new_store(TaskEnvironment::new(config.id_generator()), config.store_config());
    let mut shell = Shell::new(store.clone());

    let result = shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await;
    store.close();

    result.context("running shell")?;
    info!("Goodbye");
    Ok(())
}
