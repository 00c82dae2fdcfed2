//! `taskboard` -- terminal front-end for a task server.
//!
//! Every command loads the board first, applies one action through the
//! store, then prints the filtered list and counts.
//!
//! # Usage
//!
//! ```bash
//! taskboard list --filter active
//! taskboard add "Buy milk" --priority high --tags "shop, home"
//! taskboard done <id>
//! TASKBOARD_API_URL=http://127.0.0.1:8080/api/todos taskboard list
//! ```

mod args;
mod render;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use taskboard_core::{ClientConfig, ErrorKind, TaskApi, TaskStore, Transport};

use args::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_new(&cli.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = ClientConfig::resolve(cli.api_url.as_deref()).context("bad API URL")?;
    tracing::debug!(url = %config.base_url(), "using task server");
    let mut store = TaskStore::new(TaskApi::connect(config));

    if store.reload().await.is_err() {
        return Ok(report(&store));
    }

    let outcome = match cli.command {
        Command::List { filter } => {
            store.set_filter(filter);
            Ok(())
        }
        Command::Add(args) => {
            store.begin_add();
            store
                .submit(&args.to_form())
                .await
                .map(|task| println!("created {}", task.id))
        }
        Command::Edit(args) => {
            let result = match store.begin_edit(&args.id) {
                Some(mut form) => {
                    args.apply(&mut form);
                    store.submit(&form).await
                }
                // Not in the loaded list; the server decides whether it exists.
                None => store.edit(&args.id, args.to_patch()?).await,
            };
            result.map(|task| println!("updated {}", task.id))
        }
        Command::Done { id } => store.toggle(&id, true).await.map(|_| ()),
        Command::Undo { id } => store.toggle(&id, false).await.map(|_| ()),
        Command::Rm { id } => store.remove(&id).await.map(|()| println!("deleted {id}")),
    };

    if outcome.is_err() {
        return Ok(report(&store));
    }
    let today = chrono::Local::now().date_naive();
    print!(
        "{}",
        render::board(&store.visible(), store.counts(), store.filter(), today)
    );
    Ok(ExitCode::SUCCESS)
}

/// Print the store's recorded error and pick the exit status.
fn report<T: Transport>(store: &TaskStore<T>) -> ExitCode {
    if let Some(error) = store.error() {
        eprintln!("error: {error}");
        if error.kind() == ErrorKind::Connection {
            eprintln!("hint: start the server or point --api-url at it, then retry");
        }
    }
    ExitCode::FAILURE
}
