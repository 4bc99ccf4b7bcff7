//! Command-line interface to manipulate a persistent dictionary file.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use clap::Parser;
use service::storage::{Match, PersDict};

#[derive(Parser, Debug)]
#[command(name = "persdic", about = "Command-line interface to manipulate the dictionary")]
struct Cli {
    /// File to use.
    #[arg(long, default_value = "persistence.json")]
    file: PathBuf,

    /// Entry to be added (KEY:VALUE, split on the first colon).
    #[arg(long, value_name = "KEY:VALUE")]
    add: Option<String>,

    /// Entry to be deleted.
    #[arg(long, value_name = "KEY")]
    delete: Option<String>,

    /// Return the value for this exact key.
    #[arg(long = "get_exact", value_name = "KEY")]
    get_exact: Option<String>,

    /// Return the value of the first key containing this text.
    #[arg(long = "get_partial", value_name = "KEY")]
    get_partial: Option<String>,

    /// Show the content.
    #[arg(long)]
    show: bool,

    /// Show the keys.
    #[arg(long)]
    keys: bool,
}

fn write_value(out: &mut impl Write, value: Option<String>) -> io::Result<()> {
    writeln!(out, "{}", value.as_deref().unwrap_or("<none>"))
}

/// Apply the requested actions in a fixed order: add, delete, get_exact,
/// get_partial, show, keys.
async fn execute(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let dict = PersDict::open(&cli.file).await?;

    if let Some(entry) = &cli.add {
        let (key, value) = entry
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("invalid entry `{entry}`, expected KEY:VALUE"))?;
        dict.add(key, value).await?;
    }

    if let Some(key) = &cli.delete {
        if !dict.delete(key).await? {
            writeln!(out, "key `{key}` not found")?;
        }
    }

    if let Some(key) = &cli.get_exact {
        write_value(out, dict.get(key, Match::Exact).await)?;
    }

    if let Some(key) = &cli.get_partial {
        write_value(out, dict.get(key, Match::Partial).await)?;
    }

    if cli.show {
        for (k, v) in dict.get_all().await {
            writeln!(out, "{k} -> {v}")?;
        }
    }

    if cli.keys {
        for k in dict.keys().await {
            writeln!(out, "{k}")?;
        }
    }

    Ok(())
}

/// Errors are reported on `out` and do not change the exit status.
async fn run(cli: &Cli, out: &mut impl Write) {
    if let Err(e) = execute(cli, out).await {
        let _ = writeln!(out, "error: {e:#}");
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_with("warn");

    let cli = Cli::parse();
    tracing::debug!(?cli, "persdic invoked");

    run(&cli, &mut io::stdout().lock()).await;
}
