use std::{
    error::Error,
    io,
    path::PathBuf,
};

use clap::Parser;
use env_logger::Env;
use log::warn;
use pipe_backend::{Backend, BackendConfig, LineTransport, Session, SqliteStore};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the TXT record database
    database: PathBuf,
    /// Name announced in the handshake banner
    #[arg(long, default_value = pipe_backend::config::DEFAULT_BANNER_NAME)]
    banner: String,
    /// 16 byte AES-128 key for timestamp answers
    #[arg(long)]
    key: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // stdout carries the protocol; all logging goes to stderr.
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = match cli.key {
        Some(key) => BackendConfig::new(cli.banner, &key)?,
        None => BackendConfig {
            banner_name: cli.banner,
            ..BackendConfig::default()
        },
    };
    let store = SqliteStore::open(&cli.database)?;

    let mut session = Session::new(Backend::new(store, config));
    let mut transport = LineTransport::new(io::stdin().lock(), io::stdout().lock());
    let summary = session.run(&mut transport);

    if let Err(e) = session.into_backend().into_store().close() {
        warn!("failed to close store: {e}");
    }

    let summary = summary?;
    if summary.failed > 0 {
        return Err(format!("Processor failed on {} input line(s)", summary.failed).into());
    }
    Ok(())
}
