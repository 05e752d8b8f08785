use std::io;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use tracing::info;

use appointment_scheduler::config::{Cli, Mode};
use appointment_scheduler::console::ConsoleSession;
use appointment_scheduler::{logging, web};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let slot_config = cli.slot_config()?;
    info!(
        slot_minutes = slot_config.duration.num_minutes(),
        slot_count = slot_config.count,
        "slot configuration loaded"
    );

    match cli.mode() {
        Mode::Web { port, bind } => {
            println!("Access the booking form at http://localhost:{}", port);
            web::start_server(&bind, port, slot_config)
                .await
                .with_context(|| format!("web server on {}:{} failed", bind, port))?;
        }
        Mode::Console => {
            let mut session = ConsoleSession::new(slot_config, Local::now().time());
            session
                .run(io::stdin().lock(), io::stdout().lock())
                .context("console session failed")?;
        }
    }

    Ok(())
}
