use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use fingerprint_auth_lib::{
    adapters::TerminalScreen,
    bootstrap::{self, config::load_or_default, tracing::init_tracing_subscriber},
    FingerprintScreen,
};
use fp_app::FingerprintAuthenticator;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

const USAGE: &str = "commands: tap | cancel | status | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = load_or_default(config_path).context("Failed to load configuration")?;

    init_tracing_subscriber().context("Failed to initialize tracing")?;
    info!("starting fingerprint-auth");

    let deps = bootstrap::wire_dependencies(&config);
    let authenticator = Arc::new(FingerprintAuthenticator::from_deps(deps));
    let mut screen = FingerprintScreen::new(authenticator, Arc::new(TerminalScreen::new()));

    screen.on_create().await?;
    println!("{USAGE}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        match line.trim() {
            "tap" => {
                if let Err(err) = screen.on_icon_tap() {
                    warn!(error = %err, "authentication not started");
                    println!("cannot start: {err}");
                }
            }
            "cancel" => screen.cancel(),
            "status" => println!(
                "label: {} | icon: {} | session active: {}",
                screen.label(),
                if screen.icon_enabled() { "enabled" } else { "disabled" },
                screen.has_active_session()
            ),
            "quit" => break,
            "" => {}
            other => println!("unknown command `{other}`; {USAGE}"),
        }
    }

    screen.on_destroy();
    info!("fingerprint-auth stopped");
    Ok(())
}
