use chrono::Local;
use dotenvy::dotenv;
use moneywise::{config, errors::Result, shell};
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Load .env first so RUST_LOG and MONEYWISE_* can come from it
    dotenv().ok();

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;

    // 4. Load the question bank (built-in unless config names a file)
    let bank = app_config
        .question_bank()
        .inspect(|bank| info!("Question bank ready with {} questions", bank.all().len()))
        .inspect_err(|e| error!("Failed to load question bank: {}", e))?;

    // 5. Run the shell on stdin/stdout
    let today = || Local::now().date_naive();
    let mut shell = shell::Shell::new(&app_config, bank, today())
        .inspect_err(|e| error!("Failed to start shell: {}", e))?;

    shell::run(
        &mut shell,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
        Duration::from_millis(app_config.advisor.reply_delay_ms),
        today,
    )
    .await
    .inspect_err(|e| error!("Shell stopped: {}", e))?;

    Ok(())
}
