use khoj::auth::SessionStore;
use khoj::cli::{parse_args, run_command, USAGE};
use khoj::config::ClientConfig;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "KHOJ_LOG";

/// Install the stderr log subscriber.
///
/// `KHOJ_LOG` wins when set; otherwise `--verbose` picks debug level.
fn init_logging(verbose: bool) {
    let default = if verbose { "khoj=debug" } else { "khoj=info" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let invocation = match parse_args(std::env::args()) {
        Ok(invocation) => invocation,
        Err(e) => {
            eprintln!("error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    init_logging(invocation.verbose);

    let config = ClientConfig::resolve(invocation.api_url.as_deref());
    let store = SessionStore::new().ok_or_else(|| eyre!("Cannot determine home directory; set KHOJ_HOME"))?;

    run_command(invocation.command, config, &store).await
}
