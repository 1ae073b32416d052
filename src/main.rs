use taskdeck::commands::Cli;
use taskdeck::libs::messages::macros::is_debug_mode;
use taskdeck::msg_error;
use tracing_subscriber::EnvFilter;

fn main() {
    dotenv::dotenv().ok();

    if is_debug_mode() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskdeck=debug")))
            .with_writer(std::io::stderr)
            .init();
    }

    if let Err(err) = Cli::menu() {
        msg_error!(format!("{:#}", err));
        std::process::exit(1);
    }
}
