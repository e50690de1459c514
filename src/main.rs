use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

use tutorat::core::config::{self, CliOverrides, EnvOverrides, TutoratConfig};

#[derive(Parser)]
#[command(name = "tutorat", about = "Tutoring app in the terminal: feed, shop, lessons and chat")]
struct Args {
    /// Route to open on start ("/", "/shop", "/cours", "/messages", "/profil")
    #[arg(short, long)]
    route: Option<String>,

    /// Log level written to tutorat.log (error, warn, info, debug, trace, off)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // The log level can come from the config file, so the logger starts after it is read
    let (file_config, load_error) = match config::load_config() {
        Ok(file_config) => (file_config, None),
        Err(e) => (TutoratConfig::default(), Some(e)),
    };
    let resolved = config::resolve(
        &file_config,
        &EnvOverrides::from_env(),
        &CliOverrides {
            route: args.route,
            log_level: args.log_level,
        },
    );

    // Initialize file logger - writes to tutorat.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("tutorat.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    if let Some(e) = load_error {
        log::warn!("Using default configuration: {}", e);
    }
    log::info!("Tutorat starting up with {:?}", resolved);

    tutorat::tui::run(resolved)
}
