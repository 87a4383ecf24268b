use clap::Parser;
use natter::ResponderKind;
use natter::core::config::{NatterConfig, load_config, resolve};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "natter", about = "Terminal chat widget with pluggable responders")]
struct Args {
    /// Responder the send action starts bound to
    #[arg(short, long, value_enum)]
    responder: Option<ResponderKind>,

    /// Skip the start-up greeting
    #[arg(long)]
    no_greeting: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to natter.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("natter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let config = load_config().unwrap_or_else(|e| {
        log::warn!("{}, falling back to defaults", e);
        NatterConfig::default()
    });
    let resolved = resolve(&config, args.responder, args.no_greeting);

    log::info!("Natter starting up with responder: {}", resolved.responder);

    natter::tui::run(resolved)
}
