use clap::Parser;
use navroute::LogLevel;
use navroute::core::config;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "navroute", about = "Breadcrumb route browser")]
struct Args {
    /// Config file to use instead of ~/.navroute/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Segment the route starts at
    #[arg(short, long)]
    root: Option<String>,

    /// Verbosity of navroute.log
    #[arg(long, default_value_t, value_enum)]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to navroute.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("navroute.log") {
        let _ = WriteLogger::init(args.log_level.into(), log_config, log_file);
    }

    let file_config = match &args.config {
        Some(path) => config::load_config_from(path)?,
        None => config::load_config()?,
    };
    let resolved = config::resolve(&file_config, args.root.as_deref())?;

    log::info!(
        "navroute starting at '{}' with {} segments",
        resolved.root_segment,
        resolved.table.len()
    );

    navroute::tui::run(resolved).await?;
    Ok(())
}
