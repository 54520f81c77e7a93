use anyhow::Result;
use colored::Colorize;
use options_radar::{api_server, config, logging, pipeline::Pipeline, scheduler, AlertStore};

/// Run one scan-and-deliver cycle
async fn run_scan() -> Result<()> {
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Options Radar Scan".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();

    let tickers = config::get_tickers();
    println!("{} Scanning {} tickers...", "→".cyan(), tickers.len());

    let pipeline = Pipeline::from_env()?;
    let start_time = std::time::Instant::now();
    let summary = pipeline.run().await?;
    let elapsed = start_time.elapsed();

    println!();
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Summary".cyan().bold());
    println!("{}", "=".repeat(60).blue());
    println!("{} Alerts found: {}", "✓".green(), summary.total_found);
    println!("{} Alerts published: {}", "✓".green(), summary.published);
    println!("{} Time taken: {:.2}s", "⏱".yellow(), elapsed.as_secs_f64());

    if summary.published > 0 {
        println!(
            "{} Dashboard available at: {}",
            "ℹ".blue(),
            config::get_dashboard_url().yellow()
        );
    } else {
        println!("{} No alerts found matching criteria", "ℹ".blue());
    }

    println!();
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Done!".green().bold());
    println!("{}", "=".repeat(60).blue());

    Ok(())
}

/// Run API server mode
async fn run_server(port: u16) -> Result<()> {
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Options Radar API Server".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!();

    let store = AlertStore::new(config::SNAPSHOT_FILE);
    api_server::start_server(store, port).await
}

/// Run the hourly autopilot loop
async fn run_autopilot() -> Result<()> {
    println!("{}", "=".repeat(60).blue());
    println!("{}", "Options Radar Autopilot".green().bold());
    println!("{}", "=".repeat(60).blue());
    println!("{} Scans run at the top of every hour", "ℹ".blue());
    println!("{} Press Ctrl+C to stop", "ℹ".blue());
    println!();

    let pipeline = Pipeline::from_env()?;
    scheduler::run_autopilot(pipeline).await
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging();

    let mode = config::get_execution_mode();
    let port = config::get_port();

    match mode.as_str() {
        "scan" => run_scan().await?,
        "server" => run_server(port).await?,
        "autopilot" => run_autopilot().await?,
        _ => {
            eprintln!("Invalid mode '{}'. Use 'scan', 'server', or 'autopilot'", mode);
            eprintln!("Set RADAR_MODE environment variable to control execution mode");
            eprintln!("Examples:");
            eprintln!("  RADAR_MODE=scan cargo run                  # One scan cycle");
            eprintln!("  RADAR_MODE=server RADAR_PORT=5000 cargo run # Start alert API");
            eprintln!("  RADAR_MODE=autopilot cargo run             # Hourly scan loop");
            std::process::exit(1);
        }
    }

    Ok(())
}
