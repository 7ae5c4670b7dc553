use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use quadriga_zenoh_runtime::config::DriveParams;

/// Teleop runtime for the quadriga swerve base
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to a JSON drive-parameters file (built-in defaults if omitted)
    #[arg(long)]
    params: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    // Setup logging (set RUST_LOG=info or debug)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .init(); // installs the subscriber globally

    let args = Args::parse();

    let params = match args.params {
        Some(path) => match DriveParams::load(&path) {
            Ok(params) => params,
            Err(e) => {
                eprintln!("Params error: {}", e);
                std::process::exit(1);
            }
        },
        None => DriveParams::default(),
    };

    if let Err(e) = quadriga_zenoh_runtime::runtime::run(params).await {
        eprintln!("Runtime error: {}", e);
        std::process::exit(1);
    }
}
