mod app_state;
mod cli;
mod logging;
mod options;

use winit::event_loop::EventLoop;

use webbridge_bridge::Bridge;
use webbridge_common::WebBridgeError;
use webbridge_config::WebBridgeConfig;

fn main() {
    let args = cli::parse();

    let log = logging::init(args.log_level.as_deref());
    tracing::info!("WebBridge v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(&args, &log) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}

fn run(args: &cli::Args, log: &logging::LogHandle) -> webbridge_common::Result<()> {
    // Load config
    let loaded = match &args.config {
        Some(path) => {
            tracing::info!("Using config override: {}", path.display());
            webbridge_config::load_config_from(path)
        }
        None => webbridge_config::load_config(),
    };
    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        WebBridgeConfig::default()
    });
    log.apply_config_level(config.logging.level);

    // Ensure platform directories exist
    if let Err(e) = webbridge_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let assets = options::assets_dir(args);
    let default_db = match webbridge_platform::database_file() {
        Ok(path) => Some(path),
        Err(e) => {
            tracing::warn!("No platform data directory: {e}");
            None
        }
    };
    let bridge_options = options::bridge_options(args, &config, &assets, default_db);
    let bridge =
        Bridge::open(bridge_options).map_err(|e| WebBridgeError::Storage(e.to_string()))?;

    // Create event loop and run
    let event_loop = EventLoop::new().map_err(|e| WebBridgeError::Window(e.to_string()))?;
    let mut app = app_state::WebBridgeApp::new(config, bridge, assets);

    tracing::info!("Entering event loop");
    event_loop
        .run_app(&mut app)
        .map_err(|e| WebBridgeError::Window(e.to_string()))
}
