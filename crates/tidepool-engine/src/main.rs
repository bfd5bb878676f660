//! Engine binary for the Tidepool simulation.
//!
//! This is the main entry point that wires together the scheduler, the
//! save slot and the command API. It loads configuration, restores the
//! saved tank, and runs the tick loop until a termination condition is
//! met.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `tidepool-config.yaml`
//! 2. Initialize structured logging (tracing)
//! 3. Open the configured save slot and load the tank
//! 4. Build the aquarium and operator state
//! 5. Start the command API server
//! 6. Run the scheduler
//! 7. Flush the final save and log the result

mod engine_callback;
mod error;

use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tidepool_api::ServerConfig;
use tidepool_api::state::AppState;
use tidepool_core::config::StoreBackend;
use tidepool_core::operator::OperatorState;
use tidepool_core::{Aquarium, SimulationConfig, runner};
use tidepool_store::{AnyStore, DragonflyStore, FileStore, MemoryStore, SaveWriter};
use tokio::sync::Mutex;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::engine_callback::EngineCallback;
use crate::error::EngineError;

/// Path of the optional configuration file, relative to the working
/// directory.
const CONFIG_PATH: &str = "tidepool-config.yaml";

/// Application entry point for the engine.
///
/// # Errors
///
/// Returns an error if configuration, the save slot or the API server
/// cannot be initialized.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load configuration.
    let config = SimulationConfig::load_or_default(Path::new(CONFIG_PATH))
        .map_err(EngineError::from)?;

    // 2. Initialize structured logging. RUST_LOG wins over the config.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!(
        tank = config.tank.name,
        seed = config.tank.seed,
        tick_interval_ms = config.simulation.tick_interval_ms,
        backend = ?config.store.backend,
        "tidepool-engine starting"
    );

    // 3. Open the save slot and restore the tank.
    let store = open_store(&config).await?;
    let key = config.store.save_key.clone();
    let tank = tidepool_store::load_or_default(&store, &key, Utc::now()).await;
    info!(
        backend = store.kind(),
        key = %key,
        creatures = tank.creatures.len(),
        coins = tank.coins,
        "Tank restored"
    );

    // 4. Build the aquarium and operator state.
    let aquarium = Arc::new(Mutex::new(Aquarium::from_config(tank, &config)));
    let operator = Arc::new(OperatorState::new(&config.simulation));
    info!(
        max_ticks = operator.max_ticks(),
        tick_interval_ms = operator.tick_interval_ms(),
        "Operator state initialized"
    );

    // 5. Start the command API server.
    let app_state = Arc::new(AppState::with_operator(
        Arc::clone(&aquarium),
        Arc::clone(&operator),
    ));
    let api_handle = if config.api.enabled {
        let handle = tidepool_api::spawn_api(ServerConfig::from(&config.api), Arc::clone(&app_state))
            .map_err(|e| EngineError::Api {
                message: format!("{e}"),
            })?;
        Some(handle)
    } else {
        info!("Command API disabled");
        None
    };

    // Ctrl-C requests a clean stop so the last tick is saved.
    {
        let operator = Arc::clone(&operator);
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupt received, stopping");
                    operator.request_stop();
                }
                Err(e) => warn!(error = %e, "Failed to listen for interrupt"),
            }
        });
    }

    // 6. Run the scheduler.
    let writer = SaveWriter::spawn(store, key);
    let mut callback = EngineCallback::new(Arc::clone(&app_state), writer);
    let result = runner::run_simulation(&aquarium, &operator, &mut callback).await;
    runner::log_simulation_end(&result);

    // 7. Save whatever commands changed after the last tick, then flush.
    let writer = callback.into_writer();
    {
        let tank = aquarium.lock().await;
        if let Err(e) = writer.submit(tank.state()) {
            warn!(error = %e, "Failed to queue final save");
        }
    }
    let writes = writer.shutdown().await;

    if let Some(handle) = api_handle {
        handle.abort();
    }

    info!(
        total_ticks = result.total_ticks,
        saves_written = writes,
        "tidepool-engine shutdown complete"
    );

    Ok(())
}

/// Open the save slot selected by `store.backend`.
async fn open_store(config: &SimulationConfig) -> Result<AnyStore, EngineError> {
    let store = match config.store.backend {
        StoreBackend::Memory => {
            warn!("Memory save slot selected; the tank will not survive a restart");
            AnyStore::Memory(MemoryStore::new())
        }
        StoreBackend::File => {
            let store = FileStore::new(&config.store.save_dir);
            info!(dir = %store.dir().display(), "Using file save slot");
            AnyStore::File(store)
        }
        StoreBackend::Dragonfly => {
            info!(url = %config.store.dragonfly_url, "Connecting to Dragonfly");
            AnyStore::Dragonfly(DragonflyStore::connect(&config.store.dragonfly_url).await?)
        }
    };
    Ok(store)
}
