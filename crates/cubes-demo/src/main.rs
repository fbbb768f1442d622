use std::time::Duration;

use anyhow::Result;
use cubes_engine::device::GpuInit;
use cubes_engine::logging::{init_logging, LoggingConfig};
use cubes_engine::scene::SceneConfig;
use cubes_engine::window::{Runtime, RuntimeConfig, ShutdownHandle};

/// Optional auto-exit, for smoke runs: seconds before the loop is stopped.
const EXIT_AFTER_ENV: &str = "CUBES_EXIT_AFTER_SECS";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let shutdown = ShutdownHandle::new();
    if let Some(secs) = exit_after() {
        log::info!("stopping after {secs:?}");
        let handle = shutdown.clone();
        std::thread::spawn(move || {
            std::thread::sleep(secs);
            handle.request();
        });
    }

    let config = RuntimeConfig {
        title: "Two Cubes".to_string(),
        ..RuntimeConfig::default()
    };

    let result = Runtime::run(config, GpuInit::default(), SceneConfig::default(), shutdown);
    if let Err(err) = &result {
        log::error!("exiting: {err:#}");
    }
    result
}

fn exit_after() -> Option<Duration> {
    let raw = std::env::var(EXIT_AFTER_ENV).ok()?;
    match raw.trim().parse::<f64>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => Some(Duration::from_secs_f64(secs)),
        _ => {
            log::warn!("ignoring {EXIT_AFTER_ENV}={raw:?}: not a number of seconds");
            None
        }
    }
}
