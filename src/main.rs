//! pedal-mpv - Foot Pedal to mpv Bridge
//!
//! Relays a three-button USB foot pedal to mpv's IPC socket:
//! left seeks backward, right seeks forward, middle toggles pause.

mod bridge;
mod config;
mod device;
mod mpv;

use anyhow::{Context, Result};
use config::Config;
use mpv::MpvClient;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{error, info};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("pedal-mpv starting...");

    let config = Config::load()?;

    let mut dev = match device::find_pedal(&config.device_name) {
        Ok(dev) => dev,
        Err(e) => {
            error!("{}", e);
            // Log what IS connected so the user can fix device_name
            let devices = device::list_input_devices();
            if devices.is_empty() {
                info!("No input devices visible (missing permissions on /dev/input?)");
            } else {
                info!("Available input devices:");
                for d in &devices {
                    info!("  {:?}: '{}'", d.path, d.name);
                }
            }
            return Err(e.into());
        }
    };

    if config.grab_device {
        device::grab_pedal(&mut dev);
    }

    device::set_nonblocking(&dev).context("Failed to set pedal device non-blocking")?;

    info!(
        "Left: -{}s | Middle: play/pause | Right: +{}s",
        config.seek_back_secs, config.seek_fwd_secs
    );
    info!("Sending commands to {:?}", config.socket_path);

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = stop.clone();
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("Failed to install Ctrl-C handler")?;
    }

    let client = MpvClient::new(config.socket_path.clone());
    bridge::run_loop(&stop, &mut dev, &client, &config)?;

    // Best-effort ungrab. (Dropping the device would also release it.)
    let _ = dev.ungrab();

    info!("pedal-mpv shutting down");
    Ok(())
}
