//! Pedal-to-mpv relay loop (evdev read + dispatch)

use crate::config::Config;
use crate::mpv::{MpvClient, MpvCommand};
use anyhow::{Context, Result};
use evdev::{Device, InputEvent, InputEventKind, Key};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Event value for a key press (0 = release, 2 = auto-repeat)
const KEY_PRESS: i32 = 1;

/// Map a pedal button to its command.
///
/// The three buttons come through as mouse-style codes on the pedal's HID
/// descriptor. Anything else the device might emit is ignored.
pub fn action_for_key(config: &Config, key: Key) -> Option<MpvCommand> {
    match key {
        Key::BTN_LEFT => Some(MpvCommand::Seek {
            seconds: -config.seek_back_secs,
        }),
        Key::BTN_RIGHT => Some(MpvCommand::Seek {
            seconds: config.seek_fwd_secs,
        }),
        Key::BTN_MIDDLE => Some(MpvCommand::CyclePause),
        _ => None,
    }
}

/// Run one event through the filter/dispatch path.
///
/// Send failures are logged and swallowed: mpv going away must not take
/// the relay down with it.
fn handle_event(ev: InputEvent, config: &Config, client: &MpvClient) {
    if let InputEventKind::Key(key) = ev.kind() {
        if ev.value() != KEY_PRESS {
            return;
        }

        if let Some(command) = action_for_key(config, key) {
            debug!("Pedal press: code={} -> {:?}", key.code(), command);
            if let Err(e) = client.send(&command) {
                warn!("Command dropped: {}", e);
            }
        }
    }
}

/// Process a finite batch of events through the same path the live loop
/// uses. This is the seam tests feed synthetic event sequences through.
pub fn dispatch_events(
    events: impl IntoIterator<Item = InputEvent>,
    config: &Config,
    client: &MpvClient,
) {
    for ev in events {
        handle_event(ev, config, client);
    }
}

/// Relay events from the pedal until the stop flag is raised.
///
/// The device fd is non-blocking; between empty batches we sleep briefly
/// so the flag check stays responsive. Read errors other than WouldBlock
/// are unrecoverable (no reconnection logic exists).
pub fn run_loop(
    stop: &AtomicBool,
    dev: &mut Device,
    client: &MpvClient,
    config: &Config,
) -> Result<()> {
    while !stop.load(Ordering::Relaxed) {
        match dev.fetch_events() {
            Ok(events) => {
                for ev in events {
                    handle_event(ev, config, client);
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                thread::sleep(Duration::from_millis(5));
            }
            Err(e) => return Err(e).context("failed to read events from pedal"),
        }
    }

    Ok(())
}
