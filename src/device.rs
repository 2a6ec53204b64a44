//! Pedal detection module (evdev)

use evdev::Device;
use std::os::unix::io::AsRawFd;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from pedal lookup
#[derive(Debug, Error)]
pub enum DeviceError {
    #[error(
        "no input device named '{name}' found \
         (hint: grep -A6 -B2 -i \"input\" /proc/bus/input/devices and check the Name= line)"
    )]
    NotFound { name: String },
}

/// Information about an enumerated input device
#[derive(Debug, Clone)]
pub struct InputDeviceInfo {
    pub path: PathBuf,
    pub name: String,
}

/// List all input devices we can open, for diagnostics when the
/// configured pedal is missing.
pub fn list_input_devices() -> Vec<InputDeviceInfo> {
    let mut devices = Vec::new();

    for (path, dev) in evdev::enumerate() {
        devices.push(InputDeviceInfo {
            path,
            name: dev.name().unwrap_or_default().to_string(),
        });
    }

    devices
}

/// Find the pedal by its exact reported name.
///
/// Scans every /dev/input/event* node and returns the first device whose
/// name matches. No fuzzy matching: pedals identify as generic HID
/// devices, so anything looser risks grabbing a real mouse.
pub fn find_pedal(name: &str) -> Result<Device, DeviceError> {
    for (path, dev) in evdev::enumerate() {
        if dev.name().unwrap_or_default() == name {
            info!("Using pedal: {:?} ('{}')", path, name);
            return Ok(dev);
        }
    }

    Err(DeviceError::NotFound {
        name: name.to_string(),
    })
}

/// Grab the pedal so its clicks don't reach other applications.
///
/// Grab failure is not fatal: without permissions for EVIOCGRAB the relay
/// still works, the clicks just also land wherever the focus is.
pub fn grab_pedal(dev: &mut Device) {
    match dev.grab() {
        Ok(()) => info!("Grabbed pedal (exclusive access)"),
        Err(e) => warn!("Could not grab pedal (continuing): {}", e),
    }
}

/// Switch the device fd to non-blocking so the event loop can poll the
/// stop flag between event batches.
pub fn set_nonblocking(dev: &Device) -> std::io::Result<()> {
    let raw_fd = dev.as_raw_fd();

    // Preserve existing flags; just OR in O_NONBLOCK.
    let current = unsafe { libc::fcntl(raw_fd, libc::F_GETFL) };
    if current < 0 {
        return Err(std::io::Error::last_os_error());
    }

    let rc = unsafe { libc::fcntl(raw_fd, libc::F_SETFL, current | libc::O_NONBLOCK) };
    if rc < 0 {
        return Err(std::io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error_names_device() {
        let err = DeviceError::NotFound {
            name: "Pedal X".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Pedal X"));
        assert!(msg.contains("/proc/bus/input/devices"));
    }

    #[test]
    fn test_find_pedal_unmatched_name_fails() {
        // No real device reports this name; enumeration may also be empty
        // in a sandbox. Either way the lookup must fail, not fall back.
        let result = find_pedal("pedal-mpv test device that does not exist");
        assert!(matches!(result, Err(DeviceError::NotFound { .. })));
    }
}
