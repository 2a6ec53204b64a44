//! mpv IPC client
//!
//! mpv exposes a Unix socket (--input-ipc-server=<path>) accepting one
//! JSON command object per line. The relay is a pure client: each command
//! opens a fresh connection, writes a single line, and closes it without
//! reading the reply.

use serde_json::json;
use std::io::{ErrorKind, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from sending a command to mpv
#[derive(Debug, Error)]
pub enum SendError {
    #[error("mpv socket not found at {path:?} (start mpv with --input-ipc-server={path:?})")]
    SocketMissing { path: PathBuf },

    #[error("connection refused at {path:?} (is mpv running?)")]
    ConnectionRefused { path: PathBuf },

    #[error("mpv socket I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// A command the pedal can trigger
#[derive(Debug, Clone, PartialEq)]
pub enum MpvCommand {
    /// Relative seek by the given number of seconds (negative = backward)
    Seek { seconds: f64 },
    /// Toggle the pause property
    CyclePause,
}

impl MpvCommand {
    /// Encode as one newline-terminated line of mpv's IPC protocol.
    pub fn to_line(&self) -> String {
        let value = match self {
            MpvCommand::Seek { seconds } => json!({"command": ["seek", seconds, "relative"]}),
            MpvCommand::CyclePause => json!({"command": ["cycle", "pause"]}),
        };
        format!("{value}\n")
    }
}

/// Client for mpv's IPC socket
#[derive(Debug, Clone)]
pub struct MpvClient {
    socket_path: PathBuf,
}

impl MpvClient {
    pub fn new(socket_path: impl Into<PathBuf>) -> Self {
        Self {
            socket_path: socket_path.into(),
        }
    }

    /// Send a single command. Fire-and-forget: no reply is read, and the
    /// connection is closed as soon as the line is written.
    pub fn send(&self, command: &MpvCommand) -> Result<(), SendError> {
        let mut stream =
            UnixStream::connect(&self.socket_path).map_err(|e| self.classify_connect_error(e))?;

        stream.write_all(command.to_line().as_bytes())?;
        Ok(())
    }

    fn classify_connect_error(&self, err: std::io::Error) -> SendError {
        match err.kind() {
            ErrorKind::NotFound => SendError::SocketMissing {
                path: self.socket_path.clone(),
            },
            ErrorKind::ConnectionRefused => SendError::ConnectionRefused {
                path: self.socket_path.clone(),
            },
            _ => SendError::Io(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seek_backward_encoding() {
        let cmd = MpvCommand::Seek { seconds: -0.5 };
        assert_eq!(cmd.to_line(), "{\"command\":[\"seek\",-0.5,\"relative\"]}\n");
    }

    #[test]
    fn test_seek_forward_encoding() {
        let cmd = MpvCommand::Seek { seconds: 0.5 };
        assert_eq!(cmd.to_line(), "{\"command\":[\"seek\",0.5,\"relative\"]}\n");
    }

    #[test]
    fn test_cycle_pause_encoding() {
        let cmd = MpvCommand::CyclePause;
        assert_eq!(cmd.to_line(), "{\"command\":[\"cycle\",\"pause\"]}\n");
    }

    #[test]
    fn test_lines_are_valid_single_line_json() {
        for cmd in [
            MpvCommand::Seek { seconds: -1.5 },
            MpvCommand::Seek { seconds: 2.0 },
            MpvCommand::CyclePause,
        ] {
            let line = cmd.to_line();
            assert!(line.ends_with('\n'));
            let body = line.trim_end();
            assert!(!body.contains('\n'));
            let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
            assert!(parsed["command"].is_array());
        }
    }

    #[test]
    fn test_send_to_missing_socket() {
        let client = MpvClient::new("/nonexistent/pedal-mpv-test.sock");
        let err = client.send(&MpvCommand::CyclePause).unwrap_err();
        assert!(matches!(err, SendError::SocketMissing { .. }));
        assert!(err.to_string().contains("--input-ipc-server"));
    }

    #[test]
    fn test_send_to_refusing_socket() {
        use std::os::unix::net::UnixListener;

        // Bind then drop the listener: the path stays on disk but nobody
        // is accepting, which is exactly the "mpv exited" failure mode.
        let path = std::env::temp_dir().join(format!("pedal-mpv-refused-{}.sock", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let listener = UnixListener::bind(&path).unwrap();
        drop(listener);

        let client = MpvClient::new(&path);
        let err = client.send(&MpvCommand::CyclePause).unwrap_err();
        assert!(matches!(err, SendError::ConnectionRefused { .. }));

        let _ = std::fs::remove_file(&path);
    }
}
