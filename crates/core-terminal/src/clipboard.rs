//! Clipboard access through the platform's command-line tools.
//!
//! The provider is picked once from the environment (pasteboard on macOS,
//! Wayland or X11 tools on other unixes, PowerShell on Windows). Either
//! command can be overridden with an explicit argv from the config file.

use std::env;
use std::io::{self, Write};
use std::process::{Command, Stdio};

use core_actions::Clipboard;
use tracing::{debug, warn};

/// Paste (read) and copy (write) argv pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardCommands {
    pub paste: Vec<String>,
    pub copy: Vec<String>,
}

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| (*s).to_string()).collect()
}

fn binary_exists(name: &str) -> bool {
    env::var_os("PATH")
        .map(|paths| env::split_paths(&paths).any(|dir| dir.join(name).is_file()))
        .unwrap_or(false)
}

fn env_var_is_set(name: &str) -> bool {
    env::var_os(name).is_some_and(|v| !v.is_empty())
}

impl ClipboardCommands {
    /// Best guess for the current platform; `None` when no tool is available.
    pub fn detect() -> Option<Self> {
        if cfg!(windows) {
            return Some(Self {
                paste: argv(&["powershell", "-NoProfile", "-Command", "Get-Clipboard -Raw"]),
                copy: argv(&["clip"]),
            });
        }
        if cfg!(target_os = "macos") {
            return (binary_exists("pbpaste") && binary_exists("pbcopy")).then(|| Self {
                paste: argv(&["pbpaste"]),
                copy: argv(&["pbcopy"]),
            });
        }
        if env_var_is_set("WAYLAND_DISPLAY") && binary_exists("wl-paste") && binary_exists("wl-copy")
        {
            return Some(Self {
                paste: argv(&["wl-paste", "--no-newline"]),
                copy: argv(&["wl-copy", "--type", "text/plain"]),
            });
        }
        if binary_exists("xclip") {
            return Some(Self {
                paste: argv(&["xclip", "-o", "-selection", "clipboard"]),
                copy: argv(&["xclip", "-i", "-selection", "clipboard"]),
            });
        }
        if binary_exists("xsel") {
            return Some(Self {
                paste: argv(&["xsel", "-o", "-b"]),
                copy: argv(&["xsel", "-i", "-b"]),
            });
        }
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct SystemClipboard {
    paste: Option<Vec<String>>,
    copy: Option<Vec<String>>,
}

impl SystemClipboard {
    /// Detected commands, each replaced by its override when one is given.
    pub fn new(paste_override: Option<Vec<String>>, copy_override: Option<Vec<String>>) -> Self {
        let detected = ClipboardCommands::detect();
        let (paste, copy) = match detected {
            Some(c) => (Some(c.paste), Some(c.copy)),
            None => (None, None),
        };
        let clipboard = Self {
            paste: paste_override.filter(|v| !v.is_empty()).or(paste),
            copy: copy_override.filter(|v| !v.is_empty()).or(copy),
        };
        debug!(target: "io", paste = ?clipboard.paste, copy = ?clipboard.copy, "clipboard_commands");
        clipboard
    }

    pub fn with_commands(commands: ClipboardCommands) -> Self {
        Self {
            paste: Some(commands.paste),
            copy: Some(commands.copy),
        }
    }
}

fn unavailable() -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, "no clipboard tool available")
}

fn run(cmd: &[String], input: Option<&str>) -> io::Result<String> {
    let (program, args) = cmd.split_first().ok_or_else(unavailable)?;
    let mut child = Command::new(program)
        .args(args)
        .stdin(if input.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(if input.is_some() { Stdio::null() } else { Stdio::piped() })
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(input) = input {
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "clipboard stdin closed"))?;
        stdin.write_all(input.as_bytes())?;
    }

    let output = child.wait_with_output()?;
    if !output.status.success() {
        warn!(target: "io", program = %program, status = %output.status, "clipboard_command_failed");
        return Err(io::Error::other(format!("{program} exited with {}", output.status)));
    }
    String::from_utf8(output.stdout).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

impl Clipboard for SystemClipboard {
    fn get_text(&mut self) -> io::Result<String> {
        let cmd = self.paste.as_deref().ok_or_else(unavailable)?;
        run(cmd, None)
    }

    fn set_text(&mut self, text: &str) -> io::Result<()> {
        let cmd = self.copy.as_deref().ok_or_else(unavailable)?;
        run(cmd, Some(text)).map(|_| ())
    }
}
