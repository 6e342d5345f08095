// ABOUTME: Output formatting for CLI feedback.
// ABOUTME: Colored leveled lines, plus quiet (CI) and JSON-lines modes.

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Output mode for CLI feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-friendly output with progress messages
    Normal,
    /// Minimal output for CI (warnings, errors and the final result)
    Quiet,
    /// JSON lines for scripting
    Json,
}

/// Severity of a console line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn marker(self) -> &'static str {
        match self {
            Level::Info => "→",
            Level::Success => "✓",
            Level::Warning => "!",
            Level::Error => "✗",
        }
    }

    fn event(self) -> &'static str {
        match self {
            Level::Info => "progress",
            Level::Success => "step",
            Level::Warning => "warning",
            Level::Error => "error",
        }
    }
}

/// Render one indented step line, colored when `color` is set.
pub fn format_line(level: Level, message: &str, color: bool) -> String {
    let marker = level.marker();
    if !color {
        return format!("  {marker} {message}");
    }
    let marker = match level {
        Level::Info => marker.cyan(),
        Level::Success => marker.green(),
        Level::Warning => marker.yellow(),
        Level::Error => marker.red(),
    };
    match level {
        Level::Warning => format!("  {} {}", marker, message.yellow()),
        Level::Error => format!("  {} {}", marker, message.red()),
        _ => format!("  {} {}", marker, message),
    }
}

/// Handles CLI output based on the configured mode.
#[derive(Debug)]
pub struct Output {
    mode: OutputMode,
    color: bool,
    start_time: Option<Instant>,
    warnings: AtomicUsize,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            color: mode == OutputMode::Normal && std::io::stdout().is_tty(),
            start_time: None,
            warnings: AtomicUsize::new(0),
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Number of warnings printed so far.
    pub fn warnings_shown(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }

    /// Start timing an operation.
    pub fn start_timer(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Get elapsed time since timer started.
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Print a heading line (suppressed in quiet/json mode).
    pub fn header(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            if self.color {
                println!("{}", message.bold());
            } else {
                println!("{message}");
            }
        }
    }

    /// Print a progress message (suppressed in quiet/json mode).
    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{}", format_line(Level::Info, message, self.color));
        }
    }

    /// Print a completed step (suppressed in quiet mode).
    pub fn step(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => println!("{}", format_line(Level::Success, message, self.color)),
            OutputMode::Quiet => {}
            OutputMode::Json => self.emit_json(Level::Success, message),
        }
    }

    /// Print a non-fatal warning.
    pub fn warning(&self, message: &str) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                eprintln!("{}", format_line(Level::Warning, message, self.color))
            }
            OutputMode::Json => self.emit_json(Level::Warning, message),
        }
    }

    /// Print a success message with optional timing.
    pub fn success(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => {
                let elapsed = self.elapsed_secs();
                let text = if elapsed > 0.0 {
                    format!("{message} ({:.1}s)", elapsed)
                } else {
                    message.to_string()
                };
                if self.color {
                    println!("{}", text.green().bold());
                } else {
                    println!("{text}");
                }
            }
            OutputMode::Quiet => {
                // Print only the essential result
                println!("{message}");
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "success",
                    message,
                    duration_secs: self.start_time.map(|_| self.elapsed_secs()),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    println!("{json}");
                }
            }
        }
    }

    /// Print an error message.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => {
                if self.color {
                    eprintln!("{} {}", "Error:".red().bold(), message);
                } else {
                    eprintln!("Error: {message}");
                }
            }
            OutputMode::Json => {
                let event = JsonEvent {
                    event: "error",
                    message,
                    duration_secs: self.start_time.map(|_| self.elapsed_secs()),
                };
                if let Ok(json) = serde_json::to_string(&event) {
                    eprintln!("{json}");
                }
            }
        }
    }

    /// Print a serializable document as one JSON line (json mode only).
    pub fn json<T: Serialize>(&self, value: &T) {
        if self.mode == OutputMode::Json
            && let Ok(json) = serde_json::to_string(value)
        {
            println!("{json}");
        }
    }

    fn emit_json(&self, level: Level, message: &str) {
        let event = JsonEvent {
            event: level.event(),
            message,
            duration_secs: None,
        };
        if let Ok(json) = serde_json::to_string(&event) {
            match level {
                Level::Warning | Level::Error => eprintln!("{json}"),
                _ => println!("{json}"),
            }
        }
    }
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
}
