//! Explicit logging handle passed down from the client to every component
//!
//! The library never installs a logger; records go through the `log` facade
//! with the component name as target. Each handle also carries the level the
//! caller configured on the client, so one client can be verbose while another
//! in the same process stays quiet.

use log::{Level, LevelFilter};
use std::fmt;
use std::str::FromStr;

use crate::config::defaults;
use crate::error::{Result, TfeError};

/// Level-filtered logging handle bound to one component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogHandle {
    level: LevelFilter,
    target: &'static str,
}

impl Default for LogHandle {
    fn default() -> Self {
        Self::new(LevelFilter::Warn, "tfe_client")
    }
}

impl LogHandle {
    pub fn new(level: LevelFilter, target: &'static str) -> Self {
        Self { level, target }
    }

    /// Handle for a sub-component sharing this handle's level
    pub fn child(&self, target: &'static str) -> Self {
        Self {
            level: self.level,
            target,
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn target(&self) -> &'static str {
        self.target
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            log::log!(target: self.target, level, "{}", args);
        }
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Error, args);
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Warn, args);
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Info, args);
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Debug, args);
    }

    pub fn trace(&self, args: fmt::Arguments<'_>) {
        self.log(Level::Trace, args);
    }
}

/// Parse a level name (error, warn, info, debug, trace, off)
pub fn parse_level(name: &str) -> Result<LevelFilter> {
    LevelFilter::from_str(name.trim()).map_err(|_| {
        TfeError::invalid_param(
            "log_level",
            name,
            &["off", "error", "warn", "info", "debug", "trace"],
        )
    })
}

/// The level used when the caller configures none
pub fn default_level() -> LevelFilter {
    parse_level(defaults::LOG_LEVEL).unwrap_or(LevelFilter::Warn)
}
