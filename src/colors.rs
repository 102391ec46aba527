//! Terminal colour control.
//!
//! Honours `NO_COLOR` (https://no-color.org/), then `CLICOLOR_FORCE`, then
//! `CLICOLOR=0`, and otherwise colours only when stdout is a terminal.

use colored::control;
use std::io::IsTerminal;

/// Colour-related environment, captured once
#[derive(Debug, Clone, Default)]
pub struct ColorEnv {
    pub no_color: bool,
    pub clicolor: Option<String>,
    pub clicolor_force: Option<String>,
}

impl ColorEnv {
    pub fn from_env() -> Self {
        Self {
            no_color: std::env::var_os("NO_COLOR").is_some(),
            clicolor: std::env::var("CLICOLOR").ok(),
            clicolor_force: std::env::var("CLICOLOR_FORCE").ok(),
        }
    }

    /// Whether colour output should be enabled
    pub fn enabled(&self, is_tty: bool) -> bool {
        if self.no_color {
            return false;
        }
        if self.clicolor_force.as_deref().is_some_and(|v| v != "0") {
            return true;
        }
        if self.clicolor.as_deref() == Some("0") {
            return false;
        }
        is_tty
    }
}

/// Configure `colored` for the whole process. Call early in `main`.
pub fn init_colors() {
    let env = ColorEnv::from_env();
    control::set_override(env.enabled(std::io::stdout().is_terminal()));
}
