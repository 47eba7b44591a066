//! Terminal colors

use tracing::warn;

pub const RED: &str = "\x1b[1;31m";
pub const GREEN: &str = "\x1b[1;32m";
pub const YELLOW: &str = "\x1b[1;33m";
pub const BLUE: &str = "\x1b[1;34m";
pub const MAGENTA: &str = "\x1b[1;35m";
pub const CYAN: &str = "\x1b[1;36m";
pub const WHITE: &str = "\x1b[1;37m";

/// Ends every colored segment
pub const RESET: &str = "\x1b[0m";

/// Resolve a configured color: a name from the table below or `#rrggbb`.
///
/// Unknown colors log a warning and resolve to `None`.
pub fn resolve(color: &str) -> Option<String> {
    if let Some(code) = named(color) {
        return Some(code.to_string());
    }
    if let Some(code) = hex_to_ansi(color) {
        return Some(code);
    }

    warn!(
        color,
        "unknown color; use black, red, green, yellow, blue, magenta, cyan, white, \
         their bright_ forms, gray, reset, or #rrggbb"
    );
    None
}

fn named(color: &str) -> Option<&'static str> {
    let code = match color.to_lowercase().as_str() {
        // Standard 8 colors (30-37)
        "black" => "\x1b[30m",
        "red" => "\x1b[31m",
        "green" => "\x1b[32m",
        "yellow" => "\x1b[33m",
        "blue" => "\x1b[34m",
        "magenta" | "purple" => "\x1b[35m",
        "cyan" => "\x1b[36m",
        "white" => "\x1b[37m",

        // Bold bright variants, as used by the logos
        "bright_black" | "gray" | "grey" => "\x1b[1;30m",
        "bright_red" => RED,
        "bright_green" => GREEN,
        "bright_yellow" => YELLOW,
        "bright_blue" => BLUE,
        "bright_magenta" => MAGENTA,
        "bright_cyan" => CYAN,
        "bright_white" => WHITE,

        "reset" | "default" => RESET,
        _ => return None,
    };
    Some(code)
}

fn hex_to_ansi(hex: &str) -> Option<String> {
    let digits = hex.strip_prefix('#').filter(|d| d.len() == 6)?;
    let channel = |range: std::ops::Range<usize>| {
        digits.get(range).and_then(|c| u8::from_str_radix(c, 16).ok())
    };
    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
    Some(format!("\x1b[38;2;{};{};{}m", r, g, b))
}
