//! Logo registry and `${cN}` color templating

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::color::{CYAN, GREEN, MAGENTA, RED, RESET, WHITE, YELLOW};
use crate::data::report::MAX_LINE_WIDTH;
use crate::data::OsVariant;
use crate::error::{FetchError, Result};
use crate::utils::file::read_lines_capped;

/// Longest logo that will be displayed
pub const MAX_LOGO_LINES: usize = 30;

/// Number of color slots a logo can reference (`${c1}`..`${c5}`)
pub const MAX_SLOTS: usize = 5;

/// Colors assigned positionally to `${c1}`, `${c2}`, ...; empty means none.
pub type Palette = [&'static str; MAX_SLOTS];

/// Where installed logo files live
pub const SYSTEM_LOGO_DIR: &str = "/usr/local/share/bsdfetch/ascii";

/// Checked before the system directory
pub const LOCAL_LOGO_DIR: &str = "./ascii";

struct Entry {
    name: &'static str,
    art: &'static str,
    palette: Palette,
}

static REGISTRY: [Entry; 4] = [
    Entry {
        name: "FreeBSD",
        art: include_str!("../ascii/freebsd.txt"),
        palette: [WHITE, RED, GREEN, "", ""],
    },
    Entry {
        name: "OpenBSD",
        art: include_str!("../ascii/openbsd.txt"),
        palette: [YELLOW, WHITE, CYAN, RED, ""],
    },
    Entry {
        name: "NetBSD",
        art: include_str!("../ascii/netbsd.txt"),
        palette: [MAGENTA, WHITE, "", "", ""],
    },
    Entry {
        name: "DragonFly",
        art: include_str!("../ascii/dragonfly.txt"),
        palette: [RED, WHITE, "", "", ""],
    },
];

/// Display art plus the palette its placeholders refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Logo {
    pub name: String,
    pub lines: Vec<String>,
    pub palette: Palette,
}

impl Logo {
    /// Every line templated for output.
    pub fn render(&self, color: bool) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| render_logo_line(line, &self.palette, color))
            .collect()
    }
}

/// Look up the compiled-in logo for an OS name (exact match).
///
/// An unknown name is reported as a warning and yields `None`.
pub fn select_logo(name: &str) -> Option<Logo> {
    match REGISTRY.iter().find(|entry| entry.name == name) {
        Some(entry) => Some(Logo {
            name: entry.name.to_string(),
            lines: entry.art.lines().map(String::from).collect(),
            palette: entry.palette,
        }),
        None => {
            warn!("Unsupported BSD variant: {}", name);
            None
        }
    }
}

/// Directories searched for logo files, in order.
pub fn search_paths(custom: Option<&Path>) -> Vec<PathBuf> {
    custom
        .map(Path::to_path_buf)
        .into_iter()
        .chain([PathBuf::from(LOCAL_LOGO_DIR), PathBuf::from(SYSTEM_LOGO_DIR)])
        .collect()
}

/// Load `<key>.txt` from the first directory that has it.
///
/// The palette still comes from the registry, so file logos may use the
/// same placeholders as the built-in ones.
pub fn load_logo_file(variant: OsVariant, dirs: &[PathBuf]) -> Result<Logo> {
    let file = format!("{}.txt", variant.key());

    for dir in dirs {
        let path = dir.join(&file);
        if !path.is_file() {
            continue;
        }
        debug!(path = %path.display(), "loading logo");
        let lines = read_lines_capped(&path, MAX_LOGO_LINES, MAX_LINE_WIDTH)?;
        let palette = REGISTRY
            .iter()
            .find(|entry| entry.name == variant.name())
            .map(|entry| entry.palette)
            .unwrap_or_default();
        return Ok(Logo {
            name: variant.name().to_string(),
            lines,
            palette,
        });
    }

    Err(FetchError::LogoNotFound {
        file,
        searched: dirs.to_vec(),
    })
}

/// Template one logo line.
///
/// With color on, each `${cN}` becomes the palette entry for slot N
/// (nothing when the slot is empty or out of range) and a reset is
/// appended. With color off the placeholders are simply dropped.
pub fn render_logo_line(line: &str, palette: &[&str], color: bool) -> String {
    let mut out = String::with_capacity(line.len() + 16);
    let mut rest = line;

    while let Some(start) = rest.find("${c") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();

        if digits > 0 && after[digits..].starts_with('}') {
            if color {
                let code = after[..digits]
                    .parse::<usize>()
                    .ok()
                    .and_then(|slot| slot.checked_sub(1))
                    .and_then(|idx| palette.get(idx));
                if let Some(code) = code {
                    out.push_str(code);
                }
            }
            rest = &after[digits + 1..];
        } else {
            out.push_str("${c");
            rest = after;
        }
    }
    out.push_str(rest);

    if color {
        out.push_str(RESET);
    }
    out
}
