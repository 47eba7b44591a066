//! String parsing utilities

const SECS_PER_DAY: i64 = 86_400;
const SECS_PER_HOUR: i64 = 3_600;
const SECS_PER_MIN: i64 = 60;

/// 0 °C in Kelvin
const ZERO_CELSIUS: f64 = 273.15;

/// Cut a kernel version string at its first `:`, dropping build metadata.
pub fn truncate_version(version: &str) -> &str {
    version.split(':').next().unwrap_or(version)
}

/// Collapse every run of spaces and tabs into a single space.
pub fn squeeze_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_blank = false;
    for c in s.chars() {
        if c == ' ' || c == '\t' {
            if !in_blank {
                out.push(' ');
            }
            in_blank = true;
        } else {
            out.push(c);
            in_blank = false;
        }
    }
    out
}

/// Last path component, unless the path ends in `/`.
pub fn basename(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) if idx + 1 < path.len() => &path[idx + 1..],
        _ => path,
    }
}

/// Number of newline-terminated lines; a trailing partial line does not count.
pub fn count_complete_lines(output: &str) -> usize {
    output.bytes().filter(|&b| b == b'\n').count()
}

/// Seconds since boot, including the skew bias.
pub fn uptime_seconds(boot_secs: i64, now_secs: i64, bias_secs: i64) -> i64 {
    now_secs - boot_secs + bias_secs
}

/// Format uptime as `Dd Hh Mm`.
pub fn format_uptime(seconds: i64) -> String {
    let days = seconds / SECS_PER_DAY;
    let rest = seconds % SECS_PER_DAY;
    let hours = rest / SECS_PER_HOUR;
    let mins = (rest % SECS_PER_HOUR) / SECS_PER_MIN;
    format!("{}d {}h {}m", days, hours, mins)
}

/// Total RAM in whole megabytes
pub fn memory_megabytes(page_size: i64, pages: i64) -> u64 {
    (page_size as u64).saturating_mul(pages as u64) / (1024 * 1024)
}

/// `dev.cpu.N.temperature` reports tenths of a Kelvin.
pub fn deci_kelvin_to_celsius(raw: i32) -> f64 {
    f64::from(raw) * 0.1 - ZERO_CELSIUS
}

/// `struct sensor` temperatures are micro-Kelvin; whole degrees, truncated.
pub fn micro_kelvin_to_celsius(raw: i64) -> i64 {
    ((raw - 273_150_000) as f64 / 1e6) as i64
}

/// Pull per-core temperatures out of envstat(8) output.
///
/// Only lines shaped like `cpuN temperature: <value> ...` are considered.
/// Reading stops at the first such line whose value is not a number.
pub fn parse_envstat_temperatures(output: &str) -> Vec<f64> {
    let mut temps = Vec::new();
    for line in output.lines() {
        let mut fields = line.split_whitespace();
        let (Some(sensor), Some(kind)) = (fields.next(), fields.next()) else {
            continue;
        };
        if !is_cpu_sensor(sensor) || kind != "temperature:" {
            continue;
        }
        match fields.next().and_then(|v| v.parse::<f64>().ok()) {
            Some(temp) => temps.push(temp),
            None => break,
        }
    }
    temps
}

fn is_cpu_sensor(name: &str) -> bool {
    name.strip_prefix("cpu")
        .map(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}
