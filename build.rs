use std::env;

use chrono::{TimeZone, Utc};

fn main() {
    println!("cargo:rerun-if-env-changed=SOURCE_DATE_EPOCH");

    // Reproducible builds pin the date, otherwise stamp the current day
    let now = env::var("SOURCE_DATE_EPOCH")
        .ok()
        .and_then(|epoch| epoch.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
        .unwrap_or_else(Utc::now);

    // Same shape as the C preprocessor's __DATE__, e.g. "Oct  8 2026"
    println!(
        "cargo:rustc-env=BSDFETCH_BUILD_DATE={}",
        now.format("%b %e %Y")
    );
}
