//! bsdfetch library
//!
//! System information for FreeBSD, OpenBSD, NetBSD and DragonFly,
//! printed next to (or under) the system's mascot logo.

pub mod collectors;
pub mod color;
pub mod config;
pub mod data;
pub mod display;
pub mod error;
pub mod host;
pub mod logo;
pub mod utils;

pub use data::{OsVariant, Report, ReportLine, VariantPolicy};
pub use error::{FetchError, Result};
pub use host::{HostQuery, NativeHost};

use collectors::{hardware, packages, system};

/// Detect which supported BSD the host runs.
pub fn detect_variant(host: &dyn HostQuery) -> Result<OsVariant> {
    host.uname()?.sysname.parse()
}

/// Run every probe in display order.
///
/// The first failing probe aborts collection; nothing is rendered from a
/// partial report.
pub fn collect_report(host: &dyn HostQuery, variant: OsVariant, policy: &VariantPolicy) -> Result<Report> {
    let mut report = Report::new();

    system::collect_os_identity(host, &mut report)?;
    system::collect_hostname(host, &mut report)?;
    system::collect_shell(host, &mut report)?;
    system::collect_user(host, &mut report)?;
    packages::collect_packages(host, variant, &mut report)?;
    system::collect_uptime(host, policy, &mut report)?;
    hardware::collect_memory(host, &mut report)?;
    system::collect_load_average(host, &mut report)?;
    hardware::collect_cpu(host, variant, policy, &mut report)?;

    Ok(report)
}
