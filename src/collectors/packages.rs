//! Package management information collection

use tracing::debug;

use crate::data::{OsVariant, Report};
use crate::error::Result;
use crate::host::HostQuery;
use crate::utils::parsing::count_complete_lines;

/// One package per line of `pkg info` / `pkg_info` output.
pub fn collect_packages(host: &dyn HostQuery, variant: OsVariant, report: &mut Report) -> Result<()> {
    let output = host.query_external_command(variant.package_command())?;
    let count = count_complete_lines(&output);
    debug!(count, %variant, "installed packages");

    report.append("Packages", format_args!("{}", count));
    Ok(())
}
