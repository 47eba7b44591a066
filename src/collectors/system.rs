//! System information collection (OS, host, user, uptime, load)

use libc::timeval;
use tracing::debug;

use crate::data::{Report, VariantPolicy};
use crate::error::{FetchError, Result};
use crate::host::{decode_record, HostQuery};
use crate::utils::parsing::{basename, format_uptime, truncate_version, uptime_seconds};

/// OS, Release, Version and Arch from uname(3).
pub fn collect_os_identity(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let un = host.uname()?;

    report.append("OS", format_args!("{}", un.sysname));
    report.append("Release", format_args!("{}", un.release));
    // NetBSD appends the build path after a colon
    report.append("Version", format_args!("{}", truncate_version(&un.version)));
    report.append("Arch", format_args!("{}", un.machine));
    Ok(())
}

pub fn collect_hostname(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let name = host.hostname()?;
    report.append("Host", format_args!("{}", name));
    Ok(())
}

/// `$SHELL` when set, otherwise the login shell; basename only.
pub fn collect_shell(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let shell = match non_empty_env(host, "SHELL") {
        Some(shell) => shell,
        None => host.account()?.shell,
    };
    report.append("Shell", format_args!("{}", basename(&shell)));
    Ok(())
}

/// `$USER` when set, otherwise the password database name.
pub fn collect_user(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let user = match non_empty_env(host, "USER") {
        Some(user) => user,
        None => host.account()?.name,
    };
    report.append("User", format_args!("{}", user));
    Ok(())
}

pub fn collect_uptime(host: &dyn HostQuery, policy: &VariantPolicy, report: &mut Report) -> Result<()> {
    const NAME: &str = "kern.boottime";

    let raw = host.query_scalar(NAME)?;
    let boot: timeval = decode_record(NAME, &raw)?;
    let up = uptime_seconds(boot.tv_sec as i64, host.now(), policy.uptime_bias_secs);
    debug!(up, bias = policy.uptime_bias_secs, "uptime");

    report.append("Uptime", format_args!("{}", format_uptime(up)));
    Ok(())
}

/// Exactly three samples or the probe fails.
pub fn collect_load_average(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let samples = host.load_average()?;
    let [one, five, fifteen] = samples[..] else {
        return Err(FetchError::ShortLoadAverage { got: samples.len() });
    };
    report.append("Loadavg", format_args!("{:.2} {:.2} {:.2}", one, five, fifteen));
    Ok(())
}

fn non_empty_env(host: &dyn HostQuery, key: &str) -> Option<String> {
    host.env_var(key).filter(|value| !value.is_empty())
}
