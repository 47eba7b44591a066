//! CPU temperature sensors
//!
//! Every family exposes temperatures differently. A missing sensor is not
//! an error: the probe just stops adding lines.

use libc::c_int;
use tracing::debug;

use crate::data::{OsVariant, Report, TemperatureSource};
use crate::error::Result;
use crate::host::{decode_record, HostQuery, Sensor};
use crate::utils::parsing::{deci_kelvin_to_celsius, micro_kelvin_to_celsius, parse_envstat_temperatures};

const ENVSTAT: &[&str] = &["/usr/sbin/envstat"];
const OPENBSD_CPU_SENSOR: &str = "hw.sensors.0.temp0";

pub fn collect_temperatures(
    host: &dyn HostQuery,
    variant: OsVariant,
    online_cores: i64,
    report: &mut Report,
) -> Result<()> {
    match variant.temperature_source() {
        TemperatureSource::PerCoreSysctl => per_core_sysctl(host, online_cores, report),
        TemperatureSource::AggregateSensor => aggregate_sensor(host, report),
        TemperatureSource::Envstat => envstat(host, report),
    }
}

/// FreeBSD/DragonFly: `dev.cpu.N.temperature` until the first core without one.
fn per_core_sysctl(host: &dyn HostQuery, online_cores: i64, report: &mut Report) -> Result<()> {
    for core in 0..online_cores {
        let name = format!("dev.cpu.{}.temperature", core);
        let raw = match host.query_scalar(&name) {
            Ok(raw) => raw,
            Err(err) => {
                debug!(%err, "no temperature sensor");
                return Ok(());
            }
        };
        let temp: c_int = decode_record(&name, &raw)?;
        report.append_continuation(
            format!("Core [{}]", core + 1),
            format_args!("{:.1} °C", deci_kelvin_to_celsius(temp)),
        );
    }
    Ok(())
}

/// OpenBSD: one aggregate reading from the first temperature sensor.
fn aggregate_sensor(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let raw = match host.query_scalar(OPENBSD_CPU_SENSOR) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(%err, "no temperature sensor");
            return Ok(());
        }
    };
    let sensor: Sensor = decode_record(OPENBSD_CPU_SENSOR, &raw)?;
    report.append("CPU Temp", format_args!("{} °C", micro_kelvin_to_celsius(sensor.value)));
    Ok(())
}

/// NetBSD: parse envstat(8). A missing or failing envstat (no sysmon
/// device, say) counts as no sensor.
fn envstat(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let output = match host.query_external_command(ENVSTAT) {
        Ok(output) => output,
        Err(err) => {
            debug!(%err, "envstat unavailable");
            return Ok(());
        }
    };
    for (idx, temp) in parse_envstat_temperatures(&output).into_iter().enumerate() {
        report.append_continuation(format!("Core [{}]", idx + 1), format_args!("{:.1} °C", temp));
    }
    Ok(())
}
