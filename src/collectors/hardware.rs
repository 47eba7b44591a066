//! Hardware information collection (memory, CPU)

use tracing::debug;

use crate::collectors::sensors::collect_temperatures;
use crate::data::{OsVariant, Report, VariantPolicy};
use crate::error::Result;
use crate::host::{decode_c_string, HostQuery, SysconfKey};
use crate::utils::parsing::{memory_megabytes, squeeze_whitespace};

/// Tried in order for the CPU brand string
const CPU_BRAND_KEYS: [&str; 2] = ["machdep.cpu_brand", "hw.model"];

/// Physical memory as page size times page count.
pub fn collect_memory(host: &dyn HostQuery, report: &mut Report) -> Result<()> {
    let page_size = host.sysconf(SysconfKey::PageSize)?;
    let pages = host.sysconf(SysconfKey::PhysPages)?;

    report.append("RAM", format_args!("{} MB", memory_megabytes(page_size, pages)));
    Ok(())
}

/// Brand string, core counts, then whatever temperatures the host offers.
pub fn collect_cpu(
    host: &dyn HostQuery,
    variant: OsVariant,
    policy: &VariantPolicy,
    report: &mut Report,
) -> Result<()> {
    let online = host.sysconf(SysconfKey::ProcessorsOnline)?;
    let configured = host.sysconf(SysconfKey::ProcessorsConfigured)?;

    let brand = read_cpu_brand(host)?;
    let brand = if policy.squeeze_cpu_brand {
        squeeze_whitespace(&brand)
    } else {
        brand
    };

    report.append("CPU", format_args!("{}", brand));
    report.append("Cores", format_args!("{} of {} processors online", online, configured));

    collect_temperatures(host, variant, online, report)
}

fn read_cpu_brand(host: &dyn HostQuery) -> Result<String> {
    let [primary, fallback] = CPU_BRAND_KEYS;
    let raw = match host.query_scalar(primary) {
        Ok(raw) => raw,
        Err(err) => {
            debug!(%err, "falling back to {}", fallback);
            host.query_scalar(fallback)?
        }
    };
    Ok(decode_c_string(&raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::host::MockHostQuery;

    fn not_found(name: &str) -> FetchError {
        FetchError::NotFound {
            name: name.to_string(),
        }
    }

    fn cores(host: &mut MockHostQuery, online: i64, configured: i64) {
        host.expect_sysconf().returning(move |key| match key {
            SysconfKey::ProcessorsOnline => Ok(online),
            SysconfKey::ProcessorsConfigured => Ok(configured),
            SysconfKey::PageSize => Ok(4096),
            SysconfKey::PhysPages => Ok(1_048_576),
        });
    }

    #[test]
    fn memory_is_pages_times_page_size() {
        let mut host = MockHostQuery::new();
        cores(&mut host, 1, 1);

        let mut report = Report::new();
        collect_memory(&host, &mut report).unwrap();
        assert_eq!(report.value_of("RAM"), Some("4096 MB"));
    }

    #[test]
    fn brand_falls_back_to_hw_model_and_is_squeezed() {
        let mut host = MockHostQuery::new();
        cores(&mut host, 2, 4);
        host.expect_query_scalar().returning(|name| match name {
            "hw.model" => Ok(b"Intel(R)   Core(TM)\ti7\0".to_vec()),
            other => Err(not_found(other)),
        });

        let mut report = Report::new();
        collect_cpu(&host, OsVariant::OpenBsd, &VariantPolicy::default(), &mut report).unwrap();
        assert_eq!(report.value_of("CPU"), Some("Intel(R) Core(TM) i7"));
        assert_eq!(report.value_of("Cores"), Some("2 of 4 processors online"));
    }

    #[test]
    fn squeezing_can_be_turned_off() {
        let mut host = MockHostQuery::new();
        cores(&mut host, 1, 1);
        host.expect_query_scalar().returning(|name| match name {
            "machdep.cpu_brand" => Ok(b"AMD  Ryzen".to_vec()),
            other => Err(not_found(other)),
        });

        let policy = VariantPolicy {
            squeeze_cpu_brand: false,
            ..VariantPolicy::default()
        };
        let mut report = Report::new();
        collect_cpu(&host, OsVariant::FreeBsd, &policy, &mut report).unwrap();
        assert_eq!(report.value_of("CPU"), Some("AMD  Ryzen"));
        assert_eq!(report.len(), 2);
    }

    #[test]
    fn missing_brand_is_fatal() {
        let mut host = MockHostQuery::new();
        cores(&mut host, 1, 1);
        host.expect_query_scalar().returning(|name| Err(not_found(name)));

        let mut report = Report::new();
        let err = collect_cpu(&host, OsVariant::OpenBsd, &VariantPolicy::default(), &mut report).unwrap_err();
        assert_eq!(err.to_string(), "hw.model: no such host metric");
        assert!(report.is_empty());
    }

    #[test]
    fn temperatures_follow_the_core_line() {
        let mut host = MockHostQuery::new();
        cores(&mut host, 2, 2);
        host.expect_query_scalar().returning(|name| match name {
            "machdep.cpu_brand" => Ok(b"Xeon\0".to_vec()),
            "dev.cpu.0.temperature" => Ok(3000_i32.to_ne_bytes().to_vec()),
            "dev.cpu.1.temperature" => Ok(3010_i32.to_ne_bytes().to_vec()),
            other => Err(not_found(other)),
        });

        let mut report = Report::new();
        collect_cpu(&host, OsVariant::FreeBsd, &VariantPolicy::default(), &mut report).unwrap();
        let labels: Vec<&str> = report.lines().iter().map(|l| l.label.as_str()).collect();
        assert_eq!(labels, ["CPU", "Cores", "Core [1]", "Core [2]"]);
    }
}
