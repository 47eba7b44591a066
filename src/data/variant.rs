//! The supported BSD variants and what differs between them

use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// One of the four supported operating systems, detected once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OsVariant {
    FreeBsd,
    OpenBsd,
    NetBsd,
    DragonFly,
}

/// Where CPU temperatures come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureSource {
    /// `dev.cpu.<n>.temperature`, one int per core in deci-Kelvin
    PerCoreSysctl,
    /// A single `struct sensor` in micro-Kelvin
    AggregateSensor,
    /// Text output of envstat(8)
    Envstat,
}

/// Behaviour that looks like a workaround for one OS but is kept
/// tunable for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantPolicy {
    /// Added to the raw uptime before it is split into d/h/m
    pub uptime_bias_secs: i64,
    /// Collapse runs of blanks in the CPU brand string
    pub squeeze_cpu_brand: bool,
}

impl Default for VariantPolicy {
    fn default() -> Self {
        VariantPolicy {
            uptime_bias_secs: 30,
            squeeze_cpu_brand: true,
        }
    }
}

impl OsVariant {
    pub const ALL: [OsVariant; 4] = [
        OsVariant::FreeBsd,
        OsVariant::OpenBsd,
        OsVariant::NetBsd,
        OsVariant::DragonFly,
    ];

    /// The kernel's own spelling, as reported by `uname -s`
    pub fn name(self) -> &'static str {
        match self {
            OsVariant::FreeBsd => "FreeBSD",
            OsVariant::OpenBsd => "OpenBSD",
            OsVariant::NetBsd => "NetBSD",
            OsVariant::DragonFly => "DragonFly",
        }
    }

    /// Lowercase key used for config tables and logo file names
    pub fn key(self) -> &'static str {
        match self {
            OsVariant::FreeBsd => "freebsd",
            OsVariant::OpenBsd => "openbsd",
            OsVariant::NetBsd => "netbsd",
            OsVariant::DragonFly => "dragonfly",
        }
    }

    /// Command whose output has one line per installed package
    pub fn package_command(self) -> &'static [&'static str] {
        match self {
            OsVariant::FreeBsd | OsVariant::DragonFly => &["/usr/sbin/pkg", "info"],
            OsVariant::OpenBsd | OsVariant::NetBsd => &["/usr/sbin/pkg_info"],
        }
    }

    pub fn temperature_source(self) -> TemperatureSource {
        match self {
            OsVariant::FreeBsd | OsVariant::DragonFly => TemperatureSource::PerCoreSysctl,
            OsVariant::OpenBsd => TemperatureSource::AggregateSensor,
            OsVariant::NetBsd => TemperatureSource::Envstat,
        }
    }
}

impl fmt::Display for OsVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OsVariant {
    type Err = FetchError;

    /// Exact match against `uname -s`
    fn from_str(sysname: &str) -> Result<Self, Self::Err> {
        OsVariant::ALL
            .into_iter()
            .find(|variant| variant.name() == sysname)
            .ok_or_else(|| FetchError::UnsupportedOs {
                sysname: sysname.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_from_uname_sysname() {
        assert_eq!("FreeBSD".parse::<OsVariant>().unwrap(), OsVariant::FreeBsd);
        assert_eq!("DragonFly".parse::<OsVariant>().unwrap(), OsVariant::DragonFly);
        assert!(matches!(
            "Linux".parse::<OsVariant>(),
            Err(FetchError::UnsupportedOs { .. })
        ));
        assert!("freebsd".parse::<OsVariant>().is_err());
    }

    #[test]
    fn package_commands_follow_the_family() {
        assert_eq!(OsVariant::DragonFly.package_command(), ["/usr/sbin/pkg", "info"]);
        assert_eq!(OsVariant::NetBsd.package_command(), ["/usr/sbin/pkg_info"]);
    }

    #[test]
    fn default_policy_matches_newest_behaviour() {
        let policy = VariantPolicy::default();
        assert_eq!(policy.uptime_bias_secs, 30);
        assert!(policy.squeeze_cpu_brand);
    }
}
