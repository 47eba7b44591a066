//! Name to MIB translation for OpenBSD, which has no `sysctlbyname(3)`.

use libc::c_int;

// sys/sysctl.h
const CTL_KERN: c_int = 1;
const CTL_HW: c_int = 6;
const KERN_OSTYPE: c_int = 1;
const KERN_OSRELEASE: c_int = 2;
const KERN_HOSTNAME: c_int = 10;
const KERN_BOOTTIME: c_int = 21;
const HW_MACHINE: c_int = 1;
const HW_MODEL: c_int = 2;
const HW_NCPU: c_int = 3;
const HW_SENSORS: c_int = 11;
const HW_NCPUONLINE: c_int = 25;

// sys/sensors.h
const SENSOR_TEMP: c_int = 0;

static SYSCTL_NAMES: &[(&str, &[c_int])] = &[
    ("kern.ostype", &[CTL_KERN, KERN_OSTYPE]),
    ("kern.osrelease", &[CTL_KERN, KERN_OSRELEASE]),
    ("kern.hostname", &[CTL_KERN, KERN_HOSTNAME]),
    ("kern.boottime", &[CTL_KERN, KERN_BOOTTIME]),
    ("hw.machine", &[CTL_HW, HW_MACHINE]),
    ("hw.model", &[CTL_HW, HW_MODEL]),
    ("hw.ncpu", &[CTL_HW, HW_NCPU]),
    ("hw.ncpuonline", &[CTL_HW, HW_NCPUONLINE]),
    // first temperature sensor of the first sensor device
    ("hw.sensors.0.temp0", &[CTL_HW, HW_SENSORS, 0, SENSOR_TEMP, 0]),
];

/// Resolve a symbolic sysctl name to its numeric MIB.
#[cfg_attr(not(target_os = "openbsd"), allow(dead_code))]
pub fn openbsd_mib(name: &str) -> Option<&'static [c_int]> {
    SYSCTL_NAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, mib)| *mib)
}
