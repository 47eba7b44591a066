//! Host Query Facility
//!
//! Everything the probes learn about the machine goes through
//! [`HostQuery`]. The native implementation talks to the kernel through
//! `libc`; tests substitute a mock.

mod mib;
mod native;
mod record;

pub use mib::openbsd_mib;
pub use native::NativeHost;
pub use record::{decode_c_string, decode_record, Record, Sensor};

use crate::error::Result;

#[cfg(test)]
use mockall::automock;

/// Fields of `uname(3)` the OS identity probe reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Uname {
    pub sysname: String,
    pub release: String,
    pub version: String,
    pub machine: String,
}

/// The password database entry for the current uid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub shell: String,
}

/// `sysconf(3)` keys the probes need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysconfKey {
    PageSize,
    PhysPages,
    ProcessorsOnline,
    ProcessorsConfigured,
}

impl SysconfKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SysconfKey::PageSize => "_SC_PAGESIZE",
            SysconfKey::PhysPages => "_SC_PHYS_PAGES",
            SysconfKey::ProcessorsOnline => "_SC_NPROCESSORS_ONLN",
            SysconfKey::ProcessorsConfigured => "_SC_NPROCESSORS_CONF",
        }
    }
}

/// Uniform lookup of host and kernel facts.
///
/// `query_scalar` returns the raw bytes the kernel handed back; callers
/// know how each name decodes (see [`decode_record`] and
/// [`decode_c_string`]).
#[cfg_attr(test, automock)]
pub trait HostQuery {
    /// Look up a named kernel metric (`sysctlbyname` semantics).
    fn query_scalar(&self, name: &str) -> Result<Vec<u8>>;

    /// Run a read-only command and return everything it wrote to stdout.
    /// A non-zero exit status is an error.
    fn query_external_command(&self, argv: &'static [&'static str]) -> Result<String>;

    /// Password database entry of the current user.
    fn account(&self) -> Result<Account>;

    fn env_var(&self, key: &str) -> Option<String>;

    fn uname(&self) -> Result<Uname>;

    fn hostname(&self) -> Result<String>;

    fn sysconf(&self, key: SysconfKey) -> Result<i64>;

    /// Whatever samples `getloadavg(3)` produced, at most three.
    fn load_average(&self) -> Result<Vec<f64>>;

    /// Wall clock, seconds since the epoch.
    fn now(&self) -> i64;
}
