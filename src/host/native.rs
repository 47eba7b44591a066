//! libc-backed host queries

use std::env;
use std::ffi::CStr;
use std::io;
use std::mem;
use std::ptr;
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::{Account, HostQuery, SysconfKey, Uname};
use crate::error::{FetchError, Result};
use crate::utils::command::run_command;

/// Queries the running kernel directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeHost;

impl NativeHost {
    pub fn new() -> Self {
        NativeHost
    }
}

impl HostQuery for NativeHost {
    fn query_scalar(&self, name: &str) -> Result<Vec<u8>> {
        debug!(name, "sysctl");
        sysctl_by_name(name)
    }

    fn query_external_command(&self, argv: &'static [&'static str]) -> Result<String> {
        match argv.split_first() {
            Some((program, args)) => run_command(program, args),
            None => Err(FetchError::Spawn {
                command: String::new(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "empty command line"),
            }),
        }
    }

    fn account(&self) -> Result<Account> {
        // SAFETY: getpwuid returns a pointer into static storage or NULL;
        // both strings are copied out before any other passwd call.
        unsafe {
            let pw = libc::getpwuid(libc::getuid());
            if pw.is_null() {
                return Err(FetchError::Account {
                    source: io::Error::last_os_error(),
                });
            }
            Ok(Account {
                name: c_str_lossy((*pw).pw_name),
                shell: c_str_lossy((*pw).pw_shell),
            })
        }
    }

    fn env_var(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }

    fn uname(&self) -> Result<Uname> {
        // SAFETY: utsname is plain data and uname fills it on success
        unsafe {
            let mut un: libc::utsname = mem::zeroed();
            if libc::uname(&mut un) == -1 {
                return Err(FetchError::from_os("uname()", io::Error::last_os_error()));
            }
            Ok(Uname {
                sysname: c_str_lossy(un.sysname.as_ptr()),
                release: c_str_lossy(un.release.as_ptr()),
                version: c_str_lossy(un.version.as_ptr()),
                machine: c_str_lossy(un.machine.as_ptr()),
            })
        }
    }

    fn hostname(&self) -> Result<String> {
        let mut buf = [0u8; 256];
        // SAFETY: the length passed leaves room for a terminator
        let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len() - 1) };
        if rc == -1 {
            return Err(FetchError::from_os("gethostname()", io::Error::last_os_error()));
        }
        Ok(super::decode_c_string(&buf))
    }

    fn sysconf(&self, key: SysconfKey) -> Result<i64> {
        let raw = match key {
            SysconfKey::PageSize => libc::_SC_PAGESIZE,
            SysconfKey::PhysPages => libc::_SC_PHYS_PAGES,
            SysconfKey::ProcessorsOnline => libc::_SC_NPROCESSORS_ONLN,
            SysconfKey::ProcessorsConfigured => libc::_SC_NPROCESSORS_CONF,
        };
        // SAFETY: sysconf has no memory side effects
        let value = unsafe { libc::sysconf(raw) };
        if value == -1 {
            return Err(FetchError::from_os(
                format!("sysconf({})", key.as_str()),
                io::Error::last_os_error(),
            ));
        }
        Ok(value as i64)
    }

    fn load_average(&self) -> Result<Vec<f64>> {
        load_average()
    }

    fn now(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or(0)
    }
}

unsafe fn c_str_lossy(p: *const libc::c_char) -> String {
    if p.is_null() {
        return String::new();
    }
    CStr::from_ptr(p).to_string_lossy().into_owned()
}

/// Two-step read: ask for the size, then fetch into a buffer that big.
#[cfg_attr(
    not(any(
        target_os = "freebsd",
        target_os = "dragonfly",
        target_os = "netbsd",
        target_os = "openbsd"
    )),
    allow(dead_code)
)]
fn read_sized<F>(name: &str, mut call: F) -> Result<Vec<u8>>
where
    F: FnMut(*mut libc::c_void, *mut libc::size_t) -> libc::c_int,
{
    let mut len: libc::size_t = 0;
    if call(ptr::null_mut(), &mut len) == -1 {
        return Err(FetchError::from_os(name, io::Error::last_os_error()));
    }
    let mut buf = vec![0u8; len];
    if call(buf.as_mut_ptr().cast(), &mut len) == -1 {
        return Err(FetchError::from_os(name, io::Error::last_os_error()));
    }
    buf.truncate(len);
    Ok(buf)
}

#[cfg(any(target_os = "freebsd", target_os = "dragonfly", target_os = "netbsd"))]
fn sysctl_by_name(name: &str) -> Result<Vec<u8>> {
    let c_name = std::ffi::CString::new(name).map_err(|_| FetchError::NotFound {
        name: name.to_string(),
    })?;
    // SAFETY: oldp/oldlenp come from read_sized and always agree
    read_sized(name, |oldp, oldlenp| unsafe {
        libc::sysctlbyname(c_name.as_ptr(), oldp, oldlenp, ptr::null_mut(), 0)
    })
}

#[cfg(target_os = "openbsd")]
fn sysctl_by_name(name: &str) -> Result<Vec<u8>> {
    let mib = super::openbsd_mib(name).ok_or_else(|| FetchError::NotFound {
        name: name.to_string(),
    })?;
    // SAFETY: oldp/oldlenp come from read_sized and always agree
    read_sized(name, |oldp, oldlenp| unsafe {
        libc::sysctl(mib.as_ptr(), mib.len() as libc::c_uint, oldp, oldlenp, ptr::null_mut(), 0)
    })
}

#[cfg(not(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn sysctl_by_name(name: &str) -> Result<Vec<u8>> {
    Err(FetchError::from_os(
        name,
        io::Error::from_raw_os_error(libc::ENOSYS),
    ))
}

#[cfg(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
))]
fn load_average() -> Result<Vec<f64>> {
    let mut samples = [0f64; 3];
    // SAFETY: the buffer holds exactly the three samples requested
    let got = unsafe { libc::getloadavg(samples.as_mut_ptr(), 3) };
    if got == -1 {
        return Err(FetchError::from_os("getloadavg()", io::Error::last_os_error()));
    }
    Ok(samples[..got as usize].to_vec())
}

#[cfg(not(any(
    target_os = "freebsd",
    target_os = "dragonfly",
    target_os = "netbsd",
    target_os = "openbsd"
)))]
fn load_average() -> Result<Vec<f64>> {
    Err(FetchError::from_os(
        "getloadavg()",
        io::Error::from_raw_os_error(libc::ENOSYS),
    ))
}
