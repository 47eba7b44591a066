//! Fixed-layout kernel records

use std::mem;
use std::ptr;

use libc::{c_char, c_int, timeval};

use crate::error::{FetchError, Result};

/// Plain-old-data record the kernel copies out byte for byte.
///
/// # Safety
///
/// Implementors must be `repr(C)` (or primitive) and valid for every bit
/// pattern of their size.
pub unsafe trait Record: Copy {}

unsafe impl Record for c_int {}
unsafe impl Record for timeval {}
unsafe impl Record for Sensor {}

/// OpenBSD `struct sensor` from sys/sensors.h
#[repr(C)]
#[derive(Clone, Copy)]
pub struct Sensor {
    pub desc: [c_char; 32],
    pub tv: timeval,
    /// micro-Kelvin for temperature sensors
    pub value: i64,
    pub kind: c_int,
    pub status: c_int,
    pub numt: c_int,
    pub flags: c_int,
}

/// Decode a record, insisting on an exact size match.
pub fn decode_record<T: Record>(name: &str, bytes: &[u8]) -> Result<T> {
    let expected = mem::size_of::<T>();
    if bytes.len() != expected {
        return Err(FetchError::Decode {
            name: name.to_string(),
            expected,
            actual: bytes.len(),
        });
    }
    // SAFETY: the length matches and `Record` types accept any bit pattern
    Ok(unsafe { ptr::read_unaligned(bytes.as_ptr().cast::<T>()) })
}

/// Decode a NUL-terminated (or unterminated) C string value.
pub fn decode_c_string(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
