//! COM initialization for the calling thread.
//!
//! Shell link objects are apartment-affine: create, use and release them on
//! the thread that entered the apartment.

use tracing::debug;
use windows::Win32::System::Com::{COINIT_APARTMENTTHREADED, CoInitializeEx, CoUninitialize};

use crate::error::ShellResult;

/// Runs `f` inside a single-threaded apartment and leaves it afterwards,
/// including when `f` fails or panics.
pub fn scoped<T>(f: impl FnOnce() -> ShellResult<T>) -> ShellResult<T> {
    unsafe { CoInitializeEx(None, COINIT_APARTMENTTHREADED) }.ok()?;
    debug!("Entered single-threaded COM apartment");

    let _apartment = scopeguard::guard((), |_| {
        unsafe { CoUninitialize() };
        debug!("Left COM apartment");
    });
    f()
}
