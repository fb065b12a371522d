//! One-time console setup so ANSI escapes render.
//!
//! Only legacy Windows consoles need anything: virtual terminal processing
//! has to be switched on for stdout and stderr. Everywhere else this is a
//! no-op.

use std::sync::Once;

static ENABLE: Once = Once::new();

/// Enable ANSI escape processing on the process console. Idempotent.
pub fn enable_console_ansi() {
    ENABLE.call_once(platform::enable);
}

#[cfg(windows)]
#[allow(unsafe_code)]
mod platform {
    use std::ffi::c_void;

    const STD_OUTPUT_HANDLE: u32 = -11_i32 as u32;
    const STD_ERROR_HANDLE: u32 = -12_i32 as u32;
    const ENABLE_VIRTUAL_TERMINAL_PROCESSING: u32 = 0x0004;

    #[link(name = "kernel32")]
    unsafe extern "system" {
        fn GetStdHandle(std_handle: u32) -> *mut c_void;
        fn GetConsoleMode(handle: *mut c_void, mode: *mut u32) -> i32;
        fn SetConsoleMode(handle: *mut c_void, mode: u32) -> i32;
    }

    pub(super) fn enable() {
        for which in [STD_OUTPUT_HANDLE, STD_ERROR_HANDLE] {
            // SAFETY: plain Win32 calls on the process's own std handles; a
            // handle that is not a console makes GetConsoleMode fail and we
            // skip it.
            unsafe {
                let handle = GetStdHandle(which);
                if handle.is_null() {
                    continue;
                }
                let mut mode = 0u32;
                if GetConsoleMode(handle, &mut mode) == 0 {
                    continue;
                }
                SetConsoleMode(handle, mode | ENABLE_VIRTUAL_TERMINAL_PROCESSING);
            }
        }
    }
}

#[cfg(not(windows))]
mod platform {
    pub(super) fn enable() {}
}
