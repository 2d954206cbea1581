use windows::Win32::Foundation::{E_FAIL, GetLastError};
use windows::Win32::Storage::FileSystem::FILE_FLAGS_AND_ATTRIBUTES;
use windows::Win32::UI::Shell::{ExtractIconExW, SHFILEINFOW, SHGFI_FLAGS, SHGetFileInfoW};
use windows::Win32::UI::WindowsAndMessaging::HICON;
use windows::core::{HRESULT, PCWSTR};

use super::{FileInfoFlags, IconHandle, IconSize, ShellApi, ShellFileInfo};
use crate::utils::wide::{decode_wide, encode_wide};

/// [`ShellApi`] over `shell32`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Shell;

impl ShellApi for Win32Shell {
    fn file_info(&self, path: &str, flags: FileInfoFlags) -> Result<ShellFileInfo, u32> {
        let path_wide = encode_wide(path);
        let mut shfi = SHFILEINFOW::default();

        let ret = unsafe {
            SHGetFileInfoW(
                PCWSTR(path_wide.as_ptr()),
                FILE_FLAGS_AND_ATTRIBUTES(0),
                Some(&mut shfi),
                std::mem::size_of::<SHFILEINFOW>() as u32,
                SHGFI_FLAGS(flags.bits()),
            )
        };
        if ret == 0 {
            // The call does not always set the last error.
            let code = unsafe { GetLastError() }.0;
            return Err(if code == 0 { E_FAIL.0 as u32 } else { code });
        }

        Ok(ShellFileInfo {
            icon: IconHandle::from_raw(shfi.hIcon.0 as isize),
            display_name: decode_wide(&shfi.szDisplayName),
            type_name: decode_wide(&shfi.szTypeName),
            attributes: shfi.dwAttributes,
        })
    }

    fn extract_icon(&self, path: &str, index: i32, size: IconSize) -> Option<IconHandle> {
        let path_wide = encode_wide(path);
        let mut hicon = HICON::default();

        let count = unsafe {
            match size {
                IconSize::Large => {
                    ExtractIconExW(PCWSTR(path_wide.as_ptr()), index, Some(&mut hicon), None, 1)
                }
                IconSize::Small => {
                    ExtractIconExW(PCWSTR(path_wide.as_ptr()), index, None, Some(&mut hicon), 1)
                }
            }
        };
        if count == 0 || hicon.is_invalid() {
            return None;
        }
        IconHandle::from_raw(hicon.0 as isize)
    }

    fn format_message(&self, code: u32) -> String {
        HRESULT::from_win32(code).message()
    }
}
