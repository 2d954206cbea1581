//! `LinkObject` over the shell's `ShellLink` COM class.

use std::ffi::c_void;
use std::path::Path;

use once_cell::sync::Lazy;
use tracing::debug;
use windows::Win32::Foundation::{HWND, TRUE};
use windows::Win32::Globalization::{
    CP_ACP, MULTI_BYTE_TO_WIDE_CHAR_FLAGS, MultiByteToWideChar, WideCharToMultiByte,
};
use windows::Win32::Storage::FileSystem::{WIN32_FIND_DATAA, WIN32_FIND_DATAW};
use windows::Win32::System::Com::{CLSCTX_INPROC_SERVER, CoCreateInstance, IPersistFile, STGM_DIRECT};
use windows::Win32::System::SystemInformation::GetVersion;
use windows::Win32::UI::Shell::{IShellLinkA, IShellLinkW, SLGP_UNCPRIORITY, ShellLink as CLSID_SHELL_LINK};
use windows::Win32::UI::WindowsAndMessaging::SHOW_WINDOW_CMD;
use windows::core::{Interface, PCSTR, PCWSTR};

use super::object::{LinkObject, LinkVariant};
use crate::error::ShellResult;
use crate::shell::WindowHandle;
use crate::utils::wide::{decode_wide, encode_wide, encode_wide_os, narrow_len};

const PATH_CAPACITY: usize = 260;
const INFO_TIP_CAPACITY: usize = 1024;

static PLATFORM_VARIANT: Lazy<LinkVariant> = Lazy::new(|| {
    // High bit set: the 9x family, where only the ANSI interface exists.
    let version = unsafe { GetVersion() };
    let variant = if version & 0x8000_0000 == 0 {
        LinkVariant::Wide
    } else {
        LinkVariant::Ansi
    };
    debug!("Platform version {:#010x}, using {}", version, variant);
    variant
});

/// The interface variant this OS supports, decided once per process.
pub fn platform_variant() -> LinkVariant {
    *PLATFORM_VARIANT
}

/// Creates a shell link object of the platform's variant.
///
/// COM must already be initialized on the calling thread.
pub fn create_link() -> ShellResult<Box<dyn LinkObject>> {
    create_link_variant(platform_variant())
}

pub fn create_link_variant(variant: LinkVariant) -> ShellResult<Box<dyn LinkObject>> {
    let link: Box<dyn LinkObject> = match variant {
        LinkVariant::Wide => Box::new(WideLink {
            link: unsafe { CoCreateInstance(&CLSID_SHELL_LINK, None, CLSCTX_INPROC_SERVER) }?,
        }),
        LinkVariant::Ansi => Box::new(AnsiLink {
            link: unsafe { CoCreateInstance(&CLSID_SHELL_LINK, None, CLSCTX_INPROC_SERVER) }?,
        }),
    };
    Ok(link)
}

fn owner_hwnd(owner: WindowHandle) -> HWND {
    HWND(owner.as_raw() as *mut c_void)
}

fn load_file(persist: &IPersistFile, file: &Path) -> ShellResult<()> {
    let file_wide = encode_wide_os(file.as_os_str());
    unsafe { persist.Load(PCWSTR(file_wide.as_ptr()), STGM_DIRECT) }?;
    Ok(())
}

fn save_file(persist: &IPersistFile, file: &Path) -> ShellResult<()> {
    let file_wide = encode_wide_os(file.as_os_str());
    unsafe { persist.Save(PCWSTR(file_wide.as_ptr()), TRUE) }?;
    Ok(())
}

struct WideLink {
    link: IShellLinkW,
}

impl LinkObject for WideLink {
    fn variant(&self) -> LinkVariant {
        LinkVariant::Wide
    }

    fn path(&self) -> ShellResult<String> {
        let mut buf = [0u16; PATH_CAPACITY];
        let mut find_data = WIN32_FIND_DATAW::default();
        unsafe { self.link.GetPath(&mut buf, &mut find_data, SLGP_UNCPRIORITY.0 as u32) }?;
        Ok(decode_wide(&buf))
    }

    fn set_path(&self, path: &str) -> ShellResult<()> {
        let path_wide = encode_wide(path);
        unsafe { self.link.SetPath(PCWSTR(path_wide.as_ptr())) }?;
        Ok(())
    }

    fn working_directory(&self) -> ShellResult<String> {
        let mut buf = [0u16; PATH_CAPACITY];
        unsafe { self.link.GetWorkingDirectory(&mut buf) }?;
        Ok(decode_wide(&buf))
    }

    fn set_working_directory(&self, dir: &str) -> ShellResult<()> {
        let dir_wide = encode_wide(dir);
        unsafe { self.link.SetWorkingDirectory(PCWSTR(dir_wide.as_ptr())) }?;
        Ok(())
    }

    fn description(&self) -> ShellResult<String> {
        let mut buf = [0u16; INFO_TIP_CAPACITY];
        unsafe { self.link.GetDescription(&mut buf) }?;
        Ok(decode_wide(&buf))
    }

    fn set_description(&self, description: &str) -> ShellResult<()> {
        let description_wide = encode_wide(description);
        unsafe { self.link.SetDescription(PCWSTR(description_wide.as_ptr())) }?;
        Ok(())
    }

    fn arguments(&self) -> ShellResult<String> {
        let mut buf = [0u16; INFO_TIP_CAPACITY];
        unsafe { self.link.GetArguments(&mut buf) }?;
        Ok(decode_wide(&buf))
    }

    fn set_arguments(&self, arguments: &str) -> ShellResult<()> {
        let arguments_wide = encode_wide(arguments);
        unsafe { self.link.SetArguments(PCWSTR(arguments_wide.as_ptr())) }?;
        Ok(())
    }

    fn hotkey(&self) -> ShellResult<u16> {
        Ok(unsafe { self.link.GetHotkey() }?)
    }

    fn set_hotkey(&self, hotkey: u16) -> ShellResult<()> {
        unsafe { self.link.SetHotkey(hotkey) }?;
        Ok(())
    }

    fn show_command(&self) -> ShellResult<u32> {
        Ok(unsafe { self.link.GetShowCmd() }?.0 as u32)
    }

    fn set_show_command(&self, cmd: u32) -> ShellResult<()> {
        unsafe { self.link.SetShowCmd(SHOW_WINDOW_CMD(cmd as i32)) }?;
        Ok(())
    }

    fn icon_location(&self) -> ShellResult<(String, i32)> {
        let mut buf = [0u16; PATH_CAPACITY];
        let mut index = 0i32;
        unsafe { self.link.GetIconLocation(&mut buf, &mut index) }?;
        Ok((decode_wide(&buf), index))
    }

    fn set_icon_location(&self, path: &str, index: i32) -> ShellResult<()> {
        let path_wide = encode_wide(path);
        unsafe { self.link.SetIconLocation(PCWSTR(path_wide.as_ptr()), index) }?;
        Ok(())
    }

    fn set_relative_path(&self, path: &str) -> ShellResult<()> {
        let path_wide = encode_wide(path);
        unsafe { self.link.SetRelativePath(PCWSTR(path_wide.as_ptr()), 0) }?;
        Ok(())
    }

    fn load(&self, file: &Path) -> ShellResult<()> {
        load_file(&self.link.cast()?, file)
    }

    fn save(&self, file: &Path) -> ShellResult<()> {
        save_file(&self.link.cast()?, file)
    }

    fn resolve(&self, owner: WindowHandle, flags: u32) -> ShellResult<()> {
        unsafe { self.link.Resolve(owner_hwnd(owner), flags) }?;
        Ok(())
    }
}

/// Encodes `s` in the active code page with a trailing NUL.
fn encode_ansi(s: &str) -> Vec<u8> {
    let wide: Vec<u16> = s.encode_utf16().collect();
    if wide.is_empty() {
        return vec![0];
    }
    let len = unsafe { WideCharToMultiByte(CP_ACP, 0, &wide, None, PCSTR::null(), None) };
    if len <= 0 {
        return vec![0];
    }
    let mut buf = vec![0u8; len as usize];
    let written = unsafe { WideCharToMultiByte(CP_ACP, 0, &wide, Some(&mut buf), PCSTR::null(), None) };
    buf.truncate(written.max(0) as usize);
    buf.push(0);
    buf
}

fn decode_ansi(buf: &[u8]) -> String {
    let bytes = &buf[..narrow_len(buf)];
    if bytes.is_empty() {
        return String::new();
    }
    let len = unsafe { MultiByteToWideChar(CP_ACP, MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0), bytes, None) };
    if len <= 0 {
        return String::new();
    }
    let mut wide = vec![0u16; len as usize];
    let written =
        unsafe { MultiByteToWideChar(CP_ACP, MULTI_BYTE_TO_WIDE_CHAR_FLAGS(0), bytes, Some(&mut wide)) };
    String::from_utf16_lossy(&wide[..written.max(0) as usize])
}

struct AnsiLink {
    link: IShellLinkA,
}

impl LinkObject for AnsiLink {
    fn variant(&self) -> LinkVariant {
        LinkVariant::Ansi
    }

    fn path(&self) -> ShellResult<String> {
        let mut buf = [0u8; PATH_CAPACITY];
        let mut find_data = WIN32_FIND_DATAA::default();
        unsafe { self.link.GetPath(&mut buf, &mut find_data, SLGP_UNCPRIORITY.0 as u32) }?;
        Ok(decode_ansi(&buf))
    }

    fn set_path(&self, path: &str) -> ShellResult<()> {
        let path_ansi = encode_ansi(path);
        unsafe { self.link.SetPath(PCSTR(path_ansi.as_ptr())) }?;
        Ok(())
    }

    fn working_directory(&self) -> ShellResult<String> {
        let mut buf = [0u8; PATH_CAPACITY];
        unsafe { self.link.GetWorkingDirectory(&mut buf) }?;
        Ok(decode_ansi(&buf))
    }

    fn set_working_directory(&self, dir: &str) -> ShellResult<()> {
        let dir_ansi = encode_ansi(dir);
        unsafe { self.link.SetWorkingDirectory(PCSTR(dir_ansi.as_ptr())) }?;
        Ok(())
    }

    fn description(&self) -> ShellResult<String> {
        let mut buf = [0u8; INFO_TIP_CAPACITY];
        unsafe { self.link.GetDescription(&mut buf) }?;
        Ok(decode_ansi(&buf))
    }

    fn set_description(&self, description: &str) -> ShellResult<()> {
        let description_ansi = encode_ansi(description);
        unsafe { self.link.SetDescription(PCSTR(description_ansi.as_ptr())) }?;
        Ok(())
    }

    fn arguments(&self) -> ShellResult<String> {
        let mut buf = [0u8; INFO_TIP_CAPACITY];
        unsafe { self.link.GetArguments(&mut buf) }?;
        Ok(decode_ansi(&buf))
    }

    fn set_arguments(&self, arguments: &str) -> ShellResult<()> {
        let arguments_ansi = encode_ansi(arguments);
        unsafe { self.link.SetArguments(PCSTR(arguments_ansi.as_ptr())) }?;
        Ok(())
    }

    fn hotkey(&self) -> ShellResult<u16> {
        Ok(unsafe { self.link.GetHotkey() }?)
    }

    fn set_hotkey(&self, hotkey: u16) -> ShellResult<()> {
        unsafe { self.link.SetHotkey(hotkey) }?;
        Ok(())
    }

    fn show_command(&self) -> ShellResult<u32> {
        Ok(unsafe { self.link.GetShowCmd() }?.0 as u32)
    }

    fn set_show_command(&self, cmd: u32) -> ShellResult<()> {
        unsafe { self.link.SetShowCmd(SHOW_WINDOW_CMD(cmd as i32)) }?;
        Ok(())
    }

    fn icon_location(&self) -> ShellResult<(String, i32)> {
        let mut buf = [0u8; PATH_CAPACITY];
        let mut index = 0i32;
        unsafe { self.link.GetIconLocation(&mut buf, &mut index) }?;
        Ok((decode_ansi(&buf), index))
    }

    fn set_icon_location(&self, path: &str, index: i32) -> ShellResult<()> {
        let path_ansi = encode_ansi(path);
        unsafe { self.link.SetIconLocation(PCSTR(path_ansi.as_ptr()), index) }?;
        Ok(())
    }

    fn set_relative_path(&self, path: &str) -> ShellResult<()> {
        let path_ansi = encode_ansi(path);
        unsafe { self.link.SetRelativePath(PCSTR(path_ansi.as_ptr()), 0) }?;
        Ok(())
    }

    fn load(&self, file: &Path) -> ShellResult<()> {
        load_file(&self.link.cast()?, file)
    }

    fn save(&self, file: &Path) -> ShellResult<()> {
        save_file(&self.link.cast()?, file)
    }

    fn resolve(&self, owner: WindowHandle, flags: u32) -> ShellResult<()> {
        unsafe { self.link.Resolve(owner_hwnd(owner), flags) }?;
        Ok(())
    }
}
