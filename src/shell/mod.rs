//! Free shell functions consumed by the wrappers: the file-info query, the
//! multi-size icon extractor and system message formatting.
//!
//! [`ShellApi`] is the seam. [`Win32Shell`] forwards to `shell32` on Windows.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

#[cfg(windows)]
mod win32;

#[cfg(windows)]
pub use win32::Win32Shell;

/// Bits requested from the file-info query (`SHGFI_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FileInfoFlags(u32);

impl FileInfoFlags {
    pub const LARGE_ICON: Self = Self(0x0);
    pub const SMALL_ICON: Self = Self(0x1);
    pub const OPEN_ICON: Self = Self(0x2);
    pub const SHELL_ICON_SIZE: Self = Self(0x4);
    pub const USE_FILE_ATTRIBUTES: Self = Self(0x10);
    pub const ADD_OVERLAYS: Self = Self(0x20);
    pub const OVERLAY_INDEX: Self = Self(0x40);
    pub const ICON: Self = Self(0x100);
    pub const DISPLAY_NAME: Self = Self(0x200);
    pub const TYPE_NAME: Self = Self(0x400);
    pub const ATTRIBUTES: Self = Self(0x800);
    pub const ICON_LOCATION: Self = Self(0x1000);
    pub const EXE_TYPE: Self = Self(0x2000);
    pub const SYS_ICON_INDEX: Self = Self(0x4000);
    pub const LINK_OVERLAY: Self = Self(0x8000);
    pub const SELECTED: Self = Self(0x10000);
    pub const ATTR_SPECIFIED: Self = Self(0x20000);

    /// Icon, display name, type name, attributes and exe type.
    pub const DEFAULT: Self = Self(
        Self::ICON.0 | Self::DISPLAY_NAME.0 | Self::TYPE_NAME.0 | Self::ATTRIBUTES.0 | Self::EXE_TYPE.0,
    );

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Flags used to fetch just the icon the shell shows for a file.
    pub const fn icon_of_size(size: IconSize) -> Self {
        let size_bit = match size {
            IconSize::Large => Self::LARGE_ICON.0,
            IconSize::Small => Self::SMALL_ICON.0,
        };
        Self(Self::ICON.0 | Self::ATTRIBUTES.0 | size_bit)
    }
}

impl BitOr for FileInfoFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FileInfoFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSize {
    Large,
    Small,
}

/// A raw `HICON` handed out by the shell.
///
/// The crate never destroys a handle it returns; ownership moves to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconHandle(isize);

impl IconHandle {
    /// Wraps a raw handle, `None` for the null handle.
    pub fn from_raw(raw: isize) -> Option<Self> {
        (raw != 0).then_some(Self(raw))
    }

    pub fn as_raw(self) -> isize {
        self.0
    }
}

/// Owner window passed to link resolution. The default is "no window".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct WindowHandle(isize);

impl WindowHandle {
    pub const NONE: Self = Self(0);

    pub fn from_raw(raw: isize) -> Self {
        Self(raw)
    }

    pub fn as_raw(self) -> isize {
        self.0
    }
}

/// Raw result of one file-info query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellFileInfo {
    pub icon: Option<IconHandle>,
    pub display_name: String,
    pub type_name: String,
    pub attributes: u32,
}

/// Last-error code captured after a failed query, with its system text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsError {
    pub code: u32,
    pub message: String,
}

impl fmt::Display for OsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error {}: {}", self.code, self.message.trim_end())
    }
}

/// The shell functions the wrappers call into.
pub trait ShellApi {
    /// Runs one file-info query. On failure returns the thread's last-error code.
    fn file_info(&self, path: &str, flags: FileInfoFlags) -> Result<ShellFileInfo, u32>;

    /// Extracts exactly one icon of `size` at `index` from a resource file.
    fn extract_icon(&self, path: &str, index: i32, size: IconSize) -> Option<IconHandle>;

    /// Formats a system error code as text.
    fn format_message(&self, code: u32) -> String;
}
