//! Windows shell bindings: shortcut (`.lnk`) files through the `ShellLink`
//! COM object, and shell file metadata (icon, display name, type name).
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn main() -> shell_link::ShellResult<()> {
//! use shell_link::{DisplayMode, ShellLink, apartment};
//!
//! apartment::scoped(|| {
//!     let mut link = ShellLink::new()?;
//!     link.set_target(r"C:\Windows\notepad.exe")?;
//!     link.set_display_mode(DisplayMode::Maximized)?;
//!     link.save_as(r"C:\Users\Public\Desktop\Notepad.lnk")
//! })
//! # }
//! # #[cfg(not(windows))]
//! # fn main() {}
//! ```

#[cfg(windows)]
pub mod apartment;
pub mod error;
pub mod file_query;
pub mod link;
pub mod shell;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::{ShellError, ShellResult};
pub use file_query::{FileMetadata, FileQuery};
pub use link::{
    DisplayMode, Hotkey, HotkeyModifiers, LinkObject, LinkVariant, ResolveFlags, ResolveOptions, ShellLink,
    ShortcutProperties,
};
pub use shell::{FileInfoFlags, IconHandle, IconSize, OsError, ShellApi, WindowHandle};
