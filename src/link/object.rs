use std::fmt;
use std::path::Path;

use crate::error::ShellResult;
use crate::shell::WindowHandle;

/// Which interface of the shell link object is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkVariant {
    /// `IShellLinkW`, UTF-16 strings.
    Wide,
    /// `IShellLinkA`, strings in the active ANSI code page.
    Ansi,
}

impl fmt::Display for LinkVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkVariant::Wide => f.write_str("IShellLinkW"),
            LinkVariant::Ansi => f.write_str("IShellLinkA"),
        }
    }
}

/// A live shortcut object owned by the OS.
///
/// Every call goes straight to the object; nothing is cached. Implementations
/// are not `Send`: the object belongs to the apartment that created it.
pub trait LinkObject {
    fn variant(&self) -> LinkVariant;

    fn path(&self) -> ShellResult<String>;
    fn set_path(&self, path: &str) -> ShellResult<()>;

    fn working_directory(&self) -> ShellResult<String>;
    fn set_working_directory(&self, dir: &str) -> ShellResult<()>;

    fn description(&self) -> ShellResult<String>;
    fn set_description(&self, description: &str) -> ShellResult<()>;

    fn arguments(&self) -> ShellResult<String>;
    fn set_arguments(&self, arguments: &str) -> ShellResult<()>;

    fn hotkey(&self) -> ShellResult<u16>;
    fn set_hotkey(&self, hotkey: u16) -> ShellResult<()>;

    fn show_command(&self) -> ShellResult<u32>;
    fn set_show_command(&self, cmd: u32) -> ShellResult<()>;

    fn icon_location(&self) -> ShellResult<(String, i32)>;
    fn set_icon_location(&self, path: &str, index: i32) -> ShellResult<()>;

    fn set_relative_path(&self, path: &str) -> ShellResult<()>;

    /// Initializes the object from a persisted shortcut file.
    fn load(&self, file: &Path) -> ShellResult<()>;
    /// Persists the object to `file` and makes it the current file.
    fn save(&self, file: &Path) -> ShellResult<()>;
    /// Locates the target, `flags` being the packed `SLR_*` word.
    fn resolve(&self, owner: WindowHandle, flags: u32) -> ShellResult<()>;
}
