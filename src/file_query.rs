//! Shell metadata for arbitrary files: icon, display name and type name.
//!
//! A failed query never raises. The metadata comes back empty and the
//! last-error code is logged and kept in [`FileMetadata::error`].

use tracing::warn;

use crate::shell::{FileInfoFlags, IconHandle, OsError, ShellApi};

/// Result of a [`FileQuery`]. Only the fields implied by the flags are filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileMetadata {
    pub icon: Option<IconHandle>,
    pub display_name: String,
    pub type_name: String,
    pub attributes: u32,
    pub error: Option<OsError>,
}

impl FileMetadata {
    pub fn is_empty(&self) -> bool {
        self.icon.is_none()
            && self.display_name.is_empty()
            && self.type_name.is_empty()
            && self.attributes == 0
    }
}

/// A path plus the set of attributes to ask the shell for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileQuery {
    path: String,
    flags: FileInfoFlags,
}

impl Default for FileQuery {
    fn default() -> Self {
        Self {
            path: String::new(),
            flags: FileInfoFlags::DEFAULT,
        }
    }
}

impl FileQuery {
    /// Queries `path` with [`FileInfoFlags::DEFAULT`].
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_flags(path: impl Into<String>, flags: FileInfoFlags) -> Self {
        Self {
            path: path.into(),
            flags,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn flags(&self) -> FileInfoFlags {
        self.flags
    }

    /// Runs the query against `shell`.
    pub fn execute(&self, shell: &dyn ShellApi) -> FileMetadata {
        let info = match shell.file_info(&self.path, self.flags) {
            Ok(info) => info,
            Err(code) => {
                let message = shell.format_message(code);
                warn!("File info query failed for '{}': error {} {}", self.path, code, message.trim_end());
                return FileMetadata {
                    error: Some(OsError { code, message }),
                    ..FileMetadata::default()
                };
            }
        };

        let wants = |flag| self.flags.contains(flag);
        FileMetadata {
            icon: if wants(FileInfoFlags::ICON) { info.icon } else { None },
            display_name: if wants(FileInfoFlags::DISPLAY_NAME) { info.display_name } else { String::new() },
            type_name: if wants(FileInfoFlags::TYPE_NAME) { info.type_name } else { String::new() },
            attributes: if wants(FileInfoFlags::ATTRIBUTES) { info.attributes } else { 0 },
            error: None,
        }
    }

    /// Runs the query against the system shell.
    #[cfg(windows)]
    pub fn fetch(&self) -> FileMetadata {
        self.execute(&crate::shell::Win32Shell)
    }
}
