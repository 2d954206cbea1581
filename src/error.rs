//! Error type shared by the shortcut and file-query wrappers.
//!
//! Platform failures are surfaced untranslated as [`ShellError::Os`]: the
//! HRESULT (or Win32 code) and the system's own message text.

/// Errors returned by shell and shortcut operations.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// A platform call reported failure.
    #[error("shell call failed ({code:#010x}): {message}")]
    Os { code: i32, message: String },

    /// The shortcut object was already released.
    #[error("shortcut object has already been released")]
    Released,

    /// `save()` was called before the link was bound to a file.
    #[error("no shortcut file is associated with this link")]
    NoBackingFile,

    /// Hotkey text that could not be parsed.
    #[error("invalid hotkey: {0}")]
    InvalidHotkey(String),

    /// A known folder (Desktop, Start Menu, ...) could not be located.
    #[error("could not locate the {0} directory")]
    MissingDirectory(&'static str),

    #[error("invalid shortcut definition: {0}")]
    Config(#[from] toml::de::Error),

    #[error("failed to serialize shortcut definition: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;

impl ShellError {
    /// Builds an [`ShellError::Os`] from a raw code and message.
    pub fn os(code: i32, message: impl Into<String>) -> Self {
        ShellError::Os {
            code,
            message: message.into(),
        }
    }

    /// Returns the platform code for [`ShellError::Os`], `None` otherwise.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            ShellError::Os { code, .. } => Some(*code),
            _ => None,
        }
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for ShellError {
    fn from(err: windows::core::Error) -> Self {
        ShellError::Os {
            code: err.code().0,
            message: err.message(),
        }
    }
}
