use std::ops::BitOr;

use serde::{Deserialize, Serialize};

use crate::shell::WindowHandle;

/// How a link whose target has moved is resolved (`SLR_*`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolveFlags(u32);

impl ResolveFlags {
    /// Do not show a dialog if the link cannot be resolved. Enables the timeout.
    pub const NO_UI: Self = Self(0x1);
    /// Allow any match during resolution.
    pub const ANY_MATCH: Self = Self(0x2);
    /// Update the stored path and ID list if the target moved.
    pub const UPDATE: Self = Self(0x4);
    pub const NO_UPDATE: Self = Self(0x8);
    /// Skip the search heuristics.
    pub const NO_SEARCH: Self = Self(0x10);
    /// Skip distributed link tracking.
    pub const NO_TRACK: Self = Self(0x20);
    /// Disable volume-name and UNC tracking.
    pub const NO_LINK_INFO: Self = Self(0x40);
    /// Call the Windows Installer.
    pub const INVOKE_MSI: Self = Self(0x80);
    pub const NO_UI_WITH_MSG_PUMP: Self = Self(0x101);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for ResolveFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Owner window, flags and timeout used when a link is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolveOptions {
    pub owner: WindowHandle,
    pub flags: ResolveFlags,
    /// Milliseconds; only honoured together with [`ResolveFlags::NO_UI`].
    pub timeout_ms: u16,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            owner: WindowHandle::NONE,
            flags: ResolveFlags::ANY_MATCH | ResolveFlags::NO_UI,
            timeout_ms: 1,
        }
    }
}

impl ResolveOptions {
    pub fn new(flags: ResolveFlags) -> Self {
        Self {
            flags,
            ..Self::default()
        }
    }

    pub fn with_owner(mut self, owner: WindowHandle) -> Self {
        self.owner = owner;
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u16) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// The flag word handed to `Resolve`. With `NO_UI` the timeout rides in
    /// the high 16 bits.
    pub fn packed_flags(&self) -> u32 {
        if self.flags.contains(ResolveFlags::NO_UI) {
            self.flags.bits() | (u32::from(self.timeout_ms) << 16)
        } else {
            self.flags.bits()
        }
    }
}

/// Initial window state of the launched target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Normal,
    Minimized,
    Maximized,
}

impl DisplayMode {
    /// `SW_SHOWNORMAL`, `SW_SHOWMINNOACTIVE`, `SW_MAXIMIZE`.
    pub fn show_command(self) -> u32 {
        match self {
            DisplayMode::Normal => 1,
            DisplayMode::Minimized => 7,
            DisplayMode::Maximized => 3,
        }
    }

    /// Maps a stored show command back. Every minimizing command reads as
    /// `Minimized`; anything unrecognised reads as `Normal`.
    pub fn from_show_command(cmd: u32) -> Self {
        match cmd {
            3 => DisplayMode::Maximized,
            2 | 6 | 7 => DisplayMode::Minimized,
            _ => DisplayMode::Normal,
        }
    }
}
