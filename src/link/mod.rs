//! Shortcut (`.lnk`) files through the shell's link object.
//!
//! A [`ShellLink`] owns one live object for its whole lifetime. Reads go to
//! the object every time; nothing is cached on the Rust side.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

#[cfg(windows)]
mod com;
mod flags;
mod hotkey;
mod object;
mod properties;

#[cfg(windows)]
pub use com::{create_link, create_link_variant, platform_variant};
pub use flags::{DisplayMode, ResolveFlags, ResolveOptions};
pub use hotkey::{Hotkey, HotkeyModifiers};
pub use object::{LinkObject, LinkVariant};
pub use properties::ShortcutProperties;

use crate::error::{ShellError, ShellResult};
use crate::file_query::FileQuery;
use crate::shell::{FileInfoFlags, IconHandle, IconSize, ShellApi};

/// A shortcut object plus the file it was last opened from or saved to.
///
/// Not `Send`: the object stays in the COM apartment that created it.
pub struct ShellLink {
    link: Option<Box<dyn LinkObject>>,
    shell: Box<dyn ShellApi>,
    shortcut_file: Option<PathBuf>,
}

impl ShellLink {
    /// Creates an unbound link on the system shell.
    ///
    /// COM must be initialized on the calling thread, see [`crate::apartment`].
    #[cfg(windows)]
    pub fn new() -> ShellResult<Self> {
        Ok(Self::from_parts(create_link()?, Box::new(crate::shell::Win32Shell)))
    }

    /// Creates a link and opens `path` with the default resolve options.
    #[cfg(windows)]
    pub fn open_file(path: impl AsRef<Path>) -> ShellResult<Self> {
        let mut link = Self::new()?;
        link.open(path)?;
        Ok(link)
    }

    /// Wraps an existing link object and the shell functions used for icons.
    pub fn from_parts(link: Box<dyn LinkObject>, shell: Box<dyn ShellApi>) -> Self {
        debug!("Shell link object created ({})", link.variant());
        Self {
            link: Some(link),
            shell,
            shortcut_file: None,
        }
    }

    /// The interface variant in use, `None` once released.
    pub fn variant(&self) -> Option<LinkVariant> {
        self.link.as_ref().map(|link| link.variant())
    }

    pub fn is_released(&self) -> bool {
        self.link.is_none()
    }

    /// Releases the underlying object. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(link) = self.link.take() {
            debug!("Releasing shell link object ({})", link.variant());
            drop(link);
        }
    }

    /// The file this link is bound to, if any.
    pub fn shortcut_file(&self) -> Option<&Path> {
        self.shortcut_file.as_deref()
    }

    pub fn set_shortcut_file(&mut self, path: impl Into<PathBuf>) {
        self.shortcut_file = Some(path.into());
    }

    fn object(&self) -> ShellResult<&dyn LinkObject> {
        self.link.as_deref().ok_or(ShellError::Released)
    }

    fn read<T: Default>(&self, what: &str, get: impl FnOnce(&dyn LinkObject) -> ShellResult<T>) -> T {
        match self.object().and_then(get) {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read shortcut {}: {}", what, e);
                T::default()
            }
        }
    }

    /// Fully qualified path of the target.
    pub fn target(&self) -> String {
        self.read("target", |link| link.path())
    }

    pub fn set_target(&mut self, target: &str) -> ShellResult<()> {
        self.object()?.set_path(target)
    }

    pub fn working_directory(&self) -> String {
        self.read("working directory", |link| link.working_directory())
    }

    pub fn set_working_directory(&mut self, dir: &str) -> ShellResult<()> {
        self.object()?.set_working_directory(dir)
    }

    pub fn description(&self) -> String {
        self.read("description", |link| link.description())
    }

    pub fn set_description(&mut self, description: &str) -> ShellResult<()> {
        self.object()?.set_description(description)
    }

    pub fn arguments(&self) -> String {
        self.read("arguments", |link| link.arguments())
    }

    pub fn set_arguments(&mut self, arguments: &str) -> ShellResult<()> {
        self.object()?.set_arguments(arguments)
    }

    /// Window state the target is launched in.
    pub fn display_mode(&self) -> DisplayMode {
        DisplayMode::from_show_command(self.read("show command", |link| link.show_command()))
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) -> ShellResult<()> {
        self.object()?.set_show_command(mode.show_command())
    }

    pub fn hotkey(&self) -> Option<Hotkey> {
        Hotkey::from_word(self.read("hotkey", |link| link.hotkey()))
    }

    /// `None` clears the hotkey.
    pub fn set_hotkey(&mut self, hotkey: Option<Hotkey>) -> ShellResult<()> {
        self.object()?.set_hotkey(hotkey.map_or(0, Hotkey::to_word))
    }

    /// Icon resource path and index. An empty path means no explicit icon.
    pub fn icon_location(&self) -> (String, i32) {
        self.read("icon location", |link| link.icon_location())
    }

    pub fn set_icon_location(&mut self, path: &str, index: i32) -> ShellResult<()> {
        self.object()?.set_icon_location(path, index)
    }

    pub fn icon_path(&self) -> String {
        self.icon_location().0
    }

    /// Replaces the icon resource, keeping the current index.
    pub fn set_icon_path(&mut self, path: &str) -> ShellResult<()> {
        let link = self.object()?;
        let (_, index) = link.icon_location()?;
        link.set_icon_location(path, index)
    }

    pub fn icon_index(&self) -> i32 {
        self.icon_location().1
    }

    /// Replaces the icon index, keeping the current resource.
    pub fn set_icon_index(&mut self, index: i32) -> ShellResult<()> {
        let link = self.object()?;
        let (path, _) = link.icon_location()?;
        link.set_icon_location(&path, index)
    }

    /// Path relative to which the target is searched for when the link moves.
    pub fn set_relative_path(&mut self, path: &str) -> ShellResult<()> {
        self.object()?.set_relative_path(path)
    }

    pub fn large_icon(&self) -> Option<IconHandle> {
        self.icon(IconSize::Large)
    }

    pub fn small_icon(&self) -> Option<IconHandle> {
        self.icon(IconSize::Small)
    }

    /// The shortcut's icon. Without an explicit icon resource this is the
    /// icon the shell shows for the target.
    ///
    /// The returned handle belongs to the caller.
    pub fn icon(&self, size: IconSize) -> Option<IconHandle> {
        if self.is_released() {
            return None;
        }

        let (icon_path, index) = self.icon_location();
        if icon_path.is_empty() {
            let target = self.target();
            debug!("No icon location set, asking the shell for the icon of '{}'", target);
            return FileQuery::with_flags(target, FileInfoFlags::icon_of_size(size))
                .execute(self.shell.as_ref())
                .icon;
        }

        self.shell.extract_icon(&icon_path, index, size)
    }

    /// Loads a shortcut file, resolving its target without UI.
    pub fn open(&mut self, path: impl AsRef<Path>) -> ShellResult<()> {
        self.open_with(path, &ResolveOptions::default())
    }

    /// Loads a shortcut file and resolves its target with `options`.
    pub fn open_with(&mut self, path: impl AsRef<Path>, options: &ResolveOptions) -> ShellResult<()> {
        let path = path.as_ref();
        let link = self.object()?;

        link.load(path)?;
        let flags = options.packed_flags();
        debug!("Resolving '{}' with flags {:#010x}", path.display(), flags);
        link.resolve(options.owner, flags)?;

        info!("Opened shortcut {}", path.display());
        self.shortcut_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Saves to the bound file.
    pub fn save(&mut self) -> ShellResult<()> {
        let path = self.shortcut_file.clone().ok_or(ShellError::NoBackingFile)?;
        self.save_as(path)
    }

    /// Saves to `path` and binds the link to it.
    pub fn save_as(&mut self, path: impl AsRef<Path>) -> ShellResult<()> {
        let path = path.as_ref();
        self.object()?.save(path)?;

        info!("Saved shortcut {}", path.display());
        self.shortcut_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Reads every property from the live object.
    pub fn properties(&self) -> ShortcutProperties {
        let (icon_path, icon_index) = self.icon_location();
        ShortcutProperties {
            target: self.target(),
            working_directory: self.working_directory(),
            arguments: self.arguments(),
            description: self.description(),
            icon_path,
            icon_index,
            display_mode: self.display_mode(),
            hotkey: self.hotkey(),
        }
    }

    /// Writes `props` to the live object. The icon location is only written
    /// when `props` names an icon resource.
    pub fn apply(&mut self, props: &ShortcutProperties) -> ShellResult<()> {
        self.set_target(&props.target)?;
        self.set_working_directory(&props.working_directory)?;
        self.set_arguments(&props.arguments)?;
        self.set_description(&props.description)?;
        if !props.icon_path.is_empty() {
            self.set_icon_location(&props.icon_path, props.icon_index)?;
        }
        self.set_display_mode(props.display_mode)?;
        self.set_hotkey(props.hotkey)
    }
}

impl Drop for ShellLink {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ShellLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellLink")
            .field("variant", &self.variant())
            .field("shortcut_file", &self.shortcut_file)
            .finish_non_exhaustive()
    }
}
