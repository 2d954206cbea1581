use std::path::Path;
#[cfg(windows)]
use std::path::PathBuf;

use tracing::{error, info};

use crate::error::ShellResult;
use crate::link::{ShellLink, ShortcutProperties};
#[cfg(windows)]
use crate::utils::locations::{ShortcutLocation, shortcut_path};

/// Applies `props` to `link` and saves it at `path`, creating missing parent
/// directories.
pub fn write_shortcut(link: &mut ShellLink, path: &Path, props: &ShortcutProperties) -> ShellResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let result = link.apply(props).and_then(|_| link.save_as(path));
    match &result {
        Ok(()) => info!("Shortcut created for {} at {}", props.target, path.display()),
        Err(e) => error!("Failed to create shortcut {}: {}", path.display(), e),
    }
    result
}

/// Creates (or overwrites) the shortcut file at `path`.
#[cfg(windows)]
pub fn create_shortcut(path: &Path, props: &ShortcutProperties) -> ShellResult<()> {
    let mut link = ShellLink::new()?;
    write_shortcut(&mut link, path, props)
}

/// Creates `<name>.lnk` in one of the user's shortcut folders.
#[cfg(windows)]
pub fn create_shortcut_in(
    location: ShortcutLocation,
    name: &str,
    props: &ShortcutProperties,
) -> ShellResult<PathBuf> {
    let path = shortcut_path(location, name)?;
    create_shortcut(&path, props)?;
    Ok(path)
}

/// Opens the shortcut at `path` and reads all of its properties.
#[cfg(windows)]
pub fn read_shortcut(path: &Path) -> ShellResult<ShortcutProperties> {
    Ok(ShellLink::open_file(path)?.properties())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::DisplayMode;
    use crate::testing::{FakeLink, FakeShell};

    #[test]
    fn test_write_shortcut_creates_parent_and_saves() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Programs").join("Tool.lnk");
        let (fake, probe) = FakeLink::new();
        let mut link = ShellLink::from_parts(Box::new(fake), Box::new(FakeShell::default()));

        let mut props = ShortcutProperties::new("C:\\Tool\\tool.exe");
        props.display_mode = DisplayMode::Minimized;
        write_shortcut(&mut link, &path, &props).unwrap();

        assert!(path.parent().unwrap().is_dir());
        assert_eq!(link.shortcut_file(), Some(path.as_path()));
        let saved = probe.disk.borrow()[&*path.to_string_lossy()].clone();
        assert_eq!(saved.path, "C:\\Tool\\tool.exe");
        assert_eq!(saved.show_command, 7);
    }

    #[test]
    fn test_write_shortcut_on_released_link_fails() {
        let dir = tempfile::tempdir().unwrap();
        let (fake, probe) = FakeLink::new();
        let mut link = ShellLink::from_parts(Box::new(fake), Box::new(FakeShell::default()));
        link.release();

        let result = write_shortcut(&mut link, &dir.path().join("x.lnk"), &ShortcutProperties::new("a.exe"));
        assert!(result.is_err());
        assert!(probe.disk.borrow().is_empty());
    }
}
