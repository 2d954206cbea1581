//! Per-user folders shortcuts are usually placed in.

use std::path::PathBuf;

use crate::error::{ShellError, ShellResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutLocation {
    Desktop,
    StartMenuPrograms,
    Startup,
}

fn start_menu_dir() -> ShellResult<PathBuf> {
    let path = dirs::data_dir()
        .ok_or(ShellError::MissingDirectory("AppData"))?
        .join("Microsoft")
        .join("Windows")
        .join("Start Menu");
    Ok(path)
}

/// Directory backing `location` for the current user.
pub fn location_dir(location: ShortcutLocation) -> ShellResult<PathBuf> {
    match location {
        ShortcutLocation::Desktop => dirs::desktop_dir().ok_or(ShellError::MissingDirectory("Desktop")),
        ShortcutLocation::StartMenuPrograms => Ok(start_menu_dir()?.join("Programs")),
        ShortcutLocation::Startup => Ok(start_menu_dir()?.join("Programs").join("Startup")),
    }
}

/// `name` with a `.lnk` extension, unless it already has one.
pub fn link_file_name(name: &str) -> String {
    if name.to_lowercase().ends_with(".lnk") {
        name.to_string()
    } else {
        format!("{}.lnk", name)
    }
}

pub fn shortcut_path(location: ShortcutLocation, name: &str) -> ShellResult<PathBuf> {
    Ok(location_dir(location)?.join(link_file_name(name)))
}
