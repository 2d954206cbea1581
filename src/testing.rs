//! In-memory shell and link objects for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{ShellError, ShellResult};
use crate::link::{LinkObject, LinkVariant};
use crate::shell::{FileInfoFlags, IconHandle, IconSize, ShellApi, ShellFileInfo, WindowHandle};

pub const E_FILE_NOT_FOUND: i32 = 0x80070002u32 as i32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
    pub path: String,
    pub working_directory: String,
    pub description: String,
    pub arguments: String,
    pub hotkey: u16,
    pub show_command: u32,
    pub icon_path: String,
    pub icon_index: i32,
    pub relative_path: String,
}

impl Default for LinkState {
    fn default() -> Self {
        Self {
            path: String::new(),
            working_directory: String::new(),
            description: String::new(),
            arguments: String::new(),
            hotkey: 0,
            show_command: 1,
            icon_path: String::new(),
            icon_index: 0,
            relative_path: String::new(),
        }
    }
}

/// Shared view of what a [`FakeLink`] did, kept after the link is moved.
#[derive(Clone, Default)]
pub struct LinkProbe {
    pub disk: Rc<RefCell<HashMap<String, LinkState>>>,
    pub resolves: Rc<RefCell<Vec<(WindowHandle, u32)>>>,
    pub drops: Rc<Cell<u32>>,
    /// Every file passed to `load` or `save`, as received.
    pub files: Rc<RefCell<Vec<PathBuf>>>,
}

pub struct FakeLink {
    variant: LinkVariant,
    state: RefCell<LinkState>,
    probe: LinkProbe,
}

impl FakeLink {
    pub fn new() -> (Self, LinkProbe) {
        Self::with_probe(LinkProbe::default())
    }

    /// A fresh object sharing `probe`'s disk, like a second instance in the same session.
    pub fn with_probe(probe: LinkProbe) -> (Self, LinkProbe) {
        let link = Self {
            variant: LinkVariant::Wide,
            state: RefCell::new(LinkState::default()),
            probe: probe.clone(),
        };
        (link, probe)
    }

    pub fn ansi() -> (Self, LinkProbe) {
        let (mut link, probe) = Self::new();
        link.variant = LinkVariant::Ansi;
        (link, probe)
    }
}

impl Drop for FakeLink {
    fn drop(&mut self) {
        self.probe.drops.set(self.probe.drops.get() + 1);
    }
}

impl LinkObject for FakeLink {
    fn variant(&self) -> LinkVariant {
        self.variant
    }

    fn path(&self) -> ShellResult<String> {
        Ok(self.state.borrow().path.clone())
    }

    fn set_path(&self, path: &str) -> ShellResult<()> {
        self.state.borrow_mut().path = path.to_string();
        Ok(())
    }

    fn working_directory(&self) -> ShellResult<String> {
        Ok(self.state.borrow().working_directory.clone())
    }

    fn set_working_directory(&self, dir: &str) -> ShellResult<()> {
        self.state.borrow_mut().working_directory = dir.to_string();
        Ok(())
    }

    fn description(&self) -> ShellResult<String> {
        Ok(self.state.borrow().description.clone())
    }

    fn set_description(&self, description: &str) -> ShellResult<()> {
        self.state.borrow_mut().description = description.to_string();
        Ok(())
    }

    fn arguments(&self) -> ShellResult<String> {
        Ok(self.state.borrow().arguments.clone())
    }

    fn set_arguments(&self, arguments: &str) -> ShellResult<()> {
        self.state.borrow_mut().arguments = arguments.to_string();
        Ok(())
    }

    fn hotkey(&self) -> ShellResult<u16> {
        Ok(self.state.borrow().hotkey)
    }

    fn set_hotkey(&self, hotkey: u16) -> ShellResult<()> {
        self.state.borrow_mut().hotkey = hotkey;
        Ok(())
    }

    fn show_command(&self) -> ShellResult<u32> {
        Ok(self.state.borrow().show_command)
    }

    fn set_show_command(&self, cmd: u32) -> ShellResult<()> {
        self.state.borrow_mut().show_command = cmd;
        Ok(())
    }

    fn icon_location(&self) -> ShellResult<(String, i32)> {
        let state = self.state.borrow();
        Ok((state.icon_path.clone(), state.icon_index))
    }

    fn set_icon_location(&self, path: &str, index: i32) -> ShellResult<()> {
        let mut state = self.state.borrow_mut();
        state.icon_path = path.to_string();
        state.icon_index = index;
        Ok(())
    }

    fn set_relative_path(&self, path: &str) -> ShellResult<()> {
        self.state.borrow_mut().relative_path = path.to_string();
        Ok(())
    }

    fn load(&self, file: &Path) -> ShellResult<()> {
        self.probe.files.borrow_mut().push(file.to_path_buf());
        let stored = self.probe.disk.borrow().get(&*file.to_string_lossy()).cloned();
        match stored {
            Some(state) => {
                *self.state.borrow_mut() = state;
                Ok(())
            }
            None => Err(ShellError::os(E_FILE_NOT_FOUND, "The system cannot find the file specified.")),
        }
    }

    fn save(&self, file: &Path) -> ShellResult<()> {
        self.probe.files.borrow_mut().push(file.to_path_buf());
        self.probe
            .disk
            .borrow_mut()
            .insert(file.to_string_lossy().into_owned(), self.state.borrow().clone());
        Ok(())
    }

    fn resolve(&self, owner: WindowHandle, flags: u32) -> ShellResult<()> {
        self.probe.resolves.borrow_mut().push((owner, flags));
        Ok(())
    }
}

/// Shell functions answering from fixed tables. Clones share the call logs.
#[derive(Clone, Default)]
pub struct FakeShell {
    files: HashMap<String, ShellFileInfo>,
    resources: HashMap<(String, i32, IconSize), isize>,
    queries: Rc<RefCell<Vec<(String, FileInfoFlags)>>>,
    extractions: Rc<RefCell<Vec<(String, i32, IconSize)>>>,
}

impl FakeShell {
    pub fn with_file(mut self, path: &str, icon: isize, display_name: &str, type_name: &str) -> Self {
        self.files.insert(
            path.to_string(),
            ShellFileInfo {
                icon: IconHandle::from_raw(icon),
                display_name: display_name.to_string(),
                type_name: type_name.to_string(),
                attributes: 0x20,
            },
        );
        self
    }

    pub fn with_resource_icon(mut self, path: &str, index: i32, size: IconSize, icon: isize) -> Self {
        self.resources.insert((path.to_string(), index, size), icon);
        self
    }

    pub fn queries(&self) -> Vec<(String, FileInfoFlags)> {
        self.queries.borrow().clone()
    }

    pub fn extractions(&self) -> Vec<(String, i32, IconSize)> {
        self.extractions.borrow().clone()
    }
}

impl ShellApi for FakeShell {
    fn file_info(&self, path: &str, flags: FileInfoFlags) -> Result<ShellFileInfo, u32> {
        self.queries.borrow_mut().push((path.to_string(), flags));
        self.files.get(path).cloned().ok_or(2)
    }

    fn extract_icon(&self, path: &str, index: i32, size: IconSize) -> Option<IconHandle> {
        self.extractions.borrow_mut().push((path.to_string(), index, size));
        self.resources
            .get(&(path.to_string(), index, size))
            .and_then(|&raw| IconHandle::from_raw(raw))
    }

    fn format_message(&self, code: u32) -> String {
        match code {
            2 => "The system cannot find the file specified.\r\n".to_string(),
            _ => format!("Unknown error {code}\r\n"),
        }
    }
}
