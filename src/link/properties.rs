use std::path::Path;

use serde::{Deserialize, Serialize};

use super::flags::DisplayMode;
use super::hotkey::Hotkey;
use crate::error::ShellResult;

/// Every settable property of a shortcut, detached from any live object.
///
/// ```toml
/// target = 'C:\Program Files\App\app.exe'
/// arguments = "--profile work"
/// display_mode = "maximized"
/// hotkey = "Ctrl+Alt+A"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutProperties {
    pub target: String,
    pub working_directory: String,
    pub arguments: String,
    pub description: String,
    /// Empty means "use the icon the shell shows for the target".
    pub icon_path: String,
    pub icon_index: i32,
    pub display_mode: DisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hotkey: Option<Hotkey>,
}

impl ShortcutProperties {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(content: &str) -> ShellResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> ShellResult<String> {
        Ok(toml::to_string(self)?)
    }

    /// Reads a shortcut definition from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ShellResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShellError;
    use crate::link::HotkeyModifiers;

    #[test]
    fn test_parse_partial_definition_uses_defaults() {
        let props = ShortcutProperties::from_toml_str(
            r#"
            target = 'C:\Windows\notepad.exe'
            display_mode = "maximized"
            hotkey = "Ctrl+Alt+N"
            "#,
        )
        .unwrap();

        assert_eq!(props.target, "C:\\Windows\\notepad.exe");
        assert_eq!(props.display_mode, DisplayMode::Maximized);
        assert_eq!(
            props.hotkey,
            Some(Hotkey::new(b'N', HotkeyModifiers::CONTROL | HotkeyModifiers::ALT))
        );
        assert_eq!(props.arguments, "");
        assert_eq!(props.icon_index, 0);
    }

    #[test]
    fn test_toml_round_trip() {
        let props = ShortcutProperties {
            target: "C:\\Tools\\tool.exe".into(),
            working_directory: "C:\\Tools".into(),
            arguments: "--verbose \"two words\"".into(),
            description: "Tool".into(),
            icon_path: "C:\\Tools\\icons.dll".into(),
            icon_index: 3,
            display_mode: DisplayMode::Minimized,
            hotkey: Some(Hotkey::new(0x70, HotkeyModifiers::SHIFT)),
        };
        let text = props.to_toml_string().unwrap();
        assert!(text.contains("display_mode = \"minimized\""));
        assert!(text.contains("hotkey = \"Shift+F1\""));
        assert_eq!(ShortcutProperties::from_toml_str(&text).unwrap(), props);
    }

    #[test]
    fn test_keyless_hotkey_survives_toml() {
        for word in [0x0200, 0x1041] {
            let props = ShortcutProperties {
                hotkey: Hotkey::from_word(word),
                ..ShortcutProperties::new("a.exe")
            };
            let text = props.to_toml_string().unwrap();
            let reloaded = ShortcutProperties::from_toml_str(&text).unwrap();
            assert_eq!(reloaded.hotkey.map(Hotkey::to_word), Some(word));
        }
    }

    #[test]
    fn test_missing_hotkey_is_not_written() {
        let text = ShortcutProperties::new("a.exe").to_toml_string().unwrap();
        assert!(!text.contains("hotkey"));
    }

    #[test]
    fn test_bad_hotkey_is_a_config_error() {
        let err = ShortcutProperties::from_toml_str("hotkey = \"Hyper+Q\"").unwrap_err();
        assert!(matches!(err, ShellError::Config(_)));
        assert!(err.to_string().contains("Hyper+Q"));
    }

    #[test]
    fn test_bad_display_mode_is_rejected() {
        assert!(ShortcutProperties::from_toml_str("display_mode = \"fullscreen\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "target = \"app.exe\"\narguments = \"-q\"\n").unwrap();

        let props = ShortcutProperties::load(&path).unwrap();
        assert_eq!(props.target, "app.exe");
        assert_eq!(props.arguments, "-q");
    }
}
