//! Shortcut hotkeys: a virtual-key code in the low byte of the stored word,
//! `HOTKEYF_*` modifiers in the high byte.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ShellError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct HotkeyModifiers(u8);

impl HotkeyModifiers {
    pub const NONE: Self = Self(0);
    pub const SHIFT: Self = Self(0x01);
    pub const CONTROL: Self = Self(0x02);
    pub const ALT: Self = Self(0x04);
    pub const EXT: Self = Self(0x08);
    const NAMED: u8 = 0x0F;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for HotkeyModifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

const NAMED_KEYS: &[(u8, &str)] = &[
    (0x20, "Space"),
    (0x21, "PageUp"),
    (0x22, "PageDown"),
    (0x23, "End"),
    (0x24, "Home"),
    (0x25, "Left"),
    (0x26, "Up"),
    (0x27, "Right"),
    (0x28, "Down"),
    (0x2D, "Insert"),
    (0x2E, "Delete"),
];

const MODIFIER_NAMES: &[(HotkeyModifiers, &str)] = &[
    (HotkeyModifiers::CONTROL, "Ctrl"),
    (HotkeyModifiers::SHIFT, "Shift"),
    (HotkeyModifiers::ALT, "Alt"),
    (HotkeyModifiers::EXT, "Ext"),
];

/// Key combination that launches a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub key: u8,
    pub modifiers: HotkeyModifiers,
}

impl Hotkey {
    pub fn new(key: u8, modifiers: HotkeyModifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn to_word(self) -> u16 {
        (u16::from(self.modifiers.bits()) << 8) | u16::from(self.key)
    }

    /// `None` for the zero word, which means "no hotkey".
    pub fn from_word(word: u16) -> Option<Self> {
        if word == 0 {
            return None;
        }
        Some(Self {
            key: (word & 0xFF) as u8,
            modifiers: HotkeyModifiers::from_bits((word >> 8) as u8),
        })
    }
}

fn key_name(key: u8) -> String {
    match key {
        b'A'..=b'Z' | b'0'..=b'9' => (key as char).to_string(),
        0x60..=0x69 => format!("NumPad{}", key - 0x60),
        0x70..=0x87 => format!("F{}", key - 0x6F),
        _ => NAMED_KEYS
            .iter()
            .find(|(code, _)| *code == key)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| format!("0x{:02X}", key)),
    }
}

fn parse_key(token: &str) -> Option<u8> {
    let upper = token.to_ascii_uppercase();
    let bytes = upper.as_bytes();
    if bytes.len() == 1 && bytes[0].is_ascii_alphanumeric() {
        return Some(bytes[0]);
    }
    if let Some(hex) = upper.strip_prefix("0X") {
        return u8::from_str_radix(hex, 16).ok();
    }
    if let Some(n) = upper.strip_prefix("NUMPAD") {
        return n.parse::<u8>().ok().filter(|&n| n <= 9).map(|n| 0x60 + n);
    }
    if let Some(n) = upper.strip_prefix('F') {
        if let Ok(n) = n.parse::<u8>() {
            return (1..=24).contains(&n).then_some(0x6F + n);
        }
    }
    NAMED_KEYS
        .iter()
        .find(|(_, name)| name.eq_ignore_ascii_case(token))
        .map(|(code, _)| *code)
}

fn parse_modifier(token: &str) -> Option<HotkeyModifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(HotkeyModifiers::CONTROL),
        "shift" => Some(HotkeyModifiers::SHIFT),
        "alt" => Some(HotkeyModifiers::ALT),
        "ext" => Some(HotkeyModifiers::EXT),
        other => other
            .strip_prefix("0x")
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(HotkeyModifiers::from_bits),
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (modifier, name) in MODIFIER_NAMES {
            if self.modifiers.contains(*modifier) {
                write!(f, "{}+", name)?;
            }
        }
        let unnamed = self.modifiers.bits() & !HotkeyModifiers::NAMED;
        if unnamed != 0 {
            write!(f, "0x{:02X}+", unnamed)?;
        }
        f.write_str(&key_name(self.key))
    }
}

impl FromStr for Hotkey {
    type Err = ShellError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ShellError::InvalidHotkey(s.to_string());
        let mut tokens: Vec<&str> = s.split('+').map(str::trim).collect();
        let key_token = tokens.pop().filter(|t| !t.is_empty()).ok_or_else(invalid)?;
        let key = parse_key(key_token).ok_or_else(invalid)?;

        let mut modifiers = HotkeyModifiers::NONE;
        for token in tokens {
            modifiers = modifiers | parse_modifier(token).ok_or_else(invalid)?;
        }
        Ok(Self { key, modifiers })
    }
}

impl TryFrom<String> for Hotkey {
    type Error = ShellError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Hotkey> for String {
    fn from(hotkey: Hotkey) -> Self {
        hotkey.to_string()
    }
}
