pub mod locations;
pub mod shortcut;
pub mod wide;
