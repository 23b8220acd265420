//! Protocol core: geometry, text repair, commands and events.

pub mod command;
pub mod diacritics;
pub mod event;
pub mod layout;
