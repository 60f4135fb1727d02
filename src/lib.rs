// Crate root library declaration and module exports.
rust_i18n::i18n!("locales", fallback = "en");

pub mod calendar;
pub mod cli;
pub mod client;
pub mod config;
pub mod context;
pub mod controller;
pub mod help;
pub mod locale;
pub mod logging;
pub mod model;
pub mod progress;
pub mod settings;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
