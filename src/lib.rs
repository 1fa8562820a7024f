#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod browser;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod format;
pub mod tui;
