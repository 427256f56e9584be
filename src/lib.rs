pub mod boundary;
pub mod cli;
pub mod config;
pub mod domain;
pub mod editor;
pub mod error;
pub mod git;
pub mod manifest;
pub mod ui;
pub mod updater;

pub use error::{ReleaseNotesError, Result};
pub use updater::NotesUpdater;
