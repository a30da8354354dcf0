//! Save-file storage for the bits that outlive a session: the high score
//! and the tutorial-completion flag.
//!
//! One flat JSON record in one file. Loading never fails: a missing,
//! unreadable, or corrupt file degrades to the default record (high score
//! 0, tutorial not done), so a damaged save can never take the game down.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// The persisted record
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub high_score: u32,
    pub tutorial_done: bool,
}

/// Handle to the save file
#[derive(Debug, Clone)]
pub struct SaveStore {
    path: PathBuf,
}

impl SaveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default save location, next to the working directory the game was
    /// launched from
    pub fn default_path() -> PathBuf {
        PathBuf::from("perkmandelc_save.json")
    }

    /// Read the record, falling back to defaults on any error
    pub fn load(&self) -> SaveData {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or_default()
    }

    /// Write the record
    pub fn save(&self, data: &SaveData) -> Result<()> {
        let json = serde_json::to_string_pretty(data).context("failed to encode save data")?;
        fs::write(&self.path, json)
            .with_context(|| format!("failed to write save file {}", self.path.display()))
    }
}
