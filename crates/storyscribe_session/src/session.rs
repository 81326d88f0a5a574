//! Per-user session state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use storyscribe_core::{ModelId, Script, ScriptId, Temperature, Version};
use storyscribe_error::InputError;

/// Request settings the user can change at any time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// System prompt sent first with every request
    pub system_prompt: String,
    /// Model for new requests
    pub model: ModelId,
    /// Temperature for new requests
    pub temperature: Temperature,
}

/// Partial settings change; `None` leaves a value as it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    /// New system prompt
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// New model
    #[serde(default)]
    pub model: Option<ModelId>,
    /// New temperature
    #[serde(default)]
    pub temperature: Option<Temperature>,
}

/// Everything one user is looking at.
///
/// Created by [`crate::Workshop::start`] and passed to every workflow action.
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct Session {
    /// All scripts in insertion order
    scripts: Vec<Script>,
    /// Id of the open script
    current: Option<ScriptId>,
    /// Versions of the open script in creation order
    versions: Vec<Version>,
    /// Version numbers chosen as context for the next request
    selected: BTreeSet<u32>,
    /// Version number currently displayed
    active_version: Option<u32>,
    /// Request settings
    settings: Settings,
}

impl Session {
    /// Create a session with no script open.
    pub fn new(scripts: Vec<Script>, settings: Settings) -> Self {
        Self {
            scripts,
            current: None,
            versions: Vec::new(),
            selected: BTreeSet::new(),
            active_version: None,
            settings,
        }
    }

    /// The open script, if any.
    pub fn current_script(&self) -> Option<&Script> {
        let id = self.current.as_ref()?;
        self.scripts.iter().find(|script| script.id() == id)
    }

    /// The open script, or an input error when none is open.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if no script is open.
    pub fn require_script(&self) -> Result<&Script, InputError> {
        self.current_script()
            .ok_or_else(|| InputError::new("No script is open"))
    }

    /// Look up a loaded version by number.
    pub fn version(&self, number: u32) -> Option<&Version> {
        self.versions.iter().find(|v| v.version_number == number)
    }

    /// Selected versions in ascending version-number order.
    pub fn selected_versions(&self) -> Vec<&Version> {
        let mut selected: Vec<&Version> = self
            .versions
            .iter()
            .filter(|v| self.selected.contains(&v.version_number))
            .collect();
        selected.sort_by_key(|v| v.version_number);
        selected
    }

    /// Replace the selection.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] naming the first number that matches no loaded
    /// version; the selection is left unchanged.
    pub fn select_versions(
        &mut self,
        numbers: impl IntoIterator<Item = u32>,
    ) -> Result<(), InputError> {
        let numbers: BTreeSet<u32> = numbers.into_iter().collect();
        if let Some(unknown) = numbers.iter().find(|n| self.version(**n).is_none()) {
            return Err(InputError::new(format!("Version {} does not exist", unknown)));
        }
        self.selected = numbers;
        Ok(())
    }

    /// Add or remove one version from the selection.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if the version does not exist.
    pub fn toggle_version(&mut self, number: u32, selected: bool) -> Result<(), InputError> {
        if self.version(number).is_none() {
            return Err(InputError::new(format!("Version {} does not exist", number)));
        }
        if selected {
            self.selected.insert(number);
        } else {
            self.selected.remove(&number);
        }
        Ok(())
    }

    /// Display a different version.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] if the version does not exist.
    pub fn show_version(&mut self, number: u32) -> Result<(), InputError> {
        if self.version(number).is_none() {
            return Err(InputError::new(format!("Version {} does not exist", number)));
        }
        self.active_version = Some(number);
        Ok(())
    }

    pub(crate) fn set_scripts(&mut self, scripts: Vec<Script>) {
        self.scripts = scripts;
    }

    pub(crate) fn open(&mut self, id: ScriptId, versions: Vec<Version>) {
        self.active_version = versions.iter().map(|v| v.version_number).max();
        self.current = Some(id);
        self.versions = versions;
        self.selected.clear();
    }

    pub(crate) fn set_versions(&mut self, versions: Vec<Version>, active: u32) {
        self.versions = versions;
        self.active_version = Some(active);
    }

    pub(crate) fn settings_mut(&mut self) -> &mut Settings {
        &mut self.settings
    }
}
