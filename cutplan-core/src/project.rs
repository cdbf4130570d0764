//! Versioned project documents: catalog + demand + settings.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::PlannerSettings;
use crate::error::{PlanError, Result};
use crate::model::{PlankSku, RequiredPiece};

/// Current project document version.
pub const PROJECT_VERSION: u32 = 1;

/// A complete planner input set, as stored on disk.
///
/// Missing collections deserialize as empty and missing settings fall back
/// to the defaults, so hand-written documents can stay minimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Document version.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Purchasable catalog entries.
    #[serde(default)]
    pub catalog: Vec<PlankSku>,
    /// Demand rows.
    #[serde(default)]
    pub required_pieces: Vec<RequiredPiece>,
    /// Global settings.
    #[serde(default)]
    pub settings: PlannerSettings,
}

fn default_version() -> u32 {
    PROJECT_VERSION
}

impl Default for Project {
    fn default() -> Self {
        Self {
            version: PROJECT_VERSION,
            catalog: Vec::new(),
            required_pieces: Vec::new(),
            settings: PlannerSettings::default(),
        }
    }
}

impl Project {
    /// Create a project from its parts at the current version.
    pub fn new(
        catalog: Vec<PlankSku>,
        required_pieces: Vec<RequiredPiece>,
        settings: PlannerSettings,
    ) -> Self {
        Self {
            version: PROJECT_VERSION,
            catalog,
            required_pieces,
            settings,
        }
    }

    /// Parse a project from JSON, rejecting unknown versions.
    pub fn from_json(text: &str) -> Result<Self> {
        let project: Project = serde_json::from_str(text)?;
        if project.version != PROJECT_VERSION {
            return Err(PlanError::UnsupportedVersion {
                version: project.version,
                expected: PROJECT_VERSION,
            });
        }
        Ok(project)
    }

    /// Render the project as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a project file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Write the project to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
