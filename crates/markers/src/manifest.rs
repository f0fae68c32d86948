use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const MANIFEST_VERSION: &str = "1";

/// The photo-location document: image id -> where it was taken.
///
/// A `BTreeMap` keeps iteration (and therefore marker registration order)
/// deterministic regardless of how the JSON was written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoManifest {
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub photos: BTreeMap<String, PhotoLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PhotoLocation {
    pub lat: f64,
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("invalid manifest json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported manifest version {found:?} (expected {MANIFEST_VERSION:?})")]
    UnsupportedVersion { found: String },
    #[error("photo {id:?} has a non-finite coordinate")]
    NonFiniteCoordinate { id: String },
}

impl PhotoManifest {
    pub fn new() -> Self {
        Self {
            version: MANIFEST_VERSION.to_string(),
            name: None,
            photos: BTreeMap::new(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_str(json)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn to_json_string(&self) -> Result<String, ManifestError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Out-of-range coordinates are fine (they get clamped/wrapped at
    /// registration like any other coordinate write); non-finite ones are
    /// data corruption and rejected.
    pub fn validate(&self) -> Result<(), ManifestError> {
        if self.version != MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: self.version.clone(),
            });
        }
        for (id, location) in &self.photos {
            if !location.lat.is_finite() || !location.lon.is_finite() {
                return Err(ManifestError::NonFiniteCoordinate { id: id.clone() });
            }
        }
        Ok(())
    }
}

impl Default for PhotoManifest {
    fn default() -> Self {
        Self::new()
    }
}
