//! Commodity types and their fixed exploration depth windows.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Commodities scored by the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MineralType {
    /// Porphyry copper.
    Copper,
    /// Epithermal gold.
    Gold,
}

impl MineralType {
    pub const ALL: [MineralType; 2] = [MineralType::Copper, MineralType::Gold];

    pub fn as_str(&self) -> &'static str {
        match self {
            MineralType::Copper => "copper",
            MineralType::Gold => "gold",
        }
    }

    /// Expected depth of mineralization in meters.
    pub fn depth_range(&self) -> DepthRange {
        match self {
            MineralType::Copper => DepthRange { min: 250, max: 750 },
            MineralType::Gold => DepthRange { min: 100, max: 300 },
        }
    }
}

impl fmt::Display for MineralType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Depth window in meters below surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: u32,
    pub max: u32,
}

impl fmt::Display for DepthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}
