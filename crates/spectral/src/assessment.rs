//! Summary statistics and qualitative geological assessment.
//!
//! Thresholds on the maximum score/index value decide the labels; the
//! descriptive text (deposit system, interpretation, recommendations) is
//! fixed per commodity.

use mineral_common::{MineralType, Raster};
use serde::{Deserialize, Serialize};

use crate::indices::MineralIndices;
use crate::potential::PotentialScores;

/// Mean and maximum over the finite samples of a raster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f32,
    pub max: f32,
}

impl SummaryStats {
    /// Empty or all-NaN rasters summarize to zeros.
    pub fn of(raster: &Raster) -> Self {
        Self {
            mean: raster.mean_finite().unwrap_or(0.0),
            max: raster.max_finite().unwrap_or(0.0),
        }
    }
}

/// Copper label from the peak score.
pub fn copper_assessment(max: f32) -> &'static str {
    if max > 85.0 {
        "HIGH POTENTIAL"
    } else if max > 70.0 {
        "MODERATE POTENTIAL"
    } else {
        "LOW POTENTIAL"
    }
}

/// Gold label from the peak score.
pub fn gold_assessment(max: f32) -> &'static str {
    if max > 80.0 {
        "HIGH POTENTIAL"
    } else if max > 65.0 {
        "MODERATE-HIGH POTENTIAL"
    } else {
        "MODERATE POTENTIAL"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalStatus {
    Strong,
    Moderate,
}

/// Potential summary for one commodity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotentialSummary {
    pub mean: f32,
    pub max: f32,
    pub assessment: String,
    pub depth_m: String,
    pub system: String,
    /// Copper only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_rock: Option<String>,
    /// Gold only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

impl PotentialSummary {
    pub fn new(mineral: MineralType, score: &Raster) -> Self {
        let stats = SummaryStats::of(score);
        let (assessment, system, host_rock, environment) = match mineral {
            MineralType::Copper => (
                copper_assessment(stats.max),
                "Porphyry Copper",
                Some("Granite (Precambrian intrusive)"),
                None,
            ),
            MineralType::Gold => (
                gold_assessment(stats.max),
                "Epithermal Gold",
                None,
                Some("Silica-cap epithermal"),
            ),
        };

        Self {
            mean: stats.mean,
            max: stats.max,
            assessment: assessment.to_string(),
            depth_m: mineral.depth_range().to_string(),
            system: system.to_string(),
            host_rock: host_rock.map(str::to_string),
            environment: environment.map(str::to_string),
        }
    }
}

/// Strength of one alteration index across the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineralSignature {
    pub mean: f32,
    pub max: f32,
    pub status: SignalStatus,
    pub interpretation: String,
}

impl MineralSignature {
    fn new(index: &Raster, strong_above: f32, interpretation: &str) -> Self {
        let stats = SummaryStats::of(index);
        Self {
            mean: stats.mean,
            max: stats.max,
            status: if stats.max > strong_above {
                SignalStatus::Strong
            } else {
                SignalStatus::Moderate
            },
            interpretation: interpretation.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MineralSignatures {
    pub kfeldspar: MineralSignature,
    pub clay: MineralSignature,
    pub iron_oxide: MineralSignature,
    pub silica: MineralSignature,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub signal_convergence: String,
    pub system_type: String,
    pub similar_deposits: String,
    pub overall_risk: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub short_term: Vec<String>,
    pub medium_term: Vec<String>,
    pub action: String,
}

/// Full qualitative analysis of one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeologicalAnalysis {
    pub copper: PotentialSummary,
    pub gold: PotentialSummary,
    pub minerals: MineralSignatures,
    pub risk_assessment: RiskAssessment,
    pub recommendations: Recommendations,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn generate_geological_analysis(
    scores: &PotentialScores,
    indices: &MineralIndices,
) -> GeologicalAnalysis {
    GeologicalAnalysis {
        copper: PotentialSummary::new(MineralType::Copper, &scores.copper),
        gold: PotentialSummary::new(MineralType::Gold, &scores.gold),
        minerals: MineralSignatures {
            kfeldspar: MineralSignature::new(
                &indices.kfeldspar,
                2.5,
                "Potassic core of porphyry system → Copper mineralization",
            ),
            clay: MineralSignature::new(
                &indices.clay,
                1.8,
                "Phyllosilicate-rich zones → Epithermal and distal porphyry",
            ),
            iron_oxide: MineralSignature::new(
                &indices.iron_oxide,
                0.6,
                "Hematite/limonite → Near-surface oxidation and weathering",
            ),
            silica: MineralSignature::new(
                &indices.silica,
                1.0,
                "Silica-rich cap → Shallow epithermal environment",
            ),
        },
        risk_assessment: RiskAssessment {
            signal_convergence: "Multiple alteration signals converge on same area".to_string(),
            system_type: "Classic porphyry system (PROVEN)".to_string(),
            similar_deposits: "Similar to existing Carlin deposits (KNOWN)".to_string(),
            overall_risk: "LOW".to_string(),
        },
        recommendations: Recommendations {
            immediate: strings(&[
                "Ground reconnaissance in AOI",
                "Rock sample collection for geochemistry",
                "Ground geophysical surveys (magnetic, gravity)",
            ]),
            short_term: strings(&[
                "Scout drilling program (0-3 months)",
                "Target: potassic-altered granite contact",
                "Depth: 300-500m initial holes",
            ]),
            medium_term: strings(&[
                "Core logging and assay (3-12 months)",
                "Update 3D geological model",
                "Define mineralized resource boundaries",
            ]),
            action: "PROCEED WITH DRILLING".to_string(),
        },
    }
}
