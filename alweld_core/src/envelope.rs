//! # Stress Envelope
//!
//! Reduces a per-zone stress field to a worst-case envelope and a stress
//! ratio against the zone's yield strength.
//!
//! ## Design methods
//!
//! | Method | Factor | Allowable stress |
//! |--------|--------|------------------|
//! | ASD    | Ω (safety factor, default 1.65)     | Fy / Ω |
//! | LRFD   | φ (resistance factor, default 0.90) | φ·Fy   |
//!
//! ## Envelope convention
//!
//! For each zone, `max_stress` is the largest value of any stress component
//! clamped to be at least zero and `min_stress` is the smallest clamped to
//! be at most zero, so an all-tension field still reports a zero minimum.
//! The stress ratio is `max(max_stress, |min_stress|) / allowable`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::analysis::StressResult;
use crate::errors::{CalcError, CalcResult};
use crate::materials::AlloyCatalog;

/// Default ASD safety factor Ω
pub const DEFAULT_ASD_FACTOR: f64 = 1.65;

/// Default LRFD resistance factor φ
pub const DEFAULT_LRFD_FACTOR: f64 = 0.90;

/// Design methodology selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DesignMethod {
    /// Allowable Stress Design - capacity divided by a safety factor
    #[default]
    Asd,
    /// Load and Resistance Factor Design - capacity multiplied by a resistance factor
    Lrfd,
}

impl DesignMethod {
    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD (Allowable Stress Design)",
            DesignMethod::Lrfd => "LRFD (Load and Resistance Factor Design)",
        }
    }

    /// Short abbreviation
    pub fn code(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "ASD",
            DesignMethod::Lrfd => "LRFD",
        }
    }

    /// Customary factor for this method
    pub fn default_factor(&self) -> f64 {
        match self {
            DesignMethod::Asd => DEFAULT_ASD_FACTOR,
            DesignMethod::Lrfd => DEFAULT_LRFD_FACTOR,
        }
    }

    /// Symbol of the factor as printed in reports
    pub fn factor_symbol(&self) -> &'static str {
        match self {
            DesignMethod::Asd => "Ω",
            DesignMethod::Lrfd => "φ",
        }
    }
}

impl std::fmt::Display for DesignMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Design method plus its factor (Ω for ASD, φ for LRFD)
///
/// ## JSON Example
///
/// ```json
/// { "method": "Lrfd", "factor": 0.9 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DesignCriteria {
    pub method: DesignMethod,
    pub factor: f64,
}

impl DesignCriteria {
    pub fn asd(omega: f64) -> Self {
        Self {
            method: DesignMethod::Asd,
            factor: omega,
        }
    }

    pub fn lrfd(phi: f64) -> Self {
        Self {
            method: DesignMethod::Lrfd,
            factor: phi,
        }
    }

    /// Multiplier applied to Fy: 1/Ω for ASD, φ for LRFD
    pub fn reduction_factor(&self) -> f64 {
        match self.method {
            DesignMethod::Asd => 1.0 / self.factor,
            DesignMethod::Lrfd => self.factor,
        }
    }

    /// Reject factors that cannot produce a ratio at all.
    ///
    /// Unusual but usable factors (φ > 1, Ω < 1) are accepted with a warning.
    pub fn validate(&self) -> CalcResult<()> {
        if !self.factor.is_finite() || self.factor <= 0.0 {
            return Err(CalcError::invalid_input(
                "factor",
                self.factor.to_string(),
                "Design factor must be a positive number",
            ));
        }
        let unusual = match self.method {
            DesignMethod::Asd => self.factor < 1.0,
            DesignMethod::Lrfd => self.factor > 1.0,
        };
        if unusual {
            warn!(
                method = %self.method,
                factor = self.factor,
                "design factor outside its customary range"
            );
        }
        Ok(())
    }
}

impl Default for DesignCriteria {
    fn default() -> Self {
        Self::asd(DEFAULT_ASD_FACTOR)
    }
}

/// Worst-case stresses and utilization for one material zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeEntry {
    /// Largest stress of any component, at least 0
    pub max_stress: f64,
    /// Smallest stress of any component, at most 0
    pub min_stress: f64,
    /// Yield strength of the zone (Fty or Ftyw)
    pub fy: f64,
    /// Fy × reduction factor
    pub allowable_stress: f64,
    pub stress_ratio: f64,
}

impl EnvelopeEntry {
    pub fn passes(&self) -> bool {
        self.stress_ratio <= 1.0
    }
}

/// Envelope entries keyed by material name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StressEnvelope {
    pub entries: BTreeMap<String, EnvelopeEntry>,
}

impl StressEnvelope {
    pub fn get(&self, material: &str) -> Option<&EnvelopeEntry> {
        self.entries.get(material)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &EnvelopeEntry)> {
        self.entries.iter()
    }

    /// Zone with the highest stress ratio
    pub fn governing(&self) -> Option<(&str, &EnvelopeEntry)> {
        self.entries
            .iter()
            .max_by(|a, b| a.1.stress_ratio.total_cmp(&b.1.stress_ratio))
            .map(|(name, entry)| (name.as_str(), entry))
    }

    /// True when every zone has a stress ratio of at most 1
    pub fn passes(&self) -> bool {
        self.entries.values().all(EnvelopeEntry::passes)
    }
}

/// Reduce a stress field to one envelope entry per material zone.
///
/// # Errors
///
/// * `InvalidInput` - non-positive factor, or a zone whose material name
///   does not resolve to a catalog grade
pub fn reduce(
    stress: &StressResult,
    criteria: &DesignCriteria,
    catalog: &AlloyCatalog,
) -> CalcResult<StressEnvelope> {
    criteria.validate()?;
    let reduction = criteria.reduction_factor();

    let mut envelope = StressEnvelope::default();
    for zone in &stress.zones {
        let fy = catalog.yield_for_material_name(&zone.material)?;

        let mut max_stress = 0.0_f64;
        let mut min_stress = 0.0_f64;
        for values in zone.components.values() {
            for &v in values {
                max_stress = max_stress.max(v);
                min_stress = min_stress.min(v);
            }
        }

        let allowable_stress = fy * reduction;
        let stress_ratio = max_stress.max(min_stress.abs()) / allowable_stress;
        debug!(
            zone = %zone.material,
            max_stress,
            min_stress,
            fy,
            stress_ratio,
            "zone envelope"
        );
        envelope.entries.insert(
            zone.material.clone(),
            EnvelopeEntry {
                max_stress,
                min_stress,
                fy,
                allowable_stress,
                stress_ratio,
            },
        );
    }

    if let Some((zone, entry)) = envelope.governing() {
        info!(
            method = %criteria.method,
            factor = criteria.factor,
            governing = zone,
            stress_ratio = entry.stress_ratio,
            "stress envelope computed"
        );
    }
    Ok(envelope)
}
