//! # Materials Database
//!
//! Aluminum alloy properties and the two material records derived from each
//! grade: base ("Unwelded") metal at Fty and heat-affected ("Welded") metal at
//! Ftyw. Both records share modulus, Poisson's ratio and density; they differ
//! only in yield strength and display color.
//!
//! ## Example
//!
//! ```rust
//! use alweld_core::materials::AlloyCatalog;
//!
//! let catalog = AlloyCatalog::builtin().unwrap();
//! let (unwelded, welded) = catalog.lookup("6061-T6").unwrap();
//!
//! assert_eq!(unwelded.name, "6061-T6 - Unwelded");
//! assert_eq!(welded.yield_strength, 15.0);
//! ```

pub mod aluminum;

pub use aluminum::{AlloyCatalog, AlloyGrade};

use serde::{Deserialize, Serialize};

/// Display tone attached to a material for downstream plotting.
///
/// Carries no analytical meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DisplayColor {
    /// Base metal tone
    #[serde(rename = "silver")]
    Unwelded,
    /// Heat-affected zone tone
    #[serde(rename = "firebrick")]
    Welded,
}

impl DisplayColor {
    /// Color name understood by common plotting libraries
    pub fn css_name(&self) -> &'static str {
        match self {
            DisplayColor::Unwelded => "silver",
            DisplayColor::Welded => "firebrick",
        }
    }
}

impl std::fmt::Display for DisplayColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.css_name())
    }
}

/// Whether a material record describes base metal or the weld heat-affected zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeldCondition {
    Unwelded,
    Welded,
}

impl WeldCondition {
    /// Suffix appended to the grade id to form a material name
    pub fn suffix(&self) -> &'static str {
        match self {
            WeldCondition::Unwelded => " - Unwelded",
            WeldCondition::Welded => " - Welded",
        }
    }

    /// Classify a material name.
    ///
    /// Any name containing "Unwelded" is base metal; everything else is
    /// treated as heat-affected, which is the conservative reading.
    pub fn from_material_name(name: &str) -> Self {
        if name.contains("Unwelded") {
            WeldCondition::Unwelded
        } else {
            WeldCondition::Welded
        }
    }

    pub fn color(&self) -> DisplayColor {
        match self {
            WeldCondition::Unwelded => DisplayColor::Unwelded,
            WeldCondition::Welded => DisplayColor::Welded,
        }
    }
}

/// Strip the weld-condition suffix from a material name, leaving the grade id.
pub fn grade_id_from_material_name(name: &str) -> &str {
    name.strip_suffix(WeldCondition::Welded.suffix())
        .or_else(|| name.strip_suffix(WeldCondition::Unwelded.suffix()))
        .unwrap_or(name)
}

/// A single material record used to tag geometry regions.
///
/// Immutable once built by [`AlloyCatalog::lookup`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "name": "6061-T6 - Welded",
///   "elastic_modulus": 10100.0,
///   "poissons_ratio": 0.33,
///   "yield_strength": 15.0,
///   "density": 0.1,
///   "color": "firebrick"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// "<grade> - Unwelded" or "<grade> - Welded"
    pub name: String,
    /// Elastic modulus E (ksi)
    pub elastic_modulus: f64,
    /// Poisson's ratio
    pub poissons_ratio: f64,
    /// Yield strength used for this zone (ksi)
    pub yield_strength: f64,
    /// Density (lb/in³)
    pub density: f64,
    /// Plot color
    pub color: DisplayColor,
}

impl Material {
    pub fn condition(&self) -> WeldCondition {
        WeldCondition::from_material_name(&self.name)
    }

    /// Grade id this material was derived from
    pub fn grade_id(&self) -> &str {
        grade_id_from_material_name(&self.name)
    }

    /// Shear modulus G = E / 2(1 + ν)
    pub fn shear_modulus(&self) -> f64 {
        self.elastic_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }
}
