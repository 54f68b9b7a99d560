//! # Section Analysis
//!
//! The contract between the partitioned section and whatever computes its
//! properties and stress fields. [`SectionSolver`] is the seam: the pipeline
//! only needs the prepare calls and `calculate_stress`, so tests can plug in
//! a stub that returns synthetic arrays, and [`ElasticSectionSolver`]
//! provides a built-in closed-form implementation over the mesh.
//!
//! ## Call order
//!
//! ```text
//! calculate_geometric_properties ─┐
//! calculate_plastic_properties ───┼─> calculate_stress(actions)  (repeat per load case)
//! calculate_warping_properties ───┘
//! ```
//!
//! The property calls mutate solver state and are idempotent.
//! `calculate_stress` fails with `CalcError::Analysis` until the geometric
//! and warping properties exist.

pub mod elastic;

pub use elastic::ElasticSectionSolver;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::section::Section;

/// The six cross-section actions for one load case.
///
/// ## JSON Example
///
/// ```json
/// { "n": 1.0, "vx": 0.0, "vy": 0.5, "mxx": 2.0, "myy": 0.0, "mzz": 0.25 }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadActions {
    /// Axial force (tension positive)
    pub n: f64,
    /// Shear force along x
    pub vx: f64,
    /// Shear force along y
    pub vy: f64,
    /// Bending moment about the x axis
    pub mxx: f64,
    /// Bending moment about the y axis
    pub myy: f64,
    /// Torsional moment
    pub mzz: f64,
}

impl LoadActions {
    /// Pure axial load case
    pub fn axial(n: f64) -> Self {
        Self {
            n,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> CalcResult<()> {
        let fields = [
            ("n", self.n),
            ("vx", self.vx),
            ("vy", self.vy),
            ("mxx", self.mxx),
            ("myy", self.myy),
            ("mzz", self.mzz),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Load action must be finite",
                ));
            }
        }
        Ok(())
    }
}

/// Stress components a caller may select for contour plotting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StressComponent {
    VonMises,
    /// Major principal stress σ11
    Sigma11,
    /// Minor principal stress σ33
    Sigma33,
    /// Combined normal stress σzz
    Normal,
    /// Combined shear stress magnitude τzxy
    Shear,
}

impl StressComponent {
    pub const ALL: [StressComponent; 5] = [
        StressComponent::VonMises,
        StressComponent::Sigma11,
        StressComponent::Sigma33,
        StressComponent::Normal,
        StressComponent::Shear,
    ];

    /// Key of this component in [`ZoneStress::components`]
    pub fn key(&self) -> &'static str {
        match self {
            StressComponent::VonMises => "sig_vm",
            StressComponent::Sigma11 => "sig_11",
            StressComponent::Sigma33 => "sig_33",
            StressComponent::Normal => "sig_zz",
            StressComponent::Shear => "sig_zxy",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StressComponent::VonMises => "Von Mises",
            StressComponent::Sigma11 => "σ11",
            StressComponent::Sigma33 => "σ33",
            StressComponent::Normal => "Normal Stress",
            StressComponent::Shear => "Shear Stress",
        }
    }
}

impl std::fmt::Display for StressComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Stress field over the nodes of one material zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStress {
    /// Full material name, e.g. "6061-T6 - Welded"
    pub material: String,
    /// Node coordinates the component arrays are sampled at
    pub points: Vec<[f64; 2]>,
    /// Component name → one value per point
    pub components: BTreeMap<String, Vec<f64>>,
}

impl ZoneStress {
    pub fn new(material: impl Into<String>) -> Self {
        Self {
            material: material.into(),
            points: Vec::new(),
            components: BTreeMap::new(),
        }
    }

    pub fn with_component(mut self, key: impl Into<String>, values: Vec<f64>) -> Self {
        self.components.insert(key.into(), values);
        self
    }

    pub fn component(&self, component: StressComponent) -> Option<&[f64]> {
        self.components.get(component.key()).map(Vec::as_slice)
    }

    /// (min, max) of one component, or `None` if absent or empty
    pub fn extremes(&self, key: &str) -> Option<(f64, f64)> {
        let values = self.components.get(key)?;
        if values.is_empty() {
            return None;
        }
        Some(values.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        }))
    }
}

/// Per-zone stress fields for one load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressResult {
    pub actions: LoadActions,
    pub zones: Vec<ZoneStress>,
}

impl StressResult {
    pub fn zone(&self, material: &str) -> Option<&ZoneStress> {
        self.zones.iter().find(|z| z.material == material)
    }
}

/// Modulus-weighted elastic properties about the elastic centroid.
///
/// Stiffness values are divided by the reference modulus (the first
/// material's E), so for a single-alloy section they equal the plain
/// geometric values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometricProperties {
    /// Total area
    pub area: f64,
    /// Area per material name
    pub area_by_material: BTreeMap<String, f64>,
    /// Reference elastic modulus
    pub reference_modulus: f64,
    /// Axial rigidity EA
    pub ea: f64,
    /// Elastic centroid
    pub cx: f64,
    pub cy: f64,
    /// Second moments of area about the centroid
    pub ixx: f64,
    pub iyy: f64,
    pub ixy: f64,
    /// Elastic section moduli to the extreme fibres (+y, -y, +x, -x)
    pub zxx_plus: f64,
    pub zxx_minus: f64,
    pub zyy_plus: f64,
    pub zyy_minus: f64,
    /// Mass per unit length
    pub mass_per_length: f64,
    /// Outer perimeter
    pub perimeter: f64,
}

/// Yield-weighted plastic properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlasticProperties {
    /// Plastic neutral axis for bending about x (a y coordinate)
    pub y_pna: f64,
    /// Plastic neutral axis for bending about y (an x coordinate)
    pub x_pna: f64,
    /// Plastic moment about x
    pub mp_xx: f64,
    /// Plastic moment about y
    pub mp_yy: f64,
}

/// Torsion and shear properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarpingProperties {
    /// St. Venant torsion constant J
    pub j: f64,
    /// True when J comes from the closed thin-walled (Bredt) formula
    pub closed_section: bool,
    /// Area enclosed by the wall mid-line (closed sections)
    pub mean_enclosed_area: Option<f64>,
    /// Average wall thickness (closed sections)
    pub wall_thickness: Option<f64>,
    /// Largest node distance from the centroid
    pub r_max: f64,
    /// First moment of area above the centroidal x axis
    pub qx: f64,
    /// First moment of area right of the centroidal y axis
    pub qy: f64,
    /// Material width cut by the centroidal x axis
    pub width_at_cy: f64,
    /// Material width cut by the centroidal y axis
    pub width_at_cx: f64,
}

/// Computes section properties and stress fields for a meshed section.
pub trait SectionSolver {
    fn section(&self) -> &Section;

    fn calculate_geometric_properties(&mut self) -> CalcResult<()>;

    fn calculate_plastic_properties(&mut self) -> CalcResult<()>;

    fn calculate_warping_properties(&mut self) -> CalcResult<()>;

    /// Stress field per material zone for one set of actions.
    fn calculate_stress(&self, actions: &LoadActions) -> CalcResult<StressResult>;

    /// Run every property calculation in dependency order.
    fn prepare(&mut self) -> CalcResult<()> {
        self.calculate_geometric_properties()?;
        self.calculate_plastic_properties()?;
        self.calculate_warping_properties()
    }
}
