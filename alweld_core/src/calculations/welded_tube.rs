//! # Partially Welded Tube
//!
//! Runs the whole pipeline for one tube: catalog lookup, partition and mesh,
//! solver preparation, then stress and envelope per load case.
//!
//! The section is built once in [`WeldedTubeAnalysis::prepare`]; every
//! [`WeldedTubeAnalysis::evaluate`] call reuses it, so many load cases or
//! design methods can be checked without rebuilding geometry.
//!
//! ## Example
//!
//! ```rust
//! use alweld_core::analysis::LoadActions;
//! use alweld_core::calculations::{WeldedTubeAnalysis, WeldedTubeInput};
//! use alweld_core::envelope::DesignCriteria;
//! use alweld_core::materials::AlloyCatalog;
//!
//! let catalog = AlloyCatalog::builtin().unwrap();
//! let analysis = WeldedTubeAnalysis::prepare(WeldedTubeInput::default(), &catalog).unwrap();
//!
//! let result = analysis
//!     .evaluate(&LoadActions::axial(1.0), &DesignCriteria::default())
//!     .unwrap();
//! assert_eq!(result.envelope.len(), 2);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{
    ElasticSectionSolver, GeometricProperties, LoadActions, PlasticProperties, SectionSolver,
    StressComponent, StressResult, WarpingProperties,
};
use crate::envelope::{reduce, DesignCriteria, StressEnvelope};
use crate::errors::{require_positive, CalcError, CalcResult};
use crate::geometry::{CompoundGeometry, Face};
use crate::materials::AlloyCatalog;
use crate::partition::{partition, TubeProfile, WeldZone};
use crate::section::Section;

/// Input parameters for a partially welded tube.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Post P-1",
///   "grade": "6061-T6",
///   "profile": { "d": 2.0, "b": 3.0, "t": 0.125, "r_out": 0.05 },
///   "weld_radius": 1.0,
///   "zones": [
///     { "face": "top", "position": 0.0 },
///     { "face": "left", "position": 1.0 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldedTubeInput {
    /// User label (e.g., "Post P-1")
    pub label: String,

    /// Alloy grade id, e.g. "6061-T6"
    pub grade: String,

    pub profile: TubeProfile,

    /// Radius of every weld heat-affected circle
    pub weld_radius: f64,

    /// Weld zones, applied in order
    pub zones: Vec<WeldZone>,
}

impl Default for WeldedTubeInput {
    fn default() -> Self {
        Self {
            label: "Tube".to_string(),
            grade: "6061-T6".to_string(),
            profile: TubeProfile::default(),
            weld_radius: 1.0,
            zones: vec![WeldZone::new(Face::Top, 0.0)],
        }
    }
}

impl WeldedTubeInput {
    /// Validate input parameters against the catalog.
    pub fn validate(&self, catalog: &AlloyCatalog) -> CalcResult<()> {
        catalog.grade(&self.grade)?;
        self.profile.validate()?;
        require_positive("weld_radius", self.weld_radius)?;
        for zone in &self.zones {
            zone.validate()?;
        }
        Ok(())
    }
}

/// Minimum and maximum of one stress component within a zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentRange {
    pub min: f64,
    pub max: f64,
}

/// Outcome of one load case on a prepared section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCaseResult {
    pub actions: LoadActions,
    pub criteria: DesignCriteria,
    pub envelope: StressEnvelope,
    /// Zone → selectable component key → range
    pub component_extremes: BTreeMap<String, BTreeMap<String, ComponentRange>>,
}

impl LoadCaseResult {
    pub fn passes(&self) -> bool {
        self.envelope.passes()
    }
}

/// One-shot result: section properties plus a single load case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeldedTubeResult {
    pub label: String,
    pub grade: String,
    pub geometric: GeometricProperties,
    pub plastic: PlasticProperties,
    pub warping: WarpingProperties,
    pub load_case: LoadCaseResult,
}

/// A partitioned, meshed and prepared tube section.
#[derive(Debug)]
pub struct WeldedTubeAnalysis<'a, S: SectionSolver = ElasticSectionSolver> {
    input: WeldedTubeInput,
    catalog: &'a AlloyCatalog,
    visualization: CompoundGeometry,
    solver: S,
}

impl<'a> WeldedTubeAnalysis<'a, ElasticSectionSolver> {
    /// Partition, mesh and prepare the built-in solver.
    pub fn prepare(input: WeldedTubeInput, catalog: &'a AlloyCatalog) -> CalcResult<Self> {
        Self::with_solver(input, catalog, ElasticSectionSolver::new)
    }

    pub fn geometric_properties(&self) -> Option<&GeometricProperties> {
        self.solver.geometric_properties()
    }

    pub fn plastic_properties(&self) -> Option<&PlasticProperties> {
        self.solver.plastic_properties()
    }

    pub fn warping_properties(&self) -> Option<&WarpingProperties> {
        self.solver.warping_properties()
    }
}

impl<'a, S: SectionSolver> WeldedTubeAnalysis<'a, S> {
    /// Partition and mesh, hand the section to `build`, then prepare the
    /// resulting solver.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - unknown grade or bad dimensions
    /// * `MeshGeneration` - the partitioned geometry could not be meshed
    /// * `Analysis` - the solver failed while computing properties
    pub fn with_solver<F>(input: WeldedTubeInput, catalog: &'a AlloyCatalog, build: F) -> CalcResult<Self>
    where
        F: FnOnce(Section) -> S,
    {
        input.validate(catalog)?;
        let parts = partition(
            &input.profile,
            &input.zones,
            input.weld_radius,
            &input.grade,
            catalog,
        )?;
        let mut solver = build(parts.section);
        solver.prepare()?;
        info!(label = %input.label, grade = %input.grade, "section solver prepared");

        Ok(Self {
            input,
            catalog,
            visualization: parts.visualization,
            solver,
        })
    }

    pub fn input(&self) -> &WeldedTubeInput {
        &self.input
    }

    /// Tube plus weld circles, overlapping; for rendering
    pub fn visualization(&self) -> &CompoundGeometry {
        &self.visualization
    }

    pub fn section(&self) -> &Section {
        self.solver.section()
    }

    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Full stress field for one load case, for contour rendering.
    pub fn stress(&self, actions: &LoadActions) -> CalcResult<StressResult> {
        actions.validate()?;
        self.solver.calculate_stress(actions)
    }

    /// Stress field, envelope and per-component ranges for one load case.
    pub fn evaluate(&self, actions: &LoadActions, criteria: &DesignCriteria) -> CalcResult<LoadCaseResult> {
        let stress = self.stress(actions)?;
        let envelope = reduce(&stress, criteria, self.catalog)?;

        let component_extremes = stress
            .zones
            .iter()
            .map(|zone| {
                let ranges = StressComponent::ALL
                    .iter()
                    .filter_map(|c| {
                        zone.extremes(c.key())
                            .map(|(min, max)| (c.key().to_string(), ComponentRange { min, max }))
                    })
                    .collect();
                (zone.material.clone(), ranges)
            })
            .collect();

        Ok(LoadCaseResult {
            actions: *actions,
            criteria: *criteria,
            envelope,
            component_extremes,
        })
    }
}

/// Prepare the section and evaluate a single load case.
///
/// # Example
///
/// ```rust
/// use alweld_core::analysis::LoadActions;
/// use alweld_core::calculations::{analyze, WeldedTubeInput};
/// use alweld_core::envelope::DesignCriteria;
/// use alweld_core::materials::AlloyCatalog;
///
/// let catalog = AlloyCatalog::builtin().unwrap();
/// let result = analyze(
///     &WeldedTubeInput::default(),
///     &LoadActions::axial(1.0),
///     &DesignCriteria::lrfd(0.9),
///     &catalog,
/// )
/// .unwrap();
/// assert!(result.load_case.passes());
/// ```
pub fn analyze(
    input: &WeldedTubeInput,
    actions: &LoadActions,
    criteria: &DesignCriteria,
    catalog: &AlloyCatalog,
) -> CalcResult<WeldedTubeResult> {
    let analysis = WeldedTubeAnalysis::prepare(input.clone(), catalog)?;
    let load_case = analysis.evaluate(actions, criteria)?;

    let missing = |what: &str| CalcError::analysis("properties", format!("{what} properties missing after prepare"));
    Ok(WeldedTubeResult {
        label: input.label.clone(),
        grade: input.grade.clone(),
        geometric: analysis.geometric_properties().cloned().ok_or_else(|| missing("geometric"))?,
        plastic: analysis.plastic_properties().cloned().ok_or_else(|| missing("plastic"))?,
        warping: analysis.warping_properties().cloned().ok_or_else(|| missing("warping"))?,
        load_case,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::ZoneStress;

    /// Solver returning a fixed field: sig_zz = [0, N] and sig_vm = [N] in every zone.
    struct StubSolver {
        section: Section,
        prepared: bool,
    }

    impl SectionSolver for StubSolver {
        fn section(&self) -> &Section {
            &self.section
        }

        fn calculate_geometric_properties(&mut self) -> CalcResult<()> {
            self.prepared = true;
            Ok(())
        }

        fn calculate_plastic_properties(&mut self) -> CalcResult<()> {
            Ok(())
        }

        fn calculate_warping_properties(&mut self) -> CalcResult<()> {
            Ok(())
        }

        fn calculate_stress(&self, actions: &LoadActions) -> CalcResult<StressResult> {
            if !self.prepared {
                return Err(CalcError::analysis("stress", "not prepared"));
            }
            let zones = self
                .section
                .materials()
                .iter()
                .map(|m| {
                    ZoneStress::new(m.name.clone())
                        .with_component("sig_zz", vec![0.0, actions.n])
                        .with_component("sig_vm", vec![actions.n.abs()])
                })
                .collect();
            Ok(StressResult {
                actions: *actions,
                zones,
            })
        }
    }

    fn stub(section: Section) -> StubSolver {
        StubSolver {
            section,
            prepared: false,
        }
    }

    fn catalog() -> AlloyCatalog {
        AlloyCatalog::builtin().unwrap()
    }

    #[test]
    fn test_default_input_is_valid() {
        let input = WeldedTubeInput::default();
        assert!(input.validate(&catalog()).is_ok());
        assert_eq!(input.zones, vec![WeldZone::new(Face::Top, 0.0)]);
    }

    #[test]
    fn test_input_validation() {
        let catalog = catalog();
        let mut input = WeldedTubeInput {
            grade: "7075-T9".to_string(),
            ..WeldedTubeInput::default()
        };
        assert!(matches!(
            input.validate(&catalog).unwrap_err(),
            CalcError::InvalidInput { .. }
        ));

        input.grade = "6061-T6".to_string();
        input.weld_radius = 0.0;
        match input.validate(&catalog).unwrap_err() {
            CalcError::InvalidInput { field, .. } => assert_eq!(field, "weld_radius"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_stub_solver_pipeline() {
        let catalog = catalog();
        let analysis =
            WeldedTubeAnalysis::with_solver(WeldedTubeInput::default(), &catalog, stub).unwrap();
        let result = analysis
            .evaluate(&LoadActions::axial(3.0), &DesignCriteria::default())
            .unwrap();

        assert_eq!(result.envelope.len(), 2);
        let welded = result.envelope.get("6061-T6 - Welded").unwrap();
        let unwelded = result.envelope.get("6061-T6 - Unwelded").unwrap();
        assert_eq!(welded.max_stress, 3.0);
        assert_eq!(welded.min_stress, 0.0);
        assert!((welded.stress_ratio - 3.0 / (15.0 / 1.65)).abs() < 1e-12);
        assert!((unwelded.stress_ratio - 3.0 / (35.0 / 1.65)).abs() < 1e-12);

        let ranges = &result.component_extremes["6061-T6 - Welded"];
        assert_eq!(ranges["sig_zz"], ComponentRange { min: 0.0, max: 3.0 });
        assert!(!ranges.contains_key("sig_11"));
    }

    #[test]
    fn test_section_reused_across_load_cases() {
        let catalog = catalog();
        let analysis =
            WeldedTubeAnalysis::with_solver(WeldedTubeInput::default(), &catalog, stub).unwrap();
        let nodes = analysis.section().mesh().nodes.len();

        let light = analysis
            .evaluate(&LoadActions::axial(1.0), &DesignCriteria::default())
            .unwrap();
        let heavy = analysis
            .evaluate(&LoadActions::axial(20.0), &DesignCriteria::lrfd(0.9))
            .unwrap();

        assert!(light.passes());
        assert!(!heavy.passes());
        assert_eq!(analysis.section().mesh().nodes.len(), nodes);
    }

    #[test]
    fn test_non_finite_actions_rejected() {
        let catalog = catalog();
        let analysis =
            WeldedTubeAnalysis::with_solver(WeldedTubeInput::default(), &catalog, stub).unwrap();
        let actions = LoadActions {
            vy: f64::INFINITY,
            ..LoadActions::default()
        };
        assert!(matches!(
            analysis.evaluate(&actions, &DesignCriteria::default()).unwrap_err(),
            CalcError::InvalidInput { .. }
        ));
    }

    #[test]
    fn test_input_json_round_trip() {
        let json = r#"{
            "label": "P-1",
            "grade": "5052-H32",
            "profile": { "d": 4.0, "b": 4.0, "t": 0.25, "r_out": 0.0 },
            "weld_radius": 0.75,
            "zones": [{ "face": "Left", "position": 2.0 }]
        }"#;
        let input: WeldedTubeInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.zones[0].face, Face::Left);
        assert!(input.validate(&catalog()).is_ok());
    }
}
