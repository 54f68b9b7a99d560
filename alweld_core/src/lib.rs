//! # alweld_core - Partially Welded Aluminum Tube Stress Engine
//!
//! `alweld_core` computes stresses in an aluminum rectangular tube whose
//! cross-section is partly weakened by weld heat, and reduces them to a
//! per-zone stress ratio under ASD or LRFD. All inputs and outputs are
//! JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Pipeline**: catalog → partition → solver → stress → envelope
//! - **Reusable geometry**: one prepared section serves any number of load cases
//! - **Pluggable solver**: the [`analysis::SectionSolver`] trait separates
//!   the engineering logic from the section analysis engine
//! - **Rich Errors**: structured error types, not just strings
//!
//! ## Quick Start
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
//! for n in [1.0, 5.0, 10.0] {
//!     let result = analysis
//!         .evaluate(&LoadActions::axial(n), &DesignCriteria::default())
//!         .unwrap();
//!     let (zone, entry) = result.envelope.governing().unwrap();
//!     println!("N = {n}: {zone} governs with SR {:.3}", entry.stress_ratio);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`materials`] - Alloy catalog and welded/unwelded material records
//! - [`geometry`] - Material-tagged polygons and primitive shapes
//! - [`partition`] - Weld-zone placement and welded/unwelded partitioning
//! - [`mesh`] - Triangular mesh of the partitioned section
//! - [`section`] - Geometry plus mesh, ready for a solver
//! - [`analysis`] - Solver trait, load actions, built-in elastic solver
//! - [`envelope`] - ASD/LRFD stress envelope reduction
//! - [`calculations`] - End-to-end pipeline entry points
//! - [`units`] - Unit labels for reports
//! - [`errors`] - Structured error types

pub mod analysis;
pub mod calculations;
pub mod envelope;
pub mod errors;
pub mod geometry;
pub mod materials;
pub mod mesh;
pub mod partition;
pub mod section;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{analyze, WeldedTubeAnalysis, WeldedTubeInput, WeldedTubeResult};
pub use errors::{CalcError, CalcResult};
