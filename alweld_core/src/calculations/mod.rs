//! # Calculations
//!
//! Pipeline entry points. Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable, with `validate()`)
//! - `*Result` - Calculation results (JSON-serializable)
//! - a pure function or prepared object that turns one into the other
//!
//! ## Available Calculations
//!
//! - [`welded_tube`] - Partially welded rectangular tube under combined actions

pub mod welded_tube;

pub use welded_tube::{
    analyze, ComponentRange, LoadCaseResult, WeldedTubeAnalysis, WeldedTubeInput,
    WeldedTubeResult,
};
