//! # Unit Labels
//!
//! The library works in whatever consistent unit system the caller feeds it
//! and never converts. Front ends attach these labels to tabular output.
//!
//! ## Example
//!
//! ```rust
//! use alweld_core::units::UnitLabels;
//!
//! let units = UnitLabels::KIP_INCH;
//! assert_eq!(units.stress_value(21.2), "21.200 ksi");
//! ```

use serde::{Deserialize, Serialize};

/// Unit names for each quantity that appears in a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UnitLabels {
    pub force: &'static str,
    pub length: &'static str,
    pub stress: &'static str,
    pub moment: &'static str,
}

impl UnitLabels {
    /// kips, inches, ksi, kip-in (the catalog's native units)
    pub const KIP_INCH: UnitLabels = UnitLabels {
        force: "kip",
        length: "in",
        stress: "ksi",
        moment: "kip-in",
    };

    /// Label of an area, e.g. "in²"
    pub fn area(&self) -> String {
        format!("{}²", self.length)
    }

    /// Label of a second moment of area, e.g. "in⁴"
    pub fn inertia(&self) -> String {
        format!("{}⁴", self.length)
    }

    pub fn stress_value(&self, value: f64) -> String {
        format!("{:.3} {}", value, self.stress)
    }

    pub fn force_value(&self, value: f64) -> String {
        format!("{:.3} {}", value, self.force)
    }

    pub fn moment_value(&self, value: f64) -> String {
        format!("{:.3} {}", value, self.moment)
    }
}

impl Default for UnitLabels {
    fn default() -> Self {
        Self::KIP_INCH
    }
}

/// Unit system selector for serialized reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    KipInch,
}

impl UnitSystem {
    pub fn labels(&self) -> UnitLabels {
        match self {
            UnitSystem::KipInch => UnitLabels::KIP_INCH,
        }
    }
}
