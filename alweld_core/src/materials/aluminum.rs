//! Aluminum Alloy Catalog
//!
//! Mechanical properties keyed by alloy/temper id ("6061-T6"). The default
//! table is embedded from `data/aluminum_alloys.toml` at compile time and
//! parsed once when the catalog is built; callers construct one catalog at
//! startup and pass it by reference to the partitioner and envelope reducer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{grade_id_from_material_name, Material, WeldCondition};
use crate::errors::{require_positive, CalcError, CalcResult};

const BUILTIN_TABLE: &str = include_str!("../../data/aluminum_alloys.toml");

/// Properties of one alloy/temper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlloyGrade {
    /// Alloy and temper designation (e.g., "6061-T6")
    pub id: String,
    /// Tensile yield strength of base metal (ksi)
    pub fty: f64,
    /// Tensile yield strength in the heat-affected zone (ksi)
    pub ftyw: f64,
    /// Elastic modulus (ksi)
    pub elastic_modulus: f64,
    pub poissons_ratio: f64,
    /// Density (lb/in³)
    pub density: f64,
}

impl AlloyGrade {
    fn validate(&self) -> CalcResult<()> {
        require_positive("fty", self.fty)?;
        require_positive("ftyw", self.ftyw)?;
        require_positive("elastic_modulus", self.elastic_modulus)?;
        require_positive("density", self.density)?;
        if !(0.0..0.5).contains(&self.poissons_ratio) {
            return Err(CalcError::invalid_input(
                "poissons_ratio",
                self.poissons_ratio.to_string(),
                "Poisson's ratio must be in [0, 0.5)",
            ));
        }
        if self.ftyw > self.fty {
            warn!(
                grade = %self.id,
                fty = self.fty,
                ftyw = self.ftyw,
                "welded yield exceeds base yield"
            );
        }
        Ok(())
    }

    /// Yield strength for the given weld condition
    pub fn yield_strength(&self, condition: WeldCondition) -> f64 {
        match condition {
            WeldCondition::Unwelded => self.fty,
            WeldCondition::Welded => self.ftyw,
        }
    }

    /// Build the material record for one weld condition
    pub fn material(&self, condition: WeldCondition) -> Material {
        Material {
            name: format!("{}{}", self.id, condition.suffix()),
            elastic_modulus: self.elastic_modulus,
            poissons_ratio: self.poissons_ratio,
            yield_strength: self.yield_strength(condition),
            density: self.density,
            color: condition.color(),
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    grade: Vec<AlloyGrade>,
}

/// Read-only alloy lookup table.
///
/// Never mutated after construction, so a shared reference can be read from
/// any number of threads.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlloyCatalog {
    grades: BTreeMap<String, AlloyGrade>,
}

impl AlloyCatalog {
    /// Catalog built from the embedded alloy table
    pub fn builtin() -> CalcResult<Self> {
        Self::from_toml_str(BUILTIN_TABLE)
    }

    /// Parse a catalog from TOML text containing `[[grade]]` entries.
    pub fn from_toml_str(text: &str) -> CalcResult<Self> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_grades(file.grade)
    }

    /// Build a catalog from already-constructed grade entries.
    pub fn from_grades(grades: impl IntoIterator<Item = AlloyGrade>) -> CalcResult<Self> {
        let mut map = BTreeMap::new();
        for grade in grades {
            grade.validate()?;
            if map.contains_key(&grade.id) {
                return Err(CalcError::invalid_input(
                    "grade",
                    grade.id,
                    "Duplicate alloy grade in catalog",
                ));
            }
            map.insert(grade.id.clone(), grade);
        }
        Ok(Self { grades: map })
    }

    /// Selectable grade ids, sorted
    pub fn grade_ids(&self) -> impl Iterator<Item = &str> {
        self.grades.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    pub fn grade(&self, grade_id: &str) -> CalcResult<&AlloyGrade> {
        self.grades
            .get(grade_id)
            .ok_or_else(|| CalcError::unknown_grade(grade_id))
    }

    /// Unwelded and welded material records for a grade.
    pub fn lookup(&self, grade_id: &str) -> CalcResult<(Material, Material)> {
        let grade = self.grade(grade_id)?;
        Ok((
            grade.material(WeldCondition::Unwelded),
            grade.material(WeldCondition::Welded),
        ))
    }

    /// Zone-appropriate yield strength for a full material name such as
    /// "6061-T6 - Welded": Fty when the name contains "Unwelded", else Ftyw.
    pub fn yield_for_material_name(&self, material_name: &str) -> CalcResult<f64> {
        let grade = self.grade(grade_id_from_material_name(material_name))?;
        Ok(grade.yield_strength(WeldCondition::from_material_name(material_name)))
    }
}
