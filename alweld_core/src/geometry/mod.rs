//! # Section Geometry
//!
//! Material-tagged 2D regions and the boolean plumbing used to partition a
//! tube into welded and unwelded zones. Polygons are `geo` multipolygons, so
//! a region may be multiply connected (the tube itself has a hole) or split
//! into several pieces by a weld circle.
//!
//! ## Coordinates
//!
//! ```text
//!   y
//!   ^   (0,d) ┌──────── top ────────┐ (b,d)
//!   │         │ ┌─────────────────┐ │
//!   │    left │ │      hole       │ │ right
//!   │         │ └─────────────────┘ │
//!   │   (0,0) └─────── bottom ──────┘ (b,0)
//!   └────────────────────────────────────> x
//! ```

pub mod primitives;

pub use primitives::{circular_section, rectangular_hollow_section};

use std::collections::BTreeMap;
use std::str::FromStr;

use geo::{Area, BooleanOps, BoundingRect, MultiPolygon, Polygon, Rect, Translate};
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::materials::Material;

/// Face of the rectangular tube a weld zone sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    #[serde(alias = "Top")]
    Top,
    #[serde(alias = "Bottom")]
    Bottom,
    #[serde(alias = "Left")]
    Left,
    #[serde(alias = "Right")]
    Right,
}

impl Face {
    pub const ALL: [Face; 4] = [Face::Top, Face::Bottom, Face::Left, Face::Right];

    pub fn display_name(&self) -> &'static str {
        match self {
            Face::Top => "Top",
            Face::Bottom => "Bottom",
            Face::Left => "Left",
            Face::Right => "Right",
        }
    }
}

impl FromStr for Face {
    type Err = CalcError;

    /// Case-insensitive parse of "top", "bottom", "left" or "right".
    fn from_str(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "top" => Ok(Face::Top),
            "bottom" => Ok(Face::Bottom),
            "left" => Ok(Face::Left),
            "right" => Ok(Face::Right),
            _ => Err(CalcError::invalid_input(
                "face",
                s,
                "Face must be one of top, bottom, left, right",
            )),
        }
    }
}

impl std::fmt::Display for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A polygonal area made of a single material
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub polygon: MultiPolygon<f64>,
    pub material: Material,
}

impl Region {
    pub fn new(polygon: impl Into<MultiPolygon<f64>>, material: Material) -> Self {
        Self {
            polygon: polygon.into(),
            material,
        }
    }

    pub fn area(&self) -> f64 {
        self.polygon.unsigned_area()
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.polygon.bounding_rect()
    }

    pub fn is_empty(&self) -> bool {
        self.polygon.0.is_empty()
    }

    pub fn shifted(&self, dx: f64, dy: f64) -> Self {
        Self {
            polygon: self.polygon.translate(dx, dy),
            material: self.material.clone(),
        }
    }

    /// Translate along one axis so this shape sits against `face` of `other`
    /// from the outside: aligning on `Left` moves this region's right edge
    /// onto `other`'s left edge, and so on. The other axis is untouched.
    pub fn aligned_to(&self, face: Face, other: Rect<f64>) -> Self {
        let Some(own) = self.bounds() else {
            return self.clone();
        };
        match face {
            Face::Left => self.shifted(other.min().x - own.max().x, 0.0),
            Face::Right => self.shifted(other.max().x - own.min().x, 0.0),
            Face::Top => self.shifted(0.0, other.max().y - own.min().y),
            Face::Bottom => self.shifted(0.0, other.min().y - own.max().y),
        }
    }

    /// Part of this region outside `cutter`, keeping this region's material.
    pub fn difference(&self, cutter: &MultiPolygon<f64>) -> Self {
        Self {
            polygon: self.polygon.difference(cutter),
            material: self.material.clone(),
        }
    }

    /// Drop polygon pieces whose area is at or below `min_area`.
    pub fn without_slivers(mut self, min_area: f64) -> Self {
        self.polygon
            .0
            .retain(|p: &Polygon<f64>| p.unsigned_area() > min_area);
        self
    }
}

/// A collection of material-tagged regions.
///
/// Regions may overlap (visualization geometry) or be pairwise disjoint
/// (analysis geometry produced by [`crate::partition`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompoundGeometry {
    pub regions: Vec<Region>,
}

impl CompoundGeometry {
    pub fn new(regions: Vec<Region>) -> Self {
        Self { regions }
    }

    pub fn push(&mut self, region: Region) {
        self.regions.push(region);
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Sum of region areas (double counts any overlap)
    pub fn area(&self) -> f64 {
        self.regions.iter().map(Region::area).sum()
    }

    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.regions
            .iter()
            .filter_map(Region::bounds)
            .reduce(|a, b| {
                Rect::new(
                    (a.min().x.min(b.min().x), a.min().y.min(b.min().y)),
                    (a.max().x.max(b.max().x), a.max().y.max(b.max().y)),
                )
            })
    }

    /// Boolean union of every region, ignoring materials
    pub fn union_polygon(&self) -> MultiPolygon<f64> {
        self.regions
            .iter()
            .fold(MultiPolygon::new(Vec::new()), |acc, region| {
                if acc.0.is_empty() {
                    region.polygon.clone()
                } else {
                    acc.union(&region.polygon)
                }
            })
    }

    /// Total area per material name
    pub fn area_by_material(&self) -> BTreeMap<String, f64> {
        let mut areas = BTreeMap::new();
        for region in &self.regions {
            *areas.entry(region.material.name.clone()).or_insert(0.0) += region.area();
        }
        areas
    }

    /// Distinct materials in first-seen order
    pub fn materials(&self) -> Vec<Material> {
        let mut seen: Vec<Material> = Vec::new();
        for region in &self.regions {
            if !seen.iter().any(|m| m.name == region.material.name) {
                seen.push(region.material.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::AlloyCatalog;

    fn materials() -> (Material, Material) {
        AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap()
    }

    #[test]
    fn test_face_parsing() {
        assert_eq!("Top".parse::<Face>().unwrap(), Face::Top);
        assert_eq!("BOTTOM".parse::<Face>().unwrap(), Face::Bottom);
        assert_eq!(" left ".parse::<Face>().unwrap(), Face::Left);
        assert_eq!("right".parse::<Face>().unwrap(), Face::Right);
        let err = "diagonal".parse::<Face>().unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_align_to_each_face() {
        let (unwelded, welded) = materials();
        let tube = rectangular_hollow_section(2.0, 3.0, 0.125, 0.05, 12, unwelded);
        let tube_bounds = tube.bounds().unwrap();
        let circle = circular_section(2.0, 24, welded);

        let left = circle.aligned_to(Face::Left, tube_bounds).bounds().unwrap();
        assert!((left.max().x - 0.0).abs() < 1e-12);
        assert!((left.min().y + 1.0).abs() < 1e-12);

        let right = circle.aligned_to(Face::Right, tube_bounds).bounds().unwrap();
        assert!((right.min().x - 3.0).abs() < 1e-12);

        let top = circle.aligned_to(Face::Top, tube_bounds).bounds().unwrap();
        assert!((top.min().y - 2.0).abs() < 1e-12);
        assert!((top.min().x + 1.0).abs() < 1e-12);

        let bottom = circle.aligned_to(Face::Bottom, tube_bounds).bounds().unwrap();
        assert!((bottom.max().y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_area_by_material_and_bounds() {
        let (unwelded, welded) = materials();
        let mut geom = CompoundGeometry::default();
        geom.push(Region::new(
            Rect::new((0.0, 0.0), (1.0, 1.0)).to_polygon(),
            unwelded.clone(),
        ));
        geom.push(Region::new(
            Rect::new((1.0, 0.0), (3.0, 1.0)).to_polygon(),
            welded,
        ));
        geom.push(Region::new(
            Rect::new((0.0, 1.0), (1.0, 2.0)).to_polygon(),
            unwelded,
        ));

        let areas = geom.area_by_material();
        assert!((areas["6061-T6 - Unwelded"] - 2.0).abs() < 1e-12);
        assert!((areas["6061-T6 - Welded"] - 2.0).abs() < 1e-12);
        assert_eq!(geom.materials().len(), 2);

        let b = geom.bounds().unwrap();
        assert_eq!((b.max().x, b.max().y), (3.0, 2.0));
        assert!((geom.union_polygon().unsigned_area() - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_without_slivers() {
        let (unwelded, _) = materials();
        let region = Region::new(
            MultiPolygon::new(vec![
                Rect::new((0.0, 0.0), (1.0, 1.0)).to_polygon(),
                Rect::new((5.0, 5.0), (5.0 + 1e-8, 5.0 + 1e-8)).to_polygon(),
            ]),
            unwelded,
        );
        let cleaned = region.without_slivers(1e-12);
        assert_eq!(cleaned.polygon.0.len(), 1);
    }
}
