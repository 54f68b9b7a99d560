//! # Geometry Partitioner
//!
//! Splits a rectangular hollow tube into disjoint unwelded and welded
//! regions. Each weld heat-affected zone is a circle placed on one face of
//! the tube; the part of the tube inside a circle is retagged with the
//! welded material.
//!
//! ## Placement
//!
//! A zone's circle is first aligned against the chosen face from the outside
//! and then pulled back by one radius, so its center lies on the face's
//! outer line. `position` runs along the face, measured from the tube origin
//! (bottom-left outer corner):
//!
//! | face   | shift after alignment |
//! |--------|-----------------------|
//! | left   | (+r, position)        |
//! | right  | (-r, position)        |
//! | top    | (position, -r)        |
//! | bottom | (position, +r)        |
//!
//! ## Overlapping zones
//!
//! Zones are folded in order. Each step removes the circle from every
//! accumulated region (keeping their materials) and adds the circle's
//! intersection with the tube as a new welded region, so where circles
//! overlap the later zone owns the area. The material there is welded
//! either way.
//!
//! ## Example
//!
//! ```rust
//! use alweld_core::geometry::Face;
//! use alweld_core::materials::AlloyCatalog;
//! use alweld_core::partition::{partition, TubeProfile, WeldZone};
//!
//! let catalog = AlloyCatalog::builtin().unwrap();
//! let zones = vec![WeldZone::new(Face::Top, 0.0)];
//! let parts = partition(&TubeProfile::default(), &zones, 1.0, "6061-T6", &catalog).unwrap();
//!
//! assert_eq!(parts.section.materials().len(), 2);
//! ```

use geo::BooleanOps;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{require_positive, CalcError, CalcResult};
use crate::geometry::{circular_section, rectangular_hollow_section, CompoundGeometry, Face, Region};
use crate::materials::{AlloyCatalog, Material};
use crate::section::Section;

/// Points per rounded tube corner
pub const CORNER_POINTS: usize = 12;

/// Points on a weld-zone circle
pub const WELD_CIRCLE_POINTS: usize = 24;

/// Mesh target size as a fraction of wall thickness
pub const MESH_SIZE_PER_THICKNESS: f64 = 1.0 / 5.0;

/// Pieces smaller than this fraction of the tube area are discarded as
/// boolean-operation noise.
const SLIVER_FRACTION: f64 = 1e-9;

/// Outer dimensions of a rectangular hollow tube (length units of the caller)
///
/// ## JSON Example
///
/// ```json
/// { "d": 2.0, "b": 3.0, "t": 0.125, "r_out": 0.05 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TubeProfile {
    /// Outer depth (y extent)
    pub d: f64,
    /// Outer width (x extent)
    pub b: f64,
    /// Wall thickness
    pub t: f64,
    /// Outer corner radius (zero for sharp corners)
    pub r_out: f64,
}

impl Default for TubeProfile {
    fn default() -> Self {
        Self {
            d: 2.0,
            b: 3.0,
            t: 0.125,
            r_out: 0.05,
        }
    }
}

impl TubeProfile {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("d", self.d)?;
        require_positive("b", self.b)?;
        require_positive("t", self.t)?;
        if !self.r_out.is_finite() || self.r_out < 0.0 {
            return Err(CalcError::invalid_input(
                "r_out",
                self.r_out.to_string(),
                "Corner radius must be zero or positive",
            ));
        }
        let min_side = self.b.min(self.d);
        if 2.0 * self.t >= min_side {
            return Err(CalcError::invalid_input(
                "t",
                self.t.to_string(),
                "Wall thickness leaves no hollow core",
            ));
        }
        if 2.0 * self.r_out >= min_side {
            return Err(CalcError::invalid_input(
                "r_out",
                self.r_out.to_string(),
                "Corner radius exceeds half the smaller side",
            ));
        }
        Ok(())
    }

    /// Target mesh element size for this wall thickness
    pub fn mesh_size(&self) -> f64 {
        self.t * MESH_SIZE_PER_THICKNESS
    }
}

/// One weld heat-affected zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeldZone {
    pub face: Face,
    /// Offset along the face, measured from the tube origin
    pub position: f64,
}

impl WeldZone {
    pub fn new(face: Face, position: f64) -> Self {
        Self { face, position }
    }

    /// Build a zone from a face name ("Top", "left", ...) and position.
    pub fn parse(face: &str, position: f64) -> CalcResult<Self> {
        Ok(Self::new(face.parse()?, position))
    }

    pub fn validate(&self) -> CalcResult<()> {
        if !self.position.is_finite() {
            return Err(CalcError::invalid_input(
                "position",
                self.position.to_string(),
                "Weld zone position must be finite",
            ));
        }
        Ok(())
    }

    /// Shift applied after aligning the circle against the face
    pub fn offset(&self, weld_radius: f64) -> (f64, f64) {
        match self.face {
            Face::Left => (weld_radius, self.position),
            Face::Right => (-weld_radius, self.position),
            Face::Top => (self.position, -weld_radius),
            Face::Bottom => (self.position, weld_radius),
        }
    }
}

/// Partitioned geometry before meshing
#[derive(Debug, Clone)]
pub struct PartitionedGeometry {
    /// Tube plus every weld circle, overlapping; for rendering only
    pub visualization: CompoundGeometry,
    /// Disjoint welded/unwelded regions covering exactly the tube
    pub analysis: CompoundGeometry,
    /// Positioned weld circles, in zone order
    pub weld_circles: Vec<Region>,
    /// Area of the un-partitioned tube
    pub tube_area: f64,
}

/// Partitioned geometry plus the meshed section ready for a solver
#[derive(Debug, Clone)]
pub struct PartitionedSection {
    pub visualization: CompoundGeometry,
    pub section: Section,
}

/// Place the circle for one weld zone against `tube`.
pub fn weld_circle(zone: &WeldZone, weld_radius: f64, tube: &Region, welded: Material) -> Region {
    let circle = circular_section(2.0 * weld_radius, WELD_CIRCLE_POINTS, welded);
    let Some(bounds) = tube.bounds() else {
        return circle;
    };
    let (dx, dy) = zone.offset(weld_radius);
    circle.aligned_to(zone.face, bounds).shifted(dx, dy)
}

/// Build the visualization and analysis geometry without meshing.
pub fn partition_geometry(
    profile: &TubeProfile,
    zones: &[WeldZone],
    weld_radius: f64,
    grade_id: &str,
    catalog: &AlloyCatalog,
) -> CalcResult<PartitionedGeometry> {
    profile.validate()?;
    require_positive("weld_radius", weld_radius)?;
    for zone in zones {
        zone.validate()?;
    }
    let (unwelded, welded) = catalog.lookup(grade_id)?;

    let tube = rectangular_hollow_section(
        profile.d,
        profile.b,
        profile.t,
        profile.r_out,
        CORNER_POINTS,
        unwelded,
    );
    let tube_area = tube.area();
    let min_area = SLIVER_FRACTION * tube_area;

    let weld_circles: Vec<Region> = zones
        .iter()
        .map(|zone| weld_circle(zone, weld_radius, &tube, welded.clone()))
        .collect();

    let mut visualization = CompoundGeometry::new(vec![tube.clone()]);
    for circle in &weld_circles {
        visualization.push(circle.clone());
    }

    let analysis = weld_circles.iter().zip(zones).fold(
        CompoundGeometry::new(vec![tube.clone()]),
        |accumulated, (circle, zone)| {
            let mut regions: Vec<Region> = accumulated
                .regions
                .iter()
                .map(|region| region.difference(&circle.polygon).without_slivers(min_area))
                .filter(|region| !region.is_empty())
                .collect();

            let covered = Region::new(circle.polygon.intersection(&tube.polygon), welded.clone())
                .without_slivers(min_area);
            if covered.is_empty() {
                warn!(face = %zone.face, position = zone.position, "weld zone does not touch the tube");
            } else {
                debug!(face = %zone.face, position = zone.position, area = covered.area(), "weld zone");
                regions.push(covered);
            }
            CompoundGeometry::new(regions)
        },
    );

    Ok(PartitionedGeometry {
        visualization,
        analysis,
        weld_circles,
        tube_area,
    })
}

/// Partition the tube into welded/unwelded regions and mesh the result.
///
/// # Errors
///
/// * `InvalidInput` - unknown grade, non-positive dimension or radius
/// * `MeshGeneration` - the partitioned geometry could not be meshed
pub fn partition(
    profile: &TubeProfile,
    zones: &[WeldZone],
    weld_radius: f64,
    grade_id: &str,
    catalog: &AlloyCatalog,
) -> CalcResult<PartitionedSection> {
    let parts = partition_geometry(profile, zones, weld_radius, grade_id, catalog)?;
    let section = Section::new(parts.analysis, profile.mesh_size())?;
    info!(
        grade = grade_id,
        zones = zones.len(),
        regions = section.geometry().len(),
        nodes = section.mesh().nodes.len(),
        elements = section.mesh().elements.len(),
        "partitioned and meshed tube section"
    );
    Ok(PartitionedSection {
        visualization: parts.visualization,
        section,
    })
}
