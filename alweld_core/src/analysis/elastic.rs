//! Built-in elastic section solver.
//!
//! Integrates exact linear-triangle moments over the mesh for the
//! modulus-weighted elastic properties and uses engineering formulas for
//! the rest:
//!
//! - normal stress from N, Mxx and Myy by unsymmetric bending about the
//!   elastic centroid
//! - torsion by the Bredt thin-walled formula τ = T / (2·Am·t) for closed
//!   sections, or τ = T·r/J with J ≈ A⁴/(4π²·Ip) otherwise
//! - transverse shear as the peak VQ/(I·w) at the centroidal axes, applied
//!   over the whole zone
//!
//! Shear and torsion are reported as uniform peak values rather than a
//! warping-function solution, so they are conservative for envelope checks.

use std::collections::BTreeMap;
use std::f64::consts::PI;

use geo::{Area, LineString, Polygon};
use tracing::debug;

use super::{
    GeometricProperties, LoadActions, PlasticProperties, SectionSolver, StressResult,
    WarpingProperties, ZoneStress,
};
use crate::errors::{CalcError, CalcResult};
use crate::mesh::{triangle_area, Mesh};
use crate::section::Section;

/// Relative threshold below which bending stiffness is treated as singular
const SINGULAR_TOLERANCE: f64 = 1e-12;

fn ring_area(ring: &LineString<f64>) -> f64 {
    ring.lines()
        .map(|l| l.start.x * l.end.y - l.end.x * l.start.y)
        .sum::<f64>()
        .abs()
        / 2.0
}

fn ring_length(ring: &LineString<f64>) -> f64 {
    ring.lines().map(|l| l.dx().hypot(l.dy())).sum()
}

/// Total material length cut by a horizontal (`y = value`) or vertical
/// (`x = value`) line through `polygons`.
fn cut_width(polygons: &[Polygon<f64>], value: f64, horizontal: bool) -> f64 {
    let mut crossings = Vec::new();
    for polygon in polygons {
        for ring in std::iter::once(polygon.exterior()).chain(polygon.interiors()) {
            for line in ring.lines() {
                // (across, along): `across` is compared with `value`
                let (a, b) = if horizontal {
                    ((line.start.y, line.start.x), (line.end.y, line.end.x))
                } else {
                    ((line.start.x, line.start.y), (line.end.x, line.end.y))
                };
                if (a.0 > value) != (b.0 > value) {
                    crossings.push(a.1 + (value - a.0) * (b.1 - a.1) / (b.0 - a.0));
                }
            }
        }
    }
    crossings.sort_by(f64::total_cmp);
    crossings.chunks_exact(2).map(|pair| pair[1] - pair[0]).sum()
}

/// Median of `(coordinate, force)` pairs by force: the plastic neutral axis.
fn plastic_neutral_axis(items: &mut [(f64, f64)]) -> f64 {
    items.sort_by(|a, b| a.0.total_cmp(&b.0));
    let half = items.iter().map(|(_, f)| f).sum::<f64>() / 2.0;
    let mut cumulative = 0.0;
    for &(coord, force) in items.iter() {
        cumulative += force;
        if cumulative >= half {
            return coord;
        }
    }
    items.last().map_or(0.0, |(c, _)| *c)
}

/// Closed-form solver over the meshed section
#[derive(Debug, Clone)]
pub struct ElasticSectionSolver {
    section: Section,
    geometric: Option<GeometricProperties>,
    plastic: Option<PlasticProperties>,
    warping: Option<WarpingProperties>,
}

impl ElasticSectionSolver {
    pub fn new(section: Section) -> Self {
        Self {
            section,
            geometric: None,
            plastic: None,
            warping: None,
        }
    }

    pub fn geometric_properties(&self) -> Option<&GeometricProperties> {
        self.geometric.as_ref()
    }

    pub fn plastic_properties(&self) -> Option<&PlasticProperties> {
        self.plastic.as_ref()
    }

    pub fn warping_properties(&self) -> Option<&WarpingProperties> {
        self.warping.as_ref()
    }

    fn mesh(&self) -> &Mesh {
        self.section.mesh()
    }

    /// E / E_ref for each mesh material
    fn modulus_weights(&self) -> CalcResult<Vec<f64>> {
        let materials = &self.mesh().materials;
        let e_ref = materials
            .first()
            .map(|m| m.elastic_modulus)
            .filter(|e| *e > 0.0)
            .ok_or_else(|| CalcError::analysis("geometric", "section has no valid material"))?;
        Ok(materials.iter().map(|m| m.elastic_modulus / e_ref).collect())
    }

    fn require_geometric(&self, stage: &str) -> CalcResult<&GeometricProperties> {
        self.geometric.as_ref().ok_or_else(|| {
            CalcError::analysis(stage, "geometric properties have not been calculated")
        })
    }
}

impl SectionSolver for ElasticSectionSolver {
    fn section(&self) -> &Section {
        &self.section
    }

    fn calculate_geometric_properties(&mut self) -> CalcResult<()> {
        let weights = self.modulus_weights()?;
        let mesh = self.mesh();
        let e_ref = mesh.materials[0].elastic_modulus;

        let mut area = 0.0;
        let mut weighted_area = 0.0;
        let mut first_x = 0.0;
        let mut first_y = 0.0;
        let mut ixx_origin = 0.0;
        let mut iyy_origin = 0.0;
        let mut ixy_origin = 0.0;
        let mut mass = 0.0;
        let mut area_by_material = BTreeMap::new();

        for element in &mesh.elements {
            let [p1, p2, p3] = mesh.element_coords(element);
            let a = triangle_area(p1, p2, p3);
            let w = weights[element.material];
            let material = &mesh.materials[element.material];
            let ([x1, y1], [x2, y2], [x3, y3]) = (p1, p2, p3);

            area += a;
            weighted_area += w * a;
            first_x += w * a * (x1 + x2 + x3) / 3.0;
            first_y += w * a * (y1 + y2 + y3) / 3.0;
            ixx_origin += w * a / 6.0 * (y1 * y1 + y2 * y2 + y3 * y3 + y1 * y2 + y2 * y3 + y3 * y1);
            iyy_origin += w * a / 6.0 * (x1 * x1 + x2 * x2 + x3 * x3 + x1 * x2 + x2 * x3 + x3 * x1);
            ixy_origin += w * a / 12.0
                * (2.0 * (x1 * y1 + x2 * y2 + x3 * y3)
                    + x1 * y2
                    + x2 * y1
                    + x1 * y3
                    + x3 * y1
                    + x2 * y3
                    + x3 * y2);
            mass += a * material.density;
            *area_by_material.entry(material.name.clone()).or_insert(0.0) += a;
        }

        if !(weighted_area > 0.0) {
            return Err(CalcError::analysis("geometric", "section has zero area"));
        }

        let cx = first_x / weighted_area;
        let cy = first_y / weighted_area;
        let ixx = ixx_origin - weighted_area * cy * cy;
        let iyy = iyy_origin - weighted_area * cx * cx;
        let ixy = ixy_origin - weighted_area * cx * cy;
        let det = ixx * iyy - ixy * ixy;
        if !(det > SINGULAR_TOLERANCE * (ixx * iyy).abs()) || !(ixx > 0.0 && iyy > 0.0) {
            return Err(CalcError::analysis(
                "geometric",
                format!("singular bending stiffness (Ixx={ixx}, Iyy={iyy}, Ixy={ixy})"),
            ));
        }

        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for &[x, y] in &mesh.nodes {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }

        let perimeter = self
            .section
            .outline()
            .0
            .iter()
            .map(|p| ring_length(p.exterior()))
            .sum();

        let props = GeometricProperties {
            area,
            area_by_material,
            reference_modulus: e_ref,
            ea: weighted_area * e_ref,
            cx,
            cy,
            ixx,
            iyy,
            ixy,
            zxx_plus: ixx / (y_max - cy),
            zxx_minus: ixx / (cy - y_min),
            zyy_plus: iyy / (x_max - cx),
            zyy_minus: iyy / (cx - x_min),
            mass_per_length: mass,
            perimeter,
        };
        debug!(area = props.area, cx, cy, ixx, iyy, ixy, "geometric properties");
        self.geometric = Some(props);
        Ok(())
    }

    fn calculate_plastic_properties(&mut self) -> CalcResult<()> {
        let mesh = self.mesh();
        let mut along_y = Vec::with_capacity(mesh.elements.len());
        let mut along_x = Vec::with_capacity(mesh.elements.len());
        for element in &mesh.elements {
            let force = mesh.materials[element.material].yield_strength * mesh.element_area(element);
            let [x, y] = mesh.element_centroid(element);
            along_y.push((y, force));
            along_x.push((x, force));
        }
        if along_y.is_empty() {
            return Err(CalcError::analysis("plastic", "mesh has no elements"));
        }

        let y_pna = plastic_neutral_axis(&mut along_y);
        let x_pna = plastic_neutral_axis(&mut along_x);
        let mp_xx = along_y.iter().map(|(y, f)| f * (y - y_pna).abs()).sum();
        let mp_yy = along_x.iter().map(|(x, f)| f * (x - x_pna).abs()).sum();

        debug!(x_pna, y_pna, mp_xx, mp_yy, "plastic properties");
        self.plastic = Some(PlasticProperties {
            y_pna,
            x_pna,
            mp_xx,
            mp_yy,
        });
        Ok(())
    }

    fn calculate_warping_properties(&mut self) -> CalcResult<()> {
        let geometric = self.require_geometric("warping")?;
        let weights = self.modulus_weights()?;
        let mesh = self.mesh();
        let (cx, cy) = (geometric.cx, geometric.cy);
        let outline = self.section.outline();

        let r_max = mesh
            .nodes
            .iter()
            .map(|[x, y]| (x - cx).hypot(y - cy))
            .fold(0.0, f64::max);

        let mut qx = 0.0;
        let mut qy = 0.0;
        for element in &mesh.elements {
            let a = weights[element.material] * mesh.element_area(element);
            let [x, y] = mesh.element_centroid(element);
            if y > cy {
                qx += a * (y - cy);
            }
            if x > cx {
                qy += a * (x - cx);
            }
        }

        let largest = outline
            .0
            .iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()));
        let closed = largest.filter(|p| !p.interiors().is_empty());

        let props = if let Some(polygon) = closed {
            let outer_area = ring_area(polygon.exterior());
            let outer_length = ring_length(polygon.exterior());
            let inner_area: f64 = polygon.interiors().iter().map(ring_area).sum();
            let inner_length: f64 = polygon.interiors().iter().map(ring_length).sum();
            let mean_area = (outer_area + inner_area) / 2.0;
            let mean_length = (outer_length + inner_length) / 2.0;
            let thickness = (outer_area - inner_area) / mean_length;
            WarpingProperties {
                j: 4.0 * mean_area * mean_area * thickness / mean_length,
                closed_section: true,
                mean_enclosed_area: Some(mean_area),
                wall_thickness: Some(thickness),
                r_max,
                qx,
                qy,
                width_at_cy: cut_width(&outline.0, cy, true),
                width_at_cx: cut_width(&outline.0, cx, false),
            }
        } else {
            let polar = geometric.ixx + geometric.iyy;
            let a = geometric.area;
            WarpingProperties {
                j: a.powi(4) / (4.0 * PI * PI * polar),
                closed_section: false,
                mean_enclosed_area: None,
                wall_thickness: None,
                r_max,
                qx,
                qy,
                width_at_cy: cut_width(&outline.0, cy, true),
                width_at_cx: cut_width(&outline.0, cx, false),
            }
        };

        if !(props.j > 0.0) {
            return Err(CalcError::analysis("warping", "torsion constant is not positive"));
        }
        debug!(j = props.j, closed = props.closed_section, "warping properties");
        self.warping = Some(props);
        Ok(())
    }

    fn calculate_stress(&self, actions: &LoadActions) -> CalcResult<StressResult> {
        actions.validate()?;
        let g = self.require_geometric("stress")?;
        let w = self.warping.as_ref().ok_or_else(|| {
            CalcError::analysis("stress", "warping properties have not been calculated")
        })?;
        let weights = self.modulus_weights()?;
        let mesh = self.mesh();

        let weighted_area = g.ea / g.reference_modulus;
        let det = g.ixx * g.iyy - g.ixy * g.ixy;
        // σ = w·(α·x' + β·y') for each moment, x' and y' from the centroid
        let (alpha_mxx, beta_mxx) = (-actions.mxx * g.ixy / det, actions.mxx * g.iyy / det);
        let (alpha_myy, beta_myy) = (-actions.myy * g.ixx / det, actions.myy * g.ixy / det);

        let tau_torsion = match (w.mean_enclosed_area, w.wall_thickness) {
            (Some(am), Some(t)) => actions.mzz / (2.0 * am * t),
            _ => actions.mzz * w.r_max / w.j,
        };
        let tau_vx = if actions.vx == 0.0 {
            0.0
        } else if w.width_at_cx > 0.0 {
            actions.vx * w.qy / (g.iyy * w.width_at_cx)
        } else {
            return Err(CalcError::analysis("stress", "no material crosses the centroidal y axis"));
        };
        let tau_vy = if actions.vy == 0.0 {
            0.0
        } else if w.width_at_cy > 0.0 {
            actions.vy * w.qx / (g.ixx * w.width_at_cy)
        } else {
            return Err(CalcError::analysis("stress", "no material crosses the centroidal x axis"));
        };
        let tau = tau_torsion.abs() + tau_vx.hypot(tau_vy);

        let mut zones = Vec::with_capacity(mesh.materials.len());
        for (index, material) in mesh.materials.iter().enumerate() {
            let nodes = mesh.material_nodes(index);
            if nodes.is_empty() {
                continue;
            }
            let weight = weights[index];
            let count = nodes.len();
            let points: Vec<[f64; 2]> = nodes.iter().map(|&n| mesh.nodes[n]).collect();

            let sig_n = vec![weight * actions.n / weighted_area; count];
            let mut sig_mxx = Vec::with_capacity(count);
            let mut sig_myy = Vec::with_capacity(count);
            let mut sig_zz = Vec::with_capacity(count);
            let mut sig_11 = Vec::with_capacity(count);
            let mut sig_33 = Vec::with_capacity(count);
            let mut sig_vm = Vec::with_capacity(count);
            for (i, [x, y]) in points.iter().enumerate() {
                let (dx, dy) = (x - g.cx, y - g.cy);
                let mxx = weight * (alpha_mxx * dx + beta_mxx * dy);
                let myy = weight * (alpha_myy * dx + beta_myy * dy);
                let zz = sig_n[i] + mxx + myy;
                let radius = ((zz / 2.0).powi(2) + tau * tau).sqrt();
                sig_mxx.push(mxx);
                sig_myy.push(myy);
                sig_zz.push(zz);
                sig_11.push(zz / 2.0 + radius);
                sig_33.push(zz / 2.0 - radius);
                sig_vm.push((zz * zz + 3.0 * tau * tau).sqrt());
            }

            let zone = ZoneStress {
                material: material.name.clone(),
                points,
                components: BTreeMap::new(),
            }
            .with_component("sig_zz_n", sig_n)
            .with_component("sig_zz_mxx", sig_mxx)
            .with_component("sig_zz_myy", sig_myy)
            .with_component("sig_zz", sig_zz)
            .with_component("sig_zxy_mzz", vec![tau_torsion; count])
            .with_component("sig_zx_vx", vec![tau_vx; count])
            .with_component("sig_zy_vy", vec![tau_vy; count])
            .with_component("sig_zxy", vec![tau; count])
            .with_component("sig_11", sig_11)
            .with_component("sig_33", sig_33)
            .with_component("sig_vm", sig_vm);
            zones.push(zone);
        }

        debug!(zones = zones.len(), "calculated stress field");
        Ok(StressResult {
            actions: *actions,
            zones,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{rectangular_hollow_section, CompoundGeometry, Region};
    use crate::materials::{AlloyCatalog, DisplayColor, Material};
    use crate::partition::{partition, TubeProfile, WeldZone};
    use crate::geometry::Face;
    use geo::Rect;

    const A: f64 = 6.0 - 2.75 * 1.75;

    fn ixx() -> f64 {
        (3.0 * 8.0 - 2.75 * 1.75_f64.powi(3)) / 12.0
    }

    fn iyy() -> f64 {
        (2.0 * 27.0 - 1.75 * 2.75_f64.powi(3)) / 12.0
    }

    fn sharp_tube_solver() -> ElasticSectionSolver {
        let (unwelded, _) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        let tube = rectangular_hollow_section(2.0, 3.0, 0.125, 0.0, 12, unwelded);
        let section = Section::new(CompoundGeometry::new(vec![tube]), 0.05).unwrap();
        let mut solver = ElasticSectionSolver::new(section);
        solver.prepare().unwrap();
        solver
    }

    fn close(a: f64, b: f64, rel: f64) -> bool {
        (a - b).abs() <= rel * b.abs().max(1e-12)
    }

    #[test]
    fn test_geometric_properties_of_sharp_tube() {
        let solver = sharp_tube_solver();
        let g = solver.geometric_properties().unwrap();
        assert!(close(g.area, A, 1e-9));
        assert!(close(g.cx, 1.5, 1e-9));
        assert!(close(g.cy, 1.0, 1e-9));
        assert!(close(g.ixx, ixx(), 1e-9));
        assert!(close(g.iyy, iyy(), 1e-9));
        assert!(g.ixy.abs() < 1e-9);
        assert!(close(g.zxx_plus, ixx() / 1.0, 1e-9));
        assert!(close(g.zyy_minus, iyy() / 1.5, 1e-9));
        assert!(close(g.perimeter, 10.0, 1e-9));
        assert!(close(g.mass_per_length, A * 0.1, 1e-9));
    }

    #[test]
    fn test_axial_stress_is_uniform() {
        let solver = sharp_tube_solver();
        let result = solver.calculate_stress(&LoadActions::axial(1.0)).unwrap();
        assert_eq!(result.zones.len(), 1);
        let zone = &result.zones[0];
        let (lo, hi) = zone.extremes("sig_zz").unwrap();
        assert!(close(lo, 1.0 / A, 1e-9) && close(hi, 1.0 / A, 1e-9));
        let (_, vm) = zone.extremes("sig_vm").unwrap();
        assert!(close(vm, 1.0 / A, 1e-9));
        assert_eq!(zone.extremes("sig_zxy"), Some((0.0, 0.0)));
    }

    #[test]
    fn test_bending_stress_at_extreme_fibres() {
        let solver = sharp_tube_solver();
        let mxx = LoadActions {
            mxx: 1.0,
            ..LoadActions::default()
        };
        let (lo, hi) = solver.calculate_stress(&mxx).unwrap().zones[0]
            .extremes("sig_zz_mxx")
            .unwrap();
        assert!(close(hi, 1.0 / ixx(), 1e-9));
        assert!(close(lo, -1.0 / ixx(), 1e-9));

        let myy = LoadActions {
            myy: 1.0,
            ..LoadActions::default()
        };
        let zone = &solver.calculate_stress(&myy).unwrap().zones[0];
        let (lo, hi) = zone.extremes("sig_zz_myy").unwrap();
        assert!(close(hi, 1.5 / iyy(), 1e-9));
        assert!(close(lo, -1.5 / iyy(), 1e-9));
        // Positive Myy compresses the +x side
        let right = zone
            .points
            .iter()
            .position(|p| (p[0] - 3.0).abs() < 1e-12)
            .unwrap();
        assert!(zone.components["sig_zz_myy"][right] < 0.0);
    }

    #[test]
    fn test_closed_section_torsion() {
        let solver = sharp_tube_solver();
        let w = solver.warping_properties().unwrap();
        assert!(w.closed_section);
        let bredt = 2.0 * 0.125 * (2.875_f64 * 1.875).powi(2) / (2.875 + 1.875);
        assert!(close(w.j, bredt, 0.01));
        assert!(close(w.wall_thickness.unwrap(), 0.125, 1e-9));

        let torsion = LoadActions {
            mzz: 1.0,
            ..LoadActions::default()
        };
        let zone = &solver.calculate_stress(&torsion).unwrap().zones[0];
        let (_, tau) = zone.extremes("sig_zxy_mzz").unwrap();
        let am = w.mean_enclosed_area.unwrap();
        assert!(close(tau, 1.0 / (2.0 * am * 0.125), 1e-9));
        let (_, vm) = zone.extremes("sig_vm").unwrap();
        assert!(close(vm, 3.0_f64.sqrt() * tau, 1e-9));
    }

    #[test]
    fn test_transverse_shear() {
        let solver = sharp_tube_solver();
        let w = solver.warping_properties().unwrap();
        assert!(close(w.width_at_cy, 0.25, 1e-9));
        assert!(close(w.width_at_cx, 0.25, 1e-9));

        // Q above the x axis: top flange plus two half webs
        let q = 3.0 * 0.125 * (1.0 - 0.0625) + 2.0 * 0.125 * 0.875 * 0.4375;
        assert!(close(w.qx, q, 0.01));

        let shear = LoadActions {
            vy: 1.0,
            ..LoadActions::default()
        };
        let zone = &solver.calculate_stress(&shear).unwrap().zones[0];
        let (_, tau) = zone.extremes("sig_zy_vy").unwrap();
        assert!(close(tau, q / (ixx() * 0.25), 0.01));
    }

    #[test]
    fn test_principal_stresses() {
        let solver = sharp_tube_solver();
        let combined = LoadActions {
            n: 1.0,
            mzz: 0.5,
            ..LoadActions::default()
        };
        let zone = &solver.calculate_stress(&combined).unwrap().zones[0];
        for i in 0..zone.points.len() {
            let s11 = zone.components["sig_11"][i];
            let s33 = zone.components["sig_33"][i];
            let zz = zone.components["sig_zz"][i];
            assert!(s11 >= s33);
            assert!(close(s11 + s33, zz, 1e-9));
        }
    }

    #[test]
    fn test_plastic_properties_of_symmetric_tube() {
        let solver = sharp_tube_solver();
        let p = solver.plastic_properties().unwrap();
        assert!((p.y_pna - 1.0).abs() < 0.05);
        assert!((p.x_pna - 1.5).abs() < 0.05);
        let zx = (3.0 * 4.0 - 2.75 * 1.75 * 1.75) / 4.0;
        assert!(close(p.mp_xx, 35.0 * zx, 0.02));
    }

    #[test]
    fn test_stress_requires_prepared_solver() {
        let (unwelded, _) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        let tube = rectangular_hollow_section(2.0, 3.0, 0.125, 0.0, 12, unwelded);
        let section = Section::new(CompoundGeometry::new(vec![tube]), 0.05).unwrap();
        let mut solver = ElasticSectionSolver::new(section);

        let err = solver.calculate_stress(&LoadActions::axial(1.0)).unwrap_err();
        assert!(matches!(err, CalcError::Analysis { .. }));

        let err = solver.calculate_warping_properties().unwrap_err();
        assert!(matches!(err, CalcError::Analysis { .. }));

        solver.calculate_geometric_properties().unwrap();
        assert!(solver.calculate_stress(&LoadActions::axial(1.0)).is_err());
        solver.calculate_warping_properties().unwrap();
        assert!(solver.calculate_stress(&LoadActions::axial(1.0)).is_ok());
    }

    #[test]
    fn test_prepare_is_idempotent() {
        let mut solver = sharp_tube_solver();
        let before = solver.geometric_properties().cloned();
        solver.prepare().unwrap();
        assert_eq!(before.as_ref(), solver.geometric_properties());
    }

    #[test]
    fn test_solid_section_uses_saint_venant_estimate() {
        let (unwelded, _) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        let square = Region::new(Rect::new((0.0, 0.0), (1.0, 1.0)).to_polygon(), unwelded);
        let section = Section::new(CompoundGeometry::new(vec![square]), 0.1).unwrap();
        let mut solver = ElasticSectionSolver::new(section);
        solver.prepare().unwrap();
        let w = solver.warping_properties().unwrap();
        assert!(!w.closed_section);
        // A⁴/(4π²Ip) for a unit square: 1 / (4π² / 6)
        assert!(close(w.j, 6.0 / (4.0 * PI * PI), 1e-9));
    }

    #[test]
    fn test_modulus_weighting_moves_centroid() {
        let soft = Material {
            name: "soft".to_string(),
            elastic_modulus: 1000.0,
            poissons_ratio: 0.3,
            yield_strength: 10.0,
            density: 0.1,
            color: DisplayColor::Unwelded,
        };
        let stiff = Material {
            name: "stiff".to_string(),
            elastic_modulus: 3000.0,
            ..soft.clone()
        };
        let geom = CompoundGeometry::new(vec![
            Region::new(Rect::new((0.0, 0.0), (1.0, 1.0)).to_polygon(), soft),
            Region::new(Rect::new((1.0, 0.0), (2.0, 1.0)).to_polygon(), stiff),
        ]);
        let mut solver = ElasticSectionSolver::new(Section::new(geom, 0.1).unwrap());
        solver.calculate_geometric_properties().unwrap();
        let g = solver.geometric_properties().unwrap();
        // (1·0.5 + 3·1.5) / 4
        assert!(close(g.cx, 1.25, 1e-9));
        assert!(close(g.area, 2.0, 1e-9));
        assert!(close(g.ea, 4000.0, 1e-9));
    }

    #[test]
    fn test_welded_section_reports_both_zones() {
        let catalog = AlloyCatalog::builtin().unwrap();
        let parts = partition(
            &TubeProfile::default(),
            &[WeldZone::new(Face::Top, 0.0)],
            1.0,
            "6061-T6",
            &catalog,
        )
        .unwrap();
        let mut solver = ElasticSectionSolver::new(parts.section);
        solver.prepare().unwrap();
        let result = solver.calculate_stress(&LoadActions::axial(1.0)).unwrap();
        assert_eq!(result.zones.len(), 2);
        assert!(result.zone("6061-T6 - Welded").is_some());
        assert!(result.zone("6061-T6 - Unwelded").is_some());
    }
}
