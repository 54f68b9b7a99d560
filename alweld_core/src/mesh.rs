//! # Triangular Mesh
//!
//! Three-node triangle mesh over a multi-material [`CompoundGeometry`].
//! Each region is ear-cut triangulated (holes included) and the triangles
//! are then refined by longest-edge bisection until no edge exceeds the
//! target size. Nodes at identical coordinates are merged, so neighbouring
//! regions share nodes along their common boundary wherever the
//! triangulations coincide.

use std::collections::HashMap;

use geo::TriangulateEarcut;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::geometry::CompoundGeometry;
use crate::materials::Material;

/// Hard cap on element count; a finer request is treated as a mesher failure.
pub const MAX_ELEMENTS: usize = 2_000_000;

/// Relative tolerance between region area and triangulated area
const AREA_TOLERANCE: f64 = 1e-6;

/// Signed area of triangle `a, b, c` (positive when counter-clockwise)
pub fn triangle_area(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
}

fn edge_length(a: [f64; 2], b: [f64; 2]) -> f64 {
    (b[0] - a[0]).hypot(b[1] - a[1])
}

fn midpoint(a: [f64; 2], b: [f64; 2]) -> [f64; 2] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0]
}

/// A linear triangle referencing three mesh nodes and one material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Node indices, counter-clockwise
    pub nodes: [usize; 3],
    /// Index into [`Mesh::materials`]
    pub material: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub nodes: Vec<[f64; 2]>,
    pub elements: Vec<Element>,
    pub materials: Vec<Material>,
    /// Target maximum edge length the mesh was generated with
    pub max_edge: f64,
}

/// Deduplicates node coordinates by exact bit pattern.
#[derive(Default)]
struct NodeTable {
    nodes: Vec<[f64; 2]>,
    index: HashMap<(u64, u64), usize>,
}

impl NodeTable {
    fn insert(&mut self, p: [f64; 2]) -> usize {
        // +0.0 folds -0.0 onto 0.0
        let key = ((p[0] + 0.0).to_bits(), (p[1] + 0.0).to_bits());
        if let Some(&i) = self.index.get(&key) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(p);
        self.index.insert(key, i);
        i
    }
}

impl Mesh {
    /// Mesh every region of `geometry` with edges no longer than `max_edge`.
    pub fn generate(geometry: &CompoundGeometry, max_edge: f64) -> CalcResult<Self> {
        if !max_edge.is_finite() || max_edge <= 0.0 {
            return Err(CalcError::mesh_generation(format!(
                "target element size must be positive, got {max_edge}"
            )));
        }
        if geometry.is_empty() {
            return Err(CalcError::mesh_generation("geometry has no regions"));
        }

        let materials = geometry.materials();
        let mut table = NodeTable::default();
        let mut elements = Vec::new();

        for (region_index, region) in geometry.regions.iter().enumerate() {
            let material = materials
                .iter()
                .position(|m| m.name == region.material.name)
                .ok_or_else(|| CalcError::Internal {
                    message: format!("material '{}' missing from mesh table", region.material.name),
                })?;

            let region_area = region.area();
            if region_area <= 0.0 {
                return Err(CalcError::mesh_generation(format!(
                    "region {region_index} ({}) has no area",
                    region.material.name
                )));
            }

            let mut stack: Vec<[[f64; 2]; 3]> = Vec::new();
            for polygon in &region.polygon.0 {
                for tri in polygon.earcut_triangles() {
                    let [a, b, c] = tri.to_array().map(|p| [p.x, p.y]);
                    let area = triangle_area(a, b, c);
                    if area.abs() <= f64::EPSILON * region_area {
                        continue;
                    }
                    stack.push(if area > 0.0 { [a, b, c] } else { [a, c, b] });
                }
            }
            if stack.is_empty() {
                return Err(CalcError::mesh_generation(format!(
                    "region {region_index} ({}) could not be triangulated",
                    region.material.name
                )));
            }

            let meshed_area: f64 = stack.iter().map(|t| triangle_area(t[0], t[1], t[2])).sum();
            if (meshed_area - region_area).abs() > AREA_TOLERANCE * region_area.max(1.0) {
                return Err(CalcError::mesh_generation(format!(
                    "region {region_index} triangulated area {meshed_area} does not match {region_area}"
                )));
            }

            let before = elements.len();
            while let Some(tri) = stack.pop() {
                let lengths = [
                    edge_length(tri[0], tri[1]),
                    edge_length(tri[1], tri[2]),
                    edge_length(tri[2], tri[0]),
                ];
                let (longest, &len) = lengths
                    .iter()
                    .enumerate()
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .unwrap_or((0, &0.0));

                if len > max_edge {
                    // Split the longest edge (i, i+1) at its midpoint
                    let i = longest;
                    let (p, q, r) = (tri[i], tri[(i + 1) % 3], tri[(i + 2) % 3]);
                    let m = midpoint(p, q);
                    stack.push([p, m, r]);
                    stack.push([m, q, r]);
                    continue;
                }

                elements.push(Element {
                    nodes: tri.map(|p| table.insert(p)),
                    material,
                });
                if elements.len() > MAX_ELEMENTS {
                    return Err(CalcError::mesh_generation(format!(
                        "element count exceeds {MAX_ELEMENTS}; target size {max_edge} is too fine"
                    )));
                }
            }
            debug!(
                region = region_index,
                material = %region.material.name,
                elements = elements.len() - before,
                "meshed region"
            );
        }

        Ok(Self {
            nodes: table.nodes,
            elements,
            materials,
            max_edge,
        })
    }

    pub fn element_coords(&self, element: &Element) -> [[f64; 2]; 3] {
        element.nodes.map(|n| self.nodes[n])
    }

    pub fn element_area(&self, element: &Element) -> f64 {
        let [a, b, c] = self.element_coords(element);
        triangle_area(a, b, c)
    }

    pub fn element_centroid(&self, element: &Element) -> [f64; 2] {
        let [a, b, c] = self.element_coords(element);
        [(a[0] + b[0] + c[0]) / 3.0, (a[1] + b[1] + c[1]) / 3.0]
    }

    pub fn total_area(&self) -> f64 {
        self.elements.iter().map(|e| self.element_area(e)).sum()
    }

    /// Area of the elements belonging to material `material`
    pub fn material_area(&self, material: usize) -> f64 {
        self.elements
            .iter()
            .filter(|e| e.material == material)
            .map(|e| self.element_area(e))
            .sum()
    }

    /// Sorted, unique node indices used by elements of material `material`
    pub fn material_nodes(&self, material: usize) -> Vec<usize> {
        let mut nodes: Vec<usize> = self
            .elements
            .iter()
            .filter(|e| e.material == material)
            .flat_map(|e| e.nodes)
            .collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }

    /// Longest element edge in the mesh
    pub fn longest_edge(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| {
                let [a, b, c] = self.element_coords(e);
                edge_length(a, b).max(edge_length(b, c)).max(edge_length(c, a))
            })
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{rectangular_hollow_section, Region};
    use crate::materials::AlloyCatalog;
    use geo::Rect;

    fn tube_geometry() -> CompoundGeometry {
        let (unwelded, _) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        CompoundGeometry::new(vec![rectangular_hollow_section(
            2.0, 3.0, 0.125, 0.05, 12, unwelded,
        )])
    }

    #[test]
    fn test_triangle_area_sign() {
        assert!((triangle_area([0.0, 0.0], [1.0, 0.0], [0.0, 1.0]) - 0.5).abs() < 1e-15);
        assert!((triangle_area([0.0, 0.0], [0.0, 1.0], [1.0, 0.0]) + 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_tube_mesh_preserves_area() {
        let geom = tube_geometry();
        let mesh = Mesh::generate(&geom, 0.125 / 5.0).unwrap();
        assert!((mesh.total_area() - geom.area()).abs() < 1e-9);
        assert!(mesh.longest_edge() <= 0.125 / 5.0 + 1e-12);
        assert!(mesh.elements.iter().all(|e| mesh.element_area(e) > 0.0));
        assert_eq!(mesh.materials.len(), 1);
    }

    #[test]
    fn test_material_bookkeeping() {
        let (unwelded, welded) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        let geom = CompoundGeometry::new(vec![
            Region::new(Rect::new((0.0, 0.0), (1.0, 1.0)).to_polygon(), unwelded),
            Region::new(Rect::new((1.0, 0.0), (2.0, 1.0)).to_polygon(), welded),
        ]);
        let mesh = Mesh::generate(&geom, 0.25).unwrap();
        assert_eq!(mesh.materials.len(), 2);
        assert!((mesh.material_area(0) - 1.0).abs() < 1e-12);
        assert!((mesh.material_area(1) - 1.0).abs() < 1e-12);

        let left = mesh.material_nodes(0);
        let right = mesh.material_nodes(1);
        assert!(left.windows(2).all(|w| w[0] < w[1]));
        // Both squares touch the line x = 1, so at least its end points are shared
        assert!(left.iter().any(|n| right.contains(n)));
    }

    #[test]
    fn test_rejects_bad_target_size() {
        let geom = tube_geometry();
        for size in [0.0, -1.0, f64::NAN] {
            let err = Mesh::generate(&geom, size).unwrap_err();
            assert!(matches!(err, CalcError::MeshGeneration { .. }));
        }
    }

    #[test]
    fn test_rejects_empty_geometry() {
        let err = Mesh::generate(&CompoundGeometry::default(), 0.1).unwrap_err();
        assert!(matches!(err, CalcError::MeshGeneration { .. }));
    }

    #[test]
    fn test_rejects_region_without_area() {
        let (unwelded, _) = AlloyCatalog::builtin().unwrap().lookup("6061-T6").unwrap();
        let geom = CompoundGeometry::new(vec![Region::new(
            geo::MultiPolygon::<f64>::new(vec![]),
            unwelded,
        )]);
        let err = Mesh::generate(&geom, 0.1).unwrap_err();
        assert!(matches!(err, CalcError::MeshGeneration { .. }));
    }
}
