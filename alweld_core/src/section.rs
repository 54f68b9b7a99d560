//! Analysis-ready section: partitioned geometry plus its mesh.
//!
//! Built once per run by [`crate::partition::partition`] and reused for every
//! load case.

use geo::MultiPolygon;
use once_cell::unsync::OnceCell;

use crate::errors::CalcResult;
use crate::geometry::CompoundGeometry;
use crate::materials::Material;
use crate::mesh::Mesh;

#[derive(Debug, Clone)]
pub struct Section {
    geometry: CompoundGeometry,
    mesh: Mesh,
    outline: OnceCell<MultiPolygon<f64>>,
}

impl Section {
    /// Mesh `geometry` with the given target element size.
    pub fn new(geometry: CompoundGeometry, mesh_size: f64) -> CalcResult<Self> {
        let mesh = Mesh::generate(&geometry, mesh_size)?;
        Ok(Self::from_parts(geometry, mesh))
    }

    pub fn from_parts(geometry: CompoundGeometry, mesh: Mesh) -> Self {
        Self {
            geometry,
            mesh,
            outline: OnceCell::new(),
        }
    }

    pub fn geometry(&self) -> &CompoundGeometry {
        &self.geometry
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn materials(&self) -> &[Material] {
        &self.mesh.materials
    }

    /// Union of all regions, computed on first use
    pub fn outline(&self) -> &MultiPolygon<f64> {
        self.outline.get_or_init(|| self.geometry.union_polygon())
    }
}
