use std::sync::Arc;

use crate::core::{bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray};

use super::{BvhAccel, PrimitiveT};

#[derive(Copy, Clone)]
pub struct MeshVertex {
    pub position: glam::Vec3A,
    pub normal: Option<glam::Vec3A>,
}

pub struct TriMesh {
    triangles: BvhAccel<Triangle>,
}

pub struct Triangle {
    vertices: Arc<Vec<MeshVertex>>,
    indices: [usize; 3],
    bbox: Bbox,
}

impl TriMesh {
    pub fn new(vertices: Vec<MeshVertex>, indices: Vec<u32>) -> anyhow::Result<Self> {
        if indices.len() % 3 != 0 {
            anyhow::bail!(format!(
                "index count {} is not a multiple of 3",
                indices.len()
            ));
        }
        if let Some(index) = indices.iter().find(|&&ind| ind as usize >= vertices.len()) {
            anyhow::bail!(format!(
                "index {} is out of range, there are {} vertices",
                index,
                vertices.len()
            ));
        }

        let vertices = Arc::new(vertices);
        let triangles = indices
            .chunks_exact(3)
            .map(|tri| {
                Arc::new(Triangle::new(
                    vertices.clone(),
                    [tri[0] as usize, tri[1] as usize, tri[2] as usize],
                ))
            })
            .collect::<Vec<_>>();
        let triangles = BvhAccel::new(triangles, 4);

        Ok(Self { triangles })
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Inline mesh: flat `positions`, `indices` and optional per-vertex `normals`.
    pub fn load(params: &mut InputParams) -> anyhow::Result<Self> {
        let positions = params.get_float_array("positions")?;
        if positions.len() % 3 != 0 {
            anyhow::bail!(format!(
                "{}: 'positions' should hold xyz triples",
                params.name()
            ));
        }
        let normals = if params.contains_key("normals") {
            let normals = params.get_float_array("normals")?;
            if normals.len() != positions.len() {
                anyhow::bail!(format!(
                    "{}: 'normals' and 'positions' differ in length",
                    params.name()
                ));
            }
            Some(normals)
        } else {
            None
        };
        let indices = params
            .get_int_array("indices")?
            .into_iter()
            .map(|ind| {
                if ind < 0 {
                    anyhow::bail!("negative index {}", ind)
                } else {
                    Ok(ind as u32)
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()
            .map_err(|err| anyhow::anyhow!("{}: {}", params.name(), err))?;

        let vertices = positions
            .chunks_exact(3)
            .enumerate()
            .map(|(i, p)| MeshVertex {
                position: glam::Vec3A::new(p[0], p[1], p[2]),
                normal: normals
                    .as_ref()
                    .map(|n| glam::Vec3A::new(n[3 * i], n[3 * i + 1], n[3 * i + 2]).normalize()),
            })
            .collect();

        TriMesh::new(vertices, indices).map_err(|err| anyhow::anyhow!("{}: {}", params.name(), err))
    }

    /// Wavefront OBJ file, every model of the file merged into one mesh.
    pub fn load_obj(params: &mut InputParams) -> anyhow::Result<Self> {
        let obj_file = params.get_file_path("file")?;

        let load_options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (models, _) = tobj::load_obj(&obj_file, &load_options).map_err(|err| {
            anyhow::anyhow!("{}: can't load '{}': {}", params.name(), obj_file.display(), err)
        })?;

        let mut vertices = vec![];
        let mut indices = vec![];
        for model in models {
            let mesh = model.mesh;
            let offset = vertices.len() as u32;
            let has_normals = mesh.normals.len() == mesh.positions.len();
            for (i, p) in mesh.positions.chunks_exact(3).enumerate() {
                let normal = if has_normals {
                    Some(
                        glam::Vec3A::new(
                            mesh.normals[3 * i],
                            mesh.normals[3 * i + 1],
                            mesh.normals[3 * i + 2],
                        )
                        .normalize(),
                    )
                } else {
                    None
                };
                vertices.push(MeshVertex {
                    position: glam::Vec3A::new(p[0], p[1], p[2]),
                    normal,
                });
            }
            indices.extend(mesh.indices.into_iter().map(|ind| ind + offset));
        }

        TriMesh::new(vertices, indices).map_err(|err| anyhow::anyhow!("{}: {}", params.name(), err))
    }
}

impl Triangle {
    fn new(vertices: Arc<Vec<MeshVertex>>, indices: [usize; 3]) -> Self {
        let bbox = indices
            .iter()
            .fold(Bbox::empty(), |acc, &i| acc.merge_point(vertices[i].position));
        Self {
            vertices,
            indices,
            bbox,
        }
    }

    fn positions(&self) -> [glam::Vec3A; 3] {
        [
            self.vertices[self.indices[0]].position,
            self.vertices[self.indices[1]].position,
            self.vertices[self.indices[2]].position,
        ]
    }

    /// Moller-Trumbore, returns `(t, barycentric of p0, p1, p2)`.
    fn intersect_ray(&self, ray: &Ray) -> Option<(f32, f32, f32, f32)> {
        let [p0, p1, p2] = self.positions();
        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let q = ray.direction.cross(e2);
        let det = e1.dot(q);
        if det == 0.0 {
            return None;
        }
        let det_inv = 1.0 / det;
        let s = ray.origin - p0;
        let v = s.dot(q) * det_inv;
        if !(0.0..=1.0).contains(&v) {
            return None;
        }
        let r = s.cross(e1);
        let w = ray.direction.dot(r) * det_inv;
        let u = 1.0 - v - w;
        if w < 0.0 || u < 0.0 {
            return None;
        }
        Some((e2.dot(r) * det_inv, u, v, w))
    }
}

impl PrimitiveT for TriMesh {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        self.triangles.intersect_test(ray, t_max)
    }

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        self.triangles.intersect(ray, inter)
    }

    fn bbox(&self) -> Bbox {
        self.triangles.bbox()
    }
}

impl PrimitiveT for Triangle {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool {
        if let Some((t, _, _, _)) = self.intersect_ray(ray) {
            t > ray.t_min && t < t_max
        } else {
            false
        }
    }

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool {
        if let Some((t, u, v, w)) = self.intersect_ray(ray) {
            if t > ray.t_min && t < inter.t {
                let [p0, p1, p2] = self.positions();
                let normal = (p1 - p0).cross(p2 - p0).normalize();
                let v0 = &self.vertices[self.indices[0]];
                let v1 = &self.vertices[self.indices[1]];
                let v2 = &self.vertices[self.indices[2]];
                let shade_normal = match (v0.normal, v1.normal, v2.normal) {
                    (Some(n0), Some(n1), Some(n2)) => (n0 * u + n1 * v + n2 * w).normalize(),
                    _ => normal,
                };

                inter.t = t;
                inter.normal = if normal.dot(shade_normal) < 0.0 {
                    -normal
                } else {
                    normal
                };
                inter.shade_normal = shade_normal;
                return true;
            }
        }
        false
    }

    fn bbox(&self) -> Bbox {
        self.bbox
    }
}
