mod bvh;
mod instance;
mod sphere;
mod triangle;

pub use bvh::*;
pub use instance::*;
pub use sphere::*;
pub use triangle::*;

use crate::core::{
    bbox::Bbox, intersection::Intersection, loader::InputParams, ray::Ray,
    scene_resources::SceneResources,
};

#[enum_dispatch::enum_dispatch(Primitive)]
pub trait PrimitiveT: Send + Sync {
    fn intersect_test(&self, ray: &Ray, t_max: f32) -> bool;

    fn intersect<'a>(&'a self, ray: &Ray, inter: &mut Intersection<'a>) -> bool;

    fn bbox(&self) -> Bbox;
}

#[enum_dispatch::enum_dispatch]
pub enum Primitive {
    Sphere,
    TriMesh,
}

pub fn create_primitive_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("primitive".into());
    let ty = params.get_str("type")?;
    let name = params.get_str("name")?;
    params.set_name(format!("primitive-{}-{}", ty, name).into());

    let res = match ty.as_str() {
        "sphere" => Sphere::load(params)?.into(),
        "mesh" => TriMesh::load(params)?.into(),
        "obj" => TriMesh::load_obj(params)?.into(),
        _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
    };

    rsc.add_primitive(name, res)?;

    params.check_unused_keys();

    Ok(())
}
