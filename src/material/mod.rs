mod node;
mod principled;
mod util;

pub use node::*;
pub use principled::*;

use crate::core::{color::Color, loader::InputParams, scene_resources::SceneResources};

/// Name of the principled node the renderers shade with when a material has several.
pub const PRINCIPLED_NODE: &str = "principled";

/// Entry of the scene's material registry.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    name: String,
    use_nodes: bool,
    diffuse_color: Color,
    nodes: Vec<ShaderNode>,
}

impl Material {
    pub fn new(name: &str, use_nodes: bool, diffuse_color: Color, nodes: Vec<ShaderNode>) -> Self {
        Self {
            name: name.to_owned(),
            use_nodes,
            diffuse_color,
            nodes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn use_nodes(&self) -> bool {
        self.use_nodes
    }

    pub fn diffuse_color(&self) -> Color {
        self.diffuse_color
    }

    pub fn nodes(&self) -> &[ShaderNode] {
        &self.nodes
    }

    pub fn node(&self, name: &str) -> Option<&ShaderNode> {
        self.nodes.iter().find(|node| node.name() == name)
    }

    pub fn node_mut(&mut self, name: &str) -> Option<&mut ShaderNode> {
        self.nodes.iter_mut().find(|node| node.name() == name)
    }
}

pub fn create_material_from_params(
    rsc: &mut SceneResources,
    params: &mut InputParams,
) -> anyhow::Result<()> {
    params.set_name("material".into());
    let name = params.get_str("name")?;
    params.set_name(format!("material-{}", name).into());

    let diffuse_color: Color = params.get_float3_or("color", [0.8, 0.8, 0.8])?.into();
    let nodes = if params.contains_key("nodes") {
        let mut nodes = vec![];
        for mut node_params in params.take_object_array("nodes")? {
            let node = ShaderNode::load(&mut node_params, &name)?;
            if nodes.iter().any(|n: &ShaderNode| n.name() == node.name()) {
                anyhow::bail!(format!(
                    "material-{}: duplicated node name '{}'",
                    name,
                    node.name()
                ));
            }
            nodes.push(node);
        }
        nodes
    } else {
        vec![]
    };
    let use_nodes = params.get_bool_or("use_nodes", !nodes.is_empty())?;

    params.check_unused_keys();

    rsc.add_material(Material::new(&name, use_nodes, diffuse_color, nodes))
}

#[cfg(test)]
mod tests {
    use std::convert::TryFrom;

    use super::*;

    fn load(json: serde_json::Value) -> anyhow::Result<SceneResources> {
        let mut rsc = SceneResources::default();
        let mut params = InputParams::try_from(&json)?;
        create_material_from_params(&mut rsc, &mut params)?;
        Ok(rsc)
    }

    #[test]
    fn nodes_enable_node_shading() {
        let rsc = load(serde_json::json!({
            "name": "PAINT_body",
            "nodes": [{ "type": "principled", "name": "principled", "base_color": [0.1, 0.2, 0.3] }],
        }))
        .unwrap();
        let material = rsc.material("PAINT_body").unwrap();
        assert!(material.use_nodes());
        let node = material.node("principled").unwrap();
        assert_eq!(
            node.input(ShaderNode::BASE_COLOR),
            Some(NodeValue::Color([0.1, 0.2, 0.3, 1.0]))
        );
        assert_eq!(node.float_input(ShaderNode::CLEARCOAT, -1.0), 0.0);
    }

    #[test]
    fn plain_material_shades_as_diffuse() {
        let rsc = load(serde_json::json!({ "name": "rubber", "color": [0.05, 0.05, 0.05] })).unwrap();
        let material = rsc.material("rubber").unwrap();
        assert!(!material.use_nodes());
        let shading = SurfaceShading::from_material(material);
        assert_eq!(shading.bsdf.base_color(), Color::gray(0.05));
        assert_eq!(shading.emission, Color::BLACK);
    }

    #[test]
    fn emission_node_emits() {
        let rsc = load(serde_json::json!({
            "name": "lamp",
            "nodes": [{ "type": "emission", "name": "emission", "color": [1, 0.5, 0], "strength": 2 }],
        }))
        .unwrap();
        let shading = SurfaceShading::from_material(rsc.material("lamp").unwrap());
        assert_eq!(shading.emission, Color::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn unknown_node_type_is_rejected() {
        let result = load(serde_json::json!({
            "name": "odd",
            "nodes": [{ "type": "toon", "name": "toon" }],
        }));
        assert!(result.is_err());
    }
}
