use std::collections::BTreeMap;

use crate::core::{color::Color, loader::InputParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeValue {
    Float(f32),
    Color([f32; 4]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Principled,
    Emission,
}

/// One named node of a material's shader graph with its input sockets.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderNode {
    name: String,
    kind: NodeKind,
    inputs: BTreeMap<String, NodeValue>,
}

impl ShaderNode {
    pub const BASE_COLOR: &'static str = "base_color";
    pub const METALLIC: &'static str = "metallic";
    pub const ROUGHNESS: &'static str = "roughness";
    pub const CLEARCOAT: &'static str = "clearcoat";
    pub const CLEARCOAT_ROUGHNESS: &'static str = "clearcoat_roughness";
    pub const COLOR: &'static str = "color";
    pub const STRENGTH: &'static str = "strength";

    pub fn principled(name: &str) -> Self {
        let mut inputs = BTreeMap::new();
        inputs.insert(
            Self::BASE_COLOR.to_owned(),
            NodeValue::Color([0.8, 0.8, 0.8, 1.0]),
        );
        inputs.insert(Self::METALLIC.to_owned(), NodeValue::Float(0.0));
        inputs.insert(Self::ROUGHNESS.to_owned(), NodeValue::Float(0.5));
        inputs.insert(Self::CLEARCOAT.to_owned(), NodeValue::Float(0.0));
        inputs.insert(Self::CLEARCOAT_ROUGHNESS.to_owned(), NodeValue::Float(0.03));
        Self {
            name: name.to_owned(),
            kind: NodeKind::Principled,
            inputs,
        }
    }

    pub fn emission(name: &str) -> Self {
        let mut inputs = BTreeMap::new();
        inputs.insert(Self::COLOR.to_owned(), NodeValue::Color([1.0, 1.0, 1.0, 1.0]));
        inputs.insert(Self::STRENGTH.to_owned(), NodeValue::Float(1.0));
        Self {
            name: name.to_owned(),
            kind: NodeKind::Emission,
            inputs,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn input(&self, socket: &str) -> Option<NodeValue> {
        self.inputs.get(socket).copied()
    }

    pub fn set_input(&mut self, socket: &str, value: NodeValue) {
        self.inputs.insert(socket.to_owned(), value);
    }

    pub fn float_input(&self, socket: &str, fallback: f32) -> f32 {
        match self.input(socket) {
            Some(NodeValue::Float(value)) => value,
            _ => fallback,
        }
    }

    pub fn color_input(&self, socket: &str, fallback: Color) -> Color {
        match self.input(socket) {
            Some(NodeValue::Color(value)) => value.into(),
            _ => fallback,
        }
    }

    pub fn load(params: &mut InputParams, material_name: &str) -> anyhow::Result<Self> {
        params.set_name(format!("material-{}-node", material_name).into());
        let ty = params.get_str("type")?;
        let name = params.get_str("name")?;
        params.set_name(format!("material-{}-node-{}", material_name, name).into());

        let mut node = match ty.as_str() {
            "principled" => Self::principled(&name),
            "emission" => Self::emission(&name),
            _ => anyhow::bail!(format!("{}: unknown type '{}'", params.name(), ty)),
        };

        let sockets = node.inputs.keys().cloned().collect::<Vec<_>>();
        for socket in sockets {
            if !params.contains_key(&socket) {
                continue;
            }
            let value = match node.inputs[&socket] {
                NodeValue::Float(_) => NodeValue::Float(params.get_float(&socket)?),
                NodeValue::Color(_) => {
                    let [r, g, b] = params.get_float3(&socket)?;
                    NodeValue::Color([r, g, b, 1.0])
                }
            };
            node.set_input(&socket, value);
        }

        params.check_unused_keys();

        Ok(node)
    }
}
