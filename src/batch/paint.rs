use crate::{
    host::Host,
    material::{self, NodeValue, ShaderNode},
};

use super::BatchError;

pub const PAINT_PREFIX: &str = "PAINT";
pub const PAINT_NODE: &str = material::PRINCIPLED_NODE;
pub const CLEARCOAT: f32 = 0.2;
pub const CLEARCOAT_ROUGHNESS: f32 = 0.1;

/// Decodes `#RRGGBB` into normalized channels.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3], BatchError> {
    let invalid = || BatchError::InvalidHexColor(hex.to_owned());
    let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut rgb = [0.0; 3];
    for (c, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[2 * c..2 * c + 2], 16).map_err(|_| invalid())?;
        *channel = byte as f32 / 255.0;
    }
    Ok(rgb)
}

pub fn is_paint_material(name: &str) -> bool {
    name.starts_with(PAINT_PREFIX)
}

/// Pushes the color and the fixed clearcoat into every paint material's
/// principled node. Returns how many materials were updated.
pub fn set_paint<H: Host + ?Sized>(host: &mut H, hex: &str) -> Result<usize, BatchError> {
    let [r, g, b] = parse_hex_color(hex)?;

    let mut updated = 0;
    for name in host.material_names() {
        if !is_paint_material(&name) {
            continue;
        }
        let material = match host.material_mut(&name) {
            Some(material) if material.use_nodes() => material,
            _ => continue,
        };
        if let Some(node) = material.node_mut(PAINT_NODE) {
            node.set_input(ShaderNode::BASE_COLOR, NodeValue::Color([r, g, b, 1.0]));
            node.set_input(ShaderNode::CLEARCOAT, NodeValue::Float(CLEARCOAT));
            node.set_input(
                ShaderNode::CLEARCOAT_ROUGHNESS,
                NodeValue::Float(CLEARCOAT_ROUGHNESS),
            );
            log::debug!("painted '{}' with {}", name, hex);
            updated += 1;
        }
    }

    Ok(updated)
}
