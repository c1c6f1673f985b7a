use crate::core::{color::Color, rng::Rng};

use super::{util, NodeKind, ShaderNode};

const MIN_ROUGHNESS: f32 = 0.02;
const DIELECTRIC_R0: f32 = 0.04;

/// Diffuse base, GGX specular and a GGX clearcoat layer, evaluated in the local
/// shading frame (`z` is the normal).
#[derive(Debug, Clone, Copy)]
pub struct PrincipledBsdf {
    base_color: Color,
    metallic: f32,
    roughness_a2: f32,
    clearcoat: f32,
    clearcoat_a2: f32,
}

pub struct BsdfSample {
    pub wi: glam::Vec3A,
    pub pdf: f32,
    pub bsdf: Color,
}

impl PrincipledBsdf {
    pub fn new(
        base_color: Color,
        metallic: f32,
        roughness: f32,
        clearcoat: f32,
        clearcoat_roughness: f32,
    ) -> Self {
        let roughness = roughness.clamp(MIN_ROUGHNESS, 1.0);
        let clearcoat_roughness = clearcoat_roughness.clamp(MIN_ROUGHNESS, 1.0);
        Self {
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness_a2: roughness.powi(4),
            clearcoat: clearcoat.max(0.0),
            clearcoat_a2: clearcoat_roughness.powi(4),
        }
    }

    pub fn diffuse(base_color: Color) -> Self {
        Self::new(base_color, 0.0, 1.0, 0.0, MIN_ROUGHNESS)
    }

    pub fn from_node(node: &ShaderNode) -> Self {
        Self::new(
            node.color_input(ShaderNode::BASE_COLOR, Color::gray(0.8)),
            node.float_input(ShaderNode::METALLIC, 0.0),
            node.float_input(ShaderNode::ROUGHNESS, 0.5),
            node.float_input(ShaderNode::CLEARCOAT, 0.0),
            node.float_input(ShaderNode::CLEARCOAT_ROUGHNESS, 0.03),
        )
    }

    pub fn base_color(&self) -> Color {
        self.base_color
    }

    pub fn clearcoat(&self) -> f32 {
        self.clearcoat
    }

    /// Rough hemispherical reflectance, used for ambient terms.
    pub fn albedo(&self) -> Color {
        let diffuse = self.base_color * (1.0 - self.metallic);
        let specular = self.specular_r0();
        diffuse + specular * 0.5 + Color::gray(DIELECTRIC_R0 * self.clearcoat)
    }

    pub fn eval(&self, wo: glam::Vec3A, wi: glam::Vec3A) -> Color {
        if wo.z <= 0.0 || wi.z <= 0.0 {
            return Color::BLACK;
        }

        let half = util::half_from_reflect(wo, wi);
        let ndoth = half.z;
        let hdotv = wo.dot(half).max(0.0);

        let diffuse = self.base_color * ((1.0 - self.metallic) * std::f32::consts::FRAC_1_PI);

        let fresnel = util::schlick_fresnel_with_r0(self.specular_r0(), hdotv);
        let specular = fresnel
            * util::ggx_ndf(ndoth, self.roughness_a2)
            * util::smith_separable_visible(wo.z, wi.z, self.roughness_a2);

        let coat = if self.clearcoat > 0.0 {
            let fresnel = util::schlick_fresnel_with_r0(Color::gray(DIELECTRIC_R0), hdotv);
            fresnel
                * (self.clearcoat
                    * util::ggx_ndf(ndoth, self.clearcoat_a2)
                    * util::smith_separable_visible(wo.z, wi.z, self.clearcoat_a2))
        } else {
            Color::BLACK
        };

        diffuse + specular + coat
    }

    pub fn pdf(&self, wo: glam::Vec3A, wi: glam::Vec3A) -> f32 {
        if wo.z <= 0.0 || wi.z <= 0.0 {
            return 0.0;
        }

        let (p_diffuse, p_specular, p_coat) = self.lobe_weights();
        let half = util::half_from_reflect(wo, wi);
        let jacobian = 1.0 / (4.0 * wo.dot(half).abs()).max(0.0001);

        let pdf_diffuse = wi.z * std::f32::consts::FRAC_1_PI;
        let pdf_specular = util::ggx_ndf(half.z, self.roughness_a2) * half.z * jacobian;
        let pdf_coat = util::ggx_ndf(half.z, self.clearcoat_a2) * half.z * jacobian;

        p_diffuse * pdf_diffuse + p_specular * pdf_specular + p_coat * pdf_coat
    }

    pub fn sample(&self, wo: glam::Vec3A, rng: &mut Rng) -> Option<BsdfSample> {
        if wo.z <= 0.0 {
            return None;
        }

        let (p_diffuse, p_specular, _) = self.lobe_weights();
        let rand = rng.uniform_1d();
        let wi = if rand < p_diffuse {
            rng.cosine_weighted_on_hemisphere()
        } else {
            let a2 = if rand < p_diffuse + p_specular {
                self.roughness_a2
            } else {
                self.clearcoat_a2
            };
            let half = util::sample_ggx_half(a2, rng.uniform_2d());
            util::reflect_n(wo, half)
        };

        if wi.z <= 0.0 {
            return None;
        }

        let pdf = self.pdf(wo, wi);
        if pdf <= 0.0 || !pdf.is_finite() {
            return None;
        }

        Some(BsdfSample {
            wi,
            pdf,
            bsdf: self.eval(wo, wi),
        })
    }

    fn specular_r0(&self) -> Color {
        Color::gray(DIELECTRIC_R0).lerp(self.base_color, self.metallic)
    }

    fn lobe_weights(&self) -> (f32, f32, f32) {
        let diffuse = 1.0 - self.metallic;
        let specular = 0.5 + 0.5 * self.metallic;
        let coat = 0.5 * self.clearcoat.min(1.0);
        let sum = diffuse + specular + coat;
        (diffuse / sum, specular / sum, coat / sum)
    }
}

/// Render-time view of one material: what it reflects and what it emits.
#[derive(Debug, Clone, Copy)]
pub struct SurfaceShading {
    pub bsdf: PrincipledBsdf,
    pub emission: Color,
}

impl SurfaceShading {
    /// Without nodes the viewport color is shaded as plain diffuse. With nodes the
    /// principled node named `principled` drives the BSDF, or the first principled
    /// node when none has that name, and emission nodes add up.
    pub fn from_material(material: &super::Material) -> Self {
        if !material.use_nodes() {
            return Self {
                bsdf: PrincipledBsdf::diffuse(material.diffuse_color()),
                emission: Color::BLACK,
            };
        }

        let mut principled = material
            .nodes()
            .iter()
            .filter(|node| node.kind() == NodeKind::Principled);
        let bsdf = principled
            .clone()
            .find(|node| node.name() == super::PRINCIPLED_NODE)
            .or_else(|| principled.next())
            .map(PrincipledBsdf::from_node);
        let emission = material
            .nodes()
            .iter()
            .filter(|node| node.kind() == NodeKind::Emission)
            .fold(Color::BLACK, |acc, node| {
                acc + node.color_input(ShaderNode::COLOR, Color::WHITE)
                    * node.float_input(ShaderNode::STRENGTH, 1.0)
            });

        let bsdf = match bsdf {
            Some(bsdf) => bsdf,
            None if emission.luminance() > 0.0 => PrincipledBsdf::diffuse(Color::BLACK),
            None => PrincipledBsdf::diffuse(material.diffuse_color()),
        };

        Self { bsdf, emission }
    }
}
