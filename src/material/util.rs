use crate::core::color::Color;

pub fn reflect_n(i: glam::Vec3A, n: glam::Vec3A) -> glam::Vec3A {
    2.0 * i.dot(n) * n - i
}

pub fn half_from_reflect(i: glam::Vec3A, o: glam::Vec3A) -> glam::Vec3A {
    if i.z >= 0.0 {
        (i + o).normalize()
    } else {
        -(i + o).normalize()
    }
}

pub fn schlick_fresnel_with_r0(r0: Color, cos: f32) -> Color {
    r0 + (Color::WHITE - r0) * pow5((1.0 - cos).max(0.0))
}

pub fn ggx_ndf(ndoth: f32, a2: f32) -> f32 {
    a2 * std::f32::consts::FRAC_1_PI / (pow2(ndoth * ndoth * (a2 - 1.0) + 1.0)).max(0.0001)
}

/// return sampled (n dot h)^2
pub fn ggx_ndf_cdf_inverse(a2: f32, rand: f32) -> f32 {
    (1.0 - rand) / (1.0 - rand * (1.0 - a2))
}

/// Smith visibility, already divided by `4 * ndotv * ndotl`.
pub fn smith_separable_visible(ndotv: f32, ndotl: f32, a2: f32) -> f32 {
    let v = ndotv.abs() + ((1.0 - a2) * ndotv * ndotv + a2).sqrt();
    let l = ndotl.abs() + ((1.0 - a2) * ndotl * ndotl + a2).sqrt();
    1.0 / (v * l)
}

pub fn sample_ggx_half(a2: f32, rand: (f32, f32)) -> glam::Vec3A {
    let cos_theta_sqr = ggx_ndf_cdf_inverse(a2, rand.0);
    let cos_theta = cos_theta_sqr.sqrt();
    let sin_theta = (1.0 - cos_theta_sqr).max(0.0).sqrt();
    let phi = 2.0 * std::f32::consts::PI * rand.1;
    let (sin_phi, cos_phi) = phi.sin_cos();
    glam::Vec3A::new(sin_theta * cos_phi, sin_theta * sin_phi, cos_theta)
}

fn pow2(x: f32) -> f32 {
    x * x
}

fn pow5(x: f32) -> f32 {
    x * x * x * x * x
}
