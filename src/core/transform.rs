#[derive(Debug, Clone, Copy)]
pub struct Transform {
    trans: glam::Affine3A,
    trans_it: glam::Mat3A,
}

impl Transform {
    pub fn new(trans: glam::Affine3A) -> Self {
        let trans_inv = trans.inverse();
        let trans_it = trans_inv.matrix3.transpose();
        Self { trans, trans_it }
    }

    pub fn affine(&self) -> glam::Affine3A {
        self.trans
    }

    pub fn transform_normal3a(&self, other: glam::Vec3A) -> glam::Vec3A {
        (self.trans_it * other).normalize()
    }
}
