mod scene_host;

#[cfg(test)]
pub mod fake;

pub use scene_host::*;

use crate::{core::settings::RenderSettings, material::Material};

/// What the batch layer needs from the application that owns the scene: find
/// and edit materials, toggle object visibility, bind cameras, tweak render
/// settings and render a still to `RenderSettings::filepath`.
pub trait Host {
    /// Material names in registry order.
    fn material_names(&self) -> Vec<String>;

    fn material_mut(&mut self, name: &str) -> Option<&mut Material>;

    /// Member object names of a named collection, `None` if there is no such collection.
    fn collection(&self, name: &str) -> Option<Vec<String>>;

    /// Object names in scene order.
    fn object_names(&self) -> Vec<String>;

    /// Returns false when the object does not exist.
    fn set_hide_render(&mut self, object: &str, hide: bool) -> bool;

    fn has_camera(&self, name: &str) -> bool;

    /// Returns false when the camera does not exist.
    fn set_camera(&mut self, name: &str) -> bool;

    fn settings_mut(&mut self) -> &mut RenderSettings;

    /// Blocks until the image is written.
    fn render_still(&mut self) -> anyhow::Result<()>;
}
