use std::{
    convert::TryInto,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    camera,
    core::{
        color::Color,
        loader::InputParams,
        scene::{self, Object, Scene},
        scene_resources::SceneResources,
    },
    light, material, primitive,
};

type LoadFunc = dyn Fn(&mut SceneResources, &mut InputParams) -> anyhow::Result<()>;

pub fn load_scene<P: AsRef<Path>>(path: P) -> anyhow::Result<Scene> {
    let path = path.as_ref().to_path_buf();
    let mut rsc = SceneResources::default();

    let json_value = read_json(&path).context("scene - can't read scene file")?;

    // materials before objects, objects refer to them by name
    let sections: [(&str, &LoadFunc, bool); 7] = [
        ("cameras", &camera::create_camera_from_params as &LoadFunc, true),
        ("materials", &material::create_material_from_params as &LoadFunc, true),
        ("primitives", &primitive::create_primitive_from_params as &LoadFunc, true),
        ("objects", &Object::load as &LoadFunc, true),
        ("collections", &scene::create_collection_from_params as &LoadFunc, false),
        ("lights", &light::create_light_from_params as &LoadFunc, false),
        ("environment", &load_environment as &LoadFunc, false),
    ];

    for (key, load_func, required) in sections.iter() {
        let env = format!("json-{}", key);
        match json_value.get(*key) {
            Some(value) => {
                let allow_array = *key != "environment";
                load_from_value_or_external(&mut rsc, &path, value, &env, *load_func, allow_array)?
            }
            None if *required => anyhow::bail!(format!("scene - There is no '{}' field", key)),
            None => {}
        }
    }

    rsc.to_scene()
}

fn load_environment(rsc: &mut SceneResources, params: &mut InputParams) -> anyhow::Result<()> {
    params.set_name("environment".into());
    let color: Color = params.get_float3("color")?.into();
    rsc.set_environment(color)?;

    params.check_unused_keys();

    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let json_file = std::fs::File::open(path)
        .context(format!("can't open '{}'", path.display()))?;
    let json_reader = std::io::BufReader::new(json_file);
    let json_value = serde_json::from_reader(json_reader)
        .context(format!("can't parse '{}'", path.display()))?;
    Ok(json_value)
}

fn load_from_object(
    rsc: &mut SceneResources,
    path: &PathBuf,
    value: &serde_json::Value,
    load_func: &LoadFunc,
) -> anyhow::Result<()> {
    let mut params: InputParams = value.try_into()?;
    params.set_base_path(path.clone());
    load_func(rsc, &mut params)
}

/// A section is an object, an array of objects, or a string naming an external
/// json file (relative to the scene file) holding either of them.
fn load_from_value_or_external(
    rsc: &mut SceneResources,
    path: &PathBuf,
    value: &serde_json::Value,
    env: &str,
    load_func: &LoadFunc,
    allow_array: bool,
) -> anyhow::Result<()> {
    if let Some(json_path) = value.as_str() {
        let external_path = path.with_file_name(json_path);
        let json_value =
            read_json(&external_path).context(format!("{} - External json file failed", env))?;
        load_from_value_or_external(rsc, &external_path, &json_value, env, load_func, allow_array)?;
    } else if let Some(array) = value.as_array() {
        if !allow_array {
            anyhow::bail!(format!("{} - Field should not be an array", env));
        }
        for ele in array {
            if ele.is_string() {
                load_from_value_or_external(rsc, path, ele, env, load_func, true)?;
            } else {
                load_from_object(rsc, path, ele, load_func).context(env.to_owned())?;
            }
        }
    } else {
        load_from_object(rsc, path, value, load_func).context(env.to_owned())?;
    }

    Ok(())
}
