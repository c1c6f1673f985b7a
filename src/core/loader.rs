use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    convert::{TryFrom, TryInto},
    path::PathBuf,
};

/// Flat view over one JSON object of a scene file. Every accessor records the
/// key as visited so leftovers can be reported by `check_unused_keys`.
pub struct InputParams {
    params: HashMap<String, InputParamsValue>,
    name: Cow<'static, str>,
    visited_names: HashSet<String>,
    base_path: PathBuf,
}

pub enum InputParamsValue {
    Int(i32),
    Float(f32),
    Bool(bool),
    String(String),
    Array(Vec<InputParamsValue>),
    Object(InputParams),
}

impl InputParamsValue {
    fn as_int(&self) -> Option<i32> {
        if let InputParamsValue::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    fn as_float(&self) -> Option<f32> {
        match self {
            InputParamsValue::Int(value) => Some(*value as f32),
            InputParamsValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    fn as_bool(&self) -> Option<bool> {
        if let InputParamsValue::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }
}

macro_rules! params_get {
    ( $( ( $name:ident, $type:ty, $conv:ident, $hint:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<$type> {
                    if let Some(value) = self.params.get(key) {
                        if let Some(value) = value.$conv() {
                            self.visited_names.insert(key.to_owned());
                            return Ok(value);
                        }
                        anyhow::bail!(format!("{} - '{}' should be {}", self.name, key, $hint));
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }

                pub fn [<get_ $name _or>](&mut self, key: &str, fallback: $type) -> anyhow::Result<$type> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }

                pub fn [<get_ $name _array>](&mut self, key: &str) -> anyhow::Result<Vec<$type>> {
                    if let Some(value) = self.params.get(key) {
                        let error_info =
                            format!("{} - '{}' should be array of {}", self.name, key, $hint);
                        if let InputParamsValue::Array(arr) = value {
                            let mut result = Vec::with_capacity(arr.len());
                            for ele in arr {
                                match ele.$conv() {
                                    Some(ele) => result.push(ele),
                                    None => anyhow::bail!(error_info),
                                }
                            }
                            self.visited_names.insert(key.to_owned());
                            return Ok(result);
                        }
                        anyhow::bail!(error_info);
                    }
                    anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
                }
            }
        )+
    };
}

macro_rules! params_get_vec {
    ( $( ( $name:ident, $len:expr ) ),+ $(,)? ) => {
        $(
            paste::paste! {
                pub fn [<get_ $name>](&mut self, key: &str) -> anyhow::Result<[f32; $len]> {
                    let arr = self.get_float_array(key)?;
                    if arr.len() != $len {
                        anyhow::bail!(format!(
                            "{} - '{}' should be array with {} floats",
                            self.name,
                            key,
                            $len,
                        ));
                    }
                    let mut result = [0.0; $len];
                    result.copy_from_slice(&arr);
                    Ok(result)
                }

                pub fn [<get_ $name _or>](
                    &mut self,
                    key: &str,
                    fallback: [f32; $len],
                ) -> anyhow::Result<[f32; $len]> {
                    if self.params.contains_key(key) {
                        self.[<get_ $name>](key)
                    } else {
                        Ok(fallback)
                    }
                }
            }
        )+
    };
}

impl InputParams {
    pub fn set_name(&mut self, name: Cow<'static, str>) {
        self.name = name;
    }

    pub fn name(&self) -> &str {
        self.name.as_ref()
    }

    pub fn set_base_path(&mut self, path: PathBuf) {
        self.base_path = path;
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    params_get! {
        (int, i32, as_int, "integer"),
        (float, f32, as_float, "float"),
        (bool, bool, as_bool, "boolean"),
    }

    params_get_vec! {
        (float3, 3),
        (float4, 4),
    }

    pub fn get_matrix(&mut self, key: &str) -> anyhow::Result<glam::Mat4> {
        let arr = self.get_float_array(key)?;
        if arr.len() != 16 {
            anyhow::bail!(format!(
                "{} - '{}' should be an array of 16 floats",
                self.name, key
            ));
        }
        Ok(glam::Mat4::from_cols_slice(&arr))
    }

    pub fn get_str(&mut self, key: &str) -> anyhow::Result<String> {
        if let Some(value) = self.params.get(key) {
            if let InputParamsValue::String(value) = value {
                self.visited_names.insert(key.to_owned());
                return Ok(value.clone());
            }
            anyhow::bail!(format!("{} - '{}' should be string", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_str_array(&mut self, key: &str) -> anyhow::Result<Vec<String>> {
        if let Some(value) = self.params.get(key) {
            let error_info = format!("{} - '{}' should be array of strings", self.name, key);
            if let InputParamsValue::Array(arr) = value {
                let mut result = Vec::with_capacity(arr.len());
                for ele in arr {
                    if let InputParamsValue::String(ele) = ele {
                        result.push(ele.clone());
                    } else {
                        anyhow::bail!(error_info);
                    }
                }
                self.visited_names.insert(key.to_owned());
                return Ok(result);
            }
            anyhow::bail!(error_info);
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    /// Moves nested objects out, each inherits the base path of this one.
    pub fn take_object_array(&mut self, key: &str) -> anyhow::Result<Vec<InputParams>> {
        if let Some(value) = self.params.remove(key) {
            self.visited_names.insert(key.to_owned());
            if let InputParamsValue::Array(arr) = value {
                let mut result = Vec::with_capacity(arr.len());
                for ele in arr {
                    if let InputParamsValue::Object(mut ele) = ele {
                        ele.set_base_path(self.base_path.clone());
                        result.push(ele);
                    } else {
                        anyhow::bail!(format!(
                            "{} - '{}' should be array of objects",
                            self.name, key
                        ));
                    }
                }
                return Ok(result);
            }
            anyhow::bail!(format!("{} - '{}' should be array of objects", self.name, key));
        }
        anyhow::bail!(format!("{} - there is no '{}' field", self.name, key));
    }

    pub fn get_file_path(&mut self, key: &str) -> anyhow::Result<PathBuf> {
        let filename = self.get_str(key)?;
        let path = self.base_path.with_file_name(filename);
        Ok(path)
    }

    pub fn check_unused_keys(&self) {
        for k in self.params.keys() {
            if !k.starts_with('#') && !self.visited_names.contains(k) {
                log::warn!("{} - unused key '{}'", self.name, k);
            }
        }
    }

    #[cfg(test)]
    pub fn unused_keys(&self) -> Vec<String> {
        let mut keys = self
            .params
            .keys()
            .filter(|k| !k.starts_with('#') && !self.visited_names.contains(*k))
            .cloned()
            .collect::<Vec<_>>();
        keys.sort();
        keys
    }
}

impl TryFrom<&serde_json::Value> for InputParamsValue {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Null => {
                anyhow::bail!("can't convert to InputParamsValue from null json")
            }
            serde_json::Value::Bool(v) => Ok(Self::Bool(*v)),
            serde_json::Value::Number(v) => {
                if let Some(v) = v.as_i64() {
                    Ok(Self::Int(v as i32))
                } else if let Some(v) = v.as_f64() {
                    Ok(Self::Float(v as f32))
                } else {
                    anyhow::bail!("can't convert number '{}'", v)
                }
            }
            serde_json::Value::String(v) => Ok(Self::String(v.clone())),
            serde_json::Value::Array(arr) => {
                let mut values = Vec::<InputParamsValue>::with_capacity(arr.len());
                for v in arr {
                    match v.try_into() {
                        Ok(v) => values.push(v),
                        Err(e) => anyhow::bail!(format!("can't convert array element: {}", e)),
                    }
                }
                Ok(Self::Array(values))
            }
            serde_json::Value::Object(_) => Ok(Self::Object(value.try_into()?)),
        }
    }
}

impl TryFrom<&serde_json::Value> for InputParams {
    type Error = anyhow::Error;

    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        if let serde_json::Value::Object(value) = value {
            let mut params = HashMap::<String, InputParamsValue>::with_capacity(value.len());
            for (k, v) in value {
                match v.try_into() {
                    Ok(v) => {
                        params.insert(k.clone(), v);
                    }
                    Err(e) => anyhow::bail!(format!("can't convert member '{}': {}", k, e)),
                }
            }
            Ok(Self {
                params,
                name: Cow::Owned("".to_owned()),
                visited_names: HashSet::new(),
                base_path: PathBuf::default(),
            })
        } else {
            anyhow::bail!("can't convert to InputParams from non-object json value");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(json: serde_json::Value) -> InputParams {
        InputParams::try_from(&json).unwrap()
    }

    #[test]
    fn floats_accept_integer_literals() {
        let mut params = params(serde_json::json!({ "radius": 2, "center": [0, 1.5, -1] }));
        assert_eq!(params.get_float("radius").unwrap(), 2.0);
        assert_eq!(params.get_float3("center").unwrap(), [0.0, 1.5, -1.0]);
    }

    #[test]
    fn missing_and_mistyped_keys_are_errors() {
        let mut params = params(serde_json::json!({ "name": 3 }));
        assert!(params.get_str("name").is_err());
        assert!(params.get_str("type").is_err());
        assert_eq!(params.get_int_or("depth", 4).unwrap(), 4);
    }

    #[test]
    fn nested_objects_are_taken_out() {
        let mut params = params(serde_json::json!({
            "name": "PAINT_body",
            "nodes": [{ "type": "principled", "roughness": 0.3 }],
        }));
        let mut nodes = params.take_object_array("nodes").unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].get_str("type").unwrap(), "principled");
        assert_eq!(params.unused_keys(), vec!["name".to_owned()]);
    }

    #[test]
    fn unused_keys_skip_comments() {
        let mut params = params(serde_json::json!({
            "name": "wheel",
            "#note": "ignored",
            "extra": true,
        }));
        params.get_str("name").unwrap();
        assert_eq!(params.unused_keys(), vec!["extra".to_owned()]);
    }
}
