//! Lenient readers for JSON scene records.
//!
//! Every reader returns `None` when the key is absent or holds a value of the
//! wrong shape, so callers decide the fallback.

use glam::{Vec3, Vec4};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub(crate) fn read_f32(data: &Value, key: &str) -> Option<f32> {
    data.get(key)?.as_f64().map(|v| v as f32)
}

pub(crate) fn read_bool(data: &Value, key: &str) -> Option<bool> {
    data.get(key)?.as_bool()
}

pub(crate) fn read_str<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key)?.as_str()
}

/// Deserialize a single key, leaving its siblings unaffected by a failure
pub(crate) fn read_field<T: DeserializeOwned>(data: &Value, key: &str) -> Option<T> {
    let value = data.get(key)?;
    T::deserialize(value)
        .map_err(|err| log::debug!("Ignoring malformed '{}': {}", key, err))
        .ok()
}

fn read_floats<const N: usize>(data: &Value, key: &str) -> Option<[f32; N]> {
    let items = data.get(key)?.as_array()?;
    if items.len() != N {
        return None;
    }
    let mut out = [0.0; N];
    for (slot, item) in out.iter_mut().zip(items) {
        *slot = item.as_f64()? as f32;
    }
    Some(out)
}

pub(crate) fn read_vec3(data: &Value, key: &str) -> Option<Vec3> {
    read_floats::<3>(data, key).map(Vec3::from_array)
}

pub(crate) fn read_vec4(data: &Value, key: &str) -> Option<Vec4> {
    read_floats::<4>(data, key).map(Vec4::from_array)
}
