use std::collections::{BTreeMap, HashMap};

use glam::{Mat2, Mat3, Mat4, Vec2, Vec3, Vec4};

/// A value that can be written to a shader uniform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat2(Mat2),
    Mat3(Mat3),
    Mat4(Mat4),
}

macro_rules! uniform_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(impl From<$ty> for UniformValue {
            fn from(v: $ty) -> Self {
                UniformValue::$variant(v)
            }
        })+
    };
}

uniform_from!(
    bool => Bool, i32 => Int, u32 => UInt, f32 => Float,
    Vec2 => Vec2, Vec3 => Vec3, Vec4 => Vec4,
    Mat2 => Mat2, Mat3 => Mat3, Mat4 => Mat4,
);

/// Anything that accepts uniforms by name.
pub trait UniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_bool(&mut self, name: &str, v: bool) {
        self.set_uniform(name, v.into());
    }

    fn set_int(&mut self, name: &str, v: i32) {
        self.set_uniform(name, v.into());
    }

    fn set_uint(&mut self, name: &str, v: u32) {
        self.set_uniform(name, v.into());
    }

    fn set_float(&mut self, name: &str, v: f32) {
        self.set_uniform(name, v.into());
    }

    fn set_vec3(&mut self, name: &str, v: Vec3) {
        self.set_uniform(name, v.into());
    }

    fn set_mat4(&mut self, name: &str, v: Mat4) {
        self.set_uniform(name, v.into());
    }
}

/// Sink that keeps the last value written per name.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    values: BTreeMap<String, UniformValue>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<UniformValue> {
        self.values.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl UniformSink for RecordingSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.values.insert(name.to_owned(), value);
    }
}

/// Uniform name → location, resolved once per name.
///
/// Names the program does not expose are cached as `None` so the lookup is
/// not repeated every frame.
#[derive(Debug, Default, Clone)]
pub struct UniformCache {
    locations: HashMap<String, Option<i32>>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached location for `name`, calling `resolve` on the first lookup.
    pub fn location(&mut self, name: &str, resolve: impl FnOnce(&str) -> Option<i32>) -> Option<i32> {
        if let Some(cached) = self.locations.get(name) {
            return *cached;
        }
        let location = resolve(name);
        if location.is_none() {
            tracing::debug!(uniform = name, "uniform not found in program");
        }
        self.locations.insert(name.to_owned(), location);
        location
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn clear(&mut self) {
        self.locations.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn typed_helpers_wrap_values() {
        let mut sink = RecordingSink::new();
        sink.set_float("time", 1.5);
        sink.set_bool("wireframe", true);
        sink.set_mat4("model", Mat4::IDENTITY);
        assert_eq!(sink.get("time"), Some(UniformValue::Float(1.5)));
        assert_eq!(sink.get("wireframe"), Some(UniformValue::Bool(true)));
        assert_eq!(sink.get("model"), Some(UniformValue::Mat4(Mat4::IDENTITY)));
        assert_eq!(sink.names().count(), 3);
    }

    #[test]
    fn cache_resolves_each_name_once() {
        let lookups = Cell::new(0);
        let mut cache = UniformCache::new();
        let resolve = |name: &str| {
            lookups.set(lookups.get() + 1);
            (name == "view").then_some(3)
        };
        assert_eq!(cache.location("view", resolve), Some(3));
        assert_eq!(cache.location("view", resolve), Some(3));
        assert_eq!(cache.location("missing", resolve), None);
        assert_eq!(cache.location("missing", resolve), None);
        assert_eq!(lookups.get(), 2);
        assert_eq!(cache.len(), 2);
    }
}
