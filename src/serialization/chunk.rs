use serde::{
    Deserialize,
    Serialize
};
use uuid::Uuid;

use crate::serialization::chunkerror::ChunkError;

/// Point record kept with its z coordinate for format compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point3D {
    pub fn new(x: f64, y: f64, z: f64) -> Point3D {
        Point3D { x, y, z }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ChunkValue {
    Boolean(bool),
    Int32(i32),
    Double(f64),
    Point3d(Point3D),
    Guid(Uuid),
}

impl ChunkValue {
    fn type_name(&self) -> &'static str {
        match self {
            ChunkValue::Boolean(_) => "boolean",
            ChunkValue::Int32(_) => "int32",
            ChunkValue::Double(_) => "double",
            ChunkValue::Point3d(_) => "point3d",
            ChunkValue::Guid(_) => "guid",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChunkItem {
    key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    index: Option<i32>,
    value: ChunkValue,
}

/// Flat named-field record. Fields are addressed by key, or by key and index for lists
/// such as `pt[0]`, `pt[1]`, ...
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Chunk {
    name: String,
    items: Vec<ChunkItem>,
}

impl Chunk {
    pub fn new(name: &str) -> Chunk {
        Chunk {
            name: name.to_owned(),
            items: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.items.iter().any(|item| item.key == key)
    }

    fn set(&mut self, key: &str, index: Option<i32>, value: ChunkValue) {
        match self.items.iter_mut().find(|item| item.key == key && item.index == index) {
            Some(item) => item.value = value,
            None => self.items.push(ChunkItem {
                key: key.to_owned(),
                index,
                value,
            }),
        }
    }

    fn get(&self, key: &str, index: Option<i32>) -> Result<&ChunkValue, ChunkError> {
        self.items
            .iter()
            .find(|item| item.key == key && item.index == index)
            .map(|item| &item.value)
            .ok_or_else(|| ChunkError::MissingField(display_key(key, index)))
    }

    pub fn set_boolean(&mut self, key: &str, value: bool) {
        self.set(key, None, ChunkValue::Boolean(value));
    }

    pub fn set_int32(&mut self, key: &str, value: i32) {
        self.set(key, None, ChunkValue::Int32(value));
    }

    pub fn set_double(&mut self, key: &str, value: f64) {
        self.set(key, None, ChunkValue::Double(value));
    }

    pub fn set_guid(&mut self, key: &str, value: Uuid) {
        self.set(key, None, ChunkValue::Guid(value));
    }

    pub fn set_point3d(&mut self, key: &str, index: i32, value: Point3D) {
        self.set(key, Some(index), ChunkValue::Point3d(value));
    }

    pub fn get_boolean(&self, key: &str) -> Result<bool, ChunkError> {
        match self.get(key, None)? {
            ChunkValue::Boolean(value) => Ok(*value),
            other => Err(mismatch(key, None, "boolean", other)),
        }
    }

    pub fn get_int32(&self, key: &str) -> Result<i32, ChunkError> {
        match self.get(key, None)? {
            ChunkValue::Int32(value) => Ok(*value),
            other => Err(mismatch(key, None, "int32", other)),
        }
    }

    pub fn get_double(&self, key: &str) -> Result<f64, ChunkError> {
        match self.get(key, None)? {
            ChunkValue::Double(value) => Ok(*value),
            other => Err(mismatch(key, None, "double", other)),
        }
    }

    pub fn get_guid(&self, key: &str) -> Result<Uuid, ChunkError> {
        match self.get(key, None)? {
            ChunkValue::Guid(value) => Ok(*value),
            other => Err(mismatch(key, None, "guid", other)),
        }
    }

    pub fn get_point3d(&self, key: &str, index: i32) -> Result<Point3D, ChunkError> {
        match self.get(key, Some(index))? {
            ChunkValue::Point3d(value) => Ok(*value),
            other => Err(mismatch(key, Some(index), "point3d", other)),
        }
    }

    pub fn to_json(&self) -> Result<String, ChunkError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Chunk, ChunkError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn display_key(key: &str, index: Option<i32>) -> String {
    match index {
        Some(i) => format!("{key}[{i}]"),
        None => key.to_owned(),
    }
}

fn mismatch(key: &str, index: Option<i32>, expected: &'static str, found: &ChunkValue) -> ChunkError {
    log::debug!("chunk field {key} holds a {}", found.type_name());
    ChunkError::TypeMismatch {
        key: display_key(key, index),
        expected,
    }
}
