use std::{
    collections::BTreeMap,
    ops::{Index, IndexMut},
};

use crate::{Vector2, Vector3, Vector4};

pub type Map = BTreeMap<String, Value>;

static NULL: Value = Value::Null;

/// A self-describing document node.
///
/// Scalars keep their printable text as the only source of truth. Typed
/// accessors parse that text on demand and hand back a zero value when it
/// does not parse, they never fail.
///
/// Reads never mutate: `get`, `get_index` and the `Index` impls return
/// `Null` for missing slots. Writing through `IndexMut`,
/// `get_or_insert_default` or `get_index_or_insert_default` converts the
/// value into the matching container and creates the slot.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(String),
    Decimal(String),
    String(String),
    Array(Vec<Value>),
    Object(Map),
}

impl Value {
    pub fn new() -> Self {
        Value::Null
    }

    /// An empty Object
    pub fn object() -> Self {
        Value::Object(Map::new())
    }

    /// An empty Array
    pub fn array() -> Self {
        Value::Array(Vec::new())
    }

    // Kind queries

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    pub fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// An Int whose text carries no sign
    pub fn is_uint(&self) -> bool {
        match self {
            Value::Int(text) => !text.starts_with('-'),
            _ => false,
        }
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, Value::Decimal(_))
    }

    pub fn is_number(&self) -> bool {
        self.is_int() || self.is_decimal()
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// True for any non-null, non-container value
    pub fn is_scalar(&self) -> bool {
        !self.is_null() && !self.is_array() && !self.is_object()
    }

    pub fn is_vector2(&self) -> bool {
        self.numeric_items(2).is_some()
    }

    pub fn is_vector3(&self) -> bool {
        self.numeric_items(3).is_some()
    }

    pub fn is_vector4(&self) -> bool {
        self.numeric_items(4).is_some()
    }

    /// Number of values directly held: 0 for Null, 1 for a scalar, the
    /// element count for containers.
    pub fn len(&self) -> usize {
        match self {
            Value::Null => 0,
            Value::Array(items) => items.len(),
            Value::Object(map) => map.len(),
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Reads

    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(key),
            _ => None,
        }
    }

    pub fn get_index(&self, index: usize) -> Option<&Value> {
        match self {
            Value::Array(items) => items.get(index),
            _ => None,
        }
    }

    /// The elements of an Array, or an empty slice for anything else
    pub fn as_array(&self) -> &[Value] {
        match self {
            Value::Array(items) => items,
            _ => &[],
        }
    }

    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// The stored text of a scalar, or `""` for Null and containers
    pub fn as_str(&self) -> &str {
        match self {
            Value::Int(text) | Value::Decimal(text) | Value::String(text) => text,
            Value::Bool(true) => "true",
            Value::Bool(false) => "false",
            _ => "",
        }
    }

    pub fn as_int(&self) -> i32 {
        self.as_str().parse().unwrap_or(0)
    }

    pub fn as_uint(&self) -> u32 {
        self.as_str().parse().unwrap_or(0)
    }

    pub fn as_float(&self) -> f32 {
        self.as_str().parse().unwrap_or(0.0)
    }

    pub fn as_double(&self) -> f64 {
        self.as_str().parse().unwrap_or(0.0)
    }

    pub fn as_bool(&self) -> bool {
        match self {
            Value::Bool(value) => *value,
            other => other.as_str() == "true",
        }
    }

    pub fn as_vector2(&self) -> Vector2 {
        match self.numeric_items(2) {
            Some(items) => Vector2::new(items[0].as_float(), items[1].as_float()),
            None => Vector2::default(),
        }
    }

    pub fn as_vector3(&self) -> Vector3 {
        match self.numeric_items(3) {
            Some(items) => Vector3::new(
                items[0].as_float(),
                items[1].as_float(),
                items[2].as_float(),
            ),
            None => Vector3::default(),
        }
    }

    pub fn as_vector4(&self) -> Vector4 {
        match self.numeric_items(4) {
            Some(items) => Vector4::new(
                items[0].as_float(),
                items[1].as_float(),
                items[2].as_float(),
                items[3].as_float(),
            ),
            None => Vector4::default(),
        }
    }

    fn numeric_items(&self, count: usize) -> Option<&[Value]> {
        match self {
            Value::Array(items) if items.len() == count && items.iter().all(Value::is_number) => {
                Some(items)
            }
            _ => None,
        }
    }

    // Writes

    /// Replaces this value entirely
    pub fn set<T: Into<Value>>(&mut self, value: T) {
        *self = value.into();
    }

    /// Returns the entry under `key`, converting this value into an Object
    /// and inserting `Null` under `key` when either is missing.
    pub fn get_or_insert_default(&mut self, key: &str) -> &mut Value {
        self.object_mut().entry(key.to_string()).or_default()
    }

    /// Returns the element at `index`, converting this value into an Array
    /// and null-filling every slot up to `index` when needed.
    pub fn get_index_or_insert_default(&mut self, index: usize) -> &mut Value {
        let items = self.array_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Null);
        }
        &mut items[index]
    }

    /// Inserts or replaces the entry under `key`
    pub fn add<K: Into<String>, T: Into<Value>>(&mut self, key: K, value: T) {
        self.object_mut().insert(key.into(), value.into());
    }

    pub fn append<T: Into<Value>>(&mut self, value: T) {
        self.array_mut().push(value.into());
    }

    /// Inserts before `index`, converting this value into an Array first.
    /// Returns false when `index` is past the end.
    pub fn insert<T: Into<Value>>(&mut self, index: usize, value: T) -> bool {
        let items = self.array_mut();
        if index > items.len() {
            return false;
        }
        items.insert(index, value.into());
        true
    }

    /// Removes the entry under `key`. An Object left empty becomes Null.
    pub fn remove_key(&mut self, key: &str) -> Option<Value> {
        let Value::Object(map) = self else {
            return None;
        };
        let removed = map.remove(key);
        if map.is_empty() {
            *self = Value::Null;
        }
        removed
    }

    /// Removes the element at `index`. An Array left empty becomes Null.
    pub fn remove_index(&mut self, index: usize) -> Option<Value> {
        let Value::Array(items) = self else {
            return None;
        };
        if index >= items.len() {
            return None;
        }
        let removed = items.remove(index);
        if items.is_empty() {
            *self = Value::Null;
        }
        Some(removed)
    }

    pub fn clear(&mut self) {
        *self = Value::Null;
    }

    fn object_mut(&mut self) -> &mut Map {
        if !self.is_object() {
            *self = Value::object();
        }
        match self {
            Value::Object(map) => map,
            _ => unreachable!("value was converted to an Object above"),
        }
    }

    fn array_mut(&mut self) -> &mut Vec<Value> {
        if !self.is_array() {
            *self = Value::array();
        }
        match self {
            Value::Array(items) => items,
            _ => unreachable!("value was converted to an Array above"),
        }
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Value {
        self.get_or_insert_default(key)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    fn index(&self, index: usize) -> &Value {
        self.get_index(index).unwrap_or(&NULL)
    }
}

impl IndexMut<usize> for Value {
    fn index_mut(&mut self, index: usize) -> &mut Value {
        self.get_index_or_insert_default(index)
    }
}

// Conversions

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::Int(value.to_string())
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, u64, usize);

// NaN and the infinities have no textual form, they are written as zero

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Value::Decimal(value.to_string())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        let value = if value.is_finite() { value } else { 0.0 };
        Value::Decimal(value.to_string())
    }
}

impl From<Vector2> for Value {
    fn from(value: Vector2) -> Self {
        Value::Array(vec![value.x.into(), value.y.into()])
    }
}

impl From<Vector3> for Value {
    fn from(value: Vector3) -> Self {
        Value::Array(vec![value.x.into(), value.y.into(), value.z.into()])
    }
}

impl From<Vector4> for Value {
    fn from(value: Vector4) -> Self {
        Value::Array(vec![
            value.x.into(),
            value.y.into(),
            value.z.into(),
            value.w.into(),
        ])
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Object(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
