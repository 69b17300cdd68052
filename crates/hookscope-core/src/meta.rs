//! Meta bags carried by frames
//!
//! Any `Clone + Default` type can serve as a context's meta shape; a struct of
//! `Option` fields is the usual choice when the fields are known up front.
//! [`MetaMap`] is the dynamic alternative: named JSON values with typed
//! accessors.

use std::cell::RefCell;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{HookScopeError, HookScopeResult};

/// Live handle to a frame's meta
pub type MetaRef<M> = Rc<RefCell<M>>;

/// A partially populated bag of named fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaMap {
    fields: Map<String, Value>,
}

impl MetaMap {
    /// Create an empty meta map
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode the field `key` into `T`.
    ///
    /// A missing field is `Ok(None)`; a present field of the wrong shape is an
    /// error.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> HookScopeResult<Option<T>> {
        self.fields
            .get(key)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| HookScopeError::meta_decode(key, e.to_string()))
            })
            .transpose()
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set<T: Serialize>(&mut self, key: impl Into<String>, value: T) -> HookScopeResult<()> {
        let key = key.into();
        let value = serde_json::to_value(value)
            .map_err(|e| HookScopeError::meta_encode(key.as_str(), e.to_string()))?;
        self.fields.insert(key, value);
        Ok(())
    }

    /// Raw JSON value of a field
    pub fn get_value(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Store a raw JSON value
    pub fn insert_value(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.fields.insert(key.into(), value)
    }

    /// Remove a field, returning its raw value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}

impl From<Map<String, Value>> for MetaMap {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TryFrom<Value> for MetaMap {
    type Error = HookScopeError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            other => Err(HookScopeError::invalid_meta(format!(
                "expected an object, got {}",
                other
            ))),
        }
    }
}
