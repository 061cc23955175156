/// Exposed scene properties: named getter/setter pairs over a scene type.
///
/// A scene publishes a [`PropertyTable`] so hosts and key switches can read
/// and write its state by name (`activeCamera`, `activeHelper`, ...) without
/// knowing the concrete type. Accessors are plain function pointers over the
/// scene, so the table holds no borrow of it.

use std::collections::BTreeMap;
use crate::camera::{CameraKey, HelperKey};
use crate::error::Result;
use crate::{engine_err, engine_warn};

/// Value carried by a property
#[derive(Debug, Clone, PartialEq)]
pub enum PropValue {
    Camera(CameraKey),
    Helper(HelperKey),
    Float(f32),
    Bool(bool),
    Text(String),
}

impl PropValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            PropValue::Camera(_) => "camera",
            PropValue::Helper(_) => "helper",
            PropValue::Float(_) => "float",
            PropValue::Bool(_) => "bool",
            PropValue::Text(_) => "text",
        }
    }

    pub fn as_camera(&self) -> Result<CameraKey> {
        match self {
            PropValue::Camera(key) => Ok(*key),
            other => Err(Self::mismatch("camera", other)),
        }
    }

    pub fn as_helper(&self) -> Result<HelperKey> {
        match self {
            PropValue::Helper(key) => Ok(*key),
            other => Err(Self::mismatch("helper", other)),
        }
    }

    pub fn as_float(&self) -> Result<f32> {
        match self {
            PropValue::Float(value) => Ok(*value),
            other => Err(Self::mismatch("float", other)),
        }
    }

    pub fn as_bool(&self) -> Result<bool> {
        match self {
            PropValue::Bool(value) => Ok(*value),
            other => Err(Self::mismatch("bool", other)),
        }
    }

    fn mismatch(expected: &str, got: &PropValue) -> crate::error::Error {
        engine_err!("glaxier::Props", InvalidArgument:
            "expected a {} value, got a {} value", expected, got.kind_name())
    }
}

pub type Getter<S> = fn(&S) -> PropValue;
pub type Setter<S> = fn(&mut S, PropValue) -> Result<()>;

/// Accessor pair for one named property
pub struct Property<S> {
    get: Getter<S>,
    set: Setter<S>,
}

impl<S> Clone for Property<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Property<S> {}

impl<S> Property<S> {
    pub fn new(get: Getter<S>, set: Setter<S>) -> Self {
        Self { get, set }
    }

    pub fn get(&self, target: &S) -> PropValue {
        (self.get)(target)
    }

    pub fn set(&self, target: &mut S, value: PropValue) -> Result<()> {
        (self.set)(target, value)
    }
}

/// Name → accessor pair mapping exposed by a scene
pub struct PropertyTable<S> {
    properties: BTreeMap<&'static str, Property<S>>,
}

impl<S> Clone for PropertyTable<S> {
    fn clone(&self) -> Self {
        Self { properties: self.properties.clone() }
    }
}

impl<S> PropertyTable<S> {
    pub fn new() -> Self {
        Self { properties: BTreeMap::new() }
    }

    /// Builder-style insert
    pub fn with(mut self, name: &'static str, get: Getter<S>, set: Setter<S>) -> Self {
        self.insert(name, get, set);
        self
    }

    /// Register (or replace) a property
    pub fn insert(&mut self, name: &'static str, get: Getter<S>, set: Setter<S>) {
        self.properties.insert(name, Property::new(get, set));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.properties.contains_key(name)
    }

    /// Property names in sorted order
    pub fn names(&self) -> Vec<&'static str> {
        self.properties.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    fn property(&self, name: &str) -> Result<Property<S>> {
        self.properties.get(name).copied().ok_or_else(|| {
            engine_err!("glaxier::Props", InvalidArgument: "unknown property '{}'", name)
        })
    }

    pub fn get(&self, target: &S, name: &str) -> Result<PropValue> {
        Ok(self.property(name)?.get(target))
    }

    pub fn set(&self, target: &mut S, name: &str, value: PropValue) -> Result<()> {
        self.property(name)?.set(target, value)
    }

    /// Apply every assignment as one step.
    ///
    /// All names are resolved before anything is written. If a setter fails,
    /// the properties already written are restored to their previous values
    /// (in reverse order) and the setter's error is returned. A restore that
    /// fails is logged and skipped; the remaining restores still run.
    pub fn apply_all(&self, target: &mut S, assignments: &[(String, PropValue)]) -> Result<()> {
        let resolved = assignments
            .iter()
            .map(|(name, value)| Ok((self.property(name)?, value.clone())))
            .collect::<Result<Vec<_>>>()?;

        let snapshot: Vec<PropValue> = resolved.iter().map(|(prop, _)| prop.get(target)).collect();

        for (index, (prop, value)) in resolved.iter().enumerate() {
            if let Err(err) = prop.set(target, value.clone()) {
                let undone = resolved[..index].iter().zip(&snapshot[..index]).zip(&assignments[..index]);
                for (((prop, _), previous), (name, _)) in undone.rev() {
                    if let Err(restore_err) = prop.set(target, previous.clone()) {
                        engine_warn!("glaxier::Props",
                            "Could not restore '{}' after a failed assignment: {}", name, restore_err);
                    }
                }
                return Err(err);
            }
        }
        Ok(())
    }
}

impl<S> Default for PropertyTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "props_tests.rs"]
mod tests;
