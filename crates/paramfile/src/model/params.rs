//! Declared parameters and the mappings produced by a load.

use std::collections::BTreeMap;

use super::value::{Value, ValueKind};
use crate::error::ParamError;

/// Name → value mapping. Used for overrides, results and undeclared entries.
pub type Params = BTreeMap<String, Value>;

/// One declared parameter: its type tag and fallback value.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub kind: ValueKind,
    pub default: Value,
}

impl ParamSpec {
    /// Declare a parameter whose kind is taken from its default value.
    pub fn inferred(default: impl Into<Value>) -> Self {
        let default = default.into();
        Self {
            kind: default.kind(),
            default,
        }
    }

    /// Declare parameter `name` with an explicit kind. A `None` default is
    /// always accepted; any other default must already be of `kind`.
    pub fn typed(
        name: &str,
        kind: ValueKind,
        default: impl Into<Value>,
    ) -> Result<Self, ParamError> {
        let default = default.into();
        if default.is_none() || default.kind() == kind {
            Ok(Self { kind, default })
        } else {
            Err(ParamError::InvalidDefault {
                name: name.to_string(),
                expected: kind,
                found: default.kind(),
            })
        }
    }

    pub fn accepts(&self, value: &Value) -> bool {
        value.kind() == self.kind
    }
}

/// The expected parameters of a program, keyed by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Defaults {
    specs: BTreeMap<String, ParamSpec>,
}

impl Defaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter whose kind is inferred from `default`.
    pub fn with(mut self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.specs.insert(name.into(), ParamSpec::inferred(default));
        self
    }

    /// Add a parameter with an explicit kind.
    pub fn with_typed(
        mut self,
        name: impl Into<String>,
        kind: ValueKind,
        default: impl Into<Value>,
    ) -> Result<Self, ParamError> {
        let name = name.into();
        let spec = ParamSpec::typed(&name, kind, default)?;
        self.specs.insert(name, spec);
        Ok(self)
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: ParamSpec) -> Option<ParamSpec> {
        self.specs.insert(name.into(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParamSpec)> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Every parameter at its default value.
    pub fn values(&self) -> Params {
        self.specs
            .iter()
            .map(|(name, spec)| (name.clone(), spec.default.clone()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Defaults {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Defaults::new(), |acc, (name, default)| acc.with(name, default))
    }
}

impl From<Params> for Defaults {
    fn from(params: Params) -> Self {
        params.into_iter().collect()
    }
}
