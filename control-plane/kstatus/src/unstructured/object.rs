use std::fmt;

use kube::core::{DynamicObject, GroupVersionKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{Object, get_int_field, get_string_field, type_name};

/// One resource in its serialized form: an arbitrarily nested JSON object.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Unstructured(Object);

#[derive(thiserror::Error, Debug)]
#[error("resource must be a JSON object, got {found}")]
pub struct NotAnObjectError {
    pub found: &'static str,
}

impl Unstructured {
    pub fn new(object: Object) -> Self {
        Self(object)
    }

    pub fn content(&self) -> &Object {
        &self.0
    }

    pub fn into_content(self) -> Object {
        self.0
    }

    pub fn api_version(&self) -> String {
        get_string_field(&self.0, "apiVersion", "")
    }

    pub fn kind(&self) -> String {
        get_string_field(&self.0, "kind", "")
    }

    /// Splits `apiVersion` into (group, version). The core group is `""`.
    pub fn group_version(&self) -> (String, String) {
        let api_version = self.api_version();
        match api_version.split_once('/') {
            Some((group, version)) => (group.to_string(), version.to_string()),
            None => (String::new(), api_version),
        }
    }

    pub fn group(&self) -> String {
        self.group_version().0
    }

    pub fn gvk(&self) -> GroupVersionKind {
        let (group, version) = self.group_version();
        GroupVersionKind::gvk(&group, &version, &self.kind())
    }

    pub fn name(&self) -> String {
        get_string_field(&self.0, ".metadata.name", "")
    }

    pub fn namespace(&self) -> Option<String> {
        let ns = get_string_field(&self.0, ".metadata.namespace", "");
        (!ns.is_empty()).then_some(ns)
    }

    pub fn generation(&self) -> Option<i64> {
        let generation = get_int_field(&self.0, ".metadata.generation", -1);
        (generation != -1).then_some(generation)
    }

    pub fn object_ref(&self) -> ObjectRef {
        ObjectRef {
            gvk: self.gvk(),
            namespace: self.namespace(),
            name: self.name(),
        }
    }
}

impl From<Object> for Unstructured {
    fn from(object: Object) -> Self {
        Self(object)
    }
}

impl TryFrom<Value> for Unstructured {
    type Error = NotAnObjectError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(m) => Ok(Self(m)),
            other => Err(NotAnObjectError {
                found: type_name(&other),
            }),
        }
    }
}

impl TryFrom<DynamicObject> for Unstructured {
    type Error = serde_json::Error;

    fn try_from(obj: DynamicObject) -> Result<Self, Self::Error> {
        let value = serde_json::to_value(obj)?;
        serde_json::from_value(value)
    }
}

/// Identity of a resource in the object store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub gvk: GroupVersionKind,
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectRef {
    pub fn new(
        gvk: GroupVersionKind,
        namespace: Option<&str>,
        name: &str,
    ) -> Self {
        Self {
            gvk,
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.gvk.group.is_empty() {
            self.gvk.kind.clone()
        } else {
            format!("{}.{}", self.gvk.kind, self.gvk.group)
        };
        match &self.namespace {
            Some(ns) => write!(f, "{}/{}/{}", kind, ns, self.name),
            None => write!(f, "{}/{}", kind, self.name),
        }
    }
}
