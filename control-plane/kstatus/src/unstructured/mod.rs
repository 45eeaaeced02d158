mod object;

pub use object::{ObjectRef, Unstructured};

use serde_json::{Map, Value};
use tracing::warn;

/// A JSON object node of an untyped resource tree.
pub type Object = Map<String, Value>;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessorError {
    #[error("{path} accessor error: value is of the type {found}, expected object")]
    NotAnObject { path: String, found: &'static str },
    #[error("{path} accessor error: value is of the type {found}, expected array")]
    NotAList { path: String, found: &'static str },
    #[error(
        "{path} accessor error: {path}[{index}] is of the type {found}, expected object"
    )]
    NotAMap {
        path: String,
        index: usize,
        found: &'static str,
    },
}

fn json_path(fields: &[&str]) -> String {
    format!(".{}", fields.join("."))
}

fn split_path(path: &str) -> Vec<&str> {
    let mut fields: Vec<&str> = path.split('.').collect();
    if fields.first() == Some(&"") {
        fields.remove(0);
    }
    fields
}

pub(crate) fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Walk `fields` from `obj`. `Ok(None)` when any segment is missing or null,
/// `Err` when an intermediate segment exists but is not an object.
pub fn nested_field_checked<'a>(
    obj: &'a Object,
    fields: &[&str],
) -> Result<Option<&'a Value>, AccessorError> {
    let Some((last, parents)) = fields.split_last() else {
        return Ok(None);
    };
    let mut cur = obj;
    for (i, field) in parents.iter().enumerate() {
        match cur.get(*field) {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::Object(m)) => cur = m,
            Some(other) => {
                return Err(AccessorError::NotAnObject {
                    path: json_path(&fields[..=i]),
                    found: type_name(other),
                });
            }
        }
    }
    match cur.get(*last) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => Ok(Some(v)),
    }
}

/// Lenient lookup: anything that is not reachable reads as absent.
pub fn nested_field<'a>(obj: &'a Object, fields: &[&str]) -> Option<&'a Value> {
    nested_field_checked(obj, fields).ok().flatten()
}

/// Returns the list of objects stored at `fields`.
///
/// `Ok(None)` means the path is absent. A value that is present but is not
/// an array, or an array holding a non-object element, is an error naming
/// the path (and index).
pub fn nested_map_slice<'a>(
    obj: &'a Object,
    fields: &[&str],
) -> Result<Option<Vec<&'a Object>>, AccessorError> {
    let Some(val) = nested_field_checked(obj, fields)? else {
        return Ok(None);
    };
    let Value::Array(items) = val else {
        return Err(AccessorError::NotAList {
            path: json_path(fields),
            found: type_name(val),
        });
    };
    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Object(m) => out.push(m),
            other => {
                return Err(AccessorError::NotAMap {
                    path: json_path(fields),
                    index,
                    found: type_name(other),
                });
            }
        }
    }
    Ok(Some(out))
}

/// Value at `path` when it is a string, `default` otherwise.
pub fn get_string_field(obj: &Object, path: &str, default: &str) -> String {
    match nested_field(obj, &split_path(path)) {
        Some(Value::String(s)) => s.clone(),
        _ => default.to_string(),
    }
}

/// Value at `path` when it is an integer that fits in `i64`, `default`
/// otherwise. Floating point numbers read as absent.
pub fn get_int_field(obj: &Object, path: &str, default: i64) -> i64 {
    match nested_field(obj, &split_path(path)) {
        Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
        _ => default,
    }
}

/// Entries of `status.conditions`. A malformed list is logged and read as
/// empty so that evaluators see "no conditions" rather than failing.
pub fn get_conditions(obj: &Object) -> Vec<&Object> {
    match nested_map_slice(obj, &["status", "conditions"]) {
        Ok(Some(conditions)) => conditions,
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!(error = %e, "ignoring malformed status.conditions");
            Vec::new()
        }
    }
}
