//! Composable shape validators over untyped JSON values.
//!
//! A validator receives the value found at a field (or `None` when the field
//! is absent) together with the field's path, and either accepts it or
//! returns the first [`PolicyError`] it finds. Validators hold no mutable
//! state and can be shared freely between policies and threads.
//!
//! ```
//! use catalog_model::validators::{array_of, optional, require_non_empty_string, ObjectShape, Validator};
//! use catalog_model::FieldPath;
//! use serde_json::json;
//!
//! let shape = ObjectShape::new()
//!     .field("type", require_non_empty_string())
//!     .field("nickname", optional(require_non_empty_string()))
//!     .field("memberOf", array_of(require_non_empty_string()));
//!
//! let spec = json!({ "type": "employee", "memberOf": ["team-a"] });
//! assert!(shape.validate(Some(&spec), &FieldPath::parse("spec")).is_ok());
//! ```

use crate::error::{PolicyError, PolicyResult};
use crate::path::FieldPath;
use serde_json::Value;

/// A single structural constraint on a field.
pub trait Validator: Send + Sync {
    /// Checks the value found at `path`; `None` means the field is absent.
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()>;
}

impl<V: Validator + ?Sized> Validator for Box<V> {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        (**self).validate(value, path)
    }
}

/// JSON type name used in `TypeMismatch` diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn present<'v>(value: Option<&'v Value>, path: &FieldPath) -> PolicyResult<&'v Value> {
    value.ok_or_else(|| PolicyError::MissingField { path: path.clone() })
}

fn mismatch(path: &FieldPath, expected: &'static str, found: &Value) -> PolicyError {
    PolicyError::TypeMismatch {
        path: path.clone(),
        expected,
        found: json_type_name(found),
    }
}

// ── Strings ──────────────────────────────────────────────────────

/// Accepts any string, including the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireString;

impl Validator for RequireString {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        match present(value, path)? {
            Value::String(_) => Ok(()),
            other => Err(mismatch(path, "a string", other)),
        }
    }
}

/// Accepts strings other than `""`. Whitespace is not trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequireNonEmptyString;

impl Validator for RequireNonEmptyString {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        match present(value, path)? {
            Value::String(s) if s.is_empty() => Err(PolicyError::EmptyValue { path: path.clone() }),
            Value::String(_) => Ok(()),
            other => Err(mismatch(path, "a string", other)),
        }
    }
}

pub fn require_string() -> RequireString {
    RequireString
}

pub fn require_non_empty_string() -> RequireNonEmptyString {
    RequireNonEmptyString
}

// ── Combinators ──────────────────────────────────────────────────

/// Lets an absent field through; a present value (even `null`) goes to the inner validator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Optional<V>(pub V);

impl<V: Validator> Validator for Optional<V> {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        match value {
            None => Ok(()),
            Some(v) => self.0.validate(Some(v), path),
        }
    }
}

pub fn optional<V: Validator>(inner: V) -> Optional<V> {
    Optional(inner)
}

/// Requires an array and checks each element in order. The first failing
/// element is reported with its index appended to the path.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayOf<V>(pub V);

impl<V: Validator> Validator for ArrayOf<V> {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        let items = match present(value, path)? {
            Value::Array(items) => items,
            other => return Err(mismatch(path, "an array", other)),
        };
        items
            .iter()
            .enumerate()
            .try_for_each(|(i, item)| self.0.validate(Some(item), &path.index(i)))
    }
}

pub fn array_of<V: Validator>(element: V) -> ArrayOf<V> {
    ArrayOf(element)
}

/// Requires a JSON object and checks the declared fields in declaration order.
///
/// Fields that are not declared are ignored.
#[derive(Default)]
pub struct ObjectShape {
    fields: Vec<(&'static str, Box<dyn Validator>)>,
}

impl ObjectShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a field. Fields are validated in the order they are declared.
    #[must_use]
    pub fn field<V: Validator + 'static>(mut self, name: &'static str, validator: V) -> Self {
        self.fields.push((name, Box::new(validator)));
        self
    }

    /// Names of the declared fields, in check order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }
}

impl std::fmt::Debug for ObjectShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectShape")
            .field("fields", &self.fields.iter().map(|(n, _)| *n).collect::<Vec<_>>())
            .finish()
    }
}

impl Validator for ObjectShape {
    fn validate(&self, value: Option<&Value>, path: &FieldPath) -> PolicyResult<()> {
        let object = match present(value, path)? {
            Value::Object(object) => object,
            other => return Err(mismatch(path, "an object", other)),
        };
        self.fields
            .iter()
            .try_for_each(|(name, validator)| validator.validate(object.get(*name), &path.key(name)))
    }
}

pub fn object_shape() -> ObjectShape {
    ObjectShape::new()
}
