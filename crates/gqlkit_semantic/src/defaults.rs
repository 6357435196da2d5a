//! Default value checking.
//!
//! Validates a literal default against the declared type of the field it is
//! attached to. Recursion follows the literal, never the type graph, so
//! self-referencing input objects cannot loop.

use crate::types::{FieldTypeRef, LiteralValue};
use gqlkit_core::{codes, Diagnostic, SourceLocation};
use rustc_hash::{FxHashMap, FxHashSet};

/// Shape of an input object as seen by the validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputObjectShape {
    pub fields: Vec<(String, FieldTypeRef)>,
}

impl InputObjectShape {
    fn field(&self, name: &str) -> Option<&FieldTypeRef> {
        self.fields
            .iter()
            .find_map(|(field_name, ty)| (field_name == name).then_some(ty))
    }
}

/// Type information available while checking defaults.
#[derive(Debug, Clone, Default)]
pub struct ValidationContext {
    /// Enum name to its value names, in declaration order.
    pub known_enums: FxHashMap<String, Vec<String>>,
    pub known_input_objects: FxHashMap<String, InputObjectShape>,
    pub custom_scalars: FxHashSet<String>,
}

impl ValidationContext {
    /// Creates an empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an enum and its value names.
    pub fn add_enum(&mut self, name: impl Into<String>, values: Vec<String>) {
        self.known_enums.insert(name.into(), values);
    }

    /// Registers an input object.
    pub fn add_input_object(&mut self, name: impl Into<String>, shape: InputObjectShape) {
        self.known_input_objects.insert(name.into(), shape);
    }

    /// Registers a custom scalar.
    pub fn add_scalar(&mut self, name: impl Into<String>) {
        self.custom_scalars.insert(name.into());
    }
}

/// Result of checking one default value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultValueValidation {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

/// Checks `value` against `field_type`.
///
/// Never fails; every problem is reported as a diagnostic and makes the
/// result invalid.
pub fn validate_default_value(
    field_type: &FieldTypeRef,
    value: &LiteralValue,
    field_path: &str,
    location: Option<&SourceLocation>,
    ctx: &ValidationContext,
) -> DefaultValueValidation {
    let mut checker = Checker {
        ctx,
        location,
        diagnostics: Vec::new(),
    };
    if value.is_finite() {
        checker.check(field_type, value, field_path);
    } else {
        checker.report(
            codes::DEFAULT_VALUE_TYPE_MISMATCH,
            format!("Default value for \"{field_path}\" contains a non-finite float"),
        );
    }

    DefaultValueValidation {
        valid: checker.diagnostics.is_empty(),
        diagnostics: checker.diagnostics,
    }
}

struct Checker<'a> {
    ctx: &'a ValidationContext,
    location: Option<&'a SourceLocation>,
    diagnostics: Vec<Diagnostic>,
}

impl Checker<'_> {
    fn check(&mut self, ty: &FieldTypeRef, value: &LiteralValue, path: &str) {
        if matches!(value, LiteralValue::Null) {
            if !ty.nullable {
                self.report(
                    codes::NULL_DEFAULT_FOR_NON_NULL,
                    format!("Default value for \"{path}\" is null, but the field is non-null"),
                );
            }
            return;
        }

        if ty.list {
            let LiteralValue::List(items) = value else {
                self.mismatch(path, &format!("[{}]", ty.type_name), value);
                return;
            };
            let element = ty.element_type();
            for (index, item) in items.iter().enumerate() {
                self.check(&element, item, &format!("{path}[{index}]"));
            }
            return;
        }

        let name = ty.type_name.as_str();

        if self.ctx.custom_scalars.contains(name) {
            return;
        }

        if let Some(accepted) = builtin_accepts(name, value) {
            if !accepted {
                self.mismatch(path, name, value);
            }
            return;
        }

        if let Some(values) = self.ctx.known_enums.get(name) {
            self.check_enum(name, values, value, path);
            return;
        }

        if let Some(shape) = self.ctx.known_input_objects.get(name) {
            self.check_input_object(name, shape, value, path);
        }

        // Anything else is an unresolved reference, reported by an earlier stage.
    }

    fn check_enum(&mut self, name: &str, values: &[String], value: &LiteralValue, path: &str) {
        let LiteralValue::Enum(member) = value else {
            self.mismatch(path, name, value);
            return;
        };
        if !values.iter().any(|v| v == member) {
            self.report(
                codes::UNKNOWN_ENUM_VALUE,
                format!(
                    "Default value for \"{path}\" uses unknown value \"{member}\" of enum {name}; valid values are: {}",
                    values.join(", ")
                ),
            );
        }
    }

    fn check_input_object(
        &mut self,
        name: &str,
        shape: &InputObjectShape,
        value: &LiteralValue,
        path: &str,
    ) {
        let LiteralValue::Object(entries) = value else {
            self.mismatch(path, name, value);
            return;
        };
        for entry in entries {
            match shape.field(&entry.name) {
                Some(field_type) => {
                    self.check(field_type, &entry.value, &format!("{path}.{}", entry.name));
                }
                None => self.report(
                    codes::INVALID_INPUT_OBJECT_FIELD,
                    format!(
                        "Default value for \"{path}\" sets field \"{}\", which does not exist on input type {name}",
                        entry.name
                    ),
                ),
            }
        }
    }

    fn mismatch(&mut self, path: &str, expected: &str, value: &LiteralValue) {
        self.report(
            codes::DEFAULT_VALUE_TYPE_MISMATCH,
            format!(
                "Default value for \"{path}\" has the wrong type: expected {expected}, got {} literal",
                value.kind_name()
            ),
        );
    }

    fn report(&mut self, code: &str, message: String) {
        self.diagnostics
            .push(Diagnostic::error(code, message).with_location_opt(self.location.cloned()));
    }
}

/// Literal compatibility for built-in scalars, `None` if `name` is not built in.
fn builtin_accepts(name: &str, value: &LiteralValue) -> Option<bool> {
    let accepted = match name {
        "String" => matches!(value, LiteralValue::String(_)),
        "Int" => matches!(value, LiteralValue::Int(_)),
        "Float" => matches!(value, LiteralValue::Int(_) | LiteralValue::Float(_)),
        "Boolean" => matches!(value, LiteralValue::Boolean(_)),
        "ID" => matches!(value, LiteralValue::String(_) | LiteralValue::Int(_)),
        _ => return None,
    };
    Some(accepted)
}
