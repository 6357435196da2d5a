//! Definition nodes of the schema document.

use gqlkit_semantic::{Deprecation, FieldTypeRef, LiteralValue};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A constant value, as used for default values and directive arguments.
pub type ConstValue = LiteralValue;

/// A complete schema document.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub definitions: Vec<Definition>,
}

impl Document {
    /// Creates a document from definitions.
    #[must_use]
    pub fn new(definitions: Vec<Definition>) -> Self {
        Self { definitions }
    }

    /// Returns the type definition (not extension) with the given name.
    #[must_use]
    pub fn type_definition(&self, name: &str) -> Option<&Definition> {
        self.definitions
            .iter()
            .find(|def| !def.is_extension() && def.name() == name)
    }

    /// Names of all type definitions, extensions excluded, in document order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.definitions
            .iter()
            .filter(|def| !def.is_extension())
            .map(Definition::name)
    }

    /// Returns true if the document has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum Definition {
    Scalar(ScalarTypeDefinition),
    Object(ObjectTypeDefinition),
    Union(UnionTypeDefinition),
    Enum(EnumTypeDefinition),
    InputObject(InputObjectTypeDefinition),
    ObjectExtension(ObjectTypeExtension),
}

impl Definition {
    /// The defined type name, or the target name for extensions.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(def) => &def.name,
            Self::Object(def) => &def.name,
            Self::Union(def) => &def.name,
            Self::Enum(def) => &def.name,
            Self::InputObject(def) => &def.name,
            Self::ObjectExtension(ext) => &ext.name,
        }
    }

    /// Returns true for `extend type` definitions.
    #[must_use]
    pub const fn is_extension(&self) -> bool {
        matches!(self, Self::ObjectExtension(_))
    }
}

/// A doc string attached to a definition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Description {
    pub value: String,
}

impl Description {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Wraps an optional description text.
    pub fn from_opt(value: Option<&str>) -> Option<Self> {
        value.map(Self::new)
    }
}

/// A directive applied to a definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Directive {
    pub name: String,
    pub arguments: Vec<DirectiveArgument>,
}

impl Directive {
    /// `@deprecated`, with a `reason` argument when one is given.
    #[must_use]
    pub fn deprecated(deprecation: &Deprecation) -> Self {
        Self {
            name: "deprecated".to_string(),
            arguments: deprecation
                .reason
                .iter()
                .map(|reason| DirectiveArgument {
                    name: "reason".to_string(),
                    value: ConstValue::String(reason.clone()),
                })
                .collect(),
        }
    }

    /// `@oneOf`.
    #[must_use]
    pub fn one_of() -> Self {
        Self {
            name: "oneOf".to_string(),
            arguments: Vec::new(),
        }
    }

    /// Deprecation directives for an optional deprecation marker.
    #[must_use]
    pub fn from_deprecation(deprecation: Option<&Deprecation>) -> Vec<Self> {
        deprecation.map(Self::deprecated).into_iter().collect()
    }
}

/// A directive argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DirectiveArgument {
    pub name: String,
    pub value: ConstValue,
}

/// A type reference with list and non-null wrappers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", content = "type"))]
pub enum Type {
    Named(String),
    List(Box<Type>),
    NonNull(Box<Type>),
}

impl Type {
    /// Wraps the type in a non-null wrapper unless `nullable`.
    #[must_use]
    pub fn with_nullability(self, nullable: bool) -> Self {
        if nullable {
            self
        } else {
            Self::NonNull(Box::new(self))
        }
    }

    /// The innermost named type.
    #[must_use]
    pub fn named_type(&self) -> &str {
        match self {
            Self::Named(name) => name,
            Self::List(inner) | Self::NonNull(inner) => inner.named_type(),
        }
    }
}

impl From<&FieldTypeRef> for Type {
    fn from(ty: &FieldTypeRef) -> Self {
        let named = Self::Named(ty.type_name.clone());
        let inner = if ty.list {
            Self::List(Box::new(named.with_nullability(ty.item_nullable())))
        } else {
            named
        };
        inner.with_nullability(ty.nullable)
    }
}

/// A field of an object type or extension.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FieldDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub arguments: Vec<InputValueDefinition>,
    pub ty: Type,
    pub directives: Vec<Directive>,
}

/// An argument or input object field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputValueDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub ty: Type,
    pub default_value: Option<ConstValue>,
    pub directives: Vec<Directive>,
}

/// An enum value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumValueDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub directives: Vec<Directive>,
}

/// Custom scalar definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScalarTypeDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub directives: Vec<Directive>,
}

/// Object type definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectTypeDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub fields: Vec<FieldDefinition>,
    pub directives: Vec<Directive>,
}

/// Union type definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct UnionTypeDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub members: Vec<String>,
    pub directives: Vec<Directive>,
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnumTypeDefinition {
    pub description: Option<Description>,
    pub name: String,
    /// Declaration order, never sorted.
    pub values: Vec<EnumValueDefinition>,
    pub directives: Vec<Directive>,
}

/// Input object type definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputObjectTypeDefinition {
    pub description: Option<Description>,
    pub name: String,
    pub fields: Vec<InputValueDefinition>,
    pub directives: Vec<Directive>,
}

/// `extend type` definition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectTypeExtension {
    pub name: String,
    pub fields: Vec<FieldDefinition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_from_field_ref() {
        let plain = Type::from(&FieldTypeRef::named("User"));
        assert_eq!(plain, Type::Named("User".into()));

        let required = Type::from(&FieldTypeRef::required("ID"));
        assert_eq!(required, Type::NonNull(Box::new(Type::Named("ID".into()))));

        let list = Type::from(&FieldTypeRef::list_of("Post", false).non_null());
        assert_eq!(
            list,
            Type::NonNull(Box::new(Type::List(Box::new(Type::NonNull(Box::new(
                Type::Named("Post".into())
            ))))))
        );
        assert_eq!(list.named_type(), "Post");
    }

    #[test]
    fn test_unspecified_item_nullability() {
        let ty = FieldTypeRef {
            type_name: "Int".to_string(),
            nullable: true,
            list: true,
            list_item_nullable: None,
        };
        assert_eq!(
            Type::from(&ty),
            Type::List(Box::new(Type::Named("Int".into())))
        );
    }

    #[test]
    fn test_deprecated_directive() {
        let bare = Directive::deprecated(&Deprecation::default());
        assert!(bare.arguments.is_empty());

        let with_reason = Directive::deprecated(&Deprecation::with_reason("use name"));
        assert_eq!(with_reason.arguments[0].name, "reason");
        assert_eq!(
            with_reason.arguments[0].value,
            ConstValue::String("use name".into())
        );
    }

    #[test]
    fn test_document_lookup() {
        let doc = Document::new(vec![
            Definition::ObjectExtension(ObjectTypeExtension {
                name: "User".into(),
                fields: vec![],
            }),
            Definition::Object(ObjectTypeDefinition {
                description: None,
                name: "User".into(),
                fields: vec![],
                directives: vec![],
            }),
        ]);

        assert!(matches!(
            doc.type_definition("User"),
            Some(Definition::Object(_))
        ));
        assert_eq!(doc.type_names().collect::<Vec<_>>(), vec!["User"]);
    }
}
