//! Descriptor model for gqlkit.
//!
//! These are the shapes produced by the source extractor. The semantic layer
//! only reads them; every derived structure is a new value.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Reference to a GraphQL type from a field, argument or input field.
///
/// `list_item_nullable` is only meaningful when `list` is true.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FieldTypeRef {
    pub type_name: String,
    pub nullable: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub list: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub list_item_nullable: Option<bool>,
}

impl FieldTypeRef {
    /// A nullable, non-list reference.
    pub fn named(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: true,
            list: false,
            list_item_nullable: None,
        }
    }

    /// A non-null, non-list reference.
    pub fn required(type_name: impl Into<String>) -> Self {
        Self::named(type_name).non_null()
    }

    /// A nullable list of `type_name`.
    pub fn list_of(type_name: impl Into<String>, item_nullable: bool) -> Self {
        Self {
            type_name: type_name.into(),
            nullable: true,
            list: true,
            list_item_nullable: Some(item_nullable),
        }
    }

    /// Returns the same reference marked non-null.
    #[must_use]
    pub fn non_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Whether list items may be null. Unspecified item nullability counts as nullable.
    #[must_use]
    pub fn item_nullable(&self) -> bool {
        self.list_item_nullable.unwrap_or(true)
    }

    /// The type of a single list element.
    #[must_use]
    pub fn element_type(&self) -> Self {
        Self {
            type_name: self.type_name.clone(),
            nullable: self.item_nullable(),
            list: false,
            list_item_nullable: None,
        }
    }
}

/// Deprecation marker, with an optional reason.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deprecation {
    pub reason: Option<String>,
}

impl Deprecation {
    pub fn with_reason(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }
}

/// A literal used as a default value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", content = "value", rename_all = "camelCase")
)]
pub enum LiteralValue {
    Null,
    String(String),
    Int(i64),
    Float(f64),
    Boolean(bool),
    Enum(String),
    List(Vec<LiteralValue>),
    Object(Vec<ObjectFieldLiteral>),
}

impl LiteralValue {
    /// Short name of the literal kind, used in diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Boolean(_) => "boolean",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
            Self::Object(_) => "object",
        }
    }

    /// Whether every float in the literal, nested ones included, is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        match self {
            Self::Float(n) => n.is_finite(),
            Self::List(items) => items.iter().all(Self::is_finite),
            Self::Object(fields) => fields.iter().all(|field| field.value.is_finite()),
            _ => true,
        }
    }

    /// Builds an object literal from `(name, value)` pairs.
    pub fn object<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = (S, LiteralValue)>,
        S: Into<String>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(name, value)| ObjectFieldLiteral {
                    name: name.into(),
                    value,
                })
                .collect(),
        )
    }
}

/// A single `name: value` entry of an object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjectFieldLiteral {
    pub name: String,
    pub value: LiteralValue,
}

/// A field of an object or input object type, or a resolver argument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FieldDescriptor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub ty: FieldTypeRef,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: Option<Deprecation>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub default_value: Option<LiteralValue>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: FieldTypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            description: None,
            deprecated: None,
            default_value: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_deprecated(mut self, deprecation: Deprecation) -> Self {
        self.deprecated = Some(deprecation);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: LiteralValue) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// A field contributed by a resolver declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ResolverFieldDescriptor {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub field: FieldDescriptor,
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: Option<Vec<FieldDescriptor>>,
    pub source_file: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resolver_export_name: Option<String>,
}

impl ResolverFieldDescriptor {
    pub fn new(field: FieldDescriptor, source_file: impl Into<String>) -> Self {
        Self {
            field,
            args: None,
            source_file: source_file.into(),
            resolver_export_name: None,
        }
    }

    #[must_use]
    pub fn with_args(mut self, args: Vec<FieldDescriptor>) -> Self {
        self.args = Some(args);
        self
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Arguments, empty when the resolver takes none.
    #[must_use]
    pub fn args(&self) -> &[FieldDescriptor] {
        self.args.as_deref().unwrap_or_default()
    }
}

/// An enum member.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct EnumValueDescriptor {
    pub name: String,
    /// The value as written in source, e.g. a string or numeric enum member.
    pub original_value: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: Option<Deprecation>,
}

impl EnumValueDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            original_value: name.clone(),
            name,
            description: None,
            deprecated: None,
        }
    }
}

/// The kind of a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Object,
    Union,
    Enum,
    InputObject,
    OneOfInputObject,
}

impl TypeKind {
    /// Returns true for input object kinds.
    #[must_use]
    pub const fn is_input(self) -> bool {
        matches!(self, Self::InputObject | Self::OneOfInputObject)
    }
}

/// Kind-specific contents of a declared type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind"))]
pub enum TypeBody {
    Object {
        fields: Vec<FieldDescriptor>,
    },
    Union {
        #[cfg_attr(feature = "serde", serde(rename = "unionMembers"))]
        members: Vec<String>,
    },
    Enum {
        #[cfg_attr(feature = "serde", serde(rename = "enumValues"))]
        values: Vec<EnumValueDescriptor>,
    },
    InputObject {
        fields: Vec<FieldDescriptor>,
    },
    OneOfInputObject {
        fields: Vec<FieldDescriptor>,
    },
}

impl TypeBody {
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        match self {
            Self::Object { .. } => TypeKind::Object,
            Self::Union { .. } => TypeKind::Union,
            Self::Enum { .. } => TypeKind::Enum,
            Self::InputObject { .. } => TypeKind::InputObject,
            Self::OneOfInputObject { .. } => TypeKind::OneOfInputObject,
        }
    }

    /// Fields of object and input object types.
    #[must_use]
    pub fn fields(&self) -> Option<&[FieldDescriptor]> {
        match self {
            Self::Object { fields }
            | Self::InputObject { fields }
            | Self::OneOfInputObject { fields } => Some(fields),
            Self::Union { .. } | Self::Enum { .. } => None,
        }
    }
}

/// A user-declared type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TypeDescriptor {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub body: TypeBody,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: Option<Deprecation>,
    pub source_file: String,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>, body: TypeBody, source_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body,
            description: None,
            deprecated: None,
            source_file: source_file.into(),
        }
    }

    pub fn object(
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        source_file: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeBody::Object { fields }, source_file)
    }

    pub fn input_object(
        name: impl Into<String>,
        fields: Vec<FieldDescriptor>,
        source_file: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeBody::InputObject { fields }, source_file)
    }

    pub fn enumeration(
        name: impl Into<String>,
        values: Vec<EnumValueDescriptor>,
        source_file: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeBody::Enum { values }, source_file)
    }

    pub fn union(
        name: impl Into<String>,
        members: Vec<String>,
        source_file: impl Into<String>,
    ) -> Self {
        Self::new(name, TypeBody::Union { members }, source_file)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.body.kind()
    }
}

/// Fields contributed to an existing type from resolver declarations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct TypeExtension {
    pub target_type_name: String,
    pub fields: Vec<ResolverFieldDescriptor>,
}

impl TypeExtension {
    pub fn new(target_type_name: impl Into<String>, fields: Vec<ResolverFieldDescriptor>) -> Self {
        Self {
            target_type_name: target_type_name.into(),
            fields,
        }
    }
}
