//! Deterministic document construction.
//!
//! Output order never depends on input order:
//! - scalars, base types, input types and extensions are each sorted by name
//! - extensions of the same target are merged into one `extend type`
//! - object, input object and extension fields are sorted by name
//! - union members are sorted by name
//! - enum values keep declaration order
//!
//! No validation happens here. Callers must not build a document from an
//! integration result that has errors.

use crate::ast::{
    Definition, Description, Directive, Document, EnumTypeDefinition, EnumValueDefinition,
    FieldDefinition, InputObjectTypeDefinition, InputValueDefinition, ObjectTypeDefinition,
    ObjectTypeExtension, ScalarTypeDefinition, Type, UnionTypeDefinition,
};
use gqlkit_semantic::{
    EnumValueDescriptor, FieldDescriptor, IntegrationResult, ResolverFieldDescriptor,
    ScalarDescriptor, TypeBody, TypeDescriptor,
};
use std::collections::BTreeMap;

/// Builds the document IR for an integration result.
#[must_use]
pub fn build_document(result: &IntegrationResult) -> Document {
    debug_assert!(
        !result.has_errors,
        "document built from an integration result with errors"
    );

    let mut definitions = Vec::new();

    let mut scalars: Vec<&ScalarDescriptor> = result.scalars.iter().collect();
    scalars.sort_by(|a, b| a.scalar_name.cmp(&b.scalar_name));
    definitions.extend(scalars.into_iter().map(build_scalar));

    definitions.extend(sorted_by_name(&result.base_types).map(build_type));
    definitions.extend(sorted_by_name(&result.input_types).map(build_type));

    let mut extensions: BTreeMap<&str, Vec<FieldDefinition>> = BTreeMap::new();
    for extension in &result.type_extensions {
        extensions
            .entry(extension.target_type_name.as_str())
            .or_default()
            .extend(extension.fields.iter().map(build_resolver_field));
    }
    definitions.extend(extensions.into_iter().map(|(name, fields)| {
        Definition::ObjectExtension(ObjectTypeExtension {
            name: name.to_string(),
            fields: sorted_fields(fields.into_iter()),
        })
    }));

    tracing::debug!(definitions = definitions.len(), "built document");

    Document::new(definitions)
}

fn sorted_by_name(types: &[TypeDescriptor]) -> impl Iterator<Item = &TypeDescriptor> {
    let mut sorted: Vec<&TypeDescriptor> = types.iter().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    sorted.into_iter()
}

fn build_scalar(scalar: &ScalarDescriptor) -> Definition {
    Definition::Scalar(ScalarTypeDefinition {
        description: scalar.description().map(Description::new),
        name: scalar.scalar_name.clone(),
        directives: Vec::new(),
    })
}

fn build_type(ty: &TypeDescriptor) -> Definition {
    let description = Description::from_opt(ty.description.as_deref());
    let mut directives = Directive::from_deprecation(ty.deprecated.as_ref());
    let name = ty.name.clone();

    match &ty.body {
        TypeBody::Object { fields } => Definition::Object(ObjectTypeDefinition {
            description,
            name,
            fields: sorted_fields(fields.iter().map(|f| build_field(f, &[]))),
            directives,
        }),
        TypeBody::Union { members } => {
            let mut members = members.clone();
            members.sort();
            Definition::Union(UnionTypeDefinition {
                description,
                name,
                members,
                directives,
            })
        }
        TypeBody::Enum { values } => Definition::Enum(EnumTypeDefinition {
            description,
            name,
            values: values.iter().map(build_enum_value).collect(),
            directives,
        }),
        TypeBody::InputObject { fields } | TypeBody::OneOfInputObject { fields } => {
            if matches!(ty.body, TypeBody::OneOfInputObject { .. }) {
                directives.push(Directive::one_of());
            }
            let mut fields: Vec<InputValueDefinition> =
                fields.iter().map(build_input_value).collect();
            fields.sort_by(|a, b| a.name.cmp(&b.name));
            Definition::InputObject(InputObjectTypeDefinition {
                description,
                name,
                fields,
                directives,
            })
        }
    }
}

fn sorted_fields(fields: impl Iterator<Item = FieldDefinition>) -> Vec<FieldDefinition> {
    let mut fields: Vec<FieldDefinition> = fields.collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

fn build_resolver_field(field: &ResolverFieldDescriptor) -> FieldDefinition {
    build_field(&field.field, field.args())
}

/// Arguments keep declaration order, as positional order is meaningful to callers.
fn build_field(field: &FieldDescriptor, args: &[FieldDescriptor]) -> FieldDefinition {
    FieldDefinition {
        description: Description::from_opt(field.description.as_deref()),
        name: field.name.clone(),
        arguments: args.iter().map(build_input_value).collect(),
        ty: Type::from(&field.ty),
        directives: Directive::from_deprecation(field.deprecated.as_ref()),
    }
}

fn build_input_value(field: &FieldDescriptor) -> InputValueDefinition {
    InputValueDefinition {
        description: Description::from_opt(field.description.as_deref()),
        name: field.name.clone(),
        ty: Type::from(&field.ty),
        default_value: field.default_value.clone(),
        directives: Directive::from_deprecation(field.deprecated.as_ref()),
    }
}

fn build_enum_value(value: &EnumValueDescriptor) -> EnumValueDefinition {
    EnumValueDefinition {
        description: Description::from_opt(value.description.as_deref()),
        name: value.name.clone(),
        directives: Directive::from_deprecation(value.deprecated.as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gqlkit_semantic::{
        integrate, Deprecation, FieldTypeRef, LiteralValue, ResolverBuckets, TypeDescriptor,
        TypeExtension,
    };

    fn names(doc: &Document) -> Vec<(&'static str, String)> {
        doc.definitions
            .iter()
            .map(|def| {
                let kind = match def {
                    Definition::Scalar(_) => "scalar",
                    Definition::Object(_) => "type",
                    Definition::Union(_) => "union",
                    Definition::Enum(_) => "enum",
                    Definition::InputObject(_) => "input",
                    Definition::ObjectExtension(_) => "extend",
                };
                (kind, def.name().to_string())
            })
            .collect()
    }

    #[test]
    fn test_section_and_name_order() {
        let types = vec![
            TypeDescriptor::object("User", vec![], "user.ts"),
            TypeDescriptor::input_object("BInput", vec![], "b.ts"),
            TypeDescriptor::union("Node", vec!["User".into(), "Post".into()], "node.ts"),
            TypeDescriptor::object("Post", vec![], "post.ts"),
            TypeDescriptor::input_object("AInput", vec![], "a.ts"),
        ];
        let result = integrate(&types, &ResolverBuckets::default(), &[], &[]);
        let doc = build_document(&result);

        assert_eq!(
            names(&doc),
            vec![
                ("union", "Node".to_string()),
                ("type", "Post".to_string()),
                ("type", "User".to_string()),
                ("input", "AInput".to_string()),
                ("input", "BInput".to_string()),
            ]
        );
        let Some(Definition::Union(union)) = doc.type_definition("Node") else {
            panic!("expected union");
        };
        assert_eq!(union.members, vec!["Post", "User"]);
    }

    #[test]
    fn test_fields_sorted_enum_values_not() {
        let types = vec![
            TypeDescriptor::object(
                "User",
                vec![
                    FieldDescriptor::new("name", FieldTypeRef::named("String")),
                    FieldDescriptor::new("id", FieldTypeRef::required("ID")),
                ],
                "user.ts",
            ),
            TypeDescriptor::enumeration(
                "Priority",
                vec![
                    EnumValueDescriptor::new("LOW"),
                    EnumValueDescriptor::new("HIGH"),
                    EnumValueDescriptor::new("CRITICAL"),
                ],
                "priority.ts",
            ),
        ];
        let result = integrate(&types, &ResolverBuckets::default(), &[], &[]);
        let doc = build_document(&result);

        let Some(Definition::Object(user)) = doc.type_definition("User") else {
            panic!("expected object");
        };
        let field_names: Vec<_> = user.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(field_names, vec!["id", "name"]);

        let Some(Definition::Enum(priority)) = doc.type_definition("Priority") else {
            panic!("expected enum");
        };
        let values: Vec<_> = priority.values.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(values, vec!["LOW", "HIGH", "CRITICAL"]);
    }

    #[test]
    fn test_descriptions_and_deprecations() {
        let field = FieldDescriptor::new("legacyId", FieldTypeRef::named("String"))
            .with_description("Old identifier")
            .with_deprecated(Deprecation::with_reason("Use id"));
        let types = vec![TypeDescriptor::object("User", vec![field], "user.ts")
            .with_description("A registered user")];
        let result = integrate(&types, &ResolverBuckets::default(), &[], &[]);
        let doc = build_document(&result);

        let Some(Definition::Object(user)) = doc.type_definition("User") else {
            panic!("expected object");
        };
        assert_eq!(
            user.description,
            Some(Description::new("A registered user"))
        );
        let legacy = &user.fields[0];
        assert_eq!(legacy.description, Some(Description::new("Old identifier")));
        assert_eq!(legacy.directives[0].name, "deprecated");
        assert_eq!(legacy.directives[0].arguments.len(), 1);
    }

    #[test]
    fn test_one_of_input_gets_directive() {
        let types = vec![TypeDescriptor::new(
            "UserBy",
            TypeBody::OneOfInputObject {
                fields: vec![
                    FieldDescriptor::new("id", FieldTypeRef::named("ID")),
                    FieldDescriptor::new("email", FieldTypeRef::named("String")),
                ],
            },
            "by.ts",
        )];
        let result = integrate(&types, &ResolverBuckets::default(), &[], &[]);
        let doc = build_document(&result);

        let Some(Definition::InputObject(input)) = doc.type_definition("UserBy") else {
            panic!("expected input object");
        };
        assert_eq!(input.directives, vec![Directive::one_of()]);
        assert_eq!(input.fields[0].name, "email");
    }

    #[test]
    fn test_extensions_sorted_with_args() {
        let resolvers = ResolverBuckets {
            query_fields: vec![
                ResolverFieldDescriptor::new(
                    FieldDescriptor::new("users", FieldTypeRef::list_of("User", false)),
                    "query.ts",
                )
                .with_args(vec![
                    FieldDescriptor::new("limit", FieldTypeRef::named("Int"))
                        .with_default(LiteralValue::Int(10)),
                    FieldDescriptor::new("after", FieldTypeRef::named("String")),
                ]),
                ResolverFieldDescriptor::new(
                    FieldDescriptor::new("me", FieldTypeRef::named("User")),
                    "query.ts",
                ),
            ],
            type_extensions: vec![TypeExtension::new(
                "User",
                vec![ResolverFieldDescriptor::new(
                    FieldDescriptor::new("fullName", FieldTypeRef::required("String")),
                    "user.ts",
                )],
            )],
            ..ResolverBuckets::default()
        };
        let types = vec![TypeDescriptor::object("User", vec![], "user.ts")];
        let result = integrate(&types, &resolvers, &[], &[]);
        let doc = build_document(&result);

        let extensions: Vec<_> = doc
            .definitions
            .iter()
            .filter_map(|def| match def {
                Definition::ObjectExtension(ext) => Some(ext),
                _ => None,
            })
            .collect();
        assert_eq!(extensions.len(), 2);
        assert_eq!(extensions[0].name, "Query");
        assert_eq!(extensions[1].name, "User");

        let query_fields: Vec<_> = extensions[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(query_fields, vec!["me", "users"]);
        let args: Vec<_> = extensions[0].fields[1]
            .arguments
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(args, vec!["limit", "after"]);
        assert_eq!(
            extensions[0].fields[1].arguments[0].default_value,
            Some(LiteralValue::Int(10))
        );
    }

    #[test]
    fn test_same_target_extensions_merge_in_any_order() {
        let extension = |field: &str| {
            TypeExtension::new(
                "User",
                vec![ResolverFieldDescriptor::new(
                    FieldDescriptor::new(field, FieldTypeRef::named("String")),
                    "user.ts",
                )],
            )
        };
        let result = |extensions: Vec<TypeExtension>| IntegrationResult {
            base_types: vec![TypeDescriptor::object("User", vec![], "user.ts")],
            type_extensions: extensions,
            ..IntegrationResult::default()
        };

        let forward = build_document(&result(vec![extension("zeta"), extension("alpha")]));
        let backward = build_document(&result(vec![extension("alpha"), extension("zeta")]));
        assert_eq!(forward, backward);

        let Some(Definition::ObjectExtension(merged)) = forward.definitions.last() else {
            panic!("expected extension");
        };
        let fields: Vec<_> = merged.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(fields, vec!["alpha", "zeta"]);
        assert_eq!(forward.definitions.len(), 2);
    }
}
