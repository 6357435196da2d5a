//! Result integration.
//!
//! Merges extracted type descriptors and resolver fields into base types,
//! input types and type extensions, then checks every default value. The
//! integrator never stops early: it always returns a complete result so the
//! caller can report every problem in one pass.
//!
//! Base types and input types come out sorted by name. Type extensions are
//! merged per target and sorted by target, with fields sorted by name, so the
//! result does not depend on input order.

use crate::defaults::{validate_default_value, InputObjectShape, ValidationContext};
use crate::scalars::ScalarDescriptor;
use crate::types::{
    FieldDescriptor, FieldTypeRef, LiteralValue, ResolverFieldDescriptor, TypeBody,
    TypeDescriptor, TypeExtension,
};
use gqlkit_core::{codes, Diagnostic, DiagnosticBag, SourceLocation};
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Root query type name.
pub const QUERY_TYPE: &str = "Query";
/// Root mutation type name.
pub const MUTATION_TYPE: &str = "Mutation";

/// Resolver fields as classified by the extractor.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct ResolverBuckets {
    pub query_fields: Vec<ResolverFieldDescriptor>,
    pub mutation_fields: Vec<ResolverFieldDescriptor>,
    pub type_extensions: Vec<TypeExtension>,
}

/// Everything the later stages need, assembled once.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct IntegrationResult {
    pub base_types: Vec<TypeDescriptor>,
    pub input_types: Vec<TypeDescriptor>,
    pub type_extensions: Vec<TypeExtension>,
    pub scalars: Vec<ScalarDescriptor>,
    pub has_query: bool,
    pub has_mutation: bool,
    pub has_errors: bool,
    /// Upstream diagnostics followed by integration diagnostics, not deduplicated.
    pub diagnostics: Vec<Diagnostic>,
}

/// Integrates types, resolver fields and scalars.
///
/// `upstream` diagnostics (extractor, scalar collection) are passed through
/// ahead of the ones produced here.
pub fn integrate(
    types: &[TypeDescriptor],
    resolvers: &ResolverBuckets,
    scalars: &[ScalarDescriptor],
    upstream: &[Diagnostic],
) -> IntegrationResult {
    let mut diagnostics = DiagnosticBag::from(upstream.to_vec());

    let (mut input_types, mut base_types): (Vec<_>, Vec<_>) =
        types.iter().cloned().partition(|ty| ty.kind().is_input());

    let targets_root =
        |root: &str| resolvers.type_extensions.iter().any(|e| e.target_type_name == root);
    let has_query = !resolvers.query_fields.is_empty() || targets_root(QUERY_TYPE);
    let has_mutation = !resolvers.mutation_fields.is_empty() || targets_root(MUTATION_TYPE);
    for (present, root) in [(has_query, QUERY_TYPE), (has_mutation, MUTATION_TYPE)] {
        if present && !base_types.iter().any(|ty| ty.name == root) {
            base_types.push(TypeDescriptor::object(root, Vec::new(), ""));
        }
    }

    base_types.sort_by(|a, b| a.name.cmp(&b.name));
    input_types.sort_by(|a, b| a.name.cmp(&b.name));

    let known_type_names: FxHashSet<&str> = base_types
        .iter()
        .chain(input_types.iter())
        .map(|ty| ty.name.as_str())
        .collect();

    // One extension per target, targets and fields in name order.
    let mut merged: BTreeMap<String, Vec<ResolverFieldDescriptor>> = BTreeMap::new();
    if has_query {
        merged
            .entry(QUERY_TYPE.to_string())
            .or_default()
            .extend(resolvers.query_fields.iter().cloned());
    }
    if has_mutation {
        merged
            .entry(MUTATION_TYPE.to_string())
            .or_default()
            .extend(resolvers.mutation_fields.iter().cloned());
    }

    let mut extensions: Vec<&TypeExtension> = resolvers.type_extensions.iter().collect();
    extensions.sort_by(|a, b| {
        a.target_type_name
            .cmp(&b.target_type_name)
            .then_with(|| field_names(a).cmp(field_names(b)))
    });

    let mut dropped = 0usize;
    for extension in extensions {
        let target = extension.target_type_name.as_str();
        if is_root_type(target) || known_type_names.contains(target) {
            merged
                .entry(target.to_string())
                .or_default()
                .extend(extension.fields.iter().cloned());
            continue;
        }
        dropped += 1;
        let location = extension
            .fields
            .first()
            .map(|field| SourceLocation::start_of(field.source_file.clone()));
        diagnostics.error(
            codes::UNKNOWN_TARGET_TYPE,
            format!(
                "Type extension targets unknown type \"{target}\"; fields {} cannot be attached",
                extension
                    .fields
                    .iter()
                    .map(|f| format!("\"{}\"", f.name()))
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            location,
        );
    }

    let type_extensions: Vec<TypeExtension> = merged
        .into_iter()
        .map(|(target, mut fields)| {
            fields.sort_by(|a, b| {
                a.name()
                    .cmp(b.name())
                    .then_with(|| a.source_file.cmp(&b.source_file))
            });
            TypeExtension::new(target, fields)
        })
        .collect();

    let ctx = build_context(&base_types, &input_types, scalars);
    diagnostics.extend(check_defaults(&input_types, &type_extensions, &ctx));

    let has_errors = diagnostics.has_errors();

    tracing::debug!(
        errors = diagnostics.error_count(),
        base_types = base_types.len(),
        input_types = input_types.len(),
        type_extensions = type_extensions.len(),
        dropped_extensions = dropped,
        diagnostics = diagnostics.len(),
        "integrated extraction results"
    );

    IntegrationResult {
        base_types,
        input_types,
        type_extensions,
        scalars: scalars.to_vec(),
        has_query,
        has_mutation,
        has_errors,
        diagnostics: diagnostics.into_vec(),
    }
}

fn field_names(extension: &TypeExtension) -> impl Iterator<Item = &str> {
    extension.fields.iter().map(ResolverFieldDescriptor::name)
}

fn is_root_type(name: &str) -> bool {
    name == QUERY_TYPE || name == MUTATION_TYPE
}

fn build_context(
    base_types: &[TypeDescriptor],
    input_types: &[TypeDescriptor],
    scalars: &[ScalarDescriptor],
) -> ValidationContext {
    let mut ctx = ValidationContext::new();

    for ty in base_types.iter().chain(input_types) {
        match &ty.body {
            TypeBody::Enum { values } => {
                ctx.add_enum(
                    ty.name.clone(),
                    values.iter().map(|v| v.name.clone()).collect(),
                );
            }
            TypeBody::InputObject { fields } | TypeBody::OneOfInputObject { fields } => {
                ctx.add_input_object(
                    ty.name.clone(),
                    InputObjectShape {
                        fields: fields
                            .iter()
                            .map(|f| (f.name.clone(), f.ty.clone()))
                            .collect(),
                    },
                );
            }
            TypeBody::Object { .. } | TypeBody::Union { .. } => {}
        }
    }

    for scalar in scalars {
        ctx.add_scalar(scalar.scalar_name.clone());
    }

    ctx
}

/// One default value waiting to be checked.
struct DefaultCheck<'a> {
    ty: &'a FieldTypeRef,
    value: &'a LiteralValue,
    path: String,
    location: SourceLocation,
}

fn check_defaults(
    input_types: &[TypeDescriptor],
    type_extensions: &[TypeExtension],
    ctx: &ValidationContext,
) -> Vec<Diagnostic> {
    let mut work: Vec<DefaultCheck<'_>> = Vec::new();

    for ty in input_types {
        for field in ty.body.fields().unwrap_or_default() {
            push_check(
                &mut work,
                field,
                format!("{}.{}", ty.name, field.name),
                &ty.source_file,
            );
        }
    }

    for extension in type_extensions {
        for field in &extension.fields {
            for arg in field.args() {
                push_check(
                    &mut work,
                    arg,
                    format!("{}.{}.{}", extension.target_type_name, field.name(), arg.name),
                    &field.source_file,
                );
            }
        }
    }

    tracing::trace!(checks = work.len(), "checking default values");

    // Checks are independent; collecting keeps work-list order.
    work.par_iter()
        .map(|check| {
            validate_default_value(
                check.ty,
                check.value,
                &check.path,
                Some(&check.location),
                ctx,
            )
            .diagnostics
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

fn push_check<'a>(
    work: &mut Vec<DefaultCheck<'a>>,
    field: &'a FieldDescriptor,
    path: String,
    source_file: &str,
) {
    if let Some(value) = &field.default_value {
        work.push(DefaultCheck {
            ty: &field.ty,
            value,
            path,
            location: SourceLocation::start_of(source_file),
        });
    }
}
