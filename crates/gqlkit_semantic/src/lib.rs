//! Semantic analysis for gqlkit.
//!
//! This crate provides:
//! - `types`: The descriptor model handed over by the extractor
//! - `scalars`: Custom scalar collection and validation
//! - `defaults`: Default value checking against declared field types
//! - `integrate`: Merging types and resolver fields into an integration result

pub mod defaults;
pub mod integrate;
pub mod scalars;
pub mod types;

pub use defaults::{
    validate_default_value, DefaultValueValidation, InputObjectShape, ValidationContext,
};
pub use integrate::{integrate, IntegrationResult, ResolverBuckets, MUTATION_TYPE, QUERY_TYPE};
pub use scalars::{
    collect_scalars, is_builtin_scalar, DescriptionSource, ScalarCandidate, ScalarCollection,
    ScalarDescriptor, ScalarMapping, ScalarTypeRef, ScalarUsage, BUILTIN_SCALARS,
};
pub use types::{
    Deprecation, EnumValueDescriptor, FieldDescriptor, FieldTypeRef, LiteralValue,
    ObjectFieldLiteral, ResolverFieldDescriptor, TypeBody, TypeDescriptor, TypeExtension,
    TypeKind,
};
