//! Application services - orchestrate use cases.

pub mod generate_service;
pub mod introspect_service;

pub use generate_service::{
    GenerateOptions, GenerationPlan, GenerationReport, GenerationRequest, GenerationService,
};
pub use introspect_service::{IntrospectScope, SchemaIntrospector};
