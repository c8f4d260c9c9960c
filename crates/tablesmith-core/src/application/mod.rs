//! Application layer for tablesmith.
//!
//! This layer contains:
//! - **Services**: use case orchestration (`SchemaIntrospector`, `GenerationService`)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Rules about names, types, and artifacts live in `crate::domain` and
//! `crate::codegen`; this layer only sequences them.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    GenerateOptions, GenerationPlan, GenerationReport, GenerationRequest, GenerationService,
    IntrospectScope, SchemaIntrospector,
};

pub use ports::{ColumnEntry, Filesystem, MetadataProvider, TableEntry};

pub use error::ApplicationError;
