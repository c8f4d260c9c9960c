//! Core domain layer for tablesmith.
//!
//! Pure logic only: identifier conventions, the SQL type registry, the table
//! model, output layout, and pagination arithmetic. No I/O happens here;
//! metadata and filesystem access go through the ports in
//! `crate::application::ports`.

pub mod artifact;
pub mod error;
pub mod layout;
pub mod model;
pub mod naming;
pub mod paging;
pub mod types;

pub use artifact::{ArtifactKind, ArtifactSet, GeneratedArtifact, RelativePath};
pub use error::{DomainError, ErrorCategory};
pub use layout::{
    DEFAULT_DRIVER_CLASS, DEFAULT_PROJECT_VERSION, DatasourceSettings, ModuleNames, Namespace,
    ProjectLayout, ProjectSettings,
};
pub use model::{ColumnModel, PrimaryKey, TableModel, TableModelBuilder};
pub use naming::{derive_member_name, derive_pascal_name, derive_route_segment};
pub use paging::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, PageRequest, offset_for};
pub use types::{JavaType, SemanticType, SqlTypeCode, TYPE_REGISTRY, java_type_for, map_semantic_type};
