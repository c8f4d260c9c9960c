//! tablesmith core - schema-driven source generation
//!
//! Domain, code generation, and application layers of the tablesmith
//! generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         tablesmith-cli (CLI)            │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │ (SchemaIntrospector, GenerationService) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (MetadataProvider, Filesystem)      │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   tablesmith-adapters (Infrastructure)  │
//! │  (MySQL, JSON snapshot, local disk)     │
//! └─────────────────────────────────────────┘
//!
//!   codegen (ArtifactRenderer) and domain (TableModel, type mapping,
//!   layout) are pure and depend on nothing above.
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tablesmith_core::prelude::*;
//! # fn run(provider: Box<dyn MetadataProvider>, fs: Box<dyn Filesystem>) -> TsResult<()> {
//!
//! let layout = ProjectLayout::new("com.example".parse()?, ModuleNames::default())?;
//! let service = GenerationService::new(fs, ArtifactRenderer::new(layout));
//! let request = GenerationRequest {
//!     output_root: "./shop".into(),
//!     project: ProjectSettings {
//!         group_id: "com.example".into(),
//!         artifact_id: "shop".into(),
//!         version: "1.0.0-SNAPSHOT".into(),
//!         datasource: Default::default(),
//!     },
//!     scope: IntrospectScope::catalog("shop"),
//!     options: GenerateOptions::default(),
//! };
//! let report = service.generate(SchemaIntrospector::new(provider), &request)?;
//! println!("{} files", report.files_written);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod codegen;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        GenerateOptions, GenerationPlan, GenerationReport, GenerationRequest, GenerationService,
        IntrospectScope, SchemaIntrospector,
        ports::{ColumnEntry, Filesystem, MetadataProvider, TableEntry},
    };
    pub use crate::codegen::ArtifactRenderer;
    pub use crate::domain::{
        ArtifactKind, ArtifactSet, DatasourceSettings, ModuleNames, Namespace, ProjectLayout,
        ProjectSettings, SqlTypeCode, TableModel,
    };
    pub use crate::error::{TableSmithError, TsResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
