//! Artifact rendering.
//!
//! [`ArtifactRenderer`] turns one [`TableModel`] into a fixed set of six
//! cross-referencing artifacts (entity, mapper interface, mapper XML, service
//! interface, service implementation, controller) and the project settings
//! into the scaffold files. Rendering is pure: the same model always yields
//! byte-identical output, and tables never influence each other.

pub mod code_builder;
pub mod java;
pub mod mapper_xml;
pub mod query;
pub mod scaffold;

mod access;
mod controller;
mod entity;
mod service;

pub use code_builder::{CodeBuilder, Indent};
pub use query::{BoundSql, Fragment, QueryMapping, Statement, StatementKind};
pub use scaffold::{PINNED_VERSIONS, application_class_name};

use tracing::debug;

use crate::domain::{
    ArtifactKind, ArtifactSet, DomainError, GeneratedArtifact, ProjectLayout, ProjectSettings,
    TableModel,
};

/// Operation names shared by the mapper interface, the mapper XML, and the
/// service layer.
pub mod ops {
    pub const INSERT_SELECTIVE: &str = "insertSelective";
    pub const DELETE_BY_ID: &str = "deleteById";
    pub const UPDATE_BY_ID_SELECTIVE: &str = "updateByIdSelective";
    pub const FIND_BY_ID: &str = "findById";
    pub const FIND_LIST: &str = "findList";

    pub const CREATE: &str = "create";
    pub const REMOVE_BY_ID: &str = "removeById";
    pub const UPDATE_BY_ID: &str = "updateById";
    pub const GET_BY_ID: &str = "getById";
    pub const GET_LIST: &str = "getList";
}

#[derive(Debug, Clone)]
pub struct ArtifactRenderer {
    layout: ProjectLayout,
}

impl ArtifactRenderer {
    pub fn new(layout: ProjectLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// Structured mapper document for `table` (what the XML artifact renders).
    pub fn query_mapping(&self, table: &TableModel) -> Result<QueryMapping, DomainError> {
        let pk = table.require_primary_key()?;
        Ok(mapper_xml::build(table, pk, &self.layout))
    }

    /// Render the per-table artifact set.
    ///
    /// Fails with `MissingPrimaryKey` for keyless tables and with
    /// `ReservedTypeName` when the entity would clash with a type the
    /// sources already reference.
    pub fn render_table(&self, table: &TableModel) -> Result<ArtifactSet, DomainError> {
        let pk = table.require_primary_key()?;
        let layout = &self.layout;
        let entity = table.entity_name();
        if java::is_referenced_type(entity) {
            return Err(DomainError::ReservedTypeName {
                table: table.source_name().to_string(),
                entity: entity.to_string(),
            });
        }

        let mut set = ArtifactSet::for_table(table.source_name());
        for kind in ArtifactKind::PER_TABLE {
            let content = match kind {
                ArtifactKind::Entity => entity::render(table, layout),
                ArtifactKind::AccessInterface => access::render(table, pk, layout),
                ArtifactKind::QueryMapping => mapper_xml::build(table, pk, layout).to_xml(),
                ArtifactKind::ServiceInterface => service::render_interface(table, pk, layout),
                ArtifactKind::ServiceImpl => service::render_impl(table, pk, layout),
                ArtifactKind::Controller => controller::render(table, pk, layout),
                _ => continue,
            };
            let path = layout.artifact_path(kind, entity)?;
            debug!(table = table.source_name(), kind = %kind, path = %path, "rendered artifact");
            set.push(GeneratedArtifact::new(kind, path, content));
        }
        set.validate()?;
        Ok(set)
    }

    /// Render the project scaffold: build descriptors, response envelope,
    /// application entry point, and application configuration.
    pub fn render_project(&self, settings: &ProjectSettings) -> Result<ArtifactSet, DomainError> {
        let layout = &self.layout;
        let mut set = ArtifactSet::project().with(GeneratedArtifact::new(
            ArtifactKind::BuildDescriptor,
            layout.descriptor_path(None)?,
            scaffold::parent_descriptor(settings, layout),
        ));
        for module in layout.modules().all() {
            set.push(GeneratedArtifact::new(
                ArtifactKind::BuildDescriptor,
                layout.descriptor_path(Some(module))?,
                scaffold::module_descriptor(settings, layout, module),
            ));
        }
        set.push(GeneratedArtifact::new(
            ArtifactKind::ResponseEnvelope,
            layout.artifact_path(ArtifactKind::ResponseEnvelope, scaffold::RESULT_CLASS)?,
            scaffold::response_envelope(layout),
        ));
        set.push(GeneratedArtifact::new(
            ArtifactKind::ApplicationEntry,
            layout.artifact_path(
                ArtifactKind::ApplicationEntry,
                &application_class_name(&settings.artifact_id),
            )?,
            scaffold::application_entry(settings, layout),
        ));
        set.push(GeneratedArtifact::new(
            ArtifactKind::ApplicationConfig,
            layout.artifact_path(ArtifactKind::ApplicationConfig, "")?,
            scaffold::application_config(settings, layout),
        ));
        set.validate()?;
        Ok(set)
    }
}
