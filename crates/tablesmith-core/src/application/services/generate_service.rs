//! Generation Service - main application orchestrator.
//!
//! Coordinates one generation run:
//! 1. Introspect the schema (once, connection closed afterwards)
//! 2. Render every table, and the project scaffold, into artifact sets
//! 3. Write the artifacts through the filesystem port
//!
//! Nothing is written until every table has rendered. A write failure aborts
//! the run; files already written stay on disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use super::introspect_service::{IntrospectScope, SchemaIntrospector};
use crate::{
    application::ports::Filesystem,
    codegen::ArtifactRenderer,
    domain::{ArtifactSet, DomainError, ProjectSettings, TableModel},
    error::TsResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Also emit build descriptors, the response envelope, and the
    /// application entry point.
    pub scaffold: bool,
    /// Drop tables without a primary key instead of failing.
    pub skip_keyless: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            scaffold: true,
            skip_keyless: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub output_root: PathBuf,
    pub project: ProjectSettings,
    pub scope: IntrospectScope,
    pub options: GenerateOptions,
}

/// Everything a run would write, rendered but not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    pub output_root: PathBuf,
    pub scaffold: Option<ArtifactSet>,
    pub tables: Vec<ArtifactSet>,
    /// Keyless tables dropped because of `skip_keyless`.
    pub skipped: Vec<String>,
}

impl GenerationPlan {
    /// Artifact sets in write order (scaffold first).
    pub fn sets(&self) -> impl Iterator<Item = &ArtifactSet> {
        self.scaffold.iter().chain(&self.tables)
    }

    pub fn file_count(&self) -> usize {
        self.sets().map(ArtifactSet::len).sum()
    }

    /// No two artifacts of the run, across all sets, share a path.
    pub fn ensure_unique_paths(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for path in self.sets().flat_map(ArtifactSet::paths) {
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub output_root: PathBuf,
    pub tables: Vec<String>,
    pub skipped: Vec<String>,
    pub files_written: usize,
    /// The output root existed before the run.
    pub overwrote_existing: bool,
}

pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
    renderer: ArtifactRenderer,
}

impl GenerationService {
    pub fn new(filesystem: Box<dyn Filesystem>, renderer: ArtifactRenderer) -> Self {
        Self {
            filesystem,
            renderer,
        }
    }

    pub fn renderer(&self) -> &ArtifactRenderer {
        &self.renderer
    }

    /// Whether the output root of `request` is already populated.
    pub fn output_exists(&self, request: &GenerationRequest) -> bool {
        self.filesystem.exists(&request.output_root)
    }

    /// Introspect, render, and write in one go.
    #[instrument(
        skip_all,
        fields(output = %request.output_root.display(), project = %request.project.artifact_id)
    )]
    pub fn generate(
        &self,
        introspector: SchemaIntrospector,
        request: &GenerationRequest,
    ) -> TsResult<GenerationReport> {
        let tables = introspector.introspect(&request.scope)?;
        let plan = self.plan(&tables, request)?;
        self.write(&plan, |_| {})
    }

    /// Render `tables` without touching the filesystem.
    ///
    /// Fails on the first keyless table unless `skip_keyless` is set, and
    /// when two tables would produce the same type names or paths.
    #[instrument(skip_all, fields(tables = tables.len()))]
    pub fn plan(&self, tables: &[TableModel], request: &GenerationRequest) -> TsResult<GenerationPlan> {
        let mut sets = Vec::with_capacity(tables.len());
        let mut skipped = Vec::new();
        let mut entities: HashMap<&str, &str> = HashMap::new();

        for table in tables {
            match self.renderer.render_table(table) {
                Ok(set) => {
                    if let Some(first) = entities.insert(table.entity_name(), table.source_name()) {
                        return Err(DomainError::DuplicateEntityName {
                            entity: table.entity_name().to_string(),
                            first: first.to_string(),
                            second: table.source_name().to_string(),
                        }
                        .into());
                    }
                    info!(table = table.source_name(), files = set.len(), "Rendered table");
                    sets.push(set);
                }
                Err(DomainError::MissingPrimaryKey { table: name }) if request.options.skip_keyless => {
                    warn!(table = %name, "Skipping table without a primary key");
                    skipped.push(name);
                }
                Err(e) => return Err(e.into()),
            }
        }

        let scaffold = if request.options.scaffold {
            Some(self.renderer.render_project(&request.project)?)
        } else {
            None
        };

        if sets.is_empty() {
            warn!("No tables to generate");
        }

        let plan = GenerationPlan {
            output_root: request.output_root.clone(),
            scaffold,
            tables: sets,
            skipped,
        };
        plan.ensure_unique_paths()?;
        Ok(plan)
    }

    /// Write a plan, calling `on_set` after each artifact set is on disk.
    #[instrument(skip_all, fields(output = %plan.output_root.display(), files = plan.file_count()))]
    pub fn write(
        &self,
        plan: &GenerationPlan,
        mut on_set: impl FnMut(&ArtifactSet),
    ) -> TsResult<GenerationReport> {
        let overwrote_existing = self.filesystem.exists(&plan.output_root);
        if overwrote_existing {
            warn!(
                path = %plan.output_root.display(),
                "Output directory exists, files will be overwritten"
            );
        }

        self.filesystem.create_dir_all(&plan.output_root)?;

        let mut files_written = 0;
        for set in plan.sets() {
            for artifact in &set.artifacts {
                let path = plan.output_root.join(artifact.path.as_path());
                self.write_file(&path, &artifact.content)?;
                debug!(path = %path.display(), kind = %artifact.kind, "Wrote artifact");
                files_written += 1;
            }
            on_set(set);
        }

        info!(files = files_written, "Generation completed successfully");
        Ok(GenerationReport {
            output_root: plan.output_root.clone(),
            tables: plan.tables.iter().filter_map(|s| s.table.clone()).collect(),
            skipped: plan.skipped.clone(),
            files_written,
            overwrote_existing,
        })
    }

    fn write_file(&self, path: &Path, content: &str) -> TsResult<()> {
        if let Some(parent) = path.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::{ModuleNames, ProjectLayout, SqlTypeCode};
    use crate::error::TableSmithError;
    use mockall::mock;

    mock! {
        Fs {}

        impl Filesystem for Fs {
            fn create_dir_all(&self, path: &Path) -> TsResult<()>;
            fn write_file(&self, path: &Path, content: &str) -> TsResult<()>;
            fn exists(&self, path: &Path) -> bool;
        }
    }

    fn service(fs: MockFs) -> GenerationService {
        let layout =
            ProjectLayout::new("com.example".parse().unwrap(), ModuleNames::default()).unwrap();
        GenerationService::new(Box::new(fs), ArtifactRenderer::new(layout))
    }

    fn request(options: GenerateOptions) -> GenerationRequest {
        GenerationRequest {
            output_root: PathBuf::from("/out/shop"),
            project: ProjectSettings {
                group_id: "com.example".into(),
                artifact_id: "shop".into(),
                version: "1.0.0-SNAPSHOT".into(),
                datasource: Default::default(),
            },
            scope: IntrospectScope::default(),
            options,
        }
    }

    fn keyed(name: &str) -> TableModel {
        let mut b = TableModel::builder(name, None);
        b.column("id", SqlTypeCode::BigInt, None).unwrap().primary_key("id");
        b.build().unwrap()
    }

    fn keyless(name: &str) -> TableModel {
        let mut b = TableModel::builder(name, None);
        b.column("message", SqlTypeCode::Varchar, None).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn plan_renders_scaffold_and_tables() {
        let svc = service(MockFs::new());
        let plan = svc
            .plan(&[keyed("user"), keyed("orders")], &request(GenerateOptions::default()))
            .unwrap();
        assert_eq!(plan.tables.len(), 2);
        assert_eq!(plan.scaffold.as_ref().map(ArtifactSet::len), Some(8));
        assert_eq!(plan.file_count(), 20);
    }

    #[test]
    fn keyless_table_fails_before_any_write() {
        let mut fs = MockFs::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let svc = service(fs);

        let err = svc
            .plan(&[keyed("user"), keyless("audit_log")], &request(GenerateOptions::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            TableSmithError::Domain(DomainError::MissingPrimaryKey { .. })
        ));
    }

    #[test]
    fn tables_sharing_a_type_name_fail_before_any_write() {
        let mut fs = MockFs::new();
        fs.expect_write_file().never();
        fs.expect_create_dir_all().never();
        let svc = service(fs);

        for (first, second) in [("user_info", "USER_INFO"), ("order_item", "order-item")] {
            let err = svc
                .plan(&[keyed(first), keyed(second)], &request(GenerateOptions::default()))
                .unwrap_err();
            match err {
                TableSmithError::Domain(DomainError::DuplicateEntityName {
                    first: a,
                    second: b,
                    ..
                }) => assert_eq!((a.as_str(), b.as_str()), (first, second)),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn paths_are_unique_across_sets() {
        let svc = service(MockFs::new());
        let mut plan = svc
            .plan(&[keyed("user")], &request(GenerateOptions::default()))
            .unwrap();
        assert!(plan.ensure_unique_paths().is_ok());

        plan.tables.push(plan.tables[0].clone());
        assert!(matches!(
            plan.ensure_unique_paths(),
            Err(DomainError::DuplicatePath { ref path }) if path.ends_with("User.java")
        ));
    }

    #[test]
    fn skip_keyless_drops_the_table() {
        let svc = service(MockFs::new());
        let options = GenerateOptions {
            scaffold: false,
            skip_keyless: true,
        };
        let plan = svc
            .plan(&[keyless("audit_log"), keyed("user")], &request(options))
            .unwrap();
        assert_eq!(plan.skipped, ["audit_log"]);
        assert_eq!(plan.tables.len(), 1);
        assert!(plan.scaffold.is_none());
    }

    #[test]
    fn write_puts_every_artifact_under_the_root() {
        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|path, content| path.starts_with("/out/shop") && !content.is_empty())
            .times(6)
            .returning(|_, _| Ok(()));
        let svc = service(fs);

        let options = GenerateOptions {
            scaffold: false,
            skip_keyless: false,
        };
        let plan = svc.plan(&[keyed("user")], &request(options)).unwrap();
        let mut seen = Vec::new();
        let report = svc
            .write(&plan, |set| seen.push(set.table.clone()))
            .unwrap();

        assert_eq!(report.files_written, 6);
        assert!(report.overwrote_existing);
        assert_eq!(report.tables, ["user"]);
        assert_eq!(seen, [Some("user".to_string())]);
    }

    #[test]
    fn write_failure_aborts() {
        let mut fs = MockFs::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_write_file().times(1).returning(|path, _| {
            Err(ApplicationError::FilesystemError {
                path: path.to_path_buf(),
                reason: "disk full".into(),
            }
            .into())
        });
        let svc = service(fs);

        let plan = svc
            .plan(&[keyed("user")], &request(GenerateOptions::default()))
            .unwrap();
        let err = svc.write(&plan, |_| {}).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
