use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A filesystem path guaranteed to be relative.
///
/// Invariant: Never absolute and never climbs out of its root with `..`.
/// Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.is_absolute() || path.has_root() {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        if path.components().any(|c| c == Component::ParentDir) {
            return Err(DomainError::PathEscapesRoot {
                path: path.display().to_string(),
            });
        }
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// What a generated file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    Entity,
    AccessInterface,
    QueryMapping,
    ServiceInterface,
    ServiceImpl,
    Controller,
    BuildDescriptor,
    ResponseEnvelope,
    ApplicationEntry,
    ApplicationConfig,
}

impl ArtifactKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::AccessInterface => "access-interface",
            Self::QueryMapping => "query-mapping",
            Self::ServiceInterface => "service-interface",
            Self::ServiceImpl => "service-impl",
            Self::Controller => "controller",
            Self::BuildDescriptor => "build-descriptor",
            Self::ResponseEnvelope => "response-envelope",
            Self::ApplicationEntry => "application-entry",
            Self::ApplicationConfig => "application-config",
        }
    }

    /// The six kinds rendered for every table, in write order.
    pub const PER_TABLE: [Self; 6] = [
        Self::Entity,
        Self::AccessInterface,
        Self::QueryMapping,
        Self::ServiceInterface,
        Self::ServiceImpl,
        Self::Controller,
    ];
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rendered file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedArtifact {
    pub kind: ArtifactKind,
    pub path: RelativePath,
    pub content: String,
}

impl GeneratedArtifact {
    pub fn new(kind: ArtifactKind, path: RelativePath, content: String) -> Self {
        Self {
            kind,
            path,
            content,
        }
    }
}

/// The files produced for one table, or for the project scaffold.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ArtifactSet {
    /// Source table, `None` for project-level files.
    pub table: Option<String>,
    pub artifacts: Vec<GeneratedArtifact>,
}

impl ArtifactSet {
    pub fn for_table(table: impl Into<String>) -> Self {
        Self {
            table: Some(table.into()),
            artifacts: Vec::new(),
        }
    }

    pub fn project() -> Self {
        Self::default()
    }

    pub fn with(mut self, artifact: GeneratedArtifact) -> Self {
        self.artifacts.push(artifact);
        self
    }

    pub fn push(&mut self, artifact: GeneratedArtifact) {
        self.artifacts.push(artifact);
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn get(&self, kind: ArtifactKind) -> Option<&GeneratedArtifact> {
        self.artifacts.iter().find(|a| a.kind == kind)
    }

    pub fn paths(&self) -> impl Iterator<Item = &RelativePath> {
        self.artifacts.iter().map(|a| &a.path)
    }

    /// Reject duplicate output paths.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for artifact in &self.artifacts {
            if !seen.insert(&artifact.path) {
                return Err(DomainError::DuplicatePath {
                    path: artifact.path.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(path: &str) -> GeneratedArtifact {
        GeneratedArtifact::new(
            ArtifactKind::Entity,
            RelativePath::try_new(path).unwrap(),
            String::new(),
        )
    }

    #[test]
    fn relative_path_rejects_absolute() {
        assert!(matches!(
            RelativePath::try_new("/etc/passwd"),
            Err(DomainError::AbsolutePathNotAllowed { .. })
        ));
        assert_eq!(
            RelativePath::try_new("dao/src/main").unwrap().as_path(),
            Path::new("dao/src/main")
        );
    }

    #[test]
    fn relative_path_rejects_parent_components() {
        for path in ["../pom.xml", "dao/../../etc/x", "dao/entity/.."] {
            assert!(
                matches!(
                    RelativePath::try_new(path),
                    Err(DomainError::PathEscapesRoot { .. })
                ),
                "{path}"
            );
        }
        assert!(RelativePath::try_new("dao/./entity/User.java").is_ok());
    }

    #[test]
    fn artifact_set_validates_duplicates() {
        let set = ArtifactSet::for_table("user")
            .with(artifact("a/User.java"))
            .with(artifact("a/User.java"));
        assert!(matches!(
            set.validate(),
            Err(DomainError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn artifact_set_lookup_by_kind() {
        let set = ArtifactSet::for_table("user").with(artifact("a/User.java"));
        assert!(set.get(ArtifactKind::Entity).is_some());
        assert!(set.get(ArtifactKind::Controller).is_none());
        assert!(set.validate().is_ok());
    }
}
