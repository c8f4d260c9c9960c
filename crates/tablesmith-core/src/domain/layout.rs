//! Where generated artifacts live.
//!
//! Output paths are a function of (module, namespace segments, artifact kind,
//! entity name). The generated project is a multi-module build:
//!
//! ```text
//! <artifact-id>/
//! ├── pom.xml
//! ├── common/   Result envelope
//! ├── dao/      entity, mapper interface, mapper XML
//! ├── service/  service interface + impl
//! └── web/      controllers, application entry, application.yml
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::artifact::{ArtifactKind, RelativePath};
use super::error::DomainError;
use super::naming::is_java_reserved;

/// A dotted Java package, e.g. `com.example.shop`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace(String);

impl Namespace {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.')
    }

    /// `com.example` -> `com/example`
    pub fn as_dir(&self) -> String {
        self.segments().collect::<Vec<_>>().join("/")
    }

    /// Sub-package, e.g. `com.example` + `dao.entity`.
    pub fn child(&self, suffix: &str) -> String {
        format!("{}.{}", self.0, suffix)
    }
}

impl FromStr for Namespace {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = |reason: &str| DomainError::InvalidNamespace {
            namespace: s.to_string(),
            reason: reason.to_string(),
        };

        if s.is_empty() {
            return Err(invalid("namespace is empty"));
        }
        for segment in s.split('.') {
            let mut chars = segment.chars();
            match chars.next() {
                None => return Err(invalid("empty segment")),
                Some(c) if !(c.is_alphabetic() || c == '_' || c == '$') => {
                    return Err(invalid("segment must start with a letter or underscore"));
                }
                _ => {}
            }
            if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
                return Err(invalid("segment contains an invalid character"));
            }
            if is_java_reserved(segment) {
                return Err(invalid("segment is a Java reserved word"));
            }
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names of the four generated modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleNames {
    pub common: String,
    pub access: String,
    pub service: String,
    pub api: String,
}

impl Default for ModuleNames {
    fn default() -> Self {
        Self {
            common: "common".into(),
            access: "dao".into(),
            service: "service".into(),
            api: "web".into(),
        }
    }
}

impl ModuleNames {
    pub fn all(&self) -> [&str; 4] {
        [&self.common, &self.access, &self.service, &self.api]
    }
}

/// Package and module conventions shared by every artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    namespace: Namespace,
    modules: ModuleNames,
}

impl ProjectLayout {
    /// Module names double as package segments and must be distinct.
    pub fn new(namespace: Namespace, modules: ModuleNames) -> Result<Self, DomainError> {
        let names = modules.all();
        for (i, name) in names.iter().enumerate() {
            let qualified = namespace.child(name);
            qualified.parse::<Namespace>()?;
            if names[..i].contains(name) {
                return Err(DomainError::InvalidNamespace {
                    namespace: qualified,
                    reason: format!("module name '{name}' is used twice"),
                });
            }
        }
        Ok(Self { namespace, modules })
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn modules(&self) -> &ModuleNames {
        &self.modules
    }

    pub fn entity_package(&self) -> String {
        self.namespace.child(&format!("{}.entity", self.modules.access))
    }

    pub fn mapper_package(&self) -> String {
        self.namespace.child(&format!("{}.mapper", self.modules.access))
    }

    pub fn service_package(&self) -> String {
        self.namespace.child(&self.modules.service)
    }

    pub fn service_impl_package(&self) -> String {
        self.namespace.child(&format!("{}.impl", self.modules.service))
    }

    pub fn controller_package(&self) -> String {
        self.namespace.child(&format!("{}.controller", self.modules.api))
    }

    pub fn common_package(&self) -> String {
        self.namespace.child(&self.modules.common)
    }

    pub fn api_package(&self) -> String {
        self.namespace.child(&self.modules.api)
    }

    /// Output path of a per-table artifact.
    pub fn artifact_path(
        &self,
        kind: ArtifactKind,
        entity_name: &str,
    ) -> Result<RelativePath, DomainError> {
        let path = match kind {
            ArtifactKind::Entity => self.java_source(&self.modules.access, &self.entity_package(), entity_name),
            ArtifactKind::AccessInterface => self.java_source(
                &self.modules.access,
                &self.mapper_package(),
                &format!("{entity_name}Mapper"),
            ),
            ArtifactKind::QueryMapping => format!(
                "{}/src/main/resources/mapper/{entity_name}Mapper.xml",
                self.modules.access
            ),
            ArtifactKind::ServiceInterface => self.java_source(
                &self.modules.service,
                &self.service_package(),
                &format!("{entity_name}Service"),
            ),
            ArtifactKind::ServiceImpl => self.java_source(
                &self.modules.service,
                &self.service_impl_package(),
                &format!("{entity_name}ServiceImpl"),
            ),
            ArtifactKind::Controller => self.java_source(
                &self.modules.api,
                &self.controller_package(),
                &format!("{entity_name}Controller"),
            ),
            ArtifactKind::ResponseEnvelope => {
                self.java_source(&self.modules.common, &self.common_package(), entity_name)
            }
            ArtifactKind::ApplicationEntry => {
                self.java_source(&self.modules.api, &self.api_package(), entity_name)
            }
            ArtifactKind::ApplicationConfig => {
                format!("{}/src/main/resources/application.yml", self.modules.api)
            }
            ArtifactKind::BuildDescriptor => "pom.xml".to_string(),
        };
        RelativePath::try_new(path)
    }

    /// `pom.xml` of a module (or of the parent when `module` is `None`).
    pub fn descriptor_path(&self, module: Option<&str>) -> Result<RelativePath, DomainError> {
        match module {
            Some(module) => RelativePath::try_new(format!("{module}/pom.xml")),
            None => RelativePath::try_new("pom.xml"),
        }
    }

    fn java_source(&self, module: &str, package: &str, type_name: &str) -> String {
        format!(
            "{module}/src/main/java/{}/{type_name}.java",
            package.replace('.', "/")
        )
    }
}

/// Coordinates and connection details of the generated project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSettings {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
    /// Datasource written into the generated `application.yml`.
    pub datasource: DatasourceSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DatasourceSettings {
    pub url: String,
    pub username: String,
    pub password: String,
    pub driver_class: String,
}

pub const DEFAULT_PROJECT_VERSION: &str = "1.0.0-SNAPSHOT";
pub const DEFAULT_DRIVER_CLASS: &str = "com.mysql.cj.jdbc.Driver";

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> ProjectLayout {
        ProjectLayout::new("com.example".parse().unwrap(), ModuleNames::default()).unwrap()
    }

    #[test]
    fn namespace_validation() {
        assert!("com.example.shop".parse::<Namespace>().is_ok());
        assert!("".parse::<Namespace>().is_err());
        assert!("com..example".parse::<Namespace>().is_err());
        assert!("com.1example".parse::<Namespace>().is_err());
        assert!("com.example-shop".parse::<Namespace>().is_err());
        assert!("com.new".parse::<Namespace>().is_err());
    }

    #[test]
    fn module_names_are_validated() {
        let ns: Namespace = "com.example".parse().unwrap();
        let clash = ModuleNames {
            service: "dao".into(),
            ..ModuleNames::default()
        };
        assert!(ProjectLayout::new(ns.clone(), clash).is_err());
        let bad = ModuleNames {
            api: "web-api".into(),
            ..ModuleNames::default()
        };
        assert!(ProjectLayout::new(ns, bad).is_err());
    }

    #[test]
    fn namespace_as_dir() {
        let ns: Namespace = "com.example.shop".parse().unwrap();
        assert_eq!(ns.as_dir(), "com/example/shop");
    }

    #[test]
    fn per_table_paths() {
        let layout = layout();
        let path = |kind| layout.artifact_path(kind, "UserInfo").unwrap().to_string();

        assert_eq!(
            path(ArtifactKind::Entity),
            "dao/src/main/java/com/example/dao/entity/UserInfo.java"
        );
        assert_eq!(
            path(ArtifactKind::AccessInterface),
            "dao/src/main/java/com/example/dao/mapper/UserInfoMapper.java"
        );
        assert_eq!(
            path(ArtifactKind::QueryMapping),
            "dao/src/main/resources/mapper/UserInfoMapper.xml"
        );
        assert_eq!(
            path(ArtifactKind::ServiceInterface),
            "service/src/main/java/com/example/service/UserInfoService.java"
        );
        assert_eq!(
            path(ArtifactKind::ServiceImpl),
            "service/src/main/java/com/example/service/impl/UserInfoServiceImpl.java"
        );
        assert_eq!(
            path(ArtifactKind::Controller),
            "web/src/main/java/com/example/web/controller/UserInfoController.java"
        );
    }

    #[test]
    fn custom_module_names_flow_into_packages() {
        let modules = ModuleNames {
            access: "persistence".into(),
            ..ModuleNames::default()
        };
        let layout = ProjectLayout::new("org.acme".parse().unwrap(), modules).unwrap();
        assert_eq!(layout.entity_package(), "org.acme.persistence.entity");
        assert_eq!(
            layout
                .artifact_path(ArtifactKind::QueryMapping, "Order")
                .unwrap()
                .to_string(),
            "persistence/src/main/resources/mapper/OrderMapper.xml"
        );
    }

    #[test]
    fn partial_module_names_fill_defaults() {
        let modules: ModuleNames = serde_json::from_str(r#"{ "api": "rest" }"#).unwrap();
        assert_eq!(modules.api, "rest");
        assert_eq!(modules.access, "dao");
        assert_eq!(modules.all(), ["common", "dao", "service", "rest"]);
    }
}
