//! Project-level files: build descriptors, the response envelope, the
//! application entry point, and its configuration.

use super::code_builder::CodeBuilder;
use super::java::{Imports, write_header};
use crate::domain::{ProjectLayout, ProjectSettings, derive_pascal_name};

pub const RESULT_CLASS: &str = "Result";

/// Versions pinned in the parent descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedVersions {
    pub java: &'static str,
    pub spring_boot: &'static str,
    pub mybatis_starter: &'static str,
    pub mysql_connector: &'static str,
    pub druid: &'static str,
    pub lombok: &'static str,
}

pub const PINNED_VERSIONS: PinnedVersions = PinnedVersions {
    java: "1.8",
    spring_boot: "2.7.12",
    mybatis_starter: "2.3.0",
    mysql_connector: "8.0.33",
    druid: "1.2.16",
    lombok: "1.18.28",
};

struct Dependency<'a> {
    group: &'a str,
    artifact: String,
    version: Option<&'a str>,
    /// `<type>`, set for BOM imports.
    packaging: Option<&'a str>,
    scope: Option<&'a str>,
}

impl<'a> Dependency<'a> {
    fn new(group: &'a str, artifact: impl Into<String>) -> Self {
        Self {
            group,
            artifact: artifact.into(),
            version: None,
            packaging: None,
            scope: None,
        }
    }

    fn version(mut self, version: &'a str) -> Self {
        self.version = Some(version);
        self
    }

    fn scope(mut self, scope: &'a str) -> Self {
        self.scope = Some(scope);
        self
    }

    /// BOM import: `<type>pom</type>` with `import` scope.
    fn bom(mut self) -> Self {
        self.packaging = Some("pom");
        self.scope = Some("import");
        self
    }

    fn write(&self, b: &mut CodeBuilder) {
        b.block("<dependency>", "</dependency>", |b| {
            b.line(format!("<groupId>{}</groupId>", xml(self.group)))
                .line(format!("<artifactId>{}</artifactId>", xml(&self.artifact)));
            if let Some(v) = self.version {
                b.line(format!("<version>{}</version>", xml(v)));
            }
            if let Some(t) = self.packaging {
                b.line(format!("<type>{t}</type>"));
            }
            if let Some(s) = self.scope {
                b.line(format!("<scope>{s}</scope>"));
            }
        });
    }
}

fn project_open(b: &mut CodeBuilder) {
    b.line(r#"<?xml version="1.0" encoding="UTF-8"?>"#)
        .line(r#"<project xmlns="http://maven.apache.org/POM/4.0.0" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#)
        .line(r#"         xsi:schemaLocation="http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd">"#)
        .indent()
        .line("<modelVersion>4.0.0</modelVersion>");
}

fn module_artifact(settings: &ProjectSettings, module: &str) -> String {
    format!("{}-{module}", settings.artifact_id)
}

pub(crate) fn parent_descriptor(settings: &ProjectSettings, layout: &ProjectLayout) -> String {
    let v = &PINNED_VERSIONS;
    let modules = layout.modules();
    let group = settings.group_id.as_str();

    let mut b = CodeBuilder::xml();
    project_open(&mut b);
    b.line(format!("<groupId>{}</groupId>", xml(group)))
        .line(format!("<artifactId>{}</artifactId>", xml(&settings.artifact_id)))
        .line(format!("<version>{}</version>", xml(&settings.version)))
        .line("<packaging>pom</packaging>")
        .line(format!("<name>{}</name>", xml(&settings.artifact_id)))
        .blank()
        .block("<modules>", "</modules>", |b| {
            b.each(modules.all(), |b, m| {
                b.line(format!("<module>{}</module>", xml(m)));
            });
        })
        .blank()
        .block("<properties>", "</properties>", |b| {
            b.line(format!("<java.version>{}</java.version>", v.java))
                .line("<maven.compiler.source>${java.version}</maven.compiler.source>")
                .line("<maven.compiler.target>${java.version}</maven.compiler.target>")
                .line("<project.build.sourceEncoding>UTF-8</project.build.sourceEncoding>")
                .line(format!("<spring.boot.version>{}</spring.boot.version>", v.spring_boot))
                .line(format!(
                    "<mybatis.spring.boot.version>{}</mybatis.spring.boot.version>",
                    v.mybatis_starter
                ))
                .line(format!(
                    "<mysql.connector.version>{}</mysql.connector.version>",
                    v.mysql_connector
                ))
                .line(format!("<druid.version>{}</druid.version>", v.druid))
                .line(format!("<lombok.version>{}</lombok.version>", v.lombok));
        })
        .blank()
        .block("<dependencyManagement>", "</dependencyManagement>", |b| {
            b.block("<dependencies>", "</dependencies>", |b| {
                Dependency::new("org.springframework.boot", "spring-boot-dependencies")
                    .version("${spring.boot.version}")
                    .bom()
                    .write(b);
                for module in [&modules.common, &modules.access, &modules.service] {
                    Dependency::new(group, module_artifact(settings, module))
                        .version("${project.version}")
                        .write(b);
                }
            });
        })
        .blank()
        .block("<dependencies>", "</dependencies>", |b| {
            Dependency::new("org.projectlombok", "lombok")
                .version("${lombok.version}")
                .scope("provided")
                .write(b);
        })
        .blank()
        .block("<build>", "</build>", |b| {
            b.block("<pluginManagement>", "</pluginManagement>", |b| {
                b.block("<plugins>", "</plugins>", |b| {
                    b.block("<plugin>", "</plugin>", |b| {
                        b.line("<groupId>org.springframework.boot</groupId>")
                            .line("<artifactId>spring-boot-maven-plugin</artifactId>")
                            .line("<version>${spring.boot.version}</version>");
                    });
                });
            });
        })
        .dedent()
        .line("</project>");
    b.build()
}

/// Descriptor of one module; dependencies follow the module's tier.
pub(crate) fn module_descriptor(
    settings: &ProjectSettings,
    layout: &ProjectLayout,
    module: &str,
) -> String {
    let modules = layout.modules();
    let group = settings.group_id.as_str();

    let deps: Vec<Dependency<'_>> = if module == modules.access {
        vec![
            Dependency::new(group, module_artifact(settings, &modules.common)),
            Dependency::new("org.mybatis.spring.boot", "mybatis-spring-boot-starter")
                .version("${mybatis.spring.boot.version}"),
            Dependency::new("mysql", "mysql-connector-java").version("${mysql.connector.version}"),
            Dependency::new("com.alibaba", "druid-spring-boot-starter").version("${druid.version}"),
        ]
    } else if module == modules.service {
        vec![
            Dependency::new(group, module_artifact(settings, &modules.access)),
            Dependency::new("org.springframework.boot", "spring-boot-starter"),
        ]
    } else if module == modules.api {
        vec![
            Dependency::new(group, module_artifact(settings, &modules.service)),
            Dependency::new("org.springframework.boot", "spring-boot-starter-web"),
            Dependency::new("org.springframework.boot", "spring-boot-starter-test").scope("test"),
        ]
    } else {
        Vec::new()
    };

    let mut b = CodeBuilder::xml();
    project_open(&mut b);
    b.block("<parent>", "</parent>", |b| {
        b.line(format!("<groupId>{}</groupId>", xml(group)))
            .line(format!("<artifactId>{}</artifactId>", xml(&settings.artifact_id)))
            .line(format!("<version>{}</version>", xml(&settings.version)));
    })
    .line(format!(
        "<artifactId>{}</artifactId>",
        xml(&module_artifact(settings, module))
    ))
    .blank()
    .block("<dependencies>", "</dependencies>", |b| {
        for dep in &deps {
            dep.write(b);
        }
    });

    if module == modules.api {
        b.blank().block("<build>", "</build>", |b| {
            b.block("<plugins>", "</plugins>", |b| {
                b.block("<plugin>", "</plugin>", |b| {
                    b.line("<groupId>org.springframework.boot</groupId>")
                        .line("<artifactId>spring-boot-maven-plugin</artifactId>");
                });
            });
        });
    }
    b.dedent().line("</project>");
    b.build()
}

/// `Result<T>`: `{code, message, data}` envelope returned by every endpoint.
pub(crate) fn response_envelope(layout: &ProjectLayout) -> String {
    let mut imports = Imports::new();
    imports.add("java.io.Serializable").add("lombok.Data");

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.common_package(), &imports);
    b.javadoc(["Uniform response envelope: 200/\"Success\" on success, an error code otherwise."])
        .line("@Data")
        .block(
            format!("public class {RESULT_CLASS}<T> implements Serializable {{"),
            "}",
            |b| {
                b.blank()
                    .line("private static final long serialVersionUID = 1L;")
                    .blank()
                    .line("private int code;")
                    .line("private String message;")
                    .line("private T data;")
                    .blank()
                    .block(
                        format!("private {RESULT_CLASS}(int code, String message, T data) {{"),
                        "}",
                        |b| {
                            b.line("this.code = code;")
                                .line("this.message = message;")
                                .line("this.data = data;");
                        },
                    )
                    .blank()
                    .block(
                        format!("public static <T> {RESULT_CLASS}<T> success(T data) {{"),
                        "}",
                        |b| {
                            b.line(r#"return new Result<>(200, "Success", data);"#);
                        },
                    )
                    .blank()
                    .block(
                        format!("public static {RESULT_CLASS}<Void> success() {{"),
                        "}",
                        |b| {
                            b.line(r#"return new Result<>(200, "Success", null);"#);
                        },
                    )
                    .blank()
                    .block(
                        format!("public static <T> {RESULT_CLASS}<T> error(int code, String message) {{"),
                        "}",
                        |b| {
                            b.line("return new Result<>(code, message, null);");
                        },
                    )
                    .blank();
            },
        );
    b.build()
}

/// `FooBarApplication` for artifact id `foo-bar`.
pub fn application_class_name(artifact_id: &str) -> String {
    format!("{}Application", derive_pascal_name(artifact_id))
}

pub(crate) fn application_entry(settings: &ProjectSettings, layout: &ProjectLayout) -> String {
    let class = application_class_name(&settings.artifact_id);
    let mut imports = Imports::new();
    imports
        .add("org.mybatis.spring.annotation.MapperScan")
        .add("org.springframework.boot.SpringApplication")
        .add("org.springframework.boot.autoconfigure.SpringBootApplication");

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.api_package(), &imports);
    b.line(format!(
        r#"@SpringBootApplication(scanBasePackages = "{}")"#,
        layout.namespace()
    ))
    .line(format!(r#"@MapperScan("{}")"#, layout.mapper_package()))
    .block(format!("public class {class} {{"), "}", |b| {
        b.blank()
            .block("public static void main(String[] args) {", "}", |b| {
                b.line(format!("SpringApplication.run({class}.class, args);"));
            })
            .blank();
    });
    b.build()
}

pub(crate) fn application_config(settings: &ProjectSettings, layout: &ProjectLayout) -> String {
    let ds = &settings.datasource;
    let mut b = CodeBuilder::yaml();
    b.nest("server:", |b| {
        b.line("port: 8080");
    })
    .blank()
    .nest("spring:", |b| {
        b.nest("application:", |b| {
            b.line(format!("name: {}", yaml(&settings.artifact_id)));
        })
        .nest("datasource:", |b| {
            b.line("type: com.alibaba.druid.pool.DruidDataSource")
                .line(format!("driver-class-name: {}", yaml(&ds.driver_class)))
                .line(format!("url: {}", yaml(&ds.url)))
                .line(format!("username: {}", yaml(&ds.username)))
                .line(format!("password: {}", yaml(&ds.password)));
        });
    })
    .blank()
    .nest("mybatis:", |b| {
        b.line("mapper-locations: classpath:mapper/*.xml")
            .nest("configuration:", |b| {
                b.line("map-underscore-to-camel-case: true");
            });
    })
    .blank()
    .nest("logging:", |b| {
        b.nest("level:", |b| {
            b.line(format!("{}: debug", layout.namespace()))
                .line("org.springframework: warn");
        });
    });
    b.build()
}

fn xml(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Double-quoted YAML scalar.
fn yaml(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}
