use std::collections::BTreeSet;

use super::code_builder::CodeBuilder;
use crate::domain::JavaType;

/// Simple type names the per-table sources use besides the entity's own
/// types. An entity named after one of them would clash with its import or
/// shadow it.
pub const REFERENCED_TYPES: &[&str] = &[
    // java.lang and member types
    "Boolean", "Double", "Float", "Integer", "Long", "Object", "Override", "String",
    "BigDecimal", "LocalDate", "LocalDateTime", "LocalTime", "List", "Serializable",
    // Lombok, MyBatis, Spring
    "Data", "Mapper", "Param", "Autowired", "Service", "RestController", "RequestMapping",
    "GetMapping", "PostMapping", "PutMapping", "DeleteMapping", "PathVariable", "RequestBody",
    "RequestParam",
    // common module
    "Result",
];

pub fn is_referenced_type(name: &str) -> bool {
    REFERENCED_TYPES.contains(&name)
}

/// Sorted, de-duplicated import list of one compilation unit.
#[derive(Debug, Default, Clone)]
pub struct Imports(BTreeSet<String>);

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, fqn: impl Into<String>) -> &mut Self {
        self.0.insert(fqn.into());
        self
    }

    /// Import `ty` unless it lives in `java.lang`.
    pub fn add_type(&mut self, ty: JavaType) -> &mut Self {
        if let Some(fqn) = ty.import {
            self.add(fqn);
        }
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// `package` line followed by the import block.
pub fn write_header(b: &mut CodeBuilder, package: &str, imports: &Imports) {
    b.line(format!("package {package};")).blank();
    if imports.0.is_empty() {
        return;
    }
    b.each(imports.iter(), |b, fqn| {
        b.line(format!("import {fqn};"));
    })
    .blank();
}
