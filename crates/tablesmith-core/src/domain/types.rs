//! SQL type registry.
//!
//! Every SQL type family the generator understands is described exactly once
//! by a [`TypeDef`] in [`TYPE_REGISTRY`]. Provider values (JDBC type numbers,
//! dialect type names) resolve to a [`SqlTypeCode`] through the registry, and
//! the semantic type of a column is a lookup in the same table.
//!
//! # Adding a type
//!
//! 1. Add a variant to [`SqlTypeCode`]
//! 2. Add one [`TypeDef`] entry to [`TYPE_REGISTRY`]
//!
//! Anything that is not in the registry is [`SqlTypeCode::Other`] and maps to
//! [`SemanticType::Opaque`].

use serde::Serialize;
use std::fmt;

/// SQL type family as reported by a metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlTypeCode {
    Char,
    Varchar,
    LongVarchar,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Decimal,
    Numeric,
    Date,
    Time,
    Timestamp,
    Bit,
    Boolean,
    /// Unrecognized code; carries the provider's raw descriptor.
    Other(String),
}

/// Target-neutral classification of a column's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Text,
    Int32,
    Int64,
    Double,
    Float,
    Decimal,
    Date,
    Time,
    Timestamp,
    Boolean,
    Opaque,
}

impl SemanticType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Double => "double",
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Date => "date",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::Boolean => "boolean",
            Self::Opaque => "opaque",
        }
    }

    /// Integer keys are generated by the database on insert.
    pub const fn is_integral(self) -> bool {
        matches!(self, Self::Int32 | Self::Int64)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered SQL type family.
#[derive(Debug, Clone)]
pub struct TypeDef {
    pub code: SqlTypeCode,
    /// `java.sql.Types` constant.
    pub jdbc: i32,
    /// Lower-case dialect names (MySQL `DATA_TYPE` values) for this family.
    pub names: &'static [&'static str],
    pub semantic: SemanticType,
}

/// Single source of truth for SQL type resolution.
pub static TYPE_REGISTRY: &[TypeDef] = &[
    TypeDef { code: SqlTypeCode::Char, jdbc: 1, names: &["char"], semantic: SemanticType::Text },
    TypeDef { code: SqlTypeCode::Varchar, jdbc: 12, names: &["varchar"], semantic: SemanticType::Text },
    TypeDef {
        code: SqlTypeCode::LongVarchar,
        jdbc: -1,
        names: &["tinytext", "text", "mediumtext", "longtext"],
        semantic: SemanticType::Text,
    },
    TypeDef { code: SqlTypeCode::TinyInt, jdbc: -6, names: &["tinyint"], semantic: SemanticType::Int32 },
    TypeDef { code: SqlTypeCode::SmallInt, jdbc: 5, names: &["smallint"], semantic: SemanticType::Int32 },
    TypeDef {
        code: SqlTypeCode::Integer,
        jdbc: 4,
        names: &["mediumint", "int", "integer"],
        semantic: SemanticType::Int32,
    },
    TypeDef { code: SqlTypeCode::BigInt, jdbc: -5, names: &["bigint"], semantic: SemanticType::Int64 },
    TypeDef { code: SqlTypeCode::Real, jdbc: 7, names: &[], semantic: SemanticType::Float },
    TypeDef { code: SqlTypeCode::Float, jdbc: 6, names: &["float"], semantic: SemanticType::Float },
    TypeDef {
        code: SqlTypeCode::Double,
        jdbc: 8,
        names: &["double", "real", "double precision"],
        semantic: SemanticType::Double,
    },
    TypeDef { code: SqlTypeCode::Decimal, jdbc: 3, names: &["decimal"], semantic: SemanticType::Decimal },
    TypeDef { code: SqlTypeCode::Numeric, jdbc: 2, names: &["numeric"], semantic: SemanticType::Decimal },
    TypeDef { code: SqlTypeCode::Date, jdbc: 91, names: &["date"], semantic: SemanticType::Date },
    TypeDef { code: SqlTypeCode::Time, jdbc: 92, names: &["time"], semantic: SemanticType::Time },
    TypeDef {
        code: SqlTypeCode::Timestamp,
        jdbc: 93,
        names: &["datetime", "timestamp"],
        semantic: SemanticType::Timestamp,
    },
    TypeDef { code: SqlTypeCode::Bit, jdbc: -7, names: &["bit"], semantic: SemanticType::Boolean },
    TypeDef {
        code: SqlTypeCode::Boolean,
        jdbc: 16,
        names: &["bool", "boolean"],
        semantic: SemanticType::Boolean,
    },
];

impl SqlTypeCode {
    /// Resolve a `java.sql.Types` number.
    pub fn from_jdbc(code: i32) -> Self {
        TYPE_REGISTRY
            .iter()
            .find(|def| def.jdbc == code)
            .map_or_else(|| Self::Other(format!("jdbc:{code}")), |def| def.code.clone())
    }

    /// Resolve a dialect type name (`varchar`, `BIGINT`, `datetime`).
    ///
    /// Any length or precision suffix (`varchar(64)`, `decimal(10,2)`) is
    /// ignored.
    pub fn from_type_name(name: &str) -> Self {
        let base = name
            .split('(')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let base = base.strip_suffix(" unsigned").unwrap_or(&base);
        TYPE_REGISTRY
            .iter()
            .find(|def| def.names.contains(&base))
            .map_or_else(|| Self::Other(name.trim().to_string()), |def| def.code.clone())
    }

    /// `java.sql.Types` number of a registered code.
    pub fn jdbc(&self) -> Option<i32> {
        self.def().map(|def| def.jdbc)
    }

    fn def(&self) -> Option<&'static TypeDef> {
        TYPE_REGISTRY.iter().find(|def| def.code == *self)
    }
}

impl fmt::Display for SqlTypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(raw) => write!(f, "other({raw})"),
            code => match code.def().and_then(|d| d.names.first()) {
                Some(name) => f.write_str(name),
                None => write!(f, "{code:?}"),
            },
        }
    }
}

/// Total mapping from a SQL type code to its semantic type.
pub fn map_semantic_type(code: &SqlTypeCode) -> SemanticType {
    code.def().map_or(SemanticType::Opaque, |def| def.semantic)
}

/// A Java type as declared in generated sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaType {
    pub simple_name: &'static str,
    /// Fully qualified name to import, `None` for `java.lang` types.
    pub import: Option<&'static str>,
}

/// The declared Java type for a semantic type.
///
/// Entities, access interfaces, services, and controllers all take their
/// member and key types from here.
pub const fn java_type_for(semantic: SemanticType) -> JavaType {
    const fn lang(simple_name: &'static str) -> JavaType {
        JavaType { simple_name, import: None }
    }
    const fn imported(simple_name: &'static str, import: &'static str) -> JavaType {
        JavaType { simple_name, import: Some(import) }
    }
    match semantic {
        SemanticType::Text => lang("String"),
        SemanticType::Int32 => lang("Integer"),
        SemanticType::Int64 => lang("Long"),
        SemanticType::Double => lang("Double"),
        SemanticType::Float => lang("Float"),
        SemanticType::Decimal => imported("BigDecimal", "java.math.BigDecimal"),
        SemanticType::Date => imported("LocalDate", "java.time.LocalDate"),
        SemanticType::Time => imported("LocalTime", "java.time.LocalTime"),
        SemanticType::Timestamp => imported("LocalDateTime", "java.time.LocalDateTime"),
        SemanticType::Boolean => lang("Boolean"),
        SemanticType::Opaque => lang("Object"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_code_maps_to_a_non_opaque_type() {
        for def in TYPE_REGISTRY {
            assert_ne!(map_semantic_type(&def.code), SemanticType::Opaque, "{:?}", def.code);
        }
    }

    #[test]
    fn unrecognized_codes_are_opaque() {
        assert_eq!(map_semantic_type(&SqlTypeCode::from_jdbc(1111)), SemanticType::Opaque);
        assert_eq!(map_semantic_type(&SqlTypeCode::from_type_name("json")), SemanticType::Opaque);
        assert_eq!(map_semantic_type(&SqlTypeCode::Other("geometry".into())), SemanticType::Opaque);
    }

    #[test]
    fn jdbc_numbers_resolve() {
        assert_eq!(SqlTypeCode::from_jdbc(-5), SqlTypeCode::BigInt);
        assert_eq!(SqlTypeCode::from_jdbc(12), SqlTypeCode::Varchar);
        assert_eq!(SqlTypeCode::from_jdbc(93), SqlTypeCode::Timestamp);
        assert_eq!(SqlTypeCode::from_jdbc(4242), SqlTypeCode::Other("jdbc:4242".into()));
    }

    #[test]
    fn dialect_names_resolve_ignoring_suffixes() {
        assert_eq!(SqlTypeCode::from_type_name("VARCHAR(64)"), SqlTypeCode::Varchar);
        assert_eq!(SqlTypeCode::from_type_name("decimal(10,2)"), SqlTypeCode::Decimal);
        assert_eq!(SqlTypeCode::from_type_name("int unsigned"), SqlTypeCode::Integer);
        assert_eq!(SqlTypeCode::from_type_name("datetime"), SqlTypeCode::Timestamp);
    }

    #[test]
    fn semantic_types_follow_the_integer_width() {
        assert_eq!(map_semantic_type(&SqlTypeCode::TinyInt), SemanticType::Int32);
        assert_eq!(map_semantic_type(&SqlTypeCode::Integer), SemanticType::Int32);
        assert_eq!(map_semantic_type(&SqlTypeCode::BigInt), SemanticType::Int64);
    }

    #[test]
    fn java_types() {
        assert_eq!(java_type_for(SemanticType::Int64).simple_name, "Long");
        assert_eq!(java_type_for(SemanticType::Text).import, None);
        assert_eq!(
            java_type_for(SemanticType::Timestamp).import,
            Some("java.time.LocalDateTime")
        );
        assert_eq!(java_type_for(SemanticType::Opaque).simple_name, "Object");
    }
}
