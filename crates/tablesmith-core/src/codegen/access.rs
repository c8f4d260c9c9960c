//! Persistence-access interface (MyBatis `@Mapper`).

use super::code_builder::CodeBuilder;
use super::java::{Imports, write_header};
use super::ops;
use crate::domain::{PrimaryKey, ProjectLayout, TableModel, java_type_for};

pub(crate) fn render(table: &TableModel, pk: &PrimaryKey, layout: &ProjectLayout) -> String {
    let entity = table.entity_name();
    let key_type = java_type_for(pk.semantic_type);

    let mut imports = Imports::new();
    imports
        .add(format!("{}.{entity}", layout.entity_package()))
        .add("java.util.List")
        .add("org.apache.ibatis.annotations.Mapper")
        .add("org.apache.ibatis.annotations.Param")
        .add_type(key_type);

    let key = key_type.simple_name;
    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.mapper_package(), &imports);
    b.javadoc([format!("{} - data access", table.description())])
        .line("@Mapper")
        .block(format!("public interface {entity}Mapper {{"), "}", |b| {
            b.blank()
                .line(format!("int {}({entity} record);", ops::INSERT_SELECTIVE))
                .blank()
                .line(format!(r#"int {}(@Param("id") {key} id);"#, ops::DELETE_BY_ID))
                .blank()
                .line(format!("int {}({entity} record);", ops::UPDATE_BY_ID_SELECTIVE))
                .blank()
                .line(format!(r#"{entity} {}(@Param("id") {key} id);"#, ops::FIND_BY_ID))
                .blank()
                .line(format!(
                    r#"List<{entity}> {}(@Param("offset") int offset, @Param("limit") int limit);"#,
                    ops::FIND_LIST
                ))
                .blank();
        });
    b.build()
}
