//! Service interface and its implementation.

use super::code_builder::CodeBuilder;
use super::java::{Imports, write_header};
use super::ops;
use crate::domain::{PrimaryKey, ProjectLayout, TableModel, java_type_for};

pub(crate) fn render_interface(table: &TableModel, pk: &PrimaryKey, layout: &ProjectLayout) -> String {
    let entity = table.entity_name();
    let instance = table.instance_name();
    let key_type = java_type_for(pk.semantic_type);

    let mut imports = Imports::new();
    imports
        .add(format!("{}.{entity}", layout.entity_package()))
        .add("java.util.List")
        .add_type(key_type);
    let key = key_type.simple_name;

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.service_package(), &imports);
    b.javadoc([format!("{} - service", table.description())])
        .block(format!("public interface {entity}Service {{"), "}", |b| {
            b.blank()
                .line(format!("boolean {}({entity} {instance});", ops::CREATE))
                .blank()
                .line(format!("boolean {}({key} id);", ops::REMOVE_BY_ID))
                .blank()
                .line(format!("boolean {}({entity} {instance});", ops::UPDATE_BY_ID))
                .blank()
                .javadoc(["@return the entity, or null when no row matches"])
                .line(format!("{entity} {}({key} id);", ops::GET_BY_ID))
                .blank()
                .javadoc(["@param pageNum  1-based page number", "@param pageSize rows per page"])
                .line(format!("List<{entity}> {}(int pageNum, int pageSize);", ops::GET_LIST))
                .blank();
        });
    b.build()
}

pub(crate) fn render_impl(table: &TableModel, pk: &PrimaryKey, layout: &ProjectLayout) -> String {
    let entity = table.entity_name();
    let instance = table.instance_name();
    let mapper = format!("{instance}Mapper");
    let key_type = java_type_for(pk.semantic_type);

    let mut imports = Imports::new();
    imports
        .add(format!("{}.{entity}", layout.entity_package()))
        .add(format!("{}.{entity}Mapper", layout.mapper_package()))
        .add(format!("{}.{entity}Service", layout.service_package()))
        .add("java.util.List")
        .add("org.springframework.beans.factory.annotation.Autowired")
        .add("org.springframework.stereotype.Service")
        .add_type(key_type);
    let key = key_type.simple_name;

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.service_impl_package(), &imports);
    b.line("@Service")
        .block(
            format!("public class {entity}ServiceImpl implements {entity}Service {{"),
            "}",
            |b| {
                b.blank()
                    .line("@Autowired")
                    .line(format!("private {entity}Mapper {mapper};"));

                let method = |b: &mut CodeBuilder, signature: String, body: String| {
                    b.blank().line("@Override").block(format!("{signature} {{"), "}", |b| {
                        b.line(body);
                    });
                };

                method(
                    b,
                    format!("public boolean {}({entity} {instance})", ops::CREATE),
                    format!("return {mapper}.{}({instance}) > 0;", ops::INSERT_SELECTIVE),
                );
                method(
                    b,
                    format!("public boolean {}({key} id)", ops::REMOVE_BY_ID),
                    format!("return {mapper}.{}(id) > 0;", ops::DELETE_BY_ID),
                );
                method(
                    b,
                    format!("public boolean {}({entity} {instance})", ops::UPDATE_BY_ID),
                    format!("return {mapper}.{}({instance}) > 0;", ops::UPDATE_BY_ID_SELECTIVE),
                );
                method(
                    b,
                    format!("public {entity} {}({key} id)", ops::GET_BY_ID),
                    format!("return {mapper}.{}(id);", ops::FIND_BY_ID),
                );

                b.blank().line("@Override").block(
                    format!("public List<{entity}> {}(int pageNum, int pageSize) {{", ops::GET_LIST),
                    "}",
                    |b| {
                        b.line("int offset = (pageNum - 1) * pageSize;")
                            .line(format!("return {mapper}.{}(offset, pageSize);", ops::FIND_LIST));
                    },
                );
                b.blank();
            },
        );
    b.build()
}
