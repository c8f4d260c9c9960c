//! REST controller exposing the service operations.

use super::code_builder::CodeBuilder;
use super::java::{Imports, write_header};
use super::{ops, scaffold::RESULT_CLASS};
use crate::domain::{PageRequest, PrimaryKey, ProjectLayout, TableModel, java_type_for};

pub(crate) fn render(table: &TableModel, pk: &PrimaryKey, layout: &ProjectLayout) -> String {
    let entity = table.entity_name();
    let instance = table.instance_name();
    let service = format!("{instance}Service");
    let key_type = java_type_for(pk.semantic_type);
    let page = PageRequest::default();

    let mut imports = Imports::new();
    imports
        .add(format!("{}.{RESULT_CLASS}", layout.common_package()))
        .add(format!("{}.{entity}", layout.entity_package()))
        .add(format!("{}.{entity}Service", layout.service_package()))
        .add("java.util.List")
        .add("org.springframework.beans.factory.annotation.Autowired")
        .add("org.springframework.web.bind.annotation.*")
        .add_type(key_type);
    let key = key_type.simple_name;

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.controller_package(), &imports);
    b.javadoc([format!("{} - REST API", table.description())])
        .line("@RestController")
        .line(format!(r#"@RequestMapping("/api/{}")"#, table.route_path()))
        .block(format!("public class {entity}Controller {{"), "}", |b| {
            b.blank()
                .line("@Autowired")
                .line(format!("private {entity}Service {service};"));

            b.blank().line("@PostMapping").block(
                format!("public Result<Boolean> create(@RequestBody {entity} {instance}) {{"),
                "}",
                |b| {
                    b.line(format!("return Result.success({service}.{}({instance}));", ops::CREATE));
                },
            );

            b.blank().line(r#"@DeleteMapping("/{id}")"#).block(
                format!("public Result<Boolean> delete(@PathVariable {key} id) {{"),
                "}",
                |b| {
                    b.line(format!("return Result.success({service}.{}(id));", ops::REMOVE_BY_ID));
                },
            );

            b.blank().line("@PutMapping").block(
                format!("public Result<Boolean> update(@RequestBody {entity} {instance}) {{"),
                "}",
                |b| {
                    b.line(format!("return Result.success({service}.{}({instance}));", ops::UPDATE_BY_ID));
                },
            );

            b.blank().line(r#"@GetMapping("/{id}")"#).block(
                format!("public Result<{entity}> getById(@PathVariable {key} id) {{"),
                "}",
                |b| {
                    b.line(format!("{entity} found = {service}.{}(id);", ops::GET_BY_ID))
                        .block("if (found == null) {", "}", |b| {
                            b.line(format!(r#"return Result.error(404, "{entity} not found");"#));
                        })
                        .line("return Result.success(found);");
                },
            );

            b.blank()
                .line(r#"@GetMapping("/list")"#)
                .line(format!(
                    r#"public Result<List<{entity}>> getList(@RequestParam(defaultValue = "{}") int pageNum,"#,
                    page.number()
                ))
                .block(
                    format!(
                        r#"        @RequestParam(defaultValue = "{}") int pageSize) {{"#,
                        page.size()
                    ),
                    "}",
                    |b| {
                        b.block("if (pageNum < 1 || pageSize < 1) {", "}", |b| {
                            b.line(r#"return Result.error(400, "pageNum must be >= 1 and pageSize must be > 0");"#);
                        })
                        .line(format!(
                            "return Result.success({service}.{}(pageNum, pageSize));",
                            ops::GET_LIST
                        ));
                    },
                );
            b.blank();
        });
    b.build()
}
