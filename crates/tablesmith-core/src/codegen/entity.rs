//! Data entity: one Lombok `@Data` class per table.

use super::code_builder::CodeBuilder;
use super::java::{Imports, write_header};
use crate::domain::{ProjectLayout, TableModel, java_type_for};

pub(crate) fn render(table: &TableModel, layout: &ProjectLayout) -> String {
    let mut imports = Imports::new();
    imports.add("java.io.Serializable").add("lombok.Data");
    for column in table.columns() {
        imports.add_type(java_type_for(column.semantic_type));
    }

    let mut b = CodeBuilder::java();
    write_header(&mut b, &layout.entity_package(), &imports);

    b.javadoc([table.description()])
        .line("@Data")
        .block(
            format!("public class {} implements Serializable {{", table.entity_name()),
            "}",
            |b| {
                b.blank()
                    .line("private static final long serialVersionUID = 1L;");
                b.each(table.columns(), |b, column| {
                    b.blank();
                    if !column.comment.is_empty() {
                        b.javadoc([column.comment.as_str()]);
                    }
                    b.line(format!(
                        "private {} {};",
                        java_type_for(column.semantic_type).simple_name,
                        column.member_name
                    ));
                });
                b.blank();
            },
        );
    b.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModuleNames, SqlTypeCode};

    #[test]
    fn comments_and_imports() {
        let mut builder = TableModel::builder("price_tier", Some("pricing tiers"));
        builder
            .column("id", SqlTypeCode::Integer, None)
            .unwrap()
            .column("amount", SqlTypeCode::Decimal, Some("gross */ amount"))
            .unwrap()
            .column("valid_from", SqlTypeCode::Date, None)
            .unwrap()
            .primary_key("id");
        let table = builder.build().unwrap();
        let layout =
            ProjectLayout::new("shop".parse().unwrap(), ModuleNames::default()).unwrap();

        let src = render(&table, &layout);
        assert!(src.starts_with("package shop.dao.entity;\n"));
        assert!(src.contains("import java.math.BigDecimal;\n"));
        assert!(src.contains("import java.time.LocalDate;\n"));
        assert!(src.contains("/**\n * pricing tiers\n */\n@Data\npublic class PriceTier implements Serializable {"));
        assert!(src.contains("    /**\n     * gross *&#47; amount\n     */\n    private BigDecimal amount;"));
        assert!(src.contains("    private LocalDate validFrom;"));
        assert!(src.ends_with("}\n"));
    }
}
