//! Query-mapping descriptor for one table.

use super::ops;
use super::query::{
    Fragment, QueryMapping, ResultEntry, ResultMap, SqlFragment, Statement, StatementKind,
};
use crate::domain::{PrimaryKey, ProjectLayout, TableModel};

pub const BASE_RESULT_MAP: &str = "BaseResultMap";
pub const BASE_COLUMN_LIST: &str = "Base_Column_List";

/// Build the mapper document for `table`.
pub fn build(table: &TableModel, pk: &PrimaryKey, layout: &ProjectLayout) -> QueryMapping {
    let entity_type = format!("{}.{}", layout.entity_package(), table.entity_name());
    let name = table.source_name();
    let key = &pk.column_name;

    let result_map = ResultMap {
        id: BASE_RESULT_MAP.into(),
        type_name: entity_type.clone(),
        entries: table
            .columns()
            .iter()
            .map(|c| ResultEntry {
                column: c.source_name.clone(),
                property: c.member_name.clone(),
                identity: c.source_name == *key,
            })
            .collect(),
    };

    let column_list = SqlFragment {
        id: BASE_COLUMN_LIST.into(),
        text: table
            .columns()
            .iter()
            .map(|c| c.source_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
    };

    let insert_columns = table
        .columns()
        .iter()
        .map(|c| {
            Fragment::if_present(
                &c.member_name,
                vec![Fragment::text(format!("{},", c.source_name))],
            )
        })
        .collect();
    let insert_values = table
        .columns()
        .iter()
        .map(|c| {
            Fragment::if_present(
                &c.member_name,
                vec![Fragment::param(&c.member_name), Fragment::text(",")],
            )
        })
        .collect();
    let mut insert = Statement::new(
        ops::INSERT_SELECTIVE,
        StatementKind::Insert,
        vec![
            Fragment::text(format!("INSERT INTO {name}")),
            Fragment::trim("(", ")", ",", insert_columns),
            Fragment::trim("VALUES (", ")", ",", insert_values),
        ],
    )
    .parameter_type(&entity_type);
    if pk.semantic_type.is_integral() {
        insert = insert.generated_key(&pk.member_name);
    }

    let delete = Statement::new(
        ops::DELETE_BY_ID,
        StatementKind::Delete,
        vec![
            Fragment::text(format!("DELETE FROM {name} WHERE {key} =")),
            Fragment::param("id"),
        ],
    );

    let assignments = table
        .non_key_columns()
        .map(|c| {
            Fragment::if_present(
                &c.member_name,
                vec![
                    Fragment::text(format!("{} = ", c.source_name)),
                    Fragment::param(&c.member_name),
                    Fragment::text(","),
                ],
            )
        })
        .collect();
    let update = Statement::new(
        ops::UPDATE_BY_ID_SELECTIVE,
        StatementKind::Update,
        vec![
            Fragment::text(format!("UPDATE {name}")),
            Fragment::Set(assignments),
            Fragment::text(format!("WHERE {key} =")),
            Fragment::param(&pk.member_name),
        ],
    )
    .parameter_type(&entity_type);

    let select_head = || {
        vec![
            Fragment::text("SELECT"),
            Fragment::Include(BASE_COLUMN_LIST.into()),
            Fragment::Break,
            Fragment::text(format!("FROM {name}")),
        ]
    };

    let mut find_by_id = select_head();
    find_by_id.extend([Fragment::text(format!("WHERE {key} =")), Fragment::param("id")]);
    let find_by_id =
        Statement::new(ops::FIND_BY_ID, StatementKind::Select, find_by_id).result_map(BASE_RESULT_MAP);

    let mut find_list = select_head();
    find_list.extend([
        Fragment::Break,
        Fragment::text(format!("ORDER BY {key} DESC")),
        Fragment::Break,
        Fragment::text("LIMIT"),
        Fragment::param("offset"),
        Fragment::text(","),
        Fragment::param("limit"),
    ]);
    let find_list =
        Statement::new(ops::FIND_LIST, StatementKind::Select, find_list).result_map(BASE_RESULT_MAP);

    QueryMapping {
        namespace: format!("{}.{}Mapper", layout.mapper_package(), table.entity_name()),
        result_map,
        fragments: vec![column_list],
        statements: vec![insert, delete, update, find_by_id, find_list],
    }
}
