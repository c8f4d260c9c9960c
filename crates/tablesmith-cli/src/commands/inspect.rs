//! `tablesmith inspect` - show what the metadata source reports.

use tracing::instrument;

use tablesmith_adapters::Snapshot;
use tablesmith_core::domain::{java_type_for, map_semantic_type};

use crate::{
    cli::{InspectArgs, OutputFormat},
    commands::open_source,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(args: InspectArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let source = open_source(&args.source, &config)?;

    let captured = Snapshot::capture(source.provider.as_ref(), source.catalog.as_deref());
    let closed = source.provider.close();
    let mut snapshot = captured?;
    closed?;

    select_tables(&mut snapshot, &args.source.tables)?;

    if let Some(path) = &args.export {
        let json = snapshot
            .to_json()
            .map_err(|e| CliError::config(e.to_string()))?;
        std::fs::write(path, json)
            .with_cli_context(|| format!("Failed to write snapshot to '{}'", path.display()))?;
        output.success(&format!(
            "Exported {} table(s) to {}",
            snapshot.tables.len(),
            path.display()
        ))?;
        return Ok(());
    }

    if output.format() == OutputFormat::Json {
        output.json(&snapshot)?;
        return Ok(());
    }

    print_tables(&snapshot, &output)
}

/// Keep only `names`, in the order the catalog lists them.
fn select_tables(snapshot: &mut Snapshot, names: &[String]) -> CliResult<()> {
    if names.is_empty() {
        return Ok(());
    }
    if let Some(missing) = names
        .iter()
        .find(|name| !snapshot.tables.iter().any(|t| &t.name == *name))
    {
        return Err(CliError::InvalidInput {
            message: format!("table '{missing}' not found"),
            source: None,
        });
    }
    snapshot.tables.retain(|t| names.contains(&t.name));
    Ok(())
}

fn print_tables(snapshot: &Snapshot, output: &OutputManager) -> CliResult<()> {
    let catalog = snapshot.catalog.as_deref().unwrap_or("(current)");
    output.header(&format!(
        "Catalog {catalog}: {} table(s)",
        snapshot.tables.len()
    ))?;

    for table in &snapshot.tables {
        output.print("")?;
        if table.comment.is_empty() {
            output.print(&table.name)?;
        } else {
            output.print(&format!("{}  -- {}", table.name, table.comment))?;
        }

        let width = table.columns.iter().map(|c| c.name.len()).max().unwrap_or(0);
        for column in &table.columns {
            let code = column.type_ref.resolve();
            let java = java_type_for(map_semantic_type(&code)).simple_name;
            let key = if table.primary_key.contains(&column.name) {
                " PK"
            } else {
                ""
            };
            output.print(&format!(
                "  {:<width$}  {:<14} {java}{key}",
                column.name,
                code.to_string(),
            ))?;
        }
        if table.primary_key.is_empty() {
            output.warning(&format!("{} has no primary key", table.name))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablesmith_adapters::metadata::TableSnapshot;

    fn snapshot() -> Snapshot {
        Snapshot::new(Some("shop"))
            .table(TableSnapshot::new("user_info").column("id", "bigint"))
            .table(TableSnapshot::new("orders").column("id", "int"))
    }

    #[test]
    fn selection_keeps_catalog_order() {
        let mut snap = snapshot();
        select_tables(&mut snap, &["orders".into(), "user_info".into()]).unwrap();
        let names: Vec<_> = snap.tables.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["user_info", "orders"]);
    }

    #[test]
    fn unknown_table_is_rejected() {
        let mut snap = snapshot();
        let err = select_tables(&mut snap, &["nope".into()]).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
