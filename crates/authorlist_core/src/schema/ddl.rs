//! DDL generation from entity declarations.

use super::descriptor::EntityDescriptor;
use super::registry::{SchemaRegistry, SchemaResult};

/// Quotes an SQL identifier (`user` and friends are not safe bare).
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Builds a `CREATE TABLE IF NOT EXISTS` statement for one entity.
///
/// Join columns reference the target's primary key and are `UNIQUE` for
/// one-to-one relations.
pub fn create_table_sql(
    descriptor: &'static EntityDescriptor,
    registry: &SchemaRegistry,
) -> SchemaResult<String> {
    let mut lines = vec![format!(
        "    {} VARCHAR(36) PRIMARY KEY NOT NULL",
        quote_ident(descriptor.primary_key.column)
    )];

    for column in descriptor.columns {
        let null_clause = if column.nullable { "NULL" } else { "NOT NULL" };
        lines.push(format!(
            "    {} {} {}",
            quote_ident(column.name),
            column.column_type.sql_type(),
            null_clause
        ));
    }

    for relation in descriptor.relations {
        let target = registry.target_of(descriptor, relation.property)?;
        lines.push(format!(
            "    {} VARCHAR(36) NULL UNIQUE REFERENCES {}({})",
            quote_ident(relation.join_column),
            quote_ident(target.table),
            quote_ident(target.primary_key.column)
        ));
    }

    Ok(format!(
        "CREATE TABLE IF NOT EXISTS {} (\n{}\n);",
        quote_ident(descriptor.table),
        lines.join(",\n")
    ))
}
