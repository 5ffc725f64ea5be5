//! Create-if-missing schema synchronization.
//!
//! # Invariants
//! - Runs inside one write transaction; a failure leaves no partial tables.
//! - Concurrent first opens of one file serialize on the write lock.
//! - Existing tables are checked for declared columns, never altered.

use super::{DbError, DbResult};
use crate::schema::ddl::create_table_sql;
use crate::schema::{EntityDescriptor, SchemaRegistry};
use log::info;
use rusqlite::{Connection, OptionalExtension, TransactionBehavior};

/// Creates missing tables for every registered entity.
///
/// Returns the tables that were created. DDL is logged when `log_schema`
/// is set.
pub fn synchronize_schema(
    conn: &mut Connection,
    registry: &SchemaRegistry,
    log_schema: bool,
) -> DbResult<Vec<&'static str>> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let mut created = Vec::new();

    for descriptor in registry.creation_order() {
        if table_exists(&tx, descriptor.table)? {
            ensure_declared_columns(&tx, descriptor)?;
            continue;
        }

        let sql = create_table_sql(descriptor, registry)?;
        if log_schema {
            info!(
                "event=schema_sync module=db status=create table={} sql={}",
                descriptor.table,
                sql.replace('\n', " ")
            );
        }
        tx.execute_batch(&sql)?;
        created.push(descriptor.table);
    }

    tx.commit()?;
    Ok(created)
}

pub fn table_exists(conn: &Connection, table: &str) -> DbResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1;",
            [table],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

fn ensure_declared_columns(conn: &Connection, descriptor: &'static EntityDescriptor) -> DbResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let existing = stmt
        .query_map([descriptor.table], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for column in descriptor.column_names() {
        if !existing.iter().any(|name| name == column) {
            return Err(DbError::SchemaMismatch {
                table: descriptor.table,
                missing_column: column,
            });
        }
    }

    Ok(())
}
