//! Generic entity repository over a `Store`.
//!
//! # Invariants
//! - `save` assigns a generated id exactly once, on the first save.
//! - `find_all` returns rows in insertion order.
//! - `insert_if_empty` checks and inserts under one write transaction.

use super::mapping::RowMapping;
use crate::db::{DbError, Store};
use crate::model::EntityId;
use crate::schema::ddl::quote_ident;
use crate::schema::{EntityDescriptor, Generator};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
    UnregisteredEntity(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::UnregisteredEntity(name) => {
                write!(f, "entity `{name}` is not registered with this store")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::UnregisteredEntity(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for one entity type.
pub trait EntityRepository<E> {
    /// Loads every record in insertion order.
    fn find_all(&self) -> RepoResult<Vec<E>>;
    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<E>>;
    fn count(&self) -> RepoResult<u64>;
    /// Inserts or updates by primary key, generating the id when absent.
    fn save(&self, entity: E) -> RepoResult<E>;
    /// Saves `entity` only when the table has no rows.
    ///
    /// Returns `Ok(None)` when rows already existed.
    fn insert_if_empty(&self, entity: E) -> RepoResult<Option<E>>;
}

/// SQLite-backed repository bound to a store for its lifetime.
pub struct SqliteEntityRepository<'store, E> {
    store: &'store Store,
    descriptor: &'static EntityDescriptor,
    _entity: PhantomData<fn() -> E>,
}

impl<'store, E: RowMapping> SqliteEntityRepository<'store, E> {
    /// Binds a repository, rejecting entities the store did not register.
    pub fn try_new(store: &'store Store) -> RepoResult<Self> {
        let descriptor = E::descriptor();
        if !store.registry().contains(descriptor) {
            return Err(RepoError::UnregisteredEntity(descriptor.name));
        }
        Ok(Self {
            store,
            descriptor,
            _entity: PhantomData,
        })
    }

    fn select_sql(&self) -> String {
        let columns = self
            .descriptor
            .column_names()
            .into_iter()
            .map(quote_ident)
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "SELECT {columns} FROM {}",
            quote_ident(self.descriptor.table)
        )
    }

    fn upsert_sql(&self) -> String {
        let columns = self.descriptor.column_names();
        let placeholders = (1..=columns.len())
            .map(|index| format!("?{index}"))
            .collect::<Vec<_>>()
            .join(", ");
        let updates = self
            .descriptor
            .value_column_names()
            .into_iter()
            .map(|column| format!("{0} = excluded.{0}", quote_ident(column)))
            .collect::<Vec<_>>();
        let conflict_action = if updates.is_empty() {
            "DO NOTHING".to_string()
        } else {
            format!("DO UPDATE SET {}", updates.join(", "))
        };

        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders}) ON CONFLICT({}) {conflict_action};",
            quote_ident(self.descriptor.table),
            columns
                .into_iter()
                .map(quote_ident)
                .collect::<Vec<_>>()
                .join(", "),
            quote_ident(self.descriptor.primary_key.column)
        )
    }

    fn count_in(&self, conn: &Connection) -> RepoResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {};", quote_ident(self.descriptor.table));
        self.store.trace_query(&sql);
        let count = conn.query_row(&sql, [], |row| row.get::<_, i64>(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count {count}")))
    }

    fn save_in(&self, conn: &Connection, mut entity: E) -> RepoResult<E> {
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = generate_id(self.descriptor.primary_key.generator);
                entity.assign_id(id);
                id
            }
        };

        let mut values = Vec::with_capacity(self.descriptor.column_names().len());
        values.push(Value::Text(id.to_string()));
        values.extend(entity.bind_values());

        let sql = self.upsert_sql();
        self.store.trace_query(&sql);
        conn.execute(&sql, params_from_iter(values))?;
        Ok(entity)
    }
}

impl<E: RowMapping> EntityRepository<E> for SqliteEntityRepository<'_, E> {
    fn find_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY rowid ASC;", self.select_sql());
        self.store.trace_query(&sql);

        let mut stmt = self.store.connection().prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }
        Ok(entities)
    }

    fn find_by_id(&self, id: EntityId) -> RepoResult<Option<E>> {
        let sql = format!(
            "{} WHERE {} = ?1;",
            self.select_sql(),
            quote_ident(self.descriptor.primary_key.column)
        );
        self.store.trace_query(&sql);

        let mut stmt = self.store.connection().prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(E::from_row(row)?)),
            None => Ok(None),
        }
    }

    fn count(&self) -> RepoResult<u64> {
        self.count_in(self.store.connection())
    }

    fn save(&self, entity: E) -> RepoResult<E> {
        self.save_in(self.store.connection(), entity)
    }

    fn insert_if_empty(&self, entity: E) -> RepoResult<Option<E>> {
        let tx = Transaction::new_unchecked(self.store.connection(), TransactionBehavior::Immediate)?;
        if self.count_in(&tx)? > 0 {
            return Ok(None);
        }
        let saved = self.save_in(&tx, entity)?;
        tx.commit()?;
        Ok(Some(saved))
    }
}

impl Store {
    /// Returns the repository for `E` on this store.
    pub fn repository<E: RowMapping>(&self) -> RepoResult<SqliteEntityRepository<'_, E>> {
        SqliteEntityRepository::try_new(self)
    }
}

fn generate_id(generator: Generator) -> EntityId {
    match generator {
        Generator::Uuid => EntityId::generate(),
    }
}

