//! Static schema declarations for persisted entities.
//!
//! # Responsibility
//! - Describe tables, columns, identity generation and relations as data.
//! - Validate a declaration set before the store creates any table.
//!
//! # Invariants
//! - Entity names and table names are unique within one registry.
//! - Relation targets are resolved by entity name only.
//! - Declarations carry no behavior beyond DDL generation.

pub mod ddl;
pub mod descriptor;
pub mod entities;
pub mod registry;

pub use descriptor::{
    ColumnDescriptor, ColumnType, EntityDescriptor, Generator, PrimaryKey, RelationDescriptor,
    RelationKind,
};
pub use registry::{SchemaError, SchemaRegistry, SchemaResult};
