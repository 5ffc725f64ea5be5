//! Descriptor types for entity metadata.

/// SQL-facing type of one scalar column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Free text.
    Text,
    /// UUID stored in canonical hyphenated text form.
    Uuid,
}

impl ColumnType {
    pub fn sql_type(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Uuid => "VARCHAR(36)",
        }
    }
}

/// Identity generation policy for a primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generator {
    /// Random v4 UUID assigned on first save.
    Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimaryKey {
    pub column: &'static str,
    pub generator: Generator,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDescriptor {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDescriptor {
    pub const fn required(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            nullable: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    /// Owning side of a one-to-one link; the join column is unique.
    OneToOne,
}

/// Owning side of a relation, stored as a nullable join column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDescriptor {
    /// Property name on the owning record.
    pub property: &'static str,
    pub kind: RelationKind,
    /// Entity name of the referenced record.
    pub target: &'static str,
    /// Foreign-key column holding the target's primary key.
    pub join_column: &'static str,
}

/// Full declaration of one persisted entity.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Logical entity name, used for relation resolution.
    pub name: &'static str,
    pub table: &'static str,
    pub primary_key: PrimaryKey,
    pub columns: &'static [ColumnDescriptor],
    pub relations: &'static [RelationDescriptor],
}

impl EntityDescriptor {
    /// Returns every stored column name: primary key, scalar columns, then
    /// join columns.
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut names = Vec::with_capacity(1 + self.columns.len() + self.relations.len());
        names.push(self.primary_key.column);
        names.extend(self.columns.iter().map(|column| column.name));
        names.extend(self.relations.iter().map(|relation| relation.join_column));
        names
    }

    /// Column names excluding the primary key, in bind order.
    pub fn value_column_names(&self) -> Vec<&'static str> {
        self.column_names().into_iter().skip(1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{ColumnDescriptor, ColumnType, EntityDescriptor, Generator, PrimaryKey};
    use super::{RelationDescriptor, RelationKind};

    static SAMPLE: EntityDescriptor = EntityDescriptor {
        name: "Sample",
        table: "sample",
        primary_key: PrimaryKey {
            column: "id",
            generator: Generator::Uuid,
        },
        columns: &[ColumnDescriptor::required("title", ColumnType::Text)],
        relations: &[RelationDescriptor {
            property: "owner",
            kind: RelationKind::OneToOne,
            target: "Owner",
            join_column: "ownerId",
        }],
    };

    #[test]
    fn column_names_keep_declaration_order() {
        assert_eq!(SAMPLE.column_names(), vec!["id", "title", "ownerId"]);
        assert_eq!(SAMPLE.value_column_names(), vec!["title", "ownerId"]);
    }
}
