//! Built-in entity declarations registered by the app store.

use super::descriptor::{
    ColumnDescriptor, ColumnType, EntityDescriptor, Generator, PrimaryKey, RelationDescriptor,
    RelationKind,
};

const UUID_PK: PrimaryKey = PrimaryKey {
    column: "id",
    generator: Generator::Uuid,
};

pub static AUTHOR: EntityDescriptor = EntityDescriptor {
    name: "Author",
    table: "author",
    primary_key: UUID_PK,
    columns: &[
        ColumnDescriptor::required("name", ColumnType::Text),
        ColumnDescriptor::required("birthdate", ColumnType::Text),
    ],
    relations: &[],
};

pub static CATEGORY: EntityDescriptor = EntityDescriptor {
    name: "Category",
    table: "category",
    primary_key: UUID_PK,
    columns: &[],
    relations: &[],
};

pub static POST: EntityDescriptor = EntityDescriptor {
    name: "Post",
    table: "post",
    primary_key: UUID_PK,
    columns: &[],
    relations: &[],
};

pub static USER: EntityDescriptor = EntityDescriptor {
    name: "User",
    table: "user",
    primary_key: UUID_PK,
    columns: &[ColumnDescriptor::nullable("eauthId", ColumnType::Uuid)],
    relations: &[RelationDescriptor {
        property: "userPreference",
        kind: RelationKind::OneToOne,
        target: "UserPreference",
        join_column: "userPreferenceId",
    }],
};

pub static USER_PREFERENCE: EntityDescriptor = EntityDescriptor {
    name: "UserPreference",
    table: "user_preference",
    primary_key: UUID_PK,
    columns: &[],
    relations: &[],
};

/// Returns the app's entity set in registration order.
pub fn default_entities() -> [&'static EntityDescriptor; 5] {
    [&AUTHOR, &CATEGORY, &POST, &USER, &USER_PREFERENCE]
}

/// Looks up a built-in declaration by entity name.
pub fn builtin(name: &str) -> Option<&'static EntityDescriptor> {
    default_entities()
        .into_iter()
        .find(|descriptor| descriptor.name == name)
}

/// Entity names of [`default_entities`], for configuration defaults.
pub fn default_entity_names() -> Vec<String> {
    default_entities()
        .iter()
        .map(|descriptor| descriptor.name.to_string())
        .collect()
}
