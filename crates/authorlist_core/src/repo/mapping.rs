//! Row encode/decode for each declared entity.

use super::entity_repo::{RepoError, RepoResult};
use crate::model::{Author, Category, Entity, EntityId, Post, User, UserPreference};
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

/// SQL mapping for an entity record.
pub trait RowMapping: Entity {
    /// Values for `descriptor().value_column_names()`, in that order.
    fn bind_values(&self) -> Vec<Value>;

    /// Decodes one row selected with `descriptor().column_names()`.
    fn from_row(row: &Row<'_>) -> RepoResult<Self>;
}

impl RowMapping for Author {
    fn bind_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.birthdate.clone()),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(read_id(row, "author", "id")?),
            name: row.get("name")?,
            birthdate: row.get("birthdate")?,
        })
    }
}

impl RowMapping for Category {
    fn bind_values(&self) -> Vec<Value> {
        Vec::new()
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(read_id(row, "category", "id")?),
        })
    }
}

impl RowMapping for Post {
    fn bind_values(&self) -> Vec<Value> {
        Vec::new()
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(read_id(row, "post", "id")?),
        })
    }
}

impl RowMapping for User {
    fn bind_values(&self) -> Vec<Value> {
        vec![
            optional_text(self.eauth_id.map(|id| id.hyphenated().to_string())),
            optional_text(self.user_preference.map(|id| id.to_string())),
        ]
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        let eauth_id = match row.get::<_, Option<String>>("eauthId")? {
            Some(text) => Some(parse_uuid(&text, "user", "eauthId")?),
            None => None,
        };
        Ok(Self {
            id: Some(read_id(row, "user", "id")?),
            eauth_id,
            user_preference: read_optional_id(row, "user", "userPreferenceId")?,
        })
    }
}

impl RowMapping for UserPreference {
    fn bind_values(&self) -> Vec<Value> {
        Vec::new()
    }

    fn from_row(row: &Row<'_>) -> RepoResult<Self> {
        Ok(Self {
            id: Some(read_id(row, "user_preference", "id")?),
        })
    }
}

fn optional_text(value: Option<String>) -> Value {
    value.map_or(Value::Null, Value::Text)
}

fn read_id(row: &Row<'_>, table: &str, column: &str) -> RepoResult<EntityId> {
    let text: String = row.get(column)?;
    parse_uuid(&text, table, column).map(EntityId::from_uuid)
}

fn read_optional_id(row: &Row<'_>, table: &str, column: &str) -> RepoResult<Option<EntityId>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => Ok(Some(EntityId::from_uuid(parse_uuid(&text, table, column)?))),
        None => Ok(None),
    }
}

fn parse_uuid(text: &str, table: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{text}` in {table}.{column}"))
    })
}

#[cfg(test)]
mod tests {
    use super::RowMapping;
    use crate::model::{Author, Entity, User};
    use rusqlite::types::Value;

    #[test]
    fn bind_values_follow_declared_column_order() {
        let author = Author::new("Ada Lovelace", "12-10-1815");
        assert_eq!(
            Author::descriptor().value_column_names(),
            vec!["name", "birthdate"]
        );
        assert_eq!(
            author.bind_values(),
            vec![
                Value::Text("Ada Lovelace".to_string()),
                Value::Text("12-10-1815".to_string())
            ]
        );
    }

    #[test]
    fn unlinked_user_binds_nulls() {
        assert_eq!(User::new(None).bind_values(), vec![Value::Null, Value::Null]);
    }
}
