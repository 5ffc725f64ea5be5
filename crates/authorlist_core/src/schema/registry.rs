//! Registration and relation resolution for entity declarations.

use super::descriptor::EntityDescriptor;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    DuplicateEntity(&'static str),
    DuplicateTable(&'static str),
    UnknownRelation {
        entity: &'static str,
        property: &'static str,
    },
    UnknownRelationTarget {
        entity: &'static str,
        property: &'static str,
        target: &'static str,
    },
}

impl Display for SchemaError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateEntity(name) => write!(f, "entity `{name}` registered twice"),
            Self::DuplicateTable(table) => write!(f, "table `{table}` declared by two entities"),
            Self::UnknownRelation { entity, property } => {
                write!(f, "entity `{entity}` has no relation `{property}`")
            }
            Self::UnknownRelationTarget {
                entity,
                property,
                target,
            } => write!(
                f,
                "relation `{entity}.{property}` targets unregistered entity `{target}`"
            ),
        }
    }
}

impl Error for SchemaError {}

/// Ordered set of entity declarations known to one store.
#[derive(Debug, Default, Clone)]
pub struct SchemaRegistry {
    entities: Vec<&'static EntityDescriptor>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers all descriptors and resolves their relations.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = &'static EntityDescriptor>,
    ) -> SchemaResult<Self> {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor)?;
        }
        registry.resolve_relations()?;
        Ok(registry)
    }

    /// Adds one descriptor. Relations are not checked until
    /// [`SchemaRegistry::resolve_relations`].
    pub fn register(&mut self, descriptor: &'static EntityDescriptor) -> SchemaResult<()> {
        if self.get(descriptor.name).is_some() {
            return Err(SchemaError::DuplicateEntity(descriptor.name));
        }
        if self
            .entities
            .iter()
            .any(|existing| existing.table == descriptor.table)
        {
            return Err(SchemaError::DuplicateTable(descriptor.table));
        }
        self.entities.push(descriptor);
        Ok(())
    }

    /// Verifies every relation target is registered.
    pub fn resolve_relations(&self) -> SchemaResult<()> {
        for descriptor in &self.entities {
            for relation in descriptor.relations {
                self.target_of(descriptor, relation.property)?;
            }
        }
        Ok(())
    }

    /// Resolves the target descriptor of `entity.property`.
    pub fn target_of(
        &self,
        entity: &'static EntityDescriptor,
        property: &'static str,
    ) -> SchemaResult<&'static EntityDescriptor> {
        let relation = entity
            .relations
            .iter()
            .find(|relation| relation.property == property)
            .ok_or(SchemaError::UnknownRelation {
                entity: entity.name,
                property,
            })?;
        self.get(relation.target)
            .ok_or(SchemaError::UnknownRelationTarget {
                entity: entity.name,
                property,
                target: relation.target,
            })
    }

    pub fn get(&self, name: &str) -> Option<&'static EntityDescriptor> {
        self.entities
            .iter()
            .copied()
            .find(|descriptor| descriptor.name == name)
    }

    pub fn contains(&self, descriptor: &EntityDescriptor) -> bool {
        self.get(descriptor.name).is_some()
    }

    pub fn entities(&self) -> &[&'static EntityDescriptor] {
        &self.entities
    }

    /// Returns descriptors with relation targets ahead of their owners.
    ///
    /// Falls back to registration order for anything left in a cycle.
    pub fn creation_order(&self) -> Vec<&'static EntityDescriptor> {
        let mut ordered: Vec<&'static EntityDescriptor> = Vec::with_capacity(self.entities.len());
        let mut pending = self.entities.clone();

        while !pending.is_empty() {
            let before = pending.len();
            pending.retain(|descriptor| {
                let ready = descriptor.relations.iter().all(|relation| {
                    relation.target == descriptor.name
                        || ordered.iter().any(|done| done.name == relation.target)
                });
                if ready {
                    ordered.push(*descriptor);
                }
                !ready
            });
            if pending.len() == before {
                ordered.append(&mut pending);
            }
        }

        ordered
    }
}

#[cfg(test)]
mod tests {
    use super::{SchemaError, SchemaRegistry};
    use crate::schema::entities::{default_entities, AUTHOR, USER, USER_PREFERENCE};

    #[test]
    fn default_entities_register_and_resolve() {
        let registry = SchemaRegistry::from_descriptors(default_entities())
            .expect("default entities should register");
        assert_eq!(registry.entities().len(), 5);
        let target = registry.target_of(&USER, "userPreference").expect("relation should resolve");
        assert_eq!(target.table, "user_preference");
    }

    #[test]
    fn duplicate_entity_is_rejected() {
        let mut registry = SchemaRegistry::new();
        registry.register(&AUTHOR).expect("registration should succeed");
        assert_eq!(
            registry.register(&AUTHOR),
            Err(SchemaError::DuplicateEntity("Author"))
        );
    }

    #[test]
    fn missing_relation_target_fails_resolution() {
        let err = SchemaRegistry::from_descriptors([&AUTHOR, &USER])
            .expect_err("registry should be rejected");
        assert!(matches!(
            err,
            SchemaError::UnknownRelationTarget {
                target: "UserPreference",
                ..
            }
        ));
    }

    #[test]
    fn creation_order_puts_relation_targets_first() {
        let registry = SchemaRegistry::from_descriptors([&USER, &USER_PREFERENCE])
            .expect("entities should register");
        let names: Vec<_> = registry
            .creation_order()
            .iter()
            .map(|descriptor| descriptor.name)
            .collect();
        assert_eq!(names, vec!["UserPreference", "User"]);
    }
}
