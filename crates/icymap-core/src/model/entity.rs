use crate::model::{field::FieldDescriptor, unique::UniqueDescriptor};

///
/// EntityDescriptor
/// Static metadata for one record type, emitted once by generated code.
///

#[derive(Debug)]
pub struct EntityDescriptor {
    /// Stable external record name used in diagnostics.
    pub name: &'static str,
    /// Table / collection name.
    pub storage_name: &'static str,
    /// Identity field (points at an entry in `fields`).
    pub identity: &'static FieldDescriptor,
    /// Ordered field list, identity included.
    pub fields: &'static [&'static FieldDescriptor],
    /// Unique rules other than the primary key.
    pub uniques: &'static [&'static UniqueDescriptor],
}

impl EntityDescriptor {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().copied().find(|f| f.name == name)
    }

    #[must_use]
    pub fn field_by_storage_name(&self, storage_name: &str) -> Option<&'static FieldDescriptor> {
        self.fields
            .iter()
            .copied()
            .find(|f| f.storage_name == storage_name)
    }

    #[must_use]
    pub fn is_identity(&self, field: &FieldDescriptor) -> bool {
        field.name == self.identity.name
    }

    /// True when `field` is one of this record's descriptors: same name,
    /// storage name, kind and nullability.
    #[must_use]
    pub fn contains(&self, field: &FieldDescriptor) -> bool {
        self.fields.iter().any(|f| *f == field)
    }

    /// Fields carried by the record value itself, in order (identity excluded).
    pub fn value_fields(&self) -> impl Iterator<Item = &'static FieldDescriptor> + '_ {
        self.fields
            .iter()
            .copied()
            .filter(|f| !self.is_identity(f))
    }

    #[must_use]
    pub fn value_field_count(&self) -> usize {
        self.value_fields().count()
    }

    #[must_use]
    pub fn unique(&self, name: &str) -> Option<&'static UniqueDescriptor> {
        self.uniques.iter().copied().find(|u| u.name == name)
    }
}
