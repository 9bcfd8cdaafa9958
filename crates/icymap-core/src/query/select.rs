use crate::{
    accessor::{FieldLens, FieldRef},
    entity::Entity,
    error::Error,
    traits::Record,
    value::Value,
};
use std::{cmp::Ordering, fmt};

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

///
/// SelectOption
///
/// Ordering and paging hints for a select. Offset and limit are carried as
/// given; interpreting them is the backend's job.
///

pub enum SelectOption<R> {
    Asc(FieldRef<R>),
    Desc(FieldRef<R>),
    OffsetBy(u64),
    LimitTo(u64),
}

impl<R> Clone for SelectOption<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SelectOption<R> {}

impl<R> fmt::Debug for SelectOption<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc(field) => f.debug_tuple("Asc").field(field).finish(),
            Self::Desc(field) => f.debug_tuple("Desc").field(field).finish(),
            Self::OffsetBy(n) => f.debug_tuple("OffsetBy").field(n).finish(),
            Self::LimitTo(n) => f.debug_tuple("LimitTo").field(n).finish(),
        }
    }
}

impl<R> PartialEq for SelectOption<R> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Asc(a), Self::Asc(b)) | (Self::Desc(a), Self::Desc(b)) => a == b,
            (Self::OffsetBy(a), Self::OffsetBy(b)) | (Self::LimitTo(a), Self::LimitTo(b)) => {
                a == b
            }
            _ => false,
        }
    }
}

impl<R> Eq for SelectOption<R> {}

///
/// SelectWindow
///
/// Options folded into one paging window plus an ordered sort list.
/// When offset or limit appears more than once the last occurrence wins.
///

pub struct SelectWindow<R> {
    offset: Option<u64>,
    limit: Option<u64>,
    order: Vec<(FieldRef<R>, SortDirection)>,
}

impl<R> SelectWindow<R> {
    #[must_use]
    pub fn from_options(options: &[SelectOption<R>]) -> Self {
        let mut window = Self {
            offset: None,
            limit: None,
            order: Vec::new(),
        };

        for option in options {
            match *option {
                SelectOption::Asc(field) => window.order.push((field, SortDirection::Asc)),
                SelectOption::Desc(field) => window.order.push((field, SortDirection::Desc)),
                SelectOption::OffsetBy(n) => window.offset = Some(n),
                SelectOption::LimitTo(n) => window.limit = Some(n),
            }
        }

        window
    }

    #[must_use]
    pub const fn offset(&self) -> Option<u64> {
        self.offset
    }

    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        self.limit
    }

    #[must_use]
    pub fn order(&self) -> &[(FieldRef<R>, SortDirection)] {
        &self.order
    }
}

impl<R: Record> SelectWindow<R> {
    /// Sort and page an in-memory result set.
    ///
    /// Sorting is stable and uses the canonical value order per field.
    pub fn apply(&self, entities: Vec<Entity<R>>) -> Result<Vec<Entity<R>>, Error> {
        let lenses = self
            .order
            .iter()
            .map(|(field, direction)| Ok((field.lens()?, *direction)))
            .collect::<Result<Vec<_>, Error>>()?;

        let mut rows: Vec<(Vec<Value>, Entity<R>)> = entities
            .into_iter()
            .map(|entity| {
                let sort_key = lenses
                    .iter()
                    .map(|(lens, _)| lens.get_value(&entity))
                    .collect();
                (sort_key, entity)
            })
            .collect();

        if !lenses.is_empty() {
            rows.sort_by(|(a, _), (b, _)| compare_rows(&lenses, a, b));
        }

        let offset = self.offset.map_or(0, saturating_usize);
        let limit = self.limit.map_or(usize::MAX, saturating_usize);

        Ok(rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|(_, entity)| entity)
            .collect())
    }
}

fn compare_rows<R: Record>(
    lenses: &[(&'static dyn FieldLens<R>, SortDirection)],
    a: &[Value],
    b: &[Value],
) -> Ordering {
    lenses
        .iter()
        .zip(a.iter().zip(b))
        .map(|((_, direction), (left, right))| {
            let ord = Value::canonical_cmp(left, right);
            match direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        })
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

fn saturating_usize(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

impl<R> Clone for SelectWindow<R> {
    fn clone(&self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit,
            order: self.order.clone(),
        }
    }
}

impl<R> fmt::Debug for SelectWindow<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectWindow")
            .field("offset", &self.offset)
            .field("limit", &self.limit)
            .field("order", &self.order)
            .finish()
    }
}

impl<R> PartialEq for SelectWindow<R> {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.limit == other.limit && self.order == other.order
    }
}
