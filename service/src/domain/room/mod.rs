//! [`Room`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{
    AsRef, Display, From, FromStr as FromStrMacro, Into,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Seat;

/// Screening room of the cinema.
#[derive(Clone, Debug)]
pub struct Room {
    /// ID of this [`Room`].
    pub id: Id,

    /// [`Name`] of this [`Room`], unique across the cinema.
    pub name: Name,

    /// Number of [`Seat`] rows in this [`Room`].
    pub rows: u16,

    /// Number of [`Seat`]s per row in this [`Room`].
    pub cols: u16,

    /// [`DateTime`] when this [`Room`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Room`] was updated last time.
    pub updated_at: UpdateDateTime,
}

impl Room {
    /// Returns the total number of [`Seat`]s in this [`Room`].
    #[must_use]
    pub fn total_capacity(&self) -> u32 {
        u32::from(self.rows) * u32::from(self.cols)
    }
}

/// ID of a [`Room`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStrMacro,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

/// Name of a [`Room`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Name(String);

impl Name {
    /// Creates a new [`Name`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `name` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Creates a new [`Name`] if the given `name` is valid.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        Self::check(&name).then_some(Self(name))
    }

    /// Checks whether the given `name` is a valid [`Name`].
    fn check(name: impl AsRef<str>) -> bool {
        let name = name.as_ref();
        name.trim() == name && !name.is_empty() && name.len() <= 64
    }
}

impl FromStr for Name {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Name`")
    }
}

/// [`DateTime`] when a [`Room`] was created.
pub type CreationDateTime = DateTimeOf<(Room, unit::Creation)>;

/// [`DateTime`] when a [`Room`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Room, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::DateTimeOf;

    use super::{Id, Name, Room};

    #[test]
    fn capacity_is_rows_times_cols() {
        let room = Room {
            id: Id::new(),
            name: Name::new("IMAX 1").unwrap(),
            rows: 12,
            cols: 20,
            created_at: DateTimeOf::now(),
            updated_at: DateTimeOf::now(),
        };

        assert_eq!(room.total_capacity(), 240);
    }

    #[test]
    fn name_rejects_padded_or_empty() {
        assert!(Name::new("Sala 3").is_some());
        assert!(Name::new("").is_none());
        assert!(Name::new(" Sala ").is_none());
    }
}
