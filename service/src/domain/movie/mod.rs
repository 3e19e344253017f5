//! [`Movie`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf};
use derive_more::{
    AsRef, Display, From, FromStr as FromStrMacro, Into,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Movie screened by the cinema.
#[derive(Clone, Debug)]
pub struct Movie {
    /// ID of this [`Movie`].
    pub id: Id,

    /// [`Title`] of this [`Movie`].
    pub title: Title,

    /// Duration of this [`Movie`], in minutes.
    pub duration_min: u16,

    /// Age [`Rating`] of this [`Movie`].
    pub rating: Rating,

    /// [`Synopsis`] of this [`Movie`].
    pub synopsis: Option<Synopsis>,

    /// [`DateTime`] when this [`Movie`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Movie`] was updated last time.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Movie`].
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

/// Title of a [`Movie`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Title(String);

impl Title {
    /// Creates a new [`Title`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `title` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(title: impl Into<String>) -> Self {
        Self(title.into())
    }

    /// Creates a new [`Title`] if the given `title` is valid.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Option<Self> {
        let title = title.into();
        Self::check(&title).then_some(Self(title))
    }

    /// Checks whether the given `title` is a valid [`Title`].
    fn check(title: impl AsRef<str>) -> bool {
        let title = title.as_ref();
        title.trim() == title && !title.is_empty() && title.len() <= 256
    }
}

impl FromStr for Title {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Title`")
    }
}

/// Age rating of a [`Movie`] (e.g. `PG-13`).
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Rating(String);

impl Rating {
    /// Creates a new [`Rating`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `rating` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(rating: impl Into<String>) -> Self {
        Self(rating.into())
    }

    /// Creates a new [`Rating`] if the given `rating` is valid.
    #[must_use]
    pub fn new(rating: impl Into<String>) -> Option<Self> {
        let rating = rating.into();
        Self::check(&rating).then_some(Self(rating))
    }

    /// Checks whether the given `rating` is a valid [`Rating`].
    fn check(rating: impl AsRef<str>) -> bool {
        let rating = rating.as_ref();
        !rating.is_empty()
            && rating.len() <= 16
            && rating
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '+')
    }
}

impl FromStr for Rating {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Rating`")
    }
}

/// Synopsis of a [`Movie`].
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str, String)]
pub struct Synopsis(String);

impl Synopsis {
    /// Creates a new [`Synopsis`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `text` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Creates a new [`Synopsis`] if the given `text` is valid.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        Self::check(&text).then_some(Self(text))
    }

    /// Checks whether the given `text` is a valid [`Synopsis`].
    fn check(text: impl AsRef<str>) -> bool {
        let text = text.as_ref();
        !text.trim().is_empty() && text.len() <= 4096
    }
}

impl FromStr for Synopsis {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Synopsis`")
    }
}

/// [`DateTime`] when a [`Movie`] was created.
pub type CreationDateTime = DateTimeOf<(Movie, unit::Creation)>;

/// [`DateTime`] when a [`Movie`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Movie, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::{Rating, Title};

    #[test]
    fn title_rejects_padded_or_empty() {
        assert!(Title::new("Blade Runner").is_some());
        assert!(Title::new("").is_none());
        assert!(Title::new(" padded ").is_none());
    }

    #[test]
    fn rating_accepts_common_forms() {
        assert!(Rating::new("PG-13").is_some());
        assert!(Rating::new("18+").is_some());
        assert!(Rating::new("").is_none());
        assert!(Rating::new("not a rating").is_none());
    }
}
