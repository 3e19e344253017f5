//! [`Coupon`] definitions.

use std::str::FromStr;

#[cfg(doc)]
use common::DateTime;
use common::{unit, DateTimeOf, Money, Percent};
use derive_more::{
    AsRef, Display, From, FromStr as FromStrMacro, Into,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(doc)]
use crate::domain::Order;

/// Discount coupon applicable to an [`Order`].
///
/// Passive data holder: all the gating (active flag, [`Order`] status,
/// subtotal checks) lives in [`Order::apply_coupon`].
#[derive(Clone, Debug)]
pub struct Coupon {
    /// ID of this [`Coupon`].
    pub id: Id,

    /// Unique [`Code`] of this [`Coupon`].
    pub code: Code,

    /// [`Discount`] granted by this [`Coupon`].
    pub discount: Discount,

    /// Indicator whether this [`Coupon`] can be applied to [`Order`]s.
    pub is_active: bool,

    /// [`DateTime`] when this [`Coupon`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Coupon`] was updated last time.
    pub updated_at: UpdateDateTime,
}

/// ID of a [`Coupon`].
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

/// Discount granted by a [`Coupon`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Discount {
    /// Fixed amount subtracted from an [`Order`]'s subtotal.
    #[display("{_0}")]
    Fixed(Money),

    /// Percentage of an [`Order`]'s subtotal.
    #[display("{_0}%")]
    Percent(Percent),
}

/// Unique uppercase-alphanumeric code of a [`Coupon`].
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Code(String);

impl Code {
    /// Maximum length of a [`Code`], in characters.
    pub const MAX_LENGTH: usize = 32;

    /// Creates a new [`Code`].
    ///
    /// # Safety
    ///
    /// The caller must ensure that the given `code` matches the format.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Creates a new [`Code`] if the given `code` is valid.
    #[must_use]
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        Self::check(&code).then_some(Self(code))
    }

    /// Generates a new random [`Code`] of the provided length (capped at
    /// [`MAX_LENGTH`]) out of a fresh [`Uuid`]'s uppercased hex form.
    ///
    /// [`MAX_LENGTH`]: Self::MAX_LENGTH
    #[must_use]
    pub fn generate(length: usize) -> Self {
        Self(
            Uuid::new_v4()
                .simple()
                .to_string()
                .to_uppercase()
                .chars()
                .take(length.max(1))
                .collect(),
        )
    }

    /// Checks whether the given `code` is a valid [`Code`].
    fn check(code: impl AsRef<str>) -> bool {
        let code = code.as_ref();
        !code.is_empty()
            && code.len() <= Self::MAX_LENGTH
            && code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    }
}

impl FromStr for Code {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Code`")
    }
}

/// [`DateTime`] when a [`Coupon`] was created.
pub type CreationDateTime = DateTimeOf<(Coupon, unit::Creation)>;

/// [`DateTime`] when a [`Coupon`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Coupon, unit::Update)>;

#[cfg(test)]
mod spec {
    use super::Code;

    #[test]
    fn generated_code_has_requested_length_and_charset() {
        for len in [4, 8, 16, 32] {
            let code = Code::generate(len);
            assert_eq!(code.to_string().len(), len);
            assert!(code
                .to_string()
                .chars()
                .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
        }
    }

    #[test]
    fn generated_code_is_valid() {
        assert!(Code::new(Code::generate(8).to_string()).is_some());
    }

    #[test]
    fn code_rejects_lowercase_and_empty() {
        assert!(Code::new("SAVE10").is_some());
        assert!(Code::new("save10").is_none());
        assert!(Code::new("").is_none());
        assert!(Code::new("TOO LONG CODE").is_none());
        assert!(Code::new("X".repeat(33)).is_none());
    }
}
