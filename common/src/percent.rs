//! [`Percent`]-related definitions.

use std::str::FromStr;

use derive_more::{Display, Into};
use rust_decimal::Decimal;

/// Percentage within the `[0, 100]` range.
///
/// Makes out-of-range percentages unrepresentable: a discount rate above
/// `100%` is rejected at construction, not at the place it is applied.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Into, PartialEq)]
pub struct Percent(Decimal);

impl Percent {
    /// Whole `100%`.
    pub const ONE_HUNDRED: Self = Self(Decimal::ONE_HUNDRED);

    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Creates a new [`Percent`] by checking the provided value is not less
    /// than `0` and not greater than `100`.
    #[must_use]
    pub fn new(val: Decimal) -> Option<Self> {
        if val < Decimal::ZERO || val > Decimal::ONE_HUNDRED {
            None
        } else {
            Some(Self(val))
        }
    }

    /// Creates a new [`Percent`] without performing any validation.
    ///
    /// # Safety
    ///
    /// The provided value must not be less than `0` and not greater than
    /// `100`.
    #[expect(unsafe_code, reason = "bypass")]
    #[must_use]
    pub unsafe fn new_unchecked(val: Decimal) -> Self {
        Self(val)
    }
}

impl FromStr for Percent {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s)
            .ok()
            .and_then(Self::new)
            .ok_or("invalid percent value")
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use super::Percent;

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn accepts_range_bounds() {
        assert!(Percent::new(Decimal::ZERO).is_some());
        assert!(Percent::new(decimal("12.5")).is_some());
        assert!(Percent::new(Decimal::ONE_HUNDRED).is_some());
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(Percent::new(decimal("-0.01")).is_none());
        assert!(Percent::new(decimal("100.01")).is_none());
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Percent::from_str("12.5").unwrap(),
            Percent::new(decimal("12.5")).unwrap(),
        );
        assert!(Percent::from_str("101").is_err());
        assert!(Percent::from_str("-1").is_err());
        assert!(Percent::from_str("12,5").is_err());
    }

    #[test]
    fn into_decimal() {
        let p = Percent::new(decimal("33.3")).unwrap();
        assert_eq!(Decimal::from(p), decimal("33.3"));
    }
}
