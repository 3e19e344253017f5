//! [`OrderItem`] definitions.

use common::Money;
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::seat;

#[cfg(doc)]
use crate::domain::Order;

/// Single seat line of an [`Order`].
#[derive(Clone, Debug)]
pub struct OrderItem {
    /// ID of this [`OrderItem`].
    pub id: Id,

    /// ID of the [`Order`] owning this [`OrderItem`].
    ///
    /// Maintained exclusively by the owning [`Order`]: set by
    /// [`Order::add_item`] and cleared by [`Order::remove_item`].
    order_id: Option<super::Id>,

    /// ID of the booked [`Seat`].
    ///
    /// [`Seat`]: crate::domain::Seat
    pub seat_id: seat::Id,

    /// [`Label`] of the booked [`Seat`], denormalized for receipts.
    ///
    /// [`Label`]: seat::Label
    /// [`Seat`]: crate::domain::Seat
    pub seat_label: seat::Label,

    /// Indicator whether the booked seat is charged at half price
    /// (students, seniors, etc.).
    pub is_kind_half: bool,

    /// Price of the booked seat before any half-price reduction.
    ///
    /// [`None`] until the pricing step fills it in.
    pub unit_price: Option<Money>,
}

impl OrderItem {
    /// Creates a new [`OrderItem`] not yet owned by any [`Order`].
    #[must_use]
    pub fn new(
        seat_id: seat::Id,
        seat_label: seat::Label,
        is_kind_half: bool,
        unit_price: Option<Money>,
    ) -> Self {
        Self {
            id: Id::new(),
            order_id: None,
            seat_id,
            seat_label,
            is_kind_half,
            unit_price,
        }
    }

    /// Returns the ID of the [`Order`] owning this [`OrderItem`], if any.
    #[must_use]
    pub fn order_id(&self) -> Option<super::Id> {
        self.order_id
    }

    /// Attaches this [`OrderItem`] to the [`Order`] with the provided ID.
    pub(super) fn attach_to(&mut self, order_id: super::Id) {
        self.order_id = Some(order_id);
    }

    /// Detaches this [`OrderItem`] from its [`Order`].
    pub(super) fn detach(&mut self) {
        self.order_id = None;
    }

    /// Returns the final price of this [`OrderItem`]: the unit price, or
    /// half of it for half-price seats, rounded per [`Money`] rules.
    ///
    /// # Errors
    ///
    /// [`UnsetUnitPriceError`] if the unit price hasn't been filled in yet.
    pub fn final_price(&self) -> Result<Money, UnsetUnitPriceError> {
        let unit =
            self.unit_price.ok_or(UnsetUnitPriceError { item: self.id })?;
        Ok(if self.is_kind_half {
            unit.times(Decimal::new(5, 1))
        } else {
            unit
        })
    }
}

/// ID of an [`OrderItem`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
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

/// Error of pricing an [`OrderItem`] with no unit price filled in.
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("`OrderItem` {item} has no unit price set")]
pub struct UnsetUnitPriceError {
    /// ID of the unpriced [`OrderItem`].
    pub item: Id,
}

#[cfg(test)]
mod spec {
    use common::{Currency, Money};
    use rust_decimal::Decimal;

    use crate::domain::seat;

    use super::{OrderItem, UnsetUnitPriceError};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn brl(s: &str) -> Money {
        Money::of_major(decimal(s), Currency::Brl)
    }

    fn item(price: &str, is_kind_half: bool) -> OrderItem {
        OrderItem::new(
            seat::Id::new(),
            seat::Label::new(&seat::RowLabel::from_index(0), 1),
            is_kind_half,
            Some(brl(price)),
        )
    }

    #[test]
    fn full_price_is_unit_price() {
        assert_eq!(item("25.5", false).final_price().unwrap(), brl("25.5"));
    }

    #[test]
    fn half_price_is_half_of_unit_price() {
        assert_eq!(item("25.5", true).final_price().unwrap(), brl("12.75"));
    }

    #[test]
    fn half_price_rounds_half_up() {
        // Half of 0.05 is 0.025, rounded up to 0.03.
        assert_eq!(item("0.05", true).final_price().unwrap(), brl("0.03"));
    }

    #[test]
    fn unset_unit_price_is_an_error() {
        let unpriced = OrderItem::new(
            seat::Id::new(),
            seat::Label::new(&seat::RowLabel::from_index(0), 1),
            false,
            None,
        );

        assert_eq!(
            unpriced.final_price().unwrap_err(),
            UnsetUnitPriceError { item: unpriced.id },
        );
    }
}
