//! [`Order`] definitions.

pub mod item;

#[cfg(doc)]
use common::DateTime;
use common::{define_kind, money, unit, DateTimeOf, Money};
use derive_more::{Display, Error, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    coupon::{self, Discount},
    user, Coupon,
};

pub use self::item::OrderItem;

/// Ticket order placed by a [`User`].
///
/// [`OrderItem`]s, the attached [`Coupon`] and the [`Status`] are private:
/// every mutation goes through methods preserving the pricing and
/// state-machine invariants.
///
/// [`User`]: crate::domain::User
#[derive(Clone, Debug)]
pub struct Order {
    /// ID of this [`Order`].
    pub id: Id,

    /// ID of the [`User`] who placed this [`Order`].
    ///
    /// [`User`]: crate::domain::User
    pub user_id: user::Id,

    /// [`OrderItem`]s of this [`Order`].
    items: Vec<OrderItem>,

    /// [`Coupon`] attached to this [`Order`], if any.
    coupon: Option<Coupon>,

    /// [`Status`] of this [`Order`].
    status: Status,

    /// [`DateTime`] when this [`Order`] was created.
    pub created_at: CreationDateTime,

    /// [`DateTime`] when this [`Order`] was updated last time.
    pub updated_at: UpdateDateTime,
}

impl Order {
    /// Creates a new empty [`Status::Pending`] [`Order`] for the [`User`]
    /// with the provided ID.
    ///
    /// [`User`]: crate::domain::User
    #[must_use]
    pub fn new(user_id: user::Id) -> Self {
        Self {
            id: Id::new(),
            user_id,
            items: Vec::new(),
            coupon: None,
            status: Status::Pending,
            created_at: DateTimeOf::now(),
            updated_at: DateTimeOf::now(),
        }
    }

    /// Returns [`OrderItem`]s of this [`Order`].
    #[must_use]
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the [`Coupon`] attached to this [`Order`], if any.
    #[must_use]
    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    /// Returns the [`coupon::Code`] of the attached [`Coupon`], if any.
    #[must_use]
    pub fn coupon_code(&self) -> Option<&coupon::Code> {
        self.coupon.as_ref().map(|c| &c.code)
    }

    /// Returns the [`Status`] of this [`Order`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Indicates whether this [`Order`] can still be paid.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        self.status == Status::Pending
    }

    /// Adds the provided [`OrderItem`] to this [`Order`], attaching it to
    /// this [`Order`]'s ID.
    pub fn add_item(&mut self, mut item: OrderItem) {
        item.attach_to(self.id);
        self.items.push(item);
        self.touch();
    }

    /// Removes the [`OrderItem`] with the provided ID from this [`Order`],
    /// returning it detached.
    ///
    /// No-op returning [`None`] if no such [`OrderItem`] exists.
    pub fn remove_item(&mut self, id: item::Id) -> Option<OrderItem> {
        let pos = self.items.iter().position(|i| i.id == id)?;
        let mut item = self.items.remove(pos);
        item.detach();
        self.touch();
        Some(item)
    }

    /// Returns the subtotal of this [`Order`]: the sum of its
    /// [`OrderItem`]s' final prices, or [`Money::ZERO`] for an empty
    /// [`Order`].
    ///
    /// # Errors
    ///
    /// [`PricingError`] if some [`OrderItem`] has no unit price, or the
    /// prices mix currencies.
    pub fn subtotal(&self) -> Result<Money, PricingError> {
        let mut sum = None;
        for item in &self.items {
            let price = item.final_price()?;
            sum = Some(match sum {
                Some(acc) => Money::plus(acc, price)?,
                None => price,
            });
        }
        Ok(sum.unwrap_or(Money::ZERO))
    }

    /// Returns the discount granted to this [`Order`] by its attached
    /// [`Coupon`], zero without one.
    ///
    /// A [`Discount::Fixed`] amount is clamped to the current subtotal, so
    /// a coupon left stale by later item removal can never drive the total
    /// negative.
    ///
    /// # Errors
    ///
    /// [`PricingError`] if the subtotal cannot be computed, or a fixed
    /// discount's currency differs from the subtotal's one.
    pub fn discount_total(&self) -> Result<Money, PricingError> {
        let subtotal = self.subtotal()?;
        Ok(match self.coupon.as_ref().map(|c| c.discount) {
            None => Money::zero(subtotal.currency()),
            Some(Discount::Percent(rate)) => subtotal.percentage_of(rate),
            Some(Discount::Fixed(amount)) => {
                if amount.is_greater_than(subtotal)? {
                    subtotal
                } else {
                    amount
                }
            }
        })
    }

    /// Returns the total amount of this [`Order`]: subtotal minus discount.
    ///
    /// # Errors
    ///
    /// [`PricingError`] if the subtotal or the discount cannot be computed.
    pub fn total_amount(&self) -> Result<Money, PricingError> {
        let subtotal = self.subtotal()?;
        Ok(subtotal.minus(self.discount_total()?)?)
    }

    /// Applies the provided [`Coupon`] to this [`Order`], replacing any
    /// previously attached one.
    ///
    /// # Errors
    ///
    /// - [`ApplyCouponError::Inactive`] if the [`Coupon`] is not active.
    /// - [`ApplyCouponError::NotPending`] if this [`Order`] is not
    ///   [`Status::Pending`] anymore.
    /// - [`ApplyCouponError::ExceedsSubtotal`] if a [`Discount::Fixed`]
    ///   amount is greater than the current subtotal.
    /// - [`ApplyCouponError::Pricing`] if the subtotal cannot be computed.
    pub fn apply_coupon(
        &mut self,
        coupon: Coupon,
    ) -> Result<(), ApplyCouponError> {
        if !coupon.is_active {
            return Err(ApplyCouponError::Inactive(coupon.code));
        }
        if self.status != Status::Pending {
            return Err(ApplyCouponError::NotPending(self.status));
        }
        if let Discount::Fixed(amount) = coupon.discount {
            let subtotal = self.subtotal()?;
            if amount
                .is_greater_than(subtotal)
                .map_err(PricingError::from)?
            {
                return Err(ApplyCouponError::ExceedsSubtotal {
                    discount: amount,
                    subtotal,
                });
            }
        }
        self.coupon = Some(coupon);
        self.touch();
        Ok(())
    }

    /// Transitions this [`Order`] from [`Status::Pending`] to
    /// [`Status::Paid`].
    ///
    /// # Errors
    ///
    /// [`TransitionError`] if this [`Order`] is not [`Status::Pending`].
    pub fn pay(&mut self) -> Result<(), TransitionError> {
        self.transition(Status::Paid)
    }

    /// Transitions this [`Order`] from [`Status::Pending`] to
    /// [`Status::Cancelled`].
    ///
    /// # Errors
    ///
    /// [`TransitionError`] if this [`Order`] is not [`Status::Pending`].
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        self.transition(Status::Cancelled)
    }

    /// Transitions this [`Order`] into the provided [`Status`].
    ///
    /// [`Status::Pending`] is the only allowed source state: both
    /// [`Status::Paid`] and [`Status::Cancelled`] are terminal.
    fn transition(&mut self, to: Status) -> Result<(), TransitionError> {
        if self.status != Status::Pending {
            return Err(TransitionError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        self.touch();
        Ok(())
    }

    /// Refreshes the last update time of this [`Order`].
    fn touch(&mut self) {
        self.updated_at = DateTimeOf::now();
    }
}

/// ID of an [`Order`].
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

define_kind! {
    #[doc = "Status of an [`Order`]."]
    enum Status {
        #[doc = "[`Order`] is placed, but not paid yet."]
        Pending = 1,

        #[doc = "[`Order`] is paid. Terminal."]
        Paid = 2,

        #[doc = "[`Order`] is cancelled. Terminal."]
        Cancelled = 3,
    }
}

/// Error of pricing an [`Order`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, From, PartialEq)]
pub enum PricingError {
    /// Some [`OrderItem`] has no unit price filled in.
    UnsetUnitPrice(item::UnsetUnitPriceError),

    /// [`Money`] arithmetic over the [`OrderItem`]s' prices failed.
    Money(money::Error),
}

/// Error of applying a [`Coupon`] to an [`Order`].
#[derive(Clone, Debug, Display, Eq, Error, From, PartialEq)]
pub enum ApplyCouponError {
    /// [`Coupon`] is not active.
    #[display("coupon `{_0}` is not active")]
    Inactive(#[error(not(source))] coupon::Code),

    /// [`Order`] is not [`Status::Pending`] anymore.
    #[display("cannot apply a coupon to an order in `{_0}` status")]
    NotPending(#[error(not(source))] Status),

    /// [`Discount::Fixed`] amount exceeds the [`Order`]'s subtotal.
    #[display(
        "fixed discount of {discount} exceeds the order subtotal of {subtotal}"
    )]
    ExceedsSubtotal {
        /// Fixed discount amount of the rejected [`Coupon`].
        discount: Money,

        /// Current subtotal of the [`Order`].
        subtotal: Money,
    },

    /// Subtotal of the [`Order`] cannot be computed.
    #[display("{_0}")]
    #[from]
    Pricing(PricingError),
}

impl ApplyCouponError {
    /// Returns an action suggested to the user to resolve this error.
    #[must_use]
    pub fn suggested_action(&self) -> &'static str {
        match self {
            Self::Inactive(_) => "Check the provided coupon.",
            Self::NotPending(_) => "Check the order status.",
            Self::ExceedsSubtotal { .. } | Self::Pricing(_) => {
                "Check the order items."
            }
        }
    }
}

/// Error of an illegal [`Status`] transition of an [`Order`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("cannot transition `Order` from `{from}` status to `{to}`")]
pub struct TransitionError {
    /// Current [`Status`] of the [`Order`].
    pub from: Status,

    /// Rejected target [`Status`].
    pub to: Status,
}

/// [`DateTime`] when an [`Order`] was created.
pub type CreationDateTime = DateTimeOf<(Order, unit::Creation)>;

/// [`DateTime`] when an [`Order`] was updated last time.
pub type UpdateDateTime = DateTimeOf<(Order, unit::Update)>;

#[cfg(test)]
mod spec {
    use common::{money, Currency, DateTimeOf, Money, Percent};
    use rust_decimal::Decimal;

    use crate::domain::{coupon, seat, user, Coupon};

    use super::{
        item, ApplyCouponError, Discount, Order, OrderItem, PricingError,
        Status, TransitionError,
    };

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn brl(s: &str) -> Money {
        Money::of_major(decimal(s), Currency::Brl)
    }

    fn item_of(price: Money, is_kind_half: bool) -> OrderItem {
        OrderItem::new(
            seat::Id::new(),
            seat::Label::new(&seat::RowLabel::from_index(0), 1),
            is_kind_half,
            Some(price),
        )
    }

    fn coupon_of(discount: Discount, is_active: bool) -> Coupon {
        Coupon {
            id: coupon::Id::new(),
            code: coupon::Code::new("SAVE10").unwrap(),
            discount,
            is_active,
            created_at: DateTimeOf::now(),
            updated_at: DateTimeOf::now(),
        }
    }

    #[test]
    fn empty_order_prices_to_zero() {
        let order = Order::new(user::Id::new());

        assert_eq!(order.subtotal().unwrap(), Money::ZERO);
        assert_eq!(order.discount_total().unwrap(), Money::ZERO);
        assert_eq!(order.total_amount().unwrap(), Money::ZERO);
    }

    #[test]
    fn subtotal_sums_final_prices() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("25"), false));
        order.add_item(item_of(brl("25"), true));

        assert_eq!(order.subtotal().unwrap(), brl("37.5"));
        assert_eq!(order.total_amount().unwrap(), brl("37.5"));

        // Totals are derived on demand, so repeated reads agree.
        assert_eq!(order.subtotal().unwrap(), brl("37.5"));
        assert_eq!(order.total_amount().unwrap(), brl("37.5"));
    }

    #[test]
    fn unpriced_item_fails_pricing() {
        let mut order = Order::new(user::Id::new());
        order.add_item(OrderItem::new(
            seat::Id::new(),
            seat::Label::new(&seat::RowLabel::from_index(0), 1),
            false,
            None,
        ));

        assert!(matches!(
            order.subtotal().unwrap_err(),
            PricingError::UnsetUnitPrice(_),
        ));
    }

    #[test]
    fn mixed_currencies_fail_pricing() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("10"), false));
        order.add_item(item_of(Money::of(10, Currency::Usd), false));

        assert_eq!(
            order.subtotal().unwrap_err(),
            PricingError::Money(money::Error::CurrencyMismatch(
                Currency::Brl,
                Currency::Usd,
            )),
        );
    }

    #[test]
    fn percent_discount_rounds_half_up() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("33"), false));
        order
            .apply_coupon(coupon_of(
                Discount::Percent(Percent::new(decimal("12.5")).unwrap()),
                true,
            ))
            .unwrap();

        // 12.5% of 33 is 4.125, rounded up to 4.13.
        assert_eq!(order.discount_total().unwrap(), brl("4.13"));
        assert_eq!(order.total_amount().unwrap(), brl("28.87"));
    }

    #[test]
    fn fixed_discount_subtracts_from_subtotal() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));
        order
            .apply_coupon(coupon_of(Discount::Fixed(brl("10")), true))
            .unwrap();

        assert_eq!(
            order.coupon_code().map(ToString::to_string).as_deref(),
            Some("SAVE10"),
        );
        assert_eq!(order.discount_total().unwrap(), brl("10"));
        assert_eq!(order.total_amount().unwrap(), brl("20"));
    }

    #[test]
    fn stale_fixed_discount_is_clamped_to_subtotal() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));
        let cheap = item_of(brl("20"), false);
        let cheap_id = cheap.id;
        order.add_item(cheap);
        order
            .apply_coupon(coupon_of(Discount::Fixed(brl("40")), true))
            .unwrap();

        // Removing items leaves the fixed discount above the new subtotal;
        // the total bottoms out at zero instead of going negative.
        drop(order.remove_item(cheap_id).unwrap());
        assert_eq!(order.subtotal().unwrap(), brl("30"));
        assert_eq!(order.discount_total().unwrap(), brl("30"));
        assert_eq!(order.total_amount().unwrap(), brl("0"));
    }

    #[test]
    fn apply_coupon_rejects_inactive() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));

        let err = order
            .apply_coupon(coupon_of(Discount::Fixed(brl("10")), false))
            .unwrap_err();
        assert!(matches!(err, ApplyCouponError::Inactive(_)));
        assert_eq!(err.suggested_action(), "Check the provided coupon.");
        assert!(order.coupon().is_none());
    }

    #[test]
    fn apply_coupon_rejects_non_pending_order() {
        let mut paid = Order::new(user::Id::new());
        paid.add_item(item_of(brl("30"), false));
        paid.pay().unwrap();

        let err = paid
            .apply_coupon(coupon_of(Discount::Fixed(brl("10")), true))
            .unwrap_err();
        assert_eq!(err, ApplyCouponError::NotPending(Status::Paid));
        assert_eq!(err.suggested_action(), "Check the order status.");

        let mut cancelled = Order::new(user::Id::new());
        cancelled.add_item(item_of(brl("30"), false));
        cancelled.cancel().unwrap();

        let err = cancelled
            .apply_coupon(coupon_of(Discount::Fixed(brl("10")), true))
            .unwrap_err();
        assert_eq!(err, ApplyCouponError::NotPending(Status::Cancelled));
        assert!(cancelled.coupon().is_none());
    }

    #[test]
    fn apply_coupon_rejects_fixed_discount_above_subtotal() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));

        let err = order
            .apply_coupon(coupon_of(Discount::Fixed(brl("30.01")), true))
            .unwrap_err();
        assert_eq!(
            err,
            ApplyCouponError::ExceedsSubtotal {
                discount: brl("30.01"),
                subtotal: brl("30"),
            },
        );
        assert_eq!(err.suggested_action(), "Check the order items.");
    }

    #[test]
    fn apply_coupon_allows_fixed_discount_equal_to_subtotal() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));
        order
            .apply_coupon(coupon_of(Discount::Fixed(brl("30")), true))
            .unwrap();

        assert_eq!(order.total_amount().unwrap(), brl("0"));
    }

    #[test]
    fn apply_coupon_replaces_previous_one() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("30"), false));
        order
            .apply_coupon(coupon_of(Discount::Fixed(brl("10")), true))
            .unwrap();

        let mut second = coupon_of(
            Discount::Percent(Percent::new(decimal("10")).unwrap()),
            true,
        );
        second.code = coupon::Code::new("SAVEMORE").unwrap();
        order.apply_coupon(second).unwrap();

        assert_eq!(
            order.coupon_code().map(ToString::to_string).as_deref(),
            Some("SAVEMORE"),
        );
        assert_eq!(order.discount_total().unwrap(), brl("3"));
    }

    #[test]
    fn add_item_sets_back_reference() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("10"), false));

        assert_eq!(order.items()[0].order_id(), Some(order.id));
    }

    #[test]
    fn remove_item_detaches_it() {
        let mut order = Order::new(user::Id::new());
        let item = item_of(brl("10"), false);
        let id = item.id;
        order.add_item(item);

        let removed = order.remove_item(id).unwrap();
        assert_eq!(removed.order_id(), None);
        assert!(order.items().is_empty());
    }

    #[test]
    fn remove_unknown_item_is_a_noop() {
        let mut order = Order::new(user::Id::new());
        order.add_item(item_of(brl("10"), false));

        assert!(order.remove_item(item::Id::new()).is_none());
        assert_eq!(order.items().len(), 1);
    }

    #[test]
    fn pay_transitions_pending_to_paid() {
        let mut order = Order::new(user::Id::new());
        assert!(order.is_payable());

        order.pay().unwrap();
        assert_eq!(order.status(), Status::Paid);
        assert!(!order.is_payable());
    }

    #[test]
    fn paid_and_cancelled_are_terminal() {
        let mut paid = Order::new(user::Id::new());
        paid.pay().unwrap();
        assert_eq!(
            paid.pay().unwrap_err(),
            TransitionError {
                from: Status::Paid,
                to: Status::Paid,
            },
        );
        assert_eq!(
            paid.cancel().unwrap_err(),
            TransitionError {
                from: Status::Paid,
                to: Status::Cancelled,
            },
        );

        let mut cancelled = Order::new(user::Id::new());
        cancelled.cancel().unwrap();
        assert_eq!(cancelled.status(), Status::Cancelled);
        assert_eq!(
            cancelled.pay().unwrap_err(),
            TransitionError {
                from: Status::Cancelled,
                to: Status::Paid,
            },
        );
    }
}
