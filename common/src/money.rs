//! [`Money`]-related definitions.

use std::{cmp::Ordering, fmt, str::FromStr};

use derive_more::{Display, Error as StdError};
use rust_decimal::{
    prelude::ToPrimitive as _, Decimal, RoundingStrategy,
};

use crate::{define_kind, Percent};

/// Rounding applied whenever an amount is brought to the official scale of
/// its [`Currency`].
const ROUNDING: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// Amount of money in some [`Currency`].
///
/// Immutable value type: every operation returns a new [`Money`], and there
/// is no way to construct an unnormalized instance. The stored amount keeps
/// the full [`Decimal`] precision (arithmetic is exact), while every
/// arithmetic result is rounded to the official scale of its [`Currency`]
/// with round-half-up before being returned.
///
/// [`Display`]s in a locale-aware form (`R$ 10,50`), while [`FromStr`]
/// parses the compact `{amount}{CODE}` wire form (`10.5BRL`).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Money {
    /// Amount of this [`Money`], normalized (no trailing zeros).
    amount: Decimal,

    /// [`Currency`] of this amount.
    currency: Currency,
}

impl Money {
    /// [`Currency`] assumed when no explicit one is involved.
    pub const DEFAULT_CURRENCY: Currency = Currency::Brl;

    /// Zero amount in the [`DEFAULT_CURRENCY`].
    ///
    /// [`DEFAULT_CURRENCY`]: Self::DEFAULT_CURRENCY
    pub const ZERO: Self = Self {
        amount: Decimal::ZERO,
        currency: Self::DEFAULT_CURRENCY,
    };

    /// Creates a new [`Money`] from the provided amount of major units.
    #[must_use]
    pub fn of_major(amount: Decimal, currency: Currency) -> Self {
        Self {
            amount: amount.normalize(),
            currency,
        }
    }

    /// Creates a new [`Money`] from the provided amount of minor units
    /// (cents, for currencies with 2 official fraction digits).
    #[must_use]
    pub fn of_minor(minor: i64, currency: Currency) -> Self {
        Self::of_major(Decimal::new(minor, currency.fraction_digits()), currency)
    }

    /// Creates a new [`Money`] from the provided integer amount of major
    /// units.
    #[must_use]
    pub fn of(amount: impl Into<Decimal>, currency: Currency) -> Self {
        Self::of_major(amount.into(), currency)
    }

    /// Creates a new zero [`Money`] in the provided [`Currency`].
    #[must_use]
    pub fn zero(currency: Currency) -> Self {
        Self::of_major(Decimal::ZERO, currency)
    }

    /// Returns the amount of this [`Money`].
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.amount
    }

    /// Returns the [`Currency`] of this [`Money`].
    #[must_use]
    pub const fn currency(self) -> Currency {
        self.currency
    }

    /// Returns the amount at the official scale of this [`Money`]'s
    /// [`Currency`], rounded half-up.
    #[must_use]
    pub fn to_official_scale(self) -> Decimal {
        self.amount
            .round_dp_with_strategy(self.currency.fraction_digits(), ROUNDING)
    }

    /// Rounds this [`Money`] to the official scale of its [`Currency`].
    #[must_use]
    pub fn with_official_scale(self) -> Self {
        Self::of_major(self.to_official_scale(), self.currency)
    }

    /// Indicates whether this [`Money`] amount is zero.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.amount.is_zero()
    }

    /// Indicates whether this [`Money`] amount is greater than zero.
    #[must_use]
    pub fn is_positive(self) -> bool {
        self.amount > Decimal::ZERO
    }

    /// Indicates whether this [`Money`] amount is less than zero.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.amount < Decimal::ZERO
    }

    /// Adds the provided [`Money`] to this one.
    ///
    /// # Errors
    ///
    /// [`Error::CurrencyMismatch`] if the [`Currency`]s differ.
    pub fn plus(self, other: Self) -> Result<Self, Error> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: self.amount + other.amount,
            currency: self.currency,
        }
        .with_official_scale())
    }

    /// Subtracts the provided [`Money`] from this one.
    ///
    /// # Errors
    ///
    /// [`Error::CurrencyMismatch`] if the [`Currency`]s differ.
    pub fn minus(self, other: Self) -> Result<Self, Error> {
        self.ensure_same_currency(other)?;
        Ok(Self {
            amount: self.amount - other.amount,
            currency: self.currency,
        }
        .with_official_scale())
    }

    /// Multiplies this [`Money`] by the provided factor.
    #[must_use]
    pub fn times(self, factor: Decimal) -> Self {
        Self {
            amount: self.amount * factor,
            currency: self.currency,
        }
        .with_official_scale()
    }

    /// Divides this [`Money`] by the provided divisor.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDivisor`] if the divisor is zero.
    pub fn divide(self, divisor: Decimal) -> Result<Self, Error> {
        if divisor.is_zero() {
            return Err(Error::ZeroDivisor);
        }
        Ok(Self {
            amount: self.amount / divisor,
            currency: self.currency,
        }
        .with_official_scale())
    }

    /// Divides this [`Money`] by the provided divisor, rounding the quotient
    /// to the provided scale with the provided strategy first.
    ///
    /// # Errors
    ///
    /// [`Error::ZeroDivisor`] if the divisor is zero.
    pub fn divide_rounded(
        self,
        divisor: Decimal,
        scale: u32,
        strategy: RoundingStrategy,
    ) -> Result<Self, Error> {
        if divisor.is_zero() {
            return Err(Error::ZeroDivisor);
        }
        let quotient =
            (self.amount / divisor).round_dp_with_strategy(scale, strategy);
        Ok(Self::of_major(quotient, self.currency).with_official_scale())
    }

    /// Negates this [`Money`].
    #[must_use]
    pub fn negate(self) -> Self {
        Self {
            amount: -self.amount,
            currency: self.currency,
        }
    }

    /// Returns the absolute value of this [`Money`].
    #[must_use]
    pub fn abs(self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            self
        }
    }

    /// Clamps this [`Money`] to be not less than zero, preserving the
    /// [`Currency`].
    #[must_use]
    pub fn min_zero(self) -> Self {
        if self.is_negative() {
            Self::zero(self.currency)
        } else {
            self
        }
    }

    /// Clamps this [`Money`] to be not greater than zero, preserving the
    /// [`Currency`].
    #[must_use]
    pub fn max_zero(self) -> Self {
        if self.is_positive() {
            Self::zero(self.currency)
        } else {
            self
        }
    }

    /// Returns the provided percentage of this [`Money`]
    /// (`15%` of `100` is `15`).
    #[must_use]
    pub fn percentage_of(self, percent: Percent) -> Self {
        let factored = self.times(Decimal::from(percent));
        Self {
            amount: factored.amount / Decimal::ONE_HUNDRED,
            currency: self.currency,
        }
        .with_official_scale()
    }

    /// Applies the provided percentage discount to this [`Money`]
    /// (`10%` off of `100` is `90`).
    #[must_use]
    pub fn apply_discount(self, percent: Percent) -> Self {
        let factor =
            Decimal::ONE - Decimal::from(percent) / Decimal::ONE_HUNDRED;
        self.times(factor)
    }

    /// Compares this [`Money`] to the provided one.
    ///
    /// # Errors
    ///
    /// [`Error::CurrencyMismatch`] if the [`Currency`]s differ.
    pub fn checked_cmp(self, other: Self) -> Result<Ordering, Error> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Indicates whether this [`Money`] is less than the provided one.
    ///
    /// # Errors
    ///
    /// [`Error::CurrencyMismatch`] if the [`Currency`]s differ.
    pub fn is_less_than(self, other: Self) -> Result<bool, Error> {
        Ok(self.checked_cmp(other)? == Ordering::Less)
    }

    /// Indicates whether this [`Money`] is greater than the provided one.
    ///
    /// # Errors
    ///
    /// [`Error::CurrencyMismatch`] if the [`Currency`]s differ.
    pub fn is_greater_than(self, other: Self) -> Result<bool, Error> {
        Ok(self.checked_cmp(other)? == Ordering::Greater)
    }

    /// Converts this [`Money`] into minor units of its [`Currency`], rounding
    /// to the official scale first.
    ///
    /// # Errors
    ///
    /// - [`Error::FractionalMinorUnits`] if the official-scale amount still
    ///   has a fractional remainder (never silently truncated).
    /// - [`Error::MinorUnitsOverflow`] if the amount doesn't fit into [`i64`]
    ///   minor units.
    pub fn to_minor_units(self) -> Result<i64, Error> {
        let shift = Decimal::from(10_u32.pow(self.currency.fraction_digits()));
        let shifted = self.to_official_scale() * shift;
        if !shifted.fract().is_zero() {
            return Err(Error::FractionalMinorUnits(self));
        }
        shifted.to_i64().ok_or(Error::MinorUnitsOverflow(self))
    }

    /// Allocates this [`Money`] into `parts` near-equal shares, distributing
    /// the minor-unit remainder over the first shares.
    ///
    /// The shares always sum up to this exact [`Money`].
    ///
    /// # Errors
    ///
    /// - [`Error::ZeroParts`] if `parts` is zero.
    /// - [`Error::MinorUnitsOverflow`] if the amount doesn't fit into [`i64`]
    ///   minor units.
    pub fn allocate(self, parts: u32) -> Result<Vec<Self>, Error> {
        if parts == 0 {
            return Err(Error::ZeroParts);
        }
        let total = self.to_minor_units()?;
        let parts = i64::from(parts);
        let base = total.div_euclid(parts);
        let remainder = total.rem_euclid(parts);
        Ok((0..parts)
            .map(|i| {
                let minor = if i < remainder { base + 1 } else { base };
                Self::of_minor(minor, self.currency)
            })
            .collect())
    }

    /// Converts this [`Money`] into the provided [`Currency`] with the
    /// explicitly provided exchange rate (obtaining the rate is the caller's
    /// responsibility).
    ///
    /// # Errors
    ///
    /// [`Error::NonPositiveRate`] if the rate is not greater than zero.
    pub fn convert_to(
        self,
        currency: Currency,
        rate: Decimal,
    ) -> Result<Self, Error> {
        if rate <= Decimal::ZERO {
            return Err(Error::NonPositiveRate(rate));
        }
        Ok(Self::of_major(self.amount * rate, currency)
            .with_official_scale())
    }

    /// Checks the provided [`Money`] has the same [`Currency`] as this one.
    fn ensure_same_currency(self, other: Self) -> Result<(), Error> {
        if self.currency == other.currency {
            Ok(())
        } else {
            Err(Error::CurrencyMismatch(self.currency, other.currency))
        }
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scaled = self.to_official_scale();
        if scaled.is_sign_negative() {
            f.write_str("-")?;
        }
        write!(f, "{} ", self.currency.symbol())?;
        format_amount(f, scaled.abs(), self.currency)
    }
}

/// Writes the non-negative `amount` with the `currency`'s separators at its
/// official scale.
fn format_amount(
    f: &mut fmt::Formatter<'_>,
    amount: Decimal,
    currency: Currency,
) -> fmt::Result {
    let int = amount.trunc();
    let int_digits = int.to_string();
    for (i, c) in int_digits.chars().enumerate() {
        if i > 0 && (int_digits.len() - i) % 3 == 0 {
            write!(f, "{}", currency.grouping_separator())?;
        }
        write!(f, "{c}")?;
    }

    let digits = currency.fraction_digits();
    if digits == 0 {
        return Ok(());
    }
    let minor = ((amount - int) * Decimal::from(10_u32.pow(digits)))
        .to_u64()
        .unwrap_or_default();
    write!(
        f,
        "{}{minor:0width$}",
        currency.decimal_separator(),
        width = digits as usize,
    )
}

impl FromStr for Money {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() < 4 || !s.is_ascii() {
            return Err("invalid format");
        }

        let (amount, currency) = s.split_at(s.len() - 3);
        let amount = Decimal::from_str(amount).map_err(|_| "invalid amount")?;
        let currency =
            Currency::from_str(currency).map_err(|_| "invalid currency")?;

        Ok(Self::of_major(amount, currency))
    }
}

/// Error of a [`Money`] operation.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// Arithmetic between two [`Money`] values of different [`Currency`]s.
    #[display("`Currency` mismatch: {_0} vs {_1}")]
    CurrencyMismatch(Currency, Currency),

    /// Division of a [`Money`] value by zero.
    #[display("cannot divide by zero")]
    ZeroDivisor,

    /// [`Money`] value doesn't fit into [`i64`] minor units.
    #[display("`{_0}` overflows minor units of its `Currency`")]
    MinorUnitsOverflow(#[error(not(source))] Money),

    /// [`Money`] value has a fractional remainder beyond the official scale
    /// of its [`Currency`].
    #[display(
        "`{_0}` has a fractional remainder beyond the official scale of its \
         `Currency`"
    )]
    FractionalMinorUnits(#[error(not(source))] Money),

    /// Allocation over a zero number of parts.
    #[display("cannot allocate over zero parts")]
    ZeroParts,

    /// [`Currency`] conversion with a non-positive exchange rate.
    #[display("exchange rate {_0} is not positive")]
    NonPositiveRate(#[error(not(source))] Decimal),
}

define_kind! {
    #[doc = "Currency of a [`Money`] amount."]
    enum Currency {
        #[doc = "Brazilian Real."]
        Brl = 1,

        #[doc = "US Dollar."]
        Usd = 2,

        #[doc = "Euro."]
        Eur = 3,
    }
}

impl Currency {
    /// Number of decimal digits this [`Currency`] officially uses for
    /// display and storage.
    #[must_use]
    pub const fn fraction_digits(self) -> u32 {
        match self {
            Self::Brl | Self::Usd | Self::Eur => 2,
        }
    }

    /// Symbol of this [`Currency`].
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Brl => "R$",
            Self::Usd => "$",
            Self::Eur => "€",
        }
    }

    /// Decimal separator conventionally used with this [`Currency`].
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::Brl | Self::Eur => ',',
            Self::Usd => '.',
        }
    }

    /// Grouping separator conventionally used with this [`Currency`].
    #[must_use]
    pub const fn grouping_separator(self) -> char {
        match self {
            Self::Brl | Self::Eur => '.',
            Self::Usd => ',',
        }
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use rust_decimal::Decimal;

    use crate::Percent;

    use super::{Currency, Error, Money};

    fn decimal(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn brl(s: &str) -> Money {
        Money::of_major(decimal(s), Currency::Brl)
    }

    #[test]
    fn from_str() {
        assert_eq!(
            Money::from_str("123.45BRL").unwrap(),
            brl("123.45"),
        );
        assert_eq!(
            Money::from_str("123.45USD").unwrap(),
            Money::of_major(decimal("123.45"), Currency::Usd),
        );

        assert!(Money::from_str("123.45").is_err());
        assert!(Money::from_str("123.45Br").is_err());
        assert!(Money::from_str("123.45Brazil").is_err());

        assert!(Money::from_str("123.00BRL").is_ok());
        assert!(Money::from_str("123BRL").is_ok());
    }

    #[test]
    fn strips_trailing_zeros() {
        assert_eq!(brl("10.50"), brl("10.5"));
        assert_eq!(brl("10.50").amount(), decimal("10.5"));
    }

    #[test]
    fn display_locale_aware() {
        assert_eq!(brl("10.5").to_string(), "R$ 10,50");
        assert_eq!(brl("1234.5").to_string(), "R$ 1.234,50");
        assert_eq!(
            Money::of_major(decimal("1234.5"), Currency::Usd).to_string(),
            "$ 1,234.50",
        );
        assert_eq!(
            Money::of_major(decimal("1234.5"), Currency::Eur).to_string(),
            "€ 1.234,50",
        );
        assert_eq!(brl("-5").to_string(), "-R$ 5,00");
        assert_eq!(Money::of(1_234_567, Currency::Brl).to_string(), "R$ 1.234.567,00");
    }

    #[test]
    fn plus_same_currency() {
        assert_eq!(brl("10").plus(brl("5.25")).unwrap(), brl("15.25"));
    }

    #[test]
    fn plus_rounds_half_up_to_official_scale() {
        assert_eq!(brl("0.005").plus(Money::zero(Currency::Brl)).unwrap(), brl("0.01"));
        assert_eq!(brl("0.004").plus(Money::zero(Currency::Brl)).unwrap(), brl("0"));
    }

    #[test]
    fn plus_mismatched_currencies() {
        assert_eq!(
            Money::of(10, Currency::Usd).plus(brl("5")).unwrap_err(),
            Error::CurrencyMismatch(Currency::Usd, Currency::Brl),
        );
    }

    #[test]
    fn minus_same_currency() {
        assert_eq!(brl("10").minus(brl("5")).unwrap(), brl("5"));
    }

    #[test]
    fn minus_mismatched_currencies() {
        assert_eq!(
            brl("10").minus(Money::of(5, Currency::Eur)).unwrap_err(),
            Error::CurrencyMismatch(Currency::Brl, Currency::Eur),
        );
    }

    #[test]
    fn times() {
        assert_eq!(brl("10").times(decimal("2.5")), brl("25"));
        assert_eq!(brl("25").times(decimal("0.5")), brl("12.5"));
    }

    #[test]
    fn divide() {
        assert_eq!(brl("10").divide(decimal("3")).unwrap(), brl("3.33"));
        assert_eq!(
            brl("10").divide(Decimal::ZERO).unwrap_err(),
            Error::ZeroDivisor,
        );
    }

    #[test]
    fn percentage_of_rounds_half_up() {
        // 12.5% of 33 = 4.125, rounded half-up to 4.13.
        assert_eq!(
            Money::of(33, Currency::Brl)
                .percentage_of(Percent::new(decimal("12.5")).unwrap()),
            brl("4.13"),
        );
        assert_eq!(
            Money::of(100, Currency::Brl)
                .percentage_of(Percent::new(decimal("10")).unwrap()),
            brl("10"),
        );
    }

    #[test]
    fn apply_discount() {
        assert_eq!(
            Money::of(200, Currency::Brl)
                .apply_discount(Percent::new(decimal("10")).unwrap()),
            brl("180"),
        );
    }

    #[test]
    fn sign_predicates_and_clamps() {
        assert!(Money::ZERO.is_zero());
        assert!(brl("0.01").is_positive());
        assert!(brl("-0.01").is_negative());

        assert_eq!(brl("-10").min_zero(), Money::zero(Currency::Brl));
        assert_eq!(brl("10").min_zero(), brl("10"));
        assert_eq!(brl("10").max_zero(), Money::zero(Currency::Brl));
        assert_eq!(brl("-10").max_zero(), brl("-10"));

        assert_eq!(brl("-10").abs(), brl("10"));
        assert_eq!(brl("10").negate(), brl("-10"));
    }

    #[test]
    fn checked_cmp_requires_same_currency() {
        assert!(brl("5").is_less_than(brl("10")).unwrap());
        assert!(brl("10").is_greater_than(brl("5")).unwrap());
        assert_eq!(
            brl("5").checked_cmp(Money::of(5, Currency::Usd)).unwrap_err(),
            Error::CurrencyMismatch(Currency::Brl, Currency::Usd),
        );
    }

    #[test]
    fn minor_units_round_trip() {
        assert_eq!(brl("10.5").to_minor_units().unwrap(), 1050);
        assert_eq!(Money::of_minor(1050, Currency::Brl), brl("10.5"));
        assert_eq!(Money::of_minor(-5, Currency::Brl), brl("-0.05"));
    }

    #[test]
    fn allocate_distributes_remainder_first() {
        let shares = brl("0.10").allocate(3).unwrap();
        assert_eq!(shares, vec![brl("0.04"), brl("0.03"), brl("0.03")]);

        let sum = shares
            .into_iter()
            .try_fold(Money::ZERO, Money::plus)
            .unwrap();
        assert_eq!(sum, brl("0.10"));

        assert_eq!(brl("1").allocate(0).unwrap_err(), Error::ZeroParts);
    }

    #[test]
    fn convert_to_requires_positive_rate() {
        assert_eq!(
            brl("10").convert_to(Currency::Usd, decimal("0.2")).unwrap(),
            Money::of(2, Currency::Usd),
        );
        assert_eq!(
            brl("10").convert_to(Currency::Usd, Decimal::ZERO).unwrap_err(),
            Error::NonPositiveRate(Decimal::ZERO),
        );
    }
}
