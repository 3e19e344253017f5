//! [`Command`] for creating a new [`Coupon`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime, Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::coupon::Code;
use crate::{
    domain::{
        coupon::{self, Discount},
        Coupon,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Coupon`].
#[derive(Clone, Debug)]
pub struct CreateCoupon {
    /// [`Code`] of a new [`Coupon`].
    ///
    /// Generated out of [`crate::Config::coupon_code_length`] when absent.
    pub code: Option<coupon::Code>,

    /// [`Discount`] granted by a new [`Coupon`].
    pub discount: Discount,

    /// Indicator whether a new [`Coupon`] is applicable right away.
    pub is_active: bool,
}

impl<Db> Command<CreateCoupon> for Service<Db>
where
    Db: for<'c> Database<
            Select<By<Option<Coupon>, &'c coupon::Code>>,
            Ok = Option<Coupon>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Coupon>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Coupon;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateCoupon) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateCoupon {
            code,
            discount,
            is_active,
        } = cmd;

        if let Discount::Fixed(amount) = discount {
            if !amount.is_positive() {
                return Err(tracerr::new!(E::NonPositiveFixedAmount(amount)));
            }
        }

        let code = code.unwrap_or_else(|| {
            coupon::Code::generate(self.config().coupon_code_length)
        });

        let c = self
            .database()
            .execute(Select(By::new(&code)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if c.is_some() {
            return Err(tracerr::new!(E::CodeOccupied(code)));
        }

        let coupon = Coupon {
            id: coupon::Id::new(),
            code,
            discount,
            is_active,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(coupon.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Coupon(code: {})` created with {} discount",
            coupon.code,
            coupon.discount,
        );

        Ok(coupon)
    }
}

/// Error of [`CreateCoupon`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`coupon::Code`] is already occupied.
    #[display("`{_0}` coupon code is occupied")]
    CodeOccupied(#[error(not(source))] coupon::Code),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Discount::Fixed`] amount is not positive.
    #[display("fixed discount of {_0} is not positive")]
    NonPositiveFixedAmount(#[error(not(source))] Money),
}
