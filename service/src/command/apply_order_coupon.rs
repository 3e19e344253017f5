//! [`Command`] for applying a [`Coupon`] to an [`Order`].

use common::operations::{
    By, Commit, Lock, Select, Transact, Transacted, Update,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{coupon, order, Coupon, Order},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for applying a [`Coupon`] to an [`Order`].
#[derive(Clone, Debug)]
pub struct ApplyOrderCoupon {
    /// ID of the [`Order`] to apply the [`Coupon`] to.
    pub order_id: order::Id,

    /// [`coupon::Code`] of the [`Coupon`] to apply.
    pub code: coupon::Code,
}

impl<Db> Command<ApplyOrderCoupon> for Service<Db>
where
    Db: for<'c> Database<
            Select<By<Option<Coupon>, &'c coupon::Code>>,
            Ok = Option<Coupon>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Order, order::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Order>, order::Id>>,
            Ok = Option<Order>,
            Err = Traced<database::Error>,
        > + Database<Update<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: ApplyOrderCoupon,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let ApplyOrderCoupon { order_id, code } = cmd;

        let coupon = self
            .database()
            .execute(Select(By::new(&code)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::CouponNotExists(code))
            .map_err(tracerr::wrap!())?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent mutations of the same `Order`.
        tx.execute(Lock(By::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut order = tx
            .execute(Select(By::<Option<Order>, _>::new(order_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::OrderNotExists(order_id))
            .map_err(tracerr::wrap!())?;

        let code = coupon.code.clone();
        order
            .apply_coupon(coupon)
            .map_err(E::from)
            .map_err(tracerr::wrap!())?;

        tx.execute(Update(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Coupon(code: {code})` applied to `Order(id: {})`",
            order.id,
        );

        Ok(order)
    }
}

/// Error of [`ApplyOrderCoupon`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Coupon`] was rejected by the [`Order`].
    #[display("{_0}")]
    #[from]
    Apply(order::ApplyCouponError),

    /// [`Coupon`] with the provided [`coupon::Code`] does not exist.
    #[display("`Coupon(code: {_0})` does not exist")]
    CouponNotExists(#[error(not(source))] coupon::Code),

    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Order`] with the provided ID does not exist.
    #[display("`Order(id: {_0})` does not exist")]
    OrderNotExists(#[error(not(source))] order::Id),
}
