//! [`Command`] for placing a new [`Order`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        order::OrderItem, seat, user, Order, Seat, User,
    },
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for placing a new [`Order`].
#[derive(Clone, Debug)]
pub struct CreateOrder {
    /// ID of the [`User`] placing the [`Order`].
    pub user_id: user::Id,

    /// Drafts of the [`OrderItem`]s to book.
    pub items: Vec<ItemDraft>,
}

/// Draft of an [`OrderItem`] within a [`CreateOrder`] [`Command`].
#[derive(Clone, Copy, Debug)]
pub struct ItemDraft {
    /// ID of the [`Seat`] to book.
    pub seat_id: seat::Id,

    /// Indicator whether the [`Seat`] is charged at half price.
    pub is_kind_half: bool,

    /// Price of the [`Seat`] before any half-price reduction.
    pub unit_price: Money,
}

impl<Db> Command<CreateOrder> for Service<Db>
where
    Db: Database<
            Select<By<Option<User>, user::Id>>,
            Ok = Option<User>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Seat>, seat::Id>>,
            Ok = Option<Seat>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Order>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Order;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateOrder) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateOrder { user_id, items } = cmd;

        if items.is_empty() {
            return Err(tracerr::new!(E::NoItems));
        }

        self.database()
            .execute(Select(By::<Option<User>, _>::new(user_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::UserNotExists(user_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let mut order = Order::new(user_id);
        for draft in items {
            let seat = self
                .database()
                .execute(Select(By::<Option<Seat>, _>::new(draft.seat_id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))?
                .ok_or(E::SeatNotExists(draft.seat_id))
                .map_err(tracerr::wrap!())?;

            order.add_item(OrderItem::new(
                seat.id,
                seat.label.clone(),
                draft.is_kind_half,
                Some(draft.unit_price),
            ));
        }

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(order.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Order(id: {})` placed with {} items",
            order.id,
            order.items().len(),
        );

        Ok(order)
    }
}

/// Error of [`CreateOrder`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// No [`OrderItem`] drafts provided.
    #[display("`Order` cannot be placed without items")]
    NoItems,

    /// [`Seat`] with the provided ID does not exist.
    #[display("`Seat(id: {_0})` does not exist")]
    SeatNotExists(#[error(not(source))] seat::Id),

    /// [`User`] with the provided ID does not exist.
    #[display("`User(id: {_0})` does not exist")]
    UserNotExists(#[error(not(source))] user::Id),
}
