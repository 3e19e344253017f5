//! [`Command`] for creating a new [`Room`] with its [`Seat`] grid.

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::room::Name;
use crate::{
    domain::{room, seat, Room, Seat},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Room`] with its [`Seat`] grid.
///
/// One [`Seat`] is generated per grid position: rows are labeled `A`, `B`,
/// ... and columns are numbered from 1.
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`Name`] of a new [`Room`].
    pub name: room::Name,

    /// Number of [`Seat`] rows in a new [`Room`].
    pub rows: u16,

    /// Number of [`Seat`]s per row in a new [`Room`].
    pub cols: u16,
}

impl<Db> Command<CreateRoom> for Service<Db>
where
    Db: for<'n> Database<
            Select<By<Option<Room>, &'n room::Name>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<Insert<Seat>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom { name, rows, cols } = cmd;

        if rows == 0 || cols == 0 {
            return Err(tracerr::new!(E::EmptyGrid { rows, cols }));
        }

        let r = self
            .database()
            .execute(Select(By::new(&name)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if r.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let room = Room {
            id: room::Id::new(),
            name,
            rows,
            cols,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(room.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        for row in 0..rows {
            let label = seat::RowLabel::from_index(row);
            for col in 1..=cols {
                tx.execute(Insert(Seat::new(room.id, label.clone(), col)))
                    .await
                    .map_err(tracerr::map_from_and_wrap!(=> E))
                    .map(drop)?;
            }
        }
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Room(id: {})` created with {} seats",
            room.id,
            room.total_capacity(),
        );

        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Room`] grid has no seats.
    #[display("`Room` grid {rows}x{cols} has no seats")]
    EmptyGrid {
        /// Provided number of rows.
        rows: u16,

        /// Provided number of columns.
        cols: u16,
    },

    /// [`room::Name`] is already occupied.
    #[display("`{_0}` room name is occupied")]
    NameOccupied(#[error(not(source))] room::Name),
}
