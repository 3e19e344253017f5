//! [`Command`] for creating a new [`Movie`].

use common::{
    operations::{Commit, Insert, Transact, Transacted},
    DateTime,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::movie::{Rating, Synopsis, Title};
use crate::{
    domain::{movie, Movie},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Movie`].
#[derive(Clone, Debug)]
pub struct CreateMovie {
    /// [`Title`] of a new [`Movie`].
    pub title: movie::Title,

    /// Duration of a new [`Movie`], in minutes.
    pub duration_min: u16,

    /// Age [`Rating`] of a new [`Movie`].
    pub rating: movie::Rating,

    /// [`Synopsis`] of a new [`Movie`].
    pub synopsis: Option<movie::Synopsis>,
}

impl<Db> Command<CreateMovie> for Service<Db>
where
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Movie>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Movie;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateMovie) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateMovie {
            title,
            duration_min,
            rating,
            synopsis,
        } = cmd;

        if duration_min == 0 {
            return Err(tracerr::new!(E::ZeroDuration));
        }

        let movie = Movie {
            id: movie::Id::new(),
            title,
            duration_min,
            rating,
            synopsis,
            created_at: DateTime::now().coerce(),
            updated_at: DateTime::now().coerce(),
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        tx.execute(Insert(movie.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Movie(id: {})` created", movie.id);

        Ok(movie)
    }
}

/// Error of [`CreateMovie`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Movie`] duration is zero.
    #[display("`Movie` duration cannot be zero")]
    ZeroDuration,
}
