//! [`Seat`] definitions.

use derive_more::{AsRef, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::room;

/// Single seat within a [`Room`].
///
/// [`Room`]: crate::domain::Room
#[derive(Clone, Debug)]
pub struct Seat {
    /// ID of this [`Seat`].
    pub id: Id,

    /// ID of the [`Room`] this [`Seat`] belongs to.
    ///
    /// [`Room`]: crate::domain::Room
    pub room_id: room::Id,

    /// [`RowLabel`] of this [`Seat`].
    pub row_label: RowLabel,

    /// 1-based column number of this [`Seat`] within its row.
    pub col_number: u16,

    /// Human-readable [`Label`] of this [`Seat`] (e.g. `A1`).
    pub label: Label,
}

impl Seat {
    /// Creates a new [`Seat`] at the provided position of the [`Room`].
    ///
    /// [`Room`]: crate::domain::Room
    #[must_use]
    pub fn new(room_id: room::Id, row_label: RowLabel, col_number: u16) -> Self {
        let label = Label::new(&row_label, col_number);
        Self {
            id: Id::new(),
            room_id,
            row_label,
            col_number,
            label,
        }
    }
}

/// ID of a [`Seat`].
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

/// Spreadsheet-style row label of a [`Seat`] (`A`..`Z`, `AA`, `AB`, ...).
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct RowLabel(String);

impl RowLabel {
    /// Creates a new [`RowLabel`] for the provided 0-based row index.
    ///
    /// Index `0` maps to `A`, `25` to `Z`, `26` to `AA`, and so on.
    #[must_use]
    pub fn from_index(mut index: u16) -> Self {
        const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

        let mut label = String::new();
        loop {
            label.insert(0, char::from(ALPHABET[usize::from(index % 26)]));
            if index < 26 {
                break;
            }
            index = index / 26 - 1;
        }
        Self(label)
    }
}

/// Human-readable label of a [`Seat`], composed of its [`RowLabel`] and
/// column number.
#[derive(AsRef, Clone, Debug, Display, Eq, Hash, PartialEq)]
#[as_ref(str, String)]
pub struct Label(String);

impl Label {
    /// Creates a new [`Label`] from the provided position.
    #[must_use]
    pub fn new(row: &RowLabel, col: u16) -> Self {
        Self(format!("{row}{col}"))
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::room;

    use super::{Label, RowLabel, Seat};

    #[test]
    fn row_labels_extend_like_spreadsheet_columns() {
        assert_eq!(RowLabel::from_index(0).to_string(), "A");
        assert_eq!(RowLabel::from_index(25).to_string(), "Z");
        assert_eq!(RowLabel::from_index(26).to_string(), "AA");
        assert_eq!(RowLabel::from_index(27).to_string(), "AB");
        assert_eq!(RowLabel::from_index(51).to_string(), "AZ");
        assert_eq!(RowLabel::from_index(52).to_string(), "BA");
    }

    #[test]
    fn label_concatenates_row_and_column() {
        assert_eq!(Label::new(&RowLabel::from_index(0), 1).to_string(), "A1");

        let seat = Seat::new(room::Id::new(), RowLabel::from_index(2), 14);
        assert_eq!(seat.label.to_string(), "C14");
    }
}
