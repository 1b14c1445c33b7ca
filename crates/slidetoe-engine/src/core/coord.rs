use std::{num::ParseIntError, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of rows and columns of the board.
pub const GRID_SIZE: i32 = 3;

/// Position of a cell on the board.
///
/// Coordinates are written as the cell key `"{row}.{col}"` (e.g. `"0.2"` is
/// the top-right cell). The key is used both for parsing user input and as
/// the serialized form.
///
/// Any pair of integers is a valid `CellCoord`; positions outside the
/// [`GRID_SIZE`]×[`GRID_SIZE`] board are never occupied, so lookups there
/// simply miss.
///
/// # Example
///
/// ```
/// use slidetoe_engine::CellCoord;
///
/// let coord: CellCoord = "1.2".parse().unwrap();
/// assert_eq!(coord, CellCoord::new(1, 2));
/// assert_eq!(coord.to_string(), "1.2");
/// assert!(coord.is_on_board());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("{row}.{col}")]
pub struct CellCoord {
    row: i32,
    col: i32,
}

impl CellCoord {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> i32 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> i32 {
        self.col
    }

    /// Returns whether the coordinate lies inside the board.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        0 <= self.row && self.row < GRID_SIZE && 0 <= self.col && self.col < GRID_SIZE
    }

    /// Returns the coordinate shifted by `(d_row, d_col)`.
    ///
    /// Returns `None` if the shift overflows `i32`.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Option<Self> {
        let Some(row) = self.row.checked_add(d_row) else {
            return None;
        };
        let Some(col) = self.col.checked_add(d_col) else {
            return None;
        };
        Some(Self { row, col })
    }

    /// Maps a keypad number (1-9, row-major from the top-left) to a cell.
    #[must_use]
    pub fn from_keypad(number: u32) -> Option<Self> {
        let index = i32::try_from(number.checked_sub(1)?).ok()?;
        (index < GRID_SIZE * GRID_SIZE).then(|| Self::new(index / GRID_SIZE, index % GRID_SIZE))
    }

    /// Iterates over all cells of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Self::new(row, col)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseCellCoordError {
    #[display("cell key {key:?} is not of the form \"row.col\"")]
    MalformedKey { key: String },
    #[display("invalid {part} in cell key {key:?}")]
    InvalidNumber {
        part: &'static str,
        key: String,
        source: ParseIntError,
    },
}

impl FromStr for CellCoord {
    type Err = ParseCellCoordError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let Some((row, col)) = key.split_once('.') else {
            return Err(ParseCellCoordError::MalformedKey { key: key.to_owned() });
        };
        if col.contains('.') || row.starts_with('+') || col.starts_with('+') {
            return Err(ParseCellCoordError::MalformedKey { key: key.to_owned() });
        }
        let parse = |part: &'static str, text: &str| {
            text.parse::<i32>()
                .map_err(|source| ParseCellCoordError::InvalidNumber {
                    part,
                    key: key.to_owned(),
                    source,
                })
        };
        Ok(Self::new(parse("row", row)?, parse("column", col)?))
    }
}

impl Serialize for CellCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let key = String::deserialize(deserializer)?;
        key.parse().map_err(serde::de::Error::custom)
    }
}
