use std::fmt::Display;
use std::str::FromStr;

#[cfg(feature = "cli")]
use clap::ValueEnum;

use crate::prelude::{Error, SmResult};

/// Row index type of the view layer
pub type Row = i32;

/// Converts a symbol count into a row count.
/// Counts that do not fit are an integrity failure and are never truncated
pub fn checked_row_count(len: usize) -> SmResult<Row> {
    Row::try_from(len).map_err(|_| Error::RowCountOverflow(len))
}

#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(PartialOrd, PartialEq, Ord, Eq, Copy, Clone, Debug, Hash)]
pub enum Column {
    Name,
    Type,
    Value,
    Section,
}

impl Column {
    pub const COUNT: usize = 4;
    pub const ALL: [Column; Column::COUNT] =
        [Column::Name, Column::Type, Column::Value, Column::Section];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Text key of the column header
    pub fn title_key(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Type => "Type",
            Column::Value => "Value",
            Column::Section => "Section",
        }
    }
}

impl TryFrom<usize> for Column {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_index(value).ok_or(Error::UnknownColumn(value))
    }
}

impl FromStr for Column {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(Column::Name),
            "type" => Ok(Column::Type),
            "value" => Ok(Column::Value),
            "section" => Ok(Column::Section),
            _ => match s.parse::<usize>() {
                Ok(i) => Column::try_from(i),
                Err(_) => Err(Error::Other(anyhow::anyhow!("Unknown column '{}'", s))),
            },
        }
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Column::Name => write!(f, "name"),
            Column::Type => write!(f, "type"),
            Column::Value => write!(f, "value"),
            Column::Section => write!(f, "section"),
        }
    }
}

/// The purpose a value is requested for
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Role {
    /// Human readable text
    Display,
    /// A value with a total order, not necessarily readable
    Sort,
    Edit,
    ToolTip,
    Decoration,
}

#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// A single resolved cell.
/// Values of one column always share the same variant
#[derive(PartialOrd, PartialEq, Ord, Eq, Clone, Debug)]
pub enum CellValue {
    Int(i64),
    Text(String),
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CellValue::Int(i) => write!(f, "{}", i),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.into())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

/// Handle to a single cell.
/// A handle is tagged with the model generation it was created in
/// and stops resolving once the model was reset
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub struct ModelIndex {
    row: Row,
    column: Column,
    generation: u64,
}

impl ModelIndex {
    pub(super) fn new(row: Row, column: Column, generation: u64) -> Self {
        Self {
            row,
            column,
            generation,
        }
    }

    pub fn row(&self) -> Row {
        self.row
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::Error;

    use super::{checked_row_count, CellValue, Column, Row};

    #[test]
    fn row_count_limits() {
        assert_eq!(0, checked_row_count(0).unwrap());
        assert_eq!(Row::MAX, checked_row_count(Row::MAX as usize).unwrap());
        assert!(matches!(
            checked_row_count(Row::MAX as usize + 1),
            Err(Error::RowCountOverflow(_))
        ));
    }

    #[test]
    fn columns() {
        assert_eq!(4, Column::COUNT);
        for (i, c) in Column::ALL.iter().enumerate() {
            assert_eq!(i, c.index());
            assert_eq!(*c, Column::try_from(i).unwrap());
        }
        assert!(matches!(Column::try_from(4), Err(Error::UnknownColumn(4))));
    }

    #[test]
    fn parse_columns() {
        assert_eq!(Column::Value, "value".parse().unwrap());
        assert_eq!(Column::Section, "Section".parse().unwrap());
        assert_eq!(Column::Type, "1".parse().unwrap());
        assert!("size".parse::<Column>().is_err());
        assert!("9".parse::<Column>().is_err());
    }

    #[test]
    fn cell_order() {
        assert!(CellValue::Int(-1) < CellValue::Int(2));
        assert!(CellValue::from("a") < CellValue::from("b"));
        assert_eq!("ff", CellValue::from("ff").to_string());
    }
}
