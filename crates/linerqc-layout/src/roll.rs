//! Roll-number assignment.
//!
//! Panels are clustered into rows by vertical overlap, rows are ordered
//! along the primary axis, panels within a row along the secondary axis, and
//! labels are handed out row-major.
//!
//! # Determinism
//!
//! The sort key is geometry (then id), never the input index, so any
//! permutation of the same panels yields the same labeling:
//!
//! ```text
//! canonical = sort(panels, by (top, left, id))
//! rows      = greedy cluster over canonical (join first row whose seed overlaps)
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use linerqc_core::geometry::{Geometry, Panel};
use serde::{Deserialize, Serialize};

/// Default fraction of the shorter height two panels must share to be a row.
pub const DEFAULT_ROW_OVERLAP_TOLERANCE: f64 = 0.5;

/// Default label prefix.
pub const DEFAULT_ROLL_PREFIX: &str = "R";

/// Default zero-padded digit count.
pub const DEFAULT_ROLL_PAD_WIDTH: usize = 3;

/// Widest zero padding accepted.
pub const MAX_ROLL_PAD_WIDTH: usize = 12;

/// Row traversal along the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOrder {
    #[default]
    NorthToSouth,
    SouthToNorth,
}

/// Panel traversal inside one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnOrder {
    #[default]
    WestToEast,
    EastToWest,
}

/// Row-major traversal order. Serialized as `"north-first,west-to-east"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RollDirection {
    pub rows: RowOrder,
    pub columns: ColumnOrder,
}

impl RollDirection {
    #[must_use]
    pub const fn new(rows: RowOrder, columns: ColumnOrder) -> Self {
        Self { rows, columns }
    }
}

impl fmt::Display for RollDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = match self.rows {
            RowOrder::NorthToSouth => "north-first",
            RowOrder::SouthToNorth => "south-first",
        };
        let columns = match self.columns {
            ColumnOrder::WestToEast => "west-to-east",
            ColumnOrder::EastToWest => "east-to-west",
        };
        write!(f, "{rows},{columns}")
    }
}

impl FromStr for RollDirection {
    type Err = RollDirectionParseError;

    /// Parse comma-separated tokens. Either axis may be omitted (it keeps its
    /// default) but not repeated. Tokens are case-insensitive.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut rows = None;
        let mut columns = None;
        let mut seen_token = false;
        for raw in input.split(',') {
            let token = raw.trim().to_ascii_lowercase();
            if token.is_empty() {
                continue;
            }
            seen_token = true;
            match token.as_str() {
                "north-first" | "north-to-south" | "north" => {
                    set_once(&mut rows, RowOrder::NorthToSouth, "rows")?;
                }
                "south-first" | "south-to-north" | "south" => {
                    set_once(&mut rows, RowOrder::SouthToNorth, "rows")?;
                }
                "west-to-east" | "west-first" | "west" => {
                    set_once(&mut columns, ColumnOrder::WestToEast, "columns")?;
                }
                "east-to-west" | "east-first" | "east" => {
                    set_once(&mut columns, ColumnOrder::EastToWest, "columns")?;
                }
                _ => return Err(RollDirectionParseError::UnknownToken(token)),
            }
        }
        if !seen_token {
            return Err(RollDirectionParseError::Empty);
        }
        Ok(Self {
            rows: rows.unwrap_or_default(),
            columns: columns.unwrap_or_default(),
        })
    }
}

fn set_once<T>(
    slot: &mut Option<T>,
    value: T,
    axis: &'static str,
) -> Result<(), RollDirectionParseError> {
    if slot.is_some() {
        return Err(RollDirectionParseError::DuplicateAxis(axis));
    }
    *slot = Some(value);
    Ok(())
}

impl TryFrom<String> for RollDirection {
    type Error = RollDirectionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RollDirection> for String {
    fn from(direction: RollDirection) -> Self {
        direction.to_string()
    }
}

/// Direction string rejected by [`RollDirection::from_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RollDirectionParseError {
    Empty,
    UnknownToken(String),
    DuplicateAxis(&'static str),
}

impl fmt::Display for RollDirectionParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "roll direction is empty"),
            Self::UnknownToken(token) => write!(f, "unknown roll direction token `{token}`"),
            Self::DuplicateAxis(axis) => write!(f, "roll direction sets {axis} twice"),
        }
    }
}

impl std::error::Error for RollDirectionParseError {}

/// The side of the site a roll sequence starts from, as stored on layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardinalDirection {
    North,
    South,
    East,
    West,
}

impl From<CardinalDirection> for RollDirection {
    fn from(direction: CardinalDirection) -> Self {
        match direction {
            CardinalDirection::North | CardinalDirection::West => {
                Self::new(RowOrder::NorthToSouth, ColumnOrder::WestToEast)
            }
            CardinalDirection::South => Self::new(RowOrder::SouthToNorth, ColumnOrder::WestToEast),
            CardinalDirection::East => Self::new(RowOrder::NorthToSouth, ColumnOrder::EastToWest),
        }
    }
}

/// Roll-number assignment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RollNumberConfig {
    pub direction: RollDirection,
    /// Fraction in `(0, 1]` of the shorter panel height two panels must
    /// share vertically to sit in the same row.
    pub row_overlap_tolerance: f64,
    pub prefix: String,
    pub pad_width: usize,
    /// First sequence number.
    pub start: u32,
}

impl RollNumberConfig {
    pub fn validate(&self) -> Result<(), RollNumberConfigError> {
        if !self.tolerance_in_range() {
            return Err(RollNumberConfigError::InvalidTolerance {
                value: self.row_overlap_tolerance,
            });
        }
        if self.pad_width > MAX_ROLL_PAD_WIDTH {
            return Err(RollNumberConfigError::PadWidthTooLarge {
                width: self.pad_width,
                max: MAX_ROLL_PAD_WIDTH,
            });
        }
        Ok(())
    }

    fn tolerance_in_range(&self) -> bool {
        let tolerance = self.row_overlap_tolerance;
        tolerance.is_finite() && tolerance > 0.0 && tolerance <= 1.0
    }

    /// Row tolerance to cluster with; out-of-range values fall back to the
    /// default.
    #[must_use]
    pub fn effective_tolerance(&self) -> f64 {
        if self.tolerance_in_range() {
            self.row_overlap_tolerance
        } else {
            DEFAULT_ROW_OVERLAP_TOLERANCE
        }
    }

    /// Label for sequence number `n`, e.g. `R007`. Padding is capped at
    /// [`MAX_ROLL_PAD_WIDTH`].
    #[must_use]
    pub fn label(&self, n: u64) -> String {
        let width = self.pad_width.min(MAX_ROLL_PAD_WIDTH);
        format!("{}{n:0width$}", self.prefix)
    }
}

impl Default for RollNumberConfig {
    fn default() -> Self {
        Self {
            direction: RollDirection::default(),
            row_overlap_tolerance: DEFAULT_ROW_OVERLAP_TOLERANCE,
            prefix: DEFAULT_ROLL_PREFIX.to_string(),
            pad_width: DEFAULT_ROLL_PAD_WIDTH,
            start: 1,
        }
    }
}

/// Roll-number configuration failures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RollNumberConfigError {
    InvalidTolerance { value: f64 },
    PadWidthTooLarge { width: usize, max: usize },
}

impl fmt::Display for RollNumberConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTolerance { value } => {
                write!(f, "row overlap tolerance must be in (0, 1] (got {value})")
            }
            Self::PadWidthTooLarge { width, max } => {
                write!(f, "pad width {width} exceeds {max}")
            }
        }
    }
}

impl std::error::Error for RollNumberConfigError {}

/// Label every panel with a roll number.
///
/// Returns the panels in labeling order. Panels whose geometry is not valid
/// are appended after the labeled ones, ordered by id, with their roll
/// number cleared. An out-of-range tolerance falls back to the default and
/// an oversized pad width is capped; neither affects the other.
#[must_use]
pub fn assign_roll_numbers(panels: &[Panel], config: &RollNumberConfig) -> Vec<Panel> {
    let tolerance = config.effective_tolerance();

    let (mut placeable, mut unplaceable): (Vec<Panel>, Vec<Panel>) = panels
        .iter()
        .cloned()
        .partition(|panel| panel.geometry.is_valid());
    placeable.sort_by(canonical_order);
    unplaceable.sort_by_key(|panel| panel.id);

    let mut rows = cluster_rows(placeable, tolerance);
    if config.direction.rows == RowOrder::SouthToNorth {
        rows.reverse();
    }

    let columns = config.direction.columns;
    let mut labeled = Vec::with_capacity(panels.len());
    let mut sequence = u64::from(config.start);
    for mut row in rows {
        row.sort_by(|a, b| column_order(a, b, columns));
        for mut panel in row {
            panel.roll_number = Some(config.label(sequence));
            sequence += 1;
            labeled.push(panel);
        }
    }

    linerqc_core::debug!(
        labeled = labeled.len(),
        skipped = unplaceable.len(),
        direction = %config.direction,
        "roll numbers assigned"
    );

    for mut panel in unplaceable {
        panel.roll_number = None;
        labeled.push(panel);
    }
    labeled
}

fn canonical_order(a: &Panel, b: &Panel) -> Ordering {
    let (ga, gb) = (&a.geometry, &b.geometry);
    ga.top()
        .total_cmp(&gb.top())
        .then(ga.left().total_cmp(&gb.left()))
        .then(a.id.cmp(&b.id))
        .then(ga.height.total_cmp(&gb.height))
        .then(ga.width.total_cmp(&gb.width))
}

fn column_order(a: &Panel, b: &Panel, columns: ColumnOrder) -> Ordering {
    let (ga, gb) = (&a.geometry, &b.geometry);
    let primary = match columns {
        ColumnOrder::WestToEast => ga.left().total_cmp(&gb.left()),
        ColumnOrder::EastToWest => gb.right().total_cmp(&ga.right()),
    };
    primary
        .then(ga.top().total_cmp(&gb.top()))
        .then(a.id.cmp(&b.id))
}

/// Greedy row clustering over canonically ordered panels.
fn cluster_rows(canonical: Vec<Panel>, tolerance: f64) -> Vec<Vec<Panel>> {
    let mut rows: Vec<Vec<Panel>> = Vec::new();
    for panel in canonical {
        let joined = rows.iter_mut().find(|row| {
            row.first()
                .is_some_and(|seed| shares_row(&seed.geometry, &panel.geometry, tolerance))
        });
        match joined {
            Some(row) => row.push(panel),
            None => rows.push(vec![panel]),
        }
    }
    rows
}

fn shares_row(seed: &Geometry, candidate: &Geometry, tolerance: f64) -> bool {
    let shorter = seed.height.min(candidate.height);
    seed.vertical_overlap(candidate) >= tolerance * shorter
}
