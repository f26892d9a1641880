//! Reference coordinates
//!
//! A [`CellCoord`] is what the engine hands to reference providers: the label
//! exactly as the formula author wrote it. Providers that address a grid can
//! derive a [`CellAddress`] from A1-style labels, and [`CellBounds`] from a
//! pair of them.

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;

/// Kind of reference a label denotes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoordKind {
    /// A1-style cell reference (`A1`, `$b$2`)
    Cell,
    /// Named reference (`@total`)
    Named,
}

/// Coordinate descriptor for a single reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    /// Reference text as written, case preserved, including a leading `@`
    pub label: String,
    /// Derived from the label
    pub kind: CoordKind,
}

impl CellCoord {
    /// Wrap a label. Labels starting with `@` are named references.
    pub fn new(label: impl Into<String>) -> Self {
        let label = label.into();
        let kind = if label.starts_with('@') {
            CoordKind::Named
        } else {
            CoordKind::Cell
        };
        Self { label, kind }
    }

    /// Check if this is a named reference
    pub fn is_named(&self) -> bool {
        self.kind == CoordKind::Named
    }

    /// The name without its `@` prefix, for named references
    pub fn name(&self) -> Option<&str> {
        match self.kind {
            CoordKind::Named => self.label.strip_prefix('@'),
            CoordKind::Cell => None,
        }
    }

    /// Grid address of an A1-style label
    ///
    /// ```
    /// use hotcell_core::CellCoord;
    ///
    /// let addr = CellCoord::new("b3").address().unwrap();
    /// assert_eq!((addr.row, addr.col), (2, 1));
    /// assert!(CellCoord::new("@total").address().is_err());
    /// ```
    pub fn address(&self) -> Result<CellAddress> {
        match self.kind {
            CoordKind::Cell => CellAddress::parse(&self.label),
            CoordKind::Named => Err(Error::NamedReference(self.label.clone())),
        }
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// A grid address (0-based row and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Row index (0-based internally, 1-based in display)
    pub row: u32,
    /// Column index (0-based, A=0, B=1, ...)
    pub col: u16,
    /// Whether the row reference is absolute ($)
    pub row_absolute: bool,
    /// Whether the column reference is absolute ($)
    pub col_absolute: bool,
}

impl CellAddress {
    /// Create a new cell address with relative references
    pub fn new(row: u32, col: u16) -> Self {
        Self {
            row,
            col,
            row_absolute: false,
            col_absolute: false,
        }
    }

    /// Parse a cell address from A1-style notation (case insensitive)
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidAddress("empty address".into()));
        }

        let bytes = s.as_bytes();
        let mut pos = 0;

        let col_absolute = if bytes.get(pos) == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let col_start = pos;
        while pos < bytes.len() && bytes[pos].is_ascii_alphabetic() {
            pos += 1;
        }
        if pos == col_start {
            return Err(Error::InvalidAddress(format!(
                "no column letters in '{}'",
                s
            )));
        }
        let col = Self::letters_to_column(&s[col_start..pos])?;

        let row_absolute = if bytes.get(pos) == Some(&b'$') {
            pos += 1;
            true
        } else {
            false
        };

        let row_str = &s[pos..];
        if row_str.is_empty() || !row_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidAddress(format!("invalid row number in '{}'", s)));
        }
        let row: u32 = row_str
            .parse()
            .map_err(|_| Error::InvalidAddress(format!("invalid row number in '{}'", s)))?;

        if row == 0 {
            return Err(Error::InvalidAddress(format!(
                "row number must be >= 1 in '{}'",
                s
            )));
        }
        let row = row - 1;
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }

        Ok(Self {
            row,
            col,
            row_absolute,
            col_absolute,
        })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u16) -> String {
        let mut result = String::new();
        let mut n = col as u32 + 1;

        while n > 0 {
            n -= 1;
            let c = ((n % 26) as u8 + b'A') as char;
            result.insert(0, c);
            n /= 26;
        }

        result
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::ColumnOutOfBounds(letters.to_string(), MAX_COLS - 1));
            }
        }

        Ok((col - 1) as u16)
    }

    /// Format as A1-style string
    pub fn to_a1_string(&self) -> String {
        let mut result = String::new();
        if self.col_absolute {
            result.push('$');
        }
        result.push_str(&Self::column_to_letters(self.col));
        if self.row_absolute {
            result.push('$');
        }
        result.push_str(&(self.row + 1).to_string());
        result
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_a1_string())
    }
}

/// Rectangular block spanned by two addresses, normalized top-left to
/// bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellBounds {
    pub top: u32,
    pub left: u16,
    pub bottom: u32,
    pub right: u16,
}

impl CellBounds {
    /// Normalize two corners, in any order
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    /// Bounds of a pair of A1-style coordinates.
    ///
    /// The coordinates themselves are left untouched; only the derived
    /// geometry is reordered.
    pub fn from_coords(start: &CellCoord, end: &CellCoord) -> Result<Self> {
        Ok(Self::new(start.address()?, end.address()?))
    }

    pub fn row_count(&self) -> u32 {
        self.bottom - self.top + 1
    }

    pub fn col_count(&self) -> u16 {
        self.right - self.left + 1
    }

    /// Number of cells in the block
    pub fn cell_count(&self) -> u64 {
        u64::from(self.row_count()) * u64::from(self.col_count())
    }

    /// Overlap with another block, `None` when they are disjoint
    pub fn intersect(&self, other: &CellBounds) -> Option<CellBounds> {
        let top = self.top.max(other.top);
        let left = self.left.max(other.left);
        let bottom = self.bottom.min(other.bottom);
        let right = self.right.min(other.right);
        (top <= bottom && left <= right).then(|| CellBounds {
            top,
            left,
            bottom,
            right,
        })
    }

    /// Row-major `(row, col)` pairs covered by the block
    pub fn rows(&self) -> impl Iterator<Item = Vec<(u32, u16)>> + '_ {
        (self.top..=self.bottom)
            .map(move |row| (self.left..=self.right).map(|col| (row, col)).collect())
    }
}
