//! In-memory reference provider
//!
//! A [`Sheet`] stores cell values by grid address and named values by name,
//! and answers an engine's reference and range hooks from that storage.
//! Cloning a sheet shares its storage, so cells can be edited after the
//! sheet has been attached.

use crate::{CellAddress, CellBounds, CellCoord, Engine, Result, Value};
use ahash::AHashMap;
use std::cell::RefCell;
use std::rc::Rc;

/// Largest block a range lookup will materialize
pub const MAX_BLOCK_CELLS: u64 = 1 << 22;

#[derive(Debug, Default)]
struct SheetData {
    cells: AHashMap<(u32, u16), Value>,
    names: AHashMap<String, Value>,
}

impl SheetData {
    /// A1 through the furthest row and column holding a value
    fn used_bounds(&self) -> Option<CellBounds> {
        let (&(row, col), _) = self.cells.iter().next()?;
        let (bottom, right) = self
            .cells
            .keys()
            .fold((row, col), |(r, c), &(row, col)| (r.max(row), c.max(col)));
        Some(CellBounds::new(
            CellAddress::new(0, 0),
            CellAddress::new(bottom, right),
        ))
    }
}

/// Grid of cell values plus `@named` values
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    data: Rc<RefCell<SheetData>>,
}

impl Sheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a cell by A1-style address (`"B3"`, `"$c$7"`)
    pub fn set_cell(&self, address: &str, value: impl Into<Value>) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.data
            .borrow_mut()
            .cells
            .insert((addr.row, addr.col), value.into());
        Ok(())
    }

    /// Clear a cell, returning its previous value
    pub fn clear_cell(&self, address: &str) -> Result<Option<Value>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.data.borrow_mut().cells.remove(&(addr.row, addr.col)))
    }

    /// Set a value reachable as `@name`
    pub fn set_named(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.data
            .borrow_mut()
            .names
            .insert(name.into(), value.into());
    }

    /// Number of non-empty cells
    pub fn cell_count(&self) -> usize {
        self.data.borrow().cells.len()
    }

    /// Value behind a single reference, `None` when nothing is stored there
    pub fn value(&self, coord: &CellCoord) -> Option<Value> {
        let data = self.data.borrow();
        match coord.name() {
            Some(name) => data.names.get(name).cloned(),
            None => {
                let addr = coord.address().ok()?;
                data.cells.get(&(addr.row, addr.col)).cloned()
            }
        }
    }

    /// Rows of the block between two A1-style references.
    ///
    /// The block is clipped to the used area of the sheet, so a whole-sheet
    /// range only yields the cells up to the last stored row and column.
    /// Missing cells inside that area come back as [`Value::Empty`]. Named
    /// endpoints have no geometry and yield `None`, as does a clipped block
    /// larger than [`MAX_BLOCK_CELLS`].
    pub fn block(&self, start: &CellCoord, end: &CellCoord) -> Option<Vec<Vec<Value>>> {
        let requested = CellBounds::from_coords(start, end).ok()?;
        let data = self.data.borrow();
        let bounds = match data
            .used_bounds()
            .and_then(|used| requested.intersect(&used))
        {
            Some(bounds) => bounds,
            None => return Some(Vec::new()),
        };
        if bounds.cell_count() > MAX_BLOCK_CELLS {
            log::warn!(
                "range {}:{} covers {} cells, limit is {}",
                start,
                end,
                bounds.cell_count(),
                MAX_BLOCK_CELLS
            );
            return None;
        }

        let rows = bounds
            .rows()
            .map(|row| {
                row.into_iter()
                    .map(|key| data.cells.get(&key).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        Some(rows)
    }

    /// Install this sheet as the engine's reference and range provider
    pub fn attach(&self, engine: &mut Engine) {
        let sheet = self.clone();
        engine.on_call_reference_value(move |coord| sheet.value(coord));

        let sheet = self.clone();
        engine.on_call_range_value(move |start, end| sheet.block(start, end));
    }
}
