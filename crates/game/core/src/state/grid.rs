//! Dense board model built from a snapshot's cell list.
//!
//! The server sends every cell every tick. [`Grid`] checks that the list forms
//! a complete rectangle starting at the origin and stores contents row-major,
//! so lookups are O(1) and "absent" always means out of bounds.

use super::error::SnapshotError;
use super::types::{Cell, CellContent, Position};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    contents: Vec<CellContent>,
}

impl Grid {
    /// Builds a grid, enforcing exactly one cell per coordinate.
    pub fn from_cells<I>(cells: I) -> Result<Self, SnapshotError>
    where
        I: IntoIterator<Item = Cell>,
    {
        let cells: Vec<Cell> = cells.into_iter().collect();
        if cells.is_empty() {
            return Err(SnapshotError::Empty);
        }

        let mut max_x = 0;
        let mut max_y = 0;
        for cell in &cells {
            let position = cell.position;
            if position.x < 0 || position.y < 0 {
                return Err(SnapshotError::NegativeCoordinate { position });
            }
            max_x = max_x.max(position.x);
            max_y = max_y.max(position.y);
        }

        let width = max_x as u32 + 1;
        let height = max_y as u32 + 1;
        let area = u64::from(width).checked_mul(u64::from(height));
        if area != Some(cells.len() as u64) {
            return Err(SnapshotError::Dimensions {
                width,
                height,
                cells: cells.len(),
            });
        }

        // area equals the cell count, so every index below fits
        let mut slots: Vec<Option<CellContent>> = vec![None; cells.len()];
        for cell in &cells {
            let index = cell.position.y as usize * width as usize + cell.position.x as usize;
            if slots[index].replace(cell.content).is_some() {
                return Err(SnapshotError::DuplicateCell {
                    position: cell.position,
                });
            }
        }

        // equal counts and no duplicate leave no empty slot
        let contents = slots.into_iter().flatten().collect();

        Ok(Self {
            width,
            height,
            contents,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Largest valid x coordinate.
    pub fn max_x(&self) -> i32 {
        self.width as i32 - 1
    }

    /// Largest valid y coordinate.
    pub fn max_y(&self) -> i32 {
        self.height as i32 - 1
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Content at `position`, or `None` when out of bounds.
    pub fn content(&self, position: Position) -> Option<CellContent> {
        self.index(position).map(|index| self.contents[index])
    }

    pub fn cell(&self, position: Position) -> Option<Cell> {
        self.content(position).map(|content| Cell::new(position, content))
    }

    /// In bounds and not a wall.
    pub fn is_passable(&self, position: Position) -> bool {
        self.content(position).is_some_and(CellContent::is_passable)
    }

    /// All cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.contents.iter().enumerate().map(move |(index, content)| {
            let width = self.width as usize;
            let position = Position::new((index % width) as i32, (index / width) as i32);
            Cell::new(position, *content)
        })
    }

    /// Cells whose Manhattan distance to `center` is strictly below `limit`.
    ///
    /// Only the bounding box around `center` is scanned.
    pub fn cells_nearer_than(
        &self,
        center: Position,
        limit: u32,
    ) -> impl Iterator<Item = Cell> + '_ {
        let reach = limit.saturating_sub(1).min(i32::MAX as u32) as i32;
        let min_x = center.x.saturating_sub(reach).max(0);
        let max_x = center.x.saturating_add(reach).min(self.max_x());
        let min_y = center.y.saturating_sub(reach).max(0);
        let max_y = center.y.saturating_add(reach).min(self.max_y());

        (min_y..=max_y)
            .flat_map(move |y| (min_x..=max_x).map(move |x| Position::new(x, y)))
            .filter(move |position| limit > 0 && center.manhattan_distance(*position) < limit)
            .filter_map(move |position| self.cell(position))
    }

    /// Number of cells nearer than `limit` whose content satisfies `predicate`.
    pub fn count_nearer_than<F>(&self, center: Position, limit: u32, predicate: F) -> usize
    where
        F: Fn(CellContent) -> bool,
    {
        self.cells_nearer_than(center, limit)
            .filter(|cell| predicate(cell.content))
            .count()
    }
}
