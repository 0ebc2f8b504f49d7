//! Row packing for legacy views.
//!
//! Discord renders a legacy message as at most five action rows of five
//! width units each. Buttons take one unit, selects take all five. The packer
//! tracks how full each row is and assigns every item a rendered row before
//! anything is sent.

use super::{Item, ViewItem};
use crate::error::ComponentError;

/// Rows a legacy message can have.
pub const ROW_COUNT: usize = 5;

/// Width units per row.
pub const ROW_WIDTH: u8 = 5;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ViewWeights {
    weights: [u8; ROW_COUNT],
}

impl ViewWeights {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width used in each row.
    pub fn weights(&self) -> &[u8; ROW_COUNT] {
        &self.weights
    }

    /// First row that can take `width` more units without running into a
    /// row that already has content below it.
    pub fn find_open_space(&self, width: u8) -> Result<u8, ComponentError> {
        (0..ROW_COUNT)
            .find(|&index| {
                let fits = self.weights[index] + width <= ROW_WIDTH;
                let next_free = index == ROW_COUNT - 1 || self.weights[index + 1] == 0;
                fits && next_free
            })
            .map(|index| index as u8)
            .ok_or(ComponentError::NoOpenSpace)
    }

    /// Place `item` and record the row it landed in. An item that asked for
    /// a row gets exactly that row or an error; nothing changes on error.
    pub fn add_item(&mut self, item: &mut impl ViewItem) -> Result<(), ComponentError> {
        let width = item.width();
        let row = match item.row() {
            Some(row) => {
                let index = usize::from(row);
                if index >= ROW_COUNT {
                    return Err(ComponentError::RowOutOfRange {
                        row,
                        max: ROW_COUNT as u8,
                    });
                }
                let total = self.weights[index] + width;
                if total > ROW_WIDTH {
                    return Err(ComponentError::RowFull { row: index, total });
                }
                row
            }
            None => self.find_open_space(width)?,
        };
        self.weights[usize::from(row)] += width;
        item.set_rendered_row(Some(row));
        Ok(())
    }

    /// Give the item's width back to its row.
    pub fn remove_item(&mut self, item: &mut impl ViewItem) {
        if let Some(row) = item.rendered_row() {
            let weight = &mut self.weights[usize::from(row).min(ROW_COUNT - 1)];
            *weight = weight.saturating_sub(item.width());
            item.set_rendered_row(None);
        }
    }

    pub fn clear(&mut self) {
        self.weights = [0; ROW_COUNT];
    }

    /// Place a batch of items. Items that asked for a row go first, so
    /// automatic placement never takes space a pinned item needs. The slice
    /// is reordered accordingly (stable within a row).
    pub fn pack(&mut self, items: &mut [Item]) -> Result<(), ComponentError> {
        items.sort_by_key(|item| (item.row().is_none(), item.row()));
        items.iter_mut().try_for_each(|item| self.add_item(item))
    }
}
