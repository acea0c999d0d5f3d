use core::fmt;

use super::footprint::footprint;
use crate::model::DisplayItem;
use crate::osd::Grid;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlacementError {
    NotPositionable(usize),
    OutsideGrid { x: i32, y: i32 },
    NoRoom(usize),
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotPositionable(index) => write!(f, "Item {} is not positionable", index),
            Self::OutsideGrid { x, y } => write!(f, "Cell {},{} outside grid", x, y),
            Self::NoRoom(index) => write!(f, "No room left for item {}", index),
        }
    }
}

/// Anchor for an item dropped at `drop`, `grab` being the local cell it was picked up by.
/// Shifts the anchor so the whole footprint stays on grid where it fits.
pub fn place(
    grid: Grid,
    item: &DisplayItem,
    drop: (i32, i32),
    grab: (i32, i32),
) -> Result<i32, PlacementError> {
    if !item.positionable {
        return Err(PlacementError::NotPositionable(item.index));
    }
    if !grid.contains(drop.0, drop.1) {
        return Err(PlacementError::OutsideGrid { x: drop.0, y: drop.1 });
    }
    let (mut x, mut y) = match item.preview.is_text() {
        true => drop,
        false => (drop.0 - grab.0, drop.1 - grab.1),
    };
    let fp = footprint(&item.preview);
    if x + fp.max_x >= grid.width {
        x = grid.width - 1 - fp.max_x;
    }
    if x + fp.min_x < 0 {
        x = -fp.min_x;
    }
    if y + fp.max_y >= grid.height {
        y = grid.height - 1 - fp.max_y;
    }
    if y + fp.min_y < 0 {
        y = -fp.min_y;
    }
    let (x, y) = (x.clamp(0, grid.width - 1), y.clamp(0, grid.height - 1));
    trace!("Item {} placed at {},{}", item.index, x, y);
    Ok(grid.offset(x, y))
}

mod test {
    #[cfg(test)]
    fn item(preview: crate::osd::Preview) -> crate::model::DisplayItem {
        use crate::model::{DisplayItem, FieldRef};

        DisplayItem {
            index: 7,
            field: FieldRef::Unknown { suffix: 1 },
            position: 0,
            origin: None,
            positionable: true,
            visibility: vec![true],
            variant: 0,
            draw_order: None,
            preview,
        }
    }

    #[test]
    fn test_place_text() {
        use super::{place, PlacementError};
        use crate::osd::{Grid, Preview};

        let grid = Grid::default();
        let mut item = item(Preview::Text(b"\x0199".to_vec()));
        assert_eq!(place(grid, &item, (5, 3), (2, 0)), Ok(95));
        assert_eq!(place(grid, &item, (28, 3), (0, 0)), Ok(117));
        let error = PlacementError::OutsideGrid { x: 30, y: 3 };
        assert_eq!(place(grid, &item, (30, 3), (0, 0)), Err(error));

        item.positionable = false;
        assert_eq!(place(grid, &item, (5, 3), (0, 0)), Err(PlacementError::NotPositionable(7)));
    }

    #[test]
    fn test_place_rows() {
        use super::place;
        use crate::osd::{Grid, Preview};

        let grid = Grid::default();
        let item = item(Preview::Rows(vec![b"22600".to_vec(); 4]));
        assert_eq!(place(grid, &item, (29, 15), (2, 1)), Ok(12 * 30 + 25));
        assert_eq!(place(grid, &item, (10, 5), (2, 1)), Ok(4 * 30 + 8));
        // left of the grab point stays on the drop row instead of wrapping
        assert_eq!(place(grid, &item, (0, 5), (2, 1)), Ok(4 * 30));
    }

    #[test]
    fn test_place_sprites() {
        use super::place;
        use crate::osd::{Grid, Preview, Sprite};

        let grid = Grid::default();
        let sprites = vec![
            Sprite::new(-3, 0, b'-'),
            Sprite::new(0, -2, b'|'),
            Sprite::new(0, 0, b'+'),
            Sprite::new(0, 2, b'|'),
            Sprite::new(3, 0, b'-'),
        ];
        let item = item(Preview::Sprites(sprites));
        assert_eq!(place(grid, &item, (0, 8), (0, 0)), Ok(8 * 30 + 3));
        assert_eq!(place(grid, &item, (29, 0), (0, 0)), Ok(2 * 30 + 26));
        assert_eq!(place(grid, &item, (4, 15), (3, 0)), Ok(13 * 30 + 3));
    }
}
