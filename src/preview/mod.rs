pub mod footprint;
pub mod placement;
pub mod preset;

use core::fmt;

use hal::glyph::GlyphSource;

use crate::model::DisplayItem;
use crate::osd::{symbol::BLANK, Grid};

use footprint::{cells, footprint};

/// Item drawing a cell, with the cell's offset inside the item's own preview
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Occupant {
    pub item: usize,
    pub x: i32,
    pub y: i32,
    pub draw_order: Option<u16>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PreviewCell {
    pub glyph: u8,
    pub occupant: Option<Occupant>,
}

impl Default for PreviewCell {
    fn default() -> Self {
        Self { glyph: BLANK, occupant: None }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewBuffer {
    grid: Grid,
    cells: Vec<PreviewCell>,
}

impl PreviewBuffer {
    pub fn new(grid: Grid) -> Self {
        Self { grid, cells: vec![PreviewCell::default(); grid.total() as usize] }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn cell(&self, x: i32, y: i32) -> Option<&PreviewCell> {
        match self.grid.contains(x, y) {
            true => self.cells.get(self.grid.offset(x, y) as usize),
            false => None,
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[PreviewCell]> {
        self.cells.chunks(self.grid.width as usize)
    }

    /// Occupied cells only accept items with a draw order not below the occupant's
    fn draw(&mut self, offset: i32, glyph: u8, occupant: Occupant) {
        if offset < 0 || offset >= self.grid.total() {
            return;
        }
        let cell = &mut self.cells[offset as usize];
        let writable = match (cell.occupant, occupant.draw_order) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(old), Some(new)) => old.draw_order.map(|old| new >= old).unwrap_or(true),
        };
        if writable {
            *cell = PreviewCell { glyph, occupant: Some(occupant) };
        }
    }

    pub fn render<G: GlyphSource>(&self, source: &G) -> Vec<G::Image> {
        self.cells.iter().map(|cell| source.draw(cell.glyph)).collect()
    }
}

impl fmt::Display for PreviewBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                let printable = (0x20..0x7F).contains(&cell.glyph);
                let c = if printable { cell.glyph as char } else { '.' };
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

/// Cell an item anchors at, negative positions count back from the end of the grid
pub fn anchor(grid: Grid, position: i32) -> i32 {
    match position < 0 {
        true => position + grid.total(),
        false => position,
    }
}

pub fn compose(grid: Grid, items: &[DisplayItem], profile: usize) -> PreviewBuffer {
    let mut buffer = PreviewBuffer::new(grid);
    for item in items.iter().filter(|item| item.is_visible(profile)) {
        if item.preview.is_empty() {
            continue;
        }
        let anchor = anchor(grid, item.position);
        for (x, y, glyph) in cells(&item.preview) {
            let occupant = Occupant { item: item.index, x, y, draw_order: item.draw_order };
            buffer.draw(anchor + x + y * grid.width, glyph, occupant);
        }
    }
    buffer
}

/// Glyph images of a positionable item, relative to the top left of its footprint
pub fn drag_image<G: GlyphSource>(item: &DisplayItem, source: &G) -> Vec<(i32, i32, G::Image)> {
    if !item.positionable {
        return Vec::new();
    }
    let fp = footprint(&item.preview);
    let cells = cells(&item.preview).into_iter();
    cells.map(|(x, y, glyph)| (x - fp.min_x, y - fp.min_y, source.draw(glyph))).collect()
}

mod test {
    #[cfg(test)]
    fn item(
        index: usize,
        position: i32,
        draw_order: Option<u16>,
        preview: crate::osd::Preview,
    ) -> crate::model::DisplayItem {
        use crate::model::{DisplayItem, FieldRef};

        DisplayItem {
            index,
            field: FieldRef::Unknown { suffix: index + 1 },
            position,
            origin: None,
            positionable: true,
            visibility: vec![true, false],
            variant: 0,
            draw_order,
            preview,
        }
    }

    #[cfg(test)]
    struct Codes;

    #[cfg(test)]
    impl hal::glyph::GlyphSource for Codes {
        type Image = u8;

        fn draw(&self, code: u8) -> u8 {
            code
        }
    }

    #[test]
    fn test_compose_anchors() {
        use super::compose;
        use crate::osd::{Grid, Preview};

        let grid = Grid::default();
        let rssi = item(0, -59, Some(30), Preview::Text(b"\x0199".to_vec()));
        let last = item(1, -1, None, Preview::Text(b"XYZ".to_vec()));
        let buffer = compose(grid, &[rssi, last], 0);

        let occupied: Vec<_> = (0..grid.total())
            .map(|offset| grid.coordinates(offset))
            .filter(|&(x, y)| buffer.cell(x, y).and_then(|c| c.occupant).is_some())
            .map(|(x, y)| grid.offset(x, y))
            .collect();
        assert_eq!(occupied, vec![421, 422, 423, 479]);
        let cell = buffer.cell(2, 14).unwrap();
        assert_eq!(cell.glyph, b'9');
        assert_eq!(cell.occupant.map(|o| (o.item, o.x, o.draw_order)), Some((0, 1, Some(30))));
        assert_eq!(buffer.cell(29, 15).map(|c| c.glyph), Some(b'X'));
        assert_eq!(buffer.cell(30, 15), None);

        // hidden in the second profile
        let hidden = item(0, -59, None, Preview::Text(b"A".to_vec()));
        let buffer = compose(grid, &[hidden], 1);
        assert!(buffer.rows().flatten().all(|cell| cell.occupant.is_none()));
    }

    #[test]
    fn test_compose_draw_order() {
        use indoc::indoc;

        use super::compose;
        use crate::osd::{Grid, Preview, Sprite};

        let grid = Grid::new(6, 3).unwrap();
        let sprites =
            vec![Sprite::new(-1, -1, b'\\'), Sprite::new(0, 0, b'+'), Sprite::new(1, 1, b'/')];
        let items = vec![
            item(0, 7, Some(10), Preview::Text(b"aaaa".to_vec())),
            item(1, 8, Some(20), Preview::Sprites(sprites)),
            item(2, 0, None, Preview::Rows(vec![b"r1".to_vec(), b"r2".to_vec()])),
            item(3, 12, Some(5), Preview::Text(b"\x01\x02".to_vec())),
        ];
        let buffer = compose(grid, &items, 0);
        let expected = indoc!(
            "
            r\\
            ra+aa
            .. /"
        );
        let text = buffer.to_string();
        assert_eq!(text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n"), expected);

        let reversed: Vec<_> = items.iter().rev().cloned().collect();
        assert_eq!(compose(grid, &reversed, 0), buffer);
    }

    #[test]
    fn test_render_and_drag_image() {
        use super::{compose, drag_image};
        use crate::osd::{Grid, Preview, Sprite};

        let grid = Grid::new(4, 2).unwrap();
        let sprites = vec![Sprite::new(-1, 0, 0x17), Sprite::new(0, -1, 0x16)];
        let item = item(0, 5, Some(1), Preview::Sprites(sprites));
        let buffer = compose(grid, core::slice::from_ref(&item), 0);
        let expected = vec![0x20, 0x16, 0x20, 0x20, 0x17, 0x20, 0x20, 0x20];
        assert_eq!(buffer.render(&Codes), expected);
        assert_eq!(drag_image(&item, &Codes), vec![(0, 1, 0x17), (1, 0, 0x16)]);
    }
}
