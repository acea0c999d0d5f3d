use crate::osd::Preview;

/// Inclusive bounds of the cells a preview occupies, relative to its anchor
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Footprint {
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
}

impl Footprint {
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> i32 {
        self.max_y - self.min_y + 1
    }
}

/// Local `(x, y)` and glyph of every cell drawn by a preview
pub fn cells(preview: &Preview) -> Vec<(i32, i32, u8)> {
    match preview {
        Preview::Text(text) => text.iter().enumerate().map(|(x, &g)| (x as i32, 0, g)).collect(),
        Preview::Rows(rows) => {
            let mut cells = Vec::new();
            for (y, row) in rows.iter().enumerate() {
                cells.extend(row.iter().enumerate().map(|(x, &g)| (x as i32, y as i32, g)));
            }
            cells
        }
        Preview::Sprites(sprites) => {
            sprites.iter().map(|s| (s.x as i32, s.y as i32, s.symbol)).collect()
        }
    }
}

pub fn footprint(preview: &Preview) -> Footprint {
    let cells = cells(preview);
    let mut iter = cells.iter();
    let (x, y) = match iter.next() {
        Some(&(x, y, _)) => (x, y),
        None => return Footprint::default(),
    };
    let init = Footprint { min_x: x, max_x: x, min_y: y, max_y: y };
    iter.fold(init, |fp, &(x, y, _)| Footprint {
        min_x: fp.min_x.min(x),
        max_x: fp.max_x.max(x),
        min_y: fp.min_y.min(y),
        max_y: fp.max_y.max(y),
    })
}

mod test {
    #[test]
    fn test_footprint() {
        use super::{footprint, Footprint};
        use crate::osd::{Preview, Sprite};

        let text = Preview::Text(b"\x0199".to_vec());
        assert_eq!(footprint(&text), Footprint { min_x: 0, max_x: 2, min_y: 0, max_y: 0 });

        let rows = Preview::Rows(vec![b"-1000".to_vec(), b"545".to_vec()]);
        let expected = Footprint { min_x: 0, max_x: 4, min_y: 0, max_y: 1 };
        assert_eq!(footprint(&rows), expected);
        assert_eq!((expected.width(), expected.height()), (5, 2));

        let sprites =
            vec![Sprite::new(-3, 0, 0x17), Sprite::new(2, -1, 0x09), Sprite::new(0, 2, 0x16)];
        let expected = Footprint { min_x: -3, max_x: 2, min_y: -1, max_y: 2 };
        assert_eq!(footprint(&Preview::Sprites(sprites)), expected);
        assert_eq!(footprint(&Preview::default()), Footprint::default());
    }
}
