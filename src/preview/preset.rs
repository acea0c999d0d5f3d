use core::fmt;
use core::str::FromStr;

use super::footprint::{footprint, Footprint};
use super::PreviewBuffer;
use crate::model::DisplayItem;
use crate::osd::Grid;

macro_rules! presets {
    ($($preset:ident => $label:literal),+) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum Preset {
            $($preset),+
        }

        impl Preset {
            pub const ALL: &'static [Preset] = &[$(Preset::$preset),+];

            pub fn label(self) -> &'static str {
                match self {
                    $(Self::$preset => $label),+
                }
            }
        }

        impl FromStr for Preset {
            type Err = ();

            fn from_str(string: &str) -> Result<Self, ()> {
                match string {
                    $(stringify!($preset) => Ok(Self::$preset),)+
                    _ => Err(()),
                }
            }
        }

        impl fmt::Display for Preset {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let name = match self {
                    $(Self::$preset => stringify!($preset)),+
                };
                write!(f, "{}", name)
            }
        }
    };
}

presets! {
    TL => "Top Left",
    TC => "Top Center",
    TR => "Top Right",
    TML => "Top Middle Left",
    TMC => "Top Mid Center",
    TMR => "Top Middle Right",
    LMC => "Left Middle",
    CTR => "Center",
    RMC => "Right Middle",
    BML => "Bottom Middle Left",
    BMC => "Bottom Mid Center",
    BMR => "Bottom Middle Right",
    BL => "Bottom Left",
    BC => "Bottom Center",
    BR => "Bottom Right"
}

impl Preset {
    /// Top left cell of a `width` x `height` footprint
    pub fn target(self, width: i32, height: i32, grid: Grid) -> (i32, i32) {
        let (w, h) = (grid.width, grid.height);
        let left = 1;
        let center = (w - width).div_euclid(2);
        let right = (w - width - 1).max(1);
        let top = 1;
        let upper = (h / 3) - height / 2;
        let middle = (h - height).div_euclid(2);
        let lower = (h * 2 / 3) - height / 2;
        let bottom = h - height - 1;
        match self {
            Self::TL => (left, top),
            Self::TC => (center, top),
            Self::TR => (right, top),
            Self::TML => (left, upper),
            Self::TMC => (center, upper),
            Self::TMR => (right, upper),
            Self::LMC => (left, middle),
            Self::CTR => (center, middle),
            Self::RMC => (w - 1 - width, middle),
            Self::BML => (left, lower),
            Self::BMC => (center, lower),
            Self::BMR => (right, lower),
            Self::BL => (left, bottom),
            Self::BC => (center, bottom),
            Self::BR => (right, bottom),
        }
    }

    /// Row step taken while the target is occupied
    pub fn grow(self) -> i32 {
        match self {
            Self::BML | Self::BMC | Self::BMR | Self::BL | Self::BC | Self::BR => -1,
            _ => 1,
        }
    }
}

fn fits(buffer: &PreviewBuffer, item: &DisplayItem, fp: Footprint, x: i32, y: i32) -> bool {
    for cy in y..y + fp.height() {
        for cx in x..x + fp.width() {
            let cell = match buffer.cell(cx, cy) {
                Some(cell) => cell,
                None => return false,
            };
            match cell.occupant {
                Some(occupant) if occupant.item != item.index => return false,
                _ => (),
            }
        }
    }
    true
}

/// Anchor placing the item at a preset, moving along rows until nothing else is covered
pub fn preset_position(
    grid: Grid,
    buffer: &PreviewBuffer,
    item: &DisplayItem,
    preset: Preset,
) -> Option<i32> {
    if !item.positionable {
        return None;
    }
    let fp = footprint(&item.preview);
    let (x, mut y) = preset.target(fp.width(), fp.height(), grid);
    while (0..grid.height).contains(&y) {
        if fits(buffer, item, fp, x, y) {
            return Some(grid.offset(x - fp.min_x, y - fp.min_y));
        }
        y += preset.grow();
    }
    debug!("No room for item {} at {}", item.index, preset);
    None
}

mod test {
    #[cfg(test)]
    fn item(index: usize, position: i32) -> crate::model::DisplayItem {
        use crate::model::{DisplayItem, FieldRef};
        use crate::osd::Preview;

        DisplayItem {
            index,
            field: FieldRef::Unknown { suffix: index + 1 },
            position,
            origin: None,
            positionable: true,
            visibility: vec![true],
            variant: 0,
            draw_order: None,
            preview: Preview::Text(b"\x0199".to_vec()),
        }
    }

    #[test]
    fn test_preset_names() {
        use super::Preset;

        assert_eq!(Preset::ALL.len(), 15);
        assert_eq!("BMR".parse(), Ok(Preset::BMR));
        assert_eq!("bmr".parse::<Preset>(), Err(()));
        assert_eq!(Preset::CTR.to_string(), "CTR");
        assert_eq!(Preset::TMC.label(), "Top Mid Center");
    }

    #[test]
    fn test_preset_targets() {
        use super::Preset;
        use crate::osd::Grid;

        let grid = Grid::default();
        assert_eq!(Preset::TR.target(3, 1, grid), (26, 1));
        assert_eq!(Preset::CTR.target(7, 5, grid), (11, 5));
        assert_eq!(Preset::BMC.target(4, 2, grid), (13, 9));
        assert_eq!(Preset::RMC.target(3, 1, grid), (26, 7));
    }

    #[test]
    fn test_preset_position() {
        use super::{preset_position, Preset};
        use crate::osd::Grid;
        use crate::preview::{compose, PreviewBuffer};

        let grid = Grid::default();
        let empty = PreviewBuffer::new(grid);
        let rssi = item(0, 0);
        assert_eq!(preset_position(grid, &empty, &rssi, Preset::TL), Some(31));
        assert_eq!(preset_position(grid, &empty, &rssi, Preset::TC), Some(43));
        assert_eq!(preset_position(grid, &empty, &rssi, Preset::BL), Some(421));

        let buffer = compose(grid, &[item(1, 32), item(2, 392)], 0);
        assert_eq!(preset_position(grid, &buffer, &rssi, Preset::TL), Some(61));
        assert_eq!(preset_position(grid, &buffer, &rssi, Preset::BL), Some(421));
        assert_eq!(preset_position(grid, &buffer, &item(1, 32), Preset::TL), Some(31));

        let buffer = compose(grid, &[item(1, 391)], 0);
        assert_eq!(preset_position(grid, &buffer, &rssi, Preset::BL), Some(421));
        let buffer = compose(grid, &[item(1, 421)], 0);
        assert_eq!(preset_position(grid, &buffer, &rssi, Preset::BL), Some(391));

        let mut hidden = rssi.clone();
        hidden.positionable = false;
        assert_eq!(preset_position(grid, &empty, &hidden, Preset::TL), None);
    }
}
