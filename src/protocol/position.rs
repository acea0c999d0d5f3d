//! Packed 16 bit position and timer words

use crate::model::Timer;

/// Visibility in the first profile, shifted left per profile
pub const VISIBLE: u16 = 0x0800;
pub const VARIANTS: u16 = 0xC000;
pub const MAX_PROFILES: usize = 3;

const X_HIGH_BIT: u16 = 0x20;
const LOW_BITS: u16 = 0x1F;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Layout {
    pub x: i32,
    pub y: i32,
    pub visibility: Vec<bool>,
    pub variant: u8,
}

pub fn pack_coordinates(x: i32, y: i32) -> u16 {
    let (x, y) = (x as u16, y as u16);
    ((x & X_HIGH_BIT) << 5) | ((y & LOW_BITS) << 5) | (x & LOW_BITS)
}

pub fn unpack_coordinates(word: u16) -> (i32, i32) {
    let x = ((word >> 5) & X_HIGH_BIT) | (word & LOW_BITS);
    let y = (word >> 5) & LOW_BITS;
    (x as i32, y as i32)
}

pub fn pack(layout: &Layout, profile_count: usize) -> u16 {
    let mut word = pack_coordinates(layout.x, layout.y);
    let profiles = layout.visibility.iter().take(profile_count.min(MAX_PROFILES));
    for (profile, _) in profiles.enumerate().filter(|(_, visible)| **visible) {
        word |= VISIBLE << profile;
    }
    word | ((layout.variant as u16) << 14) & VARIANTS
}

pub fn unpack(word: u16, profile_count: usize) -> Layout {
    let (x, y) = unpack_coordinates(word);
    let count = profile_count.min(MAX_PROFILES);
    let visibility = (0..count).map(|profile| word & (VISIBLE << profile) > 0).collect();
    Layout { x, y, visibility, variant: ((word & VARIANTS) >> 14) as u8 }
}

pub fn pack_timer(timer: &Timer) -> u16 {
    let source = (timer.source & 0x0F) as u16;
    let precision = (timer.precision & 0x0F) as u16;
    source | precision << 4 | (timer.alarm as u16) << 8
}

pub fn unpack_timer(index: usize, word: u16) -> Timer {
    let source = (word & 0x0F) as u8;
    let precision = ((word >> 4) & 0x0F) as u8;
    Timer { index, source, precision, alarm: (word >> 8) as u8 }
}

mod test {
    #[test]
    fn test_unpack_position_word() {
        use super::{pack, unpack, Layout};

        let layout = unpack(0x09C1, 1);
        assert_eq!(layout, Layout { x: 1, y: 14, visibility: vec![true], variant: 0 });
        let layout = unpack(0x9421, 3);
        let expected = Layout { x: 33, y: 1, visibility: vec![false, true, false], variant: 2 };
        assert_eq!(layout, expected);
        assert_eq!(pack(&expected, 3), 0x9421);
        // visibility of profiles beyond the count is not encoded
        assert_eq!(pack(&expected, 1), 0x8421);
    }

    #[test]
    fn test_position_round_trip() {
        use super::{pack, unpack, Layout};

        for profiles in 1..=3usize {
            for variant in 0..4u8 {
                let visibility: Vec<bool> =
                    (0..profiles).map(|p| (p + variant as usize) % 2 == 0).collect();
                for y in 0..32 {
                    for x in 0..64 {
                        let layout = Layout { x, y, visibility: visibility.clone(), variant };
                        assert_eq!(unpack(pack(&layout, profiles), profiles), layout);
                    }
                }
            }
        }
    }

    #[test]
    fn test_timer_word() {
        use super::{pack_timer, unpack_timer};
        use crate::model::Timer;

        let timer = unpack_timer(1, 0x0A21);
        assert_eq!(timer, Timer { index: 1, source: 1, precision: 2, alarm: 10 });
        for word in 0..=u16::MAX {
            assert_eq!(pack_timer(&unpack_timer(0, word)), word);
        }
    }
}
