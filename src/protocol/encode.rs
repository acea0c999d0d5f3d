use core::fmt;

use super::position::{pack, pack_timer, Layout};
use crate::model::{DisplayItem, Model, StatItem, Timer};
use crate::osd::Grid;
use crate::version::{
    API_VERSION_1_36, API_VERSION_1_37, API_VERSION_1_41, API_VERSION_1_43, API_VERSION_1_46,
};

/// Leading byte of the settings payload
pub const SETTINGS: u8 = 0xFF;
/// Leading byte of the timer payload
pub const TIMER: u8 = 0xFE;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EncodeError {
    NotPositionable(usize),
    PositionOutOfRange { index: usize, position: i32 },
    UnknownItem(usize),
    InvalidVariant { index: usize, variant: u8 },
    InvalidTimer { index: usize, source: u8, precision: u8 },
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotPositionable(index) => write!(f, "Item {} is not positionable", index),
            Self::PositionOutOfRange { index, position } => {
                write!(f, "Position {} of item {} out of range", position, index)
            }
            Self::UnknownItem(index) => write!(f, "Unknown item {}", index),
            Self::InvalidVariant { index, variant } => {
                write!(f, "Item {} has no variant {}", index, variant)
            }
            Self::InvalidTimer { index, source, precision } => {
                write!(f, "Timer {} has no source {} or precision {}", index, source, precision)
            }
        }
    }
}

pub fn encode_settings(model: &Model) -> Vec<u8> {
    let version = model.version;
    let settings = &model.settings;
    let mut payload = vec![SETTINGS, settings.video_system.into()];
    if !model.state.osd_feature {
        return payload;
    }
    let alarms = &settings.alarms;
    payload.push(settings.unit_mode.into());
    payload.push(alarms.rssi);
    payload.extend_from_slice(&alarms.capacity.to_le_bytes());
    let time = if version < API_VERSION_1_36 { alarms.time } else { 0 };
    payload.extend_from_slice(&time.to_le_bytes());
    payload.extend_from_slice(&alarms.altitude.to_le_bytes());
    if version < API_VERSION_1_37 {
        return payload;
    }
    let warning_flags = model.warning_flags();
    payload.extend_from_slice(&(warning_flags as u16).to_le_bytes());
    if version >= API_VERSION_1_41 {
        payload.extend_from_slice(&warning_flags.to_le_bytes());
        payload.push(model.profiles.selected as u8 + 1);
        payload.push(settings.parameters.overlay_radio_mode);
    }
    if version >= API_VERSION_1_43 {
        let camera_frame = &settings.parameters.camera_frame;
        payload.extend_from_slice(&[camera_frame.width, camera_frame.height]);
    }
    if version >= API_VERSION_1_46 {
        payload.extend_from_slice(&alarms.link_quality.to_le_bytes());
        payload.extend_from_slice(&alarms.rssi_dbm.to_le_bytes());
    }
    payload
}

/// Unmoved items keep the coordinates they were decoded with, even off the current grid
pub fn encode_layout(
    item: &DisplayItem,
    profiles: usize,
    grid: Grid,
) -> Result<Vec<u8>, EncodeError> {
    let (index, position) = (item.index, item.position);
    let (x, y) = match (item.positionable, item.origin) {
        (false, _) => (0, 0),
        (true, Some(origin)) => origin,
        (true, None) if (0..grid.total()).contains(&position) => grid.coordinates(position),
        (true, None) => return Err(EncodeError::PositionOutOfRange { index, position }),
    };
    if item.variant >= 4 {
        return Err(EncodeError::InvalidVariant { index, variant: item.variant });
    }
    let layout = Layout { x, y, visibility: item.visibility.clone(), variant: item.variant };
    let mut payload = vec![index as u8];
    payload.extend_from_slice(&pack(&layout, profiles).to_le_bytes());
    Ok(payload)
}

pub fn encode_timer(timer: &Timer) -> Vec<u8> {
    let mut payload = vec![TIMER, timer.index as u8];
    payload.extend_from_slice(&pack_timer(timer).to_le_bytes());
    payload
}

pub fn encode_stat(stat: &StatItem) -> Vec<u8> {
    vec![stat.index as u8, stat.enabled as u8, 0, 0]
}

mod test {
    #[test]
    fn test_encode_layout() {
        use hex_literal::hex;

        use super::{encode_layout, EncodeError};
        use crate::model::{DisplayItem, FieldRef};
        use crate::osd::{fields, Grid, Preview};

        let mut item = DisplayItem {
            index: 0,
            field: FieldRef::Known(&fields::RSSI_VALUE),
            position: 421,
            origin: None,
            positionable: true,
            visibility: vec![true, false, true],
            variant: 1,
            draw_order: Some(30),
            preview: Preview::default(),
        };
        let grid = Grid::default();
        assert_eq!(encode_layout(&item, 3, grid), Ok(hex!("00 c1 69").to_vec()));

        item.position = 480;
        let error = EncodeError::PositionOutOfRange { index: 0, position: 480 };
        assert_eq!(encode_layout(&item, 3, grid), Err(error));

        // below an NTSC grid, as left by a PAL layout
        let ntsc = Grid { width: 30, height: 13 };
        item.origin = Some((1, 14));
        assert_eq!(encode_layout(&item, 3, ntsc), Ok(hex!("00 c1 69").to_vec()));
        // past the right edge of a narrow HD canvas
        item.origin = Some((52, 2));
        item.position = 152;
        let narrow = Grid { width: 50, height: 18 };
        assert_eq!(encode_layout(&item, 1, narrow), Ok(hex!("00 54 4c").to_vec()));

        item.positionable = false;
        item.variant = 0;
        assert_eq!(encode_layout(&item, 1, grid), Ok(hex!("00 00 08").to_vec()));

        item.variant = 4;
        let error = EncodeError::InvalidVariant { index: 0, variant: 4 };
        assert_eq!(encode_layout(&item, 1, grid), Err(error));
    }

    #[test]
    fn test_encode_timer_and_stat() {
        use hex_literal::hex;

        use super::{encode_stat, encode_timer};
        use crate::model::{Entry, Timer};

        let timer = Timer { index: 1, source: 1, precision: 2, alarm: 10 };
        assert_eq!(encode_timer(&timer), hex!("fe 01 21 0a").to_vec());

        let name = "USED_MAH";
        let (text, desc) = ("osdTextStatUsedMah", "osdDescStatUsedMah");
        let stat = Entry { index: 4, name, text, desc, suffix: None, enabled: true };
        assert_eq!(encode_stat(&stat), hex!("04 01 00 00").to_vec());
    }

    #[test]
    fn test_encode_settings() {
        use hex_literal::hex;

        use super::encode_settings;
        use crate::osd::PreviewHints;
        use crate::protocol::decode;
        use crate::session::virtual_fc::VirtualFc;
        use crate::version::{API_VERSION_1_32, API_VERSION_1_46};

        let record = hex!("01 01 01 14 9808 0a00 6400 c109");
        let model = decode(API_VERSION_1_32, &record, &PreviewHints::default(), None).unwrap();
        assert_eq!(encode_settings(&model), hex!("ff 01 01 14 9808 0a00 6400").to_vec());

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        fc.profile_count = 2;
        fc.selected_profile = 2;
        fc.warning_flags = 0x0001_0003;
        fc.settings.alarms.link_quality = 80;
        fc.settings.alarms.rssi_dbm = -90;
        let hints = PreviewHints::default();
        let model = decode(API_VERSION_1_46, &fc.record(), &hints, None).unwrap();
        let expected = hex!("ff 00 01 00 0000 0000 0000 0300 03000100 02 00 18 0b 5000 a6ff");
        assert_eq!(encode_settings(&model), expected.to_vec());
    }
}
