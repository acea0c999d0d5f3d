use crate::version::{ApiVersion, API_VERSION_1_42};

pub const BLANK: u8 = 0x20;
pub const RSSI: u8 = 0x01;
pub const AH_RIGHT: u8 = 0x02;
pub const AH_LEFT: u8 = 0x03;
pub const THR: u8 = 0x04;
pub const VOLT: u8 = 0x06;
pub const MAH: u8 = 0x07;
pub const STICK_OVERLAY_SPRITE_MID: u8 = 0x09;
pub const STICK_OVERLAY_CENTER: u8 = 0x0B;
pub const METRE: u8 = 0x0C;
pub const TEMP_F: u8 = 0x0D;
pub const TEMP_C: u8 = 0x0E;
pub const FEET: u8 = 0x0F;
pub const BBLOG: u8 = 0x10;
pub const HOMEFLAG: u8 = 0x11;
pub const AH_DECORATION: u8 = 0x13;
pub const ROLL: u8 = 0x14;
pub const PITCH: u8 = 0x15;
pub const STICK_OVERLAY_VERTICAL: u8 = 0x16;
pub const STICK_OVERLAY_HORIZONTAL: u8 = 0x17;
pub const HEADING_N: u8 = 0x18;
pub const HEADING_E: u8 = 0x1A;
pub const HEADING_W: u8 = 0x1B;
pub const HEADING_DIVIDED_LINE: u8 = 0x1C;
pub const HEADING_LINE: u8 = 0x1D;
pub const GPS_SAT_L: u8 = 0x1E;
pub const GPS_SAT_R: u8 = 0x1F;
pub const ARROW_SOUTH: u8 = 0x60;
pub const ARROW_EAST: u8 = 0x64;
pub const TOTAL_DIST: u8 = 0x71;
pub const ARROW_SMALL_UP: u8 = 0x75;
pub const TEMPERATURE: u8 = 0x7A;
pub const KM: u8 = 0x7D;
pub const MILES: u8 = 0x7E;
pub const ALTITUDE: u8 = 0x7F;
pub const AH_BAR9_0: u8 = 0x80;
pub const GPS_LAT: u8 = 0x89;
pub const PB_START: u8 = 0x8A;
pub const PB_FULL: u8 = 0x8B;
pub const PB_EMPTY: u8 = 0x8D;
pub const PB_END: u8 = 0x8E;
pub const PB_CLOSE: u8 = 0x8F;
pub const BATTERY: u8 = 0x96;
pub const GPS_LON: u8 = 0x98;
pub const FTPS: u8 = 0x99;
pub const AMP: u8 = 0x9A;
pub const ON_M: u8 = 0x9B;
pub const FLY_M: u8 = 0x9C;
pub const MPH: u8 = 0x9D;
pub const KPH: u8 = 0x9E;
pub const MPS: u8 = 0x9F;

/// Glyphs that moved between font revisions
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Symbols {
    pub ah_center_line: u8,
    pub ah_center: u8,
    pub ah_center_line_right: u8,
    pub speed: Option<u8>,
    pub link_quality: Option<u8>,
}

impl Default for Symbols {
    fn default() -> Self {
        Self {
            ah_center_line: 0x72,
            ah_center: 0x73,
            ah_center_line_right: 0x74,
            speed: Some(0x70),
            link_quality: Some(0x7B),
        }
    }
}

impl Symbols {
    pub fn for_version(version: ApiVersion) -> Self {
        if version >= API_VERSION_1_42 {
            return Self::default();
        }
        // font v1
        Self {
            ah_center_line: 0x26,
            ah_center: 0x7E,
            ah_center_line_right: 0x27,
            speed: None,
            link_quality: None,
        }
    }
}

mod test {
    #[test]
    fn test_font_v1_symbols() {
        use super::Symbols;
        use crate::version::{API_VERSION_1_41, API_VERSION_1_42};

        let symbols = Symbols::for_version(API_VERSION_1_41);
        assert_eq!(symbols.ah_center, 0x7E);
        assert_eq!(symbols.speed, None);
        assert_eq!(Symbols::for_version(API_VERSION_1_42), Symbols::default());
    }
}
