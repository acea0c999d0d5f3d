//! Flight controller simulated in memory, for offline editing and for exercising sessions

use hal::msp::{
    Transport, MSP_EEPROM_WRITE, MSP_OSD_CANVAS, MSP_OSD_CONFIG, MSP_SET_OSD_CONFIG,
};

use crate::config::Settings;
use crate::model::OsdState;
use crate::osd::Catalog;
use crate::protocol::encode::{SETTINGS, TIMER};
use crate::protocol::reader::{DecodeError, Reader};
use crate::version::*;

/// OSD feature enabled with a font device present
pub const DEFAULT_FLAGS: u8 = 0x21;

#[derive(Clone, Debug)]
pub struct VirtualFc {
    pub version: ApiVersion,
    pub flags: u8,
    pub settings: Settings,
    pub words: Vec<u16>,
    pub stats: Vec<bool>,
    pub timers: Vec<u16>,
    pub warning_flags: u32,
    pub warning_count: u8,
    pub profile_count: u8,
    /// 1-based as on the wire
    pub selected_profile: u8,
    pub canvas: (u8, u8),
    /// Every request received, in order
    pub requests: Vec<(u16, Vec<u8>)>,
    pub saves: usize,
    /// Fails every request while set
    pub offline: bool,
}

impl VirtualFc {
    pub fn new(version: ApiVersion) -> Self {
        let catalog = Catalog::for_version(version);
        Self {
            version: catalog.version,
            flags: DEFAULT_FLAGS,
            settings: Settings::default(),
            words: vec![0; catalog.display.len()],
            stats: vec![false; catalog.stats.len()],
            timers: vec![0; 2],
            warning_flags: 0,
            warning_count: catalog.warnings.len() as u8,
            profile_count: 1,
            selected_profile: 1,
            canvas: (53, 20),
            requests: Vec::new(),
            saves: 0,
            offline: false,
        }
    }

    /// OSD configuration record as reported for `MSP_OSD_CONFIG`
    pub fn record(&self) -> Vec<u8> {
        let version = self.version;
        let mut record = vec![self.flags];
        if self.flags == 0 {
            return record;
        }
        record.push(self.settings.video_system.into());
        if !OsdState::new(self.flags, version).osd_feature {
            return record;
        }

        let alarms = &self.settings.alarms;
        record.push(self.settings.unit_mode.into());
        record.push(alarms.rssi);
        record.extend_from_slice(&alarms.capacity.to_le_bytes());
        if version < API_VERSION_1_36 {
            record.extend_from_slice(&alarms.time.to_le_bytes());
        } else {
            record.extend_from_slice(&[0, self.words.len() as u8]);
        }
        record.extend_from_slice(&alarms.altitude.to_le_bytes());
        for word in self.words.iter() {
            record.extend_from_slice(&word.to_le_bytes());
        }

        if version >= API_VERSION_1_36 {
            record.push(self.stats.len() as u8);
            record.extend(self.stats.iter().map(|&enabled| enabled as u8));
            record.push(self.timers.len() as u8);
            for timer in self.timers.iter() {
                record.extend_from_slice(&timer.to_le_bytes());
            }
            record.extend_from_slice(&(self.warning_flags as u16).to_le_bytes());
            if version >= API_VERSION_1_41 {
                record.push(self.warning_count);
                record.extend_from_slice(&self.warning_flags.to_le_bytes());
            }
        }

        let parameters = &self.settings.parameters;
        if version >= API_VERSION_1_41 {
            record.extend_from_slice(&[self.profile_count, self.selected_profile]);
            record.push(parameters.overlay_radio_mode);
        }
        if version >= API_VERSION_1_43 {
            let camera_frame = &parameters.camera_frame;
            record.extend_from_slice(&[camera_frame.width, camera_frame.height]);
        }
        if version >= API_VERSION_1_46 {
            record.extend_from_slice(&alarms.link_quality.to_le_bytes());
            record.extend_from_slice(&alarms.rssi_dbm.to_le_bytes());
        }
        record
    }

    fn apply_settings(&mut self, payload: &[u8]) -> Result<(), DecodeError> {
        let version = self.version;
        let mut reader = Reader::new(payload);
        self.settings.video_system = reader.u8()?.into();
        if reader.remaining() == 0 {
            return Ok(());
        }
        let settings = &mut self.settings;
        settings.unit_mode = reader.u8()?.into();
        settings.alarms.rssi = reader.u8()?;
        settings.alarms.capacity = reader.u16()?;
        let time = reader.u16()?;
        if version < API_VERSION_1_36 {
            settings.alarms.time = time;
        }
        settings.alarms.altitude = reader.u16()?;
        if version < API_VERSION_1_37 {
            return Ok(());
        }
        let low = reader.u16()? as u32;
        self.warning_flags = self.warning_flags & 0xFFFF_0000 | low;
        if version >= API_VERSION_1_41 {
            self.warning_flags = reader.u32()?;
            self.selected_profile = reader.u8()?;
            settings.parameters.overlay_radio_mode = reader.u8()?;
        }
        if version >= API_VERSION_1_43 {
            settings.parameters.camera_frame.width = reader.u8()?;
            settings.parameters.camera_frame.height = reader.u8()?;
        }
        if version >= API_VERSION_1_46 {
            settings.alarms.link_quality = reader.u16()?;
            settings.alarms.rssi_dbm = reader.i16()?;
        }
        Ok(())
    }

    fn apply(&mut self, payload: &[u8]) -> Result<(), ()> {
        match *payload {
            [SETTINGS, ..] => {
                let result = self.apply_settings(&payload[1..]);
                result.map_err(|e| warn!("Malformed settings payload: {}", e))?;
            }
            [TIMER, index, low, high] => {
                let timer = self.timers.get_mut(index as usize).ok_or(())?;
                *timer = u16::from_le_bytes([low, high]);
            }
            [index, low, high] => {
                let word = self.words.get_mut(index as usize).ok_or(())?;
                *word = u16::from_le_bytes([low, high]);
            }
            [index, enabled, _, _] => {
                let stat = self.stats.get_mut(index as usize).ok_or(())?;
                *stat = enabled == 1;
            }
            _ => return Err(()),
        }
        Ok(())
    }
}

impl Transport for VirtualFc {
    type Error = ();

    fn request(&mut self, code: u16, payload: &[u8]) -> Result<Vec<u8>, ()> {
        self.requests.push((code, payload.to_vec()));
        if self.offline {
            return Err(());
        }
        match code {
            MSP_OSD_CONFIG => Ok(self.record()),
            MSP_OSD_CANVAS => Ok(vec![self.canvas.0, self.canvas.1]),
            MSP_SET_OSD_CONFIG => self.apply(payload).map(|_| Vec::new()),
            MSP_EEPROM_WRITE => {
                self.saves += 1;
                Ok(Vec::new())
            }
            _ => Err(()),
        }
    }
}

mod test {
    #[test]
    fn test_record_layout() {
        use hex_literal::hex;

        use super::VirtualFc;
        use crate::version::{API_VERSION_1_32, API_VERSION_1_41};

        let mut fc = VirtualFc::new(API_VERSION_1_32);
        fc.words.truncate(2);
        fc.words[0] = 0x09C1;
        fc.settings.alarms.time = 10;
        assert_eq!(fc.record(), hex!("21 00 01 00 0000 0a00 0000 c109 0000").to_vec());

        let mut fc = VirtualFc::new(API_VERSION_1_41);
        fc.words.clear();
        fc.stats = vec![true, false];
        fc.timers = vec![0x0A21];
        fc.warning_flags = 0x0001_0004;
        fc.warning_count = 17;
        let expected = hex!("21 00 01 00 0000 0000 0000 02 0100 01 210a 0400 11 04000100 01 01 00");
        assert_eq!(fc.record(), expected.to_vec());
    }

    #[test]
    fn test_apply_set_requests() {
        use hal::msp::{Transport, MSP_EEPROM_WRITE, MSP_SET_OSD_CONFIG};
        use hex_literal::hex;

        use super::VirtualFc;
        use crate::version::API_VERSION_1_46;

        let mut fc = VirtualFc::new(API_VERSION_1_46);
        assert!(fc.request(MSP_SET_OSD_CONFIG, &hex!("00 c1 09")).is_ok());
        assert!(fc.request(MSP_SET_OSD_CONFIG, &hex!("fe 01 21 0a")).is_ok());
        assert!(fc.request(MSP_SET_OSD_CONFIG, &hex!("04 01 00 00")).is_ok());
        let settings = hex!("ff 02 00 14 0000 0000 0000 0400 04000100 01 00 18 0b 0000 0000");
        assert!(fc.request(MSP_SET_OSD_CONFIG, &settings).is_ok());
        assert_eq!(fc.words[0], 0x09C1);
        assert_eq!(fc.timers[1], 0x0A21);
        assert!(fc.stats[4]);
        assert_eq!(fc.settings.alarms.rssi, 20);
        assert_eq!(fc.warning_flags, 0x0001_0004);

        assert_eq!(fc.request(MSP_SET_OSD_CONFIG, &hex!("fe 05 00 00")), Err(()));
        assert_eq!(fc.request(MSP_SET_OSD_CONFIG, &hex!("ff 00 01")), Err(()));
        fc.offline = true;
        assert_eq!(fc.request(MSP_EEPROM_WRITE, &[]), Err(()));
        assert_eq!(fc.saves, 0);
        assert_eq!(fc.requests.len(), 7);
    }
}
