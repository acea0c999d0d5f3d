use alloc::vec::Vec;

pub const MSP_OSD_CONFIG: u16 = 84;
pub const MSP_SET_OSD_CONFIG: u16 = 85;
pub const MSP_OSD_CANVAS: u16 = 189;
pub const MSP_EEPROM_WRITE: u16 = 250;

/// One outstanding request at a time, response payload without framing
pub trait Transport {
    type Error;

    fn request(&mut self, code: u16, payload: &[u8]) -> Result<Vec<u8>, Self::Error>;
}
