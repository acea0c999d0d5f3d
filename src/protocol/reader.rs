use core::fmt;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    Truncated { offset: usize, needed: usize },
    InvalidProfiles { count: usize, selected: usize },
    InvalidCanvas { width: u8, height: u8 },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Truncated { offset, needed } => {
                write!(f, "Record truncated at {}, {} more bytes needed", offset, needed)
            }
            Self::InvalidProfiles { count, selected } => {
                write!(f, "Invalid profile {} of {}", selected, count)
            }
            Self::InvalidCanvas { width, height } => {
                write!(f, "Invalid canvas {}x{}", width, height)
            }
        }
    }
}

/// Little endian cursor over a response payload
pub struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        if self.remaining() < N {
            let needed = N - self.remaining();
            return Err(DecodeError::Truncated { offset: self.offset, needed });
        }
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(&self.bytes[self.offset..self.offset + N]);
        self.offset += N;
        Ok(bytes)
    }

    pub fn u8(&mut self) -> Result<u8, DecodeError> {
        Ok(self.take::<1>()?[0])
    }

    pub fn u16(&mut self) -> Result<u16, DecodeError> {
        Ok(u16::from_le_bytes(self.take()?))
    }

    pub fn i16(&mut self) -> Result<i16, DecodeError> {
        Ok(i16::from_le_bytes(self.take()?))
    }

    pub fn u32(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_le_bytes(self.take()?))
    }
}

mod test {
    #[test]
    fn test_reader() {
        use hex_literal::hex;

        use super::{DecodeError, Reader};

        let bytes = hex!("01 3402 feff 78563412 05");
        let mut reader = Reader::new(&bytes);
        assert_eq!(reader.u8(), Ok(1));
        assert_eq!(reader.u16(), Ok(0x0234));
        assert_eq!(reader.i16(), Ok(-2));
        assert_eq!(reader.u32(), Ok(0x12345678));
        assert_eq!(reader.u16(), Err(DecodeError::Truncated { offset: 9, needed: 1 }));
        assert_eq!(reader.u8(), Ok(5));
        assert_eq!(reader.remaining(), 0);
    }
}
