use core::{fmt::Write, str::FromStr};

use serde::de::Error as _;

/// MSP API version reported by the flight controller
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ApiVersion {
    pub const fn new(major: u8, minor: u8, patch: u8) -> Self {
        Self { major, minor, patch }
    }

    /// Anything older than the first layout-capable release behaves as that release
    pub fn clamped(self) -> Self {
        if self < API_VERSION_1_21 {
            return API_VERSION_1_21;
        }
        self
    }
}

pub const API_VERSION_1_21: ApiVersion = ApiVersion::new(1, 21, 0);
pub const API_VERSION_1_31: ApiVersion = ApiVersion::new(1, 31, 0);
pub const API_VERSION_1_32: ApiVersion = ApiVersion::new(1, 32, 0);
pub const API_VERSION_1_34: ApiVersion = ApiVersion::new(1, 34, 0);
pub const API_VERSION_1_35: ApiVersion = ApiVersion::new(1, 35, 0);
pub const API_VERSION_1_36: ApiVersion = ApiVersion::new(1, 36, 0);
pub const API_VERSION_1_37: ApiVersion = ApiVersion::new(1, 37, 0);
pub const API_VERSION_1_39: ApiVersion = ApiVersion::new(1, 39, 0);
pub const API_VERSION_1_40: ApiVersion = ApiVersion::new(1, 40, 0);
pub const API_VERSION_1_41: ApiVersion = ApiVersion::new(1, 41, 0);
pub const API_VERSION_1_42: ApiVersion = ApiVersion::new(1, 42, 0);
pub const API_VERSION_1_43: ApiVersion = ApiVersion::new(1, 43, 0);
pub const API_VERSION_1_44: ApiVersion = ApiVersion::new(1, 44, 0);
pub const API_VERSION_1_45: ApiVersion = ApiVersion::new(1, 45, 0);
pub const API_VERSION_1_46: ApiVersion = ApiVersion::new(1, 46, 0);

impl FromStr for ApiVersion {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        let mut splitted = string.trim().split('.');
        let major = splitted.next().ok_or(())?.parse().map_err(|_| ())?;
        let minor = splitted.next().ok_or(())?.parse().map_err(|_| ())?;
        let patch = match splitted.next() {
            Some(patch) => patch.parse().map_err(|_| ())?,
            None => 0,
        };
        if splitted.next().is_some() {
            return Err(());
        }
        Ok(Self { major, minor, patch })
    }
}

impl core::fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl serde::Serialize for ApiVersion {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut string = heapless::String::<11>::new();
        write!(string, "{}", self).ok();
        serializer.serialize_str(string.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for ApiVersion {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = <&str>::deserialize(deserializer)?;
        Self::from_str(string).map_err(|_| D::Error::custom("Malformed API version"))
    }
}

mod test {
    #[test]
    fn test_parse_version() {
        use std::str::FromStr;

        use super::{ApiVersion, API_VERSION_1_46};

        assert_eq!(ApiVersion::from_str("1.46.0"), Ok(API_VERSION_1_46));
        assert_eq!(ApiVersion::from_str("1.46"), Ok(API_VERSION_1_46));
        assert_eq!(ApiVersion::from_str("1.46.0.1"), Err(()));
        assert_eq!(ApiVersion::from_str("1"), Err(()));
        assert_eq!(format!("{}", ApiVersion::new(1, 45, 2)), "1.45.2");
    }

    #[test]
    fn test_version_order() {
        use super::{ApiVersion, API_VERSION_1_21, API_VERSION_1_36, API_VERSION_1_42};

        assert!(API_VERSION_1_36 < API_VERSION_1_42);
        assert!(ApiVersion::new(1, 42, 1) > API_VERSION_1_42);
        assert_eq!(ApiVersion::new(1, 20, 0).clamped(), API_VERSION_1_21);
        assert_eq!(API_VERSION_1_42.clamped(), API_VERSION_1_42);
    }

    #[test]
    fn test_serde_version() {
        use serde_json::json;

        use super::ApiVersion;

        let version = ApiVersion::new(1, 44, 0);
        assert_eq!(json!("1.44.0"), serde_json::to_value(&version).unwrap());
        let version: ApiVersion = serde_json::from_str("\"1.43.0\"").unwrap();
        assert_eq!(version, ApiVersion::new(1, 43, 0));
    }
}
