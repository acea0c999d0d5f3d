use core::{fmt::Write, str::FromStr};

use serde::de::Error as _;

use super::pathset::{Error, Path, PathSet, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VideoSystem {
    Auto,
    PAL,
    NTSC,
    HD,
    Other(u8),
}

impl Default for VideoSystem {
    fn default() -> Self {
        Self::Auto
    }
}

impl From<u8> for VideoSystem {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Auto,
            1 => Self::PAL,
            2 => Self::NTSC,
            3 => Self::HD,
            _ => Self::Other(value),
        }
    }
}

impl Into<u8> for VideoSystem {
    fn into(self) -> u8 {
        match self {
            Self::Auto => 0,
            Self::PAL => 1,
            Self::NTSC => 2,
            Self::HD => 3,
            Self::Other(value) => value,
        }
    }
}

impl FromStr for VideoSystem {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        match string {
            "AUTO" => Ok(Self::Auto),
            "PAL" => Ok(Self::PAL),
            "NTSC" => Ok(Self::NTSC),
            "HD" => Ok(Self::HD),
            _ => string.parse::<u8>().map(Self::from).map_err(|_| ()),
        }
    }
}

impl core::fmt::Display for VideoSystem {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Auto => f.write_str("AUTO"),
            Self::PAL => f.write_str("PAL"),
            Self::NTSC => f.write_str("NTSC"),
            Self::HD => f.write_str("HD"),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UnitMode {
    Imperial,
    Metric,
    British,
    Other(u8),
}

impl Default for UnitMode {
    fn default() -> Self {
        Self::Metric
    }
}

impl UnitMode {
    pub fn is_imperial(self) -> bool {
        self == Self::Imperial
    }
}

impl From<u8> for UnitMode {
    fn from(value: u8) -> Self {
        match value {
            0 => Self::Imperial,
            1 => Self::Metric,
            2 => Self::British,
            _ => Self::Other(value),
        }
    }
}

impl Into<u8> for UnitMode {
    fn into(self) -> u8 {
        match self {
            Self::Imperial => 0,
            Self::Metric => 1,
            Self::British => 2,
            Self::Other(value) => value,
        }
    }
}

impl FromStr for UnitMode {
    type Err = ();

    fn from_str(string: &str) -> Result<Self, ()> {
        match string {
            "IMPERIAL" => Ok(Self::Imperial),
            "METRIC" => Ok(Self::Metric),
            "BRITISH" => Ok(Self::British),
            _ => string.parse::<u8>().map(Self::from).map_err(|_| ()),
        }
    }
}

impl core::fmt::Display for UnitMode {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::Imperial => f.write_str("IMPERIAL"),
            Self::Metric => f.write_str("METRIC"),
            Self::British => f.write_str("BRITISH"),
            Self::Other(value) => write!(f, "{}", value),
        }
    }
}

macro_rules! string_serde {
    ($type:ty, $expecting:literal) => {
        impl serde::Serialize for $type {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                let mut string = heapless::String::<8>::new();
                write!(string, "{}", self).ok();
                serializer.serialize_str(string.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $type {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let string = <&str>::deserialize(deserializer)?;
                <$type>::from_str(string).map_err(|_| D::Error::custom($expecting))
            }
        }
    };
}

string_serde!(VideoSystem, "Malformed video system");
string_serde!(UnitMode, "Malformed unit mode");

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Alarms {
    pub rssi: u8,
    pub capacity: u16,
    /// Replaced by configurable timers, only meaningful before 1.36
    pub time: u16,
    pub altitude: u16,
    pub link_quality: u16,
    pub rssi_dbm: i16,
}

impl PathSet for Alarms {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "rssi" => self.rssi = value.parse_or_default()?,
            "capacity" => self.capacity = value.parse_or_default()?,
            "time" => self.time = value.parse_or_default()?,
            "altitude" => self.altitude = value.parse_or_default()?,
            "link-quality" => self.link_quality = value.parse_or_default()?,
            "rssi-dbm" => self.rssi_dbm = value.parse_or_default()?,
            _ => return Err(Error::UnknownPath),
        }
        path.end()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraFrame {
    pub width: u8,
    pub height: u8,
}

impl Default for CameraFrame {
    fn default() -> Self {
        Self { width: 24, height: 11 }
    }
}

impl PathSet for CameraFrame {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        let default = Self::default();
        let field = match path.str()? {
            "width" => (&mut self.width, default.width),
            "height" => (&mut self.height, default.height),
            _ => return Err(Error::UnknownPath),
        };
        *field.0 = if value.0.is_some() { value.parse()? } else { field.1 };
        path.end()
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Parameters {
    pub overlay_radio_mode: u8,
    pub camera_frame: CameraFrame,
}

impl PathSet for Parameters {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "overlay-radio-mode" => {
                self.overlay_radio_mode = value.parse_or_default()?;
                path.end()
            }
            "camera-frame" => self.camera_frame.set(path, value),
            _ => Err(Error::UnknownPath),
        }
    }
}

/// Global OSD settings carried by the settings payload
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    pub video_system: VideoSystem,
    pub unit_mode: UnitMode,
    pub alarms: Alarms,
    pub parameters: Parameters,
}

impl PathSet for Settings {
    fn set(&mut self, mut path: Path, value: Value) -> Result<(), Error> {
        match path.str()? {
            "video-system" => {
                self.video_system = value.parse_or_default()?;
                path.end()
            }
            "unit-mode" => {
                self.unit_mode = value.parse_or_default()?;
                path.end()
            }
            "alarms" => self.alarms.set(path, value),
            "parameters" => self.parameters.set(path, value),
            _ => Err(Error::UnknownPath),
        }
    }
}

mod test {
    #[test]
    fn test_video_system_conversion() {
        use std::str::FromStr;

        use super::VideoSystem;

        assert_eq!(VideoSystem::from(3), VideoSystem::HD);
        assert_eq!(VideoSystem::from(9), VideoSystem::Other(9));
        assert_eq!(Into::<u8>::into(VideoSystem::Other(9)), 9);
        assert_eq!(VideoSystem::from_str("NTSC"), Ok(VideoSystem::NTSC));
        assert_eq!(VideoSystem::from_str("2"), Ok(VideoSystem::NTSC));
        assert_eq!(VideoSystem::from_str("SECAM"), Err(()));
    }

    #[test]
    fn test_serialize_settings() {
        use serde_json::json;

        use super::Settings;

        let expected = json!({
            "video-system": "AUTO",
            "unit-mode": "METRIC",
            "alarms": {
                "rssi": 0,
                "capacity": 0,
                "time": 0,
                "altitude": 0,
                "link-quality": 0,
                "rssi-dbm": 0,
            },
            "parameters": {
                "overlay-radio-mode": 0,
                "camera-frame": {"width": 24, "height": 11},
            },
        });
        assert_eq!(expected, serde_json::to_value(&Settings::default()).unwrap());
    }

    #[test]
    fn test_deserialize_settings() {
        use super::{Settings, UnitMode, VideoSystem};

        let json = r#"{
            "video-system": "HD",
            "unit-mode": "IMPERIAL",
            "alarms": {
                "rssi": 20,
                "capacity": 2200,
                "time": 10,
                "altitude": 100,
                "link-quality": 80,
                "rssi-dbm": -60
            },
            "parameters": {
                "overlay-radio-mode": 1,
                "camera-frame": {"width": 20, "height": 10}
            }
        }"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.video_system, VideoSystem::HD);
        assert_eq!(settings.unit_mode, UnitMode::Imperial);
        assert_eq!(settings.alarms.rssi_dbm, -60);
        assert_eq!(settings.parameters.camera_frame.height, 10);
    }

    #[test]
    fn test_path_set() {
        use super::{Settings, VideoSystem};
        use crate::config::pathset::{Error, Path, PathSet, Value};

        let mut settings = Settings::default();
        settings.set(Path::from("alarms.rssi"), Value::of("20")).unwrap();
        assert_eq!(settings.alarms.rssi, 20);
        settings.set(Path::from("video-system"), Value::of("NTSC")).unwrap();
        assert_eq!(settings.video_system, VideoSystem::NTSC);
        settings.set(Path::from("parameters.camera-frame.width"), Value::of("30")).unwrap();
        assert_eq!(settings.parameters.camera_frame.width, 30);
        settings.set(Path::from("parameters.camera-frame.width"), Value(None)).unwrap();
        assert_eq!(settings.parameters.camera_frame.width, 24);

        let result = settings.set(Path::from("alarms.rssi"), Value::of("300"));
        assert_eq!(result, Err(Error::InvalidValue));
        let result = settings.set(Path::from("alarms.voltage"), Value::of("1"));
        assert_eq!(result, Err(Error::UnknownPath));
        let result = settings.set(Path::from("alarms.rssi.low"), Value::of("1"));
        assert_eq!(result, Err(Error::UnknownPath));
    }
}
