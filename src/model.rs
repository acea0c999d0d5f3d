use crate::config::Settings;
use crate::osd::{symbol::Symbols, FieldDefinition, Grid, Preview, PreviewContext, PreviewHints};
use crate::version::{ApiVersion, API_VERSION_1_34, API_VERSION_1_43};

pub const UNKNOWN: &str = "UNKNOWN";

/// Display field bound to a catalog entry, or synthesised for an index past the catalog
#[derive(Copy, Clone, Debug)]
pub enum FieldRef {
    Known(&'static FieldDefinition),
    /// 1-based among the overflowing indices
    Unknown { suffix: usize },
}

impl FieldRef {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Known(field) => field.name,
            Self::Unknown { .. } => UNKNOWN,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Self::Known(field) => field.text,
            Self::Unknown { .. } => "osdTextElementUnknown",
        }
    }

    pub fn desc(&self) -> &'static str {
        match self {
            Self::Known(field) => field.desc,
            Self::Unknown { .. } => "osdDescElementUnknown",
        }
    }

    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            Self::Known(field) => field.variants,
            Self::Unknown { .. } => &[],
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known(_))
    }
}

impl PartialEq for FieldRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Known(a), Self::Known(b)) => a.name == b.name,
            (Self::Unknown { suffix: a }, Self::Unknown { suffix: b }) => a == b,
            _ => false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayItem {
    pub index: usize,
    pub field: FieldRef,
    /// Negative counts back from the end of the grid
    pub position: i32,
    /// Coordinates as stored by the firmware, dropped once the item is moved
    pub origin: Option<(i32, i32)>,
    pub positionable: bool,
    pub visibility: Vec<bool>,
    pub variant: u8,
    pub draw_order: Option<u16>,
    pub preview: Preview,
}

impl DisplayItem {
    pub fn is_visible(&self, profile: usize) -> bool {
        self.visibility.get(profile).copied().unwrap_or(false)
    }
}

/// Statistic or warning toggle
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    pub index: usize,
    pub name: &'static str,
    pub text: &'static str,
    pub desc: &'static str,
    pub suffix: Option<usize>,
    pub enabled: bool,
}

pub type StatItem = Entry;
pub type WarningItem = Entry;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timer {
    pub index: usize,
    pub source: u8,
    pub precision: u8,
    pub alarm: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Profiles {
    pub count: usize,
    pub selected: usize,
}

impl Default for Profiles {
    fn default() -> Self {
        Self { count: 1, selected: 0 }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OsdState {
    pub osd_feature: bool,
    pub slave: bool,
    pub frsky: bool,
    pub max7456_configured: bool,
    pub font_device_detected: bool,
}

impl OsdState {
    pub fn new(flags: u8, version: ApiVersion) -> Self {
        let legacy = flags == 1 && version < API_VERSION_1_34;
        let max7456_configured = flags & 0x10 > 0 || legacy;
        let frsky = version >= API_VERSION_1_43 && flags & 0x08 > 0;
        let font_device_detected = flags & 0x20 > 0
            || ((max7456_configured || frsky) && version < API_VERSION_1_43);
        Self {
            osd_feature: flags & 0x01 > 0 || legacy,
            slave: flags & 0x02 > 0 && version >= API_VERSION_1_34,
            frsky,
            max7456_configured,
            font_device_detected,
        }
    }
}

/// Everything decoded from one OSD configuration record
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Model {
    pub version: ApiVersion,
    pub flags: u8,
    pub state: OsdState,
    pub settings: Settings,
    pub grid: Grid,
    pub items: Vec<DisplayItem>,
    pub stats: Vec<StatItem>,
    pub warnings: Vec<WarningItem>,
    pub timers: Vec<Timer>,
    pub profiles: Profiles,
}

impl Model {
    pub fn new(version: ApiVersion, flags: u8) -> Self {
        Self { version, flags, state: OsdState::new(flags, version), ..Default::default() }
    }

    pub fn has_osd(&self) -> bool {
        self.flags != 0
    }

    /// New visibility slots start hidden
    pub fn set_profile_count(&mut self, count: usize) {
        let count = count.max(1);
        for item in self.items.iter_mut() {
            item.visibility.resize(count, false);
        }
        self.profiles.count = count;
        self.profiles.selected = self.profiles.selected.min(count - 1);
    }

    pub fn item(&self, index: usize) -> Option<&DisplayItem> {
        self.items.iter().find(|item| item.index == index)
    }

    pub fn warning_flags(&self) -> u32 {
        let enabled = self.warnings.iter().filter(|warning| warning.enabled && warning.index < 32);
        enabled.fold(0, |flags, warning| flags | 1 << warning.index)
    }

    pub fn preview_context<'a>(&'a self, hints: &'a PreviewHints) -> PreviewContext<'a> {
        PreviewContext {
            version: self.version,
            symbols: Symbols::for_version(self.version),
            video_system: self.settings.video_system,
            grid: self.grid,
            unit_mode: self.settings.unit_mode,
            timers: &self.timers,
            camera_frame: self.settings.parameters.camera_frame,
            variant: 0,
            hints,
        }
    }
}

mod test {
    #[test]
    fn test_osd_state() {
        use super::OsdState;
        use crate::version::{API_VERSION_1_32, API_VERSION_1_42, API_VERSION_1_46};

        let state = OsdState::new(1, API_VERSION_1_32);
        assert!(state.osd_feature && state.max7456_configured && state.font_device_detected);
        assert!(!state.slave);

        let state = OsdState::new(0x0B, API_VERSION_1_42);
        assert!(state.osd_feature && state.slave);
        assert!(!state.frsky && !state.font_device_detected);

        let state = OsdState::new(0x19, API_VERSION_1_46);
        assert!(state.frsky && state.max7456_configured);
        assert!(!state.font_device_detected);
        assert!(OsdState::new(0x21, API_VERSION_1_46).font_device_detected);
    }

    #[test]
    fn test_set_profile_count() {
        use super::{DisplayItem, FieldRef, Model};
        use crate::osd::{fields::RSSI_VALUE, Preview};
        use crate::version::API_VERSION_1_46;

        let mut model = Model::new(API_VERSION_1_46, 0x21);
        model.items.push(DisplayItem {
            index: 0,
            field: FieldRef::Known(&RSSI_VALUE),
            position: 421,
            origin: None,
            positionable: true,
            visibility: vec![true],
            variant: 0,
            draw_order: Some(30),
            preview: Preview::default(),
        });
        model.set_profile_count(3);
        model.profiles.selected = 2;
        assert_eq!(model.items[0].visibility, vec![true, false, false]);
        assert!(!model.items[0].is_visible(2));

        model.set_profile_count(0);
        assert_eq!(model.profiles.count, 1);
        assert_eq!(model.profiles.selected, 0);
        assert_eq!(model.items[0].visibility, vec![true]);
        assert!(!model.items[0].is_visible(5));
    }

    #[test]
    fn test_warning_flags() {
        use super::{Entry, Model};

        let mut model = Model::default();
        for index in 0..4 {
            let enabled = index != 1;
            let name = "W";
            model.warnings.push(Entry { index, name, text: "", desc: "", suffix: None, enabled });
        }
        assert_eq!(model.warning_flags(), 0b1101);
    }
}
