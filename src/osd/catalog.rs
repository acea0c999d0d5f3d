//! Per version lists of display fields, statistics and warnings, in wire index order

use super::field::{Definition, FieldDefinition, Named};
use super::{fields as f, stats as s, warnings as w};
use crate::version::*;

pub enum Rule<T: 'static> {
    Reset(&'static [&'static T]),
    Append(&'static [&'static T]),
    InsertAfter(&'static T, &'static [&'static T]),
    Replace(&'static T, &'static T),
    Remove(&'static T),
}

pub type Rules<T> = [(ApiVersion, Rule<T>)];

/// Folds every rule not newer than `version` over an empty list, rules must be sorted by version
pub fn build<T: Named + 'static>(version: ApiVersion, rules: &Rules<T>) -> Vec<&'static T> {
    let mut list: Vec<&'static T> = Vec::new();
    for (_, rule) in rules.iter().take_while(|(since, _)| *since <= version) {
        match rule {
            Rule::Reset(entries) => list = entries.to_vec(),
            Rule::Append(entries) => list.extend_from_slice(entries),
            Rule::InsertAfter(anchor, entries) => {
                let index = list.iter().position(|entry| entry.name() == anchor.name());
                let at = index.map(|index| index + 1).unwrap_or(list.len());
                list.splice(at..at, entries.iter().copied());
            }
            Rule::Replace(old, new) => {
                if let Some(entry) = list.iter_mut().find(|entry| entry.name() == old.name()) {
                    *entry = *new;
                }
            }
            Rule::Remove(old) => list.retain(|entry| entry.name() != old.name()),
        }
    }
    list
}

static DISPLAY_1_21: [&FieldDefinition; 16] = [
    &f::RSSI_VALUE,
    &f::MAIN_BATT_VOLTAGE,
    &f::CROSSHAIRS,
    &f::ARTIFICIAL_HORIZON,
    &f::HORIZON_SIDEBARS,
    &f::ONTIME,
    &f::FLYTIME,
    &f::FLYMODE,
    &f::CRAFT_NAME,
    &f::THROTTLE_POSITION,
    &f::VTX_CHANNEL,
    &f::CURRENT_DRAW,
    &f::MAH_DRAWN,
    &f::GPS_SPEED,
    &f::GPS_SATS,
    &f::ALTITUDE,
];
static DISPLAY_1_31: [&FieldDefinition; 4] = [&f::PID_ROLL, &f::PID_PITCH, &f::PID_YAW, &f::POWER];
static DISPLAY_1_32: [&FieldDefinition; 3] =
    [&f::PID_RATE_PROFILE, &f::BATTERY_WARNING, &f::AVG_CELL_VOLTAGE];
static DISPLAY_1_34: [&FieldDefinition; 3] = [&f::GPS_LON, &f::GPS_LAT, &f::DEBUG];
static DISPLAY_1_35: [&FieldDefinition; 2] = [&f::PITCH_ANGLE, &f::ROLL_ANGLE];
static DISPLAY_1_36: [&FieldDefinition; 9] = [
    &f::MAIN_BATT_USAGE,
    &f::DISARMED,
    &f::HOME_DIR,
    &f::HOME_DIST,
    &f::NUMERICAL_HEADING,
    &f::NUMERICAL_VARIO,
    &f::COMPASS_BAR,
    &f::ESC_TEMPERATURE,
    &f::ESC_RPM,
];
static DISPLAY_1_37: [&FieldDefinition; 4] = [
    &f::REMAINING_TIME_ESTIMATE,
    &f::RTC_DATE_TIME,
    &f::ADJUSTMENT_RANGE,
    &f::CORE_TEMPERATURE,
];
static DISPLAY_1_39: [&FieldDefinition; 1] = [&f::ANTI_GRAVITY];
static DISPLAY_1_40: [&FieldDefinition; 1] = [&f::G_FORCE];
static DISPLAY_1_41: [&FieldDefinition; 9] = [
    &f::MOTOR_DIAG,
    &f::LOG_STATUS,
    &f::FLIP_ARROW,
    &f::LINK_QUALITY,
    &f::FLIGHT_DIST,
    &f::STICK_OVERLAY_LEFT,
    &f::STICK_OVERLAY_RIGHT,
    &f::DISPLAY_NAME,
    &f::ESC_RPM_FREQ,
];
static DISPLAY_1_42: [&FieldDefinition; 4] = [
    &f::RATE_PROFILE_NAME,
    &f::PID_PROFILE_NAME,
    &f::OSD_PROFILE_NAME,
    &f::RSSI_DBM_VALUE,
];
static DISPLAY_1_43: [&FieldDefinition; 3] =
    [&f::RC_CHANNELS, &f::CAMERA_FRAME, &f::OSD_EFFICIENCY];
static DISPLAY_1_44: [&FieldDefinition; 1] = [&f::TOTAL_FLIGHTS];

pub static DISPLAY_RULES: &Rules<FieldDefinition> = &[
    (API_VERSION_1_21, Rule::Reset(&DISPLAY_1_21)),
    (API_VERSION_1_31, Rule::Append(&DISPLAY_1_31)),
    (API_VERSION_1_32, Rule::Append(&DISPLAY_1_32)),
    (API_VERSION_1_34, Rule::Append(&DISPLAY_1_34)),
    (API_VERSION_1_35, Rule::Append(&DISPLAY_1_35)),
    (API_VERSION_1_36, Rule::Replace(&f::ONTIME, &f::TIMER_1)),
    (API_VERSION_1_36, Rule::Replace(&f::FLYTIME, &f::TIMER_2)),
    (API_VERSION_1_36, Rule::Replace(&f::BATTERY_WARNING, &f::WARNINGS)),
    (API_VERSION_1_36, Rule::Append(&DISPLAY_1_36)),
    (API_VERSION_1_37, Rule::Append(&DISPLAY_1_37)),
    (API_VERSION_1_39, Rule::Append(&DISPLAY_1_39)),
    (API_VERSION_1_40, Rule::Append(&DISPLAY_1_40)),
    (API_VERSION_1_41, Rule::Append(&DISPLAY_1_41)),
    (API_VERSION_1_42, Rule::Append(&DISPLAY_1_42)),
    (API_VERSION_1_43, Rule::Append(&DISPLAY_1_43)),
    (API_VERSION_1_44, Rule::Append(&DISPLAY_1_44)),
];

static STATS_1_21: [&Definition; 12] = [
    &s::MAX_SPEED,
    &s::MIN_BATTERY,
    &s::MIN_RSSI,
    &s::MAX_CURRENT,
    &s::USED_MAH,
    &s::MAX_ALTITUDE,
    &s::BLACKBOX,
    &s::END_BATTERY,
    &s::TIMER_1,
    &s::TIMER_2,
    &s::MAX_DISTANCE,
    &s::BLACKBOX_LOG_NUMBER,
];
static STATS_1_37: [&Definition; 1] = [&s::RTC_DATE_TIME];
// on-screen order
static STATS_1_39: [&Definition; 14] = [
    &s::RTC_DATE_TIME,
    &s::TIMER_1,
    &s::TIMER_2,
    &s::MAX_SPEED,
    &s::MAX_DISTANCE,
    &s::MIN_BATTERY,
    &s::END_BATTERY,
    &s::BATTERY_VOLTAGE,
    &s::MIN_RSSI,
    &s::MAX_CURRENT,
    &s::USED_MAH,
    &s::MAX_ALTITUDE,
    &s::BLACKBOX,
    &s::BLACKBOX_LOG_NUMBER,
];
static STATS_1_41: [&Definition; 6] = [
    &s::MAX_G_FORCE,
    &s::MAX_ESC_TEMP,
    &s::MAX_ESC_RPM,
    &s::MIN_LINK_QUALITY,
    &s::FLIGHT_DISTANCE,
    &s::MAX_FFT,
];
static STATS_1_42: [&Definition; 4] =
    [&s::TOTAL_FLIGHTS, &s::TOTAL_FLIGHT_TIME, &s::TOTAL_FLIGHT_DIST, &s::MIN_RSSI_DBM];
static STATS_1_45_USED_WH: [&Definition; 1] = [&s::USED_WH];
static STATS_1_45: [&Definition; 1] = [&s::MIN_RSNR];
static STATS_1_46: [&Definition; 5] = [
    &s::BEST_3_CONSEC_LAPS,
    &s::BEST_LAP,
    &s::FULL_THROTTLE_TIME,
    &s::FULL_THROTTLE_COUNTER,
    &s::AVG_THROTTLE,
];

pub static STAT_RULES: &Rules<Definition> = &[
    (API_VERSION_1_21, Rule::Reset(&STATS_1_21)),
    (API_VERSION_1_37, Rule::Append(&STATS_1_37)),
    (API_VERSION_1_39, Rule::Reset(&STATS_1_39)),
    (API_VERSION_1_41, Rule::Append(&STATS_1_41)),
    (API_VERSION_1_42, Rule::Append(&STATS_1_42)),
    (API_VERSION_1_45, Rule::InsertAfter(&s::USED_MAH, &STATS_1_45_USED_WH)),
    (API_VERSION_1_45, Rule::Append(&STATS_1_45)),
    (API_VERSION_1_46, Rule::Append(&STATS_1_46)),
];

static WARNINGS_1_21: [&Definition; 6] = [
    &w::ARMING_DISABLED,
    &w::BATTERY_NOT_FULL,
    &w::BATTERY_WARNING,
    &w::BATTERY_CRITICAL,
    &w::VISUAL_BEEPER,
    &w::CRASH_FLIP_MODE,
];
static WARNINGS_1_39: [&Definition; 3] =
    [&w::ESC_FAIL, &w::CORE_TEMPERATURE, &w::RC_SMOOTHING_FAILURE];
static WARNINGS_1_41: [&Definition; 4] = [
    &w::FAILSAFE,
    &w::LAUNCH_CONTROL,
    &w::GPS_RESCUE_UNAVAILABLE,
    &w::GPS_RESCUE_DISABLED,
];
static WARNINGS_1_42: [&Definition; 3] = [&w::RSSI, &w::LINK_QUALITY, &w::RSSI_DBM];
static WARNINGS_1_43: [&Definition; 1] = [&w::OVER_CAP];
static WARNINGS_1_45: [&Definition; 1] = [&w::RSNR];
static WARNINGS_1_46: [&Definition; 1] = [&w::LOAD];

pub static WARNING_RULES: &Rules<Definition> = &[
    (API_VERSION_1_21, Rule::Reset(&WARNINGS_1_21)),
    (API_VERSION_1_39, Rule::Append(&WARNINGS_1_39)),
    (API_VERSION_1_41, Rule::Append(&WARNINGS_1_41)),
    (API_VERSION_1_42, Rule::Append(&WARNINGS_1_42)),
    (API_VERSION_1_43, Rule::Append(&WARNINGS_1_43)),
    (API_VERSION_1_45, Rule::Append(&WARNINGS_1_45)),
    (API_VERSION_1_46, Rule::Append(&WARNINGS_1_46)),
];

pub const TIMER_PRECISIONS: &[&str] = &["SECOND", "HUNDREDTH", "TENTH"];
pub const UNIT_MODES: &[&str] = &["IMPERIAL", "METRIC", "BRITISH"];

#[derive(Debug)]
pub struct Catalog {
    pub version: ApiVersion,
    pub display: Vec<&'static FieldDefinition>,
    pub stats: Vec<&'static Definition>,
    pub warnings: Vec<&'static Definition>,
    pub timer_sources: Vec<&'static str>,
    pub timer_precisions: &'static [&'static str],
    pub unit_modes: &'static [&'static str],
    pub video_systems: Vec<&'static str>,
}

impl Catalog {
    pub fn for_version(version: ApiVersion) -> Self {
        let version = version.clamped();
        let mut timer_sources = vec!["ON_TIME", "TOTAL_ARMED_TIME", "LAST_ARMED_TIME"];
        if version >= API_VERSION_1_42 {
            timer_sources.push("ON_ARM_TIME");
        }
        let mut video_systems = vec!["AUTO", "PAL", "NTSC"];
        if version >= API_VERSION_1_45 {
            video_systems.push("HD");
        }
        Self {
            version,
            display: build(version, DISPLAY_RULES),
            stats: build(version, STAT_RULES),
            warnings: build(version, WARNING_RULES),
            timer_sources,
            timer_precisions: TIMER_PRECISIONS,
            unit_modes: UNIT_MODES,
            video_systems,
        }
    }
}

mod test {
    #[test]
    fn test_catalog_sizes() {
        use super::Catalog;
        use crate::version::*;

        let sizes: Vec<_> = [
            API_VERSION_1_21,
            API_VERSION_1_36,
            API_VERSION_1_39,
            API_VERSION_1_42,
            API_VERSION_1_45,
            API_VERSION_1_46,
        ]
        .iter()
        .map(|&version| Catalog::for_version(version))
        .map(|c| (c.display.len(), c.stats.len(), c.warnings.len()))
        .collect();
        let expected =
            vec![(16, 12, 6), (37, 12, 6), (42, 14, 9), (56, 24, 16), (60, 26, 18), (60, 31, 19)];
        assert_eq!(sizes, expected);

        let ancient = Catalog::for_version(ApiVersion::new(1, 10, 0));
        assert_eq!(ancient.version, API_VERSION_1_21);
        assert_eq!(ancient.display.len(), 16);
        let future = Catalog::for_version(ApiVersion::new(1, 47, 0));
        assert_eq!(future.display.len(), 60);
        assert_eq!(future.video_systems, vec!["AUTO", "PAL", "NTSC", "HD"]);
    }

    #[test]
    fn test_catalog_rules() {
        use super::Catalog;
        use crate::version::{API_VERSION_1_35, API_VERSION_1_36, API_VERSION_1_45};

        let names = |catalog: &Catalog| -> Vec<&'static str> {
            catalog.display.iter().map(|field| field.name).collect()
        };
        let before = Catalog::for_version(API_VERSION_1_35);
        let after = Catalog::for_version(API_VERSION_1_36);
        assert_eq!(&names(&before)[5..7], &["ONTIME", "FLYTIME"]);
        assert_eq!(&names(&after)[5..7], &["TIMER_1", "TIMER_2"]);
        assert_eq!(names(&before)[21], "BATTERY_WARNING");
        assert_eq!(names(&after)[21], "WARNINGS");
        assert_eq!(&names(&before)[22..], &names(&after)[22..28]);

        let stats: Vec<_> =
            Catalog::for_version(API_VERSION_1_45).stats.iter().map(|stat| stat.name).collect();
        assert_eq!(&stats[10..12], &["USED_MAH", "USED_WH"]);
        assert_eq!(stats.last(), Some(&"MIN_RSNR"));
        assert_eq!(Catalog::for_version(API_VERSION_1_45).stats[11].text, "osdTextStatUsedWh");
    }

    #[test]
    fn test_catalog_prefix_compatible() {
        use super::Catalog;
        use crate::version::{API_VERSION_1_39, API_VERSION_1_41, API_VERSION_1_46};

        let old = Catalog::for_version(API_VERSION_1_39);
        let new = Catalog::for_version(API_VERSION_1_46);
        let prefix = &new.display[..old.display.len()];
        assert!(old.display.iter().zip(prefix).all(|(a, b)| a.name == b.name));
        let old = Catalog::for_version(API_VERSION_1_41);
        assert!(old.warnings.iter().zip(&new.warnings).all(|(a, b)| a.name == b.name));
        assert_eq!(new.warnings[18].name, "LOAD");
        assert_eq!(new.timer_sources.len(), 4);
    }
}
