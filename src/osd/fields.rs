//! Every display element any firmware has reported, never remove entries

use core::fmt::Write;

use super::field::{FieldDefinition, Preview, PreviewContext, PreviewTemplate, Sprite};
use super::symbol::{self as sym, STICK_OVERLAY_SPRITE_MID as STICK};
use crate::config::{UnitMode, VideoSystem};
use crate::version::{API_VERSION_1_36, API_VERSION_1_39, API_VERSION_1_44};

use PreviewTemplate::{Computed, Rows, Sprites, Text};

const HUD_SIDEBAR_WIDTH: i8 = 7;
const HUD_SIDEBAR_HEIGHT: i8 = 3;

fn text(parts: &[&[u8]]) -> Preview {
    Preview::Text(parts.concat())
}

fn optional(symbol: Option<u8>) -> Vec<u8> {
    symbol.into_iter().collect()
}

fn distance_unit(context: &PreviewContext) -> u8 {
    if context.unit_mode.is_imperial() {
        sym::FEET
    } else {
        sym::METRE
    }
}

/// Centre of the screen shifts one line down on anything but NTSC
fn centre_offset(context: &PreviewContext) -> i32 {
    match context.video_system {
        VideoSystem::NTSC => 0,
        _ => context.grid.width,
    }
}

fn positionable_since_1_39(context: &PreviewContext) -> bool {
    context.version >= API_VERSION_1_39
}

fn gps_lon(_: &PreviewContext) -> Preview {
    text(&[&[sym::GPS_LON], b"-000.0000000"])
}

fn gps_lat(_: &PreviewContext) -> Preview {
    text(&[&[sym::GPS_LAT], b"-00.0000000 "])
}

fn crosshairs(context: &PreviewContext) -> Preview {
    let symbols = &context.symbols;
    Preview::Text(vec![symbols.ah_center_line, symbols.ah_center, symbols.ah_center_line_right])
}

fn artificial_horizon(_: &PreviewContext) -> Preview {
    let mut sprites = Vec::with_capacity(7 * 9);
    for y in 1..8 {
        for x in -4..=4 {
            let symbol = if y != 4 { sym::BLANK } else { sym::AH_BAR9_0 + 4 };
            sprites.push(Sprite::new(x, y, symbol));
        }
    }
    Preview::Sprites(sprites)
}

fn horizon_sidebars(_: &PreviewContext) -> Preview {
    let mut sprites = Vec::new();
    for y in -HUD_SIDEBAR_HEIGHT..=HUD_SIDEBAR_HEIGHT {
        sprites.push(Sprite::new(-HUD_SIDEBAR_WIDTH, y, sym::AH_DECORATION));
        sprites.push(Sprite::new(HUD_SIDEBAR_WIDTH, y, sym::AH_DECORATION));
    }
    sprites.push(Sprite::new(-HUD_SIDEBAR_WIDTH + 1, 0, sym::AH_LEFT));
    sprites.push(Sprite::new(HUD_SIDEBAR_WIDTH - 1, 0, sym::AH_RIGHT));
    Preview::Sprites(sprites)
}

fn current_draw(context: &PreviewContext) -> Preview {
    match context.version >= API_VERSION_1_36 {
        true => text(&[b" 42.00", &[sym::AMP]]),
        false => text(&[&[sym::AMP], b"42.0"]),
    }
}

fn mah_drawn(context: &PreviewContext) -> Preview {
    match context.version >= API_VERSION_1_36 {
        true => text(&[b" 690", &[sym::MAH]]),
        false => text(&[&[sym::MAH], b"690"]),
    }
}

fn power(context: &PreviewContext) -> Preview {
    match context.version >= API_VERSION_1_36 {
        true => text(&[b" 142W"]),
        false => text(&[b"142W"]),
    }
}

fn name_or(name: &str, placeholder: &str) -> Preview {
    let name = if name.is_empty() { placeholder } else { name };
    Preview::Text(name.bytes().map(|b| b.to_ascii_uppercase()).collect())
}

fn craft_name(context: &PreviewContext) -> Preview {
    name_or(&context.hints.craft_name, "CRAFT_NAME")
}

fn display_name(context: &PreviewContext) -> Preview {
    name_or(&context.hints.display_name, "DISPLAY_NAME")
}

fn altitude(context: &PreviewContext) -> Preview {
    let value: &[u8] = if context.variant == 1 { b"399" } else { b"399.7" };
    text(&[&[sym::ALTITUDE], value, &[distance_unit(context)]])
}

fn gps_speed(context: &PreviewContext) -> Preview {
    let unit = if context.unit_mode == UnitMode::Metric { sym::KPH } else { sym::MPH };
    text(&[&optional(context.symbols.speed), b"40", &[unit]])
}

fn home_distance(context: &PreviewContext) -> Preview {
    text(&[&[sym::HOMEFLAG], b"432", &[distance_unit(context)]])
}

fn flight_distance(context: &PreviewContext) -> Preview {
    text(&[&[sym::TOTAL_DIST], b"653", &[distance_unit(context)]])
}

fn numerical_vario(context: &PreviewContext) -> Preview {
    let unit = if context.unit_mode.is_imperial() { sym::FTPS } else { sym::MPS };
    text(&[&[sym::ARROW_SMALL_UP], b"8.7", &[unit]])
}

fn efficiency(context: &PreviewContext) -> Preview {
    let unit = if context.unit_mode.is_imperial() { sym::MILES } else { sym::KM };
    text(&[b"1234", &[sym::MAH], b"/", &[unit]])
}

fn link_quality(context: &PreviewContext) -> Preview {
    let value: &[u8] = if context.hints.crsf_receiver { b"2:100" } else { b"8" };
    text(&[&optional(context.symbols.link_quality), value])
}

fn pids(context: &PreviewContext, label: &str, axis: usize) -> Preview {
    let [p, i, d, f] = context.hints.pid_defaults[axis];
    let mut string = heapless::String::<32>::new();
    write!(string, "{} {:>3} {:>3} {:>3}", label, p, i, d).ok();
    if context.version >= API_VERSION_1_44 {
        write!(string, " {:>3}", f).ok();
    }
    Preview::Text(string.as_bytes().to_vec())
}

fn pid_roll(context: &PreviewContext) -> Preview {
    pids(context, "ROL", 0)
}

fn pid_pitch(context: &PreviewContext) -> Preview {
    pids(context, "PIT", 1)
}

fn pid_yaw(context: &PreviewContext) -> Preview {
    pids(context, "YAW", 2)
}

fn temperature(context: &PreviewContext, prefix: u8, celsius: i32) -> Preview {
    let mut string = heapless::String::<8>::new();
    let unit = match context.unit_mode {
        UnitMode::Imperial => {
            write!(string, "{}", celsius * 9 / 5 + 32).ok();
            Some(sym::TEMP_F)
        }
        UnitMode::Metric | UnitMode::British => {
            write!(string, "{}", celsius).ok();
            Some(sym::TEMP_C)
        }
        UnitMode::Other(_) => None,
    };
    text(&[&[prefix, sym::TEMPERATURE], string.as_bytes(), &optional(unit)])
}

fn esc_temperature(context: &PreviewContext) -> Preview {
    temperature(context, b'E', 45)
}

fn core_temperature(context: &PreviewContext) -> Preview {
    temperature(context, b'C', 33)
}

fn timer(context: &PreviewContext, index: usize) -> Preview {
    let timer = match context.timers.get(index) {
        Some(timer) => timer,
        None => return Preview::default(),
    };
    let symbol: &[u8] = match timer.source {
        0 | 3 => &[sym::ON_M],
        1 | 2 => &[sym::FLY_M],
        _ => &[],
    };
    let value: &[u8] = match timer.precision {
        0 => b"00:00",
        1 => b"00:00.00",
        2 => b"00:00.0",
        _ => b"",
    };
    text(&[symbol, value])
}

fn timer_1(context: &PreviewContext) -> Preview {
    timer(context, 0)
}

fn timer_2(context: &PreviewContext) -> Preview {
    timer(context, 1)
}

fn camera_frame(context: &PreviewContext) -> Preview {
    let width = (context.camera_frame.width as i32).min(context.grid.width) as i8;
    let height = (context.camera_frame.height as i32).min(context.grid.height) as i8;
    let mut sprites = Vec::new();
    if width == 0 || height == 0 {
        return Preview::Sprites(sprites);
    }
    for x in 0..width {
        let corner = x == 0 || x == width - 1;
        let symbol = if corner { sym::STICK_OVERLAY_CENTER } else { sym::STICK_OVERLAY_HORIZONTAL };
        sprites.push(Sprite::new(x, 0, symbol));
        sprites.push(Sprite::new(x, height - 1, symbol));
    }
    for y in 1..height - 1 {
        sprites.push(Sprite::new(0, y, sym::STICK_OVERLAY_VERTICAL));
        sprites.push(Sprite::new(width - 1, y, sym::STICK_OVERLAY_VERTICAL));
    }
    Preview::Sprites(sprites)
}

const H: u8 = sym::STICK_OVERLAY_HORIZONTAL;
const V: u8 = sym::STICK_OVERLAY_VERTICAL;

/// 7 x 5 overlay centred on the anchor, stick drawn up and to the right
static STICK_OVERLAY: [Sprite; 12] = [
    Sprite::new(-3, 0, H),
    Sprite::new(-2, 0, H),
    Sprite::new(-1, 0, H),
    Sprite::new(0, -2, V),
    Sprite::new(0, -1, V),
    Sprite::new(0, 0, sym::STICK_OVERLAY_CENTER),
    Sprite::new(0, 1, V),
    Sprite::new(0, 2, V),
    Sprite::new(1, 0, H),
    Sprite::new(2, -1, STICK),
    Sprite::new(2, 0, H),
    Sprite::new(3, 0, H),
];

static ESC_RPM_ROWS: [&[u8]; 4] = [b"22600", b"22600", b"22600", b"22600"];

pub static MAIN_BATT_VOLTAGE: FieldDefinition = FieldDefinition::new(
    "MAIN_BATT_VOLTAGE",
    "osdTextElementMainBattVoltage",
    "osdDescElementMainBattVoltage",
    Text(&[sym::BATTERY, b'1', b'6', b'.', b'8', sym::VOLT]),
)
.at(-29)
.order(20);

pub static RSSI_VALUE: FieldDefinition = FieldDefinition::new(
    "RSSI_VALUE",
    "osdTextElementRssiValue",
    "osdDescElementRssiValue",
    Text(&[sym::RSSI, b'9', b'9']),
)
.at(-59)
.order(30);

pub static THROTTLE_POSITION: FieldDefinition = FieldDefinition::new(
    "THROTTLE_POSITION",
    "osdTextElementThrottlePosition",
    "osdDescElementThrottlePosition",
    Text(&[sym::THR, b' ', b'6', b'9']),
)
.at(-9)
.order(110);

pub static VTX_CHANNEL: FieldDefinition = FieldDefinition::new(
    "VTX_CHANNEL",
    "osdTextElementVtxChannel",
    "osdDescElementVtxChannel",
    Text(b"R:2:200:P"),
)
.at(1)
.order(120);

pub static DISARMED: FieldDefinition = FieldDefinition::new(
    "DISARMED",
    "osdTextElementDisarmed",
    "osdDescElementDisarmed",
    Text(b"DISARMED"),
)
.at(-109)
.order(280);

pub static CROSSHAIRS: FieldDefinition = FieldDefinition::new(
    "CROSSHAIRS",
    "osdTextElementCrosshairs",
    "osdDescElementCrosshairs",
    Computed(crosshairs),
)
.at_computed(|context| 193 + centre_offset(context))
.order(40)
.positionable_when(positionable_since_1_39);

pub static ARTIFICIAL_HORIZON: FieldDefinition = FieldDefinition::new(
    "ARTIFICIAL_HORIZON",
    "osdTextElementArtificialHorizon",
    "osdDescElementArtificialHorizon",
    Computed(artificial_horizon),
)
.at_computed(|context| 74 + centre_offset(context))
.order(10)
.positionable_when(positionable_since_1_39);

pub static HORIZON_SIDEBARS: FieldDefinition = FieldDefinition::new(
    "HORIZON_SIDEBARS",
    "osdTextElementHorizonSidebars",
    "osdDescElementHorizonSidebars",
    Computed(horizon_sidebars),
)
.at_computed(|context| 194 + centre_offset(context))
.order(50)
.positionable_when(positionable_since_1_39);

pub static CURRENT_DRAW: FieldDefinition = FieldDefinition::new(
    "CURRENT_DRAW",
    "osdTextElementCurrentDraw",
    "osdDescElementCurrentDraw",
    Computed(current_draw),
)
.at(-23)
.order(130);

pub static MAH_DRAWN: FieldDefinition = FieldDefinition::new(
    "MAH_DRAWN",
    "osdTextElementMahDrawn",
    "osdDescElementMahDrawn",
    Computed(mah_drawn),
)
.at(-18)
.order(140);

pub static CRAFT_NAME: FieldDefinition = FieldDefinition::new(
    "CRAFT_NAME",
    "osdTextElementCraftName",
    "osdDescElementCraftName",
    Computed(craft_name),
)
.at(-77)
.order(150);

pub static ALTITUDE: FieldDefinition = FieldDefinition::new(
    "ALTITUDE",
    "osdTextElementAltitude",
    "osdDescElementAltitude",
    Computed(altitude),
)
.at(62)
.order(160)
.variants(&["osdTextElementAltitudeVariant1Decimal", "osdTextElementAltitudeVariantNoDecimal"]);

pub static ONTIME: FieldDefinition = FieldDefinition::new(
    "ONTIME",
    "osdTextElementOnTime",
    "osdDescElementOnTime",
    Text(&[sym::ON_M, b'0', b'5', b':', b'4', b'2']),
);

pub static FLYTIME: FieldDefinition = FieldDefinition::new(
    "FLYTIME",
    "osdTextElementFlyTime",
    "osdDescElementFlyTime",
    Text(&[sym::FLY_M, b'0', b'4', b':', b'1', b'1']),
);

pub static FLYMODE: FieldDefinition =
    FieldDefinition::new("FLYMODE", "osdTextElementFlyMode", "osdDescElementFlyMode", Text(b"ANGL"))
        .order(90);

pub static GPS_SPEED: FieldDefinition = FieldDefinition::new(
    "GPS_SPEED",
    "osdTextElementGPSSpeed",
    "osdDescElementGPSSpeed",
    Computed(gps_speed),
)
.order(810);

pub static GPS_SATS: FieldDefinition = FieldDefinition::new(
    "GPS_SATS",
    "osdTextElementGPSSats",
    "osdDescElementGPSSats",
    Text(&[sym::GPS_SAT_L, sym::GPS_SAT_R, b'1', b'4']),
)
.order(800);

const GPS_VARIANTS: &[&str] = &[
    "osdTextElementGPSVariant7Decimals",
    "osdTextElementGPSVariant4Decimals",
    "osdTextElementGPSVariantDegMinSec",
    "osdTextElementGPSVariantOpenLocationCode",
];

pub static GPS_LON: FieldDefinition = FieldDefinition::new(
    "GPS_LON",
    "osdTextElementGPSLon",
    "osdDescElementGPSLon",
    Computed(gps_lon),
)
.order(830)
.variants(GPS_VARIANTS);

pub static GPS_LAT: FieldDefinition = FieldDefinition::new(
    "GPS_LAT",
    "osdTextElementGPSLat",
    "osdDescElementGPSLat",
    Computed(gps_lat),
)
.order(820)
.variants(GPS_VARIANTS);

pub static DEBUG: FieldDefinition = FieldDefinition::new(
    "DEBUG",
    "osdTextElementDebug",
    "osdDescElementDebug",
    Text(b"DBG     0     0     0     0"),
)
.order(240);

pub static PID_ROLL: FieldDefinition = FieldDefinition::new(
    "PID_ROLL",
    "osdTextElementPIDRoll",
    "osdDescElementPIDRoll",
    Computed(pid_roll),
)
.at(10 * 30 + 2)
.order(170);

pub static PID_PITCH: FieldDefinition = FieldDefinition::new(
    "PID_PITCH",
    "osdTextElementPIDPitch",
    "osdDescElementPIDPitch",
    Computed(pid_pitch),
)
.at(11 * 30 + 2)
.order(180);

pub static PID_YAW: FieldDefinition = FieldDefinition::new(
    "PID_YAW",
    "osdTextElementPIDYaw",
    "osdDescElementPIDYaw",
    Computed(pid_yaw),
)
.at(12 * 30 + 2)
.order(190);

pub static POWER: FieldDefinition =
    FieldDefinition::new("POWER", "osdTextElementPower", "osdDescElementPower", Computed(power))
        .at(15 * 30 + 2)
        .order(200);

pub static PID_RATE_PROFILE: FieldDefinition = FieldDefinition::new(
    "PID_RATE_PROFILE",
    "osdTextElementPIDRateProfile",
    "osdDescElementPIDRateProfile",
    Text(b"1-2"),
)
.at(13 * 30 + 2)
.order(210);

pub static BATTERY_WARNING: FieldDefinition = FieldDefinition::new(
    "BATTERY_WARNING",
    "osdTextElementBatteryWarning",
    "osdDescElementBatteryWarning",
    Text(b"LOW VOLTAGE"),
);

pub static AVG_CELL_VOLTAGE: FieldDefinition = FieldDefinition::new(
    "AVG_CELL_VOLTAGE",
    "osdTextElementAvgCellVoltage",
    "osdDescElementAvgCellVoltage",
    Text(&[sym::BATTERY, b'3', b'.', b'9', b'8', sym::VOLT]),
)
.at(12 * 30)
.order(230);

pub static PITCH_ANGLE: FieldDefinition = FieldDefinition::new(
    "PITCH_ANGLE",
    "osdTextElementPitchAngle",
    "osdDescElementPitchAngle",
    Text(&[sym::PITCH, b'-', b'0', b'0', b'.', b'0']),
)
.order(250);

pub static ROLL_ANGLE: FieldDefinition = FieldDefinition::new(
    "ROLL_ANGLE",
    "osdTextElementRollAngle",
    "osdDescElementRollAngle",
    Text(&[sym::ROLL, b'-', b'0', b'0', b'.', b'0']),
)
.order(260);

pub static MAIN_BATT_USAGE: FieldDefinition = FieldDefinition::new(
    "MAIN_BATT_USAGE",
    "osdTextElementMainBattUsage",
    "osdDescElementMainBattUsage",
    Text(&[
        sym::PB_START,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_FULL,
        sym::PB_END,
        sym::PB_EMPTY,
        sym::PB_CLOSE,
    ]),
)
.at(-17)
.order(270);

pub static HOME_DIR: FieldDefinition = FieldDefinition::new(
    "HOME_DIRECTION",
    "osdTextElementHomeDirection",
    "osdDescElementHomeDirection",
    Text(&[sym::ARROW_SOUTH + 2]),
)
.order(850);

pub static HOME_DIST: FieldDefinition = FieldDefinition::new(
    "HOME_DISTANCE",
    "osdTextElementHomeDistance",
    "osdDescElementHomeDistance",
    Computed(home_distance),
)
.order(840);

pub static NUMERICAL_HEADING: FieldDefinition = FieldDefinition::new(
    "NUMERICAL_HEADING",
    "osdTextElementNumericalHeading",
    "osdDescElementNumericalHeading",
    Text(&[sym::ARROW_EAST, b'9', b'0']),
)
.order(290);

pub static NUMERICAL_VARIO: FieldDefinition = FieldDefinition::new(
    "NUMERICAL_VARIO",
    "osdTextElementNumericalVario",
    "osdDescElementNumericalVario",
    Computed(numerical_vario),
)
.order(300);

pub static COMPASS_BAR: FieldDefinition = FieldDefinition::new(
    "COMPASS_BAR",
    "osdTextElementCompassBar",
    "osdDescElementCompassBar",
    Text(&[
        sym::HEADING_W,
        sym::HEADING_LINE,
        sym::HEADING_DIVIDED_LINE,
        sym::HEADING_LINE,
        sym::HEADING_N,
        sym::HEADING_LINE,
        sym::HEADING_DIVIDED_LINE,
        sym::HEADING_LINE,
        sym::HEADING_E,
    ]),
)
.order(310);

pub static WARNINGS: FieldDefinition = FieldDefinition::new(
    "WARNINGS",
    "osdTextElementWarnings",
    "osdDescElementWarnings",
    Text(b"LOW VOLTAGE"),
)
.order(220);

pub static ESC_TEMPERATURE: FieldDefinition = FieldDefinition::new(
    "ESC_TEMPERATURE",
    "osdTextElementEscTemperature",
    "osdDescElementEscTemperature",
    Computed(esc_temperature),
)
.order(900);

pub static ESC_RPM: FieldDefinition = FieldDefinition::new(
    "ESC_RPM",
    "osdTextElementEscRpm",
    "osdDescElementEscRpm",
    Rows(&ESC_RPM_ROWS),
)
.order(1000);

pub static REMAINING_TIME_ESTIMATE: FieldDefinition = FieldDefinition::new(
    "REMAINING_TIME_ESTIMATE",
    "osdTextElementRemaningTimeEstimate",
    "osdDescElementRemaningTimeEstimate",
    Text(b"01:13"),
)
.order(80);

pub static RTC_DATE_TIME: FieldDefinition = FieldDefinition::new(
    "RTC_DATE_TIME",
    "osdTextElementRtcDateTime",
    "osdDescElementRtcDateTime",
    Text(b"2017-11-11 16:20:00"),
)
.order(360);

pub static ADJUSTMENT_RANGE: FieldDefinition = FieldDefinition::new(
    "ADJUSTMENT_RANGE",
    "osdTextElementAdjustmentRange",
    "osdDescElementAdjustmentRange",
    Text(b"PITCH/ROLL P: 42"),
)
.order(370);

pub static TIMER_1: FieldDefinition = FieldDefinition::new(
    "TIMER_1",
    "osdTextElementTimer1",
    "osdDescElementTimer1",
    Computed(timer_1),
)
.order(60);

pub static TIMER_2: FieldDefinition = FieldDefinition::new(
    "TIMER_2",
    "osdTextElementTimer2",
    "osdDescElementTimer2",
    Computed(timer_2),
)
.order(70);

pub static CORE_TEMPERATURE: FieldDefinition = FieldDefinition::new(
    "CORE_TEMPERATURE",
    "osdTextElementCoreTemperature",
    "osdDescElementCoreTemperature",
    Computed(core_temperature),
)
.order(380);

pub static ANTI_GRAVITY: FieldDefinition =
    FieldDefinition::new("ANTI_GRAVITY", "osdTextAntiGravity", "osdDescAntiGravity", Text(b"AG"))
        .order(320);

pub static G_FORCE: FieldDefinition =
    FieldDefinition::new("G_FORCE", "osdTextGForce", "osdDescGForce", Text(b"1.0G")).order(15);

pub static MOTOR_DIAG: FieldDefinition = FieldDefinition::new(
    "MOTOR_DIAGNOSTICS",
    "osdTextElementMotorDiag",
    "osdDescElementMotorDiag",
    Text(b"\x84\x85\x84\x83"),
)
.order(335);

pub static LOG_STATUS: FieldDefinition = FieldDefinition::new(
    "LOG_STATUS",
    "osdTextElementLogStatus",
    "osdDescElementLogStatus",
    Text(&[sym::BBLOG, b'1', b'6']),
)
.order(330);

pub static FLIP_ARROW: FieldDefinition = FieldDefinition::new(
    "FLIP_ARROW",
    "osdTextElementFlipArrow",
    "osdDescElementFlipArrow",
    Text(&[sym::ARROW_EAST]),
)
.order(340);

pub static LINK_QUALITY: FieldDefinition = FieldDefinition::new(
    "LINK_QUALITY",
    "osdTextElementLinkQuality",
    "osdDescElementLinkQuality",
    Computed(link_quality),
)
.order(390);

pub static FLIGHT_DIST: FieldDefinition = FieldDefinition::new(
    "FLIGHT_DISTANCE",
    "osdTextElementFlightDist",
    "osdDescElementFlightDist",
    Computed(flight_distance),
)
.order(860);

pub static STICK_OVERLAY_LEFT: FieldDefinition = FieldDefinition::new(
    "STICK_OVERLAY_LEFT",
    "osdTextElementStickOverlayLeft",
    "osdDescElementStickOverlayLeft",
    Sprites(&STICK_OVERLAY),
)
.order(400);

pub static STICK_OVERLAY_RIGHT: FieldDefinition = FieldDefinition::new(
    "STICK_OVERLAY_RIGHT",
    "osdTextElementStickOverlayRight",
    "osdDescElementStickOverlayRight",
    Sprites(&STICK_OVERLAY),
)
.order(410);

pub static DISPLAY_NAME: FieldDefinition = FieldDefinition::new(
    "DISPLAY_NAME",
    "osdTextElementDisplayName",
    "osdDescElementDisplayName",
    Computed(display_name),
)
.at(-77)
.order(350);

pub static ESC_RPM_FREQ: FieldDefinition = FieldDefinition::new(
    "ESC_RPM_FREQ",
    "osdTextElementEscRpmFreq",
    "osdDescElementEscRpmFreq",
    Rows(&ESC_RPM_ROWS),
)
.order(1010);

pub static RATE_PROFILE_NAME: FieldDefinition = FieldDefinition::new(
    "RATE_PROFILE_NAME",
    "osdTextElementRateProfileName",
    "osdDescElementRateProfileName",
    Text(b"RATE_1"),
)
.order(420);

pub static PID_PROFILE_NAME: FieldDefinition = FieldDefinition::new(
    "PID_PROFILE_NAME",
    "osdTextElementPidProfileName",
    "osdDescElementPidProfileName",
    Text(b"PID_1"),
)
.order(430);

pub static OSD_PROFILE_NAME: FieldDefinition = FieldDefinition::new(
    "OSD_PROFILE_NAME",
    "osdTextElementOsdProfileName",
    "osdDescElementOsdProfileName",
    Text(b"OSD_1"),
)
.order(440);

pub static RSSI_DBM_VALUE: FieldDefinition = FieldDefinition::new(
    "RSSI_DBM_VALUE",
    "osdTextElementRssiDbmValue",
    "osdDescElementRssiDbmValue",
    Text(&[sym::RSSI, b'-', b'1', b'3', b'0']),
)
.order(395);

pub static RC_CHANNELS: FieldDefinition = FieldDefinition::new(
    "OSD_RC_CHANNELS",
    "osdTextElementRcChannels",
    "osdDescElementRcChannels",
    Rows(&[b"-1000", b"  545", b"  689", b" 1000"]),
)
.order(445);

pub static CAMERA_FRAME: FieldDefinition = FieldDefinition::new(
    "OSD_CAMERA_FRAME",
    "osdTextElementCameraFrame",
    "osdDescElementCameraFrame",
    Computed(camera_frame),
)
.order(450);

pub static OSD_EFFICIENCY: FieldDefinition = FieldDefinition::new(
    "OSD_EFFICIENCY",
    "osdTextElementEfficiency",
    "osdDescElementEfficiency",
    Computed(efficiency),
)
.order(455);

pub static TOTAL_FLIGHTS: FieldDefinition = FieldDefinition::new(
    "OSD_TOTAL_FLIGHTS",
    "osdTextTotalFlights",
    "osdDescTotalFlights",
    Text(b"#9876"),
)
.order(460);

mod test {
    #[cfg(test)]
    fn preview_context<'a>(
        version: crate::version::ApiVersion,
        unit_mode: crate::config::UnitMode,
        timers: &'a [crate::model::Timer],
        hints: &'a crate::osd::field::PreviewHints,
    ) -> crate::osd::field::PreviewContext<'a> {
        use crate::config::{CameraFrame, VideoSystem};
        use crate::osd::{field::PreviewContext, grid::Grid, symbol::Symbols};

        PreviewContext {
            version,
            symbols: Symbols::for_version(version),
            video_system: VideoSystem::PAL,
            grid: Grid::for_video_system(VideoSystem::PAL),
            unit_mode,
            timers,
            camera_frame: CameraFrame::default(),
            variant: 0,
            hints,
        }
    }

    #[test]
    fn test_unit_dependent_previews() {
        use super::{ALTITUDE, CORE_TEMPERATURE, GPS_SPEED};
        use crate::config::UnitMode;
        use crate::osd::field::{Preview, PreviewHints};
        use crate::version::{API_VERSION_1_41, API_VERSION_1_46};

        let hints = PreviewHints::default();
        let imperial = preview_context(API_VERSION_1_46, UnitMode::Imperial, &[], &hints);
        let metric = preview_context(API_VERSION_1_46, UnitMode::Metric, &[], &hints);

        let text = |bytes: &[u8]| Preview::Text(bytes.to_vec());
        assert_eq!(ALTITUDE.preview.resolve(&imperial), text(b"\x7f399.7\x0f"));
        assert_eq!(ALTITUDE.preview.resolve(&metric), text(b"\x7f399.7\x0c"));
        let no_decimal = crate::osd::field::PreviewContext { variant: 1, ..metric };
        assert_eq!(ALTITUDE.preview.resolve(&no_decimal), text(b"\x7f399\x0c"));

        assert_eq!(CORE_TEMPERATURE.preview.resolve(&imperial), text(b"C\x7a91\x0d"));
        assert_eq!(CORE_TEMPERATURE.preview.resolve(&metric), text(b"C\x7a33\x0e"));

        assert_eq!(GPS_SPEED.preview.resolve(&metric), text(b"\x7040\x9e"));
        let font_v1 = preview_context(API_VERSION_1_41, UnitMode::Imperial, &[], &hints);
        assert_eq!(GPS_SPEED.preview.resolve(&font_v1), text(b"40\x9d"));
    }

    #[test]
    fn test_pid_previews() {
        use super::PID_PITCH;
        use crate::config::UnitMode;
        use crate::osd::field::{Preview, PreviewHints};
        use crate::version::{API_VERSION_1_43, API_VERSION_1_44};

        let hints = PreviewHints::default();
        let context = preview_context(API_VERSION_1_43, UnitMode::Metric, &[], &hints);
        assert_eq!(PID_PITCH.preview.resolve(&context), Preview::Text(b"PIT  47  84  46".to_vec()));
        let context = preview_context(API_VERSION_1_44, UnitMode::Metric, &[], &hints);
        let expected = b"PIT  47  84  46 125".to_vec();
        assert_eq!(PID_PITCH.preview.resolve(&context), Preview::Text(expected));

        let mut hints = PreviewHints::default();
        hints.pid_defaults[1] = [65535, 1000, 20000, 65535];
        let context = preview_context(API_VERSION_1_44, UnitMode::Metric, &[], &hints);
        let expected = b"PIT 65535 1000 20000 65535".to_vec();
        assert_eq!(PID_PITCH.preview.resolve(&context), Preview::Text(expected));
    }

    #[test]
    fn test_glyph_previews() {
        use super::{GPS_LON, GPS_SATS, MAIN_BATT_VOLTAGE, RSSI_VALUE, THROTTLE_POSITION};
        use crate::config::UnitMode;
        use crate::osd::field::{Preview, PreviewHints};
        use crate::version::API_VERSION_1_46;

        let hints = PreviewHints::default();
        let context = preview_context(API_VERSION_1_46, UnitMode::Metric, &[], &hints);
        let text = |bytes: &[u8]| Preview::Text(bytes.to_vec());
        assert_eq!(RSSI_VALUE.preview.resolve(&context), text(b"\x0199"));
        assert_eq!(MAIN_BATT_VOLTAGE.preview.resolve(&context), text(b"\x9616.8\x06"));
        assert_eq!(THROTTLE_POSITION.preview.resolve(&context), text(b"\x04 69"));
        assert_eq!(GPS_SATS.preview.resolve(&context), text(b"\x1e\x1f14"));
        assert_eq!(GPS_LON.preview.resolve(&context), text(b"\x98-000.0000000"));
    }

    #[test]
    fn test_timer_and_name_previews() {
        use super::{CRAFT_NAME, TIMER_1, TIMER_2};
        use crate::config::UnitMode;
        use crate::model::Timer;
        use crate::osd::field::{Preview, PreviewHints};
        use crate::version::API_VERSION_1_46;

        let timers = [Timer { index: 0, source: 1, precision: 1, alarm: 10 }];
        let mut hints = PreviewHints::default();
        let context = preview_context(API_VERSION_1_46, UnitMode::Metric, &timers, &hints);
        assert_eq!(TIMER_1.preview.resolve(&context), Preview::Text(b"\x9c00:00.00".to_vec()));
        assert!(TIMER_2.preview.resolve(&context).is_empty());
        assert_eq!(CRAFT_NAME.preview.resolve(&context), Preview::Text(b"CRAFT_NAME".to_vec()));

        hints.craft_name = "Quad5".to_string();
        let context = preview_context(API_VERSION_1_46, UnitMode::Metric, &timers, &hints);
        assert_eq!(CRAFT_NAME.preview.resolve(&context), Preview::Text(b"QUAD5".to_vec()));
    }

    #[test]
    fn test_centred_defaults() {
        use super::CROSSHAIRS;
        use crate::config::{UnitMode, VideoSystem};
        use crate::osd::{field::PreviewHints, grid::Grid};
        use crate::version::{API_VERSION_1_37, API_VERSION_1_39};

        let hints = PreviewHints::default();
        let pal = preview_context(API_VERSION_1_37, UnitMode::Metric, &[], &hints);
        assert_eq!(CROSSHAIRS.default_position.resolve(&pal), 223);
        assert!(!CROSSHAIRS.positionable.resolve(&pal));

        let ntsc = crate::osd::field::PreviewContext {
            video_system: VideoSystem::NTSC,
            grid: Grid::for_video_system(VideoSystem::NTSC),
            ..pal
        };
        assert_eq!(CROSSHAIRS.default_position.resolve(&ntsc), 193);
        let context = preview_context(API_VERSION_1_39, UnitMode::Metric, &[], &hints);
        assert!(CROSSHAIRS.positionable.resolve(&context));
    }

    #[test]
    fn test_camera_frame_preview() {
        use super::CAMERA_FRAME;
        use crate::config::{CameraFrame, UnitMode};
        use crate::osd::field::{Preview, PreviewHints};
        use crate::version::API_VERSION_1_46;

        let hints = PreviewHints::default();
        let context = preview_context(API_VERSION_1_46, UnitMode::Metric, &[], &hints);
        let context = crate::osd::field::PreviewContext {
            camera_frame: CameraFrame { width: 4, height: 3 },
            ..context
        };
        let sprites = match CAMERA_FRAME.preview.resolve(&context) {
            Preview::Sprites(sprites) => sprites,
            preview => panic!("unexpected preview {:?}", preview),
        };
        // two rows of four plus one row of two sides
        assert_eq!(sprites.len(), 10);
        assert!(sprites.iter().all(|s| (0..4).contains(&s.x) && (0..3).contains(&s.y)));
        assert_eq!(sprites.iter().filter(|s| s.symbol == 0x0B).count(), 4);
    }
}
