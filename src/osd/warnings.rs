use super::field::Definition;

macro_rules! warnings {
    ($($ident:ident: $key:literal;)+) => {
        $(
            pub static $ident: Definition = Definition::new(
                stringify!($ident),
                concat!("osdWarningText", $key),
                concat!("osdWarning", $key),
            );
        )+
    };
}

warnings! {
    ARMING_DISABLED: "ArmingDisabled";
    BATTERY_NOT_FULL: "BatteryNotFull";
    BATTERY_WARNING: "BatteryWarning";
    BATTERY_CRITICAL: "BatteryCritical";
    VISUAL_BEEPER: "VisualBeeper";
    CRASH_FLIP_MODE: "CrashFlipMode";
    ESC_FAIL: "EscFail";
    CORE_TEMPERATURE: "CoreTemperature";
    RC_SMOOTHING_FAILURE: "RcSmoothingFailure";
    FAILSAFE: "Failsafe";
    LAUNCH_CONTROL: "LaunchControl";
    GPS_RESCUE_UNAVAILABLE: "GpsRescueUnavailable";
    GPS_RESCUE_DISABLED: "GpsRescueDisabled";
    RSSI: "RSSI";
    LINK_QUALITY: "LinkQuality";
    RSSI_DBM: "RssiDbm";
    OVER_CAP: "OverCap";
    RSNR: "RSNR";
    LOAD: "Load";
}
