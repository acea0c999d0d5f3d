//! Post flight statistics, identified by index only

use super::field::Definition;

macro_rules! statistics {
    ($($ident:ident: $name:literal, $key:literal;)+) => {
        $(
            pub static $ident: Definition = Definition::new(
                $name,
                concat!("osdTextStat", $key),
                concat!("osdDescStat", $key),
            );
        )+
    };
}

statistics! {
    MAX_SPEED: "MAX_SPEED", "MaxSpeed";
    MIN_BATTERY: "MIN_BATTERY", "MinBattery";
    MIN_RSSI: "MIN_RSSI", "MinRssi";
    MAX_CURRENT: "MAX_CURRENT", "MaxCurrent";
    USED_MAH: "USED_MAH", "UsedMah";
    USED_WH: "USED_WH", "UsedWh";
    MAX_ALTITUDE: "MAX_ALTITUDE", "MaxAltitude";
    BLACKBOX: "BLACKBOX", "Blackbox";
    END_BATTERY: "END_BATTERY", "EndBattery";
    TIMER_1: "TIMER_1", "Timer1";
    TIMER_2: "TIMER_2", "Timer2";
    MAX_DISTANCE: "MAX_DISTANCE", "MaxDistance";
    BLACKBOX_LOG_NUMBER: "BLACKBOX_LOG_NUMBER", "BlackboxLogNumber";
    RTC_DATE_TIME: "RTC_DATE_TIME", "RtcDateTime";
    BATTERY_VOLTAGE: "BATTERY_VOLTAGE", "Battery";
    MAX_G_FORCE: "MAX_G_FORCE", "GForce";
    MAX_ESC_TEMP: "MAX_ESC_TEMP", "EscTemperature";
    MAX_ESC_RPM: "MAX_ESC_RPM", "EscRpm";
    MIN_LINK_QUALITY: "MIN_LINK_QUALITY", "MinLinkQuality";
    FLIGHT_DISTANCE: "FLIGHT_DISTANCE", "FlightDistance";
    MAX_FFT: "MAX_FFT", "MaxFFT";
    TOTAL_FLIGHTS: "STAT_TOTAL_FLIGHTS", "TotalFlights";
    TOTAL_FLIGHT_TIME: "STAT_TOTAL_FLIGHT_TIME", "TotalFlightTime";
    TOTAL_FLIGHT_DIST: "STAT_TOTAL_FLIGHT_DIST", "TotalFlightDistance";
    MIN_RSSI_DBM: "MIN_RSSI_DBM", "MinRssiDbm";
    MIN_RSNR: "MIN_RSNR", "MinRSNR";
    BEST_3_CONSEC_LAPS: "STAT_BEST_3_CONSEC_LAPS", "Best3ConsecLaps";
    BEST_LAP: "STAT_BEST_LAP", "BestLap";
    FULL_THROTTLE_TIME: "STAT_FULL_THROTTLE_TIME", "FullThrottleTime";
    FULL_THROTTLE_COUNTER: "STAT_FULL_THROTTLE_COUNTER", "FullThrottleCounter";
    AVG_THROTTLE: "STAT_AVG_THROTTLE", "AvgThrottle";
}
