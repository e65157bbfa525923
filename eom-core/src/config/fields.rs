//! The registered configuration fields
//!
//! Registration order is the order of this table. It only changes when
//! the source changes, so enumeration order is stable across runs.

use super::field::ConfigField;
use super::record::{VibrationMode, REMOTE_UPDATE_URL, WIFI_KEY_MAX_LEN, WIFI_SSID_MAX_LEN};

/// Number of registered fields
pub const FIELD_COUNT: usize = 38;

/// Seconds in a day; upper bound for the screen idle timers
const DAY_SECONDS: i32 = 86_400;

/// Every configuration field, in registration order
pub static FIELDS: [ConfigField; FIELD_COUNT] = [
    // Networking
    ConfigField::text(
        "wifi_ssid",
        WIFI_SSID_MAX_LEN,
        "",
        |c| &c.wifi_ssid,
        |c| &mut c.wifi_ssid,
    )
    .needs_reboot(),
    ConfigField::text(
        "wifi_key",
        WIFI_KEY_MAX_LEN,
        "",
        |c| &c.wifi_key,
        |c| &mut c.wifi_key,
    )
    .needs_reboot(),
    ConfigField::flag("wifi_on", false, |c| c.wifi_on, |c, v| c.wifi_on = v).needs_reboot(),
    ConfigField::text(
        "bt_display_name",
        63,
        "Edge-o-Matic 3000",
        |c| &c.bt_display_name,
        |c| &mut c.bt_display_name,
    )
    .needs_reboot(),
    ConfigField::flag("bt_on", false, |c| c.bt_on, |c, v| c.bt_on = v).needs_reboot(),
    ConfigField::flag(
        "force_bt_coex",
        false,
        |c| c.force_bt_coex,
        |c, v| c.force_bt_coex = v,
    )
    .needs_reboot(),
    // Console
    ConfigField::flag(
        "store_command_history",
        true,
        |c| c.store_command_history,
        |c, v| c.store_command_history = v,
    ),
    ConfigField::flag(
        "console_basic_mode",
        false,
        |c| c.console_basic_mode,
        |c, v| c.console_basic_mode = v,
    ),
    // Server
    ConfigField::number(
        "websocket_port",
        1,
        65_535,
        80,
        |c| c.websocket_port as i32,
        |c, v| c.websocket_port = v as u16,
    )
    .needs_reboot(),
    ConfigField::flag(
        "classic_serial",
        false,
        |c| c.classic_serial,
        |c, v| c.classic_serial = v,
    ),
    ConfigField::flag("use_ssl", false, |c| c.use_ssl, |c, v| c.use_ssl = v).needs_reboot(),
    ConfigField::text("hostname", 63, "eom3k", |c| &c.hostname, |c| &mut c.hostname)
        .needs_reboot(),
    // UI
    ConfigField::number(
        "led_brightness",
        0,
        255,
        128,
        |c| c.led_brightness as i32,
        |c, v| c.led_brightness = v as u8,
    ),
    ConfigField::number(
        "screen_dim_seconds",
        0,
        DAY_SECONDS,
        0,
        |c| c.screen_dim_seconds,
        |c, v| c.screen_dim_seconds = v,
    ),
    ConfigField::number(
        "screen_timeout_seconds",
        0,
        DAY_SECONDS,
        0,
        |c| c.screen_timeout_seconds,
        |c, v| c.screen_timeout_seconds = v,
    ),
    ConfigField::flag(
        "enable_screensaver",
        false,
        |c| c.enable_screensaver,
        |c, v| c.enable_screensaver = v,
    ),
    ConfigField::text(
        "language_file_name",
        64,
        "de.json",
        |c| &c.language_file_name,
        |c| &mut c.language_file_name,
    )
    .needs_reboot(),
    // Edging control
    ConfigField::number(
        "motor_max_speed",
        0,
        255,
        128,
        |c| c.motor_max_speed as i32,
        |c, v| c.motor_max_speed = v as u8,
    ),
    ConfigField::number(
        "motor_start_speed",
        0,
        255,
        10,
        |c| c.motor_start_speed as i32,
        |c, v| c.motor_start_speed = v as u8,
    ),
    ConfigField::number(
        "edge_delay",
        0,
        600_000,
        1000,
        |c| c.edge_delay,
        |c, v| c.edge_delay = v,
    ),
    ConfigField::number(
        "max_additional_delay",
        0,
        6000,
        1000,
        |c| c.max_additional_delay,
        |c, v| c.max_additional_delay = v,
    ),
    ConfigField::number(
        "minimum_on_time",
        0,
        5000,
        1000,
        |c| c.minimum_on_time,
        |c, v| c.minimum_on_time = v,
    ),
    ConfigField::number(
        "pressure_smoothing",
        1,
        255,
        5,
        |c| c.pressure_smoothing as i32,
        |c, v| c.pressure_smoothing = v as u8,
    ),
    ConfigField::number(
        "sensitivity_threshold",
        0,
        1023,
        600,
        |c| c.sensitivity_threshold,
        |c, v| c.sensitivity_threshold = v,
    ),
    ConfigField::number(
        "motor_ramp_time_s",
        0,
        255,
        30,
        |c| c.motor_ramp_time_s,
        |c, v| c.motor_ramp_time_s = v,
    ),
    ConfigField::number(
        "update_frequency_hz",
        1,
        1000,
        50,
        |c| c.update_frequency_hz,
        |c, v| c.update_frequency_hz = v,
    ),
    ConfigField::number(
        "sensor_sensitivity",
        0,
        255,
        128,
        |c| c.sensor_sensitivity as i32,
        |c, v| c.sensor_sensitivity = v as u8,
    ),
    ConfigField::flag(
        "use_average_values",
        false,
        |c| c.use_average_values,
        |c, v| c.use_average_values = v,
    ),
    // Vibration output
    ConfigField::choice(
        "vibration_mode",
        VibrationMode::RampStop as i32,
        |c| c.vibration_mode.as_i32(),
        |c, v| match VibrationMode::from_i32(v) {
            Some(mode) => {
                c.vibration_mode = mode;
                true
            }
            None => false,
        },
    ),
    // Post-orgasm
    ConfigField::number(
        "clench_pressure_sensitivity",
        0,
        1023,
        200,
        |c| c.clench_pressure_sensitivity,
        |c, v| c.clench_pressure_sensitivity = v,
    ),
    ConfigField::number(
        "clench_threshold_2_orgasm",
        0,
        300,
        35,
        |c| c.clench_threshold_2_orgasm,
        |c, v| c.clench_threshold_2_orgasm = v,
    ),
    ConfigField::flag(
        "clench_detector_in_edging",
        false,
        |c| c.clench_detector_in_edging,
        |c, v| c.clench_detector_in_edging = v,
    ),
    ConfigField::number(
        "auto_edging_duration_minutes",
        0,
        1440,
        30,
        |c| c.auto_edging_duration_minutes,
        |c, v| c.auto_edging_duration_minutes = v,
    ),
    ConfigField::number(
        "post_orgasm_duration_seconds",
        0,
        3600,
        10,
        |c| c.post_orgasm_duration_seconds,
        |c, v| c.post_orgasm_duration_seconds = v,
    ),
    ConfigField::flag(
        "post_orgasm_menu_lock",
        false,
        |c| c.post_orgasm_menu_lock,
        |c, v| c.post_orgasm_menu_lock = v,
    ),
    ConfigField::flag(
        "edge_menu_lock",
        false,
        |c| c.edge_menu_lock,
        |c, v| c.edge_menu_lock = v,
    ),
    ConfigField::number(
        "max_clench_duration",
        0,
        10_000,
        100,
        |c| c.max_clench_duration,
        |c, v| c.max_clench_duration = v,
    ),
    // Internal
    ConfigField::text(
        "remote_update_url",
        127,
        REMOTE_UPDATE_URL,
        |c| &c.remote_update_url,
        |c| &mut c.remote_update_url,
    ),
];
