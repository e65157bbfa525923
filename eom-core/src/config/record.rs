//! The device configuration record
//!
//! Exactly one `ConfigRecord` exists for the lifetime of the process and it
//! is owned by the [`ConfigRegistry`](super::ConfigRegistry). Values are
//! written only through the registry so every mutation can schedule a save.

use heapless::String;
use serde::{Deserialize, Serialize};

use super::fields::FIELDS;

/// Capacity of every string slot in the record
pub const CONFIG_STRING_CAPACITY: usize = 128;

/// Maximum length of the record's origin path
pub const CONFIG_PATH_MAX: usize = 64;

/// WiFi SSID and key length limits
pub const WIFI_SSID_MAX_LEN: usize = 64;
pub const WIFI_KEY_MAX_LEN: usize = 64;

/// Update server the device asks for firmware releases
pub const REMOTE_UPDATE_URL: &str =
    "http://us-central1-maustec-io.cloudfunctions.net/gh-release-embedded-bridge";

/// String slot type
pub type ConfigString = String<CONFIG_STRING_CAPACITY>;

/// Vibration output mode for the main actuator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i32)]
pub enum VibrationMode {
    /// Follow the global sync source
    GlobalSync = 0,
    /// Ramp up, stop at the edge
    #[default]
    RampStop = 1,
    /// Intensity drains as arousal rises
    Depletion = 2,
    /// Intensity builds as arousal rises
    Enhancement = 3,
    /// Play a stored pattern
    Pattern = 4,
}

impl VibrationMode {
    /// Convert from the numeric value used in the registry
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(VibrationMode::GlobalSync),
            1 => Some(VibrationMode::RampStop),
            2 => Some(VibrationMode::Depletion),
            3 => Some(VibrationMode::Enhancement),
            4 => Some(VibrationMode::Pattern),
            _ => None,
        }
    }

    /// Numeric value used in the registry
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// All persistent runtime configuration
///
/// Every slot here has a matching descriptor in [`FIELDS`]; defaults come
/// from that table, not from this struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Where this record was loaded from (never persisted)
    #[serde(skip)]
    origin: String<CONFIG_PATH_MAX>,

    // Networking
    pub wifi_ssid: ConfigString,
    pub wifi_key: ConfigString,
    pub wifi_on: bool,
    pub bt_display_name: ConfigString,
    pub bt_on: bool,
    pub force_bt_coex: bool,

    // Console
    pub store_command_history: bool,
    pub console_basic_mode: bool,

    // Server
    pub websocket_port: u16,
    pub classic_serial: bool,
    pub use_ssl: bool,
    pub hostname: ConfigString,

    // UI
    pub led_brightness: u8,
    /// Seconds of idle before the screen dims, 0 to disable
    pub screen_dim_seconds: i32,
    /// Seconds of idle before the screen turns off, 0 to disable
    pub screen_timeout_seconds: i32,
    pub enable_screensaver: bool,
    pub language_file_name: ConfigString,

    // Edging control
    pub motor_max_speed: u8,
    pub motor_start_speed: u8,
    pub edge_delay: i32,
    pub max_additional_delay: i32,
    pub minimum_on_time: i32,
    pub pressure_smoothing: u8,
    pub sensitivity_threshold: i32,
    pub motor_ramp_time_s: i32,
    pub update_frequency_hz: i32,
    pub sensor_sensitivity: u8,
    pub use_average_values: bool,

    // Vibration output
    pub vibration_mode: VibrationMode,

    // Post-orgasm
    pub clench_pressure_sensitivity: i32,
    pub clench_threshold_2_orgasm: i32,
    pub clench_detector_in_edging: bool,
    pub auto_edging_duration_minutes: i32,
    pub post_orgasm_duration_seconds: i32,
    pub post_orgasm_menu_lock: bool,
    pub edge_menu_lock: bool,
    pub max_clench_duration: i32,

    // Internal
    pub remote_update_url: ConfigString,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        let mut record = Self::blank();
        for field in FIELDS.iter() {
            field.write_default(&mut record);
        }
        record
    }
}

impl ConfigRecord {
    /// All-zero record; only used as the canvas defaults are written onto
    fn blank() -> Self {
        Self {
            origin: String::new(),
            wifi_ssid: String::new(),
            wifi_key: String::new(),
            wifi_on: false,
            bt_display_name: String::new(),
            bt_on: false,
            force_bt_coex: false,
            store_command_history: false,
            console_basic_mode: false,
            websocket_port: 0,
            classic_serial: false,
            use_ssl: false,
            hostname: String::new(),
            led_brightness: 0,
            screen_dim_seconds: 0,
            screen_timeout_seconds: 0,
            enable_screensaver: false,
            language_file_name: String::new(),
            motor_max_speed: 0,
            motor_start_speed: 0,
            edge_delay: 0,
            max_additional_delay: 0,
            minimum_on_time: 0,
            pressure_smoothing: 0,
            sensitivity_threshold: 0,
            motor_ramp_time_s: 0,
            update_frequency_hz: 0,
            sensor_sensitivity: 0,
            use_average_values: false,
            vibration_mode: VibrationMode::default(),
            clench_pressure_sensitivity: 0,
            clench_threshold_2_orgasm: 0,
            clench_detector_in_edging: false,
            auto_edging_duration_minutes: 0,
            post_orgasm_duration_seconds: 0,
            post_orgasm_menu_lock: false,
            edge_menu_lock: false,
            max_clench_duration: 0,
            remote_update_url: String::new(),
        }
    }

    /// Path this record was loaded from, empty if it came from defaults
    pub fn origin(&self) -> &str {
        self.origin.as_str()
    }

    /// Record where this record was loaded from
    ///
    /// Paths longer than [`CONFIG_PATH_MAX`] are truncated.
    pub fn set_origin(&mut self, path: &str) {
        self.origin.clear();
        for c in path.chars() {
            if self.origin.push(c).is_err() {
                break;
            }
        }
    }
}
