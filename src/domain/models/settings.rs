#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

pub const TEMPERATURE_MIN: f64 = 0.0;
pub const TEMPERATURE_MAX: f64 = 1.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub temperature: f64,
    pub max_tokens: u32,
    pub show_timestamps: bool,
}

impl Default for Settings {
    fn default() -> Settings {
        return Settings {
            temperature: 0.7,
            max_tokens: 1000,
            show_timestamps: true,
        };
    }
}

/// Partial update for [`Settings`]. Fields left as `None` keep their current
/// value when merged.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsPatch {
    pub temperature: Option<f64>,
    pub max_tokens: Option<u32>,
    pub show_timestamps: Option<bool>,
}

impl SettingsPatch {
    pub fn temperature(temperature: f64) -> SettingsPatch {
        return SettingsPatch {
            temperature: Some(temperature),
            ..SettingsPatch::default()
        };
    }

    pub fn max_tokens(max_tokens: u32) -> SettingsPatch {
        return SettingsPatch {
            max_tokens: Some(max_tokens),
            ..SettingsPatch::default()
        };
    }

    pub fn show_timestamps(show_timestamps: bool) -> SettingsPatch {
        return SettingsPatch {
            show_timestamps: Some(show_timestamps),
            ..SettingsPatch::default()
        };
    }
}

impl Settings {
    pub fn merge(&self, patch: &SettingsPatch) -> Settings {
        let mut res = self.clone();
        if let Some(temperature) = patch.temperature {
            res.temperature = temperature;
        }
        if let Some(max_tokens) = patch.max_tokens {
            res.max_tokens = max_tokens;
        }
        if let Some(show_timestamps) = patch.show_timestamps {
            res.show_timestamps = show_timestamps;
        }

        return res.sanitized();
    }

    /// Clamps values into their allowed ranges. NaN temperatures reset to the
    /// default.
    pub fn sanitized(mut self) -> Settings {
        if self.temperature.is_nan() {
            self.temperature = Settings::default().temperature;
        }
        self.temperature = self.temperature.clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);
        self.max_tokens = self.max_tokens.max(1);

        return self;
    }
}
