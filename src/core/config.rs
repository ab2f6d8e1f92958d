use super::constants::*;
use super::error::SceneError;

/// Tunables for one scene instance.
///
/// Defaults come from `constants`; the host may override a few of them from
/// `data-*` attributes on the container element (see [`SceneConfig::ATTRIBUTES`]).
#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Seed for pulse speeds and floater phases. `None` draws one at startup.
    pub seed: Option<u64>,
    pub frustum_size: f32,
    pub pointer_sensitivity: f32,
    pub ease_rate: f32,
    pub pulses_per_path: usize,
    pub pulse_speed_min: f32,
    pub pulse_speed_max: f32,
    pub shadows: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: None,
            frustum_size: FRUSTUM_SIZE,
            pointer_sensitivity: POINTER_SENSITIVITY,
            ease_rate: GROUP_EASE_RATE,
            pulses_per_path: PULSES_PER_PATH,
            pulse_speed_min: PULSE_SPEED_MIN,
            pulse_speed_max: PULSE_SPEED_MAX,
            shadows: true,
        }
    }
}

impl SceneConfig {
    /// Container attributes the host forwards to [`SceneConfig::apply_attribute`].
    pub const ATTRIBUTES: [&'static str; 4] =
        ["data-seed", "data-frustum-size", "data-pulses-per-path", "data-shadows"];

    /// Override one field from a `data-*` attribute. Unknown keys are ignored;
    /// unparsable or out-of-range values leave the field untouched.
    pub fn apply_attribute(&mut self, key: &'static str, value: &str) -> Result<(), SceneError> {
        let invalid = || SceneError::InvalidConfig {
            key,
            value: value.to_string(),
        };
        let value_trimmed = value.trim();
        match key {
            "data-seed" => {
                self.seed = Some(value_trimmed.parse::<u64>().map_err(|_| invalid())?);
            }
            "data-frustum-size" => {
                let size = value_trimmed.parse::<f32>().map_err(|_| invalid())?;
                if !size.is_finite() || size <= 0.0 {
                    return Err(invalid());
                }
                self.frustum_size = size;
            }
            "data-pulses-per-path" => {
                let count = value_trimmed.parse::<usize>().map_err(|_| invalid())?;
                if count > MAX_PULSES_PER_PATH {
                    return Err(invalid());
                }
                self.pulses_per_path = count;
            }
            "data-shadows" => {
                self.shadows = match value_trimmed {
                    "true" | "1" | "on" => true,
                    "false" | "0" | "off" => false,
                    _ => return Err(invalid()),
                };
            }
            _ => {}
        }
        Ok(())
    }
}
