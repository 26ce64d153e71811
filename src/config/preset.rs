//! Preset configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::action::Action;
use crate::caps::Resolution;
use crate::error::{name_of, ConfigError};

/// Action kind of a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Constant-velocity relative move.
    Positioning,
    /// Free running.
    Velocity,
    /// Velocity ramp.
    Acceleration,
    /// Ramped relative move.
    SmoothPositioning,
    /// Zero velocity, no duration.
    Stop,
}

/// A named action from configuration.
///
/// Fields not used by the preset's `type` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetConfig {
    /// Target motor name (must match a motor in config).
    pub motor: String<32>,

    /// Action kind.
    #[serde(rename = "type")]
    pub kind: ActionType,

    /// Microstep resolution.
    pub resolution: Resolution,

    /// Velocity in full steps per second (positioning, velocity).
    #[serde(default)]
    pub velocity: Option<i32>,

    /// Step count (positioning: unsigned, smooth positioning: signed).
    #[serde(default)]
    pub steps: Option<i64>,

    /// Duration in microseconds (velocity: optional, acceleration: required).
    #[serde(default)]
    pub duration_us: Option<u32>,

    /// Start velocity (acceleration).
    #[serde(default)]
    pub start_velocity: Option<i32>,

    /// End velocity (acceleration).
    #[serde(default)]
    pub end_velocity: Option<i32>,

    /// Peak velocity (smooth positioning).
    #[serde(default)]
    pub max_velocity: Option<u32>,

    /// Ramp time in microseconds (smooth positioning).
    #[serde(default)]
    pub acceleration_time_us: Option<u32>,
}

impl PresetConfig {
    /// Build the action this preset describes.
    ///
    /// Checks only that the needed fields are present and fit their types;
    /// capability checks happen in config validation.
    pub fn to_action(&self, name: &str) -> Result<Action, ConfigError> {
        let out_of_range = |field: &'static str| ConfigError::ActionFieldOutOfRange {
            preset: name_of(name),
            field,
        };

        let res = self.resolution;

        let action = match self.kind {
            ActionType::Positioning => {
                let velocity = required(self.velocity, name, "velocity")?;
                let steps = u32::try_from(required(self.steps, name, "steps")?)
                    .map_err(|_| out_of_range("steps"))?;
                Action::positioning(velocity, steps, res)
            }
            ActionType::Velocity => {
                let velocity = required(self.velocity, name, "velocity")?;
                Action::velocity(velocity, self.duration_us.unwrap_or(0), res)
            }
            ActionType::Acceleration => {
                let start = required(self.start_velocity, name, "start_velocity")?;
                let end = required(self.end_velocity, name, "end_velocity")?;
                let duration = required(self.duration_us, name, "duration_us")?;
                Action::acceleration(start, end, duration, res)
            }
            ActionType::SmoothPositioning => {
                let steps = i32::try_from(required(self.steps, name, "steps")?)
                    .map_err(|_| out_of_range("steps"))?;
                let max_velocity = required(self.max_velocity, name, "max_velocity")?;
                let ramp = required(self.acceleration_time_us, name, "acceleration_time_us")?;
                Action::smooth_positioning(steps, max_velocity, ramp, res)
            }
            ActionType::Stop => Action::stop(res),
        };

        Ok(action)
    }
}

fn required<T>(value: Option<T>, preset: &str, field: &'static str) -> Result<T, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingActionField {
        preset: name_of(preset),
        field,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Motion;

    fn preset(kind: ActionType) -> PresetConfig {
        PresetConfig {
            motor: String::try_from("x").unwrap(),
            kind,
            resolution: Resolution::Sixteenth,
            velocity: None,
            steps: None,
            duration_us: None,
            start_velocity: None,
            end_velocity: None,
            max_velocity: None,
            acceleration_time_us: None,
        }
    }

    #[test]
    fn test_positioning_needs_velocity_and_steps() {
        let mut p = preset(ActionType::Positioning);
        p.velocity = Some(-500);
        assert!(matches!(
            p.to_action("home"),
            Err(ConfigError::MissingActionField { field: "steps", .. })
        ));

        p.steps = Some(400);
        let action = p.to_action("home").unwrap();
        assert_eq!(
            action.motion,
            Motion::Positioning {
                velocity: -500,
                steps: 400
            }
        );
        assert_eq!(action.resolutions.single(), Some(Resolution::Sixteenth));
    }

    #[test]
    fn test_negative_positioning_steps_out_of_range() {
        let mut p = preset(ActionType::Positioning);
        p.velocity = Some(100);
        p.steps = Some(-1);
        assert!(matches!(
            p.to_action("back"),
            Err(ConfigError::ActionFieldOutOfRange { field: "steps", .. })
        ));
    }

    #[test]
    fn test_velocity_duration_defaults_to_continuous() {
        let mut p = preset(ActionType::Velocity);
        p.velocity = Some(250);
        assert!(p.to_action("spin").unwrap().motion.is_continuous());
    }

    #[test]
    fn test_stop_needs_nothing() {
        let action = preset(ActionType::Stop).to_action("halt").unwrap();
        assert_eq!(action, Action::stop(Resolution::Sixteenth));
    }

    #[test]
    fn test_field_extremes_keep_their_values() {
        let mut p = preset(ActionType::Acceleration);
        p.start_velocity = Some(i32::MIN);
        p.end_velocity = Some(i32::MAX);
        p.duration_us = Some(u32::MAX);
        assert_eq!(
            p.to_action("ramp").unwrap().motion,
            Motion::Acceleration {
                start_velocity: i32::MIN,
                end_velocity: i32::MAX,
                duration_us: u32::MAX
            }
        );

        let mut p = preset(ActionType::SmoothPositioning);
        p.steps = Some(i64::from(i32::MIN));
        p.max_velocity = Some(u32::MAX);
        p.acceleration_time_us = Some(u32::MAX);
        assert_eq!(
            p.to_action("glide").unwrap().motion,
            Motion::SmoothPositioning {
                steps: i32::MIN,
                max_velocity: u32::MAX,
                acceleration_time_us: u32::MAX
            }
        );

        p.steps = Some(i64::from(i32::MAX) + 1);
        assert!(matches!(
            p.to_action("glide"),
            Err(ConfigError::ActionFieldOutOfRange { field: "steps", .. })
        ));
    }
}
