//! Builder pattern for StepperMotor.

use embedded_hal::digital::{InputPin, OutputPin};

use crate::clock::Clock;
use crate::config::units::DegreesPerSec;
use crate::config::{MotorConfig, StepTiming, SystemConfig, TravelGeometry};
use crate::error::{truncated, ConfigError, Error, Result};
use crate::motion::SteppingStyle;

use super::driver::StepperMotor;

/// Builder for creating StepperMotor instances.
pub struct StepperMotorBuilder<COIL, SENSOR, CLOCK>
where
    COIL: OutputPin,
    SENSOR: InputPin,
    CLOCK: Clock,
{
    coils: Option<[COIL; 4]>,
    sensor: Option<SENSOR>,
    clock: Option<CLOCK>,
    name: Option<heapless::String<32>>,
    max_angle_deg: Option<u16>,
    stepping: SteppingStyle,
    timing: StepTiming,
}

impl<COIL, SENSOR, CLOCK> Default for StepperMotorBuilder<COIL, SENSOR, CLOCK>
where
    COIL: OutputPin,
    SENSOR: InputPin,
    CLOCK: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<COIL, SENSOR, CLOCK> StepperMotorBuilder<COIL, SENSOR, CLOCK>
where
    COIL: OutputPin,
    SENSOR: InputPin,
    CLOCK: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            coils: None,
            sensor: None,
            clock: None,
            name: None,
            max_angle_deg: None,
            stepping: SteppingStyle::default(),
            timing: StepTiming::default(),
        }
    }

    /// Set the four coil lines, in pattern bit order.
    pub fn coils(mut self, coils: [COIL; 4]) -> Self {
        self.coils = Some(coils);
        self
    }

    /// Set the home sensor line.
    pub fn sensor(mut self, sensor: SENSOR) -> Self {
        self.sensor = Some(sensor);
        self
    }

    /// Set the time source.
    pub fn clock(mut self, clock: CLOCK) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the motor name. Names past 32 bytes are cut at a character boundary.
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(truncated(name));
        self
    }

    /// Set the travel range in degrees.
    pub fn max_angle(mut self, degrees: u16) -> Self {
        self.max_angle_deg = Some(degrees);
        self
    }

    /// Set the coil excitation style.
    pub fn stepping(mut self, style: SteppingStyle) -> Self {
        self.stepping = style;
        self
    }

    /// Replace all timing constants.
    pub fn timing(mut self, timing: StepTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Set the homing sweep speed.
    pub fn calibration_speed(mut self, speed: DegreesPerSec) -> Self {
        self.timing.calibration_speed = speed;
        self
    }

    /// Set the clamp range for eased step delays.
    pub fn delay_limits(mut self, min_us: u32, max_us: u32) -> Self {
        self.timing.min_delay_us = min_us;
        self.timing.max_delay_us = max_us;
        self
    }

    /// Set the duration of the return move after homing.
    pub fn homing_return_ms(mut self, duration_ms: u32) -> Self {
        self.timing.homing_return_ms = duration_ms;
        self
    }

    /// Configure from a MotorConfig.
    pub fn from_motor_config(mut self, config: &MotorConfig) -> Self {
        self.name = Some(config.name.clone());
        self.max_angle_deg = Some(config.max_angle_deg);
        self.stepping = config.stepping;
        self.timing = config.timing();
        self
    }

    /// Configure from SystemConfig by motor name.
    pub fn from_config(self, config: &SystemConfig, motor_name: &str) -> Result<Self> {
        let motor_config = config.motor(motor_name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(truncated(motor_name)))
        })?;

        Ok(self.from_motor_config(motor_config))
    }

    /// Build the StepperMotor. The motor starts homing.
    ///
    /// # Errors
    ///
    /// Returns an error if pins, clock or travel angle are missing, or if the
    /// settings are invalid.
    pub fn build(self) -> Result<StepperMotor<COIL, SENSOR, CLOCK>> {
        let coils = self
            .coils
            .ok_or(Error::Config(ConfigError::MissingComponent("coils")))?;
        let sensor = self
            .sensor
            .ok_or(Error::Config(ConfigError::MissingComponent("sensor")))?;
        let clock = self
            .clock
            .ok_or(Error::Config(ConfigError::MissingComponent("clock")))?;
        let max_angle_deg = self
            .max_angle_deg
            .ok_or(Error::Config(ConfigError::MissingComponent("max_angle")))?;

        let name = self.name.unwrap_or_else(|| truncated("motor"));

        StepperMotor::from_parts(
            coils,
            sensor,
            clock,
            TravelGeometry::new(max_angle_deg, self.stepping),
            self.timing,
            name,
        )
    }
}
