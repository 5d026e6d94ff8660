//! Stepper motor driver.
//!
//! Generic over embedded-hal 1.0 pin types and a microsecond [`Clock`].

use embedded_hal::digital::{InputPin, OutputPin, PinState};

use crate::clock::Clock;
use crate::config::units::{DegreesPerSec, Steps};
use crate::config::{validate_settings, StepTiming, TravelGeometry};
use crate::error::{truncated, MotorError, Result};
use crate::motion::{Direction, GotoMove, SteppingStyle};

use super::builder::StepperMotorBuilder;
use super::position::Position;
use super::state::Mode;

/// Polled controller for a 4-wire stepper with a home sensor.
///
/// Generic over:
/// - `COIL`: coil line type (must implement `OutputPin`), four of them
/// - `SENSOR`: home sensor line (must implement `InputPin`), low when tripped
/// - `CLOCK`: microsecond time source
///
/// Nothing happens on its own: call [`poll`](Self::poll) from the control
/// loop as often as possible. Each poll makes at most one micro-step, and only
/// once the current step delay has elapsed. Commands take effect immediately
/// and are seen by the next poll.
///
/// The motor starts in [`Mode::Calibrating`]: it sweeps backwards until the
/// sensor trips, makes that point position 0 and then returns to where it
/// started. Until then every command except `poll` is ignored.
pub struct StepperMotor<COIL, SENSOR, CLOCK>
where
    COIL: OutputPin,
    SENSOR: InputPin,
    CLOCK: Clock,
{
    /// Coil lines; bit `n` of a pattern entry drives `coils[n]`.
    coils: [COIL; 4],

    /// Home sensor, pulled up, low when tripped.
    sensor: SENSOR,

    /// Step timing source.
    clock: CLOCK,

    /// Current absolute position.
    position: Position,

    /// Travel range and coil table.
    geometry: TravelGeometry,

    /// Fixed timing constants.
    timing: StepTiming,

    /// Active mode.
    mode: Mode,

    /// Direction of the next timed step; `None` holds position.
    direction: Option<Direction>,

    /// Minimum time between two timed steps.
    step_delay_us: u32,

    /// Clock reading at the last timed step.
    last_step_us: u32,

    /// Motor name for logging/debugging.
    name: heapless::String<32>,
}

impl<COIL, SENSOR, CLOCK> StepperMotor<COIL, SENSOR, CLOCK>
where
    COIL: OutputPin,
    SENSOR: InputPin,
    CLOCK: Clock,
{
    /// Create a motor with default timing and start homing.
    ///
    /// The pins must already be configured by the HAL: coils as push-pull
    /// outputs, the sensor as an input with pull-up. No pin or clock is
    /// touched here.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for a zero travel angle.
    pub fn new(
        coils: [COIL; 4],
        sensor: SENSOR,
        clock: CLOCK,
        max_angle_deg: u16,
        style: SteppingStyle,
    ) -> Result<Self> {
        Self::from_parts(
            coils,
            sensor,
            clock,
            TravelGeometry::new(max_angle_deg, style),
            StepTiming::default(),
            truncated("motor"),
        )
    }

    /// Start building a motor.
    pub fn builder() -> StepperMotorBuilder<COIL, SENSOR, CLOCK> {
        StepperMotorBuilder::new()
    }

    pub(crate) fn from_parts(
        coils: [COIL; 4],
        sensor: SENSOR,
        clock: CLOCK,
        geometry: TravelGeometry,
        timing: StepTiming,
        name: heapless::String<32>,
    ) -> Result<Self> {
        validate_settings(geometry.max_angle_deg, &timing)?;

        // Diagnostics may not be up yet: nothing below may log.
        let mut motor = Self {
            coils,
            sensor,
            clock,
            position: Position::new(geometry.max_steps()),
            geometry,
            timing,
            mode: Mode::Calibrating,
            direction: None,
            step_delay_us: 0,
            last_step_us: 0,
            name,
        };
        motor.setup_calibration();
        Ok(motor)
    }

    /// Turn continuously at `speed`; the sign selects the direction.
    ///
    /// Zero speed holds position. The step delay is not clamped, so very low
    /// speeds give very long delays. Cancels a timed move. Ignored while
    /// calibrating.
    pub fn run(&mut self, speed: DegreesPerSec) {
        if self.mode.is_calibrating() {
            return;
        }

        match self.geometry.step_delay_us(speed) {
            Some(delay_us) => {
                self.direction = Direction::from_sign(speed.value());
                self.step_delay_us = delay_us;
                self.mode = Mode::Running;
                debug!(
                    "{}: run at {} deg/s, step delay {} us",
                    self.name.as_str(),
                    speed.value(),
                    delay_us
                );
            }
            None => {
                self.direction = None;
                self.mode = Mode::Idle;
            }
        }
    }

    /// Take one micro-step right now.
    ///
    /// Unlike every other command this moves the motor without waiting for
    /// [`poll`](Self::poll). Any run or timed move is cancelled and the motor
    /// is left idle. Ignored while calibrating.
    pub fn step(&mut self, direction: Direction) -> Result<()> {
        if self.mode.is_calibrating() {
            return Ok(());
        }

        self.mode = Mode::Idle;
        self.direction = None;
        self.position.advance(direction);
        self.energize()
    }

    /// Stop any motion and hold position.
    ///
    /// Homing cannot be stopped, only restarted with [`recal`](Self::recal).
    pub fn stop(&mut self) {
        if self.mode.is_calibrating() {
            return;
        }

        self.direction = None;
        self.mode = Mode::Idle;
    }

    /// Move to `target` in about `duration_ms`, easing in and out.
    ///
    /// The first step uses a constant-rate delay; every later step is timed
    /// from the sine ease curve, clamped to the configured delay limits.
    /// Already being at `target` completes the move immediately. Ignored while
    /// calibrating.
    pub fn goto_position(&mut self, target: Steps, duration_ms: u32) {
        if self.mode.is_calibrating() {
            debug!(
                "{}: go to position {} ignored while calibrating",
                self.name.as_str(),
                target.value()
            );
            return;
        }

        let start = self.position.steps();
        match GotoMove::plan(start, target, duration_ms) {
            Some(goto) => {
                self.direction = Some(goto.direction());
                self.step_delay_us = goto.linear_delay_us();
                self.mode = Mode::Goto(goto);
            }
            None => {
                self.direction = None;
                self.mode = Mode::Idle;
            }
        }

        debug!(
            "{}: go to position {} with step delay of {} us, from current position of {}, with step direction {}",
            self.name.as_str(),
            target.value(),
            self.step_delay_us,
            start.value(),
            self.direction.map_or(0, Direction::sign)
        );
    }

    /// Restart homing.
    pub fn recal(&mut self) {
        self.setup_calibration();
    }

    /// Advance the motor if a step is due and run the mode logic.
    ///
    /// This function must be called as frequently as possible, at least
    /// once per step delay, preferably as part of the main loop.
    ///
    /// # Errors
    ///
    /// Returns `MotorError::PinError` if a coil or the sensor fails. The
    /// position has already been updated by then.
    pub fn poll(&mut self) -> Result<()> {
        let now = self.clock.now_micros();

        if let Some(direction) = self.direction {
            if now.wrapping_sub(self.last_step_us) > self.step_delay_us {
                self.last_step_us = now;
                self.position.advance(direction);
                self.energize()?;
                trace!(
                    "{}: step to {} at {} us",
                    self.name.as_str(),
                    self.position.steps().value(),
                    now
                );
            }
        }

        match self.mode {
            Mode::Calibrating => self.check_home_sensor()?,
            Mode::Goto(goto) => self.update_goto(goto),
            Mode::Idle | Mode::Running => {}
        }

        Ok(())
    }

    /// Get current position in micro-steps from home.
    #[inline]
    pub fn position(&self) -> Steps {
        self.position.steps()
    }

    /// Get current position in microdegrees from home.
    #[inline]
    pub fn position_microdegrees(&self) -> i64 {
        self.geometry.steps_to_microdegrees(self.position.steps())
    }

    /// Whether the homing sweep is in progress.
    #[inline]
    pub fn is_calibrating(&self) -> bool {
        self.mode.is_calibrating()
    }

    /// Whether a timed move is in progress.
    #[inline]
    pub fn is_goto_active(&self) -> bool {
        self.mode.goto().is_some()
    }

    /// Whether the motor will step on the next due poll.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.direction.is_some()
    }

    /// Get the active mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Direction of the next timed step.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Target of the active timed move.
    #[inline]
    pub fn target_position(&self) -> Option<Steps> {
        self.mode.goto().map(|goto| goto.target)
    }

    /// Current minimum delay between timed steps.
    #[inline]
    pub fn step_delay_us(&self) -> u32 {
        self.step_delay_us
    }

    /// Upper travel bound in micro-steps.
    #[inline]
    pub fn max_position(&self) -> u32 {
        self.geometry.max_position
    }

    /// Angular size of one micro-step.
    #[inline]
    pub fn microdegrees_per_step(&self) -> u32 {
        self.geometry.microdegrees_per_step
    }

    /// Get the travel geometry.
    #[inline]
    pub fn geometry(&self) -> &TravelGeometry {
        &self.geometry
    }

    /// Get the timing constants.
    #[inline]
    pub fn timing(&self) -> &StepTiming {
        &self.timing
    }

    /// Get the motor name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Dump the derived parameters at debug level.
    ///
    /// Call once diagnostics are up, construction itself stays silent.
    pub fn log_parameters(&self) {
        debug!(
            "{}: max position {}, {} udeg/step, step delay {} us, mode {}",
            self.name.as_str(),
            self.geometry.max_position,
            self.geometry.microdegrees_per_step,
            self.step_delay_us,
            self.mode.name()
        );
    }

    /// Give back the pins and clock.
    pub fn release(self) -> ([COIL; 4], SENSOR, CLOCK) {
        (self.coils, self.sensor, self.clock)
    }

    fn setup_calibration(&mut self) {
        self.position.reset();
        self.direction = Some(Direction::Backward);
        self.step_delay_us = self
            .geometry
            .step_delay_us(self.timing.calibration_speed)
            .unwrap_or(u32::MAX);
        self.mode = Mode::Calibrating;
    }

    fn check_home_sensor(&mut self) -> Result<()> {
        let tripped = self.sensor.is_low().map_err(|_| MotorError::PinError)?;
        if !tripped {
            return Ok(());
        }

        // The sweep went negative from wherever it began; go back there.
        let return_target = -self.position.steps();
        self.position.reset();
        self.mode = Mode::Idle;
        self.goto_position(return_target, self.timing.homing_return_ms);

        info!(
            "{}: calibration finished, returning to {}",
            self.name.as_str(),
            return_target.value()
        );
        Ok(())
    }

    fn update_goto(&mut self, goto: GotoMove) {
        let position = self.position.steps();

        if goto.is_reached(position) {
            self.mode = Mode::Idle;
            self.direction = None;
            info!(
                "{}: go to position {} reached",
                self.name.as_str(),
                goto.target.value()
            );
        } else if self.direction.is_none() {
            // Stopped at a travel edge short of the target.
            self.mode = Mode::Idle;
            warn!(
                "{}: go to position {} halted at {}",
                self.name.as_str(),
                goto.target.value(),
                position.value()
            );
        } else {
            let eased_us = goto.eased_delay_us(position);
            if !self.timing.contains_delay(eased_us) {
                warn!(
                    "{}: step delay {} us limited to [{}, {}]",
                    self.name.as_str(),
                    eased_us,
                    self.timing.min_delay_us,
                    self.timing.max_delay_us
                );
            }
            self.step_delay_us = self.timing.clamp_delay(eased_us);
        }
    }

    /// Write the coil pattern for the current position.
    ///
    /// Outside homing, a position on or past either travel bound is clamped,
    /// motion stops and the coils keep their previous pattern.
    fn energize(&mut self) -> Result<()> {
        if !self.mode.is_calibrating() {
            if let Some(edge) = self.position.clamp_to_travel() {
                self.direction = None;
                if self.mode == Mode::Running {
                    self.mode = Mode::Idle;
                }
                warn!(
                    "{}: reached the {} edge, position {}",
                    self.name.as_str(),
                    edge.name(),
                    self.position.steps().value()
                );
                return Ok(());
            }
        }

        let position = self.position.steps().value();
        for (line, coil) in self.coils.iter_mut().enumerate() {
            let state = PinState::from(self.geometry.pattern.is_energized(position, line));
            coil.set_state(state).map_err(|_| MotorError::PinError)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SimulatedClock;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType;

    /// Output pin that only remembers its level.
    #[derive(Debug, Default)]
    struct LevelPin(bool);

    impl ErrorType for LevelPin {
        type Error = Infallible;
    }

    impl OutputPin for LevelPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    /// Sensor stuck at one level.
    struct FixedSensor(bool);

    impl ErrorType for FixedSensor {
        type Error = Infallible;
    }

    impl InputPin for FixedSensor {
        fn is_high(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&mut self) -> core::result::Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    fn coils() -> [LevelPin; 4] {
        Default::default()
    }

    #[test]
    fn test_construction_starts_homing() {
        let clock = SimulatedClock::new();
        let motor =
            StepperMotor::new(coils(), FixedSensor(true), &clock, 180, SteppingStyle::Full)
                .unwrap();

        assert!(motor.is_calibrating());
        assert_eq!(motor.position(), Steps(0));
        assert_eq!(motor.direction(), Some(Direction::Backward));
        assert_eq!(motor.max_position(), 1024);
        // 175781 / 25
        assert_eq!(motor.step_delay_us(), 7031);
    }

    #[test]
    fn test_zero_angle_rejected() {
        let clock = SimulatedClock::new();
        let result = StepperMotor::new(coils(), FixedSensor(true), &clock, 0, SteppingStyle::Full);
        assert!(result.is_err());
    }

    #[test]
    fn test_commands_ignored_while_homing() {
        let clock = SimulatedClock::new();
        let mut motor =
            StepperMotor::new(coils(), FixedSensor(true), &clock, 180, SteppingStyle::Half)
                .unwrap();

        motor.run(DegreesPerSec(90));
        motor.step(Direction::Forward).unwrap();
        motor.goto_position(Steps(100), 1000);
        motor.stop();

        assert!(motor.is_calibrating());
        assert_eq!(motor.position(), Steps(0));
        assert_eq!(motor.direction(), Some(Direction::Backward));
    }

    #[test]
    fn test_homing_sweeps_negative_without_clamping() {
        let clock = SimulatedClock::new();
        let mut motor =
            StepperMotor::new(coils(), FixedSensor(true), &clock, 180, SteppingStyle::Full)
                .unwrap();

        for _ in 0..5 {
            clock.advance(motor.step_delay_us() + 1);
            motor.poll().unwrap();
        }

        assert_eq!(motor.position(), Steps(-5));
        assert!(motor.is_calibrating());
    }

    #[test]
    fn test_coil_levels_follow_pattern() {
        let clock = SimulatedClock::new();
        let mut motor =
            StepperMotor::new(coils(), FixedSensor(false), &clock, 180, SteppingStyle::Full)
                .unwrap();
        // Sensor already low: homing ends on the first poll with nowhere to go.
        motor.poll().unwrap();
        assert_eq!(motor.mode(), Mode::Idle);

        motor.step(Direction::Forward).unwrap();
        motor.step(Direction::Forward).unwrap();

        let (coils, _, _) = motor.release();
        // Position 2 → 0b1100
        let levels: [bool; 4] = [coils[0].0, coils[1].0, coils[2].0, coils[3].0];
        assert_eq!(levels, [false, false, true, true]);
    }
}
