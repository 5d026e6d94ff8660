//! Simulated homing example.
//!
//! Demonstrates building a motor from TOML configuration, letting it home
//! against a (simulated) limit switch and then running an eased timed move.
//!
//! Hardware is replaced by in-memory pins and a manually advanced clock, so the
//! whole sequence runs instantly.

use coil_stepper::{
    parse_config, Clock, DegreesPerSec, Direction, SimulatedClock, StepperMotor, Steps,
};

/// Coil line that only remembers its level.
struct DemoPin {
    state: bool,
}

impl DemoPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for DemoPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for DemoPin {
    type Error = core::convert::Infallible;
}

/// Limit switch the motor reaches after a fixed number of sensor reads.
struct DemoSwitch {
    reads_left: u32,
}

impl embedded_hal::digital::InputPin for DemoSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.is_low().map(|low| !low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.reads_left = self.reads_left.saturating_sub(1);
        Ok(self.reads_left == 0)
    }
}

impl embedded_hal::digital::ErrorType for DemoSwitch {
    type Error = core::convert::Infallible;
}

type DemoMotor<'a> = StepperMotor<DemoPin, DemoSwitch, &'a SimulatedClock>;

/// Poll with just enough simulated time for one step each time.
fn poll_until_stopped(motor: &mut DemoMotor<'_>, clock: &SimulatedClock) -> u32 {
    let mut steps = 0;
    while motor.is_running() {
        clock.advance(motor.step_delay_us() + 1);
        motor.poll().expect("demo pins never fail");
        steps += 1;
    }
    steps
}

fn coil_bits(motor: DemoMotor<'_>) -> u8 {
    let (coils, _, _) = motor.release();
    coils
        .iter()
        .enumerate()
        .fold(0, |acc, (line, pin)| acc | (u8::from(pin.state) << line))
}

fn main() {
    println!("=== Simulated Homing Example ===\n");

    let toml_content = r#"
[motors.pan]
name = "pan"
max_angle_deg = 180
stepping = "half"
calibration_speed_dps = 30
homing_return_ms = 1000
"#;

    let config = parse_config(toml_content).expect("Failed to parse config");
    let clock = SimulatedClock::new();

    let mut motor = StepperMotor::builder()
        .from_config(&config, "pan")
        .expect("pan is configured")
        .coils([DemoPin::new(), DemoPin::new(), DemoPin::new(), DemoPin::new()])
        .sensor(DemoSwitch { reads_left: 300 })
        .clock(&clock)
        .build()
        .expect("Failed to build motor");

    println!("Motor created: {}", motor.name());
    println!("Travel: 0..={} steps", motor.max_position());
    println!("Step size: {} udeg", motor.microdegrees_per_step());
    println!("Homing step delay: {} us", motor.step_delay_us());
    motor.log_parameters();

    // === Homing ===
    println!("\n=== Homing ===");
    while motor.is_calibrating() {
        clock.advance(motor.step_delay_us() + 1);
        motor.poll().expect("demo pins never fail");
    }
    println!(
        "Sensor tripped; returning to {:?}",
        motor.target_position().map(Steps::value)
    );
    let returned = poll_until_stopped(&mut motor, &clock);
    println!("Back at {} after {} steps", motor.position().value(), returned);

    // === Timed move ===
    println!("\n=== Timed Move ===");
    motor.goto_position(Steps(1500), 2_000);
    let started_us = clock.now_micros();
    let moved = poll_until_stopped(&mut motor, &clock);
    println!(
        "Reached {} in {} steps, {} ms simulated",
        motor.position().value(),
        moved,
        clock.now_micros().wrapping_sub(started_us) / 1000
    );

    // === Continuous run into the far edge ===
    println!("\n=== Run ===");
    motor.run(DegreesPerSec(90));
    poll_until_stopped(&mut motor, &clock);
    println!("Stopped at the far edge: {}", motor.position().value());

    motor.step(Direction::Backward).expect("demo pins never fail");
    println!("One step back: {}", motor.position().value());
    println!("Coils: {:04b}", coil_bits(motor));
}
