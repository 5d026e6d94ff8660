//! Simulated hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::convert::Infallible;
use std::rc::Rc;

use coil_stepper::{SimulatedClock, StepperMotor, SteppingStyle};
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

/// Levels of all four coils plus a write counter, shared with the test.
#[derive(Debug, Clone, Default)]
pub struct CoilBank {
    levels: Rc<RefCell<[bool; 4]>>,
    writes: Rc<Cell<usize>>,
}

impl CoilBank {
    /// Current coil levels as a pattern nibble (bit n = coil n).
    pub fn bits(&self) -> u8 {
        self.levels
            .borrow()
            .iter()
            .enumerate()
            .fold(0, |acc, (line, &high)| acc | (u8::from(high) << line))
    }

    /// Number of individual pin writes so far.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }

    /// Four output pins backed by this bank.
    pub fn lines(&self) -> [CoilLine; 4] {
        [0, 1, 2, 3].map(|index| CoilLine {
            index,
            bank: self.clone(),
        })
    }
}

/// One coil output.
#[derive(Debug)]
pub struct CoilLine {
    index: usize,
    bank: CoilBank,
}

impl ErrorType for CoilLine {
    type Error = Infallible;
}

impl OutputPin for CoilLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.bank.levels.borrow_mut()[self.index] = false;
        self.bank.writes.set(self.bank.writes.get() + 1);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.bank.levels.borrow_mut()[self.index] = true;
        self.bank.writes.set(self.bank.writes.get() + 1);
        Ok(())
    }
}

/// Home limit switch, pulled up, reading low while tripped.
#[derive(Debug, Clone, Default)]
pub struct HomeSwitch {
    tripped: Rc<Cell<bool>>,
}

impl HomeSwitch {
    /// Press or release the switch.
    pub fn set_tripped(&self, tripped: bool) {
        self.tripped.set(tripped);
    }
}

impl ErrorType for HomeSwitch {
    type Error = Infallible;
}

impl InputPin for HomeSwitch {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.tripped.get())
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.tripped.get())
    }
}

/// Motor wired to simulated hardware and a borrowed clock.
pub type TestMotor<'a> = StepperMotor<CoilLine, HomeSwitch, &'a SimulatedClock>;

/// Test-side handles on the simulated hardware.
pub struct Rig {
    pub coils: CoilBank,
    pub switch: HomeSwitch,
}

/// Build a motor on simulated hardware. It starts homing.
pub fn motor(
    clock: &SimulatedClock,
    max_angle_deg: u16,
    style: SteppingStyle,
) -> (TestMotor<'_>, Rig) {
    let coils = CoilBank::default();
    let switch = HomeSwitch::default();

    let motor = StepperMotor::builder()
        .name("test")
        .coils(coils.lines())
        .sensor(switch.clone())
        .clock(clock)
        .max_angle(max_angle_deg)
        .stepping(style)
        .build()
        .expect("valid test motor");

    (motor, Rig { coils, switch })
}

/// Let just over one step delay pass, then poll.
pub fn tick(motor: &mut TestMotor<'_>, clock: &SimulatedClock) {
    clock.advance(motor.step_delay_us().saturating_add(1));
    motor.poll().expect("simulated pins never fail");
}

/// Sweep `sweep_steps` backwards, then trip the sensor.
///
/// Leaves the motor at position 0, idle or starting the return move.
pub fn home(motor: &mut TestMotor<'_>, clock: &SimulatedClock, rig: &Rig, sweep_steps: u32) {
    for _ in 0..sweep_steps {
        tick(motor, clock);
    }
    rig.switch.set_tripped(true);
    motor.poll().expect("simulated pins never fail");
    rig.switch.set_tripped(false);
}

/// Home without any sweep and without a return move.
pub fn home_in_place(motor: &mut TestMotor<'_>, clock: &SimulatedClock, rig: &Rig) {
    home(motor, clock, rig, 0);
}

/// Tick until the motor stops stepping; returns the number of ticks.
pub fn tick_until_stopped(
    motor: &mut TestMotor<'_>,
    clock: &SimulatedClock,
    max_ticks: usize,
) -> usize {
    let mut ticks = 0;
    while motor.is_running() && ticks < max_ticks {
        tick(motor, clock);
        ticks += 1;
    }
    ticks
}
