//! TPA3255 class-D amplifier supervisor
//!
//! The amplifier has no control bus. The driver watches the active-low
//! `nFAULT` and `nCLIP_OTW` outputs and drives `nRESET`. When a fault shuts
//! the amplifier down, [`Tpa3255::handle()`] waits for the configured time,
//! pulses `nRESET` low and re-enables it:
//!
//! ```text
//! Ok --fault--> Error --wait--> LowLevel --2 ms--> Waiting --2 ms--> Ok
//! ```
//!
//! `handle()` takes a free-running millisecond timestamp from the caller, so
//! the driver needs no timer of its own.

use crate::{DriverState, Error};
use embedded_hal::digital::{InputPin, OutputPin};

/// Time `nRESET` is held low during recovery
pub const LOW_LEVEL_TIME_MS: u32 = 2;

/// Time after releasing `nRESET` before faults are evaluated again
pub const WAITING_TIME_MS: u32 = 2;

/// Fault recovery state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RecoveryState {
    /// Running, amplifier enabled
    #[default]
    Ok,
    /// Fault seen, waiting before the reset pulse
    Error,
    /// Holding `nRESET` low
    LowLevel,
    /// `nRESET` released, settling
    Waiting,
}

/// Supervisor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tpa3255Config {
    /// Wait between a fault and the reset pulse, 0 disables automatic recovery
    pub re_enable_wait_ms: u32,
}

impl Default for Tpa3255Config {
    fn default() -> Self {
        Self {
            re_enable_wait_ms: 1000,
        }
    }
}

/// TPA3255 supervisor
pub struct Tpa3255<RST, FAULT, CLIP> {
    reset: RST,
    fault: FAULT,
    clip_otw: CLIP,
    config: Tpa3255Config,
    recovery: RecoveryState,
    timer_start_ms: u32,
    was_fault_asserted: bool,
    was_warning_asserted: bool,
    state: DriverState,
}

impl<RST, FAULT, CLIP, E> Tpa3255<RST, FAULT, CLIP>
where
    RST: OutputPin<Error = E>,
    FAULT: InputPin<Error = E>,
    CLIP: InputPin<Error = E>,
{
    /// Create a new supervisor
    ///
    /// # Arguments
    /// * `reset` - `nRESET` output
    /// * `fault` - `nFAULT` input
    /// * `clip_otw` - `nCLIP_OTW` input
    /// * `config` - Recovery timing
    pub const fn new(reset: RST, fault: FAULT, clip_otw: CLIP, config: Tpa3255Config) -> Self {
        Self {
            reset,
            fault,
            clip_otw,
            config,
            recovery: RecoveryState::Ok,
            timer_start_ms: 0,
            was_fault_asserted: false,
            was_warning_asserted: false,
            state: DriverState::Constructed,
        }
    }

    /// Release `nRESET` and start supervising
    ///
    /// # Errors
    ///
    /// Returns [`Error::AlreadyInitialized`] when called twice, or the pin
    /// error.
    pub fn init(&mut self) -> Result<(), Error<E>> {
        self.state.ensure_constructed()?;
        self.reset.set_high().map_err(Error::Pin)?;
        self.recovery = RecoveryState::Ok;
        self.state = DriverState::Initialized;
        Ok(())
    }

    /// Hold the amplifier in reset and stop supervising
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn deinit(&mut self) -> Result<(), Error<E>> {
        self.state.ensure_initialized()?;
        self.reset.set_low().map_err(Error::Pin)?;
        self.recovery = RecoveryState::Ok;
        self.state = DriverState::Constructed;
        Ok(())
    }

    /// Advance the recovery state machine
    ///
    /// Call periodically with a millisecond timestamp; wrap-around is handled.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn handle(&mut self, now_ms: u32) -> Result<(), Error<E>> {
        self.state.ensure_initialized()?;

        if self.config.re_enable_wait_ms == 0 {
            return self.reset.set_high().map_err(Error::Pin);
        }

        let elapsed = now_ms.wrapping_sub(self.timer_start_ms);
        match self.recovery {
            RecoveryState::Ok => {
                if self.is_fault_asserted()? {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("TPA3255 fault asserted");
                    self.timer_start_ms = now_ms;
                    self.recovery = RecoveryState::Error;
                } else {
                    self.reset.set_high().map_err(Error::Pin)?;
                }
            }
            RecoveryState::Error => {
                if elapsed >= self.config.re_enable_wait_ms {
                    self.timer_start_ms = now_ms;
                    self.recovery = RecoveryState::LowLevel;
                }
            }
            RecoveryState::LowLevel => {
                if elapsed >= LOW_LEVEL_TIME_MS {
                    self.timer_start_ms = now_ms;
                    self.recovery = RecoveryState::Waiting;
                } else {
                    self.reset.set_low().map_err(Error::Pin)?;
                }
            }
            RecoveryState::Waiting => {
                if elapsed >= WAITING_TIME_MS {
                    self.recovery = RecoveryState::Ok;
                } else {
                    self.reset.set_high().map_err(Error::Pin)?;
                }
            }
        }

        if self.is_fault_asserted()? {
            self.was_fault_asserted = true;
        }
        if self.is_warning_asserted()? {
            self.was_warning_asserted = true;
        }
        Ok(())
    }

    /// Release `nRESET`
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn enable(&mut self) -> Result<(), Error<E>> {
        self.state.ensure_initialized()?;
        self.reset.set_high().map_err(Error::Pin)
    }

    /// Pull `nRESET` low
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn disable(&mut self) -> Result<(), Error<E>> {
        self.state.ensure_initialized()?;
        self.reset.set_low().map_err(Error::Pin)
    }

    /// Returns `true` while `nFAULT` is low
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn is_fault_asserted(&mut self) -> Result<bool, Error<E>> {
        self.state.ensure_initialized()?;
        self.fault.is_low().map_err(Error::Pin)
    }

    /// Returns `true` while `nCLIP_OTW` is low (clipping or over-temperature
    /// warning)
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotInitialized`] before `init()`, or the pin error.
    pub fn is_warning_asserted(&mut self) -> Result<bool, Error<E>> {
        self.state.ensure_initialized()?;
        self.clip_otw.is_low().map_err(Error::Pin)
    }

    /// Returns `true` if a fault was seen by `handle()` since the last clear
    pub const fn was_fault_asserted(&self) -> bool {
        self.was_fault_asserted
    }

    /// Returns `true` if a warning was seen by `handle()` since the last clear
    pub const fn was_warning_asserted(&self) -> bool {
        self.was_warning_asserted
    }

    /// Clear the latched fault flag
    pub const fn clear_was_fault_asserted(&mut self) {
        self.was_fault_asserted = false;
    }

    /// Clear the latched warning flag
    pub const fn clear_was_warning_asserted(&mut self) {
        self.was_warning_asserted = false;
    }

    /// Current recovery state
    pub const fn recovery_state(&self) -> RecoveryState {
        self.recovery
    }

    /// Current lifecycle state
    pub const fn state(&self) -> DriverState {
        self.state
    }

    /// Consume the driver and return the pins
    pub fn release(self) -> (RST, FAULT, CLIP) {
        (self.reset, self.fault, self.clip_otw)
    }
}
