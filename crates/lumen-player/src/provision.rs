//! Provisioning console commands
//!
//! Text commands for the factory record, one per line:
//!
//! ```text
//! factory led_number get
//! factory led_number set <count>
//! factory rgbw get|on|off
//! ```

use core::fmt::Write as _;

use embedded_storage::nor_flash::NorFlash;
use heapless::String;

use crate::factory::{FactoryError, FactoryStore};

pub const REPLY_CAPACITY: usize = 64;

pub type Reply = String<REPLY_CAPACITY>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionCommand {
    GetLedLength,
    SetLedLength(u32),
    GetRgbw,
    SetRgbw(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandError {
    Unknown,
    MissingArgument,
    InvalidNumber,
}

impl CommandError {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown command",
            Self::MissingArgument => "missing argument",
            Self::InvalidNumber => "expected a decimal u32",
        }
    }
}

impl ProvisionCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_ascii_whitespace();
        if words.next() != Some("factory") {
            return Err(CommandError::Unknown);
        }

        let command = match (words.next(), words.next()) {
            (Some("led_number"), Some("get")) => Self::GetLedLength,
            (Some("led_number"), Some("set")) => {
                let value = words.next().ok_or(CommandError::MissingArgument)?;
                let count = value.parse().map_err(|_| CommandError::InvalidNumber)?;
                Self::SetLedLength(count)
            }
            (Some("rgbw"), Some("get")) => Self::GetRgbw,
            (Some("rgbw"), Some("on")) => Self::SetRgbw(true),
            (Some("rgbw"), Some("off")) => Self::SetRgbw(false),
            (Some("led_number" | "rgbw"), None) => return Err(CommandError::MissingArgument),
            _ => return Err(CommandError::Unknown),
        };

        if words.next().is_some() {
            return Err(CommandError::Unknown);
        }
        Ok(command)
    }

    /// Run the command against the factory record and format the console reply
    pub fn execute<F: NorFlash>(self, store: &mut FactoryStore<F>) -> Reply {
        let mut reply = Reply::new();
        let written = match self {
            Self::GetLedLength => match store.read() {
                Ok(identity) => write!(reply, "LED number: {}", identity.led_length),
                Err(err) => write!(reply, "error: failed to read memory ({:?})", err),
            },
            Self::GetRgbw => match store.read() {
                Ok(identity) => write!(reply, "RGBW option: {}", on_off(identity.rgbw)),
                Err(err) => write!(reply, "error: failed to read memory ({:?})", err),
            },
            Self::SetLedLength(count) => match store.set_led_length(count) {
                Ok(identity) => write!(reply, "OK:{}", identity.led_length),
                Err(err) => write_failure(&mut reply, err),
            },
            Self::SetRgbw(rgbw) => match store.set_rgbw(rgbw) {
                Ok(identity) => write!(reply, "OK:{}", u8::from(identity.rgbw)),
                Err(err) => write_failure(&mut reply, err),
            },
        };
        if written.is_err() {
            log::warn!("provision: reply truncated");
        }
        reply
    }
}

/// Parse and run one console line
pub fn run_line<F: NorFlash>(store: &mut FactoryStore<F>, line: &str) -> Reply {
    match ProvisionCommand::parse(line) {
        Ok(command) => {
            log::info!("provision: {:?}", command);
            command.execute(store)
        }
        Err(err) => {
            let mut reply = Reply::new();
            let _ = write!(reply, "error: {}", err.as_str());
            reply
        }
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn write_failure(reply: &mut Reply, err: FactoryError) -> core::fmt::Result {
    match err {
        FactoryError::TooManyLeds(count) => {
            write!(reply, "error: {} LEDs is above the supported maximum", count)
        }
        FactoryError::Storage(err) => write!(reply, "error: failed to write memory ({:?})", err),
    }
}
