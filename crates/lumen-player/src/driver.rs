//! LED Driver abstraction layer
//!
//! Provides a trait-based abstraction for LED strip drivers,
//! allowing the render loop to be hardware-agnostic.

use crate::color::Rgb;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedError {
    /// The strip rejected or failed to transmit the frame
    WriteFailed,
}

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The render loop is generic over this trait.
pub trait LedDriver {
    /// Write colors to the LED strip.
    ///
    /// `pixels` holds exactly the configured strip length.
    fn write(&mut self, pixels: &[Rgb]) -> Result<(), LedError>;
}
