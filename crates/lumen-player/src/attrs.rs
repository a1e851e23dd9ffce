//! Wireless attribute codec
//!
//! Attribute values travel as little-endian byte buffers: one byte for
//! mode, brightness and speed, three or four bytes for the color.

use heapless::Vec;

use crate::player::Player;

/// Largest encoded attribute value
pub const ATTRIBUTE_MAX_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Mode,
    Color,
    Brightness,
    Speed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeError {
    EmptyValue,
    InvalidLength,
}

fn single_byte(buf: &[u8]) -> Result<u8, AttributeError> {
    match buf {
        [] => Err(AttributeError::EmptyValue),
        [value] => Ok(*value),
        _ => Err(AttributeError::InvalidLength),
    }
}

fn color_value(buf: &[u8]) -> Result<u32, AttributeError> {
    match buf.len() {
        0 => Err(AttributeError::EmptyValue),
        3 | 4 => {
            let mut word = [0u8; 4];
            word[..buf.len()].copy_from_slice(buf);
            Ok(u32::from_le_bytes(word))
        }
        _ => Err(AttributeError::InvalidLength),
    }
}

/// Decode `buf` and apply it to the player. Returns the consumed length.
pub fn write_attribute(
    player: &Player,
    attribute: Attribute,
    buf: &[u8],
) -> Result<usize, AttributeError> {
    match attribute {
        Attribute::Mode => player.set_mode(u32::from(single_byte(buf)?)),
        Attribute::Color => player.set_color(color_value(buf)?),
        Attribute::Brightness => player.set_brightness(single_byte(buf)?),
        Attribute::Speed => player.set_speed(single_byte(buf)?),
    }
    Ok(buf.len())
}

/// Encode the current value of `attribute`
pub fn read_attribute(player: &Player, attribute: Attribute) -> Vec<u8, ATTRIBUTE_MAX_LEN> {
    let color;
    let byte;
    let bytes: &[u8] = match attribute {
        Attribute::Color => {
            color = player.color().to_le_bytes();
            &color
        }
        Attribute::Mode => {
            byte = [player.mode().as_u8()];
            &byte
        }
        Attribute::Brightness => {
            byte = [player.brightness()];
            &byte
        }
        Attribute::Speed => {
            byte = [player.speed()];
            &byte
        }
    };
    Vec::from_slice(bytes).unwrap_or_default()
}
