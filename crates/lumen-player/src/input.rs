//! Touch pad events
//!
//! Maps key presses of the input layer to player actions.

use crate::config::PLAYER;
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    NextMode,
    NextColor,
    NextBrightness,
    /// Long press asking the device to power off
    PowerOff,
}

/// What the caller still has to do after an event was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    None,
    PowerOff,
}

impl InputEvent {
    /// Map an input key code to an event (keys 0, 1, 2 and 21)
    pub const fn from_key(code: u16) -> Option<Self> {
        match code {
            0 => Some(Self::NextMode),
            1 => Some(Self::NextColor),
            2 => Some(Self::NextBrightness),
            21 => Some(Self::PowerOff),
            _ => None,
        }
    }
}

/// Apply a touch event to the player
pub fn handle_event(player: &Player, event: InputEvent) -> InputAction {
    log::info!("input: {:?}", event);
    match event {
        InputEvent::NextMode => player.increment_mode(),
        InputEvent::NextColor => player.increment_color(PLAYER.touch_color_step),
        InputEvent::NextBrightness => player.increment_brightness(PLAYER.touch_brightness_step),
        InputEvent::PowerOff => {
            log::warn!("input: power-off required");
            return InputAction::PowerOff;
        }
    }
    InputAction::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PersistedContext;
    use crate::mode::Mode;

    #[test]
    fn key_codes() {
        assert_eq!(InputEvent::from_key(0), Some(InputEvent::NextMode));
        assert_eq!(InputEvent::from_key(21), Some(InputEvent::PowerOff));
        assert_eq!(InputEvent::from_key(3), None);
    }

    #[test]
    fn events_drive_player() {
        let player = Player::new(PersistedContext::default());

        assert_eq!(handle_event(&player, InputEvent::NextMode), InputAction::None);
        assert_eq!(player.mode(), Mode::WhiteWarm);

        handle_event(&player, InputEvent::NextColor);
        assert_eq!(player.color(), 0xCD5A0A);

        handle_event(&player, InputEvent::NextBrightness);
        assert_eq!(player.brightness(), 60);
    }

    #[test]
    fn power_off_leaves_state() {
        let player = Player::new(PersistedContext::default());
        let context = player.context();
        assert_eq!(
            handle_event(&player, InputEvent::PowerOff),
            InputAction::PowerOff
        );
        assert_eq!(player.context(), context);
    }
}
