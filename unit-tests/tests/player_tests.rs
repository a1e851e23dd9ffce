//! Player driven end to end through the render loop.

use lumen_player::{
    Attribute, InputEvent, Mode, PersistedContext, Player, RenderLoop, Rgb, handle_event,
    write_attribute,
};
use tests::RecordingDriver;

const STRIP_LEN: usize = 14;

fn player() -> Player {
    let player = Player::new(PersistedContext::default());
    player.take_save_request();
    player
}

// -----------------------------------------------------------------------------
// Custom hue
// -----------------------------------------------------------------------------

#[test]
fn custom_mode_hue_steps_change_the_frame() {
    let player = player();
    player.set_mode(Mode::Custom as u32);
    player.set_brightness(100);
    assert_eq!(player.color(), 0xFF0000);

    let mut render = RenderLoop::<_, 64>::new(&player, RecordingDriver::default(), STRIP_LEN);
    render.render_frame();
    let first = render.driver().last_frame().unwrap().to_vec();
    assert_eq!(first.len(), STRIP_LEN);
    assert!(first.iter().all(|p| *p == Rgb { r: 255, g: 0, b: 0 }));

    for _ in 0..3 {
        player.increment_color(255);
    }
    assert_eq!(player.context().color_index[Mode::Custom.index()], 2250);
    assert_eq!(player.color(), 0xFF3D00);

    render.render_frame();
    let second = render.driver().last_frame().unwrap();
    assert_ne!(first.as_slice(), second);
    assert!(second.iter().all(|p| *p == Rgb { r: 255, g: 61, b: 0 }));
}

// -----------------------------------------------------------------------------
// Save requests
// -----------------------------------------------------------------------------

#[test]
fn same_resolved_color_does_not_rearm_save() {
    let player = player();
    player.set_mode(Mode::WhiteWarm as u32);
    assert!(player.take_save_request());

    player.set_color(0x00AB_CDEF);
    assert!(!player.take_save_request());
    player.set_color(0x00AB_CDEF);
    assert!(!player.take_save_request());
}

#[test]
fn out_of_range_modes_select_white_cold() {
    let player = player();
    for raw in [4, 5, 17, u32::MAX] {
        player.set_mode(Mode::Rainbow as u32);
        player.set_mode(raw);
        assert_eq!(player.mode(), Mode::WhiteCold);
    }
}

// -----------------------------------------------------------------------------
// Rainbow
// -----------------------------------------------------------------------------

#[test]
fn rainbow_masks_disable_channels() {
    let player = player();
    player.set_mode(Mode::Rainbow as u32);
    player.set_brightness(100);

    let mut render = RenderLoop::<_, 64>::new(&player, RecordingDriver::default(), STRIP_LEN);
    render.render_frame();
    let frame = render.driver().last_frame().unwrap();
    assert!(frame.iter().any(|p| p.r > 0));
    assert!(frame.iter().any(|p| p.g > 0));
    assert!(frame.iter().any(|p| p.b > 0));

    let channels: [fn(&Rgb) -> u8; 3] = [|p| p.r, |p| p.g, |p| p.b];
    for channel in channels {
        player.increment_color(255);
        for _ in 0..STRIP_LEN {
            render.render_frame();
            let frame = render.driver().last_frame().unwrap();
            assert!(frame.iter().all(|p| channel(p) == 0));
        }
    }
}

#[test]
fn driver_failure_skips_the_tick() {
    let player = player();
    let mut render = RenderLoop::<_, 64>::new(
        &player,
        RecordingDriver {
            fail: true,
            ..RecordingDriver::default()
        },
        STRIP_LEN,
    );
    render.render_frame();
    render.render_frame();
    assert!(render.driver().frames.is_empty());
}

// -----------------------------------------------------------------------------
// Boundary adapters
// -----------------------------------------------------------------------------

#[test]
fn touch_and_attributes_share_state() {
    let player = player();

    handle_event(&player, InputEvent::NextMode);
    handle_event(&player, InputEvent::NextMode);
    assert_eq!(player.mode(), Mode::Custom);

    write_attribute(&player, Attribute::Brightness, &[95]).unwrap();
    handle_event(&player, InputEvent::NextBrightness);
    assert_eq!(player.brightness(), 10);

    let context = player.context();
    assert_eq!(context.mode, 2);
    assert_eq!(context.brightness, 10);
    assert!(player.take_save_request());
}

// -----------------------------------------------------------------------------
// Concurrent setters
// -----------------------------------------------------------------------------

#[test]
fn concurrent_increments_keep_context_consistent() {
    const THREADS: usize = 4;
    const ROUNDS: usize = 2000;

    let player = player();
    std::thread::scope(|scope| {
        for _ in 0..THREADS {
            scope.spawn(|| {
                for _ in 0..ROUNDS {
                    player.increment_brightness(10);
                    player.increment_mode();
                    player.increment_color(255);
                }
            });
        }
    });

    let context = player.context();
    assert_eq!(context.brightness, u32::from(player.brightness()));
    assert_eq!(context.mode, player.mode() as u32);
    assert!(player.brightness() <= 100);

    // Every increment went through: 4 * 2000 mode steps cycle back to the start
    assert_eq!(player.mode(), Mode::WhiteCold);
    // 8000 brightness steps of 10 from 50, restarting from 0 past 100
    assert_eq!(player.brightness(), 50);
}
