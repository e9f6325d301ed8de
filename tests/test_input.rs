use asteroid_defense::input::*;

#[test]
fn nothing_held_initially() {
    let keys = HeldKeys::new(None);
    assert_eq!(keys.snapshot(0), InputSnapshot::NONE);
}

#[test]
fn press_and_release_toggle_held_state() {
    let mut keys = HeldKeys::new(None);
    keys.press(Key::ArrowLeft, 1);
    assert!(keys.snapshot(1).left);

    // Without a hold window the key stays down indefinitely.
    assert!(keys.snapshot(10_000).left);

    keys.release(Key::ArrowLeft);
    assert!(!keys.snapshot(10_001).left);
}

#[test]
fn bindings_cover_arrows_letters_and_space() {
    let mut keys = HeldKeys::new(None);
    keys.press(Key::Char('A'), 1);
    keys.press(Key::ArrowRight, 1);
    keys.press(Key::Char(' '), 1);
    assert_eq!(
        keys.snapshot(1),
        InputSnapshot { left: true, right: true, fire: true }
    );
}

#[test]
fn letter_case_is_ignored() {
    let mut keys = HeldKeys::new(None);
    keys.press(Key::Char('d'), 1);
    keys.release(Key::Char('D'));
    assert!(!keys.snapshot(1).right);
}

#[test]
fn unbound_keys_do_nothing() {
    let mut keys = HeldKeys::new(None);
    keys.press(Key::Char('x'), 1);
    assert_eq!(keys.snapshot(1), InputSnapshot::NONE);
    assert!(keys.is_held(Key::Char('x'), 1));
}

#[test]
fn hold_window_expires_stale_presses() {
    let mut keys = HeldKeys::new(Some(4));
    keys.press(Key::Char(' '), 10);
    assert!(keys.snapshot(14).fire);
    assert!(!keys.snapshot(15).fire);

    // A repeat refreshes it.
    keys.press(Key::Char(' '), 15);
    assert!(keys.snapshot(19).fire);
}

#[test]
fn release_overrides_hold_window() {
    let mut keys = HeldKeys::new(Some(4));
    keys.press(Key::ArrowLeft, 10);
    keys.release(Key::ArrowLeft);
    assert!(!keys.snapshot(10).left);
}
