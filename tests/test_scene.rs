use asteroid_defense::compute::init_state;
use asteroid_defense::config::GameConfig;
use asteroid_defense::entities::*;
use asteroid_defense::scene::*;

fn texts(frame: &Frame) -> Vec<(&str, Rgba)> {
    frame
        .commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, color, .. } => Some((text.as_str(), *color)),
            _ => None,
        })
        .collect()
}

#[test]
fn pad_score_to_five_digits() {
    assert_eq!(pad_score(0), "00000");
    assert_eq!(pad_score(1200), "01200");
    assert_eq!(pad_score(123456), "123456");
}

#[test]
fn explosion_grows_while_fading() {
    let fresh = Explosion { x: 0.0, y: 0.0, radius: 20.0, life: 30 };
    assert_eq!(explosion_visual(&fresh, 30), (0.0, 1.0));

    let half = Explosion { life: 15, ..fresh.clone() };
    assert_eq!(explosion_visual(&half, 30), (10.0, 0.5));
}

#[test]
fn blink_alpha_stays_in_unit_range() {
    for i in 0..1000 {
        let a = blink_alpha(i as f64 * 7.3);
        assert!((0.0..=1.0).contains(&a));
    }
    assert!((blink_alpha(0.0) - 0.5).abs() < 1e-12);
}

#[test]
fn playing_frame_order() {
    let mut state = init_state(GameConfig::default());
    state.score = 300;
    state.high_score = 1200;
    state.projectiles.push(Projectile { x: 100.0, y: 200.0, width: 4.0, height: 12.0, speed: 8.0 });
    state.obstacles.push(Obstacle { x: 300.0, y: 50.0, width: 40.0, height: 40.0, speed: 0.5 });
    state.explosions.push(Explosion { x: 10.0, y: 10.0, radius: 20.0, life: 15 });

    let frame = compose(&state, 0.0);
    assert_eq!(frame.commands[0], DrawCommand::Clear(BACKGROUND));
    assert_eq!(
        frame.commands[1],
        DrawCommand::Sprite { sprite: SpriteId::Ship, x: 380.0, y: 540.0, width: 40.0, height: 40.0 }
    );
    assert_eq!(
        frame.commands[2],
        DrawCommand::Rect { x: 98.0, y: 200.0, width: 4.0, height: 12.0, color: FOREGROUND }
    );
    assert_eq!(
        frame.commands[3],
        DrawCommand::Sprite { sprite: SpriteId::Asteroid, x: 280.0, y: 30.0, width: 40.0, height: 40.0 }
    );
    assert_eq!(
        frame.commands[4],
        DrawCommand::Circle { x: 10.0, y: 10.0, radius: 10.0, color: EXPLOSION.with_alpha(0.5) }
    );
    assert_eq!(texts(&frame), vec![("SCORE 300", FOREGROUND)]);
    assert_eq!(frame.commands.len(), 6);

    assert_eq!(frame.scoreboard.score, "00300");
    assert_eq!(frame.scoreboard.high_score, "01200");
}

#[test]
fn transition_frame_has_overlay_without_prompt() {
    let mut state = init_state(GameConfig::default());
    state.status = GameStatus::GameOverTransition;
    state.transition_progress = 0.4;
    state.score = 500;

    let frame = compose(&state, 0.0);
    assert!(frame
        .commands
        .contains(&DrawCommand::Overlay(BACKGROUND.with_alpha(0.4))));
    assert_eq!(
        texts(&frame),
        vec![
            ("SCORE 500", FOREGROUND),
            ("GAME OVER", FOREGROUND.with_alpha(0.4)),
            ("FINAL SCORE 500", FOREGROUND.with_alpha(0.4)),
        ]
    );
}

#[test]
fn idle_frame_blinks_restart_prompt() {
    let mut state = init_state(GameConfig::default());
    state.status = GameStatus::GameOverIdle;
    state.transition_progress = 1.0;

    let now = 1234.0;
    let frame = compose(&state, now);
    let prompt = frame
        .commands
        .iter()
        .find_map(|c| match c {
            DrawCommand::Text { text, x, y, color, .. } if text == "PRESS SPACE TO RESTART" => {
                Some((*x, *y, *color))
            }
            _ => None,
        })
        .expect("prompt drawn when idle");
    assert_eq!(prompt, (400.0, 350.0, PROMPT.with_alpha(blink_alpha(now))));
}
