//! Invariants that must hold after every tick, for any input sequence.

use asteroid_defense::compute::{init_state, tick};
use asteroid_defense::config::GameConfig;
use asteroid_defense::entities::GameStatus;
use asteroid_defense::input::InputSnapshot;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn input_strategy() -> impl Strategy<Value = InputSnapshot> {
    (any::<bool>(), any::<bool>(), any::<bool>())
        .prop_map(|(left, right, fire)| InputSnapshot { left, right, fire })
}

/// Spawning cranked up and asteroids sped up so runs reach the cap and the
/// bottom edge within a few hundred ticks.
fn busy_config() -> GameConfig {
    GameConfig {
        asteroid_spawn_chance: 0.5,
        asteroid_speed: 4.0,
        ..GameConfig::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn state_invariants_hold(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400),
    ) {
        let config = busy_config();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(config);
        let half = config.ship_width / 2.0;

        for (i, input) in inputs.iter().enumerate() {
            let before = state.clone();
            state = tick(&state, input, i as f64 * 16.0, &mut rng);

            prop_assert!(state.obstacles.len() <= config.max_asteroids);
            prop_assert!(state.ship.x >= half && state.ship.x <= config.canvas_width - half);
            prop_assert!(state.explosions.iter().all(|e| e.life > 0));
            prop_assert!(state.high_score >= before.high_score);
            prop_assert!((0.0..=1.0).contains(&state.transition_progress));

            // The cycle never skips a state.
            let allowed = match before.status {
                GameStatus::Playing => {
                    matches!(state.status, GameStatus::Playing | GameStatus::GameOverTransition)
                }
                GameStatus::GameOverTransition => {
                    matches!(state.status, GameStatus::GameOverTransition | GameStatus::GameOverIdle)
                }
                GameStatus::GameOverIdle => {
                    matches!(state.status, GameStatus::GameOverIdle | GameStatus::Playing)
                }
            };
            prop_assert!(allowed, "{:?} -> {:?}", before.status, state.status);

            prop_assert!(state.projectiles.iter().all(|p| p.y + p.height >= 0.0));
        }
    }

    #[test]
    fn score_only_moves_in_reward_steps(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let config = busy_config();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut state = init_state(config);

        for (i, input) in inputs.iter().enumerate() {
            let before = state.score;
            state = tick(&state, input, i as f64 * 16.0, &mut rng);
            if state.score != 0 || before == 0 {
                prop_assert!(state.score >= before);
                prop_assert_eq!((state.score - before) % config.kill_reward, 0);
            }
        }
    }
}
