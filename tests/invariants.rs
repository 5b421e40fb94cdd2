//! Property tests over random seeds and action sequences

use proptest::prelude::*;

use track_runner::{Action, EnvConfig, Environment};

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        Just(Action::Left),
        Just(Action::Right),
        Just(Action::Accelerate),
        Just(Action::Brake),
    ]
}

proptest! {
    #[test]
    fn vehicle_stays_in_bounds(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 1..400)) {
        let mut env = Environment::new(EnvConfig::default(), seed).unwrap();
        let width = env.config().width;
        let max_speed = env.config().max_speed;
        for action in actions {
            let (_, _, done) = env.step(action);
            let vehicle = env.vehicle();
            prop_assert!(vehicle.pos.x > 0.0 && vehicle.pos.x < width);
            prop_assert!((0.0..=max_speed).contains(&vehicle.speed));
            if done {
                env.reset();
            }
        }
    }

    #[test]
    fn obstacle_floor_and_recycling(seed in any::<u64>(), actions in prop::collection::vec(action_strategy(), 1..400)) {
        let mut env = Environment::new(EnvConfig::default(), seed).unwrap();
        let height = env.config().height;
        let floor = env.config().min_obstacles;
        prop_assert!(env.obstacles().len() >= floor);
        for action in actions {
            let (_, reward, done) = env.step(action);
            prop_assert!(env.obstacles().len() >= floor);
            prop_assert!(env.obstacles().iter().all(|o| o.y() < height));
            prop_assert!(reward == 1.0 || reward == -10.0);
            if done {
                env.reset();
                prop_assert_eq!(env.obstacles().len(), floor);
            }
        }
    }

    #[test]
    fn integer_actions_match_enum(seed in any::<u64>(), indices in prop::collection::vec(0i64..4, 1..100)) {
        let mut by_index = Environment::new(EnvConfig::default(), seed).unwrap();
        let mut by_enum = Environment::new(EnvConfig::default(), seed).unwrap();
        for index in indices {
            let action = Action::try_from(index).unwrap();
            prop_assert_eq!(by_index.step_index(index).unwrap(), by_enum.step(action));
        }
    }

    #[test]
    fn out_of_range_actions_fail(index in prop_oneof![i64::MIN..0, 4i64..i64::MAX]) {
        let mut env = Environment::new(EnvConfig::default(), 0).unwrap();
        prop_assert!(env.step_index(index).is_err());
    }
}

#[test]
fn same_seed_same_episode() {
    let mut a = Environment::new(EnvConfig::default(), 2024).unwrap();
    let mut b = Environment::new(EnvConfig::default(), 2024).unwrap();
    assert_eq!(a.reset(), b.reset());
    for i in 0..500 {
        let action = Action::ALL[i % Action::COUNT];
        assert_eq!(a.step(action), b.step(action));
    }
}

#[test]
fn smaller_track_from_json() {
    let config = EnvConfig::from_json_str(r#"{ "width": 400, "height": 300, "min_obstacles": 6 }"#)
        .unwrap();
    let mut env = Environment::new(config, 11).unwrap();
    let obs = env.reset();
    assert_eq!(obs.car_x, 0.5);
    assert!((obs.car_y - 200.0 / 300.0).abs() < 1e-6);
    assert_eq!(env.obstacles().len(), 6);
    for obstacle in env.obstacles() {
        assert!((100.0..=300.0).contains(&obstacle.x()));
    }
}

#[test]
fn widest_allowed_lateral_step_stays_on_track() {
    let config = EnvConfig {
        lateral_step: 10.0,
        edge_margin: 10.0,
        ..Default::default()
    };
    let width = config.width;
    let mut env = Environment::new(config, 5).unwrap();
    for _ in 0..200 {
        env.step(Action::Left);
        assert!(env.vehicle().pos.x > 0.0);
    }
    for _ in 0..200 {
        env.step(Action::Right);
        assert!(env.vehicle().pos.x < width);
    }
}
