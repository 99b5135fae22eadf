use std::collections::HashSet;

use based_snake::config::{GameConfig, GridSize};
use based_snake::engine::{Engine, GameObserver, GameOverReason, GameStatus, StepOutcome};
use based_snake::input::Direction;
use based_snake::snake::Position;

#[derive(Default)]
struct CollectCounter {
    collected: usize,
}

impl GameObserver for CollectCounter {
    fn token_collected(&mut self) {
        self.collected += 1;
    }
}

#[test]
fn token_on_path_is_collected_on_fifth_tick() {
    let mut engine = Engine::from_parts(GameConfig::default(), Position { x: 15, y: 10 }, 42)
        .expect("default layout with a free token cell");
    let mut counter = CollectCounter::default();

    for _ in 0..4 {
        assert_eq!(engine.step_with(&mut counter), StepOutcome::Moved);
        assert_eq!(engine.state().snake.len(), 3);
    }
    assert_eq!(engine.state().score, 0);

    assert_eq!(engine.step_with(&mut counter), StepOutcome::TokenCollected);

    let state = engine.state();
    assert_eq!(state.snake.head(), Position { x: 15, y: 10 });
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 4);
    assert_eq!(counter.collected, 1);
    assert!(!state.snake.occupies(state.token.position));
    assert!(state.token.position.is_within_bounds(GridSize::square(20)));
}

#[test]
fn reversal_request_is_rejected() {
    let mut engine = Engine::from_parts(GameConfig::default(), Position { x: 0, y: 0 }, 1)
        .expect("valid parts");

    assert!(!engine.request_turn(Direction::Left));
    engine.step();

    assert_eq!(engine.state().heading, Direction::Right);
    assert_eq!(engine.state().snake.head(), Position { x: 11, y: 10 });
}

#[test]
fn second_turn_in_one_tick_is_dropped() {
    let mut engine = Engine::from_parts(GameConfig::default(), Position { x: 0, y: 0 }, 1)
        .expect("valid parts");

    assert!(engine.request_turn(Direction::Up));
    assert!(!engine.request_turn(Direction::Left));
    engine.step();

    assert_eq!(engine.state().heading, Direction::Up);
    assert_eq!(engine.state().snake.head(), Position { x: 10, y: 9 });
    assert_eq!(engine.state().status(), GameStatus::Running);
}

#[test]
fn leaving_the_left_edge_ends_the_game_without_moving() {
    let config = GameConfig {
        initial_snake: vec![
            Position { x: 0, y: 5 },
            Position { x: 1, y: 5 },
            Position { x: 2, y: 5 },
        ],
        initial_heading: Direction::Left,
        ..GameConfig::default()
    };
    let mut engine = Engine::from_parts(config, Position { x: 10, y: 10 }, 7).expect("valid parts");
    let before: Vec<_> = engine.state().snake.segments().copied().collect();

    assert_eq!(
        engine.step(),
        StepOutcome::GameOver(GameOverReason::WallCollision)
    );

    let state = engine.state();
    assert!(state.game_over);
    assert_eq!(state.snake.segments().copied().collect::<Vec<_>>(), before);
    assert_eq!(engine.step(), StepOutcome::Skipped);
}

#[test]
fn reset_after_game_over_restores_a_fresh_game() {
    let mut engine = Engine::from_parts(GameConfig::default(), Position { x: 11, y: 10 }, 3)
        .expect("valid parts");
    engine.step();
    assert_eq!(engine.state().score, 10);

    while !engine.state().game_over {
        engine.step();
    }
    engine.toggle_pause();

    engine.reset();

    let state = engine.state();
    assert_eq!(
        state.snake.segments().copied().collect::<Vec<_>>(),
        vec![
            Position { x: 10, y: 10 },
            Position { x: 9, y: 10 },
            Position { x: 8, y: 10 },
        ]
    );
    assert_eq!(state.score, 0);
    assert!(!state.game_over);
    assert!(!state.is_paused);
    assert_eq!(state.game_over_reason, None);
    assert!(matches!(
        engine.step(),
        StepOutcome::Moved | StepOutcome::TokenCollected
    ));
}

#[test]
fn snake_cells_stay_distinct_while_playing() {
    let mut engine = Engine::new_with_seed(GameConfig::default(), 99).expect("valid config");
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    for tick in 0..300_usize {
        if tick % 3 == 0 {
            engine.request_turn(turns[tick % turns.len()]);
        }
        engine.step();

        let state = engine.state();
        if state.game_over {
            break;
        }
        let cells: HashSet<_> = state.snake.segments().copied().collect();
        assert_eq!(cells.len(), state.snake.len());
        assert!(!state.snake.occupies(state.token.position));
    }
}
