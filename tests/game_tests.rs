//! Game loop driver tests through the public API

use blockfall::core::{
    ConfigError, EngineConfig, Game, GameError, Phase, PieceSource, Randomizer, RandomizerKind,
    Sequence,
};
use blockfall::types::{Command, InputFrame, PieceKind};

fn press(command: Command) -> InputFrame {
    InputFrame::new().with(command)
}

fn narrow_well() -> EngineConfig {
    EngineConfig::from_json_str(&serde_json::json!({ "width": 4, "height": 8 }).to_string())
        .unwrap()
}

#[test]
fn test_same_seed_replays_same_game() {
    let script = [
        press(Command::MoveLeft),
        press(Command::RotateCw),
        InputFrame::new()
            .with(Command::MoveRight)
            .with(Command::HardDrop),
        press(Command::SoftDrop),
        press(Command::HardDrop),
        InputFrame::new(),
    ];

    let mut a = Game::new(EngineConfig::default()).unwrap();
    let mut b = Game::new(EngineConfig::default()).unwrap();
    for _ in 0..3 {
        for frame in script {
            let ra = a.tick(400, frame).unwrap();
            let rb = b.tick(400, frame).unwrap();
            assert_eq!(ra, rb);
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_different_seeds_differ() {
    let mut a = Randomizer::new(RandomizerKind::Bag, 1);
    let mut b = Randomizer::new(RandomizerKind::Bag, 2);
    let seq_a: Vec<PieceKind> = (0..14).map(|_| a.next_kind()).collect();
    let seq_b: Vec<PieceKind> = (0..14).map(|_| b.next_kind()).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn test_config_from_json_sets_board() {
    let json = serde_json::json!({
        "width": 12,
        "height": 16,
        "seed": 5,
        "randomizer": "uniform",
        "gravity": { "base_ms": 800, "step_ms": 50, "floor_ms": 50 }
    });
    let config = EngineConfig::from_json_str(&json.to_string()).unwrap();
    let game = Game::with_source(config, Sequence::repeat(PieceKind::O)).unwrap();

    let snap = game.snapshot();
    assert_eq!((snap.width, snap.height), (12, 16));
    assert_eq!(snap.board.len(), 12 * 16);
    assert_eq!(snap.gravity_interval_ms, 800);
    let active = snap.active.unwrap();
    assert_eq!((active.col, active.row), (5, 0));
    assert_eq!(snap.ghost_row, Some(14));
}

#[test]
fn test_bad_configs_fail_fast() {
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "width": -1 }"#),
        Err(ConfigError::InvalidDimensions { .. })
    ));
    assert!(matches!(
        EngineConfig::from_json_str(r#"{ "line_scores": [0, 100, 150, 200, 250] }"#),
        Err(ConfigError::ScoringNotConvex(_))
    ));
    assert!(matches!(
        EngineConfig::from_json_str("not json"),
        Err(ConfigError::Parse(_))
    ));

    let narrow = EngineConfig {
        width: 2,
        ..EngineConfig::default()
    };
    assert!(matches!(
        Game::new(narrow),
        Err(ConfigError::BoardTooNarrow { .. })
    ));
}

#[test]
fn test_square_slides_to_left_wall() {
    let mut game = Game::with_source(EngineConfig::default(), Sequence::repeat(PieceKind::O)).unwrap();
    let start = game.active().unwrap();
    assert_eq!((start.col, start.row), (4, 0));

    for _ in 0..10 {
        game.tick(0, press(Command::MoveLeft)).unwrap();
    }
    assert_eq!(game.active().unwrap().col, 0);
}

#[test]
fn test_four_line_clear_beats_four_singles() {
    // Vertical bars in every column of a 4-wide well: one four-line clear.
    let mut game = Game::with_source(narrow_well(), Sequence::repeat(PieceKind::I)).unwrap();
    let mut tetris_points = 0;
    for column in 0..4i32 {
        game.tick(0, press(Command::RotateCw)).unwrap();
        // Vertical I sits two columns right of its anchor; anchor starts at 0.
        let shift = column - 2;
        for _ in 0..shift.abs() {
            let step = if shift < 0 {
                Command::MoveLeft
            } else {
                Command::MoveRight
            };
            game.tick(0, press(step)).unwrap();
        }
        let report = game.tick(0, press(Command::HardDrop)).unwrap();
        let lock = report.lock.unwrap();
        tetris_points += lock.score_delta;
        if column < 3 {
            assert_eq!(lock.lines_cleared, 0);
        } else {
            assert_eq!(lock.lines_cleared, 4);
        }
    }
    assert_eq!(tetris_points, 1200);
    assert_eq!(game.lines(), 4);
    assert_eq!(game.board().filled_count(), 0);

    // Horizontal bars fill one row each: four single clears.
    let mut singles = Game::with_source(narrow_well(), Sequence::repeat(PieceKind::I)).unwrap();
    let mut single_points = 0;
    for _ in 0..4 {
        let lock = singles.tick(0, press(Command::HardDrop)).unwrap().lock.unwrap();
        assert_eq!(lock.lines_cleared, 1);
        single_points += lock.score_delta;
    }
    assert_eq!(single_points, 160);
    assert!(tetris_points > single_points);
}

#[test]
fn test_spawn_collision_is_terminal_until_reset() {
    let mut game = Game::with_source(EngineConfig::default(), Sequence::repeat(PieceKind::O)).unwrap();

    let mut locks = 0;
    while !game.is_game_over() {
        let report = game.tick(16, press(Command::HardDrop)).unwrap();
        if report.lock.is_some() {
            locks += 1;
        }
    }
    assert_eq!(locks, 10);
    assert_eq!(game.phase(), Phase::GameOver);

    let frozen = game.snapshot();
    for command in Command::ALL {
        assert_eq!(game.tick(1000, press(command)), Err(GameError::GameOver));
    }
    assert_eq!(game.snapshot(), frozen);

    game.reset();
    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.board().filled_count(), 0);
    assert_eq!(game.score(), 0);
    assert!(game.tick(16, InputFrame::new()).is_ok());
}

#[test]
fn test_gravity_alone_eventually_locks() {
    let mut game = Game::with_source(EngineConfig::default(), Sequence::repeat(PieceKind::T)).unwrap();

    let mut steps = 0;
    let lock = loop {
        let report = game.tick(1000, InputFrame::new()).unwrap();
        assert!(report.gravity_step);
        steps += 1;
        if let Some(lock) = report.lock {
            break lock;
        }
    };

    // 18 rows of fall, then one failed step that locks.
    assert_eq!(steps, 19);
    assert_eq!(lock.kind, PieceKind::T);
    // Gravity steps score nothing.
    assert_eq!(game.score(), 0);
}

#[test]
fn test_level_up_from_lines_speeds_gravity() {
    let config = EngineConfig::from_json_str(
        &serde_json::json!({
            "width": 4,
            "height": 8,
            "progression": { "lines": { "per_level": 2 } }
        })
        .to_string(),
    )
    .unwrap();
    let mut game = Game::with_source(config, Sequence::repeat(PieceKind::I)).unwrap();

    game.tick(0, press(Command::HardDrop)).unwrap();
    assert_eq!(game.level(), 0);
    game.tick(0, press(Command::HardDrop)).unwrap();
    assert_eq!(game.level(), 1);
    assert_eq!(game.gravity_interval_ms(), 920);

    // Paid at level 1 now.
    let lock = game.tick(0, press(Command::HardDrop)).unwrap().lock.unwrap();
    assert_eq!(lock.score_delta, 80);
}
