use qoxo::{Trainer, TrainingConfig};

/// Random-vs-random tic-tac-toe draws roughly 12.7% of games. A fully
/// exploring agent (ε = 1 with no decay) plays uniformly at random, so the
/// observed draw rate over a long seeded run should land in a loose band
/// around that figure.
#[test]
fn fully_random_self_play_matches_known_draw_rate() {
    let config = TrainingConfig {
        num_episodes: 5_000,
        exploration_rate: 1.0,
        exploration_decay: 1.0,
        seed: Some(2024),
        ..TrainingConfig::default()
    };
    let mut agent = config.build_agent();

    let result = Trainer::new(config).run(&mut agent).unwrap();

    assert!(
        result.draw_percentage > 8.0 && result.draw_percentage < 18.0,
        "draw percentage {:.2}% outside the random-play band",
        result.draw_percentage
    );
}

/// The value table holds every visited position plus the synthetic bootstrap
/// state each non-terminal update materializes (the opponent's mark written
/// over the cell just played). The synthetic boards are mostly unreachable in
/// real play, so the table grows past tic-tac-toe's 5478 reachable positions;
/// it can never exceed the 3^9 = 19683 distinct cell arrangements.
#[test]
fn value_table_growth_is_bounded_by_the_key_space() {
    let config = TrainingConfig {
        num_episodes: 5_000,
        exploration_rate: 1.0,
        exploration_decay: 1.0,
        seed: Some(7),
        ..TrainingConfig::default()
    };
    let mut agent = config.build_agent();

    Trainer::new(config).run(&mut agent).unwrap();

    let states = agent.table().len();
    assert!(states > 5_478, "only {states} states after 5000 episodes");
    assert!(states <= 19_683, "{states} states exceeds the key space");
}

/// Re-running the same seeded schedule with the win counter pointed at the
/// other mark must account for every episode: X wins, O wins, and draws
/// partition the run.
#[test]
fn win_and_draw_counts_partition_the_run() {
    let base = TrainingConfig {
        num_episodes: 200,
        seed: Some(99),
        ..TrainingConfig::default()
    };

    let config_o = base.clone();
    let mut agent_o = config_o.build_agent();
    let result_o = Trainer::new(config_o).run(&mut agent_o).unwrap();

    let config_x = TrainingConfig {
        agent_mark: qoxo::Mark::X,
        ..base
    };
    let mut agent_x = config_x.build_agent();
    let result_x = Trainer::new(config_x).run(&mut agent_x).unwrap();

    assert_eq!(result_o.draws, result_x.draws);
    assert_eq!(
        result_o.agent_wins + result_x.agent_wins + result_o.draws,
        200
    );
}
