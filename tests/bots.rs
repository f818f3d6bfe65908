use rand::SeedableRng;
use rand::rngs::StdRng;

use unobot::action::Action;
use unobot::card::{Card, Color, Rank};
use unobot::state::GameStateView;
use unobot::{
    Bot, GameBuilder, GameError, RandomBot, RuleSet, WildFirstBot, WildLastBot,
};

fn red(value: u8) -> Card {
    Card::number(Color::Red, value)
}

fn blue(value: u8) -> Card {
    Card::number(Color::Blue, value)
}

// Builds a two-player game where seat 0 holds `hand` and the opening card is red 4.
fn view_with_hand(hand: Vec<Card>) -> Result<(GameStateView, Vec<Action>), GameError> {
    let game = GameBuilder::new(2)?
        .with_hands(vec![hand, vec![Card::number(Color::Green, 8)]])
        .with_opening(red(4))
        .build()?;
    Ok((game.state_view(0)?, game.legal_actions(0)?))
}

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn wild_first_plays_wild_and_names_common_color() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![blue(1), Card::wild(), blue(4), red(7)])?;
    let mut bot = WildFirstBot::new(rng(1));
    let chosen = bot.choose_action(&state, &legal);
    assert_eq!(chosen, Action::Play(Card::wild()));
    assert_eq!(bot.choose_color(&state, Card::wild()), Color::Blue);
    Ok(())
}

#[test]
fn wild_first_draws_when_nothing_fits() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![blue(1), Card::number(Color::Green, 2)])?;
    let mut bot = WildFirstBot::new(rng(2));
    assert_eq!(bot.choose_action(&state, &legal), Action::Draw);
    Ok(())
}

#[test]
fn wild_last_prefers_non_wild_plays() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![Card::wild(), red(1), blue(4), blue(9)])?;
    for seed in 0..20 {
        let mut bot = WildLastBot::new(rng(seed));
        let chosen = bot.choose_action(&state, &legal);
        assert!(matches!(chosen, Action::Play(card) if !card.is_wild()));
        assert!(legal.contains(&chosen));
    }
    Ok(())
}

#[test]
fn wild_last_keeps_a_lone_wild() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![Card::wild(), blue(1)])?;
    let mut bot = WildLastBot::new(rng(3));
    assert_eq!(bot.choose_action(&state, &legal), Action::Draw);
    Ok(())
}

#[test]
fn wild_last_spends_one_of_several_wilds() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![Card::wild(), Card::wild_draw_four(), blue(1)])?;
    let mut bot = WildLastBot::new(rng(4));
    let chosen = bot.choose_action(&state, &legal);
    assert!(matches!(chosen, Action::Play(card) if card.is_wild()));
    Ok(())
}

#[test]
fn wild_last_plays_last_card_even_if_wild() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![Card::wild_draw_four()])?;
    let mut bot = WildLastBot::new(rng(5));
    assert_eq!(
        bot.choose_action(&state, &legal),
        Action::Play(Card::wild_draw_four())
    );
    Ok(())
}

#[test]
fn drawn_card_decisions_follow_policy() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_rules(RuleSet {
            draw_and_play: true,
            ..RuleSet::default()
        })
        .with_hands(vec![vec![blue(1), blue(2)], vec![blue(3)]])
        .with_opening(red(4))
        .with_deck(vec![Card::wild()])
        .build()?;
    game.apply_action(0, Action::Draw, None)?;
    let state = game.state_view(0)?;
    let legal = game.legal_actions(0)?;
    assert_eq!(legal, vec![Action::Play(Card::wild()), Action::Pass]);

    let mut wild_last = WildLastBot::new(rng(6));
    assert_eq!(wild_last.choose_action(&state, &legal), Action::Pass);
    let mut wild_first = WildFirstBot::new(rng(6));
    assert_eq!(
        wild_first.choose_action(&state, &legal),
        Action::Play(Card::wild())
    );
    Ok(())
}

#[test]
fn random_bot_plays_whenever_something_fits() -> Result<(), GameError> {
    let (state, legal) = view_with_hand(vec![red(1), blue(4), Card::wild(), blue(9)])?;
    let mut bot = RandomBot::new(rng(7));
    let mut seen = Vec::new();
    for _ in 0..100 {
        let chosen = bot.choose_action(&state, &legal);
        assert!(chosen.is_play());
        assert!(legal.contains(&chosen));
        if !seen.contains(&chosen) {
            seen.push(chosen);
        }
        assert!(bot.choose_color(&state, Card::wild()).is_suit());
    }
    assert_eq!(seen.len(), 3);

    let (state, legal) = view_with_hand(vec![blue(1), blue(9)])?;
    assert_eq!(bot.choose_action(&state, &legal), Action::Draw);
    Ok(())
}

#[test]
fn random_bot_sometimes_keeps_a_drawn_card() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_rules(RuleSet {
            draw_and_play: true,
            ..RuleSet::default()
        })
        .with_hands(vec![vec![blue(1), blue(2)], vec![blue(3)]])
        .with_opening(red(4))
        .with_deck(vec![red(9)])
        .build()?;
    game.apply_action(0, Action::Draw, None)?;
    let state = game.state_view(0)?;
    let legal = game.legal_actions(0)?;
    let mut bot = RandomBot::new(rng(8));
    let choices: Vec<Action> = (0..64).map(|_| bot.choose_action(&state, &legal)).collect();
    assert!(choices.contains(&Action::Pass));
    assert!(choices.contains(&Action::Play(red(9))));
    Ok(())
}

#[test]
fn step_asks_first_player_to_name_opening_wild_color() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_hands(vec![vec![blue(1), blue(6), red(2)], vec![blue(3)]])
        .with_opening(Card::wild())
        .build()?;
    let mut bots = vec![WildFirstBot::new(rng(10)), WildFirstBot::new(rng(11))];
    let event = game.step(&mut bots)?;
    assert_eq!(event, unobot::TurnEvent::ColorChosen { player: 0, color: Color::Blue });
    assert_eq!(game.current_player(), 0);
    assert_eq!(game.turns(), 0);
    assert_eq!(
        game.legal_actions(0)?,
        vec![Action::Play(blue(1)), Action::Play(blue(6)), Action::Draw]
    );
    Ok(())
}

/// Always tries to play a card it does not hold.
struct CheatingBot;

impl Bot for CheatingBot {
    fn choose_action(&mut self, _state: &GameStateView, _legal: &[Action]) -> Action {
        Action::Play(Card::new(Color::Red, Rank::Skip))
    }

    fn choose_color(&mut self, _state: &GameStateView, _card: Card) -> Color {
        Color::Wild
    }
}

#[test]
fn step_fails_fast_on_illegal_bot_action() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_hands(vec![vec![blue(1)], vec![blue(3)]])
        .with_opening(red(4))
        .build()?;
    let mut bots: Vec<Box<dyn Bot>> = vec![Box::new(CheatingBot), Box::new(CheatingBot)];
    match game.step(&mut bots) {
        Err(GameError::IllegalMove(illegal)) => {
            assert_eq!(illegal.player, 0);
            assert_eq!(illegal.legal, vec![Action::Draw]);
        }
        other => panic!("expected an illegal move, got {other:?}"),
    }
    assert_eq!(game.turns(), 0);
    assert_eq!(game.hand(0)?.len(), 1);
    Ok(())
}

#[test]
fn step_rejects_wild_color_from_bot() -> Result<(), GameError> {
    let mut game = GameBuilder::new(2)?
        .with_hands(vec![vec![Card::wild(), blue(1)], vec![blue(3)]])
        .with_opening(red(4))
        .build()?;
    let mut bots: Vec<Box<dyn Bot>> = vec![
        Box::new(WildFirstBot::new(rng(8))),
        Box::new(WildFirstBot::new(rng(9))),
    ];
    game.step(&mut bots)?;
    assert_eq!(game.top_card()?, Card::wild());
    assert_eq!(game.active_color(), Color::Blue);

    let mut game = GameBuilder::new(2)?
        .with_hands(vec![vec![Card::wild(), blue(1)], vec![blue(3)]])
        .with_opening(red(4))
        .build()?;
    struct WildBot;
    impl Bot for WildBot {
        fn choose_action(&mut self, _state: &GameStateView, _legal: &[Action]) -> Action {
            Action::Play(Card::wild())
        }
        fn choose_color(&mut self, _state: &GameStateView, _card: Card) -> Color {
            Color::Wild
        }
    }
    let mut bots = vec![WildBot, WildBot];
    assert_eq!(game.step(&mut bots), Err(GameError::InvalidColor(Color::Wild)));
    Ok(())
}

#[test]
fn ten_random_bots_finish_without_exhausting_the_deck() -> Result<(), GameError> {
    for seed in 0..100 {
        let mut game = GameBuilder::new(10)?.with_seed(seed).build()?;
        let mut bots: Vec<RandomBot<StdRng>> =
            (0..10).map(|seat| RandomBot::new(rng(seed * 16 + seat))).collect();
        let summary = game.play_game(&mut bots)?;
        assert!(summary.winner.is_some());
        assert_eq!(game.card_count(), 108);
    }
    Ok(())
}

#[test]
fn full_games_between_strategies_terminate_with_a_winner() -> Result<(), GameError> {
    for seed in 0..30 {
        let mut game = GameBuilder::new(3)?.with_seed(seed).build()?;
        let mut bots: Vec<Box<dyn Bot>> = vec![
            Box::new(RandomBot::new(rng(seed))),
            Box::new(WildFirstBot::new(rng(seed + 100))),
            Box::new(WildLastBot::new(rng(seed + 200))),
        ];
        let summary = game.play_game(&mut bots)?;
        let winner = summary.winner.expect("non-adversarial bots always finish");
        assert_eq!(summary.final_hand_sizes[winner], 0);
        assert_eq!(game.card_count(), 108);
        assert!(summary.turns > 0);
    }
    Ok(())
}
