use proptest::prelude::*;
use proptest::sample::{select, subsequence};
use rand::SeedableRng;
use rand::rngs::StdRng;

use unobot::action::Action;
use unobot::card::{Card, Color, DECK_SIZE, Rank, full_deck};
use unobot::{Bot, Deck, GameBuilder, GameError, RandomBot, RuleSet, WildFirstBot, WildLastBot};

fn bots_for(kinds: &[u8], seed: u64) -> Vec<Box<dyn Bot>> {
    kinds
        .iter()
        .enumerate()
        .map(|(seat, kind)| {
            let rng = StdRng::seed_from_u64(seed.wrapping_add(seat as u64));
            let bot: Box<dyn Bot> = match kind % 3 {
                0 => Box::new(RandomBot::new(rng)),
                1 => Box::new(WildFirstBot::new(rng)),
                _ => Box::new(WildLastBot::new(rng)),
            };
            bot
        })
        .collect()
}

/// Any opening card a game may start on plus two disjoint hands drawn from the
/// rest of the deck.
fn opening_and_hands() -> impl Strategy<Value = (Card, Vec<Card>, Vec<Card>)> {
    let openings: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| c.rank != Rank::WildDrawFour)
        .collect();
    select(openings).prop_flat_map(|opening| {
        let mut rest = full_deck();
        if let Some(pos) = rest.iter().position(|c| *c == opening) {
            rest.remove(pos);
        }
        (Just(opening), subsequence(rest, 2..=24)).prop_map(|(opening, cards)| {
            let split = cards.len() / 2;
            (opening, cards[..split].to_vec(), cards[split..].to_vec())
        })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn cards_are_conserved_through_every_step(
        seed in any::<u64>(),
        kinds in prop::collection::vec(0u8..3, 2..=10),
        draw_and_play in any::<bool>(),
        stacking in any::<bool>(),
    ) {
        let mut game = GameBuilder::new(kinds.len())?
            .with_seed(seed)
            .with_rules(RuleSet { draw_and_play, stacking })
            .with_max_turns(3_000)
            .build()?;
        let mut bots = bots_for(&kinds, seed);
        prop_assert_eq!(game.card_count(), DECK_SIZE);
        while !game.is_finished() {
            game.step(&mut bots)?;
            prop_assert_eq!(game.card_count(), DECK_SIZE);
            prop_assert!(game.current_player() < kinds.len());
        }
    }

    #[test]
    fn legal_plays_are_exactly_the_matching_cards(
        (opening, first, second) in opening_and_hands(),
        named in select(Color::SUITS.to_vec()),
    ) {
        let mut game = GameBuilder::new(2)?
            .with_hands(vec![first, second])
            .with_opening(opening)
            .build()?;
        let current = game.current_player();
        let active_color = if opening.is_wild() {
            game.choose_opening_color(current, named)?;
            named
        } else {
            opening.color
        };
        prop_assert!(game.active_color().is_suit());
        let legal = game.legal_actions(current)?;
        let hand = game.hand(current)?;

        prop_assert_eq!(legal.last(), Some(&Action::Draw));
        for card in hand {
            let fits = card.is_wild() || card.color == active_color || card.rank == opening.rank;
            prop_assert_eq!(legal.contains(&Action::Play(*card)), fits, "card {}", card);
        }
        for (idx, action) in legal.iter().enumerate() {
            prop_assert!(!legal[idx + 1..].contains(action));
            if let Action::Play(card) = action {
                prop_assert!(hand.contains(card));
            }
        }
    }

    #[test]
    fn bot_games_finish_with_a_winner(
        seed in any::<u64>(),
        kinds in prop::collection::vec(0u8..3, 2..=10),
    ) {
        let mut game = GameBuilder::new(kinds.len())?.with_seed(seed).build()?;
        let mut bots = bots_for(&kinds, seed ^ 0xA5A5);
        let summary = game.play_game(&mut bots)?;
        let winner = summary.winner;
        prop_assert!(winner.is_some());
        if let Some(winner) = winner {
            prop_assert_eq!(summary.final_hand_sizes[winner], 0);
            prop_assert_eq!(game.legal_actions(winner)?, Vec::<Action>::new());
        }
        prop_assert_eq!(summary.final_hand_sizes.iter().sum::<usize>() + game.deck().len(), DECK_SIZE);
    }

    #[test]
    fn recycling_keeps_the_top_discard_and_every_other_card(
        discard in subsequence(full_deck(), 2..=60),
        seed in any::<u64>(),
    ) {
        let top = *discard.last().unwrap();
        let mut expected = discard[..discard.len() - 1].to_vec();
        let mut deck = Deck::from_piles(Vec::new(), discard, seed);

        let mut drawn = Vec::new();
        for _ in 0..expected.len() {
            drawn.push(deck.draw()?);
        }
        prop_assert_eq!(deck.reshuffles(), 1);
        prop_assert_eq!(deck.top_of_discard()?, top);
        prop_assert_eq!(deck.discard_len(), 1);
        drawn.sort();
        expected.sort();
        prop_assert_eq!(drawn, expected);
        prop_assert_eq!(deck.draw(), Err(GameError::DeckExhausted));
    }
}
