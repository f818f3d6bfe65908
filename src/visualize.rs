use std::fmt::Write;

use crate::action::{Action, Direction, TurnEvent};
use crate::card::Color;
use crate::state::{GameStateView, GameStatus, TurnPhase};

/// Customize state rendering for CLI visualization.
#[derive(Clone, Copy, Debug)]
pub struct VisualOptions {
    pub show_pile_sizes: bool,
    pub show_hand_indices: bool,
}

impl Default for VisualOptions {
    fn default() -> Self {
        Self {
            show_pile_sizes: true,
            show_hand_indices: true,
        }
    }
}

pub fn render_state(state: &GameStateView) -> String {
    render_state_with_options(state, VisualOptions::default())
}

pub fn render_state_with_options(state: &GameStateView, options: VisualOptions) -> String {
    let mut out = String::new();
    let status = match state.status {
        GameStatus::Ongoing => String::from("Ongoing"),
        GameStatus::Finished { winner } => {
            format!("Finished (winner: Player {winner})")
        }
        GameStatus::TurnLimit => String::from("Stopped (turn limit)"),
    };
    let _ = writeln!(out, "Game status: {status}");
    match state.phase {
        TurnPhase::AwaitingDrawnCard(card) => {
            let _ = writeln!(out, "Drawn card: {card} (play it or pass)");
        }
        TurnPhase::AwaitingOpeningColor => {
            let _ = writeln!(out, "Opening wild: the first player names its color");
        }
        _ => {}
    }
    let direction = match state.direction {
        Direction::Clockwise => "clockwise",
        Direction::CounterClockwise => "counter-clockwise",
    };
    let _ = writeln!(
        out,
        "Current player: {}{}  |  Direction: {direction}",
        state.current_player,
        if state.current_player == state.self_player {
            " (You)"
        } else {
            ""
        }
    );
    let active = if state.active_color == Color::Wild {
        String::from("not chosen yet")
    } else {
        state.active_color.to_string()
    };
    let _ = writeln!(out, "Top card: {}  (active: {active})", state.top_card);
    if state.pending_draw > 0 {
        let _ = writeln!(out, "Pending draw: {}", state.pending_draw);
    }
    if options.show_pile_sizes {
        let _ = writeln!(
            out,
            "Draw pile: {}  |  Discard pile: {}",
            state.draw_pile_count, state.discard_pile_count
        );
    }
    let _ = writeln!(out, "Players:");
    for player in &state.players {
        let label_you = if player.id == state.self_player {
            " (You)"
        } else {
            ""
        };
        let current_tag = if player.is_current { " <- current" } else { "" };
        let _ = writeln!(
            out,
            "  Player {} {}{} - {} card(s){}",
            player.id, player.name, label_you, player.hand_size, current_tag
        );
    }
    if state.hand.is_empty() {
        let _ = writeln!(out, "Hand: (empty)");
    } else {
        let entries: Vec<String> = state
            .hand
            .iter()
            .enumerate()
            .map(|(idx, card)| {
                if options.show_hand_indices {
                    format!("{idx}:{card}")
                } else {
                    card.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "Hand: {}", entries.join("  "));
    }
    out
}

pub fn describe_action(action: &Action) -> String {
    match action {
        Action::Play(card) => format!("Play {card}"),
        Action::Draw => String::from("Draw"),
        Action::Pass => String::from("Keep the drawn card"),
    }
}

pub fn describe_event(event: &TurnEvent) -> String {
    match event {
        TurnEvent::Played {
            player,
            card,
            color,
        } => {
            if card.is_wild() {
                format!("Player {player} played {card} and chose {color}")
            } else {
                format!("Player {player} played {card}")
            }
        }
        TurnEvent::Drew { player } => format!("Player {player} drew a card"),
        TurnEvent::DrewPlayable { player, card } => {
            format!("Player {player} drew a playable {card}")
        }
        TurnEvent::TookPenalty { player, count } => {
            format!("Player {player} drew {count} penalty card(s)")
        }
        TurnEvent::Passed { player } => format!("Player {player} kept the drawn card"),
        TurnEvent::ColorChosen { player, color } => {
            format!("Player {player} named {color} for the opening wild")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::game::GameBuilder;

    #[test]
    fn render_and_describe_include_expected_phrases() {
        let game = GameBuilder::new(2)
            .expect("builder")
            .with_opening(Card::number(Color::Red, 4))
            .build()
            .expect("game");
        let view = game.state_view(0).expect("state view");
        let text = render_state(&view);
        assert!(text.contains("Player 0 Player 0 (You)"));
        assert!(text.contains("Top card: Red 4"));
        assert!(text.contains("Hand:"));
        assert_eq!(describe_action(&Action::Play(Card::wild())), "Play Wild");
        let event = TurnEvent::Played {
            player: 1,
            card: Card::wild(),
            color: Color::Blue,
        };
        assert_eq!(describe_event(&event), "Player 1 played Wild and chose Blue");
    }
}
