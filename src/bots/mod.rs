pub mod human;
pub mod random;
pub mod registry;
pub mod wild_first;
pub mod wild_last;

pub use human::HumanBot;
pub use random::RandomBot;
pub use wild_first::WildFirstBot;
pub use wild_last::WildLastBot;

use crate::card::{Card, Color};

/// Suit color held most often in `hand`, ignoring wild cards. Ties go to the
/// earlier color in `Color::SUITS`.
pub fn most_common_color(hand: &[Card]) -> Color {
    let mut best = Color::SUITS[0];
    let mut best_count = 0;
    for color in Color::SUITS {
        let count = hand.iter().filter(|card| card.color == color).count();
        if count > best_count {
            best = color;
            best_count = count;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn most_common_color_ignores_wilds_and_breaks_ties_in_suit_order() {
        let hand = [
            Card::wild(),
            Card::wild(),
            Card::number(Color::Blue, 1),
            Card::number(Color::Green, 2),
        ];
        assert_eq!(most_common_color(&hand), Color::Green);
        assert_eq!(most_common_color(&[Card::wild()]), Color::Red);
    }
}
