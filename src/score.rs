//! Scoring utilities for UNO simulations.
//!
//! The winner of a hand scores the point value of every card left in the
//! opponents' hands: numbers at face value, skip/reverse/draw-two at 20,
//! wild and wild draw four at 50. Games stopped without a winner score nothing.

use crate::card::Card;
use crate::game::GameSummary;

/// Total point value of a hand.
pub fn hand_points(hand: &[Card]) -> usize {
    hand.iter().map(Card::points).sum()
}

/// Points the winner of a finished game collects, `None` when nobody won.
pub fn winner_points(summary: &GameSummary) -> Option<usize> {
    summary.winner.map(|_| summary.winner_points)
}
