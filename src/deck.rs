use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::card::{Card, full_deck};
use crate::error::GameError;

/// Draw pile plus discard pile.
///
/// The last element of `draw_pile` is the next card drawn and the last element
/// of `discard_pile` is the top (active) card.
#[derive(Clone, Debug)]
pub struct Deck {
    draw_pile: Vec<Card>,
    discard_pile: Vec<Card>,
    reshuffles: usize,
    rng: StdRng,
}

impl Deck {
    /// Full 108-card set shuffled with the given seed, discard pile empty.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut draw_pile = full_deck();
        draw_pile.shuffle(&mut rng);
        Self {
            draw_pile,
            discard_pile: Vec::new(),
            reshuffles: 0,
            rng,
        }
    }

    /// Deck with explicit pile contents, used for injected layouts in tests.
    /// `seed` only drives later reshuffles.
    pub fn from_piles(draw_pile: Vec<Card>, discard_pile: Vec<Card>, seed: u64) -> Self {
        Self {
            draw_pile,
            discard_pile,
            reshuffles: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Removes and returns the top of the draw pile, recycling the discard pile
    /// (minus its top card) when the draw pile has run out.
    pub fn draw(&mut self) -> Result<Card, GameError> {
        if let Some(card) = self.draw_pile.pop() {
            return Ok(card);
        }
        self.recycle_discards();
        self.draw_pile.pop().ok_or(GameError::DeckExhausted)
    }

    pub fn discard(&mut self, card: Card) {
        self.discard_pile.push(card);
    }

    pub fn top_of_discard(&self) -> Result<Card, GameError> {
        self.discard_pile.last().copied().ok_or(GameError::EmptyDiscard)
    }

    /// Takes the top discard back into the draw pile and reshuffles it.
    pub(crate) fn return_top_to_draw(&mut self) -> Result<(), GameError> {
        let card = self.discard_pile.pop().ok_or(GameError::EmptyDiscard)?;
        self.draw_pile.push(card);
        self.draw_pile.shuffle(&mut self.rng);
        Ok(())
    }

    pub fn draw_len(&self) -> usize {
        self.draw_pile.len()
    }

    pub fn discard_len(&self) -> usize {
        self.discard_pile.len()
    }

    pub fn len(&self) -> usize {
        self.draw_pile.len() + self.discard_pile.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times the discard pile has been recycled.
    pub fn reshuffles(&self) -> usize {
        self.reshuffles
    }

    fn recycle_discards(&mut self) {
        if self.discard_pile.len() < 2 {
            return;
        }
        let top = self.discard_pile.pop();
        let mut recycled = std::mem::take(&mut self.discard_pile);
        recycled.shuffle(&mut self.rng);
        trace!(cards = recycled.len(), "recycling discard pile into draw pile");
        self.draw_pile.append(&mut recycled);
        self.discard_pile.extend(top);
        self.reshuffles += 1;
    }
}
