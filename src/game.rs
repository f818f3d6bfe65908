use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::action::{Action, Direction, PlayerId, TurnEvent};
use crate::bot::Bot;
use crate::card::{Card, Color, Rank, full_deck};
use crate::deck::Deck;
use crate::error::{GameError, IllegalMove};
use crate::score::hand_points;
use crate::state::{
    GameSettings, GameStateView, GameStatus, PlayerPublicState, RuleSet, TurnPhase,
};

const DEFAULT_SEED: u64 = 0x5EED_5EED_5EED_5EED;

/// Configuration required to bootstrap a game instance.
#[derive(Clone, Copy, Debug)]
pub struct GameConfig {
    pub num_players: usize,
    pub seed: u64,
    pub first_player: PlayerId,
    pub hand_size: Option<usize>,
    pub rules: RuleSet,
    pub max_turns: Option<usize>,
}

impl GameConfig {
    pub fn new(num_players: usize, seed: u64) -> Result<Self, GameError> {
        GameSettings::new(num_players)?;
        Ok(Self {
            num_players,
            seed,
            first_player: 0,
            hand_size: None,
            rules: RuleSet::default(),
            max_turns: None,
        })
    }
}

/// Builder that enables deterministic deck and hand injection for testing.
pub struct GameBuilder {
    config: GameConfig,
    names: Option<Vec<String>>,
    deck: Option<Vec<Card>>,
    hands: Option<Vec<Vec<Card>>>,
    opening: Option<Card>,
    opening_color: Option<Color>,
}

impl GameBuilder {
    pub fn new(num_players: usize) -> Result<Self, GameError> {
        Ok(Self {
            config: GameConfig::new(num_players, DEFAULT_SEED)?,
            names: None,
            deck: None,
            hands: None,
            opening: None,
            opening_color: None,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn with_names(mut self, names: Vec<String>) -> Self {
        self.names = Some(names);
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.config.rules = rules;
        self
    }

    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.config.first_player = player;
        self
    }

    /// Override the number of cards dealt to each player (7 by default).
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.config.hand_size = Some(hand_size);
        self
    }

    /// Stop the game once this many actions have been applied.
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.config.max_turns = Some(max_turns);
        self
    }

    /// Use these cards as the draw pile instead of a shuffled standard deck.
    /// The last card is drawn first.
    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = Some(deck);
        self
    }

    /// Give each seat exactly these cards instead of dealing.
    pub fn with_hands(mut self, hands: Vec<Vec<Card>>) -> Self {
        self.hands = Some(hands);
        self
    }

    /// Place this card as the opening discard instead of flipping one.
    pub fn with_opening(mut self, card: Card) -> Self {
        self.opening = Some(card);
        self
    }

    /// Color bound to an opening wild on the first player's behalf, instead of
    /// asking their bot in [`Game::step`].
    pub fn with_opening_color(mut self, color: Color) -> Self {
        self.opening_color = Some(color);
        self
    }

    pub fn build(self) -> Result<Game, GameError> {
        Game::from_builder(self)
    }
}

/// Result of a game played to completion (or to the turn cap).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSummary {
    pub winner: Option<PlayerId>,
    pub winner_name: Option<String>,
    pub turns: usize,
    pub final_hand_sizes: Vec<usize>,
    /// Points collected from the cards left in the opponents' hands, after
    /// any draw penalty of the winning card has been paid.
    pub winner_points: usize,
    pub reshuffles: usize,
}

/// Core UNO game engine.
pub struct Game {
    settings: GameSettings,
    status: GameStatus,
    phase: TurnPhase,
    current_player: PlayerId,
    direction: Direction,
    active_color: Color,
    active_rank: Rank,
    pending_draw: usize,
    players: Vec<PlayerState>,
    deck: Deck,
    turns: usize,
}

impl Game {
    pub fn builder(num_players: usize) -> Result<GameBuilder, GameError> {
        GameBuilder::new(num_players)
    }

    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        GameBuilder {
            config,
            names: None,
            deck: None,
            hands: None,
            opening: None,
            opening_color: None,
        }
        .build()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn settings(&self) -> GameSettings {
        self.settings
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn turn_phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    pub fn active_rank(&self) -> Rank {
        self.active_rank
    }

    pub fn pending_draw(&self) -> usize {
        self.pending_draw
    }

    /// Number of actions applied so far.
    pub fn turns(&self) -> usize {
        self.turns
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn top_card(&self) -> Result<Card, GameError> {
        self.deck.top_of_discard()
    }

    pub fn hand(&self, player: PlayerId) -> Result<&[Card], GameError> {
        self.players
            .get(player)
            .map(|state| state.hand.as_slice())
            .ok_or(GameError::InvalidPlayer(player))
    }

    pub fn player_name(&self, player: PlayerId) -> Result<&str, GameError> {
        self.players
            .get(player)
            .map(|state| state.name.as_str())
            .ok_or(GameError::InvalidPlayer(player))
    }

    /// Cards across both piles and every hand. Always the size of the deck the
    /// game started with.
    pub fn card_count(&self) -> usize {
        self.deck.len() + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.status, GameStatus::Ongoing)
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    pub fn state_view(&self, perspective: PlayerId) -> Result<GameStateView, GameError> {
        if perspective >= self.players.len() {
            return Err(GameError::InvalidPlayer(perspective));
        }
        let players = self
            .players
            .iter()
            .enumerate()
            .map(|(idx, player)| PlayerPublicState {
                id: idx,
                name: player.name.clone(),
                hand_size: player.hand.len(),
                is_current: idx == self.current_player,
            })
            .collect();

        Ok(GameStateView {
            settings: self.settings,
            phase: self.phase,
            status: self.status,
            self_player: perspective,
            current_player: self.current_player,
            direction: self.direction,
            top_card: self.deck.top_of_discard()?,
            active_color: self.active_color,
            active_rank: self.active_rank,
            pending_draw: self.pending_draw,
            draw_pile_count: self.deck.draw_len(),
            discard_pile_count: self.deck.discard_len(),
            players,
            hand: self.players[perspective].hand.clone(),
        })
    }

    /// Every action the player may take right now. Plays are listed once per
    /// distinct card, followed by the draw (or pass) option. Empty while an
    /// opening wild still needs its color.
    pub fn legal_actions(&self, player: PlayerId) -> Result<Vec<Action>, GameError> {
        if self.is_finished() {
            return Ok(Vec::new());
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        match self.phase {
            TurnPhase::AwaitingDrawnCard(card) => return Ok(vec![Action::Play(card), Action::Pass]),
            TurnPhase::AwaitingOpeningColor => return Ok(Vec::new()),
            _ => {}
        }

        let mut actions = Vec::new();
        for card in &self.players[player].hand {
            let action = Action::Play(*card);
            if self.is_playable(card) && !actions.contains(&action) {
                actions.push(action);
            }
        }
        actions.push(Action::Draw);
        Ok(actions)
    }

    /// Validates and applies an action. `color` is required when playing a wild
    /// card and ignored otherwise. Nothing is mutated when validation fails.
    pub fn apply_action(
        &mut self,
        player: PlayerId,
        action: Action,
        color: Option<Color>,
    ) -> Result<TurnEvent, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        let legal = self.legal_actions(player)?;
        if !legal.contains(&action) {
            return Err(IllegalMove {
                player,
                action,
                legal,
            }
            .into());
        }
        if let Action::Play(card) = action {
            if card.is_wild() {
                match color {
                    Some(chosen) if chosen.is_suit() => {}
                    other => return Err(GameError::InvalidColor(other.unwrap_or(Color::Wild))),
                }
            }
        }

        let event = match action {
            Action::Play(card) => self.play_card(player, card, color)?,
            Action::Draw => self.draw_for_turn(player)?,
            Action::Pass => {
                self.phase = TurnPhase::AwaitingAction;
                self.advance(1);
                TurnEvent::Passed { player }
            }
        };
        debug!(turn = self.turns, ?event, "applied action");

        self.turns += 1;
        if let Some(limit) = self.settings.max_turns {
            if !self.is_finished() && self.turns >= limit {
                debug!(limit, "turn limit reached");
                self.status = GameStatus::TurnLimit;
                self.phase = TurnPhase::RoundOver;
            }
        }
        Ok(event)
    }

    /// Binds the color of an opening wild. Only the first player may do this,
    /// and only before anything else happens.
    pub fn choose_opening_color(
        &mut self,
        player: PlayerId,
        color: Color,
    ) -> Result<TurnEvent, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if player >= self.players.len() {
            return Err(GameError::InvalidPlayer(player));
        }
        if self.phase != TurnPhase::AwaitingOpeningColor {
            return Err(GameError::NoColorPending);
        }
        if player != self.current_player {
            return Err(GameError::NotPlayersTurn);
        }
        if !color.is_suit() {
            return Err(GameError::InvalidColor(color));
        }
        self.active_color = color;
        self.phase = TurnPhase::AwaitingAction;
        debug!(player, %color, "opening color chosen");
        Ok(TurnEvent::ColorChosen { player, color })
    }

    /// Asks the current player's bot for one decision and applies it. An
    /// opening wild is settled first by asking for its color.
    pub fn step<B: Bot>(&mut self, bots: &mut [B]) -> Result<TurnEvent, GameError> {
        if self.is_finished() {
            return Err(GameError::GameOver);
        }
        if bots.len() != self.players.len() {
            return Err(GameError::InvalidConfiguration(
                "one bot is required per player",
            ));
        }
        let current = self.current_player;
        let state = self.state_view(current)?;
        if self.phase == TurnPhase::AwaitingOpeningColor {
            let color = bots[current].choose_color(&state, state.top_card);
            return self.choose_opening_color(current, color);
        }
        let legal = self.legal_actions(current)?;
        let bot = &mut bots[current];
        let action = bot.choose_action(&state, &legal);
        if !legal.contains(&action) {
            warn!(player = current, bot = bot.name(), ?action, "bot returned an illegal action");
            return Err(IllegalMove {
                player: current,
                action,
                legal,
            }
            .into());
        }
        let color = match action {
            Action::Play(card) if card.is_wild() => Some(bot.choose_color(&state, card)),
            _ => None,
        };
        self.apply_action(current, action, color)
    }

    /// Runs the game until a player empties their hand or the turn cap is hit.
    pub fn play_game<B: Bot>(&mut self, bots: &mut [B]) -> Result<GameSummary, GameError> {
        while !self.is_finished() {
            self.step(bots)?;
        }
        Ok(self.summary())
    }

    pub fn summary(&self) -> GameSummary {
        let winner = self.winner();
        let winner_points = winner
            .map(|winner| {
                self.players
                    .iter()
                    .enumerate()
                    .filter(|(idx, _)| *idx != winner)
                    .map(|(_, player)| hand_points(&player.hand))
                    .sum()
            })
            .unwrap_or(0);
        GameSummary {
            winner,
            winner_name: winner.map(|idx| self.players[idx].name.clone()),
            turns: self.turns,
            final_hand_sizes: self.players.iter().map(|p| p.hand.len()).collect(),
            winner_points,
            reshuffles: self.deck.reshuffles(),
        }
    }

    fn from_builder(builder: GameBuilder) -> Result<Self, GameError> {
        let GameBuilder {
            config,
            names,
            deck,
            hands,
            opening,
            opening_color,
        } = builder;
        let mut settings = GameSettings::new(config.num_players)?;
        if let Some(hand_size) = config.hand_size {
            if hand_size == 0 {
                return Err(GameError::InvalidConfiguration("hand size must be positive"));
            }
            settings.hand_size = hand_size;
        }
        settings.rules = config.rules;
        settings.max_turns = config.max_turns;
        if config.first_player >= settings.num_players {
            return Err(GameError::InvalidPlayer(config.first_player));
        }

        let names = match names {
            Some(names) if names.len() != settings.num_players => {
                return Err(GameError::InvalidConfiguration(
                    "one name is required per player",
                ));
            }
            Some(names) => names,
            None => (0..settings.num_players)
                .map(|idx| format!("Player {idx}"))
                .collect(),
        };
        if let Some(hands) = &hands {
            if hands.len() != settings.num_players {
                return Err(GameError::InvalidConfiguration(
                    "one preset hand is required per player",
                ));
            }
        }

        if opening.is_some_and(|card| card.rank == Rank::WildDrawFour) {
            return Err(GameError::InvalidConfiguration(
                "wild draw four cannot open the game",
            ));
        }

        let deck = match (deck, hands.is_some() || opening.is_some()) {
            (Some(cards), _) => Deck::from_piles(cards, Vec::new(), config.seed),
            (None, false) => Deck::shuffled(config.seed),
            (None, true) => {
                let mut remaining = full_deck();
                let preset = hands.iter().flatten().flatten().chain(opening.iter());
                for card in preset {
                    let pos = remaining.iter().position(|c| c == card).ok_or(
                        GameError::InvalidConfiguration("preset cards exceed the standard deck"),
                    )?;
                    remaining.swap_remove(pos);
                }
                remaining.shuffle(&mut StdRng::seed_from_u64(config.seed));
                Deck::from_piles(remaining, Vec::new(), config.seed)
            }
        };

        let mut game = Game {
            settings,
            status: GameStatus::Ongoing,
            phase: TurnPhase::AwaitingDeal,
            current_player: config.first_player,
            direction: Direction::Clockwise,
            active_color: Color::Wild,
            active_rank: Rank::Wild,
            pending_draw: 0,
            players: names.into_iter().map(PlayerState::new).collect(),
            deck,
            turns: 0,
        };

        match hands {
            Some(hands) => {
                for (player, hand) in game.players.iter_mut().zip(hands) {
                    player.hand = hand;
                }
            }
            None => game.deal()?,
        }
        let opening = match opening {
            Some(card) => card,
            None => game.flip_opening()?,
        };
        game.deck.discard(opening);
        game.open_with(opening)?;
        if let Some(color) = opening_color {
            if game.phase == TurnPhase::AwaitingOpeningColor {
                game.choose_opening_color(game.current_player, color)?;
            }
        }
        Ok(game)
    }

    fn deal(&mut self) -> Result<(), GameError> {
        for _ in 0..self.settings.hand_size {
            for idx in 0..self.players.len() {
                let card = self.deck.draw()?;
                self.players[idx].hand.push(card);
            }
        }
        Ok(())
    }

    /// Flips cards until one other than a wild draw four comes up; those go
    /// back into the draw pile.
    fn flip_opening(&mut self) -> Result<Card, GameError> {
        for _ in 0..=self.deck.len() {
            let card = self.deck.draw()?;
            if card.rank != Rank::WildDrawFour {
                return Ok(card);
            }
            trace!("wild draw four flipped as opening card, reshuffling");
            self.deck.discard(card);
            self.deck.return_top_to_draw()?;
        }
        Err(GameError::InvalidConfiguration(
            "deck has no valid opening card",
        ))
    }

    /// Resolves the opening card as if the seat before the first player had
    /// played it.
    fn open_with(&mut self, card: Card) -> Result<(), GameError> {
        self.phase = TurnPhase::AwaitingAction;
        self.active_color = card.color;
        self.active_rank = card.rank;
        self.current_player = self.seat_after(self.current_player, -1);
        trace!(%card, dealer = self.current_player, "resolving opening card");
        self.resolve_effect(card)?;
        if card.is_wild() {
            self.phase = TurnPhase::AwaitingOpeningColor;
        }
        Ok(())
    }

    fn play_card(
        &mut self,
        player: PlayerId,
        card: Card,
        color: Option<Color>,
    ) -> Result<TurnEvent, GameError> {
        let hand = &mut self.players[player].hand;
        let pos = hand.iter().position(|c| *c == card).ok_or(IllegalMove {
            player,
            action: Action::Play(card),
            legal: Vec::new(),
        })?;
        hand.remove(pos);
        self.deck.discard(card);
        self.phase = TurnPhase::AwaitingAction;
        self.active_rank = card.rank;
        self.active_color = match color {
            Some(chosen) if card.is_wild() => chosen,
            _ => card.color,
        };
        self.resolve_effect(card)?;

        if self.players[player].hand.is_empty() {
            debug!(player, "hand emptied");
            if self.pending_draw > 0 {
                let count = std::mem::take(&mut self.pending_draw);
                self.draw_into(self.current_player, count)?;
            }
            self.status = GameStatus::Finished { winner: player };
            self.phase = TurnPhase::RoundOver;
            self.current_player = player;
        }
        Ok(TurnEvent::Played {
            player,
            card,
            color: self.active_color,
        })
    }

    fn draw_for_turn(&mut self, player: PlayerId) -> Result<TurnEvent, GameError> {
        if self.pending_draw > 0 {
            let count = std::mem::take(&mut self.pending_draw);
            self.draw_into(player, count)?;
            self.advance(1);
            return Ok(TurnEvent::TookPenalty { player, count });
        }
        let card = self.deck.draw()?;
        self.players[player].hand.push(card);
        if self.settings.rules.draw_and_play && self.is_playable(&card) {
            self.phase = TurnPhase::AwaitingDrawnCard(card);
            return Ok(TurnEvent::DrewPlayable { player, card });
        }
        self.advance(1);
        Ok(TurnEvent::Drew { player })
    }

    /// Applies the card's action and moves the turn on from the current seat.
    fn resolve_effect(&mut self, card: Card) -> Result<(), GameError> {
        match card.rank {
            Rank::Skip => self.advance(2),
            Rank::Reverse if self.players.len() == 2 => self.advance(2),
            Rank::Reverse => {
                self.direction = self.direction.reversed();
                self.advance(1);
            }
            Rank::DrawTwo | Rank::WildDrawFour if self.settings.rules.stacking => {
                self.pending_draw += card.draw_penalty();
                self.advance(1);
            }
            Rank::DrawTwo | Rank::WildDrawFour => {
                let victim = self.seat_after(self.current_player, 1);
                self.draw_into(victim, card.draw_penalty())?;
                self.advance(2);
            }
            Rank::Number(_) | Rank::Wild => self.advance(1),
        }
        Ok(())
    }

    fn is_playable(&self, card: &Card) -> bool {
        if self.pending_draw > 0 {
            return card.draw_penalty() > 0 && (card.is_wild() || card.rank == self.active_rank);
        }
        card.matches(self.active_color, self.active_rank)
    }

    fn draw_into(&mut self, player: PlayerId, count: usize) -> Result<(), GameError> {
        for _ in 0..count {
            let card = self.deck.draw()?;
            self.players[player].hand.push(card);
        }
        Ok(())
    }

    /// Seat reached by moving `steps` seats from `from` in the current direction.
    fn seat_after(&self, from: PlayerId, steps: isize) -> PlayerId {
        let n = self.players.len() as isize;
        (from as isize + steps * self.direction.step()).rem_euclid(n) as PlayerId
    }

    fn advance(&mut self, steps: isize) {
        self.current_player = self.seat_after(self.current_player, steps);
    }
}

#[derive(Clone)]
struct PlayerState {
    name: String,
    hand: Vec<Card>,
}

impl PlayerState {
    fn new(name: String) -> Self {
        Self {
            name,
            hand: Vec::new(),
        }
    }
}
