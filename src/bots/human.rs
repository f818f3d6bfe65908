use std::io::{self, Write};

use crate::action::Action;
use crate::bot::Bot;
use crate::card::{Card, Color};
use crate::state::GameStateView;
use crate::visualize::{describe_action, render_state};

/// Interactive bot that queries a human via standard input.
pub struct HumanBot {
    name: String,
}

impl HumanBot {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for HumanBot {
    fn default() -> Self {
        Self::new("Human")
    }
}

fn prompt(label: &str) -> Option<String> {
    print!("{label}");
    if io::stdout().flush().is_err() {
        eprintln!("failed to flush stdout");
    }
    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        eprintln!("failed to read input");
        return None;
    }
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        println!("Exiting game at user's request.");
        std::process::exit(0);
    }
    Some(trimmed.to_string())
}

impl Bot for HumanBot {
    fn choose_action(&mut self, state: &GameStateView, legal_actions: &[Action]) -> Action {
        loop {
            println!(
                "\n=== {}'s turn (player {}) ===",
                self.name, state.self_player
            );
            println!("{}", render_state(state));
            println!("Available actions:");
            for (index, action) in legal_actions.iter().enumerate() {
                println!("  [{index}] {}", describe_action(action));
            }
            println!("Type the action index, 'help' or 'q' to quit.");
            let Some(input) = prompt("Selection: ") else {
                continue;
            };
            if input.eq_ignore_ascii_case("help") {
                println!("Enter the numeric index listed next to the action you wish to perform.");
                println!("The state summary is shown above for reference.");
                continue;
            }
            let Ok(choice) = input.parse::<usize>() else {
                println!("Invalid input: '{input}'. Please enter a number.");
                continue;
            };
            if let Some(action) = legal_actions.get(choice) {
                println!("You selected: {}", describe_action(action));
                return *action;
            }
            println!("Index out of range. Please choose a valid option.");
        }
    }

    fn choose_color(&mut self, _state: &GameStateView, card: Card) -> Color {
        loop {
            println!("Choose a color for {card}:");
            for (index, color) in Color::SUITS.iter().enumerate() {
                println!("  [{index}] {color}");
            }
            let Some(input) = prompt("Color: ") else {
                continue;
            };
            let picked = input
                .parse::<usize>()
                .ok()
                .and_then(|index| Color::SUITS.get(index).copied())
                .or_else(|| {
                    Color::SUITS
                        .iter()
                        .copied()
                        .find(|color| color.to_string().eq_ignore_ascii_case(&input))
                });
            match picked {
                Some(color) => return color,
                None => println!("Invalid color: '{input}'."),
            }
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
