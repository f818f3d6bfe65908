use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use tracing::Level;

use unobot::{Bot, Game, RuleSet, create_bot_from_spec, describe_event, render_state};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play a single UNO game between bots or humans.")]
struct Args {
    /// Seed for shuffling and bot RNGs
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Show the game state and every event
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Stop after the specified number of turns
    #[arg(long = "max-turns")]
    max_turns: Option<usize>,

    /// Allow playing a freshly drawn card in the same turn
    #[arg(long = "draw-and-play", action = ArgAction::SetTrue)]
    draw_and_play: bool,

    /// Allow answering draw cards with draw cards
    #[arg(long = "stacking", action = ArgAction::SetTrue)]
    stacking: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Player specs: human[:name], random[:seed], wildfirst, wildlast (2-10 total).
    /// Defaults to one human and one random bot.
    bots: Vec<String>,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let mut bot_specs = args.bots;
    if bot_specs.is_empty() {
        bot_specs = vec![String::from("human"), String::from("random")];
    }

    let num_players = bot_specs.len();
    let mut builder = Game::builder(num_players)?
        .with_seed(args.seed)
        .with_names(bot_specs.clone())
        .with_rules(RuleSet {
            draw_and_play: args.draw_and_play,
            stacking: args.stacking,
        });
    if let Some(limit) = args.max_turns {
        builder = builder.with_max_turns(limit);
    }
    let mut game = builder.build()?;

    let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(num_players);
    for (index, spec) in bot_specs.iter().enumerate() {
        bots.push(create_bot_from_spec(spec, index, args.seed)?);
    }

    println!("Starting UNO simulation with {num_players} players.\n");
    while !game.is_finished() {
        if args.visualize {
            let state = game.state_view(game.current_player())?;
            println!("{}", render_state(&state));
        }
        let event = game.step(&mut bots)?;
        if args.visualize {
            println!("{}\n", describe_event(&event));
        }
    }

    let summary = game.summary();
    match (&summary.winner, &summary.winner_name) {
        (Some(winner), Some(name)) => println!(
            "Game finished after {} turns. Winner: Player {winner} ({name}) with {} points.",
            summary.turns, summary.winner_points
        ),
        _ => println!("Max turn limit reached after {} turns. Stopping simulation.", summary.turns),
    }
    println!("Final hand sizes: {:?}", summary.final_hand_sizes);

    Ok(())
}
