use std::error::Error;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::Bot;
use crate::bots::{HumanBot, RandomBot, WildFirstBot, WildLastBot};

/// Returns a normalized label for a bot spec (the head token before any ':').
pub fn label_for_spec(spec: &str) -> String {
    spec.split(':')
        .next()
        .unwrap_or(spec)
        .trim()
        .to_ascii_lowercase()
}

/// Create a bot instance from a CLI-style spec.
/// Supported specs:
/// - human[:name]
/// - random[:seed]
/// - wildfirst[:seed]
/// - wildlast[:seed]
///
/// Without an explicit seed the bot's RNG is derived from `seed` and the seat.
pub fn create_bot_from_spec(
    spec: &str,
    index: usize,
    seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let bot_seed = spec_seed(spec).unwrap_or(seed ^ ((index as u64 + 1) * 0x9E37_79B9));
    create_bot_with_seed(spec, index, bot_seed)
}

/// Seed written into a spec such as `random:42`, if any.
pub fn spec_seed(spec: &str) -> Option<u64> {
    spec.split_once(':')
        .and_then(|(_, value)| value.trim().parse::<u64>().ok())
}

/// Like [`create_bot_from_spec`], but seeds the bot's RNG with `bot_seed`
/// regardless of any seed written into the spec.
pub fn create_bot_with_seed(
    spec: &str,
    index: usize,
    bot_seed: u64,
) -> Result<Box<dyn Bot>, Box<dyn Error>> {
    let label = label_for_spec(spec);
    let rng = StdRng::seed_from_u64(bot_seed);
    match label.as_str() {
        "human" => {
            let name = spec
                .split_once(':')
                .map(|(_, name)| name.trim().to_string())
                .unwrap_or_else(|| format!("Human {index}"));
            Ok(Box::new(HumanBot::new(name)))
        }
        "random" => Ok(Box::new(RandomBot::new(rng))),
        "wildfirst" => Ok(Box::new(WildFirstBot::new(rng))),
        "wildlast" => Ok(Box::new(WildLastBot::new(rng))),
        _ => Err(format!("unrecognized bot spec: {spec}").into()),
    }
}
