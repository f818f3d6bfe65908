use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use plotters::prelude::*;
use tracing::Level;

use unobot::{BatchConfig, LabelStats, RuleSet, run_batch};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run multiple UNO games and plot per-bot win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 1000)]
    games: usize,

    /// Base RNG seed (deck + bot RNGs will be derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Output chart file (bitmap format taken from the extension)
    #[arg(short = 'o', long = "out", default_value = "winrates.png")]
    out: PathBuf,

    /// Show a textual summary only (no chart)
    #[arg(long = "no-chart", action = ArgAction::SetTrue)]
    no_chart: bool,

    /// Safety cap on turns per game; games exceeding this are stopped (not counted as a win)
    #[arg(long = "max-turns", default_value_t = 5000)]
    max_turns: usize,

    /// Allow playing a freshly drawn card in the same turn
    #[arg(long = "draw-and-play", action = ArgAction::SetTrue)]
    draw_and_play: bool,

    /// Allow answering draw cards with draw cards
    #[arg(long = "stacking", action = ArgAction::SetTrue)]
    stacking: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,

    /// Player bot specs: e.g., wildfirst wildlast random (2-10 total)
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
    if args.bots.is_empty() {
        return Err("please provide between 2 and 10 bot specs (e.g., wildfirst random)".into());
    }

    let config = BatchConfig {
        games: args.games,
        seed: args.seed,
        bots: args.bots.clone(),
        rules: RuleSet {
            draw_and_play: args.draw_and_play,
            stacking: args.stacking,
        },
        max_turns: Some(args.max_turns),
    };
    let report = run_batch(&config)?;

    println!("Win rates (per-seat) with scoring:");
    for stats in &report.labels {
        println!(
            "  {:<12}  {}/{}  ({:.2}%)   avg pts: {:>6.2}   total pts: {}",
            stats.label,
            stats.wins,
            stats.seats,
            stats.win_rate() * 100.0,
            stats.avg_points(),
            stats.points
        );
    }
    let finished = report.games - report.stalled - report.failed.len();
    if finished > 0 {
        println!(
            "\nAverage game length: {:.1} turns, {:.2} reshuffles",
            report.total_turns as f64 / finished as f64,
            report.total_reshuffles as f64 / finished as f64
        );
    }
    if report.stalled > 0 {
        println!("\nNote: {} game(s) hit the turn limit without a winner.", report.stalled);
    }
    if !report.failed.is_empty() {
        println!("\n{} game(s) failed:", report.failed.len());
        for failed in &report.failed {
            println!("  game {}: {}", failed.game, failed.error);
        }
    }

    if !args.no_chart {
        render_bar_chart(&args.out, &report.labels)?;
        println!("\nChart written to {}", args.out.display());
    }

    println!("\nDecision time (per bot label):");
    for stats in &report.labels {
        println!(
            "  {:<12}  decisions: {:<7}  total: {:.3} ms  avg: {:.4} ms",
            stats.label,
            stats.decisions,
            stats.decision_time.as_secs_f64() * 1.0e3,
            stats.avg_decision_ms()
        );
    }

    Ok(())
}

fn render_bar_chart(out: &PathBuf, data: &[LabelStats]) -> Result<(), Box<dyn Error>> {
    let labels: Vec<String> = data.iter().map(|stats| stats.label.clone()).collect();
    let values: Vec<f64> = data.iter().map(|stats| stats.win_rate() * 100.0).collect();
    let max_value = values.iter().cloned().fold(0.0_f64, f64::max);

    let root = BitMapBackend::new(out, (1000, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| format!("{e}"))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("UNO Bot Win Rates (per-seat)", ("sans-serif", 28).into_font())
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0..labels.len()).into_segmented(),
            0.0f64..max_value.max(10.0),
        )
        .map_err(|e| format!("{e}"))?;

    chart
        .configure_mesh()
        .y_desc("Win rate (%)")
        .x_desc("Bot type")
        .disable_x_mesh()
        .x_labels(labels.len())
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(idx) if *idx < labels.len() => labels[*idx].clone(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format!("{v:.0}"))
        .light_line_style(&WHITE.mix(0.0))
        .draw()
        .map_err(|e| format!("{e}"))?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(BLUE.filled())
                .margin(20)
                .data(values.iter().enumerate().map(|(idx, value)| (idx, *value))),
        )
        .map_err(|e| format!("{e}"))?;

    root.present().map_err(|e| format!("{e}"))?;
    Ok(())
}
