//! Dice Poker - headless roll session
//!
//! Drops a hand of d6 dice onto the physics table and plays out a full
//! three-roll turn, printing each roll the way the table UI would show it.

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use dicepoker::dice3d::{DiceScene, SceneConfig};
use dicepoker::game::{GameState, Player, PlayerStats};
use dicepoker::store::{GameStore, ROLLS_PER_TURN};

/// Free settling time before the first throw, so the opening roll starts
/// from dice at rest instead of mid-air.
const WARMUP_SECONDS: f32 = 3.0;

/// Dice Poker - physics dice table
#[derive(Parser)]
#[command(name = "dicepoker")]
#[command(
    author,
    version,
    about = "Dice Poker - play out a physics-simulated dice turn"
)]
struct Cli {
    /// Number of dice on the table
    #[arg(short, long, default_value = "5")]
    dice: usize,

    /// RNG seed for reproducible throws
    #[arg(short, long)]
    seed: Option<u64>,

    /// Seconds of simulation per roll before the dice are read
    #[arg(short, long, default_value = "2.0")]
    window: f32,

    /// Dice to hold after the first roll, by index (e.g. "0,2,4")
    #[arg(long, value_delimiter = ',')]
    hold: Vec<usize>,

    /// Player JSON file (built-in mock player when omitted)
    #[arg(short, long)]
    player: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if cli.dice == 0 {
        eprintln!("{} --dice must be at least 1", "Error:".red().bold());
        std::process::exit(1);
    }
    if cli.window <= 0.0 {
        eprintln!("{} --window must be positive", "Error:".red().bold());
        std::process::exit(1);
    }

    let mut player = match &cli.player {
        Some(path) => match Player::load_from_file(path) {
            Ok(player) => player,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        },
        None => Player::mock(),
    };

    // The hand needs one slot per die on the table.
    if player.hand.as_ref().map(|h| h.len()) != Some(cli.dice) {
        player.hand = Some(vec![1; cli.dice]);
    }

    let mut store = GameStore::new();
    store.set_player_stats(PlayerStats::mock());
    store.set_game(GameState::mock(player.clone()));
    store.set_current_player(player);

    let mut scene = DiceScene::new(SceneConfig {
        dice: cli.dice,
        seed: cli.seed,
        ..Default::default()
    });

    print_banner(&store, &cli);
    run_session(&mut store, &mut scene, &cli);
    print_summary(&store, &scene);
}

// ============================================================================
// Roll Session
// ============================================================================

fn run_session(store: &mut GameStore, scene: &mut DiceScene, cli: &Cli) {
    let window_ticks = ticks(cli.window, scene.timestep());

    println!("\n{}", "(dice dropping onto the table)".dimmed());
    for _ in 0..ticks(WARMUP_SECONDS, scene.timestep()) {
        scene.step(|_| false);
    }

    let mut roll_number = 0;
    while store.start_roll() {
        roll_number += 1;

        // Holds only make sense once there is a first result to keep.
        if roll_number == 2 {
            apply_holds(store, &cli.hold, cli.dice);
        }

        for _ in 0..window_ticks {
            let settled = scene.step(|index| store.is_rolling() && !store.is_held(index));
            for die in settled {
                store.update_die_value(die.index, die.value);
            }
        }
        store.set_rolling(false);
        // One tick with the flag low so the next roll's rising edge can fire.
        scene.step(|_| false);

        print_roll(store, scene, roll_number);
    }
}

fn apply_holds(store: &mut GameStore, hold: &[usize], dice: usize) {
    if hold.is_empty() {
        return;
    }
    // Repeating an index would toggle the hold straight back off.
    let mut indices = hold.to_vec();
    indices.sort_unstable();
    indices.dedup();
    for index in indices {
        if index < dice {
            store.toggle_held_die(index);
        } else {
            eprintln!(
                "{} no die at index {}, ignoring hold",
                "Warning:".yellow().bold(),
                index
            );
        }
    }

    let held = store.held_dice();
    if !held.is_empty() {
        println!(
            "{} {}",
            "Holding:".bold().white(),
            held.iter()
                .map(|i| format!("#{}", i))
                .collect::<Vec<_>>()
                .join(", ")
                .yellow()
        );
    }
}

/// Simulation ticks needed to cover `seconds` of table time.
fn ticks(seconds: f32, timestep: f32) -> usize {
    (seconds / timestep).ceil() as usize
}

// ============================================================================
// Output
// ============================================================================

fn print_banner(store: &GameStore, cli: &Cli) {
    let name = store
        .current_player()
        .map(|p| p.username.clone())
        .unwrap_or_else(|| "Unknown".to_string());

    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", "DICE POKER".bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());
    println!("{} {}", "Player:".bold().white(), name.green());
    println!(
        "{} {} dice, {:.1}s roll window, {} rolls",
        "Table:".bold().white(),
        cli.dice,
        cli.window,
        ROLLS_PER_TURN
    );
    if let Some(seed) = cli.seed {
        println!("{} {}", "Seed:".bold().white(), seed);
    }
}

fn print_roll(store: &GameStore, scene: &DiceScene, roll_number: u32) {
    let Some(hand) = store.hand() else {
        return;
    };

    let mut cells = Vec::with_capacity(hand.len());
    let mut moving = 0;
    for (index, value) in hand.iter().enumerate() {
        let cell = if store.is_held(index) {
            format!("[{}]", value).yellow().bold().to_string()
        } else if scene.die_settled(index) == Some(false) {
            moving += 1;
            format!("[{}]", value).dimmed().to_string()
        } else {
            format!("[{}]", value).bright_white().bold().to_string()
        };
        cells.push(cell);
    }

    println!(
        "{} {}",
        format!("Roll {}/{}:", roll_number, ROLLS_PER_TURN)
            .bold()
            .white(),
        cells.join(" ")
    );
    if moving > 0 {
        let label = if moving == 1 { "die was" } else { "dice were" };
        println!(
            "  {}",
            format!("{} {} still moving when the window closed", moving, label).dimmed()
        );
    }
}

fn print_summary(store: &GameStore, scene: &DiceScene) {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", "FINAL HAND".bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());

    if let Some(hand) = store.hand() {
        let cells: Vec<String> = hand
            .iter()
            .map(|v| format!("[{}]", v).bright_green().bold().to_string())
            .collect();
        println!("{} {}", "Dice:".bold().white(), cells.join(" "));
    }
    if !scene.all_settled() {
        println!(
            "{}",
            "(some dice never came to rest; values show their last settled face)".dimmed()
        );
    }

    if let Some(stats) = store.player_stats() {
        println!("\n{}", "PLAYER STATS".bold().yellow());
        println!("  {} {}", "Total Points:".bold(), stats.total_points);
        println!("  {} {}", "Games Played:".bold(), stats.games_played);
        println!("  {} {}", "Wins:".bold(), stats.wins);
        if let Some(best) = stats.best_hand {
            println!("  {} {}", "Best Hand:".bold(), best.name().cyan());
        }
        println!(
            "  {} {}",
            "Achievements:".bold(),
            stats.achievements_unlocked
        );
    }
    println!("{}", "═══════════════════════════════════════".cyan());
}

// ============================================================================
// Tests
// ============================================================================
