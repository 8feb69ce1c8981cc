//! Dice Poker CLI
//!
//! A quick command-line companion to the physics table: uniform rolls for
//! fast hands, plus player profile and hand-rank reference screens.

use clap::{Parser, Subcommand};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use dicepoker::game::{Player, PlayerStats, PokerHand};
use dicepoker::store::{GameStore, ROLLS_PER_TURN};

/// Dice Poker - CLI dice roller
#[derive(Parser)]
#[command(name = "dprolls")]
#[command(
    author,
    version,
    about = "Dice Poker - a quick command-line poker dice roller"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a quick hand (uniform rolls, no physics table)
    #[command(visible_alias = "r")]
    Roll {
        /// Number of dice in the hand
        #[arg(short, long, default_value = "5")]
        dice: usize,

        /// Dice to hold after the first roll, by index (e.g. "0,2,4")
        #[arg(long, value_delimiter = ',')]
        hold: Vec<usize>,

        /// RNG seed for reproducible hands
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Show a player's profile and lifetime stats
    Stats {
        /// Player JSON file (built-in mock player when omitted)
        #[arg(short, long)]
        file: Option<String>,
    },

    /// List the poker hand ranks, best first
    Hands,
}

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        eprintln!("{} No command specified", "Error:".red().bold());
        eprintln!("Use --help to see available commands");
        eprintln!("\nExamples:");
        eprintln!("  dprolls roll");
        eprintln!("  dprolls roll --dice 5 --hold 0,2 --seed 7");
        eprintln!("  dprolls stats");
        eprintln!("  dprolls hands");
        std::process::exit(1);
    };

    match command {
        Commands::Roll { dice, hold, seed } => run_roll(dice, &hold, seed),
        Commands::Stats { file } => run_stats(file.as_deref()),
        Commands::Hands => run_hands(),
    }
}

// ============================================================================
// Roll
// ============================================================================

/// Play a full turn of quick rolls, applying `hold` after the first roll.
/// Returns the hand and the held indices as they stood after each roll.
fn play_turn(
    store: &mut GameStore,
    rng: &mut impl Rng,
    dice: usize,
    hold: &[usize],
) -> Vec<(Vec<u8>, Vec<usize>)> {
    let mut snapshots = Vec::new();
    let mut roll_number = 0;

    while store.start_roll() {
        roll_number += 1;
        if roll_number == 2 {
            // Repeating an index would toggle the hold straight back off.
            let mut indices = hold.to_vec();
            indices.sort_unstable();
            indices.dedup();
            for index in indices {
                if index < dice {
                    store.toggle_held_die(index);
                }
            }
        }

        for index in 0..dice {
            if !store.is_held(index) {
                store.update_die_value(index, rng.gen_range(1..=6));
            }
        }
        store.set_rolling(false);

        let hand = store.hand().map(|h| h.to_vec()).unwrap_or_default();
        snapshots.push((hand, store.held_dice()));
    }
    snapshots
}

fn run_roll(dice: usize, hold: &[usize], seed: Option<u64>) {
    if dice == 0 {
        eprintln!("{} --dice must be at least 1", "Error:".red().bold());
        std::process::exit(1);
    }
    for &index in hold {
        if index >= dice {
            eprintln!(
                "{} no die at index {}, ignoring hold",
                "Warning:".yellow().bold(),
                index
            );
        }
    }

    let mut rng: StdRng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut player = Player::mock();
    player.hand = Some(vec![1; dice]);
    let mut store = GameStore::new();
    store.set_current_player(player);

    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!(
        "{} {}",
        "Rolling:".bold().white(),
        format!("{} six-sided dice", dice).yellow().bold()
    );

    for (number, (hand, held)) in play_turn(&mut store, &mut rng, dice, hold)
        .iter()
        .enumerate()
    {
        let cells: Vec<String> = hand
            .iter()
            .enumerate()
            .map(|(index, value)| {
                if held.contains(&index) {
                    format!("[{}]", value).yellow().bold().to_string()
                } else {
                    format!("[{}]", value).bright_white().bold().to_string()
                }
            })
            .collect();
        println!(
            "{} {}",
            format!("Roll {}/{}:", number + 1, ROLLS_PER_TURN)
                .bold()
                .white(),
            cells.join(" ")
        );
    }

    if let Some(hand) = store.hand() {
        let cells: Vec<String> = hand
            .iter()
            .map(|v| format!("[{}]", v).bright_green().bold().to_string())
            .collect();
        println!("{} {}", "Final:".bold().white(), cells.join(" "));
    }
    println!("{}", "═══════════════════════════════════════".cyan());
}

// ============================================================================
// Stats
// ============================================================================

fn run_stats(file: Option<&str>) {
    let player = match file {
        Some(path) => match Player::load_from_file(path) {
            Ok(player) => player,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        },
        None => Player::mock(),
    };
    let stats = PlayerStats::mock();

    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", "PLAYER PROFILE".bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());
    println!("{} {}", "Name:".bold().white(), player.username.green());
    println!("  {} {}", "Points:".bold(), player.points);
    println!(
        "  {} {}",
        "Games Played:".bold(),
        player.total_games_played
    );
    println!(
        "  {} {}",
        "Ready:".bold(),
        if player.is_ready {
            "yes".green()
        } else {
            "no".red()
        }
    );
    if let Some(hand) = &player.hand {
        let cells: Vec<String> = hand
            .iter()
            .map(|v| format!("[{}]", v).bright_white().bold().to_string())
            .collect();
        println!("  {} {}", "Hand:".bold(), cells.join(" "));
    }

    if !player.achievements.is_empty() {
        println!("\n{}", "ACHIEVEMENTS".bold().yellow());
        for achievement in &player.achievements {
            let status = match &achievement.unlocked_at {
                Some(when) => format!("unlocked {}", when).green(),
                None => "locked".dimmed(),
            };
            println!(
                "  {} ({}) {}",
                achievement.name.bold(),
                status,
                achievement.description.dimmed()
            );
        }
    }

    println!("\n{}", "LIFETIME".bold().yellow());
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
    println!("{}", "═══════════════════════════════════════".cyan());
}

// ============================================================================
// Hands
// ============================================================================

fn run_hands() {
    println!("\n{}", "═══════════════════════════════════════".cyan());
    println!("{}", "POKER HANDS".bold().yellow());
    println!("{}", "═══════════════════════════════════════".cyan());
    for (rank, hand) in PokerHand::all().iter().enumerate() {
        let name = if rank == 0 {
            hand.name().bright_green().bold()
        } else {
            hand.name().white()
        };
        println!("  {} {}", format!("{}.", rank + 1).bold(), name);
    }
    println!("{}", "═══════════════════════════════════════".cyan());
}

// ============================================================================
// Tests
// ============================================================================
