use speed_tapper::achievements::{browser_entries, load_save_data, unlock_summary};
use speed_tapper::build_info;
use speed_tapper::core::{win_rate, GameLogEntry, LogWinner};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Speed Tapper - tap-speed game with achievements\n");
    println!("Usage: speed_tapper [command]\n");
    println!("Commands:");
    println!("  stats         Show lifetime stats");
    println!("  achievements  List achievements and progress");
    println!("  log           Show recent games");
    println!("  --version     Show version information");
    println!("  --help        Show this help message");
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("stats");

    match command {
        "--version" | "-v" => println!("{}", build_info::version_line()),
        "--help" | "-h" => print_usage(),
        "stats" => show_stats(),
        "achievements" => show_achievements(),
        "log" => show_log(),
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run 'speed_tapper --help' for usage.");
            std::process::exit(1);
        }
    }
}

fn show_stats() {
    let data = load_save_data();
    let stats = &data.stats;
    println!("Total taps:            {}", stats.total_taps);
    println!("Target high score:     {}", stats.single_player_high_score);
    println!(
        "Tap high score:        {} ({}s)",
        stats.sp_taps_in_duration, stats.sp_taps_in_duration_setting
    );
    println!(
        "Two-player wins:       P1 {} / P2 {} (P1 win rate {}%)",
        stats.p1_wins,
        stats.p2_wins,
        win_rate(stats.p1_wins, stats.p2_wins)
    );
    println!("Single-player games:   {}", stats.single_player_games());
    println!("Two-player games:      {}", stats.two_player_games());
    println!("Game duration setting: {}s", data.settings.game_duration);
    println!("Theme:                 {}", data.settings.theme.name());
}

fn show_achievements() {
    let data = load_save_data();
    println!("{}\n", unlock_summary(&data.achievements));
    for entry in browser_entries(&data.achievements, &data.stats) {
        let mark = if entry.unlocked { "x" } else { " " };
        println!(
            "[{}] {} {}  {}{}",
            mark,
            entry.def.icon,
            entry.def.name,
            entry.def.description,
            entry.progress_text()
        );
    }
}

fn show_log() {
    let data = load_save_data();
    if data.game_log.is_empty() {
        println!("No games played yet.");
        return;
    }
    for entry in data.game_log.entries() {
        let when = entry.timestamp().format("%Y-%m-%d %H:%M");
        match entry {
            GameLogEntry::SinglePlayer {
                mode,
                score,
                duration,
                ..
            } => println!("{}  1P {:<6} {:>3}s  score {}", when, mode.name(), duration, score),
            GameLogEntry::TwoPlayer {
                mode,
                p1_score,
                p2_score,
                p1_name,
                p2_name,
                winner,
                duration,
                ..
            } => {
                let winner = match winner {
                    LogWinner::P1 => p1_name.as_str(),
                    LogWinner::P2 => p2_name.as_str(),
                    LogWinner::Tie => "tie",
                };
                println!(
                    "{}  2P {:<6} {:>3}s  {} {} - {} {}  ({})",
                    when,
                    mode.name(),
                    duration,
                    p1_name,
                    p1_score,
                    p2_score,
                    p2_name,
                    winner
                );
            }
        }
    }
}
