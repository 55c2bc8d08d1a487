use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use esc_progress::CATALOG;

pub fn run(path: &Path) -> Result<(), String> {
    let record =
        esc_progress::store::load(path).map_err(|e| format!("cannot load progress: {e}"))?;

    println!("{}", "Progress".bold());
    println!("  rooms escaped:   {}", record.total_rooms_completed);
    println!(
        "  total play time: {}:{:02}",
        record.total_play_time_secs / 60,
        record.total_play_time_secs % 60
    );
    println!("  hints used:      {}", record.total_hints_used);
    println!(
        "  streak:          {} (best {})",
        record.current_streak, record.longest_streak
    );

    if !record.room_stats.is_empty() {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Room", "Attempts", "Best Time", "Hints"]);

        let mut rooms: Vec<_> = record.room_stats.iter().collect();
        rooms.sort_by(|a, b| a.0.cmp(b.0));
        for (room, stats) in rooms {
            let best = stats
                .best_time_secs
                .map(|s| format!("{}:{:02}", s / 60, s % 60))
                .unwrap_or_else(|| "—".to_string());
            table.add_row(vec![
                room.to_string(),
                stats.attempts.to_string(),
                best,
                stats.hints_used.to_string(),
            ]);
        }
        println!();
        println!("{table}");
    }

    println!();
    println!(
        "{} ({}/{})",
        "Achievements".bold(),
        record.achievements.len(),
        CATALOG.len()
    );
    for def in CATALOG {
        if record.has_achievement(def.id) {
            println!("  {} {}: {}", "✓".green(), def.name, def.description);
        } else {
            println!("  {} {}: {}", "·".dimmed(), def.name, def.description);
        }
    }

    Ok(())
}
