use std::path::Path;

use colored::Colorize;

pub fn run(dir: &Path, name: &str) -> Result<(), String> {
    let store = super::load_store(dir)?;
    let room = super::find_room(&store, name)?;

    println!("{} ({})", room.name.bold(), room.difficulty);
    if !room.description.is_empty() {
        println!("  {}", room.description);
    }
    if room.is_locked {
        println!("  {}", "locked (escape the room before it to enter)".yellow());
    }
    if room.is_completed {
        let best = room
            .best_time_secs
            .map(|s| format!("{}:{:02}", s / 60, s % 60))
            .unwrap_or_else(|| "—".to_string());
        println!("  {} (best time {best})", "escaped".green());
    }
    if let Some(next) = &room.unlocks {
        println!("  escaping unlocks: {next}");
    }

    if !room.objects.is_empty() {
        println!();
        println!("{}", "Objects".bold());
        for obj in &room.objects {
            let mut notes = vec![obj.category.to_string()];
            if obj.is_collectible {
                notes.push("collectible".to_string());
            }
            if !obj.combines_with.is_empty() {
                notes.push("combinable".to_string());
            }
            println!("  {} [{}]", obj.name, notes.join(", "));
        }
    }

    if !room.puzzles.is_empty() {
        println!();
        println!("{}", "Puzzles".bold());
        for puzzle in &room.puzzles {
            let status = if puzzle.is_solved {
                "solved".green()
            } else {
                "unsolved".yellow()
            };
            // Never print the solution itself, only its shape.
            println!(
                "  {} ({} puzzle, {} hints): {status}",
                puzzle.name,
                puzzle.solution.kind(),
                puzzle.hints.len()
            );
        }
    }

    Ok(())
}
