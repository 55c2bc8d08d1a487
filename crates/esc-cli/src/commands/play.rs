//! Interactive play loop: read commands from stdin until the player
//! escapes or quits, then persist room state and progress.

use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use esc_engine::{CombinationTable, CompletionSummary, EngineError, Playthrough};
use esc_progress::{ProgressRecord, check_unlocks};

pub fn run(dir: &Path, name: &str, progress_path: &Path) -> Result<(), String> {
    let mut store = super::load_store(dir)?;
    let room = super::find_room(&store, name)?;
    let room_id = room.id.clone();

    let mut play = Playthrough::new(room, load_table(dir)?)
        .map_err(|e| e.to_string())?;

    println!("{}", "Type 'help' for commands, 'quit' to leave.".dimmed());
    println!();
    println!("{}", play.execute(esc_engine::Command::Look).map_err(|e| e.to_string())?);
    prompt()?;

    let stdin = io::stdin();
    let mut escaped = false;
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| format!("cannot read input: {e}"))?;
        let input = line.trim();
        if input.is_empty() {
            prompt()?;
            continue;
        }
        if matches!(esc_engine::parse_command(input), esc_engine::Command::Quit) {
            println!("{}", "You step back from the room.".dimmed());
            break;
        }

        match play.process(input) {
            Ok(output) => println!("{output}"),
            // Bad combinations and malformed answers are part of play.
            Err(e) if recoverable(&e) => println!("{}", e.to_string().yellow()),
            Err(e) => return Err(e.to_string()),
        }

        if play.is_complete() {
            escaped = true;
            break;
        }
        prompt()?;
    }

    if !escaped {
        return Ok(());
    }

    let session = play.session();
    for object in session.collected_objects() {
        // Combination results exist only in the session; skip those.
        let _ = store.mark_object_collected(&room_id, object);
    }
    for puzzle in session.solved_puzzles() {
        store
            .mark_puzzle_solved(&room_id, puzzle)
            .map_err(|e| e.to_string())?;
    }

    let summary = play.finish().map_err(|e| e.to_string())?;
    let unlocked = store
        .complete_room(&room_id, summary.completion_time_secs)
        .map_err(|e| e.to_string())?;
    store
        .save_dir(dir)
        .map_err(|e| format!("cannot save rooms: {e}"))?;

    println!();
    println!("{}", "You escaped!".green().bold());
    println!(
        "  time {}:{:02}, hints used {}",
        summary.completion_time_secs / 60,
        summary.completion_time_secs % 60,
        summary.hints_used
    );
    if let Some(next) = unlocked.unlocks {
        println!("  unlocked: {next}");
    }

    record_progress(progress_path, &summary)
}

/// Stock rules, plus any extra ones in `combinations.json`.
fn load_table(dir: &Path) -> Result<CombinationTable, String> {
    let mut table = CombinationTable::builtin();
    let path = dir.join("combinations.json");
    if path.exists() {
        let text = std::fs::read_to_string(&path)
            .map_err(|e| format!("cannot read combinations.json: {e}"))?;
        let extra = CombinationTable::from_json_str(&text)
            .map_err(|e| format!("cannot parse combinations.json: {e}"))?;
        for rule in extra.rules() {
            table.insert(rule.clone());
        }
    }
    Ok(table)
}

fn record_progress(path: &Path, summary: &CompletionSummary) -> Result<(), String> {
    let mut record =
        esc_progress::store::load(path).map_err(|e| format!("cannot load progress: {e}"))?;

    record.record_completion(&summary.room_id, summary.completion_time_secs, summary.hints_used);
    record.update_streak(true);

    let earned = check_unlocks(&record, summary.completion_time_secs, summary.hints_used);
    for def in &earned {
        record.unlock(def.id, def.name, def.description);
    }
    print_new_achievements(&record, &earned);

    esc_progress::store::save(path, &record).map_err(|e| format!("cannot save progress: {e}"))
}

fn print_new_achievements(record: &ProgressRecord, earned: &[&esc_progress::AchievementDef]) {
    if earned.is_empty() {
        return;
    }
    println!();
    for def in earned {
        println!("{} {}: {}", "Achievement unlocked:".cyan(), def.name.bold(), def.description);
    }
    println!(
        "  {} of {} achievements earned",
        record.achievements.len(),
        esc_progress::CATALOG.len()
    );
}

fn recoverable(e: &EngineError) -> bool {
    e.is_invalid_combination()
        || matches!(
            e,
            EngineError::UnknownCommand(_)
                | EngineError::SolutionShapeMismatch { .. }
                | EngineError::ObjectNotExamined(_)
        )
}

fn prompt() -> Result<(), String> {
    print!("> ");
    io::stdout()
        .flush()
        .map_err(|e| format!("cannot flush stdout: {e}"))
}
