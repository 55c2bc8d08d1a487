use std::path::Path;

use comfy_table::{ContentArrangement, Table};

pub fn run(dir: &Path) -> Result<(), String> {
    let store = super::load_store(dir)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Difficulty", "Puzzles", "Status", "Best Time"]);

    for room in store.all() {
        let solved = room.puzzles.iter().filter(|p| p.is_solved).count();
        let status = if room.is_completed {
            "escaped".to_string()
        } else if room.is_locked {
            "locked".to_string()
        } else {
            "open".to_string()
        };
        let best = room
            .best_time_secs
            .map(format_secs)
            .unwrap_or_else(|| "—".to_string());

        table.add_row(vec![
            room.id.to_string(),
            room.name.clone(),
            room.difficulty.to_string(),
            format!("{solved}/{}", room.puzzles.len()),
            status,
            best,
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} rooms", store.len());

    Ok(())
}

fn format_secs(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
