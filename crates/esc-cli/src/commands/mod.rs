pub mod init;
pub mod play;
pub mod progress;
pub mod rooms;
pub mod show;

use std::path::Path;

use esc_core::{Room, RoomStore};

/// Load every room file in a directory.
fn load_store(dir: &Path) -> Result<RoomStore, String> {
    let store =
        RoomStore::load_dir(dir).map_err(|e| format!("cannot load rooms from {}: {e}", dir.display()))?;
    if store.is_empty() {
        return Err(format!(
            "no room files found in {} (try `esc init <name>` to create a game)",
            dir.display()
        ));
    }
    Ok(store)
}

/// Find a room by id or case-insensitive name.
fn find_room(store: &RoomStore, name: &str) -> Result<Room, String> {
    let wanted = name.to_lowercase();
    store
        .all()
        .into_iter()
        .find(|r| r.id.as_str() == wanted || r.name.to_lowercase() == wanted)
        .ok_or_else(|| format!("no room called '{name}'"))
}
