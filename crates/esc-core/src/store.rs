//! The room store: owner of all room content.
//!
//! The store is the content collaborator the play engine reads from
//! and reports back to. Every read accessor returns a clone so callers
//! can never mutate internal state through a returned value; all
//! mutation goes through the named `mark_*` / `complete_room` methods.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::id::{ObjectId, PuzzleId, RoomId};
use crate::item::Item;
use crate::puzzle::Puzzle;
use crate::room::Room;

/// Owns room content, indexed by room id. Preserves insertion order
/// for listings.
#[derive(Debug, Clone, Default)]
pub struct RoomStore {
    rooms: Vec<Room>,
    by_id: HashMap<RoomId, usize>,
}

impl RoomStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a list of rooms.
    pub fn from_rooms(rooms: Vec<Room>) -> CoreResult<Self> {
        let mut store = Self::new();
        for room in rooms {
            store.add_room(room)?;
        }
        Ok(store)
    }

    /// Parse a store from a JSON array of rooms.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let rooms: Vec<Room> = serde_json::from_str(json)?;
        Self::from_rooms(rooms)
    }

    /// Load every `*.json` room file in a directory. Each file holds
    /// either a single room object or an array of rooms.
    pub fn load_dir(dir: &Path) -> CoreResult<Self> {
        let mut store = Self::new();
        let mut entries: Vec<_> = fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        entries.sort();

        for path in entries {
            let text = fs::read_to_string(&path)?;
            // Accept both shapes so hand-written files stay flexible.
            match serde_json::from_str::<Vec<Room>>(&text) {
                Ok(rooms) => {
                    for room in rooms {
                        store.add_room(room)?;
                    }
                }
                Err(_) => {
                    let room: Room = serde_json::from_str(&text)?;
                    store.add_room(room)?;
                }
            }
        }
        Ok(store)
    }

    /// Write every room back to `dir` as `<id>.json`, creating the
    /// directory as needed.
    pub fn save_dir(&self, dir: &Path) -> CoreResult<()> {
        fs::create_dir_all(dir)?;
        for room in &self.rooms {
            let text = serde_json::to_string_pretty(room)?;
            fs::write(dir.join(format!("{}.json", room.id)), text)?;
        }
        Ok(())
    }

    /// Add a room. Fails on duplicate ids.
    pub fn add_room(&mut self, room: Room) -> CoreResult<()> {
        if self.by_id.contains_key(&room.id) {
            return Err(CoreError::DuplicateRoom(room.id.clone()));
        }
        self.by_id.insert(room.id.clone(), self.rooms.len());
        self.rooms.push(room);
        Ok(())
    }

    /// Number of rooms in the store.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// True when the store holds no rooms.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// All rooms, in insertion order. Returns clones.
    pub fn all(&self) -> Vec<Room> {
        self.rooms.clone()
    }

    /// A room by id. Returns a clone.
    pub fn get(&self, id: &RoomId) -> CoreResult<Room> {
        self.room_ref(id).cloned()
    }

    /// An object within a room. Returns a clone.
    pub fn object(&self, room: &RoomId, object: &ObjectId) -> CoreResult<Item> {
        self.room_ref(room)?.object(object).cloned()
    }

    /// A puzzle within a room. Returns a clone.
    pub fn puzzle(&self, room: &RoomId, puzzle: &PuzzleId) -> CoreResult<Puzzle> {
        self.room_ref(room)?.puzzle(puzzle).cloned()
    }

    /// Record that an object has been collected.
    pub fn mark_object_collected(&mut self, room: &RoomId, object: &ObjectId) -> CoreResult<()> {
        self.room_mut(room)?.object_mut(object)?.is_collected = true;
        Ok(())
    }

    /// Record that a puzzle has been solved.
    pub fn mark_puzzle_solved(&mut self, room: &RoomId, puzzle: &PuzzleId) -> CoreResult<()> {
        self.room_mut(room)?.puzzle_mut(puzzle)?.is_solved = true;
        Ok(())
    }

    /// Unlock a room.
    pub fn unlock_room(&mut self, room: &RoomId) -> CoreResult<()> {
        self.room_mut(room)?.is_locked = false;
        Ok(())
    }

    /// Record a completed playthrough: marks the room completed, keeps
    /// the best (lowest) completion time, and unlocks the follow-up
    /// room if the content names one. Returns the updated room clone.
    pub fn complete_room(&mut self, room: &RoomId, completion_secs: u64) -> CoreResult<Room> {
        let next = {
            let r = self.room_mut(room)?;
            r.is_completed = true;
            r.best_time_secs = Some(match r.best_time_secs {
                Some(best) => best.min(completion_secs),
                None => completion_secs,
            });
            r.unlocks.clone()
        };

        if let Some(next_id) = next {
            if self.by_id.contains_key(&next_id) {
                self.unlock_room(&next_id)?;
            }
        }

        self.get(room)
    }

    fn room_ref(&self, id: &RoomId) -> CoreResult<&Room> {
        self.by_id
            .get(id)
            .map(|&i| &self.rooms[i])
            .ok_or_else(|| CoreError::RoomNotFound(id.clone()))
    }

    fn room_mut(&mut self, id: &RoomId) -> CoreResult<&mut Room> {
        match self.by_id.get(id) {
            Some(&i) => Ok(&mut self.rooms[i]),
            None => Err(CoreError::RoomNotFound(id.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;
    use crate::puzzle::Solution;
    use crate::room::Difficulty;
    use std::fs;

    fn mansion() -> Room {
        Room::new("abandoned-mansion", "Abandoned Mansion", Difficulty::Medium)
            .with_object(
                Item::new("ancient-key", "Ancient Key", ItemCategory::Key).collectible(),
            )
            .with_puzzle(Puzzle::new(
                "front-door",
                "Front Door",
                Solution::Code("1887".into()),
            ))
            .unlocks("secret-lab")
    }

    fn lab() -> Room {
        Room::new("secret-lab", "Secret Lab", Difficulty::Hard).locked()
    }

    #[test]
    fn duplicate_room_rejected() {
        let err = RoomStore::from_rooms(vec![mansion(), mansion()]).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateRoom(_)));
    }

    #[test]
    fn get_returns_defensive_copy() {
        let store = RoomStore::from_rooms(vec![mansion()]).unwrap();
        let id = RoomId::new("abandoned-mansion");

        let mut copy = store.get(&id).unwrap();
        copy.is_completed = true;
        copy.objects.clear();

        // Internal state untouched.
        let fresh = store.get(&id).unwrap();
        assert!(!fresh.is_completed);
        assert_eq!(fresh.objects.len(), 1);
    }

    #[test]
    fn unknown_room_is_not_found() {
        let store = RoomStore::new();
        assert!(matches!(
            store.get(&"nowhere".into()),
            Err(CoreError::RoomNotFound(_))
        ));
    }

    #[test]
    fn mark_object_collected_persists() {
        let mut store = RoomStore::from_rooms(vec![mansion()]).unwrap();
        let room = RoomId::new("abandoned-mansion");
        let key = ObjectId::new("ancient-key");

        store.mark_object_collected(&room, &key).unwrap();
        assert!(store.object(&room, &key).unwrap().is_collected);
    }

    #[test]
    fn complete_room_keeps_best_time_and_unlocks_next() {
        let mut store = RoomStore::from_rooms(vec![mansion(), lab()]).unwrap();
        let room = RoomId::new("abandoned-mansion");

        let updated = store.complete_room(&room, 420).unwrap();
        assert!(updated.is_completed);
        assert_eq!(updated.best_time_secs, Some(420));
        assert!(!store.get(&"secret-lab".into()).unwrap().is_locked);

        // A slower run never raises the best time.
        let updated = store.complete_room(&room, 900).unwrap();
        assert_eq!(updated.best_time_secs, Some(420));

        // A faster one lowers it.
        let updated = store.complete_room(&room, 180).unwrap();
        assert_eq!(updated.best_time_secs, Some(180));
    }

    #[test]
    fn complete_room_tolerates_missing_unlock_target() {
        // Content may ship one room at a time; a dangling unlocks id
        // must not fail completion.
        let mut store = RoomStore::from_rooms(vec![mansion()]).unwrap();
        let updated = store.complete_room(&"abandoned-mansion".into(), 300).unwrap();
        assert!(updated.is_completed);
    }

    #[test]
    fn load_dir_reads_room_files() {
        let dir = tempfile::tempdir().unwrap();
        let single = serde_json::to_string(&mansion()).unwrap();
        let array = serde_json::to_string(&vec![lab()]).unwrap();
        fs::write(dir.path().join("mansion.json"), single).unwrap();
        fs::write(dir.path().join("more.json"), array).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let store = RoomStore::load_dir(dir.path()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(store.get(&"secret-lab".into()).unwrap().is_locked);
    }

    #[test]
    fn save_dir_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("rooms");

        let mut store = RoomStore::from_rooms(vec![mansion(), lab()]).unwrap();
        store.complete_room(&"abandoned-mansion".into(), 420).unwrap();
        store.save_dir(&target).unwrap();

        let back = RoomStore::load_dir(&target).unwrap();
        assert_eq!(back.len(), 2);
        assert!(back.get(&"abandoned-mansion".into()).unwrap().is_completed);
        assert!(!back.get(&"secret-lab".into()).unwrap().is_locked);
    }
}
