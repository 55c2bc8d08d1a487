//! An interactive playthrough driver over one room.
//!
//! [`Playthrough`] glues the pieces together for a text front end: it
//! owns a working copy of the room, the combination table, and the
//! session, turns player input into typed operations, and narrates the
//! results. Content persistence stays with the caller: read the
//! session's collected/solved lists before calling [`Playthrough::finish`].

use std::collections::HashMap;

use chrono::Utc;

use esc_core::{ObjectId, PuzzleId, Room};

use crate::combine::CombinationTable;
use crate::error::{EngineError, EngineResult};
use crate::parser::{Command, parse_command, resolve_object, resolve_puzzle};
use crate::puzzle::{Answer, check_solution, requirements_met};
use crate::session::{CompletionSummary, GameSession};

/// A single playthrough of one room.
#[derive(Debug)]
pub struct Playthrough {
    /// Working copy of the room; solved/collected flags are kept in
    /// step with the session for display.
    room: Room,
    table: CombinationTable,
    session: GameSession,
    hint_levels: HashMap<PuzzleId, usize>,
}

impl Playthrough {
    /// Start a playthrough. Fails if the room is still locked.
    pub fn new(room: Room, table: CombinationTable) -> EngineResult<Self> {
        if room.is_locked {
            return Err(EngineError::RoomLocked(room.id.clone()));
        }
        let mut session = GameSession::new();
        session.start(room.id.clone());
        Ok(Self {
            room,
            table,
            session,
            hint_levels: HashMap::new(),
        })
    }

    /// The room being played (working copy).
    pub fn room(&self) -> &Room {
        &self.room
    }

    /// The session state.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// True when every puzzle in the room is solved.
    pub fn is_complete(&self) -> bool {
        self.room.all_puzzles_solved()
    }

    /// Process a line of player input and return a response.
    pub fn process(&mut self, input: &str) -> EngineResult<String> {
        let command = parse_command(input);
        self.execute(command)
    }

    /// Execute a parsed command.
    pub fn execute(&mut self, command: Command) -> EngineResult<String> {
        match command {
            Command::Look => Ok(self.do_look()),
            Command::Examine { object } => self.do_examine(&object),
            Command::Take { object } => self.do_take(&object),
            Command::Inventory => Ok(self.do_inventory()),
            Command::Clues => Ok(self.do_clues()),
            Command::Combine { first, second } => self.do_combine(&first, &second),
            Command::Solve { puzzle, answer } => self.do_solve(&puzzle, answer.as_deref()),
            Command::Hint { puzzle } => self.do_hint(puzzle.as_deref()),
            Command::Help => Ok(Self::help_text()),
            Command::Quit => Ok("You step back from the room.".to_string()),
            Command::Unknown { input } => Err(EngineError::UnknownCommand(input)),
        }
    }

    /// Finish the playthrough and capture the completion summary.
    pub fn finish(&mut self) -> EngineResult<CompletionSummary> {
        self.session.complete()
    }

    fn do_look(&mut self) -> String {
        self.session.record_play_time(Utc::now());

        let mut output = format!("**{}**\n", self.room.name);
        if !self.room.description.is_empty() {
            output.push_str(&self.room.description);
            output.push('\n');
        }

        let visible: Vec<_> = self
            .room
            .objects
            .iter()
            .filter(|o| !o.is_collected)
            .collect();
        if !visible.is_empty() {
            output.push('\n');
            for obj in visible {
                output.push_str(&format!("You see the {}.\n", obj.name));
            }
        }

        if !self.room.puzzles.is_empty() {
            output.push('\n');
            for puzzle in &self.room.puzzles {
                let marker = if puzzle.is_solved { "solved" } else { "unsolved" };
                output.push_str(&format!("Puzzle: {} ({marker})\n", puzzle.name));
            }
        }

        output
    }

    fn do_examine(&mut self, name: &str) -> EngineResult<String> {
        let Some(id) = resolve_object(&self.room, name) else {
            return Ok(format!("You don't see any '{name}' here."));
        };
        self.session.examine(id.clone());

        let obj = self.room.object(&id)?;
        let mut output = format!("**{}**\n", obj.name);
        if obj.description.is_empty() {
            output.push_str("You see nothing special.");
        } else {
            output.push_str(&obj.description);
        }
        if obj.is_collectible && !self.session.holds(&id) {
            output.push_str("\nYou could take this.");
        }
        Ok(output)
    }

    fn do_take(&mut self, name: &str) -> EngineResult<String> {
        let Some(id) = resolve_object(&self.room, name) else {
            return Ok(format!("You don't see any '{name}' here."));
        };
        let obj = self.room.object(&id)?;
        if !obj.is_collectible {
            return Ok(format!("The {} is fixed in place.", obj.name));
        }
        if self.session.holds(&id) {
            return Ok(format!("You already have the {}.", obj.name));
        }

        let display = obj.name.clone();
        self.session.collect(id.clone());
        self.room.object_mut(&id)?.is_collected = true;
        Ok(format!("You take the {display}."))
    }

    fn do_inventory(&self) -> String {
        if self.session.inventory().is_empty() {
            return "You are carrying nothing.".to_string();
        }
        let mut output = "You are carrying:\n".to_string();
        for id in self.session.inventory() {
            // Combination results are not room objects; fall back to the slug.
            let name = self
                .room
                .object(id)
                .map(|o| o.name.clone())
                .unwrap_or_else(|_| id.to_string());
            output.push_str(&format!("  - {name}\n"));
        }
        output
    }

    fn do_clues(&self) -> String {
        if self.session.unlocked_clues().is_empty() {
            return "You haven't uncovered any clues yet.".to_string();
        }
        let mut output = "Clues uncovered:\n".to_string();
        for clue in self.session.unlocked_clues() {
            output.push_str(&format!("  - {clue}\n"));
        }
        output
    }

    fn do_combine(&mut self, first: &str, second: &str) -> EngineResult<String> {
        let Some(a) = self.resolve_token(first) else {
            return Ok(format!("You don't see any '{first}' here."));
        };
        let Some(b) = self.resolve_token(second) else {
            return Ok(format!("You don't see any '{second}' here."));
        };

        // Held + held is a plain combination; held + room object goes
        // through the examined-object gate, whichever way the player
        // named the pair.
        let a_held = self.session.holds(&a);
        let b_held = self.session.holds(&b);
        let (outcome, _) = if a_held && !b_held && self.room.object(&b).is_ok() {
            self.session
                .combine_with_room_object(&self.table, a.clone(), b.clone())?
        } else if b_held && !a_held && self.room.object(&a).is_ok() {
            self.session
                .combine_with_room_object(&self.table, b.clone(), a.clone())?
        } else {
            self.session.combine(&self.table, a.clone(), b.clone())?
        };

        let mut output = outcome.message.clone();
        if let Some(result) = &outcome.result_item {
            output.push_str(&format!("\nYou now have the {result}."));
        }
        for clue in &outcome.unlocked_clues {
            output.push_str(&format!("\nClue unlocked: {clue}"));
        }
        // Any participating room object may carry flavour text.
        for id in [&a, &b] {
            if let Ok(obj) = self.room.object(id) {
                if let Some(text) = &obj.reveals_clue {
                    output.push_str(&format!("\n{text}"));
                }
            }
        }
        Ok(output)
    }

    fn do_solve(&mut self, name: &str, answer: Option<&str>) -> EngineResult<String> {
        let Some(id) = resolve_puzzle(&self.room, name) else {
            return Ok(format!("There is no puzzle called '{name}' here."));
        };
        let puzzle = self.room.puzzle(&id)?.clone();

        if puzzle.is_solved {
            return Ok(format!("The {} is already solved.", puzzle.name));
        }
        if !requirements_met(&puzzle, &self.session) {
            return Ok(format!(
                "The {} resists you. Something in this room must be examined first.",
                puzzle.name
            ));
        }
        let Some(raw) = answer else {
            let mut output = format!("**{}**\n", puzzle.name);
            if !puzzle.prompt.is_empty() {
                output.push_str(&puzzle.prompt);
                output.push('\n');
            }
            output.push_str(&format!(
                "Answer with: solve {} with <{} answer>",
                puzzle.name, puzzle.solution.kind()
            ));
            return Ok(output);
        };

        let submitted = Answer::parse(&puzzle.solution, raw)?;
        if !check_solution(&puzzle.solution, &submitted)? {
            return Ok("Incorrect solution. Try again!".to_string());
        }

        self.session.solve_puzzle(id.clone());
        self.room.puzzle_mut(&id)?.is_solved = true;

        let mut output = puzzle
            .reward_text
            .clone()
            .unwrap_or_else(|| format!("The {} clicks open!", puzzle.name));
        if self.is_complete() {
            output.push_str("\nEvery puzzle is solved. The way out stands open!");
        }
        Ok(output)
    }

    fn do_hint(&mut self, name: Option<&str>) -> EngineResult<String> {
        let id = match name {
            Some(n) => match resolve_puzzle(&self.room, n) {
                Some(id) => id,
                None => return Ok(format!("There is no puzzle called '{n}' here.")),
            },
            None => match self.room.puzzles.iter().find(|p| !p.is_solved) {
                Some(p) => p.id.clone(),
                None => return Ok("No puzzle here needs a hint.".to_string()),
            },
        };
        let puzzle = self.room.puzzle(&id)?.clone();

        if puzzle.hints.is_empty() {
            return Ok(format!("No hints exist for the {}.", puzzle.name));
        }
        if !self.session.can_request_hint(Utc::now()) {
            return Ok("You need a moment before the next hint.".to_string());
        }

        let level = self.hint_levels.get(&id).copied().unwrap_or(0);
        let text = puzzle.hint_at(level).unwrap_or_default().to_string();
        self.session.request_hint();
        self.hint_levels
            .insert(id, (level + 1).min(puzzle.hints.len() - 1));

        Ok(format!("Hint: {text}"))
    }

    fn help_text() -> String {
        "**Commands**\n\
         look - describe the room\n\
         examine <object> - inspect something\n\
         take <object> - pick up a collectible object\n\
         combine <item> with <item> - combine two things\n\
         solve <puzzle> with <answer> - submit a solution\n\
         hint [puzzle] - request a hint (30s cooldown)\n\
         inventory (or i) - list what you're carrying\n\
         clues - list uncovered clues\n\
         quit - leave the room"
            .to_string()
    }

    /// Resolve a player-typed token against room objects first, then
    /// held item ids (combination results never appear in the room).
    fn resolve_token(&self, input: &str) -> Option<ObjectId> {
        if let Some(id) = resolve_object(&self.room, input) {
            return Some(id);
        }
        let input_lower = input.to_lowercase();
        self.session
            .inventory()
            .iter()
            .find(|id| id.as_str() == input_lower || id.as_str().replace('-', " ") == input_lower)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_core::{Difficulty, Item, ItemCategory, Puzzle, Solution};

    fn mansion() -> Room {
        Room::new("abandoned-mansion", "Abandoned Mansion", Difficulty::Medium)
            .with_description("Dust sheets drape the furniture.")
            .with_object(
                Item::new("ancient-key", "Ancient Key", ItemCategory::Key)
                    .with_description("A tarnished bronze key.")
                    .collectible(),
            )
            .with_object(
                Item::new("mysterious-box", "Mysterious Box", ItemCategory::Container)
                    .with_description("A box with a bronze lock.")
                    .collectible(),
            )
            .with_object(Item::new(
                "fireplace",
                "Fireplace",
                ItemCategory::Scenery,
            ))
            .with_puzzle(
                Puzzle::new("front-door", "Front Door", Solution::Code("1887".into()))
                    .with_hints(["Check the portrait.", "The year under the signature."])
                    .with_reward("The front door swings open."),
            )
    }

    fn playthrough() -> Playthrough {
        Playthrough::new(mansion(), CombinationTable::builtin()).unwrap()
    }

    #[test]
    fn locked_room_cannot_start() {
        let room = mansion();
        let locked = Room { is_locked: true, ..room };
        let err = Playthrough::new(locked, CombinationTable::builtin()).unwrap_err();
        assert!(matches!(err, EngineError::RoomLocked(_)));
    }

    #[test]
    fn look_describes_room() {
        let mut play = playthrough();
        let output = play.process("look").unwrap();
        assert!(output.contains("Abandoned Mansion"));
        assert!(output.contains("Dust sheets"));
        assert!(output.contains("Ancient Key"));
        assert!(output.contains("Front Door (unsolved)"));
    }

    #[test]
    fn examine_records_and_describes() {
        let mut play = playthrough();
        let output = play.process("examine ancient key").unwrap();
        assert!(output.contains("tarnished bronze"));
        assert!(output.contains("You could take this."));
        assert!(play.session().has_examined(&"ancient-key".into()));
    }

    #[test]
    fn take_collects_and_hides_from_look() {
        let mut play = playthrough();
        let output = play.process("take ancient key").unwrap();
        assert!(output.contains("You take the Ancient Key."));
        assert!(play.session().holds(&"ancient-key".into()));

        let look = play.process("look").unwrap();
        assert!(!look.contains("You see the Ancient Key."));
    }

    #[test]
    fn scenery_cannot_be_taken() {
        let mut play = playthrough();
        let output = play.process("take fireplace").unwrap();
        assert!(output.contains("fixed in place"));
        assert!(play.session().inventory().is_empty());
    }

    #[test]
    fn combine_end_to_end() {
        let mut play = playthrough();
        play.process("take ancient key").unwrap();
        play.process("take mysterious box").unwrap();

        let output = play
            .process("combine ancient key with mysterious box")
            .unwrap();
        assert!(output.contains("revealing a hidden map"));
        assert!(output.contains("opened-box"));
        assert!(output.contains("hidden-chamber-location"));

        let inventory = play.process("inventory").unwrap();
        assert!(inventory.contains("opened-box"));
        assert!(!inventory.contains("Ancient Key"));
    }

    #[test]
    fn combine_on_room_object_works_in_either_order() {
        let mut play = playthrough();
        play.process("take ancient key").unwrap();
        play.process("examine mysterious box").unwrap();

        // Room object named first, held item second.
        let output = play
            .process("combine mysterious box with ancient key")
            .unwrap();
        assert!(output.contains("revealing a hidden map"));
        assert!(play.session().holds(&"opened-box".into()));
    }

    #[test]
    fn combine_without_items_is_an_error() {
        let mut play = playthrough();
        let err = play
            .process("combine ancient key with mysterious box")
            .unwrap_err();
        assert!(err.is_invalid_combination());
    }

    #[test]
    fn solve_flow() {
        let mut play = playthrough();

        let wrong = play.process("solve front door with 1066").unwrap();
        assert!(wrong.contains("Incorrect"));
        assert!(!play.is_complete());

        let right = play.process("solve front door with 1887").unwrap();
        assert!(right.contains("The front door swings open."));
        assert!(right.contains("way out stands open"));
        assert!(play.is_complete());

        let again = play.process("solve front door with 1887").unwrap();
        assert!(again.contains("already solved"));
    }

    #[test]
    fn solve_without_answer_prompts() {
        let mut play = playthrough();
        let output = play.process("solve front door").unwrap();
        assert!(output.contains("solve Front Door with <code answer>"));
    }

    #[test]
    fn hints_escalate_and_cool_down() {
        let mut play = playthrough();

        let first = play.process("hint").unwrap();
        assert!(first.contains("Check the portrait."));
        assert_eq!(play.session().hints_used(), 1);

        // Cooldown is still armed; the second request is deflected.
        let second = play.process("hint").unwrap();
        assert!(second.contains("moment before the next hint"));
        assert_eq!(play.session().hints_used(), 1);
    }

    #[test]
    fn finish_reports_summary() {
        let mut play = playthrough();
        play.process("hint").unwrap();
        let summary = play.finish().unwrap();
        assert_eq!(summary.room_id, "abandoned-mansion".into());
        assert_eq!(summary.hints_used, 1);
    }

    #[test]
    fn unknown_command_errors() {
        let mut play = playthrough();
        let err = play.process("dance wildly").unwrap_err();
        assert!(matches!(err, EngineError::UnknownCommand(_)));
    }
}
