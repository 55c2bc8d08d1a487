//! Player command parsing and object-name resolution.

use strsim::jaro_winkler;

use esc_core::{ObjectId, PuzzleId, Room};

/// Minimum similarity score for fuzzy matching (0.0-1.0).
const FUZZY_THRESHOLD: f64 = 0.8;

/// A parsed player command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Describe the room, its objects, and its puzzles.
    Look,
    /// Examine a specific object.
    Examine {
        /// The object name.
        object: String,
    },
    /// Collect an object into the inventory.
    Take {
        /// The object name.
        object: String,
    },
    /// List held items.
    Inventory,
    /// List unlocked clues.
    Clues,
    /// Combine two items, or use an item on a room object.
    Combine {
        /// The first item name.
        first: String,
        /// The second item or room-object name.
        second: String,
    },
    /// Submit a puzzle solution.
    Solve {
        /// The puzzle name.
        puzzle: String,
        /// The raw answer text, if given.
        answer: Option<String>,
    },
    /// Request a hint, optionally for a named puzzle.
    Hint {
        /// The puzzle name.
        puzzle: Option<String>,
    },
    /// Show help.
    Help,
    /// Quit the playthrough.
    Quit,
    /// Unknown command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// Verb synonyms for command parsing.
const LOOK_VERBS: &[&str] = &["look", "l"];
const EXAMINE_VERBS: &[&str] = &["examine", "ex", "x", "inspect", "read"];
const TAKE_VERBS: &[&str] = &["take", "get", "pick", "grab", "collect"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i", "items"];
const CLUE_VERBS: &[&str] = &["clues", "clue", "notes"];
const COMBINE_VERBS: &[&str] = &["combine", "use", "merge", "mix"];
const SOLVE_VERBS: &[&str] = &["solve", "answer", "enter", "try"];
const HINT_VERBS: &[&str] = &["hint", "hints"];
const HELP_VERBS: &[&str] = &["help", "h", "?", "commands"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit", "leave"];

/// Parse a player input string into a command.
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    if input.is_empty() {
        return Command::Look;
    }

    let words: Vec<&str> = input.split_whitespace().collect();
    let verb = words[0].to_lowercase();
    let rest = words.get(1..).unwrap_or(&[]);

    if LOOK_VERBS.contains(&verb.as_str()) {
        // "look <object>" reads as examine.
        return if rest.is_empty() {
            Command::Look
        } else {
            parse_examine(rest)
        };
    }
    if EXAMINE_VERBS.contains(&verb.as_str()) {
        return parse_examine(rest);
    }
    if TAKE_VERBS.contains(&verb.as_str()) {
        return parse_take(rest);
    }
    if INVENTORY_VERBS.contains(&verb.as_str()) {
        return Command::Inventory;
    }
    if CLUE_VERBS.contains(&verb.as_str()) {
        return Command::Clues;
    }
    if COMBINE_VERBS.contains(&verb.as_str()) {
        return parse_combine(input, rest);
    }
    if SOLVE_VERBS.contains(&verb.as_str()) {
        return parse_solve(input, rest);
    }
    if HINT_VERBS.contains(&verb.as_str()) {
        return Command::Hint {
            puzzle: if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            },
        };
    }
    if HELP_VERBS.contains(&verb.as_str()) {
        return Command::Help;
    }
    if QUIT_VERBS.contains(&verb.as_str()) {
        return Command::Quit;
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn parse_examine(rest: &[&str]) -> Command {
    // Skip "at" if present
    let target = if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("at")) {
        &rest[1..]
    } else {
        rest
    };

    if target.is_empty() {
        Command::Unknown {
            input: "examine what?".to_string(),
        }
    } else {
        Command::Examine {
            object: target.join(" "),
        }
    }
}

fn parse_take(rest: &[&str]) -> Command {
    // Skip "up" if present (pick up)
    let target = if rest.first().is_some_and(|w| w.eq_ignore_ascii_case("up")) {
        &rest[1..]
    } else {
        rest
    };

    if target.is_empty() {
        Command::Unknown {
            input: "take what?".to_string(),
        }
    } else {
        Command::Take {
            object: target.join(" "),
        }
    }
}

fn parse_combine(input: &str, rest: &[&str]) -> Command {
    // "combine a with b", "use a on b", "mix a and b"
    let split_pos = rest.iter().position(|w| {
        w.eq_ignore_ascii_case("with") || w.eq_ignore_ascii_case("on") || w.eq_ignore_ascii_case("and")
    });

    match split_pos {
        Some(pos) if pos > 0 && pos < rest.len() - 1 => Command::Combine {
            first: rest[..pos].join(" "),
            second: rest[pos + 1..].join(" "),
        },
        _ => Command::Unknown {
            input: input.to_string(),
        },
    }
}

fn parse_solve(input: &str, rest: &[&str]) -> Command {
    if rest.is_empty() {
        return Command::Unknown {
            input: input.to_string(),
        };
    }

    // "solve <puzzle> with <answer>"; without "with" the whole rest is
    // the puzzle name and the caller will ask for the answer syntax.
    if let Some(pos) = rest.iter().position(|w| w.eq_ignore_ascii_case("with")) {
        if pos == 0 || pos == rest.len() - 1 {
            return Command::Unknown {
                input: input.to_string(),
            };
        }
        Command::Solve {
            puzzle: rest[..pos].join(" "),
            answer: Some(rest[pos + 1..].join(" ")),
        }
    } else {
        Command::Solve {
            puzzle: rest.join(" "),
            answer: None,
        }
    }
}

/// Resolve an object name to an id using exact, then fuzzy, matching
/// over the room's objects (names and id slugs).
pub fn resolve_object(room: &Room, input: &str) -> Option<ObjectId> {
    let input_lower = input.to_lowercase();

    // Exact match on id or name first.
    for obj in &room.objects {
        if obj.id.as_str() == input_lower || obj.name.to_lowercase() == input_lower {
            return Some(obj.id.clone());
        }
    }

    // Fuzzy match on names.
    let mut best: Option<(ObjectId, f64)> = None;
    for obj in &room.objects {
        let score = jaro_winkler(&input_lower, &obj.name.to_lowercase())
            .max(jaro_winkler(&input_lower, obj.id.as_str()));
        if score >= FUZZY_THRESHOLD && best.as_ref().is_none_or(|(_, s)| score > *s) {
            best = Some((obj.id.clone(), score));
        }
    }
    best.map(|(id, _)| id)
}

/// Resolve a puzzle name to an id, exact then fuzzy.
pub fn resolve_puzzle(room: &Room, input: &str) -> Option<PuzzleId> {
    let input_lower = input.to_lowercase();

    for puzzle in &room.puzzles {
        if puzzle.id.as_str() == input_lower || puzzle.name.to_lowercase() == input_lower {
            return Some(puzzle.id.clone());
        }
    }

    let mut best: Option<(PuzzleId, f64)> = None;
    for puzzle in &room.puzzles {
        let score = jaro_winkler(&input_lower, &puzzle.name.to_lowercase())
            .max(jaro_winkler(&input_lower, puzzle.id.as_str()));
        if score >= FUZZY_THRESHOLD && best.as_ref().is_none_or(|(_, s)| score > *s) {
            best = Some((puzzle.id.clone(), score));
        }
    }
    best.map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use esc_core::{Difficulty, Item, ItemCategory, Puzzle, Solution};

    fn test_room() -> Room {
        Room::new("study", "The Scholar's Study", Difficulty::Easy)
            .with_object(
                Item::new("ancient-key", "Ancient Key", ItemCategory::Key).collectible(),
            )
            .with_object(Item::new(
                "mysterious-box",
                "Mysterious Box",
                ItemCategory::Container,
            ))
            .with_puzzle(Puzzle::new(
                "desk-code",
                "Desk Lock",
                Solution::Code("1887".into()),
            ))
    }

    #[test]
    fn parse_look_and_examine() {
        assert_eq!(parse_command(""), Command::Look);
        assert_eq!(parse_command("look"), Command::Look);
        assert_eq!(
            parse_command("look at the box"),
            Command::Examine {
                object: "the box".to_string()
            }
        );
        assert_eq!(
            parse_command("x key"),
            Command::Examine {
                object: "key".to_string()
            }
        );
    }

    #[test]
    fn parse_take_variants() {
        assert_eq!(
            parse_command("pick up ancient key"),
            Command::Take {
                object: "ancient key".to_string()
            }
        );
        assert_eq!(
            parse_command("take"),
            Command::Unknown {
                input: "take what?".to_string()
            }
        );
    }

    #[test]
    fn parse_combine_forms() {
        assert_eq!(
            parse_command("combine ancient key with mysterious box"),
            Command::Combine {
                first: "ancient key".to_string(),
                second: "mysterious box".to_string()
            }
        );
        assert_eq!(
            parse_command("use rusty key on locked drawer"),
            Command::Combine {
                first: "rusty key".to_string(),
                second: "locked drawer".to_string()
            }
        );
        // A separator is required; item names may contain spaces.
        assert!(matches!(
            parse_command("combine key box"),
            Command::Unknown { .. }
        ));
    }

    #[test]
    fn parse_solve_forms() {
        assert_eq!(
            parse_command("solve desk lock with 1887"),
            Command::Solve {
                puzzle: "desk lock".to_string(),
                answer: Some("1887".to_string())
            }
        );
        assert_eq!(
            parse_command("solve desk lock"),
            Command::Solve {
                puzzle: "desk lock".to_string(),
                answer: None
            }
        );
    }

    #[test]
    fn parse_hint_and_misc() {
        assert_eq!(parse_command("hint"), Command::Hint { puzzle: None });
        assert_eq!(
            parse_command("hint desk lock"),
            Command::Hint {
                puzzle: Some("desk lock".to_string())
            }
        );
        assert_eq!(parse_command("i"), Command::Inventory);
        assert_eq!(parse_command("clues"), Command::Clues);
        assert_eq!(parse_command("q"), Command::Quit);
        assert!(matches!(
            parse_command("dance wildly"),
            Command::Unknown { .. }
        ));
    }

    #[test]
    fn resolve_exact_and_fuzzy() {
        let room = test_room();
        assert_eq!(
            resolve_object(&room, "Ancient Key"),
            Some("ancient-key".into())
        );
        assert_eq!(
            resolve_object(&room, "ancient-key"),
            Some("ancient-key".into())
        );
        // Typo within the fuzzy threshold.
        assert_eq!(
            resolve_object(&room, "ancint key"),
            Some("ancient-key".into())
        );
        assert_eq!(resolve_object(&room, "chandelier"), None);
    }

    #[test]
    fn resolve_puzzle_by_name() {
        let room = test_room();
        assert_eq!(resolve_puzzle(&room, "desk lock"), Some("desk-code".into()));
        assert_eq!(resolve_puzzle(&room, "moon door"), None);
    }
}
