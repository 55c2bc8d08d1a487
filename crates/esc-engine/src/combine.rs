//! Combination rule table and the pure pair resolver.
//!
//! Rules are keyed by the *unordered* item pair: the key is the pair
//! sorted lexicographically, so `lookup(a, b)` and `lookup(b, a)` hit
//! the same entry without a second probe. The table is static
//! configuration, loaded once and never mutated during play.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use esc_core::{ClueId, ObjectId};

use crate::error::{EngineError, EngineResult};
use crate::session::GameSession;

/// One combination rule: an unordered item pair and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinationRule {
    /// The two items this rule applies to, in any order.
    pub items: [ObjectId; 2],
    /// Item produced by the combination, if any.
    #[serde(default)]
    pub result_item: Option<ObjectId>,
    /// Clues unlocked by the combination.
    #[serde(default)]
    pub unlocked_clues: Vec<ClueId>,
    /// Narration shown to the player.
    pub message: String,
}

impl CombinationRule {
    /// Create a rule with no result item or clues.
    pub fn new(
        first: impl Into<ObjectId>,
        second: impl Into<ObjectId>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            items: [first.into(), second.into()],
            result_item: None,
            unlocked_clues: Vec::new(),
            message: message.into(),
        }
    }

    /// Set the produced item.
    pub fn produces(mut self, item: impl Into<ObjectId>) -> Self {
        self.result_item = Some(item.into());
        self
    }

    /// Set the unlocked clues.
    pub fn unlocks<I>(mut self, clues: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ClueId>,
    {
        self.unlocked_clues = clues.into_iter().map(Into::into).collect();
        self
    }
}

/// The outcome of a successful combination, ready for the session to
/// apply.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationOutcome {
    /// Item produced, if any.
    pub result_item: Option<ObjectId>,
    /// The two inputs, in the order the player named them.
    pub consumed: [ObjectId; 2],
    /// Clues unlocked.
    pub unlocked_clues: Vec<ClueId>,
    /// Narration shown to the player.
    pub message: String,
}

/// Static mapping of unordered item pairs to combination outcomes.
#[derive(Debug, Clone, Default)]
pub struct CombinationTable {
    rules: HashMap<(ObjectId, ObjectId), CombinationRule>,
}

/// Sort a pair into its canonical key order.
fn pair_key(a: &ObjectId, b: &ObjectId) -> (ObjectId, ObjectId) {
    if a <= b {
        (a.clone(), b.clone())
    } else {
        (b.clone(), a.clone())
    }
}

impl CombinationTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from a list of rules. Later rules for the same
    /// pair replace earlier ones.
    pub fn from_rules<I>(rules: I) -> Self
    where
        I: IntoIterator<Item = CombinationRule>,
    {
        let mut table = Self::new();
        for rule in rules {
            table.insert(rule);
        }
        table
    }

    /// Parse a table from a JSON array of rules.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let rules: Vec<CombinationRule> = serde_json::from_str(json)?;
        Ok(Self::from_rules(rules))
    }

    /// The stock rule set shipped with the game.
    pub fn builtin() -> Self {
        Self::from_rules([
            // Key combinations
            CombinationRule::new(
                "ancient-key",
                "mysterious-box",
                "The ancient key opens the mysterious box, revealing a hidden map!",
            )
            .produces("opened-box")
            .unlocks(["hidden-chamber-location"]),
            CombinationRule::new(
                "rusty-key",
                "locked-drawer",
                "The rusty key unlocks the drawer, revealing important documents!",
            )
            .produces("drawer-contents")
            .unlocks(["safe-combination"]),
            // Chemical combinations
            CombinationRule::new(
                "red-potion",
                "blue-potion",
                "The potions combine to create a powerful purple elixir!",
            )
            .produces("purple-elixir")
            .unlocks(["potion-master-secret"]),
            CombinationRule::new(
                "chemical-vial",
                "test-tube",
                "The chemicals react, revealing a hidden message!",
            )
            .produces("mixed-solution")
            .unlocks(["laboratory-password"]),
            // Document combinations
            CombinationRule::new(
                "torn-page-1",
                "torn-page-2",
                "The torn pages form a complete journal entry!",
            )
            .produces("complete-journal")
            .unlocks(["secret-passage-code"]),
            CombinationRule::new(
                "map-fragment-1",
                "map-fragment-2",
                "The map fragments reveal the location of hidden treasure!",
            )
            .produces("treasure-map")
            .unlocks(["treasure-location"]),
            // Mystical combinations
            CombinationRule::new(
                "crystal-shard",
                "magic-staff",
                "The crystal energizes the staff with mystical power!",
            )
            .produces("powered-staff")
            .unlocks(["portal-activation"]),
            CombinationRule::new(
                "spell-scroll",
                "magic-ink",
                "The ink brings the spell to life!",
            )
            .produces("activated-spell")
            .unlocks(["summoning-ritual"]),
            // Tool combinations
            CombinationRule::new(
                "hammer",
                "chisel",
                "The tools can be used together to reveal hidden symbols!",
            )
            .produces("stone-carving-tools")
            .unlocks(["hidden-symbol-meaning"]),
            CombinationRule::new(
                "rope",
                "grappling-hook",
                "Perfect climbing equipment for reaching high places!",
            )
            .produces("climbing-gear")
            .unlocks(["upper-floor-access"]),
        ])
    }

    /// Insert a rule under its canonical pair key.
    pub fn insert(&mut self, rule: CombinationRule) {
        let key = pair_key(&rule.items[0], &rule.items[1]);
        self.rules.insert(key, rule);
    }

    /// Look up the rule for a pair, in either order.
    pub fn lookup(&self, a: &ObjectId, b: &ObjectId) -> Option<&CombinationRule> {
        self.rules.get(&pair_key(a, b))
    }

    /// All rules, in no particular order.
    pub fn rules(&self) -> impl Iterator<Item = &CombinationRule> {
        self.rules.values()
    }

    /// All rules that involve the given item.
    pub fn rules_for(&self, item: &ObjectId) -> Vec<&CombinationRule> {
        self.rules
            .values()
            .filter(|r| r.items.contains(item))
            .collect()
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Resolve a combination of two inventory items.
///
/// Pure: checks preconditions in order (both in inventory, not a
/// self-pair, rule exists) and returns the outcome without touching
/// session state. The session applies the outcome itself.
pub fn resolve(
    table: &CombinationTable,
    a: &ObjectId,
    b: &ObjectId,
    session: &GameSession,
) -> EngineResult<CombinationOutcome> {
    if !session.holds(a) {
        return Err(EngineError::ItemNotInInventory(a.clone()));
    }
    if !session.holds(b) {
        return Err(EngineError::ItemNotInInventory(b.clone()));
    }
    if a == b {
        return Err(EngineError::SelfCombination(a.clone()));
    }
    let rule = table
        .lookup(a, b)
        .ok_or_else(|| EngineError::NoCombinationRule(a.clone(), b.clone()))?;

    Ok(outcome_of(rule, a, b))
}

/// Resolve using an inventory item on a room object.
///
/// Like [`resolve`], but the target only needs to have been examined
/// rather than held; you must look at something before using an item
/// on it.
pub fn resolve_with_room_object(
    table: &CombinationTable,
    item: &ObjectId,
    object: &ObjectId,
    session: &GameSession,
) -> EngineResult<CombinationOutcome> {
    if !session.holds(item) {
        return Err(EngineError::ItemNotInInventory(item.clone()));
    }
    if item == object {
        return Err(EngineError::SelfCombination(item.clone()));
    }
    if !session.has_examined(object) {
        return Err(EngineError::ObjectNotExamined(object.clone()));
    }
    let rule = table
        .lookup(item, object)
        .ok_or_else(|| EngineError::NoCombinationRule(item.clone(), object.clone()))?;

    Ok(outcome_of(rule, item, object))
}

fn outcome_of(rule: &CombinationRule, a: &ObjectId, b: &ObjectId) -> CombinationOutcome {
    CombinationOutcome {
        result_item: rule.result_item.clone(),
        consumed: [a.clone(), b.clone()],
        unlocked_clues: rule.unlocked_clues.clone(),
        message: rule.message.clone(),
    }
}
