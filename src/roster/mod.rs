//! Character roster and ability invocation.
//!
//! The playable-character side of the prototype: named characters carry a
//! list of abilities, one character is selected at a time, and invoking an
//! ability slot produces a record of who did what. Everything is plain data
//! passed explicitly - selection state lives in a [`SelectionController`]
//! value and every method takes the roster it reads, so no global registry
//! is involved.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// A named ability a character can use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    /// Tag naming the icon a UI layer should show for this ability
    pub icon_tag: String,
}

impl Ability {
    pub fn new(name: impl Into<String>, icon_tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon_tag: icon_tag.into(),
        }
    }

    /// Activates the ability on behalf of `character`.
    ///
    /// The prototype has no combat resolution yet; an invocation is logged
    /// and returned as a record so callers and tests can observe it.
    pub fn trigger(&self, character: &Character) -> AbilityInvocation {
        let invocation = AbilityInvocation {
            ability: self.name.clone(),
            character: character.name.clone(),
        };
        info!("{invocation}");
        invocation
    }
}

/// Record of a single ability activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityInvocation {
    pub ability: String,
    pub character: String,
}

impl std::fmt::Display for AbilityInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ability \"{}\" invoked for character \"{}\"",
            self.ability, self.character
        )
    }
}

/// A playable character with a health pool and an ability list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub max_health: u32,
    health: u32,
    pub abilities: Vec<Ability>,
}

impl Character {
    /// Creates a character at full health.
    pub fn new(name: impl Into<String>, max_health: u32, abilities: Vec<Ability>) -> Self {
        Self {
            name: name.into(),
            max_health,
            health: max_health,
            abilities,
        }
    }

    /// Start-of-run placeholder roll: health anywhere in `[0, max_health)`.
    /// Makes per-character health differences visible immediately in demos.
    pub fn with_random_health<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.health = if self.max_health > 0 {
            rng.gen_range(0..self.max_health)
        } else {
            0
        };
        self
    }

    pub fn health(&self) -> u32 {
        self.health
    }
}

/// The set of characters available this run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub characters: Vec<Character>,
}

impl Roster {
    pub fn new(characters: Vec<Character>) -> Self {
        Self { characters }
    }

    pub fn get(&self, index: usize) -> Option<&Character> {
        self.characters.get(index)
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Tracks which character is active and which abilities its slots expose.
///
/// The ability list is copied at selection time, the same way a hotbar UI is
/// wired up once per selection rather than re-read on every press.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionController {
    selected: Option<usize>,
    abilities: Vec<Ability>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the character at `index`. Returns false when out of range,
    /// leaving any previous selection intact.
    pub fn select(&mut self, roster: &Roster, index: usize) -> bool {
        let Some(character) = roster.get(index) else {
            return false;
        };
        self.selected = Some(index);
        self.abilities = character.abilities.clone();
        info!(
            "Selected \"{}\" ({} abilities, {}/{} health)",
            character.name,
            self.abilities.len(),
            character.health(),
            character.max_health
        );
        true
    }

    /// Drops the current selection and its ability snapshot.
    pub fn clear(&mut self) {
        self.selected = None;
        self.abilities.clear();
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Resolves the selected character against `roster`.
    pub fn selected<'a>(&self, roster: &'a Roster) -> Option<&'a Character> {
        self.selected.and_then(|index| roster.get(index))
    }

    /// Number of ability slots the current selection exposes.
    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Invokes the ability in `slot` for the selected character.
    ///
    /// Returns `None` (with a warning, not a panic) when nothing is selected
    /// or the slot is out of range.
    pub fn invoke(&self, roster: &Roster, slot: usize) -> Option<AbilityInvocation> {
        let Some(character) = self.selected(roster) else {
            warn!("Ability slot {slot} pressed with no character selected");
            return None;
        };
        let Some(ability) = self.abilities.get(slot) else {
            warn!(
                "\"{}\" has no ability in slot {} ({} available)",
                character.name,
                slot,
                self.abilities.len()
            );
            return None;
        };
        Some(ability.trigger(character))
    }

    /// One-line health readout for the selected character, if any.
    pub fn status_line(&self, roster: &Roster) -> Option<String> {
        self.selected(roster)
            .map(|c| format!("{} health: {}", c.name, c.health()))
    }
}

/// Predefined demo roster, mirroring the hand-authored characters the
/// prototype scene shipped with.
pub fn demo_roster() -> Roster {
    Roster::new(vec![
        // === Frontline ===
        Character::new(
            "Maela the Warden",
            100,
            vec![
                Ability::new("Shield Bash", "shield_bash"),
                Ability::new("Rallying Cry", "support_buff"),
            ],
        ),
        // === Caster ===
        Character::new(
            "Corin Ashfall",
            80,
            vec![
                Ability::new("Ember Bolt", "fire_bolt"),
                Ability::new("Cinder Step", "dodge_dash"),
                Ability::new("Ashen Ward", "shield_magic"),
            ],
        ),
        // === Skirmisher ===
        Character::new(
            "Tessik",
            60,
            vec![
                Ability::new("Fan of Knives", "knife_fan"),
                Ability::new("Smoke Veil", "smoke_veil"),
            ],
        ),
    ])
}
