//! Notifications emitted by the tick resolver and the command layer.
//!
//! The core never plays sounds or shows toasts. It returns a list of
//! [`Notification`]s alongside the new state and the presentation layer
//! decides how to surface them.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::Species;
use crate::ids::{CreatureId, EventId};

/// A side-effect signal for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Notification {
    /// A creature's health reached zero this tick.
    CreatureDied {
        /// The creature that died.
        creature_id: CreatureId,
        /// Its display name.
        name: String,
        /// Its species.
        species: Species,
    },
    /// A creature gained a level this tick.
    LevelUp {
        /// The creature that leveled.
        creature_id: CreatureId,
        /// Its display name.
        name: String,
        /// The new level.
        level: u32,
        /// Coins credited for the level-up.
        bonus_coins: u64,
    },
    /// A feed command was applied.
    FeedApplied {
        /// Coins debited.
        cost: u64,
        /// Number of living creatures fed.
        fed: u32,
    },
    /// The water was cleaned back to full quality.
    WaterCleaned {
        /// Coins debited.
        cost: u64,
    },
    /// A creature or decoration was bought.
    PurchaseApplied {
        /// Species or decoration identifier.
        item: String,
        /// Coins debited.
        cost: u64,
    },
    /// A random event was triggered.
    EventTriggered {
        /// The new event.
        event_id: EventId,
        /// Its title.
        title: String,
    },
    /// The active event was resolved by choosing an option.
    EventResolved {
        /// The resolved event.
        event_id: EventId,
        /// Label of the chosen option.
        option: String,
    },
    /// The audio mute flag was flipped.
    AudioToggled {
        /// Whether audio is now muted.
        muted: bool,
    },
    /// A quest reached its target and paid its reward.
    QuestCompleted {
        /// The completed quest.
        quest_id: String,
        /// Coins credited.
        reward: u64,
    },
}

impl Notification {
    /// Short human-readable text suitable for a toast.
    pub fn message(&self) -> String {
        match self {
            Self::CreatureDied { name, species, .. } => {
                format!("{name} the {species} has died")
            }
            Self::LevelUp {
                name,
                level,
                bonus_coins,
                ..
            } => format!("{name} reached level {level} (+{bonus_coins} coins)"),
            Self::FeedApplied { fed, .. } => format!("Fed {fed} creatures"),
            Self::WaterCleaned { .. } => String::from("Water cleaned"),
            Self::PurchaseApplied { item, cost } => format!("Bought {item} for {cost} coins"),
            Self::EventTriggered { title, .. } => format!("Event: {title}"),
            Self::EventResolved { option, .. } => format!("Chose: {option}"),
            Self::AudioToggled { muted: true } => String::from("Audio muted"),
            Self::AudioToggled { muted: false } => String::from("Audio unmuted"),
            Self::QuestCompleted { quest_id, reward } => {
                format!("Quest {quest_id} complete (+{reward} coins)")
            }
        }
    }
}
