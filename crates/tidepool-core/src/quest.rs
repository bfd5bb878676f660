//! Quest tracking.
//!
//! Quests are evaluated against the post-tick state once per tick. Each
//! quest's [`QuestKind`] selects the observable that drives its progress.
//! Completion is one-way and pays its reward exactly once.

use tidepool_types::{Notification, Quest, QuestKind, TankState, WATER_QUALITY_MAX};
use tracing::info;

/// Outcome of one quest evaluation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestProgress {
    /// IDs of quests completed during this pass.
    pub completed: Vec<String>,
    /// Total coins credited during this pass.
    pub reward_total: u64,
    /// One `QuestCompleted` notification per completed quest.
    pub notifications: Vec<Notification>,
}

/// The quests of one tank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestBook {
    quests: Vec<Quest>,
}

impl Default for QuestBook {
    fn default() -> Self {
        Self::new(default_quests())
    }
}

/// The starter quest list.
pub fn default_quests() -> Vec<Quest> {
    vec![
        Quest {
            id: String::from("q1"),
            description: String::from("Get your first fish"),
            target: 1,
            current: 0,
            completed: false,
            reward: 100,
            kind: QuestKind::Population,
        },
        Quest {
            id: String::from("q2"),
            description: String::from("Keep the water perfectly clean for 10 ticks"),
            target: 10,
            current: 0,
            completed: false,
            reward: 200,
            kind: QuestKind::PerfectWater,
        },
    ]
}

impl QuestBook {
    /// Create a book from an explicit quest list.
    pub const fn new(quests: Vec<Quest>) -> Self {
        Self { quests }
    }

    /// All quests in order.
    pub fn quests(&self) -> &[Quest] {
        &self.quests
    }

    /// Update progress from `state`, crediting rewards for newly completed
    /// quests to `state.coins`.
    pub fn evaluate(&mut self, state: &mut TankState) -> QuestProgress {
        let mut progress = QuestProgress::default();
        let population = u32::try_from(state.creatures.len()).unwrap_or(u32::MAX);
        let perfect_water = (state.water_quality - WATER_QUALITY_MAX).abs() < f64::EPSILON;

        for quest in self.quests.iter_mut().filter(|q| !q.completed) {
            match quest.kind {
                QuestKind::Population => quest.current = population,
                QuestKind::PerfectWater => {
                    if perfect_water {
                        quest.current = quest.current.saturating_add(1);
                    }
                }
                QuestKind::LevelUp | QuestKind::ReleaseCreature => continue,
            }

            if quest.current >= quest.target {
                quest.completed = true;
                state.coins = state.coins.saturating_add(quest.reward);
                progress.reward_total = progress.reward_total.saturating_add(quest.reward);
                progress.completed.push(quest.id.clone());
                progress.notifications.push(Notification::QuestCompleted {
                    quest_id: quest.id.clone(),
                    reward: quest.reward,
                });
                info!(quest_id = %quest.id, reward = quest.reward, "Quest completed");
            }
        }

        progress
    }
}
