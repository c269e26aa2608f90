use crate::shared::infrastructure::local_store::{LocalStore, load_json, save_json};
use serde::{Deserialize, Serialize};

pub const GOALS_KEY: &str = "studyTogetherGoals";

/// Study targets in minutes. Stored in the owner's scope of the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goals {
    #[serde(rename = "dailyGoal")]
    pub daily_minutes: u32,
    #[serde(rename = "weeklyGoal")]
    pub weekly_minutes: u32,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            daily_minutes: 60,
            weekly_minutes: 300,
        }
    }
}

impl Goals {
    pub fn load(store: &dyn LocalStore) -> Self {
        load_json(store, GOALS_KEY)
    }

    pub fn save(&self, store: &dyn LocalStore) -> anyhow::Result<()> {
        save_json(store, GOALS_KEY, self)
    }
}

#[cfg(test)]
mod goals_tests {
    use super::*;
    use crate::shared::infrastructure::local_store::in_memory::InMemoryLocalStore;
    use rstest::rstest;

    #[rstest]
    fn it_should_default_to_an_hour_a_day_and_five_a_week() {
        let store = InMemoryLocalStore::new();
        assert_eq!(
            Goals::load(&store),
            Goals {
                daily_minutes: 60,
                weekly_minutes: 300
            }
        );
    }

    #[rstest]
    fn it_should_read_the_stored_shape() {
        let store = InMemoryLocalStore::new();
        store
            .set(GOALS_KEY, r#"{"dailyGoal":90,"weeklyGoal":450}"#.to_string())
            .unwrap();
        assert_eq!(
            Goals::load(&store),
            Goals {
                daily_minutes: 90,
                weekly_minutes: 450
            }
        );
    }

    #[rstest]
    #[case(r#"{"dailyGoal":-5,"weeklyGoal":300}"#)]
    #[case("not json")]
    fn it_should_fall_back_to_defaults_on_bad_data(#[case] raw: &str) {
        let store = InMemoryLocalStore::new();
        store.set(GOALS_KEY, raw.to_string()).unwrap();
        assert_eq!(Goals::load(&store), Goals::default());
    }

    #[rstest]
    fn it_should_round_trip_through_the_store() {
        let store = InMemoryLocalStore::new();
        let goals = Goals {
            daily_minutes: 0,
            weekly_minutes: 120,
        };
        goals.save(&store).unwrap();
        assert_eq!(Goals::load(&store), goals);
    }
}
