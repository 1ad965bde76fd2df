//! "My plants" screen: saved reminders, next-watering banner, and removal.

use chrono::{DateTime, Utc};

use crate::db::ReminderRepository;
use crate::error::Result;
use crate::models::{PlantId, SavedPlant};
use crate::relative_time::{format_distance, Locale};
use crate::state::LoadState;

/// A two-choice confirmation the front end must show before acting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub cancel_label: String,
    pub confirm_label: String,
}

/// Result of a confirmed removal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovalOutcome {
    Removed(PlantId),
    /// The store rejected the delete; the displayed list is unchanged
    Failed { alert: String },
}

/// The plant whose watering comes up first, with its banner text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextWatering {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub at: DateTime<Utc>,
    /// Distance from the screen's clock to `at`, e.g. "3 dias"
    pub distance: String,
    pub message: String,
}

/// State of the "my plants" screen
#[derive(Debug, Clone)]
pub struct MyPlantsScreen {
    plants: Vec<SavedPlant>,
    state: LoadState,
    locale: Locale,
    next_watering: Option<NextWatering>,
    alert: Option<String>,
}

impl MyPlantsScreen {
    pub const fn new(locale: Locale) -> Self {
        Self {
            plants: Vec::new(),
            state: LoadState::Loading,
            locale,
            next_watering: None,
            alert: None,
        }
    }

    /// Load every saved plant and compute the next-watering banner.
    pub async fn mount<R: ReminderRepository>(
        &mut self,
        repo: &R,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.state = LoadState::Loading;
        self.plants = repo.list().await?;
        self.refresh_next_watering(now);
        self.state = LoadState::Ready;
        tracing::debug!(count = self.plants.len(), "My plants mounted");
        Ok(())
    }

    /// Recompute the banner against `now`.
    pub fn refresh_next_watering(&mut self, now: DateTime<Utc>) {
        self.next_watering = next_due(&self.plants).map(|plant| {
            let distance = format_distance(plant.date_time_notification, now, self.locale);
            NextWatering {
                plant_id: plant.id().clone(),
                plant_name: plant.name().to_string(),
                at: plant.date_time_notification,
                message: self.locale.watering_reminder(plant.name(), &distance),
                distance,
            }
        });
    }

    /// The confirmation to show before removing `id`, if it is listed
    pub fn removal_prompt(&self, id: &PlantId) -> Option<ConfirmPrompt> {
        let plant = self.plants.iter().find(|plant| plant.id() == id)?;
        Some(match self.locale {
            Locale::PtBr => ConfirmPrompt {
                title: "Remover".to_string(),
                message: format!("Deseja remover a {}?", plant.name()),
                cancel_label: "Não 🙏".to_string(),
                confirm_label: "Sim 😥".to_string(),
            },
            Locale::EnUs => ConfirmPrompt {
                title: "Remove".to_string(),
                message: format!("Do you want to remove the {}?", plant.name()),
                cancel_label: "No 🙏".to_string(),
                confirm_label: "Yes 😥".to_string(),
            },
        })
    }

    /// Remove `id` after the user confirmed.
    ///
    /// The displayed list only changes once the store delete succeeded. On
    /// failure the alert is also kept for `take_alert`.
    pub async fn confirm_removal<R: ReminderRepository>(
        &mut self,
        repo: &R,
        id: &PlantId,
        now: DateTime<Utc>,
    ) -> RemovalOutcome {
        match repo.remove(id).await {
            Ok(()) => {
                self.plants.retain(|plant| plant.id() != id);
                self.refresh_next_watering(now);
                RemovalOutcome::Removed(id.clone())
            }
            Err(error) => {
                tracing::warn!(%id, %error, "Failed to remove saved plant");
                let alert = self.removal_failed_alert().to_string();
                self.alert = Some(alert.clone());
                RemovalOutcome::Failed { alert }
            }
        }
    }

    const fn removal_failed_alert(&self) -> &'static str {
        match self.locale {
            Locale::PtBr => "Não foi possível remover! 😥",
            Locale::EnUs => "Could not remove it! 😥",
        }
    }

    /// Pending alert, cleared once taken
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    pub fn plants(&self) -> &[SavedPlant] {
        &self.plants
    }

    pub const fn next_watering(&self) -> Option<&NextWatering> {
        self.next_watering.as_ref()
    }

    pub const fn state(&self) -> LoadState {
        self.state
    }

    pub const fn locale(&self) -> Locale {
        self.locale
    }
}

/// The saved plant with the earliest notification; the first one on ties.
pub fn next_due(plants: &[SavedPlant]) -> Option<&SavedPlant> {
    plants.iter().min_by_key(|plant| plant.date_time_notification)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::{Frequency, Plant, RepeatEvery};
    use crate::services::ReminderService;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    /// Store whose deletes always fail
    struct ReadOnlyStore {
        plants: Vec<SavedPlant>,
    }

    impl ReminderRepository for ReadOnlyStore {
        async fn list(&self) -> Result<Vec<SavedPlant>> {
            Ok(self.plants.clone())
        }

        async fn get(&self, id: &PlantId) -> Result<Option<SavedPlant>> {
            Ok(self.plants.iter().find(|plant| plant.id() == id).cloned())
        }

        async fn save(&self, _plant: &SavedPlant) -> Result<()> {
            Err(Error::Database("store is read-only".to_string()))
        }

        async fn remove(&self, _id: &PlantId) -> Result<()> {
            Err(Error::Database("store is read-only".to_string()))
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
    }

    fn saved(id: &str, name: &str, notify_at: DateTime<Utc>) -> SavedPlant {
        SavedPlant::new(
            Plant {
                id: PlantId::from(id),
                name: name.to_string(),
                about: String::new(),
                water_tips: String::new(),
                photo: String::new(),
                environments: Vec::new(),
                frequency: Frequency {
                    times: 1,
                    repeat_every: RepeatEvery::Day,
                },
            },
            notify_at,
        )
    }

    async fn store_with(plants: &[SavedPlant]) -> ReminderService {
        let service = ReminderService::open_in_memory().await.unwrap();
        for plant in plants {
            service.save(plant).await.unwrap();
        }
        service
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn banner_uses_first_of_time_ordered_store() {
        let t1 = now() + Duration::days(2);
        let t2 = now() + Duration::days(5);
        let store = store_with(&[saved("1", "Aningapara", t1), saved("2", "Imbé", t2)]).await;
        let mut screen = MyPlantsScreen::new(Locale::PtBr);

        screen.mount(&store, now()).await.unwrap();

        let next = screen.next_watering().unwrap();
        assert_eq!(next.plant_id.as_str(), "1");
        assert_eq!(next.at, t1);
        assert_eq!(next.distance, "2 dias");
        assert_eq!(next.message, "Não esqueça de regar a Aningapara à 2 dias.");
        assert_eq!(screen.plants().len(), 2);
        assert_eq!(screen.state(), LoadState::Ready);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn banner_uses_earliest_even_when_store_is_not_ordered() {
        let store = store_with(&[
            saved("1", "Aningapara", now() + Duration::days(5)),
            saved("2", "Imbé", now() + Duration::hours(3)),
        ])
        .await;
        let mut screen = MyPlantsScreen::new(Locale::EnUs);

        screen.mount(&store, now()).await.unwrap();

        let next = screen.next_watering().unwrap();
        assert_eq!(next.plant_name, "Imbé");
        assert_eq!(next.message, "Don't forget to water the Imbé in about 3 hours.");
        // Listing keeps stored order
        assert_eq!(screen.plants()[0].id().as_str(), "1");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn empty_store_has_no_banner() {
        let store = store_with(&[]).await;
        let mut screen = MyPlantsScreen::new(Locale::PtBr);

        screen.mount(&store, now()).await.unwrap();

        assert!(screen.plants().is_empty());
        assert!(screen.next_watering().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn removal_prompt_offers_two_choices() {
        let store = store_with(&[saved("1", "Aningapara", now())]).await;
        let mut screen = MyPlantsScreen::new(Locale::PtBr);
        screen.mount(&store, now()).await.unwrap();

        let prompt = screen.removal_prompt(&PlantId::from("1")).unwrap();
        assert_eq!(prompt.title, "Remover");
        assert_eq!(prompt.message, "Deseja remover a Aningapara?");
        assert_eq!(prompt.cancel_label, "Não 🙏");
        assert_eq!(prompt.confirm_label, "Sim 😥");

        assert!(screen.removal_prompt(&PlantId::from("9")).is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn confirmed_removal_updates_store_and_list() {
        let store = store_with(&[
            saved("1", "Aningapara", now() + Duration::days(1)),
            saved("2", "Imbé", now() + Duration::days(3)),
        ])
        .await;
        let mut screen = MyPlantsScreen::new(Locale::PtBr);
        screen.mount(&store, now()).await.unwrap();

        let outcome = screen
            .confirm_removal(&store, &PlantId::from("1"), now())
            .await;

        assert_eq!(outcome, RemovalOutcome::Removed(PlantId::from("1")));
        assert!(screen.plants().iter().all(|plant| plant.id().as_str() != "1"));
        assert!(store
            .list()
            .await
            .unwrap()
            .iter()
            .all(|plant| plant.id().as_str() != "1"));
        assert_eq!(screen.next_watering().unwrap().plant_name, "Imbé");
        assert!(screen.take_alert().is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_removal_keeps_list_and_alerts() {
        let store = ReadOnlyStore {
            plants: vec![
                saved("1", "Aningapara", now() + Duration::days(1)),
                saved("2", "Imbé", now() + Duration::days(3)),
            ],
        };
        let mut screen = MyPlantsScreen::new(Locale::PtBr);
        screen.mount(&store, now()).await.unwrap();
        let before = screen.plants().to_vec();

        let outcome = screen
            .confirm_removal(&store, &PlantId::from("1"), now())
            .await;

        assert_eq!(
            outcome,
            RemovalOutcome::Failed {
                alert: "Não foi possível remover! 😥".to_string()
            }
        );
        assert_eq!(screen.plants(), before.as_slice());
        assert_eq!(
            screen.take_alert().as_deref(),
            Some("Não foi possível remover! 😥")
        );
        assert!(screen.take_alert().is_none());
    }

    #[test]
    fn next_due_prefers_first_on_ties() {
        let at = now();
        let plants = vec![saved("1", "A", at), saved("2", "B", at)];
        assert_eq!(next_due(&plants).unwrap().id().as_str(), "1");
    }
}
