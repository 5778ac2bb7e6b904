use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::models::matches::Match;
use crate::models::pending_result::PendingResult;
use crate::models::settings::LeagueSettings;
use crate::models::team::Team;
use crate::models::user::User;
use crate::store::StoreError;

/// A record stored in one of the flat JSON collections.
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// File stem of the backing collection (`<data_dir>/<COLLECTION>.json`).
    const COLLECTION: &'static str;

    fn id(&self) -> Uuid;
}

impl Entity for Team {
    const COLLECTION: &'static str = "teams";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for Match {
    const COLLECTION: &'static str = "matches";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for PendingResult {
    const COLLECTION: &'static str = "pending_results";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Entity for User {
    const COLLECTION: &'static str = "users";

    fn id(&self) -> Uuid {
        self.id
    }
}

/// One JSON-file-backed collection. The in-memory vector is the working copy;
/// the file is rewritten atomically (temp file + rename) after every mutation.
/// The `RwLock` makes each collection single-writer.
pub struct Collection<T: Entity> {
    path: PathBuf,
    items: RwLock<Vec<T>>,
}

impl<T: Entity> Collection<T> {
    async fn load(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(format!("{}.json", T::COLLECTION));
        let items = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            items: RwLock::new(items),
        })
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: Uuid) -> Option<T> {
        self.items.read().await.iter().find(|t| t.id() == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn insert(&self, item: T) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        items.push(item);
        self.persist(&items).await
    }

    /// Replace the stored record with the same id.
    pub async fn replace(&self, item: T) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|t| t.id() == item.id())
            .ok_or(StoreError::NotFound {
                collection: T::COLLECTION,
                id: item.id(),
            })?;
        *slot = item;
        self.persist(&items).await
    }

    /// Apply a patch to the record with the given id and persist it.
    pub async fn update<F>(&self, id: Uuid, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut T),
    {
        let mut items = self.items.write().await;
        let slot = items
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            })?;
        apply(slot);
        let updated = slot.clone();
        self.persist(&items).await?;
        Ok(updated)
    }

    /// Apply a patch to every record; returns how many reported a change.
    pub async fn update_each<F>(&self, mut apply: F) -> Result<usize, StoreError>
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut items = self.items.write().await;
        let mut changed = 0;
        for item in items.iter_mut() {
            if apply(item) {
                changed += 1;
            }
        }
        if changed > 0 {
            self.persist(&items).await?;
        }
        Ok(changed)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|t| t.id() != id);
        if items.len() == before {
            return Err(StoreError::NotFound {
                collection: T::COLLECTION,
                id,
            });
        }
        self.persist(&items).await
    }

    /// Keep only records matching the predicate; returns how many were removed.
    pub async fn retain<F>(&self, mut keep: F) -> Result<usize, StoreError>
    where
        F: FnMut(&T) -> bool,
    {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|t| keep(t));
        let removed = before - items.len();
        if removed > 0 {
            self.persist(&items).await?;
        }
        Ok(removed)
    }

    pub async fn clear(&self) -> Result<usize, StoreError> {
        let mut items = self.items.write().await;
        let removed = items.len();
        items.clear();
        self.persist(&items).await?;
        Ok(removed)
    }

    async fn persist(&self, items: &[T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

struct SettingsFile {
    path: PathBuf,
    value: RwLock<LeagueSettings>,
}

impl SettingsFile {
    async fn load(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join("settings.json");
        let value = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => LeagueSettings::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            value: RwLock::new(value),
        })
    }

    async fn get(&self) -> LeagueSettings {
        self.value.read().await.clone()
    }

    async fn put(&self, settings: LeagueSettings) -> Result<(), StoreError> {
        let mut value = self.value.write().await;
        let bytes = serde_json::to_vec_pretty(&settings)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        *value = settings;
        Ok(())
    }
}

/// The flat-file entity store. One JSON file per collection under the data
/// directory, plus the single settings document.
///
/// The store is not transactional across collections: multi-entity operations
/// are best-effort sagas ordered by their caller. The `stats_gate` serializes
/// every read-modify-write of team aggregates so concurrent approvals or
/// edits cannot race on the stored totals.
pub struct JsonStore {
    pub teams: Collection<Team>,
    pub matches: Collection<Match>,
    pub pending_results: Collection<PendingResult>,
    pub users: Collection<User>,
    settings: SettingsFile,
    stats_gate: Mutex<()>,
}

impl JsonStore {
    pub async fn load(data_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = data_dir.as_ref();
        tokio::fs::create_dir_all(dir).await?;
        Ok(Self {
            teams: Collection::load(dir).await?,
            matches: Collection::load(dir).await?,
            pending_results: Collection::load(dir).await?,
            users: Collection::load(dir).await?,
            settings: SettingsFile::load(dir).await?,
            stats_gate: Mutex::new(()),
        })
    }

    pub async fn settings(&self) -> LeagueSettings {
        self.settings.get().await
    }

    pub async fn put_settings(&self, settings: LeagueSettings) -> Result<(), StoreError> {
        self.settings.put(settings).await
    }

    /// Lock guarding team-aggregate read-modify-write cycles. Held across the
    /// whole revert+reapply unit of a match edit.
    pub fn stats_gate(&self) -> &Mutex<()> {
        &self.stats_gate
    }
}
