//! Persistence for the four record collections.
//!
//! Each collection lives under its own storage key as a JSON array; every
//! write is a full read-modify-write of that one key. Reads that hit a
//! missing or corrupt value degrade to an empty collection (logged, never
//! raised); writes that fail are surfaced as a generic operation error.

pub mod access_log;
pub mod backend;

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::error;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{BabyDedication, MarriagePreparation, Member, NewlyWed};

use backend::{FileStore, MemoryStore, StorageBackend};

pub const MEMBERS_KEY: &str = "members";
pub const NEWLY_WEDS_KEY: &str = "newly_weds";
pub const MARRIAGE_PREP_KEY: &str = "marriage_prep";
pub const BABY_DEDICATIONS_KEY: &str = "baby_dedications";

/// The collection keys wiped by `clear_all`. The access log has its own key
/// and its own `clear_access_log`.
const COLLECTION_KEYS: [&str; 4] = [
    MEMBERS_KEY,
    NEWLY_WEDS_KEY,
    MARRIAGE_PREP_KEY,
    BABY_DEDICATIONS_KEY,
];

/// The record store over a pluggable key-value backend.
#[derive(Debug)]
pub struct RecordStore<S: StorageBackend> {
    backend: S,
}

impl RecordStore<FileStore> {
    /// Open a store over JSON files in `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let backend = FileStore::open(dir).map_err(Error::Storage)?;
        Ok(Self::new(backend))
    }

    /// Open a store in the configured (or default) data directory.
    pub fn open_default() -> Result<Self> {
        let config = Config::load().map_err(Error::Storage)?;
        let dir = config.data_dir().map_err(Error::Storage)?;
        Self::open(dir)
    }
}

impl RecordStore<MemoryStore> {
    /// An empty in-memory store, mainly for tests.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }
}

impl<S: StorageBackend> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub(crate) fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    // ===== Generic helpers =====

    /// Decode a stored collection. Absent or corrupt values degrade to an
    /// empty list; failures never propagate to the caller.
    pub(crate) fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.backend.get(key) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(list) => list,
                Err(e) => {
                    error!(key, error = %e, "stored collection is corrupt, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                error!(key, error = %e, "failed to read collection, treating as empty");
                Vec::new()
            }
        }
    }

    pub(crate) fn store_list<T: Serialize>(&mut self, key: &str, list: &[T]) -> anyhow::Result<()> {
        let raw = serde_json::to_string(list)?;
        self.backend.set(key, &raw)
    }

    fn upsert<T, F>(&mut self, key: &str, record: T, id_of: F) -> anyhow::Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> &str,
    {
        let mut list: Vec<T> = self.load_list(key);
        match list.iter().position(|r| id_of(r) == id_of(&record)) {
            Some(idx) => list[idx] = record,
            None => list.push(record),
        }
        self.store_list(key, &list)
    }

    fn delete_by_id<T, F>(&mut self, key: &str, id: &str, id_of: F) -> anyhow::Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> &str,
    {
        let mut list: Vec<T> = self.load_list(key);
        list.retain(|r| id_of(r) != id);
        self.store_list(key, &list)
    }

    // ===== Members =====

    pub fn members(&self) -> Vec<Member> {
        self.load_list(MEMBERS_KEY)
    }

    /// Upsert a member, recomputing the derived age group as of today.
    pub fn save_member(&mut self, member: Member) -> Result<()> {
        self.save_member_as_of(member, Utc::now().date_naive())
    }

    /// Upsert a member with an explicit "today" for the age-group
    /// recomputation. The derived field is never trusted from the caller.
    pub fn save_member_as_of(&mut self, mut member: Member, today: NaiveDate) -> Result<()> {
        member.refresh_age_group(today);
        self.upsert(MEMBERS_KEY, member, |m: &Member| &m.id)
            .map_err(|source| {
                error!(error = %source, "failed to save member");
                Error::save_failed("member", source)
            })
    }

    pub fn delete_member(&mut self, id: &str) -> Result<()> {
        self.delete_by_id::<Member, _>(MEMBERS_KEY, id, |m| &m.id)
            .map_err(|source| {
                error!(error = %source, "failed to delete member");
                Error::delete_failed("member", source)
            })
    }

    // ===== Newly-weds =====

    pub fn newly_weds(&self) -> Vec<NewlyWed> {
        self.load_list(NEWLY_WEDS_KEY)
    }

    pub fn save_newly_wed(&mut self, record: NewlyWed) -> Result<()> {
        self.upsert(NEWLY_WEDS_KEY, record, |r: &NewlyWed| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to save newly wed");
                Error::save_failed("newly wed", source)
            })
    }

    pub fn delete_newly_wed(&mut self, id: &str) -> Result<()> {
        self.delete_by_id::<NewlyWed, _>(NEWLY_WEDS_KEY, id, |r| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to delete newly wed");
                Error::delete_failed("newly wed", source)
            })
    }

    // ===== Marriage preparation =====

    pub fn marriage_prep(&self) -> Vec<MarriagePreparation> {
        self.load_list(MARRIAGE_PREP_KEY)
    }

    pub fn save_marriage_prep(&mut self, record: MarriagePreparation) -> Result<()> {
        self.upsert(MARRIAGE_PREP_KEY, record, |r: &MarriagePreparation| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to save marriage preparation");
                Error::save_failed("marriage preparation", source)
            })
    }

    pub fn delete_marriage_prep(&mut self, id: &str) -> Result<()> {
        self.delete_by_id::<MarriagePreparation, _>(MARRIAGE_PREP_KEY, id, |r| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to delete marriage preparation");
                Error::delete_failed("marriage preparation", source)
            })
    }

    // ===== Baby dedications =====

    pub fn baby_dedications(&self) -> Vec<BabyDedication> {
        self.load_list(BABY_DEDICATIONS_KEY)
    }

    pub fn save_baby_dedication(&mut self, record: BabyDedication) -> Result<()> {
        self.upsert(BABY_DEDICATIONS_KEY, record, |r: &BabyDedication| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to save baby dedication");
                Error::save_failed("baby dedication", source)
            })
    }

    pub fn delete_baby_dedication(&mut self, id: &str) -> Result<()> {
        self.delete_by_id::<BabyDedication, _>(BABY_DEDICATIONS_KEY, id, |r| &r.id)
            .map_err(|source| {
                error!(error = %source, "failed to delete baby dedication");
                Error::delete_failed("baby dedication", source)
            })
    }

    // ===== Bulk operations =====

    /// Remove all four collections. The access log is left alone.
    pub fn clear_all(&mut self) -> Result<()> {
        for key in COLLECTION_KEYS {
            self.backend.remove(key).map_err(|source| {
                error!(key, error = %source, "failed to clear collection");
                Error::ClearFailed(source)
            })?;
        }
        Ok(())
    }

    /// Serialize all four collections, wrapped with an export timestamp, as
    /// indented JSON.
    pub fn export_json(&self) -> Result<String> {
        let payload = ExportPayload {
            members: Some(self.members()),
            newly_weds: Some(self.newly_weds()),
            marriage_prep: Some(self.marriage_prep()),
            baby_dedications: Some(self.baby_dedications()),
            export_date: Some(Utc::now()),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            error!(error = %e, "failed to export data");
            Error::ExportFailed(e.into())
        })
    }

    /// Import a payload in the export shape. Collections present in the
    /// payload overwrite the stored ones wholesale; absent collections are
    /// left untouched.
    pub fn import_json(&mut self, raw: &str) -> Result<()> {
        let payload: ExportPayload = serde_json::from_str(raw).map_err(|e| {
            error!(error = %e, "failed to parse import payload");
            Error::ImportFailed(e.into())
        })?;

        if let Some(members) = payload.members {
            self.store_list(MEMBERS_KEY, &members)
                .map_err(Error::ImportFailed)?;
        }
        if let Some(newly_weds) = payload.newly_weds {
            self.store_list(NEWLY_WEDS_KEY, &newly_weds)
                .map_err(Error::ImportFailed)?;
        }
        if let Some(marriage_prep) = payload.marriage_prep {
            self.store_list(MARRIAGE_PREP_KEY, &marriage_prep)
                .map_err(Error::ImportFailed)?;
        }
        if let Some(baby_dedications) = payload.baby_dedications {
            self.store_list(BABY_DEDICATIONS_KEY, &baby_dedications)
                .map_err(Error::ImportFailed)?;
        }
        Ok(())
    }
}

/// The export file shape: the four collections plus an `exportDate` stamp.
/// All fields are optional on the way in so a partial payload imports only
/// what it carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub members: Option<Vec<Member>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newly_weds: Option<Vec<NewlyWed>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marriage_prep: Option<Vec<MarriagePreparation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baby_dedications: Option<Vec<BabyDedication>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_date: Option<DateTime<Utc>>,
}
