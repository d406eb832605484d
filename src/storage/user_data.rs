//! The user's persisted data: entries, the open check-in and remembered pay
//! rates.
//!
//! Every mutation is written back to the [`JsonStore`] immediately and only
//! takes effect in memory once the write succeeded.

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::{Field, TrackerError, TrackerResult, ValidationError};
use crate::models::{Duration, Entry, WorkInfos};

use super::sanitize::{repair_check_in, repair_entries, repair_work_infos};
use super::store::JsonStore;

/// Storage key of the entry list.
pub const ENTRIES_KEY: &str = "entries";
/// Storage key of the open check-in instant.
pub const CHECK_IN_KEY: &str = "checkInTime";
/// Storage key of the remembered pay rates.
pub const WORK_INFOS_KEY: &str = "prevWorkInfos";

/// In-memory view of the stored user data.
///
/// # Example
///
/// ```no_run
/// use pay_tracker::storage::{JsonStore, UserData};
/// use chrono::NaiveDateTime;
///
/// let store = JsonStore::open("./data")?;
/// let mut data = UserData::load(store)?;
///
/// let start = NaiveDateTime::parse_from_str("2024-01-01 09:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
/// let end = NaiveDateTime::parse_from_str("2024-01-01 17:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
///
/// data.check_in(start)?;
/// let entry = data.check_out(end, "Cafe", 25.0, Vec::new())?;
/// println!("Earned {:.2}", entry.income());
/// # Ok::<(), pay_tracker::error::TrackerError>(())
/// ```
#[derive(Debug)]
pub struct UserData {
    store: JsonStore,
    state: State,
}

/// Everything persisted for the user. Mutations build the next state and
/// only replace the current one once every key has been written.
#[derive(Debug, Clone)]
struct State {
    entries: Vec<Entry>,
    check_in_time: Option<NaiveDateTime>,
    work_infos: WorkInfos,
}

impl State {
    fn next_id(&self) -> u64 {
        self.entries
            .iter()
            .map(Entry::id)
            .max()
            .map_or(0, |id| id.saturating_add(1))
    }

    fn write(&self, store: &JsonStore) -> TrackerResult<()> {
        write_key(store, ENTRIES_KEY, &self.entries)?;
        write_key(store, WORK_INFOS_KEY, &self.work_infos)?;
        match self.check_in_time {
            Some(at) => write_key(store, CHECK_IN_KEY, &at),
            None => store.remove(CHECK_IN_KEY),
        }
    }
}

impl UserData {
    /// Loads and repairs everything held in `store`.
    ///
    /// Missing keys load as empty. A key holding unreadable JSON is logged and
    /// treated as missing.
    pub fn load(store: JsonStore) -> TrackerResult<Self> {
        let entries = read_key(&store, ENTRIES_KEY)?
            .map(|value| repair_entries(&value))
            .unwrap_or_default();
        let check_in_time = read_key(&store, CHECK_IN_KEY)?.and_then(|value| repair_check_in(&value));
        let work_infos = read_key(&store, WORK_INFOS_KEY)?
            .map(|value| repair_work_infos(&value))
            .unwrap_or_default();

        info!(
            entries = entries.len(),
            checked_in = check_in_time.is_some(),
            "Loaded user data"
        );
        Ok(Self {
            store,
            state: State {
                entries,
                check_in_time,
                work_infos,
            },
        })
    }

    /// Returns all entries in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.state.entries
    }

    /// Returns the entry with `id`, if any.
    pub fn entry(&self, id: u64) -> Option<&Entry> {
        self.state.entries.iter().find(|entry| entry.id() == id)
    }

    /// Creates an entry with the next free id and remembers its pay rate.
    pub fn add_entry(
        &mut self,
        workplace: &str,
        pay_rate: f64,
        from: NaiveDateTime,
        to: NaiveDateTime,
        unpaid_breaks: Vec<Duration>,
    ) -> TrackerResult<Entry> {
        let mut next = self.state.clone();
        let entry = push_entry(&mut next, workplace, pay_rate, from, to, unpaid_breaks)?;
        self.commit(next)?;
        info!(id = entry.id(), workplace, "Added entry");
        Ok(entry)
    }

    /// Replaces the stored entry that has the same id as `entry`.
    pub fn replace_entry(&mut self, entry: Entry) -> TrackerResult<()> {
        let mut next = self.state.clone();
        let slot = next
            .entries
            .iter_mut()
            .find(|existing| existing.id() == entry.id())
            .ok_or_else(|| unknown_id(entry.id()))?;
        next.work_infos.record(entry.workplace(), entry.pay_rate())?;
        *slot = entry;
        self.commit(next)
    }

    /// Removes and returns the entry with `id`.
    pub fn remove_entry(&mut self, id: u64) -> TrackerResult<Entry> {
        let mut next = self.state.clone();
        let index = next
            .entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| unknown_id(id))?;
        let removed = next.entries.remove(index);
        self.commit(next)?;
        info!(id, "Removed entry");
        Ok(removed)
    }

    /// Returns the open check-in instant, if any.
    pub fn check_in_time(&self) -> Option<NaiveDateTime> {
        self.state.check_in_time
    }

    /// Starts a shift at `at`, replacing any open check-in.
    pub fn check_in(&mut self, at: NaiveDateTime) -> TrackerResult<()> {
        let mut next = self.state.clone();
        if let Some(previous) = next.check_in_time.replace(at) {
            warn!(%previous, "Replacing open check-in");
        }
        self.commit(next)
    }

    /// Ends the open shift at `at`, recording it as a new entry.
    ///
    /// The entry and the cleared check-in are committed together. On any
    /// failure, including a failed write, the check-in stays open and no entry
    /// is added, so the check-out can be retried.
    pub fn check_out(
        &mut self,
        at: NaiveDateTime,
        workplace: &str,
        pay_rate: f64,
        unpaid_breaks: Vec<Duration>,
    ) -> TrackerResult<Entry> {
        let from = self
            .state
            .check_in_time
            .ok_or_else(|| ValidationError::new(Field::From, "not checked in"))?;
        let mut next = self.state.clone();
        let entry = push_entry(&mut next, workplace, pay_rate, from, at, unpaid_breaks)?;
        next.check_in_time = None;
        self.commit(next)?;
        info!(id = entry.id(), workplace, "Checked out");
        Ok(entry)
    }

    /// Returns the remembered pay rates per workplace.
    pub fn work_infos(&self) -> &WorkInfos {
        &self.state.work_infos
    }

    /// Writes every key back to the store.
    pub fn save(&self) -> TrackerResult<()> {
        self.state.write(&self.store)
    }

    /// Writes `next` and adopts it. If a write fails the previous state is
    /// written back where possible and kept in memory.
    fn commit(&mut self, next: State) -> TrackerResult<()> {
        if let Err(error) = next.write(&self.store) {
            if let Err(restore) = self.state.write(&self.store) {
                warn!(%error, %restore, "Could not restore stored user data");
            }
            return Err(error);
        }
        self.state = next;
        Ok(())
    }
}

fn push_entry(
    state: &mut State,
    workplace: &str,
    pay_rate: f64,
    from: NaiveDateTime,
    to: NaiveDateTime,
    unpaid_breaks: Vec<Duration>,
) -> TrackerResult<Entry> {
    let entry = Entry::new(state.next_id(), workplace, pay_rate, from, to, unpaid_breaks)?;
    state.work_infos.record(workplace, pay_rate)?;
    state.entries.push(entry.clone());
    Ok(entry)
}

fn read_key(store: &JsonStore, key: &str) -> TrackerResult<Option<Value>> {
    match store.get(key) {
        Err(TrackerError::Storage { key, message }) => {
            warn!(key = %key, message = %message, "Ignoring unreadable stored value");
            Ok(None)
        }
        other => other,
    }
}

fn write_key<T: Serialize>(store: &JsonStore, key: &str, value: &T) -> TrackerResult<()> {
    let value = serde_json::to_value(value).map_err(|err| TrackerError::Storage {
        key: key.to_string(),
        message: err.to_string(),
    })?;
    store.set(key, &value)
}

fn unknown_id(id: u64) -> TrackerError {
    ValidationError::new(Field::Id, format!("no entry with id {}", id)).into()
}
