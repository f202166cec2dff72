//! In-memory user repository.
//!
//! Keeps soft-deleted records around, counts calls per operation and can be
//! switched into a failing mode to simulate a storage outage.

use crate::traits::UserRepository;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;
use roster_core::{NewUser, RosterError, RosterResult, User, UserId, UserRecord};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Number of calls made to each gateway operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepositoryCalls {
    pub create: usize,
    pub find_by_id: usize,
    pub find_by_email: usize,
    pub find_all: usize,
    pub update: usize,
    pub delete: usize,
    pub count: usize,
}

impl RepositoryCalls {
    /// Total number of calls across all operations.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.create
            + self.find_by_id
            + self.find_by_email
            + self.find_all
            + self.update
            + self.delete
            + self.count
    }
}

#[derive(Default)]
struct Counters {
    create: AtomicUsize,
    find_by_id: AtomicUsize,
    find_by_email: AtomicUsize,
    find_all: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
    count: AtomicUsize,
}

#[derive(Default)]
struct Store {
    records: BTreeMap<UserId, UserRecord>,
    last_id: i64,
}

impl Store {
    fn email_taken(&self, email: &str, except: Option<UserId>) -> bool {
        self.records
            .values()
            .filter_map(UserRecord::live)
            .any(|user| user.email == email && Some(user.id) != except)
    }
}

/// In-memory user repository.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
    calls: Counters,
    unavailable: AtomicBool,
}

impl InMemoryUserRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of the call counters.
    #[must_use]
    pub fn calls(&self) -> RepositoryCalls {
        let c = &self.calls;
        RepositoryCalls {
            create: c.create.load(Ordering::SeqCst),
            find_by_id: c.find_by_id.load(Ordering::SeqCst),
            find_by_email: c.find_by_email.load(Ordering::SeqCst),
            find_all: c.find_all.load(Ordering::SeqCst),
            update: c.update.load(Ordering::SeqCst),
            delete: c.delete.load(Ordering::SeqCst),
            count: c.count.load(Ordering::SeqCst),
        }
    }

    /// Makes every operation fail with a database error while set.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Returns the stored record for `id`, including soft-deleted ones.
    #[must_use]
    pub fn record(&self, id: UserId) -> Option<UserRecord> {
        self.store.lock().records.get(&id).cloned()
    }

    /// Inserts a user directly, bypassing counters and availability.
    pub fn seed(&self, user: NewUser) -> User {
        let mut store = self.store.lock();
        store.last_id += 1;
        let stored = user.into_user(UserId::new(store.last_id), Utc::now());
        store
            .records
            .insert(stored.id, UserRecord::active(stored.clone()));
        stored
    }

    fn enter(&self, counter: &AtomicUsize) -> RosterResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RosterError::Database("connection refused".to_string()));
        }
        Ok(())
    }
}

fn email_conflict() -> RosterError {
    RosterError::already_exists("user with this email already exists")
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> RosterResult<User> {
        self.enter(&self.calls.create)?;
        let mut store = self.store.lock();
        if store.email_taken(&user.email, None) {
            return Err(email_conflict());
        }
        store.last_id += 1;
        let stored = user.clone().into_user(UserId::new(store.last_id), Utc::now());
        store
            .records
            .insert(stored.id, UserRecord::active(stored.clone()));
        Ok(stored)
    }

    async fn find_by_id(&self, id: UserId) -> RosterResult<User> {
        self.enter(&self.calls.find_by_id)?;
        self.store
            .lock()
            .records
            .get(&id)
            .and_then(UserRecord::live)
            .cloned()
            .ok_or_else(|| RosterError::not_found("User", id))
    }

    async fn find_by_email(&self, email: &str) -> RosterResult<User> {
        self.enter(&self.calls.find_by_email)?;
        self.store
            .lock()
            .records
            .values()
            .filter_map(UserRecord::live)
            .find(|user| user.email == email)
            .cloned()
            .ok_or_else(|| RosterError::not_found("User", email))
    }

    async fn find_all(&self, offset: u64, limit: u64) -> RosterResult<Vec<User>> {
        self.enter(&self.calls.find_all)?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .store
            .lock()
            .records
            .values()
            .filter_map(UserRecord::live)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update(&self, user: &User) -> RosterResult<User> {
        self.enter(&self.calls.update)?;
        let mut store = self.store.lock();
        if !store.records.get(&user.id).is_some_and(UserRecord::is_live) {
            return Err(RosterError::not_found("User", user.id));
        }
        if store.email_taken(&user.email, Some(user.id)) {
            return Err(email_conflict());
        }
        let existing = store
            .records
            .get_mut(&user.id)
            .ok_or_else(|| RosterError::not_found("User", user.id))?;

        let current = &mut existing.user;
        current.name.clone_from(&user.name);
        current.email.clone_from(&user.email);
        current.age = user.age;
        current.phone.clone_from(&user.phone);
        current.address.clone_from(&user.address);
        current.is_active = user.is_active;
        current.updated_at = Utc::now();
        Ok(current.clone())
    }

    async fn delete(&self, id: UserId) -> RosterResult<bool> {
        self.enter(&self.calls.delete)?;
        let mut store = self.store.lock();
        Ok(store
            .records
            .get_mut(&id)
            .is_some_and(|record| record.mark_deleted(Utc::now())))
    }

    async fn count(&self) -> RosterResult<u64> {
        self.enter(&self.calls.count)?;
        let live = self
            .store
            .lock()
            .records
            .values()
            .filter(|record| record.is_live())
            .count();
        Ok(live as u64)
    }
}
