use crate::api::{types::flexible_bool, LoginResponse};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

pub const SESSION_STORAGE_KEY: &str = "motorph_session";

/// Credential and role context of the signed-in user.
///
/// An empty `access` token means "logged out"; `is_admin` is ignored in that
/// case, see [`Session::role`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub refresh: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Regular,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        !self.access.trim().is_empty()
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated() && self.is_admin
    }

    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated() {
            None
        } else if self.is_admin {
            Some(Role::Admin)
        } else {
            Some(Role::Regular)
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.is_authenticated().then_some(self.access.as_str())
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Self {
            access: response.access,
            refresh: response.refresh,
            username: response.username,
            is_admin: response.is_admin,
        }
    }
}

/// Durable backing for the session record.
pub trait SessionStorage {
    fn load(&self) -> Option<String>;
    fn save(&self, raw: &str) -> Result<(), String>;
    fn remove(&self) -> Result<(), String>;
}

/// Volatile storage, used on the host and in tests.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Option<String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            slot: Rc::new(RefCell::new(Some(raw.into()))),
        }
    }

    pub fn raw(&self) -> Option<String> {
        self.slot.borrow().clone()
    }
}

impl SessionStorage for MemoryStorage {
    fn load(&self) -> Option<String> {
        self.raw()
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        *self.slot.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), String> {
        self.slot.borrow_mut().take();
        Ok(())
    }
}

/// `window.localStorage` under [`SESSION_STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
#[derive(Clone, Copy, Default)]
pub struct LocalStorage;

#[cfg(target_arch = "wasm32")]
impl SessionStorage for LocalStorage {
    fn load(&self) -> Option<String> {
        crate::utils::storage::local_storage()
            .ok()?
            .get_item(SESSION_STORAGE_KEY)
            .ok()
            .flatten()
    }

    fn save(&self, raw: &str) -> Result<(), String> {
        crate::utils::storage::local_storage()?
            .set_item(SESSION_STORAGE_KEY, raw)
            .map_err(|_| "Failed to store session".to_string())
    }

    fn remove(&self) -> Result<(), String> {
        crate::utils::storage::local_storage()?
            .remove_item(SESSION_STORAGE_KEY)
            .map_err(|_| "Failed to remove session".to_string())
    }
}

type Listener = Rc<dyn Fn(&Session)>;

struct Inner {
    current: RefCell<Session>,
    storage: Box<dyn SessionStorage>,
    listeners: RefCell<Vec<Listener>>,
}

/// Process-wide session holder, handed explicitly to the API client and the
/// queries. Cloning shares the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Rc<Inner>,
}

impl SessionStore {
    /// Restores whatever the storage holds; an unreadable record counts as
    /// logged out.
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        let restored = storage
            .load()
            .and_then(|raw| match serde_json::from_str::<Session>(&raw) {
                Ok(session) => Some(session),
                Err(err) => {
                    log::warn!("Discarding unreadable stored session: {}", err);
                    None
                }
            })
            .unwrap_or_default();
        Self {
            inner: Rc::new(Inner {
                current: RefCell::new(restored),
                storage: Box::new(storage),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    #[cfg(target_arch = "wasm32")]
    pub fn browser() -> Self {
        Self::new(LocalStorage)
    }

    /// Browser-backed on wasm, in-memory elsewhere.
    pub fn platform_default() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            Self::browser()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::in_memory()
        }
    }

    pub fn get_session(&self) -> Session {
        self.inner.current.borrow().clone()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner
            .current
            .borrow()
            .access_token()
            .map(str::to_string)
    }

    pub fn set_session(&self, session: Session) {
        match serde_json::to_string(&session) {
            Ok(raw) => {
                if let Err(err) = self.inner.storage.save(&raw) {
                    log::warn!("{}", err);
                }
            }
            Err(err) => log::warn!("Failed to serialize session: {}", err),
        }
        log::info!(
            "Session established for '{}' (admin: {})",
            session.username,
            session.is_admin
        );
        *self.inner.current.borrow_mut() = session;
        self.notify();
    }

    pub fn clear_session(&self) {
        if let Err(err) = self.inner.storage.remove() {
            log::warn!("{}", err);
        }
        *self.inner.current.borrow_mut() = Session::default();
        log::info!("Session cleared");
        self.notify();
    }

    /// Registers a callback run after every `set_session`/`clear_session`.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn notify(&self) {
        let snapshot = self.get_session();
        let listeners: Vec<Listener> = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }
}
