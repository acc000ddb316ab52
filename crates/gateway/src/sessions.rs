//! Maps incoming requests to session handles.

use flightdesk_config::SessionMode;
use flightdesk_core::Session;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

/// Header that names a client in `per_client` mode.
pub const SESSION_HEADER: &str = "X-Session-Id";

const MAX_CLIENT_SESSIONS: usize = 10_000;

struct ClientSession {
    session: Arc<Session>,
    last_used: u64,
}

#[derive(Default)]
struct Clients {
    sessions: HashMap<String, ClientSession>,
    clock: u64,
}

pub struct SessionRegistry {
    mode: SessionMode,
    shared: Arc<Session>,
    capacity: usize,
    clients: Mutex<Clients>,
}

impl SessionRegistry {
    pub fn new(mode: SessionMode) -> Self {
        Self {
            mode,
            shared: Arc::new(Session::new()),
            capacity: MAX_CLIENT_SESSIONS,
            clients: Mutex::new(Clients::default()),
        }
    }

    /// Cap the number of per-client sessions. Values below 1 are raised to 1.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    /// The session for a request.
    ///
    /// Shared mode ignores `client_id`. Per-client mode without an id falls
    /// back to the shared session. A new client arriving at capacity evicts
    /// the least recently used one.
    pub fn resolve(&self, client_id: Option<&str>) -> Arc<Session> {
        let client_id = match (self.mode, client_id.map(str::trim)) {
            (SessionMode::PerClient, Some(id)) if !id.is_empty() => id,
            _ => return self.shared.clone(),
        };

        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());
        clients.clock += 1;
        let now = clients.clock;

        if let Some(entry) = clients.sessions.get_mut(client_id) {
            entry.last_used = now;
            return entry.session.clone();
        }

        if clients.sessions.len() >= self.capacity {
            let oldest = clients
                .sessions
                .iter()
                .min_by_key(|(_, c)| c.last_used)
                .map(|(id, _)| id.clone());
            if let Some(id) = oldest {
                debug!(client = %id, "Evicting least recently used session");
                clients.sessions.remove(&id);
            }
        }

        let session = Arc::new(Session::new());
        clients.sessions.insert(
            client_id.to_string(),
            ClientSession {
                session: session.clone(),
                last_used: now,
            },
        );
        session
    }

    pub fn client_count(&self) -> usize {
        self.clients
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .sessions
            .len()
    }
}
