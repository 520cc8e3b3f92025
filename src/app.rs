//! Wiring: one store, one sequencer, one HTTP client per session.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::actions::{Dispatcher, Viewer};
use crate::api::{ApiError, RestClient, Transport};
use crate::config::Config;
use crate::reconcile::{Reconciler, Sequencer};
use crate::session::{Session, SessionError, SessionStore};
use crate::store::{parse_page, SharedStore};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

pub struct App {
    store: SharedStore,
    sequencer: Arc<Sequencer>,
    client: RestClient,
    dispatcher: Dispatcher,
    sessions: SessionStore,
    session: Session,
}

impl App {
    /// Build from config and the persisted session. A cached feed page in the
    /// session seeds the store right away.
    pub fn new(config: &Config, sessions: SessionStore) -> Result<Self, AppError> {
        let client = RestClient::new(&config.api)?;
        let store = SharedStore::with_capacity(config.reconcile.broadcast_capacity);
        let sequencer = Arc::new(Sequencer::new(config.reconcile.ordering));
        let transport: Arc<dyn Transport> = Arc::new(client.clone());
        let reconciler = Reconciler::new(store.clone(), transport, sequencer.clone());
        let dispatcher = Dispatcher::new(reconciler, None);

        let mut app = Self {
            store,
            sequencer,
            client,
            dispatcher,
            sessions: sessions.clone(),
            session: Session::default(),
        };
        app.activate(sessions.load());

        tracing::info!(
            base_url = %config.api.base_url,
            ordering = ?config.reconcile.ordering,
            logged_in = app.session.is_logged_in(),
            "Client ready"
        );
        Ok(app)
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn client(&self) -> &RestClient {
        &self.client
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Log in, or switch to another profile. Interaction state from the
    /// previous user is dropped and their in-flight responses are ignored.
    pub fn login(&mut self, session: Session) -> Result<(), AppError> {
        self.sessions.save(&session)?;
        self.reset();
        self.activate(session);
        tracing::info!(account_type = %self.session.account_type, "Logged in");
        Ok(())
    }

    pub fn logout(&mut self) -> Result<(), AppError> {
        self.reset();
        self.activate(Session::default());
        self.sessions.clear()?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Seed the store from a freshly loaded first feed page and keep it in
    /// the session for the next start.
    pub fn cache_feed(&mut self, page: Value) -> Result<usize, AppError> {
        let written = self.store.seed_page(&parse_page(&page));
        self.session.cached_feed = Some(page);
        self.sessions.save(&self.session)?;
        Ok(written)
    }

    fn reset(&self) {
        self.store.clear();
        self.sequencer.reset();
    }

    fn activate(&mut self, session: Session) {
        self.client
            .set_token(session.token.as_ref().map(|t| t.expose().to_string()));
        self.dispatcher.set_viewer(Viewer::from_session(&session));

        if let Some(page) = &session.cached_feed {
            let written = self.store.seed_page(&parse_page(page));
            tracing::debug!(written, "Seeded store from cached feed");
        }
        self.session = session;
    }
}
