//! Session context and hooks for the UI.

use api::{Redirect, Session, SessionStore};
use dioxus::prelude::*;

use crate::platform::{load_config, make_session_store, PlatformStorage};

/// Shared handle to the session store plus a reactive snapshot of it.
///
/// The store does the work; `session` is what components read so they
/// re-render when it changes. Call [`SessionContext::sync`] after anything
/// that may have changed the store.
#[derive(Clone)]
pub struct SessionContext {
    pub store: SessionStore<PlatformStorage>,
    pub session: Signal<Session>,
}

impl SessionContext {
    pub fn is_authenticated(&self) -> bool {
        (self.session)().is_authenticated()
    }

    /// Bearer token for the next request.
    pub fn token(&self) -> Option<String> {
        self.store.token()
    }

    /// Copy the store's session into the reactive snapshot.
    pub fn sync(&self) {
        let mut session = self.session;
        let current = self.store.session();
        if *session.peek() != current {
            session.set(current);
        }
    }

    pub fn logout(&self) -> Redirect {
        let outcome = self.store.logout();
        if let Some(e) = &outcome.storage_error {
            tracing::error!("Failed to clear persisted session: {}", e);
        }
        self.sync();
        outcome.redirect
    }
}

/// Get the session context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// Provider component that builds the session store and restores any
/// persisted token. Wrap your app with this component.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let ctx = use_context_provider(|| {
        let config = load_config();
        tracing::info!("Using API at {}", config.api.base_url);

        let store = make_session_store(&config);
        let restored = store.init();
        tracing::info!("Session restore: {:?}", restored);

        SessionContext {
            session: Signal::new(store.session()),
            store,
        }
    });

    use_drop(move || ctx.store.dispose());

    rsx! {
        {children}
    }
}
