//! This crate contains all shared UI for the workspace.

pub mod components;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{load_config, make_client, make_session_store, make_storage, PlatformStorage};

mod auth;
pub use auth::{use_session, SessionContext, SessionProvider};

mod navbar;
pub use navbar::Header;

mod auth_form;
pub use auth_form::AuthForm;

mod goal_form;
pub use goal_form::GoalForm;

mod goal_list;
pub use goal_list::GoalList;
