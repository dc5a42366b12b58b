//! View-state controller for the user administration panel: which panel is
//! shown, how it is styled, and how list fetches and submits feed back into it.

use std::sync::Arc;

use client_core::{AlertGateway, ClientSettings, RoleGateway, TableUtility, UserGateway};

pub mod actions;
pub mod backend_bridge;
pub mod controller;
pub mod display;
pub mod state;
pub mod submit_result;

pub use actions::{ActionTable, ActionTableError, Step, Transition};
pub use backend_bridge::runtime::BackendRuntime;
pub use controller::{events::Completion, PanelError, ViewController};
pub use state::PanelState;

/// Collaborators injected into the controller.
#[derive(Clone)]
pub struct PanelServices {
    pub users: Arc<dyn UserGateway>,
    pub roles: Arc<dyn RoleGateway>,
    pub alerts: Arc<dyn AlertGateway>,
    pub table: Arc<dyn TableUtility>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelOptions {
    /// Passed through to every alert raised by a submit result.
    pub alert_dismissible: bool,
    /// Return to a freshly fetched view list after a successful submit.
    pub refresh_after_submit: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            alert_dismissible: true,
            refresh_after_submit: true,
        }
    }
}

impl PanelOptions {
    pub fn from_settings(settings: &ClientSettings) -> Self {
        Self {
            alert_dismissible: settings.alert_dismissible,
            ..Self::default()
        }
    }
}
