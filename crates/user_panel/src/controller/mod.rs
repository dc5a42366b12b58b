//! The view controller: owns panel state and the user list, dispatches
//! actions through the action table, and applies backend completions.

pub mod events;
mod orchestration;

use std::time::{Duration, Instant};

use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use shared::domain::{ActionName, Severity, SubmitKind, TableState, UserRecord};
use thiserror::Error;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::{
    actions::{ActionTable, ActionTableError, Step},
    display, submit_result, PanelOptions, PanelServices, PanelState,
};
use events::Completion;

const LIST_FAILURE_MESSAGE: &str = "Unable to load users. Please try again.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("cannot {0} without a user under confirmation")]
    NoCurrentUser(SubmitKind),
    #[error("cannot {0} before its confirm step")]
    NotConfirmed(SubmitKind),
    #[error("a submit is already in flight; {0} ignored")]
    SubmitInFlight(SubmitKind),
    #[error(transparent)]
    ActionTable(#[from] ActionTableError),
}

pub struct ViewController {
    services: PanelServices,
    options: PanelOptions,
    actions: ActionTable,
    runtime: Handle,
    completion_tx: Sender<Completion>,
    completion_rx: Receiver<Completion>,
    state: PanelState,
    table: TableState,
    user_list: Vec<UserRecord>,
    role_list: Vec<String>,
    latest_list_request: u64,
    in_flight: usize,
}

impl ViewController {
    pub fn new(services: PanelServices, runtime: Handle) -> Result<Self, PanelError> {
        Self::with_options(services, runtime, PanelOptions::default())
    }

    /// Builds the controller and loads the role list once. The panel starts
    /// in `view`; call [`ViewController::init`] to fetch the first list.
    pub fn with_options(
        services: PanelServices,
        runtime: Handle,
        options: PanelOptions,
    ) -> Result<Self, PanelError> {
        let actions = ActionTable::standard()?;
        let role_list = services.roles.roles();
        let (completion_tx, completion_rx) = unbounded();
        Ok(Self {
            services,
            options,
            actions,
            runtime,
            completion_tx,
            completion_rx,
            state: PanelState::default(),
            table: TableState::default(),
            user_list: Vec::new(),
            role_list,
            latest_list_request: 0,
            in_flight: 0,
        })
    }

    pub fn init(&mut self) {
        self.dispatch(ActionName::View, None);
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn user_list(&self) -> &[UserRecord] {
        &self.user_list
    }

    pub fn role_list(&self) -> &[String] {
        &self.role_list
    }

    pub fn table(&self) -> &TableState {
        &self.table
    }

    /// Form binding for the user under confirmation (or the add draft).
    pub fn current_mut(&mut self) -> Option<&mut UserRecord> {
        self.state.current.as_mut()
    }

    /// String entry point used by UI bindings. Returns `false` and leaves the
    /// state untouched for names the action table does not know.
    pub fn toggle_action(&mut self, name: &str, user: Option<UserRecord>) -> bool {
        match self.actions.resolve(name) {
            Some((action, _)) => {
                self.dispatch(action, user);
                true
            }
            None => {
                debug!(action = name, "ignoring unknown action");
                false
            }
        }
    }

    pub fn dispatch(&mut self, action: ActionName, user: Option<UserRecord>) {
        let Some(transition) = self.actions.get(action) else {
            debug!(action = action.as_str(), "action has no transition");
            return;
        };
        debug!(action = action.as_str(), step = ?transition.step, "dispatching action");

        match transition.step {
            Step::FetchView => self.get_user_list(),
            Step::StartAdd => self.start_add(),
            Step::ConfirmAdd => self.confirm_add(),
            Step::FetchEdit => self.get_edit_list(),
            Step::ConfirmEdit => match user {
                Some(user) => self.confirm_edit(user),
                None => self.enter(ActionName::ConfirmEdit),
            },
            Step::FetchRemove => self.get_remove_list(),
            Step::ConfirmRemove => match user {
                Some(user) => self.confirm_remove(user),
                None => self.enter(ActionName::ConfirmRemove),
            },
        }
    }

    pub fn get_user_list(&mut self) {
        self.load_list(ActionName::View);
    }

    pub fn get_edit_list(&mut self) {
        self.load_list(ActionName::Edit);
    }

    pub fn get_remove_list(&mut self) {
        self.load_list(ActionName::Remove);
    }

    /// Replaces the list wholesale and clears the action loading flag.
    pub fn set_user_list(&mut self, users: Vec<UserRecord>) {
        self.user_list = users;
        self.state.action_loading = false;
    }

    pub fn confirm_add(&mut self) {
        self.enter(ActionName::ConfirmAdd);
    }

    pub fn confirm_edit(&mut self, user: UserRecord) {
        self.state.current = Some(user);
        self.enter(ActionName::ConfirmEdit);
    }

    pub fn confirm_remove(&mut self, user: UserRecord) {
        self.state.current = Some(user);
        self.enter(ActionName::ConfirmRemove);
    }

    pub fn submit_add_user(&mut self) -> Result<(), PanelError> {
        self.submit(SubmitKind::Add)
    }

    pub fn submit_edit_user(&mut self) -> Result<(), PanelError> {
        self.submit(SubmitKind::Edit)
    }

    pub fn submit_remove_user(&mut self) -> Result<(), PanelError> {
        self.submit(SubmitKind::Remove)
    }

    /// Clears the submit loading flag and raises the alert for the outcome.
    pub fn set_submit_result(&mut self, failed: bool, kind: SubmitKind) {
        self.state.submit_loading = false;

        let (severity, message) = submit_result::submit_alert(kind, failed);
        self.services
            .alerts
            .alert(self.options.alert_dismissible, severity, message);

        if !failed && self.options.refresh_after_submit {
            self.state.current = None;
            self.get_user_list();
        }
    }

    pub fn display_title(&self) -> &'static str {
        display::display_title(self.state.name)
    }

    pub fn display_heading(&self) -> String {
        display::display_heading(self.state.name, self.state.current.as_ref())
    }

    pub fn style_class(&self) -> &'static str {
        display::style_class(self.state.style)
    }

    pub fn toggle_submit_loading(&mut self) {
        self.state.submit_loading = !self.state.submit_loading;
    }

    pub fn toggle_action_loading(&mut self) {
        self.state.action_loading = !self.state.action_loading;
    }

    pub fn sort_table(&mut self, column: &str) {
        self.services
            .table
            .sort_table(&mut self.table, column, &mut self.user_list);
    }

    /// Number of backend calls whose completion has not been applied yet.
    pub fn pending(&self) -> usize {
        self.in_flight
    }

    /// Applies every completion already queued. Meant to be called once per
    /// UI frame; never blocks.
    pub fn drain_completions(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(completion) = self.completion_rx.try_recv() {
            self.apply(completion);
            applied += 1;
        }
        applied
    }

    /// Blocks for at most `timeout` waiting for one completion.
    pub fn wait_for_completion(&mut self, timeout: Duration) -> bool {
        match self.completion_rx.recv_timeout(timeout) {
            Ok(completion) => {
                self.apply(completion);
                true
            }
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => false,
        }
    }

    /// Waits until nothing is in flight, including list refreshes triggered
    /// by completions applied along the way.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.in_flight > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() || !self.wait_for_completion(remaining) {
                return false;
            }
        }
        true
    }

    pub fn apply(&mut self, completion: Completion) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match completion {
            Completion::UserList { request_id, result } => {
                if request_id != self.latest_list_request {
                    debug!(
                        request_id,
                        latest = self.latest_list_request,
                        "discarding stale user list"
                    );
                    return;
                }
                match result {
                    Ok(users) => self.set_user_list(users),
                    Err(_) => {
                        self.set_user_list(Vec::new());
                        self.services.alerts.alert(
                            self.options.alert_dismissible,
                            Severity::Danger,
                            LIST_FAILURE_MESSAGE,
                        );
                    }
                }
            }
            Completion::Submit { kind, failed } => self.set_submit_result(failed, kind),
        }
    }

    fn enter(&mut self, action: ActionName) {
        match self.actions.style_of(action) {
            Some(style) => self.state.transition(action, style),
            None => debug!(action = action.as_str(), "action has no style"),
        }
    }

    fn start_add(&mut self) {
        let mut draft = UserRecord::default();
        if let Some(role) = self.role_list.first() {
            draft.role = role.clone();
        }
        self.state.current = Some(draft);
        self.enter(ActionName::Add);
    }

    fn load_list(&mut self, action: ActionName) {
        self.state.current = None;
        self.enter(action);

        self.state.action_loading = true;
        self.latest_list_request += 1;
        self.in_flight += 1;
        orchestration::spawn_list_fetch(
            &self.runtime,
            self.services.users.clone(),
            self.completion_tx.clone(),
            self.latest_list_request,
        );
    }

    fn submit(&mut self, kind: SubmitKind) -> Result<(), PanelError> {
        if self.state.submit_loading {
            warn!(kind = kind.as_str(), "submit ignored while another is in flight");
            return Err(PanelError::SubmitInFlight(kind));
        }
        let Some(user) = self.state.current.clone() else {
            warn!(kind = kind.as_str(), "submit ignored without a current user");
            return Err(PanelError::NoCurrentUser(kind));
        };
        if self.state.name != kind.confirm_action() {
            warn!(
                kind = kind.as_str(),
                panel = self.state.name.as_str(),
                "submit ignored outside its confirm step"
            );
            return Err(PanelError::NotConfirmed(kind));
        }

        self.state.submit_loading = true;
        self.in_flight += 1;
        orchestration::spawn_submit(
            &self.runtime,
            self.services.users.clone(),
            self.completion_tx.clone(),
            kind,
            user,
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
