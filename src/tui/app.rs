use crossterm::event::KeyCode;

use crate::core::route::Route;
use crate::core::token::ActivationToken;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum View {
    Confirmation,
    Home,
    NotFound,
}

/// Messages the confirmation ports and request tasks send to the UI loop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiEvent {
    Navigate(String),
    Alert(String),
    /// One activation request finished, whatever its outcome.
    Settled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Confirm,
    Quit,
}

pub struct App {
    route: Route,
    pending: usize,
    alert: Option<String>,
    toast: Option<String>,
    toast_ticks: u16,
}

impl App {
    pub fn new(route: Route) -> Self {
        Self {
            route,
            pending: 0,
            alert: None,
            toast: None,
            toast_ticks: 0,
        }
    }

    pub fn view(&self) -> View {
        match self.route {
            Route::Home => View::Home,
            Route::Confirmation { .. } => View::Confirmation,
            Route::NotFound(_) => View::NotFound,
        }
    }

    pub fn route(&self) -> &Route { &self.route }

    pub fn token(&self) -> Option<ActivationToken> {
        match &self.route {
            Route::Confirmation { token } => token.clone(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool { self.pending > 0 }

    pub fn alert_message(&self) -> Option<&str> { self.alert.as_deref() }

    pub fn toast_message(&self) -> Option<&str> { self.toast.as_deref() }

    /// Map a key press to what the loop should do. While an alert is shown
    /// it swallows every key except the ones that dismiss it.
    pub fn handle_key(&mut self, code: KeyCode) -> Action {
        if self.alert.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alert = None;
            }
            return Action::None;
        }
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char(' ')
                if self.view() == View::Confirmation =>
            {
                self.pending += 1;
                Action::Confirm
            }
            _ => Action::None,
        }
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Navigate(path) => {
                self.route = Route::parse(&path);
                if self.view() == View::Home {
                    self.toast("Account activated".to_string());
                }
            }
            UiEvent::Alert(msg) => self.alert = Some(msg),
            UiEvent::Settled => self.pending = self.pending.saturating_sub(1),
        }
    }

    pub fn toast(&mut self, msg: String) {
        self.toast = Some(msg);
        self.toast_ticks = 15; // ~3s at 200ms tick
    }

    pub fn tick(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast = None;
            }
        }
    }
}
