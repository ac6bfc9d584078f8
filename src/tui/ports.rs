use tokio::sync::mpsc::UnboundedSender;

use super::app::UiEvent;
use crate::core::ports::{Navigator, Notifier};

// The UI loop owns the screen; ports only post events to it.

pub struct ChannelNavigator {
    tx: UnboundedSender<UiEvent>,
}

impl ChannelNavigator {
    pub fn new(tx: UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, path: &str) {
        // A closed channel means the UI already exited
        let _ = self.tx.send(UiEvent::Navigate(path.to_string()));
    }
}

pub struct ChannelNotifier {
    tx: UnboundedSender<UiEvent>,
}

impl ChannelNotifier {
    pub fn new(tx: UnboundedSender<UiEvent>) -> Self {
        Self { tx }
    }
}

impl Notifier for ChannelNotifier {
    fn alert(&self, message: &str) {
        let _ = self.tx.send(UiEvent::Alert(message.to_string()));
    }
}
