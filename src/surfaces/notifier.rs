//! Notifier that logs and keeps a short history for the status endpoint

use std::{
    collections::VecDeque,
    sync::{Mutex, PoisonError},
};
use chrono::Utc;
use tracing::{error, info, warn};

use super::{Notification, NotificationLevel, Notifier};

/// Default number of notifications kept
pub const DEFAULT_HISTORY: usize = 20;

#[derive(Debug)]
pub struct StateNotifier {
    history: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl StateNotifier {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    /// Notifications still in the history, oldest first
    pub fn recent(&self) -> Vec<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    /// Most recent notification, if any
    pub fn latest(&self) -> Option<Notification> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .back()
            .cloned()
    }
}

impl Default for StateNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY)
    }
}

impl Notifier for StateNotifier {
    fn show(&self, message: &str, level: NotificationLevel) {
        match level {
            NotificationLevel::Error => error!("Notification: {}", message),
            NotificationLevel::Warning => warn!("Notification: {}", message),
            NotificationLevel::Info | NotificationLevel::Success => info!("Notification: {}", message),
        }

        if self.capacity == 0 {
            return;
        }

        let mut history = self.history.lock().unwrap_or_else(PoisonError::into_inner);
        while history.len() >= self.capacity {
            history.pop_front();
        }
        history.push_back(Notification {
            message: message.to_string(),
            level,
            timestamp: Utc::now(),
        });
    }
}
