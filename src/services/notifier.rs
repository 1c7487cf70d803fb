//! Notification hub broadcasting catalog events to registered observers

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::{config::DeliveryPolicy, error::AppResult};

/// Anything able to receive a catalog notification
pub trait Observer: Send + Sync {
    fn notify(&self, message: &str) -> AppResult<()>;
}

/// Handle returned on registration, used to unregister an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(Uuid);

impl fmt::Display for ObserverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of observers, notified in registration order.
///
/// Membership is by handle identity: registering the same `Arc` twice yields
/// the same id, while two distinct observers that compare equal are both kept.
pub struct Notifier {
    observers: Vec<(ObserverId, Arc<dyn Observer>)>,
    policy: DeliveryPolicy,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("observers_count", &self.observers.len())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DeliveryPolicy::default())
    }
}

impl Notifier {
    pub fn new(policy: DeliveryPolicy) -> Self {
        Self {
            observers: Vec::new(),
            policy,
        }
    }

    /// Register an observer; a handle already present keeps its id
    pub fn add(&mut self, observer: Arc<dyn Observer>) -> ObserverId {
        if let Some((id, _)) = self
            .observers
            .iter()
            .find(|(_, existing)| Arc::ptr_eq(existing, &observer))
        {
            return *id;
        }

        let id = ObserverId(Uuid::new_v4());
        self.observers.push((id, observer));
        tracing::debug!(observer = %id, "Observer registered");
        id
    }

    /// Unregister an observer. Returns whether it was registered.
    pub fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        let removed = self.observers.len() != before;
        if removed {
            tracing::debug!(observer = %id, "Observer removed");
        }
        removed
    }

    pub fn contains(&self, id: ObserverId) -> bool {
        self.observers.iter().any(|(existing, _)| *existing == id)
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver `message` to every observer, in registration order
    pub fn notify_all(&self, message: &str) -> AppResult<()> {
        for (id, observer) in &self.observers {
            match self.policy {
                DeliveryPolicy::Strict => observer.notify(message)?,
                DeliveryPolicy::Isolated => {
                    if let Err(e) = observer.notify(message) {
                        tracing::warn!(observer = %id, "Observer failed to receive notification: {}", e);
                    }
                }
            }
        }
        Ok(())
    }
}
