//! Ledger Event Emission
//!
//! Every successful mutation emits exactly one event as part of the
//! triggering call, before the call returns. Failed calls emit nothing.
//! Observers subscribe to a ledger's publisher and are notified
//! synchronously; a misbehaving listener never aborts the operation or
//! starves the remaining listeners.

use lib_types::{Address, Amount};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Mutex};

// ============================================================================
// EVENT TYPES
// ============================================================================

/// Ledger events that observers can subscribe to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum TokenEvent {
    /// Units moved between two accounts
    Transfer {
        /// Account debited
        from: Address,
        /// Account credited
        to: Address,
        /// Amount moved (zero-amount transfers still emit)
        amount: Amount,
    },

    /// An allowance was set to a new value
    Approval {
        /// Account whose balance the allowance draws on
        owner: Address,
        /// Account permitted to spend
        spender: Address,
        /// The new allowance value, not a delta
        amount: Amount,
    },
}

impl TokenEvent {
    /// Amount carried by this event
    pub fn amount(&self) -> Amount {
        match self {
            TokenEvent::Transfer { amount, .. } => *amount,
            TokenEvent::Approval { amount, .. } => *amount,
        }
    }

    /// Short event type tag
    pub fn event_type(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "transfer",
            TokenEvent::Approval { .. } => "approval",
        }
    }
}

impl fmt::Display for TokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenEvent::Transfer { from, to, amount } => {
                write!(
                    f,
                    "Transfer({} -> {}, {})",
                    hex::encode(&from.as_bytes()[..8]),
                    hex::encode(&to.as_bytes()[..8]),
                    amount
                )
            }
            TokenEvent::Approval { owner, spender, amount } => {
                write!(
                    f,
                    "Approval({} => {}, {})",
                    hex::encode(&owner.as_bytes()[..8]),
                    hex::encode(&spender.as_bytes()[..8]),
                    amount
                )
            }
        }
    }
}

// ============================================================================
// EVENT LISTENER TRAIT
// ============================================================================

/// Trait for entities that listen to ledger events
///
/// `on_event` runs synchronously inside the triggering call; implementations
/// must not block on I/O.
pub trait TokenEventListener: Send {
    /// Called once per successful mutation
    fn on_event(&mut self, event: &TokenEvent) -> anyhow::Result<()>;
}

// ============================================================================
// EVENT PUBLISHER
// ============================================================================

/// Thread-safe event publisher for ledger events
#[derive(Clone)]
pub struct EventPublisher {
    /// Listeners subscribed to events
    listeners: Arc<Mutex<Vec<Box<dyn TokenEventListener>>>>,
}

impl fmt::Debug for EventPublisher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventPublisher").finish()
    }
}

impl EventPublisher {
    /// Create a new event publisher
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Subscribe to ledger events
    pub fn subscribe(&self, listener: Box<dyn TokenEventListener>) {
        let mut listeners = self.listeners.lock().unwrap();
        listeners.push(listener);
    }

    /// Publish an event to all subscribers
    pub(crate) fn publish(&self, event: &TokenEvent) {
        let mut listeners = self.listeners.lock().unwrap();

        for listener in listeners.iter_mut() {
            if let Err(e) = listener.on_event(event) {
                tracing::warn!("Event listener error: {}", e);
                // Continue notifying other listeners even if one fails
            }
        }
    }

    /// Get number of subscribed listeners
    pub fn listener_count(&self) -> usize {
        let listeners = self.listeners.lock().unwrap();
        listeners.len()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// RECORDING LISTENER
// ============================================================================

/// Listener that captures events for inspection in tests
#[derive(Debug, Clone, Default)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<TokenEvent>>>,
}

impl RecordingListener {
    /// Create a new recording listener
    pub fn new() -> Self {
        Self::default()
    }

    /// Get captured events
    pub fn events(&self) -> Vec<TokenEvent> {
        let events = self.events.lock().unwrap();
        events.clone()
    }

    /// Number of captured events
    pub fn event_count(&self) -> usize {
        let events = self.events.lock().unwrap();
        events.len()
    }

    /// Clear captured events
    pub fn clear(&self) {
        let mut events = self.events.lock().unwrap();
        events.clear();
    }
}

impl TokenEventListener for RecordingListener {
    fn on_event(&mut self, event: &TokenEvent) -> anyhow::Result<()> {
        let mut events = self.events.lock().unwrap();
        events.push(event.clone());
        Ok(())
    }
}

// ============================================================================
// UNIT TESTS
// ============================================================================
