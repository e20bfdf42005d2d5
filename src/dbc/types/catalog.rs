//! Catalog model (SlotMap-backed).
//!
//! The [`Catalog`] is the output of a DBC scan. Messages and signals live in **SlotMap**
//! arenas with stable keys ([`MessageKey`], [`SignalKey`]); a message owns the ordered keys
//! of its signals and every signal points back to its message.
//!
//! Public iteration follows the **order vectors** (file order) via `iter_messages()` and
//! `iter_signals()`. The flat signal view and the per-message lists refer to the same
//! signal instances.
//!
//! Records rejected during the scan are kept in [`Catalog::diagnostics`].

use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::collections::HashMap;

use crate::dbc::types::{errors::Diagnostic, message::Message, signal::Signal};

// --- Stable keys (SlotMap) ---
new_key_type! { pub struct MessageKey; }
new_key_type! { pub struct SignalKey; }

/// In-memory catalog of a DBC file.
#[derive(Default, Clone, Debug, Serialize)]
pub struct Catalog {
    // --- Main storage (stable-key maps) ---
    pub messages: SlotMap<MessageKey, Message>,
    pub signals: SlotMap<SignalKey, Signal>,

    // --- Order "views" (file order) ---
    pub messages_order: Vec<MessageKey>,
    pub signals_order: Vec<SignalKey>,

    // --- Rejected records ---
    pub diagnostics: Vec<Diagnostic>,

    // First signal parsed with a given name. Exact (case-sensitive) match.
    #[serde(skip)]
    pub(crate) sig_key_by_name: HashMap<String, SignalKey>,
}

impl Catalog {
    // ------------- Messages ------------
    /// Stores a message in the arena. It becomes visible through `iter_messages()`
    /// only once committed.
    pub(crate) fn insert_message(&mut self, msg: Message) -> MessageKey {
        self.messages.insert(msg)
    }

    /// Appends a stored message to the file-order view. Each key is committed once.
    pub(crate) fn commit_message(&mut self, key: MessageKey) {
        if self.messages.contains_key(key) {
            self.messages_order.push(key);
        }
    }

    pub fn get_message_by_key(&self, key: MessageKey) -> Option<&Message> {
        self.messages.get(key)
    }

    /// Returns the first message (file order) with the given CAN id.
    pub fn get_message_by_id(&self, can_id: u32) -> Option<&Message> {
        self.iter_messages().find(|m| m.can_id == can_id)
    }

    /// Returns the first message (file order) with the given name.
    pub fn get_message_by_name(&self, name: &str) -> Option<&Message> {
        self.iter_messages().find(|m| m.name == name)
    }

    /// Messages in file order.
    pub fn iter_messages(&self) -> impl Iterator<Item = &Message> + '_ {
        self.messages_order
            .iter()
            .filter_map(move |&k| self.messages.get(k))
    }

    pub fn message_count(&self) -> usize {
        self.messages_order.len()
    }

    /// Signals owned by `msg`, in declaration order.
    pub fn message_signals<'a>(
        &'a self,
        msg: &'a Message,
    ) -> impl Iterator<Item = &'a Signal> + 'a {
        msg.signals.iter().filter_map(move |&k| self.signals.get(k))
    }

    // -------------- Signals ------------
    /// Stores a signal, links it into the owning message and the flat view, and indexes
    /// its name if no earlier signal claimed it.
    pub(crate) fn insert_signal(&mut self, msg_key: MessageKey, mut sig: Signal) -> SignalKey {
        sig.message = msg_key;
        let name: String = sig.name.clone();
        let sig_key: SignalKey = self.signals.insert(sig);

        if let Some(m) = self.messages.get_mut(msg_key) {
            m.signals.push(sig_key);
        }
        self.signals_order.push(sig_key);
        self.sig_key_by_name.entry(name).or_insert(sig_key);
        sig_key
    }

    pub fn get_sig_key_by_name(&self, name: &str) -> Option<SignalKey> {
        self.sig_key_by_name.get(name).copied()
    }

    pub fn get_sig_by_key(&self, key: SignalKey) -> Option<&Signal> {
        self.signals.get(key)
    }

    pub(crate) fn get_sig_by_key_mut(&mut self, key: SignalKey) -> Option<&mut Signal> {
        self.signals.get_mut(key)
    }

    /// Returns the first signal parsed with the given name.
    pub fn get_signal_by_name(&self, name: &str) -> Option<&Signal> {
        let key: SignalKey = self.get_sig_key_by_name(name)?;
        self.get_sig_by_key(key)
    }

    /// All signals, flattened, in file order.
    pub fn iter_signals(&self) -> impl Iterator<Item = &Signal> + '_ {
        self.signals_order
            .iter()
            .filter_map(move |&k| self.signals.get(k))
    }

    pub fn signal_count(&self) -> usize {
        self.signals_order.len()
    }

    /// Owning message of `sig`.
    pub fn signal_message(&self, sig: &Signal) -> Option<&Message> {
        self.messages.get(sig.message)
    }

    // -------------- Search ------------
    /// Messages whose name contains `query` (case-insensitive), in file order.
    /// An empty query matches nothing.
    pub fn search_messages(&self, query: &str) -> Vec<&Message> {
        let q: String = query.to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.iter_messages()
            .filter(|m| m.name.to_lowercase().contains(&q))
            .collect()
    }

    /// Signals whose name contains `query` (case-insensitive), in file order.
    /// An empty query matches nothing.
    pub fn search_signals(&self, query: &str) -> Vec<&Signal> {
        let q: String = query.to_lowercase();
        if q.is_empty() {
            return Vec::new();
        }
        self.iter_signals()
            .filter(|s| s.name.to_lowercase().contains(&q))
            .collect()
    }
}
