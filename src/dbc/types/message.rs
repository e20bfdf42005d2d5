use crate::dbc::types::catalog::SignalKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier bits kept from the raw `BO_` id (29 bit, extended frame width).
pub const CAN_ID_MASK: u64 = 0x1FFF_FFFF;
/// Ids above this value are treated as extended (J1939 style) frames.
pub const EXTENDED_ID_THRESHOLD: u32 = 0xFFFF;

/// CAN message defined in the database.
///
/// Holds the masked identifier (`can_id`), the sub-fields decoded from it
/// (`source`, `pgn`, `priority`), the `name`, the declared payload length (`dlc`)
/// and the ordered keys of the signals it owns.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Message {
    /// CAN identifier masked to 29 bits. Never zero for a parsed message.
    pub can_id: u32,
    /// Standard or Extended, derived from `can_id`.
    pub id_format: IdFormat,
    /// `true` when `can_id > 0xFFFF`.
    pub is_extended_frame: bool,
    /// Source address (extended frames only).
    pub source: u32,
    /// Parameter Group Number. Equal to `can_id` for standard frames.
    pub pgn: u32,
    /// Priority (extended frames only).
    pub priority: u32,
    /// Message name, without the trailing `:`.
    pub name: String,
    /// Short label shown by browsers. Same as `name` for parsed messages.
    pub label: String,
    /// Declared payload length in bytes.
    pub dlc: u16,
    /// Transmitting node.
    pub sender: String,
    /// Signals that belong to this message, in file order.
    pub signals: Vec<SignalKey>,
    /// 0-based line of the `BO_` record.
    pub line_in_dbc: usize,
}

impl Message {
    /// Builds a message from a raw identifier, applying the 29 bit mask and the
    /// extended/standard decomposition.
    ///
    /// Returns `None` when the masked identifier is zero.
    pub fn from_raw_id(raw_id: u64) -> Option<Message> {
        let can_id: u32 = (raw_id & CAN_ID_MASK) as u32;
        if can_id == 0 {
            return None;
        }
        let mut msg: Message = Message {
            can_id,
            ..Default::default()
        };
        msg.split_can_id();
        Some(msg)
    }

    /// Decodes `source`, `pgn` and `priority` from `can_id`.
    pub fn split_can_id(&mut self) {
        let id: u32 = self.can_id;
        self.is_extended_frame = id > EXTENDED_ID_THRESHOLD;

        if self.is_extended_frame {
            self.id_format = IdFormat::Extended;
            self.source = id & 0xFF;
            self.pgn = (id >> 8) & 0xFFFF;
            self.priority = (id >> 24) & 0xFF;
        } else {
            self.id_format = IdFormat::Standard;
            self.source = 0;
            self.pgn = id;
            self.priority = 0;
        }
    }

    /// Normalized hexadecimal id (`"0x..."`, uppercase).
    pub fn id_hex(&self) -> String {
        format!("{:#X}", self.can_id)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Message\n\nName: {}\nID: {}\nSource: {}",
            self.name,
            self.id_hex(),
            self.source
        )
    }
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum IdFormat {
    #[default]
    Standard,
    Extended,
}

impl IdFormat {
    pub fn to_str(&self) -> &'static str {
        match self {
            IdFormat::Standard => "Standard",
            IdFormat::Extended => "Extended",
        }
    }
}
