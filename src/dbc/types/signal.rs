use crate::dbc::types::catalog::MessageKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Definition of a signal within a CAN message (DBC).
///
/// Describes position/bit-length, endianness, sign, scaling (factor/offset),
/// declared range, unit, value table (`states`) and the optional `CI_SigId`.
#[derive(Default, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Signal {
    /// Parent message key.
    pub message: MessageKey,
    /// Signal name.
    pub name: String,
    /// Owning message name, as shown by browsers.
    pub label: String,
    /// Bit start in the payload.
    pub start_bit: u16,
    /// Bit length.
    pub bit_length: u16,
    /// Byte order.
    pub endianness: Endianness,
    /// Sign.
    pub sign: Signess,
    /// Scaling factor.
    pub factor: f64,
    /// Scaling offset.
    pub offset: f64,
    /// Minimum physical value.
    pub min: f64,
    /// Maximum physical value.
    pub max: f64,
    /// Unit of measure.
    pub unit: String,
    /// Receiver nodes.
    pub receivers: Vec<String>,
    /// Multiplexing role.
    pub mux: MuxRole,
    /// CAN id of the owning message.
    pub msg_id: u32,
    /// Name of the owning message.
    pub msg_name: String,
    /// Identifier assigned by `BA_ "CI_SigId"`.
    pub sig_id: Option<u64>,
    /// Value table, in declaration order.
    pub states: Vec<State>,
    /// 0-based line of the `SG_` record.
    pub line_in_dbc: usize,
}

impl Signal {
    pub fn is_little_endian(&self) -> bool {
        self.endianness == Endianness::Intel
    }

    pub fn is_signed(&self) -> bool {
        self.sign == Signess::Signed
    }

    /// `raw * factor + offset`
    pub fn to_physical(&self, raw: f64) -> f64 {
        raw * self.factor + self.offset
    }

    /// Description of `value` in the value table, if any.
    pub fn state_name(&self, value: u64) -> Option<&str> {
        self.states
            .iter()
            .find(|s| s.value == value)
            .map(|s| s.name.as_str())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Signal\n\nName: {}\nStartBit: {}\nLength: {}\nMsg: {}\n",
            self.name, self.start_bit, self.bit_length, self.label
        )
    }
}

/// One entry of a value table: `<value> "<name>"`.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct State {
    pub value: u64,
    pub name: String,
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Endianness {
    #[default]
    Motorola, // 0
    Intel, // 1
}

#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Signess {
    #[default]
    Unsigned, // +
    Signed, // -
}

/// What role (if any) a signal plays in multiplexing.
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum MuxRole {
    /// Not multiplexed (always present).
    #[default]
    None,
    /// Multiplexer switch (`M`).
    Multiplexor,
    /// Present only when the switch equals the value (`m<value>`).
    Multiplexed(u32),
}

impl MuxRole {
    /// Decodes the qualifier found between the signal name and `:`.
    pub fn from_tag(tag: &str) -> MuxRole {
        if tag == "M" {
            return MuxRole::Multiplexor;
        }
        match tag.strip_prefix('m').and_then(|v| v.parse::<u32>().ok()) {
            Some(v) => MuxRole::Multiplexed(v),
            None => MuxRole::None,
        }
    }
}
