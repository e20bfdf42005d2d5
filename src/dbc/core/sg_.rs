use regex::Regex;
use std::sync::LazyLock;

use crate::dbc::types::{
    errors::RecordError,
    message::Message,
    signal::{Endianness, MuxRole, Signal, Signess},
};

// "<start>|<length>@<endian><sign>", e.g. "63|1@1+"
static BIT_INFO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\|(\d+)@(\d+)([+-])?").expect("valid bit info regex"));

// "(<factor>,<offset>)", e.g. "(0.125,-40)"
static FACTOR_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(([+-]?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?),([+-]?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)\)$")
        .expect("valid factor/offset regex")
});

// "[<min>|<max>]", e.g. "[-40|215.5]"
static MIN_MAX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[([+-]?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)\|([+-]?\d+(?:\.\d*)?(?:[eE][+-]?\d+)?)\]$")
        .expect("valid min/max regex")
});

/// Decode a `SG_` record belonging to `message` (the current message of the scan).
///
/// Format (typical):
/// `SG_ <name> [M|mX] : <start>|<length>@<endian><sign> (<factor>,<offset>) [<min>|<max>]
/// "<unit>" <receivers>`
///
/// The layout fields start at token 3, or at token 4 when token 3 is a lone `:`
/// (multiplexer qualifier present).
pub(crate) fn decode(
    tokens: &[&str],
    line_in_dbc: usize,
    message: &Message,
) -> Result<Signal, RecordError> {
    if tokens.len() < 4 {
        return Err(RecordError::MalformedRecord {
            keyword: "SG_",
            expected: 6,
            found: tokens.len(),
        });
    }

    let start: usize = if tokens[3] == ":" { 4 } else { 3 };
    if tokens.len() < start + 3 {
        return Err(RecordError::MalformedRecord {
            keyword: "SG_",
            expected: start + 3,
            found: tokens.len(),
        });
    }

    let mut signal: Signal = Signal {
        name: tokens[1].to_string(),
        mux: if start == 4 {
            MuxRole::from_tag(tokens[2])
        } else {
            MuxRole::None
        },
        ..Default::default()
    };

    decode_bit_info(tokens[start], &mut signal)?;
    decode_factor_offset(tokens[start + 1], &mut signal)?;
    decode_min_max(tokens[start + 2], &mut signal)?;

    // optional "<unit>" and receivers
    let mut rest = tokens[start + 3..].iter().copied().skip_while(|t| t.is_empty());
    if let Some(first) = rest.next() {
        signal.unit = decode_unit(first, &mut rest);
    }
    signal.receivers = rest
        .flat_map(|t| t.split(','))
        .map(|n| n.trim_end_matches(';'))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect();

    signal.msg_id = message.can_id;
    signal.msg_name = message.name.clone();
    signal.label = message.name.clone();
    signal.line_in_dbc = line_in_dbc;

    Ok(signal)
}

// A quoted unit may contain spaces: gather tokens until the closing quote.
fn decode_unit<'a>(first: &'a str, rest: &mut impl Iterator<Item = &'a str>) -> String {
    if !first.starts_with('"') {
        return first.to_string();
    }
    let mut acc: String = String::from(first);
    while acc.len() < 2 || !acc.ends_with('"') {
        match rest.next() {
            Some(tok) => {
                acc.push(' ');
                acc.push_str(tok);
            }
            None => break,
        }
    }
    acc.trim_matches('"').to_string()
}

// start bit, bit length, endianness and sign
fn decode_bit_info(token: &str, signal: &mut Signal) -> Result<(), RecordError> {
    let caps = BIT_INFO
        .captures(token)
        .ok_or_else(|| RecordError::field("bit info", token))?;

    signal.start_bit = caps[1]
        .parse::<u16>()
        .map_err(|_| RecordError::field("start bit", token))?;
    signal.bit_length = caps[2]
        .parse::<u16>()
        .map_err(|_| RecordError::field("bit length", token))?;
    signal.endianness = match &caps[3] {
        "1" => Endianness::Intel,
        "0" => Endianness::Motorola,
        _ => return Err(RecordError::field("endianness", token)),
    };
    signal.sign = match caps.get(4).map(|m| m.as_str()) {
        Some("-") => Signess::Signed,
        _ => Signess::Unsigned,
    };
    Ok(())
}

fn decode_factor_offset(token: &str, signal: &mut Signal) -> Result<(), RecordError> {
    let caps = FACTOR_OFFSET
        .captures(token)
        .ok_or_else(|| RecordError::field("factor/offset", token))?;

    signal.factor = caps[1]
        .parse::<f64>()
        .map_err(|_| RecordError::field("factor", token))?;
    signal.offset = caps[2]
        .parse::<f64>()
        .map_err(|_| RecordError::field("offset", token))?;
    Ok(())
}

fn decode_min_max(token: &str, signal: &mut Signal) -> Result<(), RecordError> {
    let caps = MIN_MAX
        .captures(token)
        .ok_or_else(|| RecordError::field("min/max", token))?;

    signal.min = caps[1]
        .parse::<f64>()
        .map_err(|_| RecordError::field("min", token))?;
    signal.max = caps[2]
        .parse::<f64>()
        .map_err(|_| RecordError::field("max", token))?;
    Ok(())
}
