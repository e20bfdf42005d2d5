use crate::dbc::types::{errors::RecordError, message::Message};

/// Decode a `BO_` record: `BO_ <id> <name>: <dlc> <sender>`.
///
/// The record must have exactly five tokens. The id is masked to 29 bits and split
/// into source/PGN/priority; a masked id of zero is rejected.
pub(crate) fn decode(tokens: &[&str], line_in_dbc: usize) -> Result<Message, RecordError> {
    if tokens.len() != 5 {
        return Err(RecordError::MalformedRecord {
            keyword: "BO_",
            expected: 5,
            found: tokens.len(),
        });
    }

    let raw_id: u64 = tokens[1]
        .parse::<u64>()
        .map_err(|_| RecordError::field("message id", tokens[1]))?;
    let mut msg: Message =
        Message::from_raw_id(raw_id).ok_or_else(|| RecordError::field("message id", tokens[1]))?;

    msg.name = tokens[2].replace(':', "");
    msg.label = msg.name.clone();
    msg.dlc = tokens[3]
        .parse::<u16>()
        .map_err(|_| RecordError::field("message dlc", tokens[3]))?;
    msg.sender = tokens[4].to_string();
    msg.line_in_dbc = line_in_dbc;

    Ok(msg)
}
