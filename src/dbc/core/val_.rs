use crate::dbc::core::strings::{Lexeme, scan_values_and_quoted};
use crate::dbc::types::{
    catalog::{Catalog, SignalKey},
    errors::RecordError,
    signal::State,
};

/// Decode a `VAL_` record and append its states to the named signal:
/// `VAL_ <MessageID> <SignalName> <value> "<desc>" ... ;`
///
/// The signal must already be parsed. Any malformed pair rejects the whole record and
/// leaves the signal untouched.
pub(crate) fn decode(db: &mut Catalog, tokens: &[&str]) -> Result<usize, RecordError> {
    if tokens.len() < 3 {
        return Err(RecordError::MalformedRecord {
            keyword: "VAL_",
            expected: 3,
            found: tokens.len(),
        });
    }

    let signal_name: &str = tokens[2];
    let sig_key: SignalKey = db.get_sig_key_by_name(signal_name).ok_or_else(|| {
        RecordError::UnresolvedReference {
            signal: signal_name.to_string(),
        }
    })?;

    let body: String = tokens[3..].join(" ");
    let states: Vec<State> = parse_states(&body)?;

    if let Some(sig) = db.get_sig_by_key_mut(sig_key) {
        sig.states.extend(states.iter().cloned());
    }
    Ok(states.len())
}

// Pairs of `<value> "<name>"`; at least one pair is required.
fn parse_states(body: &str) -> Result<Vec<State>, RecordError> {
    let lexemes: Vec<Lexeme<'_>> =
        scan_values_and_quoted(body).map_err(|bad| RecordError::field("value table", &bad))?;
    if lexemes.is_empty() || lexemes.len() % 2 != 0 {
        return Err(RecordError::field("value table", body));
    }

    let mut states: Vec<State> = Vec::with_capacity(lexemes.len() / 2);
    for pair in lexemes.chunks(2) {
        match pair {
            [Lexeme::Number(v), Lexeme::Quoted(name)] => {
                let value: u64 = v
                    .parse::<u64>()
                    .map_err(|_| RecordError::field("state value", v))?;
                states.push(State {
                    value,
                    name: name.to_string(),
                });
            }
            _ => return Err(RecordError::field("value table", body)),
        }
    }
    Ok(states)
}
