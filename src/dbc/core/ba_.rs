use crate::dbc::core::strings::strip_quotes;
use crate::dbc::types::{
    catalog::{Catalog, SignalKey},
    errors::RecordError,
};

/// The only `BA_` attribute kept by the catalog.
pub(crate) const CI_SIG_ID: &str = "CI_SigId";

/// `true` when the `BA_` record carries the `CI_SigId` attribute (quotes ignored).
pub(crate) fn is_sig_id(tokens: &[&str]) -> bool {
    tokens.get(1).is_some_and(|t| strip_quotes(t) == CI_SIG_ID)
}

/// `BA_ "CI_SigId" SG_ <ID msg> <sig_name> <value>;`
///
/// Assigns `<value>` to the `sig_id` of the named signal, which must already be parsed.
pub(crate) fn decode(db: &mut Catalog, tokens: &[&str]) -> Result<u64, RecordError> {
    if tokens.len() < 6 {
        return Err(RecordError::MalformedRecord {
            keyword: "BA_",
            expected: 6,
            found: tokens.len(),
        });
    }

    let sig_name: &str = tokens[4];
    let sig_key: SignalKey = db.get_sig_key_by_name(sig_name).ok_or_else(|| {
        RecordError::UnresolvedReference {
            signal: sig_name.to_string(),
        }
    })?;

    let value_tok: String = tokens[5].replace(';', "");
    let sig_id: u64 = value_tok
        .parse::<u64>()
        .map_err(|_| RecordError::field("signal id", &value_tok))?;

    if let Some(sig) = db.get_sig_by_key_mut(sig_key) {
        sig.sig_id = Some(sig_id);
    }
    Ok(sig_id)
}
