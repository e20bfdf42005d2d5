use crate::dbc::core::{self, strings};
use crate::dbc::types::{
    catalog::{Catalog, MessageKey},
    errors::{DbcParseError, Diagnostic, RecordError},
};

use std::fs::File;
use std::io::{BufReader, Read};

use encoding_rs::WINDOWS_1252;

/// Parses DBC text and returns the resulting [`Catalog`].
///
/// The text is scanned line by line (lines numbered from 0) and each line is
/// dispatched on its first token:
/// - **Messages** (from `BO_` lines)
/// - **Signals** (from `SG_` lines, attached to the last accepted `BO_`)
/// - **Value tables** (from `VAL_` lines)
/// - **Signal ids** (from `BA_ "CI_SigId"` lines)
///
/// Every other line is ignored, as are blank lines and lone keywords (the `NS_` symbol
/// list). A record that fails to decode is skipped, logged at `warn` level and kept in
/// [`Catalog::diagnostics`]; the scan always runs to the end.
///
/// `VAL_` and `BA_` records can only refer to signals defined on earlier lines.
///
/// # Example
/// ```
/// let db = dbc_catalog::dbc::from_str(
///     "BO_ 500 EngineData: 8 ECU\n SG_ RPM : 0|16@1+ (0.125,0) [0|8000] \"rpm\" ECU\n",
/// );
/// assert_eq!(db.message_count(), 1);
/// assert_eq!(db.get_signal_by_name("RPM").unwrap().factor, 0.125);
/// ```
pub fn from_str(content: &str) -> Catalog {
    let db: Catalog = content
        .split('\n')
        .enumerate()
        .fold(Scan::default(), |scan, (i, line)| scan.feed(i, line))
        .finish();

    log::info!(
        "Parsed {} messages, {} signals ({} records rejected)",
        db.message_count(),
        db.signal_count(),
        db.diagnostics.len()
    );
    db
}

/// Reads a `.dbc` file and parses it with [`from_str`].
///
/// The content is taken as UTF-8 when valid, otherwise decoded as Windows-1252.
///
/// # Errors
/// Returns an `Err(DbcParseError)` if:
/// - The path does not end in `.dbc`.
/// - The file cannot be opened.
/// - There are I/O errors while reading.
///
/// Malformed records never make this function fail.
pub fn from_file(path: &str) -> Result<Catalog, DbcParseError> {
    // check if provided file has .dbc format
    if !path.ends_with(".dbc") {
        return Err(DbcParseError::InvalidExtension {
            path: path.to_string(),
        });
    }

    let file: File = File::open(path).map_err(|source| DbcParseError::OpenFile {
        path: path.to_string(),
        source,
    })?;
    let mut reader: BufReader<File> = BufReader::new(file);

    let mut bytes: Vec<u8> = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| DbcParseError::Read {
            path: path.to_string(),
            source,
        })?;

    log::info!("Parsing DBC file: {path}");
    Ok(from_str(&decode_text(&bytes)))
}

fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            log::debug!("DBC content is not UTF-8, decoding as Windows-1252");
            let (text, _, _) = WINDOWS_1252.decode(bytes);
            text.into_owned()
        }
    }
}

// Scan accumulator: the catalog being built plus the message that `SG_` lines attach to.
#[derive(Default)]
struct Scan {
    db: Catalog,
    current: Option<MessageKey>,
}

impl Scan {
    fn feed(mut self, line_in_dbc: usize, line: &str) -> Scan {
        let tokens: Vec<&str> = strings::tokenize(line);
        // a lone keyword is a symbol listed under NS_, not a record
        if tokens.len() < 2 {
            return self;
        }

        let (keyword, outcome): (&'static str, Result<(), RecordError>) = match tokens[0] {
            "BO_" => ("BO_", self.message(&tokens, line_in_dbc)),
            "SG_" => ("SG_", self.signal(&tokens, line_in_dbc)),
            "VAL_" => ("VAL_", core::val_::decode(&mut self.db, &tokens).map(|_| ())),
            "BA_" if core::ba_::is_sig_id(&tokens) => {
                ("BA_", core::ba_::decode(&mut self.db, &tokens).map(|_| ()))
            }
            _ => return self,
        };

        if let Err(error) = outcome {
            log::warn!("Line {line_in_dbc}: {keyword} record skipped: {error}");
            self.db.diagnostics.push(Diagnostic {
                line: line_in_dbc,
                keyword,
                error,
            });
        }
        self
    }

    fn message(&mut self, tokens: &[&str], line_in_dbc: usize) -> Result<(), RecordError> {
        let msg = core::bo_::decode(tokens, line_in_dbc)?;

        if let Some(cur) = self.current {
            if let Some(prev) = self.db.get_message_by_key(cur)
                && prev.can_id == msg.can_id
            {
                return Err(RecordError::DuplicateMessage { id: msg.can_id });
            }
            self.db.commit_message(cur);
        }

        self.current = Some(self.db.insert_message(msg));
        Ok(())
    }

    fn signal(&mut self, tokens: &[&str], line_in_dbc: usize) -> Result<(), RecordError> {
        let msg_key: MessageKey = self.current.ok_or(RecordError::OrphanSignal)?;
        let msg = self
            .db
            .get_message_by_key(msg_key)
            .ok_or(RecordError::OrphanSignal)?;

        let sig = core::sg_::decode(tokens, line_in_dbc, msg)?;
        self.db.insert_signal(msg_key, sig);
        Ok(())
    }

    // the last message has no following BO_ to commit it
    fn finish(mut self) -> Catalog {
        if let Some(cur) = self.current.take() {
            self.db.commit_message(cur);
        }
        self.db
    }
}
