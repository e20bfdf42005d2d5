use dbc_catalog::{Catalog, Endianness, IdFormat, Message, RecordError, Signal, Signess, dbc};

const DBC_CONTENT: &str = r#"
VERSION "1.0.2"

NS_ :
	CM_
	BA_DEF_
	BA_
	VAL_

BS_:

BU_: Motor Infotainment Gateway

BO_ 2527679645 Motor_01: 8 Motor
 SG_ Status : 61|1@1+ (1,0) [0|1] ""  Infotainment,Gateway
 SG_ Overheat : 62|1@1+ (1,0) [0|1] ""  Gateway
 SG_ Engine_Speed : 48|8@1+ (1,0) [0|255] "km/h" Infotainment
 SG_ Oil_Temp : 0|8@0- (0.5,-40) [-40|87.5] "degC" Infotainment

BO_ 708 ZV_04: 8 Gateway
 SG_ Door_Mux M : 0|2@1+ (1,0) [0|3] "" Vector__XXX
 SG_ Door_Left m0 : 8|1@1+ (1,0) [0|1] "" Vector__XXX
 SG_ Door_Right m1 : 8|1@1+ (1,0) [0|1] "" Vector__XXX

BO_ 3 Broken: 8
 SG_ Orphaned_Into_ZV : 16|x@1+ (1,0) [0|1] "" Vector__XXX

BO_ 1536 Diag: 8 Gateway
 SG_ Diag_Code : 0|16@1+ (1,0) [0|65535] "" Gateway

CM_ BO_ 2527679645 "Motor status frame";
CM_ SG_ 2527679645 Engine_Speed "Vehicle speed as seen by the engine.";

BA_DEF_ SG_ "CI_SigId" INT 0 65535;
BA_ "DBName" "TestCAN";
BA_ "CI_SigId" SG_ 2527679645 Status 101;
BA_ "CI_SigId" SG_ 2527679645 Engine_Speed 102;
BA_ "CI_SigId" SG_ 708 Door_Mux 201;
BA_ "CI_SigId" SG_ 708 Missing_Signal 999;

VAL_ 2527679645 Status 1 "On" 0 "Off" ;
VAL_ 2527679645 Overheat 1 "Overheat failure" 0 "No Overheat" ;
VAL_ 2527679645 Engine_Speed 255 "Error";
VAL_ 708 Door_Mux 0 "Left" 1 "Right" 2 ;
"#;

fn names<'a>(it: impl Iterator<Item = &'a Signal>) -> Vec<&'a str> {
    it.map(|s| s.name.as_str()).collect()
}

#[test]
fn test_full_document() {
    let db: Catalog = dbc::from_str(DBC_CONTENT);

    // --- Messages ---
    let msg_names: Vec<&str> = db.iter_messages().map(|m| m.name.as_str()).collect();
    assert_eq!(msg_names, vec!["Motor_01", "ZV_04", "Diag"]);

    let motor: &Message = db.get_message_by_name("Motor_01").unwrap();
    assert_eq!(motor.can_id, 0x16A9_549D);
    assert_eq!(motor.id_format, IdFormat::Extended);
    assert_eq!(motor.source, 0x9D);
    assert_eq!(motor.pgn, 0xA954);
    assert_eq!(motor.priority, 0x16);
    assert_eq!(motor.dlc, 8);
    assert_eq!(motor.sender, "Motor");

    let zv: &Message = db.get_message_by_id(708).unwrap();
    assert_eq!(zv.name, "ZV_04");
    assert!(!zv.is_extended_frame);
    assert_eq!(zv.pgn, 708);

    // --- Signals ---
    assert_eq!(
        names(db.message_signals(motor)),
        vec!["Status", "Overheat", "Engine_Speed", "Oil_Temp"]
    );
    assert_eq!(
        names(db.message_signals(zv)),
        vec!["Door_Mux", "Door_Left", "Door_Right"]
    );
    assert_eq!(db.signal_count(), 8);

    let oil: &Signal = db.get_signal_by_name("Oil_Temp").unwrap();
    assert_eq!(oil.endianness, Endianness::Motorola);
    assert_eq!(oil.sign, Signess::Signed);
    assert_eq!(oil.offset, -40.0);
    assert_eq!(oil.min, -40.0);
    assert_eq!(oil.unit, "degC");

    let status: &Signal = db.get_signal_by_name("Status").unwrap();
    assert_eq!(status.receivers, vec!["Infotainment", "Gateway"]);
    assert_eq!(status.msg_id, motor.can_id);
    assert_eq!(status.label, "Motor_01");

    // --- Attributes ---
    assert_eq!(status.sig_id, Some(101));
    assert_eq!(db.get_signal_by_name("Engine_Speed").unwrap().sig_id, Some(102));
    assert_eq!(db.get_signal_by_name("Door_Mux").unwrap().sig_id, Some(201));
    assert_eq!(db.get_signal_by_name("Overheat").unwrap().sig_id, None);

    // --- Value tables ---
    assert_eq!(status.state_name(1), Some("On"));
    assert_eq!(status.state_name(0), Some("Off"));
    let overheat: &Signal = db.get_signal_by_name("Overheat").unwrap();
    assert_eq!(overheat.states.len(), 2);
    assert_eq!(overheat.states[0].name, "Overheat failure");
    // odd pair count rejects the whole record
    assert!(db.get_signal_by_name("Door_Mux").unwrap().states.is_empty());
}

#[test]
fn test_every_signal_owned_once() {
    let db: Catalog = dbc::from_str(DBC_CONTENT);

    for sig in db.iter_signals() {
        let owners: usize = db
            .iter_messages()
            .filter(|m| db.message_signals(m).any(|s| std::ptr::eq(s, sig)))
            .count();
        assert_eq!(owners, 1, "{}", sig.name);
        assert_eq!(db.signal_message(sig).unwrap().can_id, sig.msg_id);
    }
    let owned: usize = db.iter_messages().map(|m| m.signals.len()).sum();
    assert_eq!(owned, db.signal_count());
}

#[test]
fn test_diagnostics() {
    let db: Catalog = dbc::from_str(DBC_CONTENT);

    let found: Vec<(&str, &RecordError)> = db
        .diagnostics
        .iter()
        .map(|d| (d.keyword, &d.error))
        .collect();

    assert_eq!(found.len(), 4);
    assert!(matches!(
        found[0],
        ("BO_", RecordError::MalformedRecord { found: 4, .. })
    ));
    // the broken BO_ leaves ZV_04 as the current message
    assert!(matches!(
        found[1],
        ("SG_", RecordError::FieldParseFailure { field: "bit info", .. })
    ));
    assert_eq!(
        found[2],
        (
            "BA_",
            &RecordError::UnresolvedReference {
                signal: "Missing_Signal".to_string()
            }
        )
    );
    assert!(matches!(
        found[3],
        ("VAL_", RecordError::FieldParseFailure { .. })
    ));

    let line_of = |needle: &str| {
        DBC_CONTENT
            .split('\n')
            .position(|l| l.contains(needle))
            .unwrap()
    };
    assert_eq!(db.diagnostics[0].line, line_of("Broken"));
    assert_eq!(db.diagnostics[2].line, line_of("Missing_Signal"));
}

#[test]
fn test_search() {
    let db: Catalog = dbc::from_str(DBC_CONTENT);

    let hits: Vec<&str> = db
        .search_signals("door")
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(hits, vec!["Door_Mux", "Door_Left", "Door_Right"]);

    let msgs: Vec<&str> = db
        .search_messages("ZV")
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(msgs, vec!["ZV_04"]);
}

#[test]
fn test_from_file() {
    // Windows-1252 content with an 'ä' (0xE4) in a value description
    let mut bytes: Vec<u8> = DBC_CONTENT.as_bytes().to_vec();
    bytes.extend_from_slice(b"VAL_ 1536 Diag_Code 0 \"Kein Fehler\" ");
    bytes.extend_from_slice(b"1 \"Kurzschluss gegen Masse (R");
    bytes.push(0xE4);
    bytes.extend_from_slice(b"der)\" ;\n");

    let tmp_path = std::env::temp_dir().join("dbc_catalog_from_file.dbc");
    std::fs::write(&tmp_path, &bytes).unwrap();

    let db: Catalog = dbc::from_file(tmp_path.to_str().unwrap()).expect("Failed to parse DBC");
    let _ = std::fs::remove_file(&tmp_path);

    assert_eq!(db.message_count(), 3);
    let diag: &Signal = db.get_signal_by_name("Diag_Code").unwrap();
    assert_eq!(diag.state_name(0), Some("Kein Fehler"));
    assert_eq!(diag.state_name(1), Some("Kurzschluss gegen Masse (R\u{e4}der)"));
}
