use opsdesk_core::{ProcessMatch, ProcessRecord};

#[test]
fn record_new_fills_all_fields() {
    let record = ProcessRecord::new("Accounts", "Login Issues", "Reset the password.");

    assert_eq!(record.section, "Accounts");
    assert_eq!(record.title, "Login Issues");
    assert_eq!(record.content, "Reset the password.");
}

#[test]
fn record_serialization_uses_expected_wire_fields() {
    let record = ProcessRecord::new(
        "Accounts",
        "Login Issues",
        "Reset the password from the admin panel.",
    );

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["section"], "Accounts");
    assert_eq!(json["title"], "Login Issues");
    assert_eq!(json["content"], "Reset the password from the admin panel.");

    let decoded: ProcessRecord = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, record);
}

#[test]
fn match_serialization_carries_title_and_content_only() {
    let found = ProcessMatch {
        title: "VPN Setup".to_string(),
        content: "Install the client and import the profile.".to_string(),
    };

    let json = serde_json::to_value(&found).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(json["title"], "VPN Setup");
    assert_eq!(json["content"], "Install the client and import the profile.");
}

#[test]
fn match_from_record_drops_the_section() {
    let record = ProcessRecord::new("Network", "VPN Setup", "Install the client.");

    let found = ProcessMatch::from(record);
    assert_eq!(found.title, "VPN Setup");
    assert_eq!(found.content, "Install the client.");
}

#[test]
fn deserialize_rejects_rows_with_missing_columns() {
    let value = serde_json::json!({
        "section": "Accounts",
        "title": "Login Issues"
    });

    let err = serde_json::from_value::<ProcessRecord>(value).unwrap_err();
    assert!(
        err.to_string().contains("content"),
        "unexpected error: {err}"
    );
}
