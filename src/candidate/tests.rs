use super::*;
use crate::config::ConfigError;

fn mapping() -> ColumnMapping {
    ColumnMapping {
        first_name: Some("First Name".to_string()),
        last_name: Some("Last Name".to_string()),
        company: Some("Company".to_string()),
        title: Some("Title".to_string()),
        profile_url: Some("LinkedIn".to_string()),
    }
}

fn row(first: &str, last: &str, company: &str) -> RawColumns {
    [
        ("First Name", first),
        ("Last Name", last),
        ("Company", company),
        ("Title", "Engineer"),
        ("LinkedIn", ""),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_raw_columns_preserve_insertion_order() {
    let raw: RawColumns = [("Zeta", "1"), ("Alpha", "2"), ("Mid", "3")]
        .into_iter()
        .collect();
    let names: Vec<_> = raw.column_names().collect();
    assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_raw_columns_insert_replaces_in_place() {
    let mut raw = RawColumns::new();
    raw.insert("A", "1");
    raw.insert("B", "2");
    raw.insert("A", "3");
    assert_eq!(raw.len(), 2);
    assert_eq!(raw.get("A"), Some("3"));
    assert_eq!(raw.column_names().next(), Some("A"));
}

#[test]
fn test_raw_columns_deserialize_keeps_document_order() {
    let raw: RawColumns =
        serde_json::from_str(r#"{"Zeta": "z", "Alpha": 7, "Empty": null, "Flag": true}"#)
            .expect("valid row");
    let pairs: Vec<_> = raw.iter().collect();
    assert_eq!(
        pairs,
        vec![("Zeta", "z"), ("Alpha", "7"), ("Empty", ""), ("Flag", "true")]
    );
}

#[test]
fn test_raw_columns_serialize_as_object() {
    let raw: RawColumns = [("B", "2"), ("A", "1")].into_iter().collect();
    let json = serde_json::to_string(&raw).unwrap();
    assert_eq!(json, r#"{"B":"2","A":"1"}"#);
}

#[test]
fn test_non_empty_trims_and_filters_blank() {
    let raw: RawColumns = [("A", "  x "), ("B", "   ")].into_iter().collect();
    assert_eq!(raw.non_empty("A"), Some("x"));
    assert_eq!(raw.non_empty("B"), None);
    assert_eq!(raw.non_empty("missing"), None);
}

#[test]
fn test_ingest_derives_normalized_fields() {
    let store = CandidateStore::ingest(vec![row("  Dana ", "Levi ", " Riskified ")], &mapping())
        .expect("mapping is valid");

    let record = store.get(CandidateId(0)).unwrap();
    assert_eq!(record.first_name, "Dana");
    assert_eq!(record.full_name, "Dana Levi");
    assert_eq!(record.company, "Riskified");
    assert_eq!(record.title, "Engineer");
    assert_eq!(record.profile_url, "");
    assert_eq!(record.id.sheet_row(), 2);
}

#[test]
fn test_ingest_keeps_rows_with_blank_fields() {
    let store = CandidateStore::ingest(
        vec![row("Dana", "Levi", ""), row("", "", "")],
        &mapping(),
    )
    .unwrap();

    assert_eq!(store.len(), 2);
    let blank = store.get(CandidateId(1)).unwrap();
    assert_eq!(blank.full_name, "");
    assert_eq!(blank.display_name(), "row-3");
}

#[test]
fn test_ingest_requires_identity_mapping() {
    let mut mapping = mapping();
    mapping.company = None;

    let err = CandidateStore::ingest(vec![], &mapping).unwrap_err();
    assert!(matches!(err, ConfigError::MissingMapping { field: "company" }));

    let mut mapping = self::mapping();
    mapping.first_name = Some("   ".to_string());
    let err = CandidateStore::ingest(vec![], &mapping).unwrap_err();
    assert!(matches!(
        err,
        ConfigError::MissingMapping {
            field: "first_name"
        }
    ));
}

#[test]
fn test_identity_key_is_case_insensitive() {
    let store = CandidateStore::ingest(
        vec![row("Dana", "Levi", "Acme"), row("DANA", "LEVI", "ACME")],
        &mapping(),
    )
    .unwrap();
    assert_eq!(
        store.get(CandidateId(0)).unwrap().identity_key,
        store.get(CandidateId(1)).unwrap().identity_key
    );
}

#[test]
fn test_profile_summary_uses_selected_order() {
    let store = CandidateStore::ingest(vec![row("Dana", "Levi", "Acme")], &mapping()).unwrap();
    let record = store.get(CandidateId(0)).unwrap();

    let columns = vec![
        "Title".to_string(),
        "LinkedIn".to_string(),
        "Company".to_string(),
    ];
    assert_eq!(record.profile_summary(&columns), "Engineer | Acme");
    assert!(record.has_profile_data(&columns));
    assert!(!record.has_profile_data(&["LinkedIn".to_string()]));
    assert!(!record.has_profile_data(&[]));
}

#[test]
fn test_searchable_text_falls_back_to_all_values() {
    let store = CandidateStore::ingest(vec![row("Dana", "Levi", "Acme")], &mapping()).unwrap();
    let record = store.get(CandidateId(0)).unwrap();

    assert_eq!(record.searchable_text(&[]), "dana levi acme engineer");
    assert_eq!(record.searchable_text(&["Company".to_string()]), "acme");
}

#[test]
fn test_tagging() {
    let mut store = CandidateStore::ingest(vec![row("Dana", "Levi", "Acme")], &mapping()).unwrap();

    assert!(store.tag(CandidateId(0), CandidateTag::HotSignal));
    assert!(!store.tag(CandidateId(9), CandidateTag::HotSignal));
    assert!(store.get(CandidateId(0)).unwrap().has_tag(CandidateTag::HotSignal));
    assert_eq!(CandidateTag::HiddenGem.to_string(), "Hidden Gem");
}
