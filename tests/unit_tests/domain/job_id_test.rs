use bloodwork::domain::JobId;

#[test]
fn given_two_new_ids_when_compared_then_differ() {
    assert_ne!(JobId::new(), JobId::new());
}

#[test]
fn given_displayed_id_when_parsed_then_round_trips() {
    let id = JobId::new();
    let parsed: JobId = id.to_string().parse().unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn given_id_with_surrounding_whitespace_when_parsed_then_succeeds() {
    let id = JobId::new();
    let parsed: JobId = format!("  {}  ", id).parse().unwrap();
    assert_eq!(parsed, id);
}

#[test]
fn given_garbage_when_parsed_then_fails() {
    assert!("definitely-not-a-uuid".parse::<JobId>().is_err());
    assert!("".parse::<JobId>().is_err());
}
