use bloodwork::presentation::Environment;

#[test]
fn given_known_names_when_parsing_then_case_is_ignored() {
    assert_eq!(
        Environment::try_from("LOCAL".to_string()).unwrap(),
        Environment::Local
    );
    assert_eq!(
        Environment::try_from("test".to_string()).unwrap(),
        Environment::Test
    );
    assert_eq!(
        Environment::try_from("production".to_string()).unwrap(),
        Environment::Prod
    );
}

#[test]
fn given_unknown_name_when_parsing_then_returns_error() {
    let result = Environment::try_from("staging".to_string());
    assert!(result.unwrap_err().contains("staging"));
}

#[test]
fn given_default_environment_when_created_then_is_local() {
    assert_eq!(Environment::default(), Environment::Local);
}
