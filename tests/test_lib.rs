use codemorph::Language;

#[test]
fn parse_lowercase_tags() {
    assert_eq!("python".parse::<Language>(), Ok(Language::Python));
    assert_eq!("javascript".parse::<Language>(), Ok(Language::JavaScript));
    assert_eq!("csharp".parse::<Language>(), Ok(Language::CSharp));
}

#[test]
fn parse_is_case_insensitive() {
    assert_eq!("Python".parse::<Language>(), Ok(Language::Python));
    assert_eq!(" JAVASCRIPT ".parse::<Language>(), Ok(Language::JavaScript));
}

#[test]
fn parse_unknown_tag_fails() {
    let err = "cobol".parse::<Language>().unwrap_err();
    assert!(err.to_string().contains("cobol"));
}

#[test]
fn display_matches_tag() {
    for lang in Language::ALL {
        assert_eq!(lang.to_string(), lang.as_str());
        assert_eq!(lang.as_str().parse::<Language>(), Ok(lang));
    }
}

#[test]
fn export_extensions() {
    assert_eq!(Language::JavaScript.export_extension(), "js");
    assert_eq!(Language::Python.export_extension(), "py");
    assert_eq!(Language::Rust.export_extension(), "txt");
    assert_eq!(Language::TypeScript.export_extension(), "txt");
}

#[test]
fn serializes_as_lowercase_tag() {
    assert_eq!(serde_json::to_string(&Language::CSharp).unwrap(), "\"csharp\"");
    let parsed: Language = serde_json::from_str("\"javascript\"").unwrap();
    assert_eq!(parsed, Language::JavaScript);
}
