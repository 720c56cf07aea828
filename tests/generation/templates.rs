//! Template loading against the fixture files.

use pattern_generator::{
    CompileError, CountingSources, LineError, SeededSources, TemplateError, TemplateFile,
};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_fixture_loads_in_definition_order() {
    let template = TemplateFile::from_file(fixture("people.rnd"), CountingSources).unwrap();

    let names: Vec<&str> = template
        .definitions()
        .iter()
        .map(|d| d.name.as_str())
        .collect();
    assert_eq!(names, vec!["email", "first", "last", "digit", "phone", "nothing"]);
    assert_eq!(template.definitions()[0].line, 6);
    assert_eq!(template.environment().len(), 6);
}

#[test]
fn test_fixture_forward_references_resolve() {
    let template = TemplateFile::from_file(fixture("people.rnd"), CountingSources).unwrap();

    // Every choice node counts from zero on its own.
    assert_eq!(template.generate("email").unwrap(), "ann.lee01@example.com");
    assert_eq!(template.generate("email").unwrap(), "bob.ng23@test.com");
}

#[test]
fn test_fixture_shared_variable_draws_in_order() {
    let template = TemplateFile::from_file(fixture("people.rnd"), CountingSources).unwrap();

    // All nine digits come from the single `digit` class.
    assert_eq!(template.generate("phone").unwrap(), "+1 (012) 345-6789");
    assert_eq!(template.generate("digit").unwrap(), "0");
}

#[test]
fn test_fixture_empty_generator() {
    let template = TemplateFile::from_file(fixture("people.rnd"), CountingSources).unwrap();
    assert_eq!(template.generate("nothing").unwrap(), "");
    assert_eq!(template.describe("nothing").unwrap(), "alt(seq())");
}

#[test]
fn test_seeded_templates_agree() {
    let a = TemplateFile::from_file(fixture("people.rnd"), SeededSources::new(7)).unwrap();
    let b = TemplateFile::from_file(fixture("people.rnd"), SeededSources::new(7)).unwrap();

    for _ in 0..25 {
        assert_eq!(a.generate("email").unwrap(), b.generate("email").unwrap());
        assert_eq!(a.generate("phone").unwrap(), b.generate("phone").unwrap());
    }
}

#[test]
fn test_unknown_generator() {
    let template = TemplateFile::from_file(fixture("people.rnd"), CountingSources).unwrap();
    let err = template.generate("address").unwrap_err();
    assert!(matches!(err, TemplateError::GeneratorNotFound(ref name) if name == "address"));
}

#[test]
fn test_missing_file() {
    let err = TemplateFile::from_file(fixture("missing.rnd"), CountingSources).unwrap_err();
    assert!(matches!(err, TemplateError::Io(_)));
}

#[test]
fn test_bad_lines_report_line_numbers() {
    let err = TemplateFile::from_text("ok = a\n\nbad name = b\n", CountingSources).unwrap_err();
    assert!(matches!(
        err,
        TemplateError::MalformedLine {
            line: 3,
            kind: LineError::UnexpectedAfterName
        }
    ));

    let err = TemplateFile::from_text("x = (ab\n", CountingSources).unwrap_err();
    match err {
        TemplateError::Pattern { line, name, source } => {
            assert_eq!(line, 1);
            assert_eq!(name, "x");
            assert_eq!(source, CompileError::UnclosedGroup { open: 1 });
        }
        other => panic!("unexpected error: {other}"),
    }
}
