use std::collections::HashMap;

use indoc::indoc;
use paramtree::{ParamErrorKind, Params, Severity, WriteError, WriteErrors};

#[derive(Params, Debug, Default)]
struct Config {
    #[serde(rename = "str")]
    string: String,
    #[param(rename = "int")]
    number: i64,
    #[param(rename = "int32")]
    number32: i32,
    #[param(rename = "uint")]
    small: u16,
    #[param(rename = "char")]
    letter: char,
    #[serde(rename = "bool")]
    flag: bool,
    #[serde(rename = "intmap")]
    int_map: HashMap<String, i64>,
    #[serde(rename = "intslice")]
    int_slice: Vec<i64>,
    nested: Option<Box<Config>>,
    #[serde(rename = "badmap")]
    bad_map: HashMap<i32, String>,
    #[param(read_only)]
    version: String,
}

fn params(listing: &str) -> Vec<(&str, &str)> {
    listing
        .lines()
        .filter_map(|line| line.split_once('='))
        .collect()
}

fn failures(error: &paramtree::ParamError) -> Vec<(&str, &str, Severity)> {
    error
        .write_errors()
        .expect("expected write failures")
        .iter()
        .map(|failure| (failure.path(), failure.message(), failure.severity()))
        .collect()
}

#[test]
fn all_kinds_of_errors() {
    let _ = env_logger::builder().is_test(true).try_init();

    let listing = indoc! {"
        string=foo
        int=not an int
        int32=1000000000000
        uint=-1
        char=unsupported type
        bool=yes
        intmap/foo=bad int
        intslice/0=bad int
        intslice/foo=bar
        nested=ignored
        nested/bad_field=foo
        badmap/0=foo
        version=2
    "};

    let mut config = Config::default();
    let error = paramtree::write(&mut config, params(listing)).unwrap_err();

    assert!(!error.is_warning());
    assert_eq!(
        failures(&error),
        [
            (
                "badmap",
                "can only write to maps with string keys",
                Severity::Fatal
            ),
            (
                "bool",
                "cannot read bool param value (must be true or false)",
                Severity::Fatal
            ),
            (
                "char",
                "cannot write param: destination is of unsupported type char",
                Severity::Fatal
            ),
            (
                "int",
                r#"cannot read i64 param value "not an int": invalid digit found in string"#,
                Severity::Fatal
            ),
            (
                "int32",
                r#"cannot read i32 param value "1000000000000": number too large to fit in target type"#,
                Severity::Fatal
            ),
            (
                "intmap/foo",
                r#"cannot read i64 param value "bad int": invalid digit found in string"#,
                Severity::Fatal
            ),
            ("intslice/foo", "not a numeric index", Severity::Path),
            (
                "intslice/0",
                r#"cannot read i64 param value "bad int": invalid digit found in string"#,
                Severity::Fatal
            ),
            (
                "nested",
                "ignoring self value of key that has child keys",
                Severity::Path
            ),
            ("nested/bad_field", "unknown field", Severity::Path),
            (
                "uint",
                r#"cannot read u16 param value "-1": invalid digit found in string"#,
                Severity::Fatal
            ),
            ("version", "value is not writable", Severity::Fatal),
        ]
    );

    // siblings of failing keys are still written
    assert_eq!(config.string, "foo");
    assert!(config.nested.is_some());
}

#[test]
fn path_level_failures_only_make_a_warning() {
    let listing = indoc! {"
        nested=ignored
        nested/bad_field=foo
        nested/str=written
    "};

    let mut config = Config::default();
    let error = paramtree::write(&mut config, params(listing)).unwrap_err();

    assert!(error.is_warning());
    assert_eq!(
        error.to_string(),
        "paramtree: nested: ignoring self value of key that has child keys, nested/bad_field: unknown field"
    );
    assert_eq!(config.nested.unwrap().string, "written");
}

#[test]
fn one_coercion_failure_is_an_error() {
    let mut config = Config::default();
    let error = paramtree::write(&mut config, [("int", "not an int")]).unwrap_err();

    assert_eq!(failures(&error).len(), 1);
    assert_eq!(failures(&error)[0].2, Severity::Fatal);
    assert!(!error.is_warning());
}

#[test]
fn interior_node_against_scalar() {
    let mut config = Config::default();
    let error = paramtree::write(&mut config, [("int/inner", "1"), ("char/x", "y")]).unwrap_err();

    assert_eq!(
        failures(&error),
        [
            ("char", "unhandleable destination type: char", Severity::Fatal),
            ("int", "unhandleable destination type: i64", Severity::Fatal),
        ]
    );
}

#[test]
fn leaf_against_aggregate() {
    let mut config = Config::default();
    let error = paramtree::write(&mut config, [("intmap", "1"), ("nested", "x")]).unwrap_err();

    assert_eq!(
        failures(&error),
        [
            (
                "intmap",
                "cannot write param: destination is of unsupported type map",
                Severity::Fatal
            ),
            (
                "nested",
                "cannot write param: destination is of unsupported type struct",
                Severity::Fatal
            ),
        ]
    );
}

#[test]
fn join_warnings() {
    let mut warnings = WriteErrors::new();
    warnings.push(WriteError::path_level("warning for foo").at("foo"));
    warnings.push(WriteError::path_level("warning for bar").at("bar"));

    let merged = warnings.into_result().unwrap_err();

    assert_eq!(
        merged.to_string(),
        "paramtree: foo: warning for foo, bar: warning for bar"
    );
    assert!(merged.is_warning());
}

#[test]
fn join_errors() {
    let mut errors = WriteErrors::new();
    errors.push(WriteError::fatal("error for foo").at("foo"));
    errors.push(WriteError::path_level("warning for bar").at("bar"));

    let merged = errors.into_result().unwrap_err();

    assert_eq!(
        merged.to_string(),
        "paramtree: foo: error for foo, bar: warning for bar"
    );
    assert!(!merged.is_warning());
}

#[test]
fn empty_set_is_success() {
    assert!(WriteErrors::new().into_result().is_ok());
}

#[test]
fn child_failures_are_prefixed() {
    let mut grandchild = WriteErrors::new();
    grandchild.push(WriteError::fatal("at the leaf"));
    grandchild.push(WriteError::path_level("below the leaf").at("extra"));

    let mut child = WriteErrors::new();
    child.merge_child("0", grandchild);

    let mut root = WriteErrors::new();
    root.push(WriteError::path_level("at the root"));
    root.merge_child("servers", child);

    let paths: Vec<_> = root.iter().map(WriteError::path).collect();
    assert_eq!(paths, ["", "servers/0", "servers/0/extra"]);
}

#[test]
fn root_must_be_a_struct_or_array() {
    let pairs = [("a", "1")];

    let error = paramtree::write(&mut 5i32, pairs).unwrap_err();
    assert!(matches!(error.kind(), ParamErrorKind::InvalidRoot("i32")));
    assert!(!error.is_warning());
    assert_eq!(
        error.to_string(),
        "paramtree: destination must be a struct or fixed-size array, got i32"
    );

    let mut list = vec![1u8];
    let error = paramtree::write(&mut list, pairs).unwrap_err();
    assert!(matches!(error.kind(), ParamErrorKind::InvalidRoot("slice")));
    assert_eq!(list, [1], "nothing is written before the root is accepted");

    let mut boxed = Box::new(Config::default());
    let error = paramtree::write(&mut boxed, [("str", "x")]).unwrap_err();
    assert!(matches!(error.kind(), ParamErrorKind::InvalidRoot("pointer")));
    assert!(boxed.string.is_empty());
}

#[test]
fn arrays_are_accepted_as_roots_but_not_written() {
    let mut array = [0u8; 2];
    let error = paramtree::write(&mut array, [("0", "1")]).unwrap_err();

    assert_eq!(
        failures(&error),
        [("", "unhandleable destination type: array", Severity::Fatal)]
    );
    assert_eq!(array, [0, 0]);
}
