use std::str::FromStr;

use super::{Implementation, PythonSpec, SpecParseError, Variant};

fn parse(raw: &str) -> PythonSpec {
    PythonSpec::from_str(raw).expect("valid specifier")
}

#[test]
fn cpython_versions() {
    for raw in ["3.7", "3.7.11", "3.12.0a3", "3.11.0rc2", "3.12-dev", "3.13t"] {
        let spec = parse(raw);
        assert_eq!(spec.implementation(), &Implementation::CPython, "{raw}");
        assert_eq!(spec.version(), Some(raw), "{raw}");
        assert_eq!(spec.variant(), None, "{raw}");
    }
}

#[test]
fn source_variant() {
    let spec = parse("3.11.0a1-src");
    assert_eq!(spec.implementation(), &Implementation::CPython);
    assert_eq!(spec.version(), Some("3.11.0a1"));
    assert_eq!(spec.variant(), Some(Variant::Source));
    assert_eq!(spec.as_str(), "3.11.0a1-src");
}

#[test]
fn distributions() {
    let spec = parse("miniconda3-4.3.30");
    assert_eq!(
        spec.implementation(),
        &Implementation::Other("miniconda3".to_string())
    );
    assert_eq!(spec.version(), Some("4.3.30"));

    let spec = parse("stackless-3.7.5");
    assert_eq!(
        spec.implementation(),
        &Implementation::Other("stackless".to_string())
    );
    assert_eq!(spec.version(), Some("3.7.5"));

    // The name itself may contain dots; the split lands on the first
    // boundary that leaves a version token.
    let spec = parse("pypy3.10-7.3.12-src");
    assert_eq!(
        spec.implementation(),
        &Implementation::Other("pypy3.10".to_string())
    );
    assert_eq!(spec.version(), Some("7.3.12"));
    assert_eq!(spec.variant(), Some(Variant::Source));
}

#[test]
fn opaque_version_tokens() {
    let spec = parse("miniconda3-latest");
    assert_eq!(
        spec.implementation(),
        &Implementation::Other("miniconda3".to_string())
    );
    assert_eq!(spec.version(), Some("latest"));

    let spec = parse("jython-dev");
    assert_eq!(
        spec.implementation(),
        &Implementation::Other("jython".to_string())
    );
    assert_eq!(spec.version(), Some("dev"));
}

#[test]
fn unknown_implementations() {
    for raw in ["pypy37", "ironpython3.8", "somefancyforkpython3.10"] {
        let spec = parse(raw);
        assert_eq!(spec.implementation(), &Implementation::Unknown, "{raw}");
        assert_eq!(spec.version(), None, "{raw}");
    }
}

#[test]
fn parse_errors() {
    assert_eq!(PythonSpec::from_str(""), Err(SpecParseError::Empty));
    assert_eq!(
        PythonSpec::from_str("37.7"),
        Err(SpecParseError::InvalidVersion("37.7".to_string()))
    );
    assert_eq!(
        PythonSpec::from_str("3.12.0a3-foo"),
        Err(SpecParseError::InvalidVersion("3.12.0a3-foo".to_string()))
    );
    assert_eq!(
        PythonSpec::from_str("Python3.8"),
        Err(SpecParseError::Unrecognized("Python3.8".to_string()))
    );
    assert_eq!(
        PythonSpec::from_str("-src"),
        Err(SpecParseError::Unrecognized("-src".to_string()))
    );
}

#[test]
fn parse_is_idempotent() {
    for raw in [
        "3.7",
        "3.12.0a3",
        "3.12-dev",
        "3.11.0a1-src",
        "miniconda3-4.3.30",
        "pypy3.10-7.3.12-src",
        "pypy37",
    ] {
        let first = parse(raw);
        let second = parse(&first.to_string());
        assert_eq!(first, second, "{raw}");
    }
}
