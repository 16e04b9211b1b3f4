use genpy_core::{MsgContext, MsgGenerationError, MsgSpec};
use genpy_generator::{Resolution, compute_pkg_type, get_registered_ex, resolve, resolve_strict};

fn spec(types: &[&str], names: &[&str], full_name: &str) -> MsgSpec {
    MsgSpec::new(types.to_vec(), names.to_vec(), vec![], "", full_name).unwrap()
}

fn registry() -> MsgContext {
    let mut ctx = MsgContext::create_default();
    ctx.register("fake_msgs/String", spec(&["string"], &["data"], "fake_msgs/String"));
    ctx.register("fake_msgs/ThreeNums", spec(&["int32", "int32", "int32"], &["x", "y", "z"], "fake_msgs/ThreeNums"));
    ctx.register("other_msgs/ThreeNums", spec(&["int8"], &["x"], "other_msgs/ThreeNums"));
    ctx
}

// ── compute_pkg_type ──

#[test]
fn pkg_type_splits_or_defaults_the_package() {
    let pair = |p: &str, n: &str| (p.to_string(), n.to_string());
    assert_eq!(compute_pkg_type("std_msgs", "std_msgs/String").unwrap(), pair("std_msgs", "String"));
    assert_eq!(compute_pkg_type("foo", "std_msgs/String").unwrap(), pair("std_msgs", "String"));
    assert_eq!(compute_pkg_type("std_msgs", "String").unwrap(), pair("std_msgs", "String"));
}

#[test]
fn pkg_type_rejects_malformed_references() {
    for bad in ["really/bad/std_msgs/String", "a/b/c", "/String", "std_msgs/"] {
        let err = compute_pkg_type("std_msgs", bad).unwrap_err();
        assert!(matches!(err, MsgGenerationError::IllegalType { .. }), "{bad}");
    }
}

// ── resolve ──

#[test]
fn builtins_never_touch_the_registry() {
    let ctx = MsgContext::create_default();
    for t in ["int8", "string", "time", "duration", "Header", "std_msgs/Header", "float64[3]"] {
        assert!(matches!(resolve(&ctx, "pkg", t).unwrap(), Resolution::Builtin(_)), "{t}");
    }
}

#[test]
fn qualified_names_resolve_iff_registered() {
    let ctx = registry();
    assert_eq!(
        resolve(&ctx, "std_msgs", "fake_msgs/String").unwrap(),
        Resolution::Found("fake_msgs/String".into())
    );
    assert_eq!(
        resolve(&ctx, "fake_msgs", "fake_msgs/String[]").unwrap(),
        Resolution::Found("fake_msgs/String".into())
    );
    assert_eq!(resolve(&ctx, "fake_msgs", "unknown_msgs/Foo").unwrap(), Resolution::NotFound);
}

#[test]
fn short_names_prefer_the_current_package() {
    let ctx = registry();
    assert_eq!(
        resolve(&ctx, "fake_msgs", "ThreeNums").unwrap().found(),
        Some("fake_msgs/ThreeNums")
    );
    assert_eq!(
        resolve(&ctx, "other_msgs", "ThreeNums").unwrap().found(),
        Some("other_msgs/ThreeNums")
    );
}

#[test]
fn short_names_from_other_packages_are_ambiguous() {
    let ctx = registry();
    assert_eq!(
        resolve(&ctx, "std_msgs", "ThreeNums").unwrap(),
        Resolution::Ambiguous(vec!["fake_msgs/ThreeNums".into(), "other_msgs/ThreeNums".into()])
    );
    // A single candidate is still not guessed.
    assert_eq!(
        resolve(&ctx, "std_msgs", "String").unwrap(),
        Resolution::Ambiguous(vec!["fake_msgs/String".into()])
    );
    assert_eq!(resolve(&ctx, "std_msgs", "Missing").unwrap(), Resolution::NotFound);
}

#[test]
fn strict_resolution_reports_failures() {
    let ctx = registry();
    assert_eq!(resolve_strict(&ctx, "fake_msgs", "String").unwrap(), "fake_msgs/String");
    assert_eq!(resolve_strict(&ctx, "fake_msgs", "int32[]").unwrap(), "int32");

    let err = resolve_strict(&ctx, "std_msgs", "ThreeNums").unwrap_err();
    assert!(matches!(err, MsgGenerationError::Ambiguous { ref candidates, .. } if candidates.len() == 2));
    assert!(err.to_string().contains("fake_msgs/ThreeNums, other_msgs/ThreeNums"), "{err}");

    let err = resolve_strict(&ctx, "std_msgs", "bad_msgs/Nope").unwrap_err();
    assert_eq!(err, MsgGenerationError::Unregistered { name: "bad_msgs/Nope".into() });
}

// ── get_registered_ex ──

#[test]
fn get_registered_ex_returns_or_fails() {
    let mut ctx = MsgContext::create_default();
    let s = spec(&["string"], &["data"], "tgr_msgs/String");
    ctx.register("tgr_msgs/String", s.clone());

    assert_eq!(get_registered_ex(&ctx, "tgr_msgs/String").unwrap(), &s);
    let err = get_registered_ex(&ctx, "bad_msgs/String").unwrap_err();
    assert!(matches!(err, MsgGenerationError::Unregistered { .. }));
}
