//! Guardrail: the shared vocabulary crate stays dependency-free.
//!
//! `querybean_core` holds the scalar registry, framework names and name helpers. Anything that needs serde,
//! tracing or error crates belongs in the generator crate.

const CORE_MANIFEST: &str = include_str!("../crates/querybean_core/Cargo.toml");

#[test]
fn core_crate_has_no_dependencies() {
    let mut in_deps = false;
    let mut offenders = Vec::new();

    for raw in CORE_MANIFEST.lines() {
        let line = raw.trim();
        if line.starts_with('[') && line.ends_with(']') {
            let section = line.trim_matches(|c| c == '[' || c == ']');
            in_deps = section == "dependencies"
                || section == "build-dependencies"
                || section.starts_with("dependencies.")
                || (section.starts_with("target.") && section.ends_with(".dependencies"));
            continue;
        }
        if !in_deps || line.is_empty() || line.starts_with('#') {
            continue;
        }
        offenders.push(line.to_string());
    }

    assert!(
        offenders.is_empty(),
        "querybean_core must not depend on other crates; found:\n{}",
        offenders.join("\n")
    );
}

#[test]
fn generator_depends_on_core_by_path() {
    let manifest = include_str!("../Cargo.toml");
    assert!(
        manifest
            .lines()
            .any(|l| l.trim_start().starts_with("querybean_core") && l.contains("path = \"crates/querybean_core\"")),
        "generator crate should use the in-tree querybean_core"
    );
}
