use std::collections::HashMap;

use querybean_core::lang::scalars::{self, ScalarKind};

#[test]
fn scalar_host_names_unique_and_resolvable() {
    let mut seen: HashMap<&'static str, ScalarKind> = HashMap::new();

    for info in scalars::SCALAR_TYPES {
        assert!(!info.host_names.is_empty(), "scalar {:?} has no host names", info.id);
        for &name in info.host_names {
            assert_eq!(
                scalars::lookup(name),
                Some(info.id),
                "scalar host name not resolvable: {}",
                name
            );
            if let Some(prev) = seen.insert(name, info.id) {
                panic!("duplicate scalar host name {:?}: {:?} and {:?}", name, prev, info.id);
            }
        }
    }
}

#[test]
fn scalar_tokens_are_property_types() {
    let mut tokens: Vec<&str> = Vec::new();
    for info in scalars::SCALAR_TYPES {
        assert!(info.token.starts_with('P'), "unexpected token spelling: {}", info.token);
        assert_eq!(scalars::token(info.id), info.token);
        tokens.push(info.token);
    }
    let total = tokens.len();
    tokens.sort_unstable();
    tokens.dedup();
    assert_eq!(tokens.len(), total, "two scalar kinds share a token");
}
