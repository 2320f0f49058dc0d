//! Naming plans do not depend on declaration order

use std::collections::BTreeMap;

use proptest::prelude::*;
use vercat_accessors::{CatalogOptions, VersionCatalog};
use vercat_core::naming::normalize_segment;
use vercat_core::{Declaration, DeclarationKind, DeclarationSet};

/// Segments mixing case, `-`, `_` and leading digits
const ALIAS: &str = "[a-dA-D0-9][a-dA-D0-9_-]{0,3}(\\.[a-dA-D0-9][a-dA-D0-9_-]{0,3}){0,3}";

/// Drop aliases whose segments normalize onto an already kept sibling
fn without_collisions(names: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut claimed: BTreeMap<(String, String), String> = BTreeMap::new();
    let mut kept = Vec::new();
    for name in names {
        let segments: Vec<&str> = name.split('.').collect();
        let claims: Vec<((String, String), String)> = (0..segments.len())
            .map(|depth| {
                let key = normalize_segment(segments[depth])
                    .unwrap_or_default()
                    .to_ascii_lowercase();
                ((segments[..depth].join("."), key), segments[depth].to_string())
            })
            .collect();
        let clashes = claims
            .iter()
            .any(|(slot, raw)| claimed.get(slot).is_some_and(|existing| existing != raw));
        if !clashes {
            claimed.extend(claims);
            kept.push(name);
        }
    }
    kept
}

fn aliases() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(ALIAS, 1..24).prop_map(without_collisions)
}

fn declaration_set(libraries: &[String], versions: &[String]) -> DeclarationSet {
    libraries
        .iter()
        .map(|alias| Declaration::library(alias.as_str(), "org.example", alias))
        .chain(versions.iter().map(|alias| Declaration::version(alias.as_str(), "1.0.0")))
        .collect()
}

proptest! {
    #[test]
    fn shuffled_declarations_give_identical_plans(
        (libraries, shuffled_libraries) in aliases()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
        (versions, shuffled_versions) in aliases()
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
    ) {
        let options = CatalogOptions::default();
        let first = VersionCatalog::build(options.clone(), &declaration_set(&libraries, &versions)).unwrap();
        let second = VersionCatalog::build(
            options,
            &declaration_set(&shuffled_libraries, &shuffled_versions),
        )
        .unwrap();

        prop_assert_eq!(first.plan(), second.plan());
        prop_assert_eq!(first.fingerprints(), second.fingerprints());

        for alias in &libraries {
            let a = first.resolve(DeclarationKind::Library, alias).unwrap().to_string();
            let b = second.resolve(DeclarationKind::Library, alias).unwrap().to_string();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn shuffled_colliding_declarations_fail_identically(
        (versions, shuffled) in prop::collection::btree_set(ALIAS, 1..24)
            .prop_map(|set| set.into_iter().collect::<Vec<_>>())
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle())),
    ) {
        let options = CatalogOptions::default();
        let first = VersionCatalog::build(options.clone(), &declaration_set(&[], &versions))
            .map(|catalog| catalog.plan());
        let second = VersionCatalog::build(options, &declaration_set(&[], &shuffled))
            .map(|catalog| catalog.plan());
        prop_assert_eq!(first, second);
    }
}
