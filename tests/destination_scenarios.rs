//! End-to-end destination scenarios against the embedded sample catalog.
//!
//! These exercise the public API only and assert which pipeline stage fired,
//! not exact similarity values.

use port_resolver::parsing::normalize::PURE_NOISE;
use port_resolver::{MatchResult, MatchStage, MatchingEngine, PortCatalog};

fn catalog() -> PortCatalog {
    PortCatalog::load_embedded().expect("embedded catalog loads")
}

/// Assert `input` resolves to exactly one port via `stage`
fn check(engine: &MatchingEngine<'_>, input: &str, locode: &str, stage: MatchStage) {
    let resolution = engine.resolve(input);
    match &resolution.result {
        MatchResult::Matched(m) => {
            assert_eq!(m.locode, locode, "wrong port for {input:?}");
            assert_eq!(m.reported_destination, input);
        }
        other => panic!("{input:?} should match {locode}, got {other:?}"),
    }
    assert_eq!(resolution.stage, Some(stage), "wrong stage for {input:?}");
}

#[test]
fn test_locode_resolves_with_catalog_fields() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    let result = engine.match_destination("TRTUZ");
    let m = result.single().expect("single match");
    assert_eq!(m.locode, "TRTUZ");
    assert_eq!(m.port, "Tuzla");
    assert_eq!(m.country, "Turkey");
    assert_eq!(m.reported_destination, "TRTUZ");
}

#[test]
fn test_every_locode_resolves_to_itself() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    for record in catalog.records() {
        let result = engine.match_destination(&record.locode);
        let m = result
            .single()
            .unwrap_or_else(|| panic!("{} did not resolve: {result:?}", record.locode));
        assert_eq!(m.locode, record.locode);
        assert_eq!(m.port, record.port);
        assert_eq!(m.country, record.country);
    }
}

#[test]
fn test_route_uses_last_leg() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    assert_eq!(
        engine.match_destination("EGSUZ -> TRTUZ").single().map(|m| m.locode.clone()),
        engine.match_destination("TRTUZ").single().map(|m| m.locode.clone()),
    );

    check(&engine, "EGSUZ -> TRTUZ", "TRTUZ", MatchStage::Locode);
    check(&engine, "BEZEE <> GBHUL", "GBHUL", MatchStage::Locode);
    check(&engine, "LYBEN>>MTMAR", "MTMAR", MatchStage::Locode);
    check(&engine, "JPMIZ TO CNZOS", "CNZOS", MatchStage::Locode);
    check(&engine, "AUHIR=>CNSHA=>JPTYO", "JPTYO", MatchStage::Locode);
}

#[test]
fn test_earlier_legs_do_not_affect_result() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    let expected = engine.match_destination("SINGAPORE").single().cloned().map(|m| m.locode);
    for prefix in ["TRTUZ", "SOMEWHERE ELSE", "MAA", "TBA"] {
        let input = format!("{prefix} > SINGAPORE");
        let got = engine.match_destination(&input).single().cloned().map(|m| m.locode);
        assert_eq!(got, expected, "input {input:?}");
    }
}

#[test]
fn test_pure_noise_is_unmatched_with_original_input() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    for noise in PURE_NOISE {
        for input in [noise.to_string(), noise.to_lowercase(), format!("  {noise} ")] {
            let result = engine.match_destination(&input);
            assert_eq!(result, MatchResult::unmatched(&input));
        }
    }

    for input in ["", "   ", "\t"] {
        assert_eq!(engine.match_destination(input), MatchResult::unmatched(input));
    }
}

#[test]
fn test_country_qualified_exact_names() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    let cases = [
        ("LAGOS NIGERIA", "NGLOS"),
        ("PORTLAND AUSTRALIA", "AUPTJ"),
        ("INDIA, KOCHI", "INCOK"),
        ("SANTOS BR", "BRSSZ"),
        ("HAMBURG DE", "DEHAM"),
        ("ANTWERP/BELGIUM", "BEANR"),
        ("ROTTERDAM - NETHERLANDS", "NLRTM"),
        ("DAMPIER, AUSTRALIA", "AUDAM"),
        ("ARATU. BRAZIL", "BRARB"),
        ("SHANGHAI   CHINA", "CNSHA"),
    ];
    for (input, locode) in cases {
        check(&engine, input, locode, MatchStage::CountryExactPortName);
    }

    let lagos = engine.match_destination("LAGOS NIGERIA");
    let m = lagos.single().unwrap();
    assert_eq!(m.port, "Lagos");
    assert_eq!(m.country, "Nigeria");
}

#[test]
fn test_country_qualifier_beats_global_order() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    // Portland, United States is loaded first and wins without a qualifier
    check(&engine, "PORTLAND", "USPDX", MatchStage::ExactPortName);
    check(&engine, "PORTLAND AUSTRALIA", "AUPTJ", MatchStage::CountryExactPortName);
}

#[test]
fn test_misspellings() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    check(&engine, "SINGAPROE", "SGSIN", MatchStage::GlobalFuzzy);
    check(&engine, "SHNAGHAI", "CNSHA", MatchStage::GlobalFuzzy);
    check(&engine, "ROTREDAM", "NLRTM", MatchStage::GlobalFuzzy);
    check(&engine, "ROTREDAM NETHERLANDS", "NLRTM", MatchStage::CountryFuzzy);
    check(&engine, "MLBRN AUSTRALIA", "AUMEL", MatchStage::CountryFuzzyFallback);
    check(&engine, "MLBRN", "AUMEL", MatchStage::GlobalFuzzyFallback);

    let singapore = engine.match_destination("SINGAPROE");
    assert_eq!(singapore.single().unwrap().port, "Singapore");
}

#[test]
fn test_partial_names() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    check(&engine, "HOUSTON_USA", "USHOU", MatchStage::Containment);
    check(&engine, "PORTLAND-USA", "USPDX", MatchStage::Containment);
    check(&engine, "MONTEVIDEO UYMVD", "UYMVD", MatchStage::Containment);
    check(&engine, "ROTTERDAM NLRTM", "NLRTM", MatchStage::Containment);
    check(&engine, "CNSHA PORT OF SHANGHAI", "CNSHA", MatchStage::Containment);
}

#[test]
fn test_noise_and_brackets_are_stripped() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    check(&engine, "SG SIN (ANCHORAGE)", "SGSIN", MatchStage::Locode);
    check(&engine, "AE FJR", "AEFJR", MatchStage::Locode);
    check(&engine, "AEFJR FOR ORDERS", "AEFJR", MatchStage::Locode);
    check(&engine, "GIBRALTAR EAST ANCH", "GIGIB", MatchStage::ExactPortName);
    check(&engine, "FUJAIRAH BUNKERING", "AEFJR", MatchStage::ExactPortName);
    check(&engine, "GALLE- FOR ORDER", "LKGAL", MatchStage::ExactPortName);
}

#[test]
fn test_shared_port_code_returns_every_port() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    let resolution = engine.resolve("MAA");
    assert_eq!(resolution.stage, Some(MatchStage::PortCode));

    let MatchResult::MatchedMany(list) = &resolution.result else {
        panic!("expected several ports, got {:?}", resolution.result);
    };
    let expected: Vec<&str> = catalog
        .find_by_port_code("MAA")
        .iter()
        .map(|r| r.locode.as_str())
        .collect();
    let got: Vec<&str> = list.iter().map(|m| m.locode.as_str()).collect();
    assert_eq!(got, expected);
    assert!(list.iter().all(|m| m.reported_destination == "MAA"));
}

#[test]
fn test_relaxed_tier_finds_strict_tier_matches() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    for name in ["SINGAPROE", "SHNAGHAI", "ROTREDAM"] {
        let strict = engine.rank_candidates(name, None, 0.80);
        let relaxed = engine.rank_candidates(name, None, 0.70);
        assert!(!strict.is_empty());
        assert_eq!(strict[0].record.locode, relaxed[0].record.locode);
    }
}

#[test]
fn test_missing_coordinates_serialize_as_null() {
    let catalog = catalog();
    let engine = MatchingEngine::new(&catalog);

    let value = serde_json::to_value(engine.match_destination("MXDBT")).unwrap();
    assert_eq!(value["locode"], "MXDBT");
    assert!(value["lat"].is_null());
    assert!(value["lon"].is_null());
    assert_eq!(value["matched"], true);
}
