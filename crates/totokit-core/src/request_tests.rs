//! Tests for TOML request loading.

use crate::request::{CustomGroupSpec, DrawRequest};
use crate::universe::Universe;

#[test]
fn minimal_request_defaults_everything_else() {
    let req = DrawRequest::from_toml_str(
        r#"
        universe = "thirty"
        system = 6
        "#,
    )
    .unwrap();

    assert_eq!(req.universe, Universe::Thirty);
    assert_eq!(req.system, 6);
    assert_eq!(req.count, 1);
    assert_eq!(req.must_includes, "");
    assert!(req.custom_groups.is_empty());
    assert!(req.decade_counts.is_empty());
    assert_eq!(req.random_seed, None);
}

#[test]
fn full_request_round_trips() {
    let req = DrawRequest::from_toml_str(
        r#"
        universe = "forty_nine"
        system = 6
        count = 10
        must_includes = "21,23"
        must_excludes = "30"
        odd = "2-4"
        even = ""
        low = "3"
        high = "3"
        decade_counts = ["1-2", "", "0-3"]
        max_run_length = "2"
        max_run_count = "1"
        random_seed = 42

        [[custom_groups]]
        numbers = "46,48"
        count = "1"

        [[custom_groups]]
        numbers = "11,13"
        "#,
    )
    .unwrap();

    assert_eq!(req.universe, Universe::FortyNine);
    assert_eq!(req.count, 10);
    assert_eq!(
        req.custom_groups,
        vec![
            CustomGroupSpec {
                numbers: "46,48".into(),
                count: "1".into(),
            },
            CustomGroupSpec {
                numbers: "11,13".into(),
                count: "".into(),
            },
        ]
    );
    assert_eq!(req.decade_counts, vec!["1-2", "", "0-3"]);
    assert_eq!(req.random_seed, Some(42));

    let toml = toml::to_string(&req).unwrap();
    let back = DrawRequest::from_toml_str(&toml).unwrap();
    assert_eq!(back, req);
}

#[test]
fn unknown_universe_is_rejected() {
    let err = DrawRequest::from_toml_str(
        r#"
        universe = "ninety"
        system = 6
        "#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("TOML parse error"));
}
