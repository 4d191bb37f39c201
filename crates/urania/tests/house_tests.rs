use approx::assert_abs_diff_eq;
use proptest::prelude::*;
use urania::angle::{angular_distance, forward_arc};
use urania::houses::{ascendant, house_cusps, houses, midheaven, HouseSystem};
use urania::time::DEFAULT_OBLIQUITY;
use urania::ChartError;

#[test]
fn test_ascendant_on_equator() {
    // With phi = 0 the ascendant is the ecliptic point 90 degrees of RA past
    // the meridian; the cardinal points line up exactly.
    assert_abs_diff_eq!(ascendant(0.0, 0.0, DEFAULT_OBLIQUITY).unwrap(), 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ascendant(90.0, 0.0, DEFAULT_OBLIQUITY).unwrap(), 180.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ascendant(180.0, 0.0, DEFAULT_OBLIQUITY).unwrap(), 270.0, epsilon = 1e-9);
}

#[test]
fn test_ascendant_rejects_poles_and_beyond() {
    for lat in [91.0, -91.0, 90.0, -90.0] {
        assert!(matches!(
            ascendant(0.0, lat, DEFAULT_OBLIQUITY),
            Err(ChartError::InvalidLatitude { .. })
        ));
    }
}

#[test]
fn test_midheaven_is_normalized_lst() {
    assert_eq!(midheaven(370.0), 10.0);
    assert_eq!(midheaven(-30.0), 330.0);
}

#[test]
fn test_placidus_rejected_at_65() {
    match houses(HouseSystem::Placidus, 120.0, 65.0, DEFAULT_OBLIQUITY) {
        Err(ChartError::UnsupportedLatitude { system, latitude, limit }) => {
            assert_eq!(system, "placidus");
            assert_eq!(latitude, 65.0);
            assert_eq!(limit, 60.0);
        }
        other => panic!("expected UnsupportedLatitude, got {other:?}"),
    }
    assert!(houses(HouseSystem::Placidus, 120.0, -65.0, DEFAULT_OBLIQUITY).is_err());
    assert!(houses(HouseSystem::Placidus, 120.0, 60.0, DEFAULT_OBLIQUITY).is_ok());
}

#[test]
fn test_other_systems_accept_65() {
    for system in [HouseSystem::Equal, HouseSystem::Porphyry, HouseSystem::Regiomontanus] {
        assert!(houses(system, 120.0, 65.0, DEFAULT_OBLIQUITY).is_ok(), "{system}");
    }
    assert!(houses(HouseSystem::Koch, 120.0, 65.0, DEFAULT_OBLIQUITY).is_ok());
    assert!(houses(HouseSystem::Koch, 120.0, 67.0, DEFAULT_OBLIQUITY).is_err());
}

#[test]
fn test_invalid_latitude_wins_over_system_limit() {
    assert!(matches!(
        houses(HouseSystem::Placidus, 0.0, 91.0, DEFAULT_OBLIQUITY),
        Err(ChartError::InvalidLatitude { .. })
    ));
}

#[test]
fn test_koch_reference_cusps() {
    // RAMC 0, latitude 40N: the MC sits on the equator so Koch reduces to
    // oblique ascensions at the birthplace pole
    let c = house_cusps(HouseSystem::Koch, 0.0, 40.0, DEFAULT_OBLIQUITY).unwrap();
    assert_abs_diff_eq!(c[10], 47.33, epsilon = 0.01);
    assert_abs_diff_eq!(c[11], 81.79, epsilon = 0.01);
    assert_abs_diff_eq!(c[1], 132.46, epsilon = 0.01);
    assert_abs_diff_eq!(c[2], 156.10, epsilon = 0.01);
}

#[test]
fn test_house_of_body() {
    let cusps = houses(HouseSystem::Equal, 0.0, 0.0, DEFAULT_OBLIQUITY).unwrap();
    // Ascendant at 90: house 1 is [90, 120)
    assert_eq!(cusps.house_of(95.0), 1);
    assert_eq!(cusps.house_of(89.0), 12);
    assert_eq!(cusps.house_of(275.0), 7);
    assert_eq!(cusps.cusp(1), Some(cusps.ascendant));
    assert_eq!(cusps.cusp(13), None);
}

fn system_strategy() -> impl Strategy<Value = HouseSystem> {
    prop::sample::select(HouseSystem::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_equal_cusps_are_30_apart(lst in 0.0f64..360.0, lat in -89.0f64..89.0) {
        let c = house_cusps(HouseSystem::Equal, lst, lat, DEFAULT_OBLIQUITY).unwrap();
        for i in 0..12 {
            let step = forward_arc(c[i], c[(i + 1) % 12]);
            prop_assert!((step - 30.0).abs() < 1e-9, "step {} at {}", step, i);
        }
    }

    #[test]
    fn prop_axes_and_opposites(
        system in system_strategy(),
        lst in 0.0f64..360.0,
        lat in -60.0f64..=60.0,
    ) {
        let h = houses(system, lst, lat, DEFAULT_OBLIQUITY).unwrap();
        let c = h.longitudes();
        prop_assert_eq!(c[0], ascendant(lst, lat, DEFAULT_OBLIQUITY).unwrap());
        if system.is_quadrant() {
            prop_assert_eq!(c[9], midheaven(lst));
        }
        for i in 0..12 {
            prop_assert!((0.0..360.0).contains(&c[i]));
            let d = angular_distance(c[i], c[(i + 6) % 12]);
            prop_assert!((d - 180.0).abs() < 1e-9, "cusps {} and {}: {}", i + 1, (i + 6) % 12 + 1, d);
        }
    }

    #[test]
    fn prop_cusps_run_in_zodiacal_order(
        system in system_strategy(),
        lst in 0.0f64..360.0,
        lat in -60.0f64..=60.0,
    ) {
        let c = house_cusps(system, lst, lat, DEFAULT_OBLIQUITY).unwrap();
        let total: f64 = (0..12).map(|i| forward_arc(c[i], c[(i + 1) % 12])).sum();
        prop_assert!((total - 360.0).abs() < 1e-6, "{} cusps wind {} degrees", system, total);
    }
}
