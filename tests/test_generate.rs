use alloy::primitives::U256;
use rand::SeedableRng;
use rand::rngs::StdRng;

use disperse_engine::errors::DisperseError;
use disperse_engine::generate::{
    generate_addresses_with_random_amounts_with, generate_addresses_with_uniform_amount,
    generate_random_amount, generate_random_amount_with,
};
use disperse_engine::parse::parse_recipients;

fn addresses() -> Vec<String> {
    vec![
        "0x314ab97b76e39d63c78d5c86c2daf8eaa306b182".to_string(),
        "0x271bffabd0f79b8bd4d7a1c245b7ec5b576ea98a".to_string(),
        "0x141ca95b6177615fb1417cf70e930e102bf8f584".to_string(),
    ]
}

fn fraction_len(amount: &str) -> usize {
    amount.split_once('.').map_or(0, |(_, f)| f.len())
}

// ── Random amounts ───────────────────────────────────────────────────

#[test]
fn test_random_amount_in_range_with_exact_places() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..200 {
        let amount = generate_random_amount_with(&mut rng, 1.0, 10.0, 3).unwrap();
        assert_eq!(fraction_len(&amount), 3, "{amount}");
        let value: f64 = amount.parse().unwrap();
        // Rounding to 3 places can reach the upper bound itself.
        assert!((1.0..=10.0).contains(&value), "{amount}");
    }
}

#[test]
fn test_zero_places_has_no_point() {
    let amount = generate_random_amount(100.0, 200.0, 0).unwrap();
    assert!(!amount.contains('.'));
    let value: u64 = amount.parse().unwrap();
    assert!((100..=200).contains(&value));
}

#[test]
fn test_seeded_generation_is_reproducible() {
    let list = addresses();
    let a = generate_addresses_with_random_amounts_with(&mut StdRng::seed_from_u64(7), &list, 0.5, 5.0, 4).unwrap();
    let b = generate_addresses_with_random_amounts_with(&mut StdRng::seed_from_u64(7), &list, 0.5, 5.0, 4).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_random_list_parses_back() {
    let list = addresses();
    let text = generate_addresses_with_random_amounts_with(&mut StdRng::seed_from_u64(1), &list, 0.01, 1.0, 6).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(!text.ends_with('\n'));

    let recipients = parse_recipients(&text, 18);
    assert_eq!(recipients.len(), 3);
    for (r, expected) in recipients.iter().zip(&list) {
        assert_eq!(&r.address_hex(), expected);
        assert!(r.value > U256::ZERO);
    }
}

// ── Uniform amounts ──────────────────────────────────────────────────

#[test]
fn test_uniform_amount_round_trip() {
    let list = addresses();
    let text = generate_addresses_with_uniform_amount(&list[..2], 0.25, 2).unwrap();
    assert_eq!(
        text,
        "0x314ab97b76e39d63c78d5c86c2daf8eaa306b182 0.25\n0x271bffabd0f79b8bd4d7a1c245b7ec5b576ea98a 0.25"
    );

    let recipients = parse_recipients(&text, 18);
    assert_eq!(recipients.len(), 2);
    let expected = U256::from(250_000_000_000_000_000u64);
    assert!(recipients.iter().all(|r| r.value == expected));
}

#[test]
fn test_uniform_halves_round_up() {
    let list = addresses();
    let text = generate_addresses_with_uniform_amount(&list[..1], 2.5, 0).unwrap();
    assert_eq!(text, "0x314ab97b76e39d63c78d5c86c2daf8eaa306b182 3");
    let text = generate_addresses_with_uniform_amount(&list[..1], 0.125, 2).unwrap();
    assert_eq!(text, "0x314ab97b76e39d63c78d5c86c2daf8eaa306b182 0.13");
}

#[test]
fn test_uniform_empty_list() {
    assert_eq!(generate_addresses_with_uniform_amount(&[], 1.0, 2).unwrap(), "");
}

// ── Policy violations ────────────────────────────────────────────────

#[test]
fn test_inverted_range_rejected() {
    let err = generate_random_amount(5.0, 1.0, 2).unwrap_err();
    assert!(matches!(err, DisperseError::InvalidRange { .. }));
    assert!(err.is_policy_violation());
}

#[test]
fn test_empty_range_rejected() {
    let err = generate_random_amount(3.0, 3.0, 2).unwrap_err();
    assert!(matches!(err, DisperseError::InvalidRange { .. }));
}

#[test]
fn test_precision_bounds() {
    let err = generate_random_amount(1.0, 5.0, 19).unwrap_err();
    assert!(matches!(err, DisperseError::InvalidPrecision { decimal_places: 19 }));
    let err = generate_random_amount(1.0, 5.0, -1).unwrap_err();
    assert!(matches!(err, DisperseError::InvalidPrecision { decimal_places: -1 }));
    assert!(generate_random_amount(1.0, 5.0, 18).is_ok());
}

#[test]
fn test_list_variants_propagate_errors() {
    let list = addresses();
    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        generate_addresses_with_random_amounts_with(&mut rng, &list, 2.0, 1.0, 2),
        Err(DisperseError::InvalidRange { .. })
    ));
    assert!(matches!(
        generate_addresses_with_uniform_amount(&list, 1.0, 30),
        Err(DisperseError::InvalidPrecision { .. })
    ));
    assert!(matches!(
        generate_addresses_with_uniform_amount(&list, -1.0, 2),
        Err(DisperseError::InvalidAmount { .. })
    ));
}
