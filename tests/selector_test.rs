use numoen_core::engine::{check_new_bound, market_tvl, next_bound, partition, Direction};
use numoen_core::{
    Address, Asset, EngineError, Fraction, Lendgine, LendgineSelector, LendgineState, Price,
};

fn f(n: i64, d: i64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

fn stable() -> Asset {
    Asset::new(Address::new("0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"), 6)
}

fn weth() -> Asset {
    Asset::new(Address::new("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"), 18)
}

fn long(addr: &str, bound: Fraction) -> Lendgine {
    Lendgine::new(Address::new(addr), stable(), weth(), bound)
}

fn short(addr: &str, bound: Fraction) -> Lendgine {
    Lendgine::new(Address::new(addr), weth(), stable(), bound)
}

/// Price of weth per unit of stable.
fn price(value: Fraction) -> Price {
    Price::new(stable(), weth(), value)
}

#[test]
fn test_next_bound_above_and_below() {
    let lendgines = vec![
        long("0x1", f(1, 2)),
        long("0x2", f(1, 1)),
        long("0x3", f(2, 1)),
    ];
    let p = price(f(6, 5));

    let above = next_bound(&p, &lendgines, Direction::Above).unwrap().unwrap();
    assert_eq!(above.bound.value, f(2, 1));

    let below = next_bound(&p, &lendgines, Direction::Below).unwrap().unwrap();
    assert_eq!(below.bound.value, f(1, 1));
}

#[test]
fn test_no_qualifying_lendgine() {
    let lendgines = vec![long("0x1", f(1, 2)), long("0x2", f(1, 1))];
    assert!(next_bound(&price(f(3, 1)), &lendgines, Direction::Above)
        .unwrap()
        .is_none());
    assert!(next_bound(&price(f(1, 4)), &lendgines, Direction::Below)
        .unwrap()
        .is_none());
}

#[test]
fn test_close_bounds_compare_exactly() {
    let lendgines = vec![
        long("0x1", f(1_000_000_001, 1_000_000_000)),
        long("0x2", f(1_000_000_000_001, 1_000_000_000_000)),
    ];
    let p = price(f(2_000_000_001, 2_000_000_000));
    let above = next_bound(&p, &lendgines, Direction::Above).unwrap().unwrap();
    assert_eq!(above.address, Address::new("0x1"));
    let below = next_bound(&p, &lendgines, Direction::Below).unwrap().unwrap();
    assert_eq!(below.address, Address::new("0x2"));
}

#[test]
fn test_duplicate_bounds_are_an_input_error() {
    let lendgines = vec![long("0x1", f(1, 1)), long("0x2", f(2, 2))];
    match next_bound(&price(f(1, 2)), &lendgines, Direction::Above) {
        Err(EngineError::DuplicateBound { lendgines, .. }) => {
            assert_eq!(lendgines, vec![Address::new("0x1"), Address::new("0x2")]);
        }
        other => panic!("Expected DuplicateBound, got {:?}", other),
    }
}

#[test]
fn test_mixed_orientation_is_rejected() {
    let lendgines = vec![long("0x1", f(1, 1)), short("0x2", f(2, 1))];
    let err = next_bound(&price(f(1, 2)), &lendgines, Direction::Above).unwrap_err();
    assert!(matches!(err, EngineError::AssetMismatch(_)));
}

#[test]
fn test_partition_by_base() {
    let lendgines = vec![long("0x1", f(1, 1)), short("0x2", f(2, 1)), long("0x3", f(3, 1))];
    let (longs, shorts) = partition(&lendgines, &stable());
    assert_eq!(longs.len(), 2);
    assert_eq!(shorts.len(), 1);
    assert_eq!(shorts[0].address, Address::new("0x2"));
}

#[test]
fn test_selector_inverts_price_for_short_side() {
    let lendgines = vec![
        long("0x1", f(1, 2)),
        long("0x2", f(2, 1)),
        short("0x3", f(1, 1)),
        short("0x4", f(3, 1)),
        // Same bound as a long lendgine but a different orientation.
        short("0x5", f(2, 1)),
    ];
    let selector = LendgineSelector::new(stable());

    // 4/5 weth per stable, so 5/4 stable per weth on the short side.
    let selection = selector.select(&price(f(4, 5)), &lendgines).unwrap();

    assert_eq!(selection.long_above.unwrap().address, Address::new("0x2"));
    assert_eq!(selection.long_below.unwrap().address, Address::new("0x1"));
    assert_eq!(selection.short_above.unwrap().address, Address::new("0x5"));
    assert_eq!(selection.short_below.unwrap().address, Address::new("0x3"));
}

#[test]
fn test_selector_rejects_foreign_price() {
    let selector = LendgineSelector::new(stable());
    let err = selector
        .select(&price(f(1, 1)).invert().unwrap(), &[])
        .unwrap_err();
    assert!(matches!(err, EngineError::AssetMismatch(_)));
}

#[test]
fn test_new_bound_validation() {
    let existing = vec![long("0x1", f(2, 1))];
    let new_bound = |p: Price, bound: Fraction| {
        check_new_bound(&stable(), &weth(), &p, &bound, &existing)
    };
    assert!(new_bound(price(f(1, 1)), f(4, 1)).is_ok());
    assert!(matches!(
        new_bound(price(f(5, 1)), f(4, 1)),
        Err(EngineError::BoundBelowPrice { .. })
    ));
    assert!(matches!(
        new_bound(price(f(1, 1)), f(2, 1)),
        Err(EngineError::DuplicateBound { .. })
    ));
    assert!(matches!(
        new_bound(price(f(1, 1)), Fraction::zero()),
        Err(EngineError::InvalidBound(_))
    ));
    // 1/5 weth per stable inverted reads as 5 stable per weth; comparing it
    // to a bound of 4 must not silently pass or fail.
    assert!(matches!(
        new_bound(price(f(1, 5)).invert().unwrap(), f(4, 1)),
        Err(EngineError::AssetMismatch(_))
    ));
}

#[test]
fn test_selection_default_pick_follows_front_end_order() {
    let lendgines = vec![short("0x3", f(1, 1)), short("0x4", f(3, 1))];
    let selector = LendgineSelector::new(stable());
    let selection = selector.select(&price(f(4, 5)), &lendgines).unwrap();

    assert!(selection.long().is_none());
    assert_eq!(selection.default_pick().unwrap().address, Address::new("0x4"));

    let lendgines = vec![long("0x1", f(1, 2)), short("0x4", f(3, 1))];
    let selection = selector.select(&price(f(4, 5)), &lendgines).unwrap();
    assert_eq!(selection.default_pick().unwrap().address, Address::new("0x1"));
}

#[test]
fn test_market_tvl_in_base_asset() {
    // Long: 10 supplied liquidity at P = 2 under bound 4 (r0 = 4, r1 = 4 per
    // liquidity), worth 4 + 2 * 4 = 12 stable per liquidity.
    let long_state = LendgineState {
        total_liquidity: f(8, 1),
        total_liquidity_borrowed: f(2, 1),
        reserve0: f(32, 1),
        reserve1: f(32, 1),
        ..Default::default()
    };
    // Short: 2 liquidity at P = 1/2 under bound 3 (r0 = 1/4, r1 = 5), worth
    // 11/4 weth per liquidity, so 11/2 weth or 11 stable in total.
    let short_state = LendgineState {
        total_liquidity: f(2, 1),
        reserve0: f(1, 2),
        reserve1: f(10, 1),
        ..Default::default()
    };
    let entries = vec![
        (long("0x1", f(4, 1)), long_state),
        (short("0x2", f(3, 1)), short_state),
        (long("0x3", f(8, 1)), LendgineState::default()),
    ];

    assert_eq!(market_tvl(&entries, &stable()).unwrap(), f(131, 1));
}
