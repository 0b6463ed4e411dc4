//! Unit tests for the sorted level sequence

use common::{Px, Qty};
use levelbook::{BookError, Ladder, Side};
use rstest::rstest;

fn ladder_with(side: Side, prices: &[i64]) -> Ladder {
    let mut ladder = Ladder::new(side);
    for &price in prices {
        ladder
            .add(Px::from_i64(price), Qty::from_i64(1_0000))
            .expect("seed add");
    }
    ladder
}

#[test]
fn new_ladder_is_empty() {
    let ladder = Ladder::new(Side::Bid);
    assert!(ladder.is_empty());
    assert_eq!(ladder.depth(), 0);
    assert!(ladder.best().is_none());
    assert!(ladder.get(0).is_none());
}

#[test]
fn bid_inserts_sort_descending() {
    let ladder = ladder_with(Side::Bid, &[86_3000, 86_5000, 86_1000, 86_4000, 86_2000]);
    let prices: Vec<i64> = (0..ladder.depth())
        .map(|i| ladder.get(i).unwrap().price.as_i64())
        .collect();
    assert_eq!(prices, vec![86_5000, 86_4000, 86_3000, 86_2000, 86_1000]);
    assert_eq!(ladder.best().unwrap().price, Px::from_i64(86_5000));
}

#[test]
fn ask_inserts_sort_ascending() {
    let ladder = ladder_with(Side::Ask, &[86_8000, 86_6000, 87_0000, 86_7000, 86_9000]);
    let prices: Vec<i64> = (0..ladder.depth())
        .map(|i| ladder.get(i).unwrap().price.as_i64())
        .collect();
    assert_eq!(prices, vec![86_6000, 86_7000, 86_8000, 86_9000, 87_0000]);
    assert_eq!(ladder.best().unwrap().price, Px::from_i64(86_6000));
}

#[rstest]
#[case(Side::Bid)]
#[case(Side::Ask)]
fn add_at_resting_price_grows_the_level(#[case] side: Side) {
    let mut ladder = Ladder::new(side);
    ladder.add(Px::from_i64(86_7000), Qty::from_i64(1_0000)).unwrap();
    ladder.add(Px::from_i64(86_7000), Qty::from_i64(2_0000)).unwrap();

    assert_eq!(ladder.depth(), 1);
    let level = ladder.get(0).unwrap();
    assert_eq!(level.quantity, Qty::from_i64(3_0000));
    assert_eq!(level.count, 2);
}

#[rstest]
#[case(0, 1_0000)]
#[case(-86_5000, 1_0000)]
#[case(86_5000, 0)]
#[case(86_5000, -1_0000)]
fn add_rejects_non_positive_terms(#[case] price: i64, #[case] quantity: i64) {
    let mut ladder = ladder_with(Side::Bid, &[86_5000]);
    let err = ladder
        .add(Px::from_i64(price), Qty::from_i64(quantity))
        .unwrap_err();
    assert_eq!(
        err,
        BookError::InvalidOrderTerms {
            price: Px::from_i64(price),
            quantity: Qty::from_i64(quantity),
        }
    );
    // No mutation on failure.
    assert_eq!(ladder.depth(), 1);
    assert_eq!(ladder.get(0).unwrap().quantity, Qty::from_i64(1_0000));
    assert_eq!(ladder.get(0).unwrap().count, 1);
}

#[test]
fn removing_the_last_order_deletes_the_level() {
    let mut ladder = ladder_with(Side::Ask, &[86_6000, 86_7000]);
    ladder.remove(Px::from_i64(86_7000), Qty::from_i64(1_0000)).unwrap();
    assert_eq!(ladder.depth(), 1);
    assert_eq!(ladder.quantity_at(Px::from_i64(86_7000)), Qty::ZERO);
}

#[test]
fn removing_the_last_order_ignores_the_passed_quantity() {
    // The last order's quantity is by definition the level's remainder, so
    // the whole level goes regardless of what the caller passes.
    let mut ladder = ladder_with(Side::Bid, &[86_5000]);
    ladder.remove(Px::from_i64(86_5000), Qty::from_i64(999_0000)).unwrap();
    assert!(ladder.is_empty());
}

#[test]
fn partial_remove_decrements_quantity_and_count() {
    let mut ladder = Ladder::new(Side::Bid);
    ladder.add(Px::from_i64(86_5000), Qty::from_i64(1_0000)).unwrap();
    ladder.add(Px::from_i64(86_5000), Qty::from_i64(2_0000)).unwrap();

    ladder.remove(Px::from_i64(86_5000), Qty::from_i64(2_0000)).unwrap();
    let level = ladder.get(0).unwrap();
    assert_eq!(level.quantity, Qty::from_i64(1_0000));
    assert_eq!(level.count, 1);
}

#[test]
fn partial_remove_never_deletes_on_quantity_alone() {
    // Deletion keys off the order count, not the running quantity: a level
    // whose quantity hits zero survives while more than one order rests.
    let mut ladder = Ladder::new(Side::Ask);
    ladder.add(Px::from_i64(86_6000), Qty::from_i64(1_0000)).unwrap();
    ladder.add(Px::from_i64(86_6000), Qty::from_i64(1_0000)).unwrap();
    ladder.add(Px::from_i64(86_6000), Qty::from_i64(1_0000)).unwrap();

    ladder.remove(Px::from_i64(86_6000), Qty::from_i64(3_0000)).unwrap();
    let level = ladder.get(0).unwrap();
    assert_eq!(level.quantity, Qty::ZERO);
    assert_eq!(level.count, 2);
    assert_eq!(ladder.depth(), 1);
}

#[rstest]
#[case(Side::Bid)]
#[case(Side::Ask)]
fn remove_without_a_level_fails(#[case] side: Side) {
    let mut ladder = ladder_with(side, &[86_5000]);
    let err = ladder
        .remove(Px::from_i64(86_6000), Qty::from_i64(1_0000))
        .unwrap_err();
    assert_eq!(
        err,
        BookError::LevelNotFound {
            price: Px::from_i64(86_6000)
        }
    );
    assert_eq!(ladder.depth(), 1);
}

#[test]
fn replace_overwrites_quantity_and_keeps_count() {
    let mut ladder = Ladder::new(Side::Bid);
    ladder.add(Px::from_i64(86_5000), Qty::from_i64(1_0000)).unwrap();
    ladder.add(Px::from_i64(86_5000), Qty::from_i64(2_0000)).unwrap();

    ladder.replace(Px::from_i64(86_5000), Qty::from_i64(7_0000)).unwrap();
    let level = ladder.get(0).unwrap();
    assert_eq!(level.quantity, Qty::from_i64(7_0000));
    assert_eq!(level.count, 2);
}

#[test]
fn replace_without_a_level_fails() {
    let mut ladder = Ladder::new(Side::Ask);
    let err = ladder
        .replace(Px::from_i64(86_6000), Qty::from_i64(1_0000))
        .unwrap_err();
    assert_eq!(
        err,
        BookError::LevelNotFound {
            price: Px::from_i64(86_6000)
        }
    );
}

#[test]
fn quantity_at_reports_zero_for_missing_levels() {
    let ladder = ladder_with(Side::Bid, &[86_5000]);
    assert_eq!(ladder.quantity_at(Px::from_i64(86_5000)), Qty::from_i64(1_0000));
    assert_eq!(ladder.quantity_at(Px::from_i64(86_4000)), Qty::ZERO);
}

#[test]
fn side_opposite_flips() {
    assert_eq!(Side::Bid.opposite(), Side::Ask);
    assert_eq!(Side::Ask.opposite(), Side::Bid);
}
