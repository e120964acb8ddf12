//! Integration tests for promotion comparison and selection over the bundled
//! comic catalog.
//!
//! The catalog prices (in minor units): Spider-Man #1 12000, Iron Man:
//! Extremis 15000, X-Men 10000 (3-for-2), Batman: Year One 14000, and two
//! 4000 mugs (both 3-for-2). The spend threshold promotion needs a subtotal
//! strictly over 30000.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso};
use testresult::TestResult;

use tally::{
    catalog::{Catalog, Product},
    promotions::{
        PromotionId, Promotions, pair_half_price::PairHalfPricePromotion,
        spend_threshold::SpendThresholdPromotion, three_for_two::ThreeForTwoPromotion,
    },
    session::Session,
};

fn comics_session() -> Result<Session, tally::catalog::CatalogError> {
    Ok(Session::new(Catalog::from_set("comics")?))
}

#[test]
fn three_for_two_wins_on_three_eligible_comics() -> TestResult {
    let mut session = comics_session()?;

    session.add("xmen-comic", Some("3"))?;

    let quote = session.quote()?;

    // Pair discount: one pair, half of 10000. Threshold: 30000 is not
    // strictly over 30000, so it stays at zero.
    let discounts: Vec<i64> = quote
        .results()
        .iter()
        .map(|result| result.discount.to_minor_units())
        .collect();
    assert_eq!(discounts, [5000, 10000, 0]);

    let Some(applied) = quote.applied() else {
        panic!("expected an applied promotion")
    };
    assert_eq!(applied.id, PromotionId::ThreeForTwo);
    assert_eq!(quote.subtotal(), Money::from_minor(30_000, iso::ARS));
    assert_eq!(quote.total(), Money::from_minor(20_000, iso::ARS));

    Ok(())
}

#[test]
fn pair_discount_beats_threshold_on_mixed_cart() -> TestResult {
    let mut session = comics_session()?;

    session.add("spiderman-comic", Some("2"))?;
    session.add("ironman-comic", Some("1"))?;

    let quote = session.quote()?;

    // Subtotal 39000: threshold discount is 3900, but the spiderman pair
    // saves 6000 and no product is 3-for-2 eligible.
    let discounts: Vec<i64> = quote
        .results()
        .iter()
        .map(|result| result.discount.to_minor_units())
        .collect();
    assert_eq!(discounts, [6000, 0, 3900]);

    let Some(applied) = quote.applied() else {
        panic!("expected an applied promotion")
    };
    assert_eq!(applied.id, PromotionId::PairHalfPrice);
    assert_eq!(quote.total(), Money::from_minor(33_000, iso::ARS));

    Ok(())
}

#[test]
fn empty_cart_applies_no_promotion() -> TestResult {
    let session = comics_session()?;

    let quote = session.quote()?;

    assert_eq!(quote.subtotal(), Money::from_minor(0, iso::ARS));
    assert!(quote.applied().is_none());
    assert!(
        quote
            .results()
            .iter()
            .all(|result| result.discount.to_minor_units() == 0),
        "no discount should apply to an empty cart"
    );
    assert_eq!(quote.total(), Money::from_minor(0, iso::ARS));

    Ok(())
}

#[test]
fn equal_discounts_apply_the_first_listed_promotion() -> TestResult {
    let mut session = comics_session()?;

    // Five eligible comics: two pairs save 10000, one group of three saves
    // 10000. The pair promotion is listed first, so it wins the tie.
    session.add("xmen-comic", Some("5"))?;

    let quote = session.quote()?;

    let Some(applied) = quote.applied() else {
        panic!("expected an applied promotion")
    };
    assert_eq!(applied.id, PromotionId::PairHalfPrice);
    assert_eq!(applied.discount, Money::from_minor(10_000, iso::ARS));

    Ok(())
}

#[test]
fn threshold_is_strictly_greater_than() -> TestResult {
    let catalog = Catalog::from_products(
        iso::ARS,
        [
            Product {
                id: "at-threshold".to_string(),
                name: "At Threshold".to_string(),
                price: Money::from_minor(30_000, iso::ARS),
                three_for_two: false,
            },
            Product {
                id: "over-threshold".to_string(),
                name: "Over Threshold".to_string(),
                price: Money::from_minor(30_001, iso::ARS),
                three_for_two: false,
            },
        ],
    )?;

    let mut session = Session::new(catalog);

    session.add("at-threshold", Some("1"))?;
    let quote = session.quote()?;
    assert!(quote.applied().is_none());
    assert_eq!(quote.total(), Money::from_minor(30_000, iso::ARS));

    session.remove(0);
    session.add("over-threshold", Some("1"))?;

    let quote = session.quote()?;
    let Some(applied) = quote.applied() else {
        panic!("expected an applied promotion")
    };
    assert_eq!(applied.id, PromotionId::SpendThreshold);
    assert_eq!(applied.discount, Money::from_minor(3000, iso::ARS));
    assert_eq!(quote.total(), Money::from_minor(27_001, iso::ARS));

    Ok(())
}

#[test]
fn final_total_is_never_negative() -> TestResult {
    let catalog = Catalog::from_products(
        iso::ARS,
        [Product {
            id: "trinket".to_string(),
            name: "Trinket".to_string(),
            price: Money::from_minor(100, iso::ARS),
            three_for_two: false,
        }],
    )?;

    // A deliberately absurd configuration: 200% off everything over zero.
    let promotions = Promotions::new(
        PairHalfPricePromotion::standard(),
        ThreeForTwoPromotion::new(),
        SpendThresholdPromotion::new(Money::from_minor(0, iso::ARS), Percentage::from(2.0)),
    );

    let mut session = Session::with_promotions(catalog, promotions);
    session.add("trinket", Some("1"))?;

    let quote = session.quote()?;

    assert_eq!(quote.savings(), Money::from_minor(200, iso::ARS));
    assert_eq!(quote.total(), Money::from_minor(0, iso::ARS));

    Ok(())
}
