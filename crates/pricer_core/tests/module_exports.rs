//! Integration tests for module exports.
//!
//! Verify that the public types are reachable via absolute paths and that the
//! market snapshot survives the JSON wire form used by portfolio requests.

use approx::assert_relative_eq;

#[test]
fn test_types_module_exports() {
    use pricer_core::types::error::PricingError;
    use pricer_core::types::greeks::Greeks;
    use pricer_core::types::market::{BarrierDirection, MarketState, OptionType};

    let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
    assert_eq!(market.vol(), 0.2);
    assert_eq!(Greeks::zero(), Greeks::new(0.0, 0.0, 0.0, 0.0, 0.0));
    assert!(OptionType::Put.intrinsic(90.0, 100.0) > 0.0);
    assert!(BarrierDirection::Down.is_breached(79.0, 80.0));
    assert!(PricingError::configuration("steps").is_configuration());
}

#[test]
fn test_math_module_exports() {
    use pricer_core::math::distributions::{norm_cdf, norm_pdf};

    assert_relative_eq!(norm_cdf(1.96_f64), 0.975, epsilon = 1e-3);
    assert_relative_eq!(norm_pdf(0.0_f64), 0.398_942_280_4, epsilon = 1e-9);
}

#[test]
fn test_market_json_wire_form() {
    use pricer_core::types::MarketState;

    let market: MarketState = serde_json::from_str(r#"{"spot": 100, "rate": 0.03, "vol": 0.25}"#).unwrap();
    assert_eq!(market.dividend_yield(), 0.0);
    assert_eq!(market.rate(), 0.03);

    let round: MarketState = serde_json::from_str(&serde_json::to_string(&market).unwrap()).unwrap();
    assert_eq!(round, market);

    let rejected = serde_json::from_str::<MarketState>(r#"{"spot": -1, "rate": 0.03, "vol": 0.25}"#);
    assert!(rejected.is_err());
}

#[test]
fn test_greeks_aggregate_with_quantity() {
    use pricer_core::types::Greeks;

    let mut total = Greeks::zero();
    total += Greeks::new(0.6, 0.02, 38.0, -6.0, 50.0).scale(2.0);
    total += Greeks::new(-0.4, 0.02, 38.0, -1.5, -45.0).scale(-1.0);
    assert_relative_eq!(total.delta, 1.6);
    assert_relative_eq!(total.gamma, 0.02);
    assert_relative_eq!(total.vega, 38.0);
    assert!(total.is_finite());
}
