//! Portfolio valuation: per-leg results and quantity-weighted totals.

use pricer_core::types::{Greeks, MarketState, PricingError};
use pricer_models::instruments::LegRequest;
use pricer_pricing::pricer::{price_product, price_product_with_greeks, PricedResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::PortfolioError;

/// Market snapshot plus legs, the request shape shared by every portfolio
/// operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioRequest {
    /// Market inputs
    pub market: MarketState,
    /// Legs in caller order
    pub legs: Vec<LegRequest>,
}

/// Outcome of a single leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegStatus {
    /// Priced successfully
    Ok,
    /// Failed to parse or price
    Error,
}

/// Result row for one leg, echoing the request fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegResult {
    /// Leg identifier
    pub leg_id: String,
    /// Instrument type as requested
    pub instrument_type: String,
    /// Method as requested
    pub method: String,
    /// Signed quantity
    pub quantity: f64,
    /// Ok or error
    pub status: LegStatus,
    /// Price of one unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    /// `price_per_unit × quantity`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_total: Option<f64>,
    /// Greeks of one unit (absent for price-only valuations)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeks: Option<Greeks>,
    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LegResult {
    fn ok(req: &LegRequest, price_per_unit: f64, greeks: Option<Greeks>) -> Self {
        Self {
            leg_id: req.leg_id.clone(),
            instrument_type: req.instrument_type.clone(),
            method: req.method.clone(),
            quantity: req.quantity,
            status: LegStatus::Ok,
            price_per_unit: Some(price_per_unit),
            price_total: Some(price_per_unit * req.quantity),
            greeks,
            error: None,
        }
    }

    fn failed(req: &LegRequest, err: &PricingError) -> Self {
        Self {
            leg_id: req.leg_id.clone(),
            instrument_type: req.instrument_type.clone(),
            method: req.method.clone(),
            quantity: req.quantity,
            status: LegStatus::Error,
            price_per_unit: None,
            price_total: None,
            greeks: None,
            error: Some(err.to_string()),
        }
    }

    /// True if the leg priced.
    #[inline]
    pub fn is_ok(&self) -> bool {
        self.status == LegStatus::Ok
    }
}

/// Leg counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValuationSummary {
    /// Number of legs submitted
    pub total: usize,
    /// Legs that priced
    pub ok: usize,
    /// Legs that failed
    pub error: usize,
}

/// Portfolio totals and per-leg detail.
///
/// Failed legs are reported in `legs` and excluded from the totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioValuation {
    /// `Σ price_per_unit × quantity` over legs that priced
    pub total_price: f64,
    /// Quantity-weighted Greeks over legs that priced
    pub total_greeks: Greeks,
    /// One row per submitted leg, in order
    pub legs: Vec<LegResult>,
    /// Status counts
    pub summary: ValuationSummary,
}

impl PortfolioValuation {
    /// Legs that failed.
    pub fn failed_legs(&self) -> impl Iterator<Item = &LegResult> {
        self.legs.iter().filter(|leg| !leg.is_ok())
    }
}

/// Prices every leg with Greeks and aggregates.
///
/// In strict mode the first failing leg aborts the valuation; otherwise the
/// failure is recorded against the leg, logged, and the remaining legs are
/// still priced.
///
/// # Errors
/// `PortfolioError::LegFailed` (strict mode only).
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketState;
/// use pricer_models::instruments::{LegParams, LegRequest};
/// use pricer_risk::portfolio::price_portfolio;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
/// let legs = vec![
///     LegRequest::new("long", "vanilla", "black_scholes", 2.0, call.clone()),
///     LegRequest::new("bad", "vanilla", "black_scholes", 1.0, call.with("strike", -5.0)),
/// ];
///
/// let valuation = price_portfolio(&market, &legs, false).unwrap();
/// assert!((valuation.total_price - 2.0 * 10.4506).abs() < 1e-3);
/// assert_eq!(valuation.summary.error, 1);
///
/// let err = price_portfolio(&market, &legs, true).unwrap_err();
/// assert_eq!(err.leg_id(), Some("bad"));
/// ```
pub fn price_portfolio(
    market: &MarketState,
    legs: &[LegRequest],
    strict: bool,
) -> Result<PortfolioValuation, PortfolioError> {
    aggregate(legs, strict, |req| {
        let leg = req.parse()?;
        price_product_with_greeks(leg.product(), market)
    })
}

/// Prices every leg without Greeks.
///
/// Same contract as [`price_portfolio`]; `total_greeks` is zero and no leg
/// carries Greeks.
pub fn price_portfolio_price_only(
    market: &MarketState,
    legs: &[LegRequest],
    strict: bool,
) -> Result<PortfolioValuation, PortfolioError> {
    aggregate(legs, strict, |req| {
        let leg = req.parse()?;
        let price_per_unit = price_product(leg.product(), market, None)?;
        Ok(PricedResult {
            price_per_unit,
            greeks: Greeks::zero(),
        })
    })
    .map(|mut valuation| {
        for leg in &mut valuation.legs {
            leg.greeks = None;
        }
        valuation
    })
}

fn aggregate<F>(legs: &[LegRequest], strict: bool, mut price: F) -> Result<PortfolioValuation, PortfolioError>
where
    F: FnMut(&LegRequest) -> Result<PricedResult, PricingError>,
{
    let mut total_price = 0.0;
    let mut total_greeks = Greeks::zero();
    let mut results = Vec::with_capacity(legs.len());
    let mut summary = ValuationSummary {
        total: legs.len(),
        ..ValuationSummary::default()
    };

    for req in legs {
        match price(req) {
            Ok(priced) => {
                total_price += priced.price_per_unit * req.quantity;
                total_greeks += priced.greeks.scale(req.quantity);
                summary.ok += 1;
                results.push(LegResult::ok(req, priced.price_per_unit, Some(priced.greeks)));
            }
            Err(err) => {
                if strict {
                    return Err(PortfolioError::LegFailed {
                        leg_id: req.leg_id.clone(),
                        source: err,
                    });
                }
                warn!(
                    leg_id = %req.leg_id,
                    instrument_type = %req.instrument_type,
                    method = %req.method,
                    error = %err,
                    "leg valuation failed"
                );
                summary.error += 1;
                results.push(LegResult::failed(req, &err));
            }
        }
    }

    Ok(PortfolioValuation {
        total_price,
        total_greeks,
        legs: results,
        summary,
    })
}
