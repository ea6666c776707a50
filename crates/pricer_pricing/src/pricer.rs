//! Instrument pricer façade.
//!
//! Dispatches a [`Product`] to its pricing engine and attaches Greeks:
//! analytic for Black–Scholes vanillas, finite differences for everything
//! else. Monte Carlo products are bumped with forward differences on a
//! fresh [`RandomDrawCache`] so the base price and every bumped re-price
//! see the same random numbers.

use pricer_core::types::{Greeks, MarketState, OptionType, PricingError};
use pricer_models::analytical::{
    analytic_price_and_greeks, asian_geometric_continuous_price, black_scholes_price_and_greeks,
    digital_cash_or_nothing_price, forward_value, price_closed_form, ClosedFormKind, ClosedFormParams,
};
use pricer_models::instruments::{AsianMethod, LegParams, Product, VanillaMethod};
use serde::{Deserialize, Serialize};

use crate::greeks::{finite_difference_evaluation, BumpSizes, FdSchemes};
use crate::lattice::price_binomial;
use crate::mc::{
    price_mc_asian_arithmetic, price_mc_asian_arithmetic_cached, price_mc_barrier, price_mc_barrier_cached,
    KnockOutBarrier,
};
use crate::rng::RandomDrawCache;

/// Price and Greeks of one unit of a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricedResult {
    /// Present value per unit
    pub price_per_unit: f64,
    /// Sensitivities per unit
    pub greeks: Greeks,
}

/// Prices one unit of `product`.
///
/// Monte Carlo products draw their random numbers through `cache` when one
/// is given (filling it on first use), otherwise from their own seed.
/// Either way the result for a given seed is the same.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketState;
/// use pricer_models::instruments::{LegParams, Product};
/// use pricer_pricing::pricer::price_product;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let params = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
/// let product = Product::parse("vanilla", "black_scholes", &params).unwrap();
/// let price = price_product(&product, &market, None).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// ```
pub fn price_product(
    product: &Product,
    market: &MarketState,
    cache: Option<&mut RandomDrawCache>,
) -> Result<f64, PricingError> {
    let price = match product {
        Product::Vanilla { option, method } => match method {
            VanillaMethod::BlackScholes => {
                black_scholes_price_and_greeks(option.option_type, market, option.strike, option.time_to_expiry)?.0
            }
            VanillaMethod::BinomialCrr { steps } => price_binomial(
                option.option_type,
                market,
                option.strike,
                option.time_to_expiry,
                *steps,
                false,
            )?,
        },
        Product::American { option, steps } => price_binomial(
            option.option_type,
            market,
            option.strike,
            option.time_to_expiry,
            *steps,
            true,
        )?,
        Product::Digital { option, payout } => digital_cash_or_nothing_price(
            option.option_type,
            market,
            option.strike,
            option.time_to_expiry,
            *payout,
        )?,
        Product::Barrier {
            option,
            barrier_level,
            direction,
            monitoring,
            mc,
        } => {
            let barrier = KnockOutBarrier::new(*barrier_level, *direction);
            match cache {
                Some(cache) => price_mc_barrier_cached(option, barrier, *monitoring, market, *mc, cache)?,
                None => price_mc_barrier(option, barrier, *monitoring, market, *mc)?,
            }
        }
        Product::Asian { option, method } => match method {
            AsianMethod::GeometricClosedForm => {
                asian_geometric_continuous_price(option.option_type, market, option.strike, option.time_to_expiry)?
            }
            AsianMethod::ArithmeticMc { fixings, paths, seed } => match cache {
                Some(cache) => price_mc_asian_arithmetic_cached(option, market, *fixings, *paths, *seed, cache)?,
                None => price_mc_asian_arithmetic(option, market, *fixings, *paths, *seed)?,
            },
        },
        Product::Forward {
            strike,
            time_to_expiry,
        } => forward_value(market, *strike, *time_to_expiry)?,
    };
    Ok(price)
}

/// Difference schemes used when bumping `product`.
pub fn fd_schemes_for(product: &Product) -> FdSchemes {
    if product.is_monte_carlo() {
        FdSchemes::forward()
    } else {
        FdSchemes::central()
    }
}

/// Prices one unit of `product` together with its Greeks.
///
/// # Errors
/// Any error of [`price_product`] at the base point or a bumped point.
pub fn price_product_with_greeks(product: &Product, market: &MarketState) -> Result<PricedResult, PricingError> {
    if let Product::Vanilla {
        option,
        method: VanillaMethod::BlackScholes,
    } = product
    {
        let (price_per_unit, greeks) =
            black_scholes_price_and_greeks(option.option_type, market, option.strike, option.time_to_expiry)?;
        return Ok(PricedResult {
            price_per_unit,
            greeks,
        });
    }

    let q = market.dividend_yield();
    let mut cache = RandomDrawCache::new();
    let mut price_at = |spot: f64, rate: f64, vol: f64, t: f64| -> Result<f64, PricingError> {
        let bumped = MarketState::new(spot, rate, q, vol)?;
        price_product(&product.with_time_to_expiry(t), &bumped, Some(&mut cache))
    };

    let eval = finite_difference_evaluation(
        &mut price_at,
        market.spot(),
        market.rate(),
        market.vol(),
        product.time_to_expiry(),
        &BumpSizes::default(),
        fd_schemes_for(product),
    )?;
    let price_per_unit = match eval.base_price {
        Some(price) => price,
        None => price_at(market.spot(), market.rate(), market.vol(), product.time_to_expiry())?,
    };
    let greeks = eval.greeks;

    Ok(PricedResult {
        price_per_unit,
        greeks,
    })
}

/// Prices one unit from loosely typed inputs.
///
/// # Errors
/// `Domain` for unknown instrument types, unsupported methods and bad
/// parameters; `Configuration` for out-of-range counts; plus anything the
/// engine reports.
pub fn price_leg(
    instrument_type: &str,
    method: &str,
    market: &MarketState,
    params: &LegParams,
) -> Result<f64, PricingError> {
    let product = Product::parse(instrument_type, method, params)?;
    price_product(&product, market, None)
}

/// Loosely typed [`price_product_with_greeks`].
pub fn price_leg_with_greeks(
    instrument_type: &str,
    method: &str,
    market: &MarketState,
    params: &LegParams,
) -> Result<PricedResult, PricingError> {
    let product = Product::parse(instrument_type, method, params)?;
    price_product_with_greeks(&product, market)
}

/// Closed-form price with Greeks, analytic where a formula exists and
/// central finite differences otherwise.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketState, OptionType};
/// use pricer_models::analytical::{ClosedFormKind, ClosedFormParams};
/// use pricer_pricing::pricer::price_and_greeks_closed_form;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let params = ClosedFormParams::new(100.0, 1.0).with_payout(1.0);
/// let (price, greeks) =
///     price_and_greeks_closed_form(ClosedFormKind::Digital, OptionType::Call, &market, &params).unwrap();
/// assert!(price > 0.5 && price < 0.56);
/// assert!(greeks.delta > 0.0);
/// ```
pub fn price_and_greeks_closed_form(
    kind: ClosedFormKind,
    option_type: OptionType,
    market: &MarketState,
    params: &ClosedFormParams,
) -> Result<(f64, Greeks), PricingError> {
    if let Some(result) = analytic_price_and_greeks(kind, option_type, market, params)? {
        return Ok(result);
    }

    let q = market.dividend_yield();
    let mut price_at = |spot: f64, rate: f64, vol: f64, t: f64| -> Result<f64, PricingError> {
        let bumped = MarketState::new(spot, rate, q, vol)?;
        let terms = ClosedFormParams {
            time_to_expiry: t,
            ..*params
        };
        price_closed_form(kind, option_type, &bumped, &terms)
    };

    let eval = finite_difference_evaluation(
        &mut price_at,
        market.spot(),
        market.rate(),
        market.vol(),
        params.time_to_expiry,
        &BumpSizes::default(),
        FdSchemes::central(),
    )?;
    let price = match eval.base_price {
        Some(price) => price,
        None => price_at(market.spot(), market.rate(), market.vol(), params.time_to_expiry)?,
    };
    Ok((price, eval.greeks))
}
