//! Portfolio legs: the loose wire form and its validated counterpart.

use serde::{Deserialize, Serialize};

use super::error::InstrumentError;
use super::params::LegParams;
use super::product::Product;

/// A leg as supplied by a caller.
///
/// `instrument_type` and `method` are free strings; validation happens in
/// [`LegRequest::parse`], so a malformed leg can still be reported against
/// its `leg_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegRequest {
    /// Caller-assigned identifier, only used to correlate results
    pub leg_id: String,
    /// Instrument type key (`vanilla`, `american`, ...)
    pub instrument_type: String,
    /// Pricing method key (`black_scholes`, `mc_bridge`, ...)
    pub method: String,
    /// Signed quantity; negative is short
    pub quantity: f64,
    /// Instrument-specific fields
    #[serde(default)]
    pub params: LegParams,
}

impl LegRequest {
    /// Creates a request.
    pub fn new(
        leg_id: impl Into<String>,
        instrument_type: impl Into<String>,
        method: impl Into<String>,
        quantity: f64,
        params: LegParams,
    ) -> Self {
        Self {
            leg_id: leg_id.into(),
            instrument_type: instrument_type.into(),
            method: method.into(),
            quantity,
            params,
        }
    }

    /// Validates the request into an [`InstrumentLeg`].
    pub fn parse(&self) -> Result<InstrumentLeg, InstrumentError> {
        InstrumentLeg::try_from(self)
    }
}

/// A validated leg: nonzero quantity and a fully typed product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentLeg {
    leg_id: String,
    quantity: f64,
    product: Product,
}

impl InstrumentLeg {
    /// Creates a leg.
    ///
    /// # Errors
    /// `ZeroQuantity` if quantity is zero, `InvalidParameter` if it is not finite.
    pub fn new(leg_id: impl Into<String>, quantity: f64, product: Product) -> Result<Self, InstrumentError> {
        let leg_id = leg_id.into();
        if !quantity.is_finite() {
            return Err(InstrumentError::invalid("quantity", "must be finite"));
        }
        if quantity == 0.0 {
            return Err(InstrumentError::ZeroQuantity { leg_id });
        }
        Ok(Self {
            leg_id,
            quantity,
            product,
        })
    }

    /// Caller-assigned identifier.
    #[inline]
    pub fn leg_id(&self) -> &str {
        &self.leg_id
    }

    /// Signed quantity.
    #[inline]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Typed product.
    #[inline]
    pub fn product(&self) -> &Product {
        &self.product
    }
}

impl TryFrom<&LegRequest> for InstrumentLeg {
    type Error = InstrumentError;

    fn try_from(req: &LegRequest) -> Result<Self, Self::Error> {
        let product = Product::parse(&req.instrument_type, &req.method, &req.params)?;
        InstrumentLeg::new(req.leg_id.clone(), req.quantity, product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruments::InstrumentType;
    use serde_json::json;

    #[test]
    fn test_deserialize_and_parse() {
        let req: LegRequest = serde_json::from_value(json!({
            "leg_id": "L1",
            "instrument_type": " Vanilla ",
            "method": "BLACK_SCHOLES",
            "quantity": -2,
            "params": {"option_type": "PUT", "strike": "95", "time_to_expiry": 0.5}
        }))
        .unwrap();
        let leg = req.parse().unwrap();
        assert_eq!(leg.leg_id(), "L1");
        assert_eq!(leg.quantity(), -2.0);
        assert_eq!(leg.product().instrument_type(), InstrumentType::Vanilla);
        assert_eq!(leg.product().option().unwrap().strike, 95.0);
    }

    #[test]
    fn test_params_default_to_empty() {
        let req: LegRequest = serde_json::from_value(json!({
            "leg_id": "x", "instrument_type": "forward", "method": "discounted_forward", "quantity": 1
        }))
        .unwrap();
        assert!(req.params.as_map().is_empty());
        assert!(req.parse().is_err());
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let params = LegParams::new().with("strike", 100).with("time_to_expiry", 1);
        let req = LegRequest::new("z", "forward", "discounted_forward", 0.0, params);
        assert_eq!(
            req.parse().unwrap_err(),
            InstrumentError::ZeroQuantity { leg_id: "z".into() }
        );
    }

    #[test]
    fn test_unknown_type_and_method() {
        let params = LegParams::new().with("strike", 100).with("time_to_expiry", 1);
        let req = LegRequest::new("a", "swaption", "black_scholes", 1.0, params.clone());
        assert!(matches!(req.parse(), Err(InstrumentError::UnknownInstrumentType { .. })));

        let req = LegRequest::new("b", "digital", "mc_bridge", 1.0, params);
        assert!(matches!(req.parse(), Err(InstrumentError::UnsupportedMethod { .. })));
    }
}
