//! Operation parameters and the typed transaction bodies they lower into.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::exchange::types::{ExchangeError, ExchangeResult, OperationKind};

/// Native ledger currency. It is never issued, so it carries no issuer.
pub const NATIVE_CURRENCY: &str = "SWT";

/// Flat fee attached to every transaction, in drops.
pub const TX_FEE_DROPS: u64 = 10;

const DIRECTION_ERROR: &str = "The type of creating order should be one of 'buy' and 'sell'";

/// Side of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderDirection {
    Buy,
    Sell,
}

impl FromStr for OrderDirection {
    type Err = ExchangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(OrderDirection::Buy),
            "sell" => Ok(OrderDirection::Sell),
            _ => Err(ExchangeError::Validation(DIRECTION_ERROR.to_string())),
        }
    }
}

impl fmt::Display for OrderDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderDirection::Buy => f.write_str("buy"),
            OrderDirection::Sell => f.write_str("sell"),
        }
    }
}

/// Parameters for placing an order of `amount` units of `base` priced in `counter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderParams {
    pub amount: String,
    pub base: String,
    pub counter: String,
    pub price: String,
    /// Must be exactly `"buy"` or `"sell"`.
    pub direction: String,
    pub issuer: Option<String>,
}

/// Parameters for cancelling the offer created by transaction `offer_sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelParams {
    pub offer_sequence: u64,
    pub issuer: Option<String>,
}

/// Parameters for moving `amount` of `currency` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    pub amount: String,
    pub memo: String,
    pub destination: String,
    pub currency: String,
    pub issuer: Option<String>,
}

/// A caller request before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CreateOrder(OrderParams),
    CancelOrder(CancelParams),
    Transfer(TransferParams),
}

impl Operation {
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::CreateOrder(_) => OperationKind::CreateOrder,
            Operation::CancelOrder(_) => OperationKind::CancelOrder,
            Operation::Transfer(_) => OperationKind::Transfer,
        }
    }

    /// Validate the parameters and lower them into a transaction body.
    ///
    /// Runs before any network call. `default_issuer` fills in a missing issuer
    /// for non-native currencies.
    pub fn prepare(&self, default_issuer: &str) -> ExchangeResult<TxBody> {
        match self {
            Operation::CreateOrder(params) => {
                let direction: OrderDirection = params.direction.parse()?;
                require_positive("amount", &params.amount)?;
                require_positive("price", &params.price)?;
                let issuer = resolve_issuer(params.issuer.as_deref(), default_issuer);
                Ok(TxBody::OfferCreate {
                    direction,
                    base: Amount::new(&params.base, &params.amount, issuer)?,
                    counter: Amount::new(&params.counter, &params.price, issuer)?,
                })
            }
            Operation::CancelOrder(params) => {
                if params.offer_sequence == 0 {
                    return Err(ExchangeError::Validation(
                        "offer sequence must be greater than zero".to_string(),
                    ));
                }
                Ok(TxBody::OfferCancel {
                    offer_sequence: params.offer_sequence,
                })
            }
            Operation::Transfer(params) => {
                require_positive("amount", &params.amount)?;
                if params.destination.trim().is_empty() {
                    return Err(ExchangeError::Validation(
                        "destination must not be empty".to_string(),
                    ));
                }
                let issuer = resolve_issuer(params.issuer.as_deref(), default_issuer);
                Ok(TxBody::Payment {
                    destination: params.destination.clone(),
                    amount: Amount::new(&params.currency, &params.amount, issuer)?,
                    memo: (!params.memo.is_empty()).then(|| params.memo.clone()),
                })
            }
        }
    }
}

/// A currency amount on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub currency: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl Amount {
    /// Build an amount; the currency code is upper-cased and the native
    /// currency drops its issuer.
    pub fn new(currency: &str, value: &str, issuer: &str) -> ExchangeResult<Self> {
        let currency = currency.trim().to_uppercase();
        if currency.is_empty() {
            return Err(ExchangeError::Validation(
                "currency must not be empty".to_string(),
            ));
        }
        let issuer = (currency != NATIVE_CURRENCY).then(|| issuer.to_string());
        Ok(Self {
            currency,
            value: value.trim().to_string(),
            issuer,
        })
    }
}

/// Validated transaction body handed to the signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TxBody {
    OfferCreate {
        direction: OrderDirection,
        base: Amount,
        counter: Amount,
    },
    OfferCancel {
        offer_sequence: u64,
    },
    Payment {
        destination: String,
        amount: Amount,
        #[serde(skip_serializing_if = "Option::is_none")]
        memo: Option<String>,
    },
}

fn resolve_issuer<'a>(issuer: Option<&'a str>, default_issuer: &'a str) -> &'a str {
    match issuer {
        Some(issuer) if !issuer.is_empty() => issuer,
        _ => default_issuer,
    }
}

fn require_positive(field: &str, value: &str) -> ExchangeResult<()> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(()),
        _ => Err(ExchangeError::Validation(format!(
            "{} must be a positive number, got '{}'",
            field, value
        ))),
    }
}
