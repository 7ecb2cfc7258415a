//! Pricing strategies: country tax rules and payment methods.
//!
//! Both strategy families are small, closed sets, modelled as enums and
//! selected at runtime by a discriminator (country code, payment kind).

pub mod payment;
pub mod tax;

pub use payment::{
    CREDIT_DURATIONS, CreditDetails, PaymentKind, PaymentReceipt, PaymentStrategy,
    credit_interest_rate,
};
pub use tax::TaxStrategy;
