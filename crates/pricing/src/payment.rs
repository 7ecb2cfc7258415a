//! Payment strategies: cash and installment credit.
//!
//! Payment processing is asynchronous and simulates provider latency; the
//! rest of the module is pure arithmetic. Credit pricing follows the
//! standard amortization formula with an interest rate tiered by duration.

use core::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use motorcade_core::error::ensure_non_negative;
use motorcade_core::{DomainError, DomainResult, Money, ValueObject};

/// Allowed credit durations, in months.
pub const CREDIT_DURATIONS: [u32; 5] = [12, 24, 36, 48, 60];

/// Annual interest rate (percent) for a credit duration. Longer terms cost
/// more.
pub fn credit_interest_rate(duration_months: u32) -> f64 {
    match duration_months {
        ..=12 => 3.9,
        ..=24 => 4.5,
        ..=36 => 5.2,
        ..=48 => 5.9,
        _ => 6.5,
    }
}

/// Payment method discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentKind {
    Cash,
    Credit,
}

impl PaymentKind {
    /// Parse a free-form tag; unrecognized values default to cash, the
    /// storefront's baseline payment method.
    pub fn parse_or_default(tag: &str) -> PaymentKind {
        match tag.to_ascii_lowercase().as_str() {
            "credit" => PaymentKind::Credit,
            _ => PaymentKind::Cash,
        }
    }
}

/// Outcome of a successful payment submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentReceipt {
    pub transaction_id: String,
    pub message: String,
}

/// The financing terms of an installment credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditDetails {
    pub monthly_payment: Money,
    pub duration_months: u32,
    /// Annual interest rate, percent.
    pub interest_rate: f64,
    /// Full cost of the credit: all installments plus the down payment.
    pub total_amount: Money,
    pub down_payment: Money,
}

impl ValueObject for CreditDetails {}

impl CreditDetails {
    /// Compute financing terms for `amount` over `duration_months` with an
    /// optional `down_payment`.
    ///
    /// Amortization: `monthly = financed * r(1+r)^n / ((1+r)^n - 1)` with
    /// `r` the monthly rate and `n` the number of installments. The
    /// monthly payment is rounded to the cent and the total derives from
    /// the rounded value, so `total == monthly * n + down_payment` holds
    /// exactly.
    pub fn calculate(
        amount: Money,
        duration_months: u32,
        down_payment: Money,
    ) -> DomainResult<CreditDetails> {
        if !CREDIT_DURATIONS.contains(&duration_months) {
            return Err(DomainError::invalid_payment_terms(format!(
                "credit duration must be one of {CREDIT_DURATIONS:?} months, got {duration_months}"
            )));
        }
        ensure_non_negative(down_payment, "down payment")?;
        if down_payment >= amount {
            return Err(DomainError::invalid_payment_terms(
                "down payment must be smaller than the financed amount",
            ));
        }

        let interest_rate = credit_interest_rate(duration_months);
        let financed = (amount - down_payment).as_major_f64();
        let monthly_rate = interest_rate / 100.0 / 12.0;
        let factor = (1.0 + monthly_rate).powi(duration_months as i32);
        let monthly_payment =
            Money::from_major_f64(financed * monthly_rate * factor / (factor - 1.0));

        Ok(CreditDetails {
            monthly_payment,
            duration_months,
            interest_rate,
            total_amount: monthly_payment.times(duration_months) + down_payment,
            down_payment,
        })
    }
}

/// A payment method with whatever state it needs to process a payment.
///
/// Cash is stateless; credit must be configured with computed
/// [`CreditDetails`] before it can process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind")]
pub enum PaymentStrategy {
    Cash,
    Credit { details: Option<CreditDetails> },
}

impl PaymentStrategy {
    pub fn new(kind: PaymentKind) -> Self {
        match kind {
            PaymentKind::Cash => PaymentStrategy::Cash,
            PaymentKind::Credit => PaymentStrategy::Credit { details: None },
        }
    }

    pub fn kind(&self) -> PaymentKind {
        match self {
            PaymentStrategy::Cash => PaymentKind::Cash,
            PaymentStrategy::Credit { .. } => PaymentKind::Credit,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentStrategy::Cash => "Cash payment",
            PaymentStrategy::Credit { .. } => "Credit application",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            PaymentStrategy::Cash => "Full payment at order time",
            PaymentStrategy::Credit { .. } => "Financing in monthly installments",
        }
    }

    /// Compute and store credit terms on a credit strategy.
    pub fn calculate_credit(
        &mut self,
        amount: Money,
        duration_months: u32,
        down_payment: Money,
    ) -> DomainResult<CreditDetails> {
        match self {
            PaymentStrategy::Cash => Err(DomainError::validation(
                "cash payment has no credit terms to calculate",
            )),
            PaymentStrategy::Credit { details } => {
                let computed = CreditDetails::calculate(amount, duration_months, down_payment)?;
                *details = Some(computed.clone());
                Ok(computed)
            }
        }
    }

    pub fn credit_details(&self) -> Option<&CreditDetails> {
        match self {
            PaymentStrategy::Cash => None,
            PaymentStrategy::Credit { details } => details.as_ref(),
        }
    }

    /// Whether this strategy is ready to process a payment.
    pub fn validate_payment(&self) -> bool {
        match self {
            PaymentStrategy::Cash => true,
            PaymentStrategy::Credit { details } => details.as_ref().is_some_and(|d| {
                d.duration_months > 0 && d.monthly_payment > Money::ZERO
            }),
        }
    }

    /// Submit the payment. Simulates provider latency; the caller that
    /// stops awaiting simply abandons the result (no rollback is modelled).
    pub async fn process_payment(&self, amount: Money) -> DomainResult<PaymentReceipt> {
        match self {
            PaymentStrategy::Cash => {
                tokio::time::sleep(Duration::from_millis(1_000)).await;
                let transaction_id = format!("CASH-{}", Uuid::now_v7().simple());
                info!(%transaction_id, amount = %amount, "cash payment accepted");
                Ok(PaymentReceipt {
                    message: format!("Cash payment of {amount} accepted"),
                    transaction_id,
                })
            }
            PaymentStrategy::Credit { details } => {
                let details = details.as_ref().ok_or(DomainError::PaymentNotConfigured)?;
                tokio::time::sleep(Duration::from_millis(2_000)).await;
                let transaction_id = format!("CREDIT-{}", Uuid::now_v7().simple());
                info!(%transaction_id, amount = %amount, "credit application accepted");
                Ok(PaymentReceipt {
                    message: format!(
                        "Credit application accepted: {} per month over {} months",
                        details.monthly_payment, details.duration_months
                    ),
                    transaction_id,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn interest_rate_tiers_by_duration() {
        assert_eq!(credit_interest_rate(12), 3.9);
        assert_eq!(credit_interest_rate(24), 4.5);
        assert_eq!(credit_interest_rate(36), 5.2);
        assert_eq!(credit_interest_rate(48), 5.9);
        assert_eq!(credit_interest_rate(60), 6.5);
    }

    #[test]
    fn credit_over_36_months_costs_more_than_cash() {
        let amount = Money::from_major(62_400);
        let details = CreditDetails::calculate(amount, 36, Money::ZERO).unwrap();

        assert_eq!(details.interest_rate, 5.2);
        assert!(details.monthly_payment > Money::ZERO);
        assert_eq!(details.total_amount, details.monthly_payment.times(36));
        assert!(details.total_amount > amount);
        // Sanity band for the amortized installment.
        assert!(details.monthly_payment > Money::from_major(1_800));
        assert!(details.monthly_payment < Money::from_major(1_950));
    }

    #[test]
    fn down_payment_reduces_the_installment() {
        let amount = Money::from_major(62_400);
        let without = CreditDetails::calculate(amount, 36, Money::ZERO).unwrap();
        let with = CreditDetails::calculate(amount, 36, Money::from_major(10_000)).unwrap();
        assert!(with.monthly_payment < without.monthly_payment);
        assert_eq!(with.down_payment, Money::from_major(10_000));
    }

    #[test]
    fn calculate_rejects_duration_outside_the_allowed_set() {
        let err = CreditDetails::calculate(Money::from_major(10_000), 18, Money::ZERO).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPaymentTerms(_)));
    }

    #[test]
    fn calculate_rejects_down_payment_covering_the_whole_amount() {
        let amount = Money::from_major(10_000);
        let err = CreditDetails::calculate(amount, 12, amount).unwrap_err();
        assert!(matches!(err, DomainError::InvalidPaymentTerms(_)));
    }

    #[test]
    fn unknown_payment_tag_defaults_to_cash() {
        assert_eq!(PaymentKind::parse_or_default("credit"), PaymentKind::Credit);
        assert_eq!(PaymentKind::parse_or_default("CREDIT"), PaymentKind::Credit);
        assert_eq!(PaymentKind::parse_or_default("bitcoin"), PaymentKind::Cash);
    }

    #[test]
    fn validate_payment_requires_configured_credit() {
        let mut strategy = PaymentStrategy::new(PaymentKind::Credit);
        assert!(!strategy.validate_payment());

        strategy
            .calculate_credit(Money::from_major(30_000), 24, Money::ZERO)
            .unwrap();
        assert!(strategy.validate_payment());

        assert!(PaymentStrategy::new(PaymentKind::Cash).validate_payment());
    }

    #[test]
    fn cash_strategy_has_no_credit_terms() {
        let mut strategy = PaymentStrategy::new(PaymentKind::Cash);
        let err = strategy
            .calculate_credit(Money::from_major(30_000), 24, Money::ZERO)
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn cash_payment_always_succeeds_with_transaction_id() {
        let strategy = PaymentStrategy::new(PaymentKind::Cash);
        let receipt = strategy.process_payment(Money::from_major(52_000)).await.unwrap();
        assert!(receipt.transaction_id.starts_with("CASH-"));
    }

    #[tokio::test(start_paused = true)]
    async fn credit_payment_fails_before_credit_is_calculated() {
        let strategy = PaymentStrategy::new(PaymentKind::Credit);
        let err = strategy.process_payment(Money::from_major(52_000)).await.unwrap_err();
        assert_eq!(err, DomainError::PaymentNotConfigured);
    }

    #[tokio::test(start_paused = true)]
    async fn credit_payment_succeeds_once_configured() {
        let mut strategy = PaymentStrategy::new(PaymentKind::Credit);
        strategy
            .calculate_credit(Money::from_major(52_000), 48, Money::from_major(2_000))
            .unwrap();
        let receipt = strategy.process_payment(Money::from_major(52_000)).await.unwrap();
        assert!(receipt.transaction_id.starts_with("CREDIT-"));
    }

    proptest! {
        /// Property: for any allowed duration and positive amount, financing
        /// costs strictly more than paying cash.
        #[test]
        fn amortized_total_exceeds_cash_total(
            amount_major in 1_000i64..500_000,
            duration_index in 0usize..CREDIT_DURATIONS.len(),
        ) {
            let amount = Money::from_major(amount_major);
            let details =
                CreditDetails::calculate(amount, CREDIT_DURATIONS[duration_index], Money::ZERO)
                    .unwrap();
            prop_assert!(details.total_amount > amount);
            prop_assert!(details.monthly_payment > Money::ZERO);
        }
    }
}
