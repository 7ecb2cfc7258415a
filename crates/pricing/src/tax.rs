//! Country tax strategies.
//!
//! A closed registry: one variant per supported country, each a pure
//! multiplication by a fixed rate. Extending the registry means adding a
//! variant and a row in the tables below.

use serde::{Deserialize, Serialize};

use motorcade_core::Money;

/// Tax computation rule for one country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxStrategy {
    France,
    Germany,
    Belgium,
    Switzerland,
    Italy,
    Spain,
}

impl TaxStrategy {
    /// The full registry, in display order.
    pub const ALL: [TaxStrategy; 6] = [
        TaxStrategy::France,
        TaxStrategy::Germany,
        TaxStrategy::Belgium,
        TaxStrategy::Switzerland,
        TaxStrategy::Italy,
        TaxStrategy::Spain,
    ];

    /// Select a strategy by ISO country code (case-insensitive).
    ///
    /// Unrecognized codes fall back to France **silently** — this is the
    /// designed default market of the storefront, not an error path.
    pub fn for_country(code: &str) -> TaxStrategy {
        Self::ALL
            .into_iter()
            .find(|s| s.country_code().eq_ignore_ascii_case(code))
            .unwrap_or(TaxStrategy::France)
    }

    pub fn country_code(self) -> &'static str {
        match self {
            TaxStrategy::France => "FR",
            TaxStrategy::Germany => "DE",
            TaxStrategy::Belgium => "BE",
            TaxStrategy::Switzerland => "CH",
            TaxStrategy::Italy => "IT",
            TaxStrategy::Spain => "ES",
        }
    }

    pub fn country_name(self) -> &'static str {
        match self {
            TaxStrategy::France => "France",
            TaxStrategy::Germany => "Germany",
            TaxStrategy::Belgium => "Belgium",
            TaxStrategy::Switzerland => "Switzerland",
            TaxStrategy::Italy => "Italy",
            TaxStrategy::Spain => "Spain",
        }
    }

    /// Tax rate in percent.
    pub fn rate(self) -> f64 {
        match self {
            TaxStrategy::France => 20.0,
            TaxStrategy::Germany => 19.0,
            TaxStrategy::Belgium => 21.0,
            TaxStrategy::Switzerland => 7.7,
            TaxStrategy::Italy => 22.0,
            TaxStrategy::Spain => 21.0,
        }
    }

    /// Pure, deterministic tax computation: `amount * rate`, rounded to the
    /// cent. The sign of the input propagates; callers pass non-negative
    /// amounts by contract.
    pub fn calculate_tax(self, amount: Money) -> Money {
        amount.scale(self.rate() / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn france_taxes_at_twenty_percent() {
        let tax = TaxStrategy::France.calculate_tax(Money::from_major(52_000));
        assert_eq!(tax, Money::from_major(10_400));
    }

    #[test]
    fn switzerland_uses_fractional_rate() {
        let tax = TaxStrategy::Switzerland.calculate_tax(Money::from_major(10_000));
        assert_eq!(tax, Money::from_major(770));
    }

    #[test]
    fn selection_is_case_insensitive() {
        assert_eq!(TaxStrategy::for_country("de"), TaxStrategy::Germany);
        assert_eq!(TaxStrategy::for_country("Es"), TaxStrategy::Spain);
    }

    #[test]
    fn unknown_country_falls_back_to_france() {
        assert_eq!(TaxStrategy::for_country("US"), TaxStrategy::France);
        assert_eq!(TaxStrategy::for_country(""), TaxStrategy::France);
    }

    #[test]
    fn registry_covers_six_countries_with_distinct_codes() {
        let mut codes: Vec<&str> = TaxStrategy::ALL.iter().map(|s| s.country_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn negative_amount_sign_propagates() {
        let tax = TaxStrategy::France.calculate_tax(Money::from_major(-100));
        assert_eq!(tax, Money::from_major(-20));
    }
}
