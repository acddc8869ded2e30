//! Exchange rate table.
//!
//! Rates are statically seeded and looked up by exact directed pair; there is
//! no inverse derivation or triangulation. Same-currency conversion is the
//! identity with rate 1.

use rust_decimal::Decimal;
use std::collections::HashMap;
use time::OffsetDateTime;

use crate::dto::Currency;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRate {
    pub from: Currency,
    pub to: Currency,
    /// Multiplier: 1 unit of `from` buys `rate` units of `to`.
    pub rate: Decimal,
    pub updated_at: OffsetDateTime,
}

#[derive(Default)]
pub struct RateTable {
    rates: HashMap<(Currency, Currency), ExchangeRate>,
}

impl RateTable {
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Inserts or replaces the rate for a directed pair, stamping the update
    /// time.
    pub fn set(&mut self, from: Currency, to: Currency, rate: Decimal) {
        self.rates.insert(
            (from, to),
            ExchangeRate {
                from,
                to,
                rate,
                updated_at: OffsetDateTime::now_utc(),
            },
        );
    }

    pub fn get(&self, from: Currency, to: Currency) -> Option<&ExchangeRate> {
        self.rates.get(&(from, to))
    }

    /// Multiplier from `from` to `to`. Same-currency pairs convert at 1
    /// without needing a seeded entry.
    pub fn rate(&self, from: Currency, to: Currency) -> Result<Decimal, Error> {
        if from == to {
            return Ok(Decimal::ONE);
        }
        self.get(from, to)
            .map(|entry| entry.rate)
            .ok_or(Error::RateNotFound { from, to })
    }

    /// Converts an amount between currencies using the seeded rate.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal, Error> {
        Ok(amount * self.rate(from, to)?)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ExchangeRate> {
        self.rates.values()
    }
}
