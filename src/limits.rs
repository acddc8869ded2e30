//! Transfer limits. Defaults mirror the business rules: a per-transfer
//! ceiling of 1,000,000 and a daily limit of 50,000 evaluated in TRY.

use rust_decimal::Decimal;

use crate::dto::Currency;
use crate::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Limits {
    /// Largest amount a single transfer may move, in the source currency.
    pub max_transfer_amount: Decimal,
    /// Cap on a day's completed outgoing transfers per account, evaluated in
    /// the reference currency.
    pub daily_transfer_limit: Decimal,
    pub reference_currency: Currency,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_transfer_amount: Decimal::new(1_000_000, 0),
            daily_transfer_limit: Decimal::new(50_000, 0),
            reference_currency: Currency::Try,
        }
    }
}

impl Limits {
    /// Validates a single operation amount against the ceiling.
    pub fn check_amount(&self, amount: Decimal) -> Result<(), Error> {
        if amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(amount));
        }
        if amount > self.max_transfer_amount {
            return Err(Error::AmountAboveCeiling {
                amount,
                ceiling: self.max_transfer_amount,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_positive_amount_within_ceiling_passes() {
        let limits = Limits::default();
        assert!(limits.check_amount(dec!(0.01)).is_ok());
        assert!(limits.check_amount(dec!(1000000)).is_ok());
    }

    #[test]
    fn test_zero_and_negative_amounts_rejected() {
        let limits = Limits::default();
        assert_eq!(
            limits.check_amount(Decimal::ZERO),
            Err(Error::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            limits.check_amount(dec!(-5)),
            Err(Error::InvalidAmount(dec!(-5)))
        );
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let limits = Limits::default();
        assert_eq!(
            limits.check_amount(dec!(1000000.01)),
            Err(Error::AmountAboveCeiling {
                amount: dec!(1000000.01),
                ceiling: dec!(1000000),
            })
        );
    }
}
