use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::date::parse_date;
use crate::types::{LoanNumber, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One borrower escrow snapshot, keyed by loan number.
///
/// Field names on the wire are the literal column headers of the servicing
/// extract. Missing fields fall back to their defaults instead of rejecting the
/// record; dates stay as free text and are parsed on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscrowRecord {
    #[serde(rename = "Customer Name")]
    pub customer_name: String,
    #[serde(rename = "Contact")]
    pub contact: String,
    #[serde(rename = "Loan Number")]
    pub loan_number: LoanNumber,
    #[serde(rename = "Total Loan Amount")]
    pub total_loan_amount: Money,
    #[serde(rename = "Current Balance")]
    pub current_balance: Money,
    #[serde(rename = "Current Escrow Balance")]
    pub current_escrow_balance: Money,
    #[serde(rename = "Prev Tax")]
    pub prev_tax: Money,
    #[serde(rename = "Prev Insurance")]
    pub prev_insurance: Money,
    /// Projected annual tax disbursement
    #[serde(rename = "Forecasted Tax")]
    pub forecasted_tax: Money,
    /// Projected annual insurance disbursement
    #[serde(rename = "Forecasted Insurance")]
    pub forecasted_insurance: Money,
    #[serde(rename = "Last Tax Paid Date")]
    pub last_tax_paid_date: String,
    #[serde(rename = "Last Insurance Paid Date")]
    pub last_insurance_paid_date: String,
    #[serde(rename = "Next Tax Pay Date")]
    pub next_tax_pay_date: String,
    #[serde(rename = "Next Insurance Pay Date")]
    pub next_insurance_pay_date: String,
    #[serde(rename = "Forecasted Escrow Surplus")]
    pub forecasted_escrow_surplus: Money,
    /// Expected to be zero whenever the surplus is positive
    #[serde(rename = "Forecasted Escrow Shortage")]
    pub forecasted_escrow_shortage: Money,
    #[serde(rename = "Last Interaction Date")]
    pub last_interaction_date: String,
    /// Free-text channel label ("Call", "Email", ...)
    #[serde(rename = "Last Interaction Type")]
    pub last_interaction_type: String,
    #[serde(rename = "Last Interaction Summary")]
    pub last_interaction_summary: String,
    #[serde(rename = "County")]
    pub county: String,
    #[serde(rename = "Property Address")]
    pub property_address: String,
}

impl EscrowRecord {
    pub fn shortage(&self) -> Money {
        self.forecasted_escrow_shortage
    }

    pub fn surplus(&self) -> Money {
        self.forecasted_escrow_surplus
    }

    pub fn next_tax_date(&self) -> Option<NaiveDate> {
        parse_date(&self.next_tax_pay_date)
    }

    pub fn next_insurance_date(&self) -> Option<NaiveDate> {
        parse_date(&self.next_insurance_pay_date)
    }

    pub fn last_tax_paid(&self) -> Option<NaiveDate> {
        parse_date(&self.last_tax_paid_date)
    }

    pub fn last_insurance_paid(&self) -> Option<NaiveDate> {
        parse_date(&self.last_insurance_paid_date)
    }

    pub fn last_interaction(&self) -> Option<NaiveDate> {
        parse_date(&self.last_interaction_date)
    }

    /// Earliest parseable tax or insurance date on or after `as_of`. Dates
    /// already in the past are ignored.
    pub fn next_due_on_or_after(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        [self.next_tax_date(), self.next_insurance_date()]
            .into_iter()
            .flatten()
            .filter(|d| *d >= as_of)
            .min()
    }

    /// Annual tax plus insurance outflow as forecast.
    pub fn forecasted_outflow(&self) -> Money {
        self.forecasted_tax + self.forecasted_insurance
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
