//! Domain model for a resident's payment receipt.

use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    Complete,
    Pending,
}

impl PaymentStatus {
    /// A payment is complete once the paid amount covers the bill
    pub fn from_amounts(total_amount: f64, paid_amount: f64) -> Self {
        if paid_amount >= total_amount {
            PaymentStatus::Complete
        } else {
            PaymentStatus::Pending
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Complete => "complete",
            PaymentStatus::Pending => "pending",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "complete" => Ok(PaymentStatus::Complete),
            "pending" => Ok(PaymentStatus::Pending),
            other => Err(anyhow!("Unknown payment status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub reg_code: String,
    pub bill_number: i64,
    pub payment_date: NaiveDate,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: PaymentStatus,
    pub online: Option<f64>,
    pub cash: Option<f64>,
    pub txn_id: Option<String>,
}

impl Payment {
    pub fn pending_amount(&self) -> f64 {
        self.total_amount - self.paid_amount
    }

    /// Summary of how the bill was paid, e.g. "online(500.00), cash(200.00)"
    pub fn pay_mode_summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(online) = self.online.filter(|amount| *amount > 0.0) {
            parts.push(format!("online({:.2})", online));
        }
        if let Some(cash) = self.cash.filter(|amount| *amount > 0.0) {
            parts.push(format!("cash({:.2})", cash));
        }
        parts.join(", ")
    }
}

/// Payment not yet stored; the id and, optionally, the bill number are assigned on insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub bill_number: Option<i64>,
    pub payment_date: NaiveDate,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub status: PaymentStatus,
    pub online: Option<f64>,
    pub cash: Option<f64>,
    pub txn_id: Option<String>,
}
