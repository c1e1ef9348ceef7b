//! Domain model for a walk-in guest meal bill.
use anyhow::anyhow;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayMode {
    Online,
    Cash,
}

impl PayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayMode::Online => "online",
            PayMode::Cash => "cash",
        }
    }
}

impl FromStr for PayMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(PayMode::Online),
            "cash" => Ok(PayMode::Cash),
            other => Err(anyhow!("Unknown pay mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub pay_mode: PayMode,
    pub pay_amount: f64,
    pub pay_date: NaiveDate,
}
