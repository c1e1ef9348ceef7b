//! Domain-level command and query types
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer maps the public DTOs defined in
//! the `shared` crate to these internal types. Dates travel as the raw
//! `YYYY-MM-DD` strings the caller sent; services parse and validate them.

pub mod attendance {
    use crate::domain::attendance_service::AttendanceOutcome;

    /// Input for one meal check-in.
    #[derive(Debug, Clone)]
    pub struct MarkAttendanceCommand {
        pub reg_code: String,
        /// ISO-8601 wall-clock time of the check-in, supplied by the caller
        pub observed_at: String,
    }

    /// Result of a check-in: the normalized code and what happened.
    #[derive(Debug, Clone, PartialEq)]
    pub struct MarkAttendanceResult {
        pub reg_code: String,
        pub outcome: AttendanceOutcome,
    }
}

pub mod payment {
    use crate::domain::models::payment::{Payment, PaymentStatus};

    /// Payment details captured with onboarding or renewal.
    #[derive(Debug, Clone)]
    pub struct PaymentDetails {
        pub bill_number: Option<i64>,
        pub payment_date: String,
        pub total_amount: f64,
        pub paid_amount: f64,
        pub online: Option<f64>,
        pub cash: Option<f64>,
        pub txn_id: Option<String>,
    }

    /// Input for editing a stored payment of one resident.
    #[derive(Debug, Clone)]
    pub struct UpdatePaymentCommand {
        pub reg_code: String,
        pub payment_id: i64,
        pub payment_date: String,
        pub total_amount: f64,
        pub paid_amount: f64,
        /// Derived from the amounts when absent
        pub status: Option<PaymentStatus>,
        pub online: Option<f64>,
        pub cash: Option<f64>,
        pub txn_id: Option<String>,
    }

    /// Inclusive date range query.
    #[derive(Debug, Clone)]
    pub struct PaymentRangeQuery {
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, Clone)]
    pub struct BulkPaymentDateCommand {
        pub start_date: String,
        pub end_date: String,
        pub new_date: String,
    }

    #[derive(Debug, Clone)]
    pub struct BulkPaymentDateResult {
        pub updated_count: u64,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct PaymentResult {
        pub payment: Payment,
        pub success_message: String,
    }
}

pub mod resident {
    use super::payment::PaymentDetails;
    use crate::domain::models::resident::ResidentProfile;
    use crate::domain::models::subscription::PlanType;

    /// Input for onboarding a resident.
    #[derive(Debug, Clone)]
    pub struct CreateResidentCommand {
        pub reg_code: String,
        pub first_name: String,
        pub last_name: String,
        pub guardian_first_name: String,
        pub guardian_last_name: String,
        pub joining_date: String,
        pub address: Option<String>,
        pub email: Option<String>,
        pub phone: String,
        pub guardian_phone: String,
        pub plan_type: PlanType,
        pub plan_days: u32,
        pub payment: PaymentDetails,
    }

    /// Input for editing a resident's profile and plan.
    #[derive(Debug, Clone)]
    pub struct UpdateResidentCommand {
        pub reg_code: String,
        pub first_name: String,
        pub last_name: String,
        pub guardian_first_name: String,
        pub guardian_last_name: String,
        pub joining_date: String,
        pub address: Option<String>,
        pub email: Option<String>,
        pub phone: String,
        pub guardian_phone: String,
        pub plan_type: PlanType,
        pub plan_days: u32,
    }

    #[derive(Debug, Clone)]
    pub struct ResidentResult {
        pub profile: ResidentProfile,
        pub success_message: String,
    }
}

pub mod subscription {
    use chrono::NaiveDate;

    use super::payment::PaymentDetails;
    use crate::domain::models::payment::Payment;
    use crate::domain::models::subscription::{PlanType, Subscription, SubscriptionStatus};

    /// Input for renewing a resident's plan.
    #[derive(Debug, Clone)]
    pub struct RenewSubscriptionCommand {
        pub reg_code: String,
        pub plan_days: u32,
        pub plan_type: PlanType,
        pub status: SubscriptionStatus,
        pub renew_date: String,
        pub payment: PaymentDetails,
    }

    #[derive(Debug, Clone)]
    pub struct RenewSubscriptionResult {
        pub subscription: Subscription,
        pub payment: Payment,
        pub expected_end_date: NaiveDate,
        pub success_message: String,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateStatusCommand {
        pub reg_code: String,
        pub status: SubscriptionStatus,
    }

    #[derive(Debug, Clone)]
    pub struct UpdateStatusResult {
        pub subscription: Subscription,
        pub success_message: String,
    }
}

pub mod guest {
    use crate::domain::models::guest::{Guest, PayMode};

    #[derive(Debug, Clone)]
    pub struct CreateGuestCommand {
        pub name: String,
        pub pay_mode: PayMode,
        pub pay_amount: f64,
        pub pay_date: String,
    }

    #[derive(Debug, Clone)]
    pub struct GuestResult {
        pub guest: Guest,
        pub success_message: String,
    }
}

pub mod report {
    use chrono::NaiveDate;

    /// Query for residents started or renewed within a date range.
    #[derive(Debug, Clone)]
    pub struct NewResidentReportQuery {
        pub start_date: String,
        pub end_date: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct NewResidentLine {
        pub serial_number: u32,
        pub reg_code: String,
        pub name: String,
        pub duration_days: u32,
        pub meal_plan: String,
        pub payment_advance: f64,
        pub payment_pending: f64,
        pub end_date: NaiveDate,
        pub pay_mode: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct NewResidentReportResult {
        pub start_date: NaiveDate,
        pub end_date: NaiveDate,
        pub lines: Vec<NewResidentLine>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct PendingPaymentEntry {
        pub payment_date: NaiveDate,
        pub total: f64,
        pub paid: f64,
        pub pending: f64,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct PendingPaymentLine {
        pub serial_number: u32,
        pub reg_code: String,
        pub name: String,
        pub payments: Vec<PendingPaymentEntry>,
        pub phone: String,
        pub guardian_phone: String,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct PendingPaymentsReportResult {
        pub lines: Vec<PendingPaymentLine>,
    }
}
