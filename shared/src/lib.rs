use serde::{Deserialize, Serialize};
use std::fmt;

/// Meal plan tier of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanType {
    /// One meal per day
    Single,
    /// Lunch and dinner every day
    Both,
}

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanType::Single => write!(f, "single"),
            PlanType::Both => write!(f, "both"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionStatus::Active => write!(f, "active"),
            SubscriptionStatus::Inactive => write!(f, "inactive"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Complete,
    Pending,
}

/// How a guest paid for a meal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMode {
    Online,
    Cash,
}

/// Result kind of an attendance check-in, as shown to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceOutcomeKind {
    NotFound,
    Expired,
    Inactive,
    QuotaExhausted,
    SlotAlreadyMarked,
    Accepted,
}

/// Response of GET /api/attendance/mark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceResponse {
    /// Registration code as it was looked up (uppercased)
    pub reg_code: String,
    pub outcome: AttendanceOutcomeKind,
    /// True only for an accepted check-in
    pub success: bool,
    /// Human-readable message for display
    pub message: String,
    /// Balance after the check-in, present when accepted
    pub remaining_balance: Option<f64>,
    /// Check-ins recorded today, present when accepted
    pub last_count: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: String,
    pub guardian_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    /// Length in days of the last purchased plan
    pub number_of_days: u32,
    /// Date the plan was started or last renewed (YYYY-MM-DD)
    pub renew_date: String,
    /// Fractional days left on the plan
    pub remaining_balance: f64,
    pub plan_type: PlanType,
    pub status: SubscriptionStatus,
}

/// Full resident profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    pub reg_code: String,
    pub first_name: String,
    pub last_name: String,
    pub guardian_first_name: String,
    pub guardian_last_name: String,
    /// YYYY-MM-DD
    pub joining_date: String,
    pub contact: Contact,
    pub subscription: Subscription,
}

/// One row of the resident table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentSummary {
    pub reg_code: String,
    pub first_name: String,
    pub last_name: String,
    pub remaining_balance: f64,
    pub renew_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentListResponse {
    pub residents: Vec<ResidentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentExistsResponse {
    pub reg_code: String,
    pub exists: bool,
}

/// Payment details captured at onboarding and renewal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInput {
    /// Bill number printed on the receipt; assigned automatically when absent
    pub bill_number: Option<i64>,
    /// YYYY-MM-DD
    pub payment_date: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub online: Option<f64>,
    pub cash: Option<f64>,
    pub txn_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateResidentRequest {
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
    /// Number of days purchased
    pub plan_days: u32,
    pub payment: PaymentInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateResidentRequest {
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResidentResponse {
    pub resident: Resident,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub reg_code: String,
    pub bill_number: i64,
    pub payment_date: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    /// total_amount - paid_amount
    pub pending_amount: f64,
    pub status: PaymentStatus,
    pub online: Option<f64>,
    pub cash: Option<f64>,
    pub txn_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentListResponse {
    pub payments: Vec<Payment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdatePaymentRequest {
    pub payment_date: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    /// Derived from the amounts when absent
    pub status: Option<PaymentStatus>,
    pub online: Option<f64>,
    pub cash: Option<f64>,
    pub txn_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResponse {
    pub payment: Payment,
    pub success_message: String,
}

/// Moves every payment dated within [start_date, end_date] to new_date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPaymentDateRequest {
    pub start_date: String,
    pub end_date: String,
    pub new_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkPaymentDateResponse {
    pub updated_count: u64,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub reg_code: String,
    pub subscription: Subscription,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewSubscriptionRequest {
    /// Days purchased; added to the remaining balance
    pub plan_days: u32,
    pub plan_type: PlanType,
    pub status: SubscriptionStatus,
    /// YYYY-MM-DD
    pub renew_date: String,
    pub payment: PaymentInput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenewSubscriptionResponse {
    pub reg_code: String,
    pub subscription: Subscription,
    pub payment: Payment,
    /// renew_date plus the whole days of remaining balance (YYYY-MM-DD)
    pub expected_end_date: String,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: SubscriptionStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStatusResponse {
    pub reg_code: String,
    pub subscription: Subscription,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: i64,
    pub name: String,
    pub pay_mode: PayMode,
    pub pay_amount: f64,
    /// YYYY-MM-DD
    pub pay_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    pub name: String,
    pub pay_mode: PayMode,
    pub pay_amount: f64,
    pub pay_date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestResponse {
    pub guest: Guest,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestListResponse {
    pub guests: Vec<Guest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResidentReportRow {
    pub serial_number: u32,
    pub reg_code: String,
    pub name: String,
    pub duration_days: u32,
    /// "Lunch, Dinner" or "Lunch"
    pub meal_plan: String,
    pub payment_advance: f64,
    pub payment_pending: f64,
    /// renew_date + duration_days (YYYY-MM-DD)
    pub end_date: String,
    /// e.g. "online(500.00), cash(200.00)"
    pub pay_mode: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResidentReport {
    pub start_date: String,
    pub end_date: String,
    pub rows: Vec<NewResidentReportRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentLine {
    pub payment_date: String,
    pub total: f64,
    pub paid: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentReportRow {
    pub serial_number: u32,
    pub reg_code: String,
    pub name: String,
    pub payments: Vec<PendingPaymentLine>,
    pub phone: String,
    pub guardian_phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingPaymentsReport {
    pub rows: Vec<PendingPaymentReportRow>,
}

/// Body of every non-2xx JSON response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enums_use_lowercase_wire_names() {
        assert_eq!(serde_json::to_string(&PlanType::Both).unwrap(), "\"both\"");
        assert_eq!(serde_json::to_string(&SubscriptionStatus::Inactive).unwrap(), "\"inactive\"");
        assert_eq!(serde_json::to_string(&PayMode::Cash).unwrap(), "\"cash\"");
        assert_eq!(
            serde_json::to_string(&AttendanceOutcomeKind::SlotAlreadyMarked).unwrap(),
            "\"slot_already_marked\""
        );
    }

    #[test]
    fn test_plan_type_display_matches_wire_name() {
        for plan in [PlanType::Single, PlanType::Both] {
            let wire = serde_json::to_string(&plan).unwrap();
            assert_eq!(wire.trim_matches('"'), plan.to_string());
        }
    }

    #[test]
    fn test_attendance_response_deserializes() {
        let json = r#"{
            "reg_code": "UG0001",
            "outcome": "quota_exhausted",
            "success": false,
            "message": "Daily quota over",
            "remaining_balance": null,
            "last_count": null
        }"#;
        let response: AttendanceResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.outcome, AttendanceOutcomeKind::QuotaExhausted);
        assert!(!response.success);
    }
}
