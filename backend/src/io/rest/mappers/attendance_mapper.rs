use crate::domain::attendance_service::AttendanceOutcome;
use crate::domain::commands::attendance::{MarkAttendanceCommand, MarkAttendanceResult};
use shared::{AttendanceOutcomeKind, AttendanceResponse};

/// Maps check-in commands and outcomes to and from the wire format.
pub struct AttendanceMapper;

impl AttendanceMapper {
    pub fn to_command(reg_code: String, observed_at: String) -> MarkAttendanceCommand {
        MarkAttendanceCommand { reg_code, observed_at }
    }

    pub fn to_response(result: MarkAttendanceResult) -> AttendanceResponse {
        let message = result.outcome.message(&result.reg_code);
        let success = result.outcome.is_success();
        let (outcome, remaining_balance, last_count) = match result.outcome {
            AttendanceOutcome::NotFound => (AttendanceOutcomeKind::NotFound, None, None),
            AttendanceOutcome::Expired => (AttendanceOutcomeKind::Expired, None, None),
            AttendanceOutcome::Inactive => (AttendanceOutcomeKind::Inactive, None, None),
            AttendanceOutcome::QuotaExhausted { .. } => (AttendanceOutcomeKind::QuotaExhausted, None, None),
            AttendanceOutcome::SlotAlreadyMarked { .. } => (AttendanceOutcomeKind::SlotAlreadyMarked, None, None),
            AttendanceOutcome::Accepted {
                remaining_balance,
                last_count,
            } => (AttendanceOutcomeKind::Accepted, Some(remaining_balance), Some(last_count)),
        };

        AttendanceResponse {
            reg_code: result.reg_code,
            outcome,
            success,
            message,
            remaining_balance,
            last_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::subscription::PlanType;

    #[test]
    fn test_accepted_carries_balance_and_count() {
        let response = AttendanceMapper::to_response(MarkAttendanceResult {
            reg_code: "UG0001".to_string(),
            outcome: AttendanceOutcome::Accepted {
                remaining_balance: 4.0,
                last_count: 1,
            },
        });
        assert_eq!(response.outcome, AttendanceOutcomeKind::Accepted);
        assert!(response.success);
        assert_eq!(response.remaining_balance, Some(4.0));
        assert_eq!(response.last_count, Some(1));
    }

    #[test]
    fn test_rejection_is_not_success() {
        let response = AttendanceMapper::to_response(MarkAttendanceResult {
            reg_code: "UG0001".to_string(),
            outcome: AttendanceOutcome::QuotaExhausted { plan: PlanType::Single },
        });
        assert_eq!(response.outcome, AttendanceOutcomeKind::QuotaExhausted);
        assert!(!response.success);
        assert_eq!(response.remaining_balance, None);
        assert!(response.message.contains("UG0001"));
    }
}
