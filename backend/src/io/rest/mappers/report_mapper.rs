use crate::domain::commands::report::{NewResidentReportQuery, NewResidentReportResult, PendingPaymentsReportResult};
use crate::domain::validation::format_date;
use shared::{NewResidentReport, NewResidentReportRow, PendingPaymentLine, PendingPaymentReportRow, PendingPaymentsReport};

pub struct ReportMapper;

impl ReportMapper {
    pub fn to_new_resident_query(start_date: String, end_date: String) -> NewResidentReportQuery {
        NewResidentReportQuery { start_date, end_date }
    }

    pub fn to_new_resident_dto(result: NewResidentReportResult) -> NewResidentReport {
        NewResidentReport {
            start_date: format_date(result.start_date),
            end_date: format_date(result.end_date),
            rows: result
                .lines
                .into_iter()
                .map(|line| NewResidentReportRow {
                    serial_number: line.serial_number,
                    reg_code: line.reg_code,
                    name: line.name,
                    duration_days: line.duration_days,
                    meal_plan: line.meal_plan,
                    payment_advance: line.payment_advance,
                    payment_pending: line.payment_pending,
                    end_date: format_date(line.end_date),
                    pay_mode: line.pay_mode,
                })
                .collect(),
        }
    }

    pub fn to_pending_payments_dto(result: PendingPaymentsReportResult) -> PendingPaymentsReport {
        PendingPaymentsReport {
            rows: result
                .lines
                .into_iter()
                .map(|line| PendingPaymentReportRow {
                    serial_number: line.serial_number,
                    reg_code: line.reg_code,
                    name: line.name,
                    payments: line
                        .payments
                        .into_iter()
                        .map(|entry| PendingPaymentLine {
                            payment_date: format_date(entry.payment_date),
                            total: entry.total,
                            paid: entry.paid,
                            pending: entry.pending,
                        })
                        .collect(),
                    phone: line.phone,
                    guardian_phone: line.guardian_phone,
                })
                .collect(),
        }
    }
}
