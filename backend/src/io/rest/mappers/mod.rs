pub mod attendance_mapper;
pub mod guest_mapper;
pub mod payment_mapper;
pub mod report_mapper;
pub mod resident_mapper;
pub mod subscription_mapper;
