mod rows;

pub mod attendance_repository;
pub mod guest_repository;
pub mod payment_repository;
pub mod resident_repository;
pub mod subscription_repository;

pub use attendance_repository::AttendanceRepository;
pub use guest_repository::GuestRepository;
pub use payment_repository::PaymentRepository;
pub use resident_repository::ResidentRepository;
pub use subscription_repository::SubscriptionRepository;
