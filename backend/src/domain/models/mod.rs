pub mod activity;
pub mod guest;
pub mod payment;
pub mod resident;
pub mod subscription;
