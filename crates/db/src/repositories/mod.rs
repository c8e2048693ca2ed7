//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod active_client_repo;
pub mod campaign_repo;
pub mod contract_repo;
pub mod group_repo;
pub mod potential_client_repo;
pub mod service_repo;
pub mod session_repo;
pub mod statistics_repo;
pub mod user_repo;

pub use active_client_repo::ActiveClientRepo;
pub use campaign_repo::CampaignRepo;
pub use contract_repo::ContractRepo;
pub use group_repo::GroupRepo;
pub use potential_client_repo::PotentialClientRepo;
pub use service_repo::ServiceRepo;
pub use session_repo::SessionRepo;
pub use statistics_repo::StatisticsRepo;
pub use user_repo::UserRepo;
