//! Services module - business logic for the registry, ledger, blueprint
//! store and dashboard reporting.

pub mod automation_service;
pub mod blueprint_service;
pub mod jwt_service;
pub mod maintenance_service;
pub mod report_service;

// Re-export for convenience
pub use automation_service::AutomationService;
pub use blueprint_service::BlueprintService;
pub use jwt_service::{Claims, JwtService};
pub use maintenance_service::MaintenanceService;
pub use report_service::{
    DashboardSnapshot, Distribution, DistributionBucket, MonthlyBucket,
};
