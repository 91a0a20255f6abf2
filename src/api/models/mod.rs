// Models module - contains Automation, Maintenance, Blueprint and enums

pub mod automation;
pub mod blueprint;
pub mod enums;
pub mod maintenance;

pub use automation::{Automation, CreateAutomationRequest, UpdateAutomationRequest};
pub use blueprint::{Blueprint, CreateBlueprintRequest, UpdateBlueprintRequest};
pub use enums::{AutomationStatus, MaintenanceStatus, Role};
pub use maintenance::{CreateMaintenanceRequest, Maintenance, UpdateMaintenanceRequest};
