pub mod lot;
pub mod monitoring_type;

pub use lot::{Lot, LOTES, LOT_CHOICES};
pub use monitoring_type::{MonitoringType, MONITORING_CHOICES};
