// ==========================================
// 瓶装燃气配送调度系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、业务规则接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod product;
pub mod schedule;
pub mod snapshot;
pub mod truck;
pub mod types;

// 重导出核心类型
pub use allocation::{Allocation, CapacityInfo};
pub use product::{Order, OrderLine, Product, ProductCatalog};
pub use schedule::{DailySchedule, FleetAssessment, FleetUtilizationSummary};
pub use snapshot::FleetSnapshot;
pub use truck::{Truck, TruckInventoryItem};
pub use types::{
    AllocationStatus, CylinderVariant, FleetLoadLevel, OrderStatus, TruckStatus,
};
