// ==========================================
// 瓶装燃气配送调度系统 - 核心库
// ==========================================
// 系统定位: 配送后台的车队运力分配核心 (决策支持,人工最终控制权)
// 边界: 纯同步计算库;持久化/鉴权/RPC 由外部调用方负责
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 注入式参考数据与策略参数
pub mod config;

// 引擎层 - 业务规则
pub mod engine;

// API 层 - 业务接口
pub mod api;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    AllocationStatus, CylinderVariant, FleetLoadLevel, OrderStatus, TruckStatus,
};

// 领域实体
pub use domain::{
    Allocation, CapacityInfo, DailySchedule, FleetSnapshot, FleetUtilizationSummary, Order,
    OrderLine, Product, ProductCatalog, Truck, TruckInventoryItem,
};

// 配置
pub use config::{
    CylinderWeightDefaults, CylinderWeightTable, FleetProfile, LoadingProfile, SelectorProfile,
};

// 引擎
pub use engine::{
    AllocationOptimizer, CapacityCalculator, FleetScheduler, LoadingValidation, LoadingValidator,
    OptimizationResult, OrderWeight, TruckSelection, TruckSelector, WeightEstimate,
    WeightEstimator,
};

// API
pub use api::{ApiError, ApiResult, FleetApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "瓶装燃气配送调度系统";

// ==========================================
// 预编译检查
// ==========================================
