// ==========================================
// 瓶装燃气配送调度系统 - 配置层
// ==========================================
// 职责: 注入式参考数据与策略参数,可在测试中整体替换
// 红线: 配置是值,不依赖进程级全局状态
// ==========================================

pub mod strategy_profile;
pub mod weight_table;

// 重导出核心配置类型
pub use strategy_profile::{FleetProfile, LoadingProfile, SelectorProfile};
pub use weight_table::{CylinderWeightClass, CylinderWeightDefaults, CylinderWeightTable};
