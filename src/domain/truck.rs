// ==========================================
// 瓶装燃气配送调度系统 - 配送车领域模型
// ==========================================
// 职责: 配送车主数据与车载库存
// 红线: 载重与瓶位是两条独立的硬约束,不可互抵
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::TruckStatus;

// ==========================================
// TruckInventoryItem - 车载库存项
// ==========================================
// 记录当前实际装载的满瓶/空瓶数量,独立于配载计划
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TruckInventoryItem {
    pub product_id: String,      // 产品ID
    pub qty_full: i32,           // 满瓶数量
    pub qty_empty: i32,          // 空瓶数量
    pub weight_kg: Option<f64>,  // 预计算重量 (kg, 可空则按默认单重折算)
}

impl TruckInventoryItem {
    /// 该项占用的瓶位数 (满瓶与空瓶各占一位)
    pub fn cylinder_count(&self) -> i32 {
        self.qty_full + self.qty_empty
    }
}

// ==========================================
// Truck - 配送车
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Truck {
    pub truck_id: String,                          // 车辆ID
    pub plate_no: Option<String>,                  // 车牌号
    pub is_active: bool,                           // 启用标志
    pub status: TruckStatus,                       // 运行状态

    // ===== 双轴运力上限 =====
    pub capacity_cylinders: i32,                   // 瓶位上限 (个)
    pub capacity_kg: Option<f64>,                  // 载重上限 (kg, 可空)

    // ===== 维保与油耗 =====
    pub next_maintenance_date: Option<NaiveDate>,  // 下次维保日期
    pub fuel_tank_l: Option<f64>,                  // 油箱容量 (L)
    pub avg_consumption_l_per_100km: Option<f64>,  // 平均油耗 (L/100km)

    // ===== 车载库存 =====
    pub inventory: Vec<TruckInventoryItem>,        // 当前实际装载
}

impl Truck {
    /// 判断是否可参与配载 (启用且非停运/维保)
    pub fn is_operational(&self) -> bool {
        self.is_active && self.status == TruckStatus::Active
    }

    /// 运力计算用的载重上限 (未配置时为 0, 产出 0% 利用率而非除零)
    pub fn effective_capacity_kg(&self) -> f64 {
        self.capacity_kg.filter(|c| c.is_finite()).unwrap_or(0.0)
    }

    /// 装车校验用的载重上限
    ///
    /// 未显式配置时按 瓶位上限 × 默认满瓶单重 确定性重建,
    /// 绝不按"无限"处理。
    pub fn weight_capacity_or_default(&self, default_full_kg: f64) -> f64 {
        match self.capacity_kg {
            Some(c) if c > 0.0 && c.is_finite() => c,
            _ => self.capacity_cylinders as f64 * default_full_kg,
        }
    }

    /// 车载库存占用的瓶位总数
    pub fn onboard_cylinder_count(&self) -> i32 {
        self.inventory.iter().map(|i| i.cylinder_count()).sum()
    }
}
