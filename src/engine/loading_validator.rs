// ==========================================
// 瓶装燃气配送调度系统 - 装车校验引擎
// ==========================================
// 职责: 装车确认前的权威闸口,载重/瓶位双轴硬校验
// 输入: 车辆(状态+车载库存+双轴上限) + 拟新增装载项
// 输出: {is_valid, errors, warnings, capacity_check}
// 红线: 双轴独立判定,一轴通过不抵另一轴超限;
//       错误以结构化结果返回,绝不抛出,便于批量展示;
//       载重上限缺失按 瓶位 × 默认满瓶重 重建,绝不按无限处理
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::strategy_profile::LoadingProfile;
use crate::config::weight_table::CylinderWeightDefaults;
use crate::domain::truck::{Truck, TruckInventoryItem};
use crate::domain::types::TruckStatus;
use crate::engine::capacity::CapacityCalculator;

// ==========================================
// LoadingCapacityCheck - 校验中间量
// ==========================================
// 全部中间数字对外暴露,供审计与前端解释
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingCapacityCheck {
    // ===== 瓶位轴 =====
    pub current_cylinders: i32,               // 当前车载瓶数
    pub cylinders_to_add: i32,                // 拟新增瓶数
    pub total_cylinders_after: i32,           // 装车后瓶数
    pub cylinder_capacity: i32,               // 瓶位上限
    pub cylinder_overflow: i32,               // 瓶位超出量 (>0 即超限)
    pub cylinder_utilization_after_pct: f64,  // 装车后瓶位利用率 (%)

    // ===== 载重轴 =====
    pub current_weight_kg: f64,               // 当前车载重量
    pub weight_to_add_kg: f64,                // 拟新增重量
    pub total_weight_after_kg: f64,           // 装车后重量
    pub weight_capacity_kg: f64,              // 载重上限 (缺失时已重建)
    pub weight_overflow_kg: f64,              // 载重超出量 (>0 即超限)
    pub weight_utilization_after_pct: f64,    // 装车后载重利用率 (%)
}

// ==========================================
// LoadingValidation - 校验结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingValidation {
    pub is_valid: bool,                   // errors 为空即有效;警告不阻断
    pub errors: Vec<String>,              // 硬约束违反 (含精确超出量)
    pub warnings: Vec<String>,            // 软预警
    pub capacity_check: LoadingCapacityCheck,
}

// ==========================================
// LoadingValidator - 装车校验引擎
// ==========================================
pub struct LoadingValidator {
    defaults: CylinderWeightDefaults,
    profile: LoadingProfile,
    calculator: CapacityCalculator,
}

impl LoadingValidator {
    pub fn new(defaults: CylinderWeightDefaults, profile: LoadingProfile) -> Self {
        let calculator = CapacityCalculator::new(defaults.clone());
        Self {
            defaults,
            profile,
            calculator,
        }
    }

    /// 装车前校验
    ///
    /// # 规则
    /// 1) 车辆停用或维保中: 直接硬错误
    /// 2) 双轴分别计算装车后总量与超出量,任一轴超出 > 0 即硬错误
    /// 3) 无超限但某轴利用率超过预警阈值 (默认 90%): 软警告
    ///
    /// # 返回
    /// 结构化校验结果;即使早期拒绝也给出完整中间量
    #[instrument(skip(self, truck, proposed), fields(
        truck_id = %truck.truck_id,
        proposed_count = proposed.len(),
    ))]
    pub fn validate(&self, truck: &Truck, proposed: &[TruckInventoryItem]) -> LoadingValidation {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        // 1. 车辆状态门控
        if !truck.is_active || truck.status == TruckStatus::Inactive {
            errors.push(format!("车辆已停用: truck_id={}", truck.truck_id));
        }
        if truck.status == TruckStatus::Maintenance {
            errors.push(format!("车辆维保中: truck_id={}", truck.truck_id));
        }

        // 2. 双轴中间量
        let current_cylinders = truck.onboard_cylinder_count();
        let cylinders_to_add: i32 = proposed.iter().map(|i| i.cylinder_count()).sum();
        let total_cylinders_after = current_cylinders + cylinders_to_add;
        let cylinder_capacity = truck.capacity_cylinders;
        let cylinder_overflow = total_cylinders_after - cylinder_capacity;

        let current_weight = self.calculator.measure_inventory(&truck.inventory);
        let weight_to_add = self.calculator.measure_inventory(proposed);
        let total_weight_after = current_weight + weight_to_add;
        let weight_capacity = truck.weight_capacity_or_default(self.defaults.full_cylinder_kg);
        let weight_overflow = total_weight_after - weight_capacity;

        let cylinder_utilization_after = if cylinder_capacity > 0 {
            total_cylinders_after as f64 / cylinder_capacity as f64 * 100.0
        } else {
            0.0
        };
        let weight_utilization_after = if weight_capacity > 0.0 {
            total_weight_after / weight_capacity * 100.0
        } else {
            0.0
        };

        // 3. 双轴硬校验 (独立判定)
        if cylinder_overflow > 0 {
            errors.push(format!(
                "瓶位超限: 装车后 {} 瓶 > 上限 {} 瓶, 超出 {} 瓶",
                total_cylinders_after, cylinder_capacity, cylinder_overflow
            ));
        }
        if weight_overflow > 0.0 {
            errors.push(format!(
                "载重超限: 装车后 {:.1} kg > 上限 {:.1} kg, 超出 {:.1} kg",
                total_weight_after, weight_capacity, weight_overflow
            ));
        }

        // 4. 软预警 (该轴无超限时才给)
        let warn_pct = self.profile.warning_utilization_pct;
        if cylinder_overflow <= 0 && cylinder_utilization_after > warn_pct {
            warnings.push(format!(
                "瓶位利用率偏高: 装车后 {:.1}% (预警阈值 {:.0}%)",
                cylinder_utilization_after, warn_pct
            ));
        }
        if weight_overflow <= 0.0 && weight_utilization_after > warn_pct {
            warnings.push(format!(
                "载重利用率偏高: 装车后 {:.1}% (预警阈值 {:.0}%)",
                weight_utilization_after, warn_pct
            ));
        }

        let is_valid = errors.is_empty();

        LoadingValidation {
            is_valid,
            errors,
            warnings,
            capacity_check: LoadingCapacityCheck {
                current_cylinders,
                cylinders_to_add,
                total_cylinders_after,
                cylinder_capacity,
                cylinder_overflow,
                cylinder_utilization_after_pct: cylinder_utilization_after,
                current_weight_kg: current_weight,
                weight_to_add_kg: weight_to_add,
                total_weight_after_kg: total_weight_after,
                weight_capacity_kg: weight_capacity,
                weight_overflow_kg: weight_overflow,
                weight_utilization_after_pct: weight_utilization_after,
            },
        }
    }
}

impl Default for LoadingValidator {
    fn default() -> Self {
        Self::new(CylinderWeightDefaults::default(), LoadingProfile::default())
    }
}
