// ==========================================
// 瓶装燃气配送调度系统 - 调度策略参数
// ==========================================
// 职责: 选车评分/装车预警/油耗模型的可覆写参数
// 红线: 启发式常量必须具名可调,不得散落为魔法数字
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// SelectorProfile - 选车评分参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorProfile {
    /// 目标利用率 (%): 适配度评分在此处达到峰值
    #[serde(default = "default_target_utilization_pct")]
    pub target_utilization_pct: f64,

    /// 利用率截断阈值 (%): 超过则给固定低分
    #[serde(default = "default_utilization_cutoff_pct")]
    pub utilization_cutoff_pct: f64,

    /// 超过截断阈值后的固定分值
    #[serde(default = "default_over_cutoff_score")]
    pub over_cutoff_score: f64,

    /// 线路简化奖励上限: 奖励 = max(0, 上限 - 当日已配订单数)
    #[serde(default = "default_routing_bonus_cap")]
    pub routing_bonus_cap: f64,
}

fn default_target_utilization_pct() -> f64 {
    75.0
}

fn default_utilization_cutoff_pct() -> f64 {
    85.0
}

fn default_over_cutoff_score() -> f64 {
    20.0
}

fn default_routing_bonus_cap() -> f64 {
    10.0
}

impl Default for SelectorProfile {
    fn default() -> Self {
        Self {
            target_utilization_pct: default_target_utilization_pct(),
            utilization_cutoff_pct: default_utilization_cutoff_pct(),
            over_cutoff_score: default_over_cutoff_score(),
            routing_bonus_cap: default_routing_bonus_cap(),
        }
    }
}

// ==========================================
// LoadingProfile - 装车校验参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingProfile {
    /// 软预警利用率阈值 (%): 超过且无硬超限时产生警告
    #[serde(default = "default_warning_utilization_pct")]
    pub warning_utilization_pct: f64,
}

fn default_warning_utilization_pct() -> f64 {
    90.0
}

impl Default for LoadingProfile {
    fn default() -> Self {
        Self {
            warning_utilization_pct: default_warning_utilization_pct(),
        }
    }
}

// ==========================================
// FleetProfile - 车队日程/油耗模型参数
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetProfile {
    /// 每个配送点的估算里程 (km)
    #[serde(default = "default_km_per_stop")]
    pub km_per_stop: f64,

    /// 默认平均油耗 (L/100km), 车辆未登记油耗时使用
    #[serde(default = "default_consumption_l_per_100km")]
    pub default_consumption_l_per_100km: f64,

    /// 可用油箱比例 (预留安全余量)
    #[serde(default = "default_usable_tank_ratio")]
    pub usable_tank_ratio: f64,
}

fn default_km_per_stop() -> f64 {
    25.0
}

fn default_consumption_l_per_100km() -> f64 {
    12.0
}

fn default_usable_tank_ratio() -> f64 {
    0.8
}

impl Default for FleetProfile {
    fn default() -> Self {
        Self {
            km_per_stop: default_km_per_stop(),
            default_consumption_l_per_100km: default_consumption_l_per_100km(),
            usable_tank_ratio: default_usable_tank_ratio(),
        }
    }
}
