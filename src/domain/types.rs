// ==========================================
// 瓶装燃气配送调度系统 - 领域类型定义
// ==========================================
// 职责: 车队/订单/配载的状态枚举与展示格式
// 序列化格式: SCREAMING_SNAKE_CASE (与外部存储一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 车辆运行状态 (Truck Status)
// ==========================================
// 红线: INACTIVE/MAINTENANCE 车辆不得进入候选池
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Active,      // 正常运营
    Inactive,    // 停运
    Maintenance, // 维保中
}

impl fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TruckStatus::Active => write!(f, "ACTIVE"),
            TruckStatus::Inactive => write!(f, "INACTIVE"),
            TruckStatus::Maintenance => write!(f, "MAINTENANCE"),
        }
    }
}

impl TruckStatus {
    /// 从字符串解析状态 (大小写不敏感,兼容外部存储的小写值)
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ACTIVE" => TruckStatus::Active,
            "MAINTENANCE" => TruckStatus::Maintenance,
            _ => TruckStatus::Inactive, // 默认值
        }
    }
}

// ==========================================
// 配载状态 (Allocation Status)
// ==========================================
// 生命周期: PLANNED → LOADED → DELIVERED, 或 CANCELLED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationStatus {
    Planned,   // 已计划 (建议,未装车)
    Loaded,    // 已装车
    Delivered, // 已送达
    Cancelled, // 已取消
}

impl fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationStatus::Planned => write!(f, "PLANNED"),
            AllocationStatus::Loaded => write!(f, "LOADED"),
            AllocationStatus::Delivered => write!(f, "DELIVERED"),
            AllocationStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl AllocationStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PLANNED" => AllocationStatus::Planned,
            "LOADED" => AllocationStatus::Loaded,
            "DELIVERED" => AllocationStatus::Delivered,
            _ => AllocationStatus::Cancelled,
        }
    }

    /// 判断是否计入运力占用 (取消的配载不计入)
    pub fn counts_toward_capacity(&self) -> bool {
        !matches!(self, AllocationStatus::Cancelled)
    }

    /// 判断是否终态
    pub fn is_terminal(&self) -> bool {
        matches!(self, AllocationStatus::Delivered | AllocationStatus::Cancelled)
    }

    /// 校验状态迁移是否合法
    ///
    /// # 规则
    /// - PLANNED → LOADED / CANCELLED
    /// - LOADED → DELIVERED / CANCELLED
    /// - 终态不可再迁移
    pub fn can_transition_to(&self, next: AllocationStatus) -> bool {
        matches!(
            (self, next),
            (AllocationStatus::Planned, AllocationStatus::Loaded)
                | (AllocationStatus::Planned, AllocationStatus::Cancelled)
                | (AllocationStatus::Loaded, AllocationStatus::Delivered)
                | (AllocationStatus::Loaded, AllocationStatus::Cancelled)
        )
    }
}

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 本核心只读取状态,不负责状态流转 (由外部订单域负责)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,   // 待确认
    Confirmed, // 已确认
    Assigned,  // 已分配车辆
    Delivered, // 已送达
    Cancelled, // 已取消
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "PENDING"),
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
            OrderStatus::Assigned => write!(f, "ASSIGNED"),
            OrderStatus::Delivered => write!(f, "DELIVERED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl OrderStatus {
    /// 判断是否可参与配载优化 (已终结/已分配的订单不再参与)
    pub fn is_allocatable(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Confirmed)
    }
}

// ==========================================
// 气瓶变体 (Cylinder Variant)
// ==========================================
// 满瓶/空瓶是同一母品的两个变体,重量按参考表取值
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CylinderVariant {
    Full,  // 满瓶
    Empty, // 空瓶
}

impl fmt::Display for CylinderVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CylinderVariant::Full => write!(f, "FULL"),
            CylinderVariant::Empty => write!(f, "EMPTY"),
        }
    }
}

impl CylinderVariant {
    /// 从变体名解析 (兼容外部产品库的小写命名)
    pub fn from_variant_name(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FULL" => Some(CylinderVariant::Full),
            "EMPTY" => Some(CylinderVariant::Empty),
            _ => None,
        }
    }
}

// ==========================================
// 车队负载等级 (Fleet Load Level)
// ==========================================
// 顺序: Green < Yellow < Orange < Red
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FleetLoadLevel {
    Green,  // 正常
    Yellow, // 关注
    Orange, // 紧张
    Red,    // 超载
}

impl fmt::Display for FleetLoadLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FleetLoadLevel::Green => write!(f, "GREEN"),
            FleetLoadLevel::Yellow => write!(f, "YELLOW"),
            FleetLoadLevel::Orange => write!(f, "ORANGE"),
            FleetLoadLevel::Red => write!(f, "RED"),
        }
    }
}
