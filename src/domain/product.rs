// ==========================================
// 瓶装燃气配送调度系统 - 产品与订单领域模型
// ==========================================
// 职责: 产品主数据(气瓶/变体)与订单快照的只读模型
// 红线: 本核心不修改产品与订单,只读取
// ==========================================

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::types::{CylinderVariant, OrderStatus};

// ==========================================
// Product - 产品主数据
// ==========================================
// 外部产品域拥有,作为只读参考数据传入
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,                 // 产品ID
    pub product_name: String,               // 产品名称
    pub parent_product_id: Option<String>,  // 母品ID (满/空变体时存在)
    pub variant: Option<CylinderVariant>,   // 变体类型 (满瓶/空瓶)
    pub capacity_kg: Option<f64>,           // 公称容量 (内容物 kg, 如 6/13/48/90)
    pub tare_weight_kg: Option<f64>,        // 皮重 (空瓶自重 kg)
    pub is_active: bool,                    // 在售标志
}

impl Product {
    /// 判断是否为变体产品 (母品 + 变体名同时存在)
    pub fn is_variant(&self) -> bool {
        self.parent_product_id.is_some() && self.variant.is_some()
    }
}

/// 产品目录: 按 product_id 建立的只读索引
pub type ProductCatalog = HashMap<String, Product>;

// ==========================================
// OrderLine - 订单行
// ==========================================
// 归属唯一订单,出草稿态后不可变 (外部保障)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub line_no: i32,        // 行号
    pub product_id: String,  // 产品ID
    pub quantity: i32,       // 数量 (瓶)
    pub unit_price: f64,     // 单价
}

// ==========================================
// Order - 订单快照
// ==========================================
// 本核心只读取 id/客户/状态与行项派生的重量
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,                  // 订单ID
    pub customer_id: String,               // 客户ID
    pub status: OrderStatus,               // 订单状态
    pub delivery_date: Option<NaiveDate>,  // 期望配送日期
    pub total_amount: f64,                 // 订单金额
    pub lines: Vec<OrderLine>,             // 行项
    pub created_at: DateTime<Utc>,         // 创建时间
}

impl Order {
    /// 订单总瓶数
    pub fn total_quantity(&self) -> i32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// 判断是否可参与配载优化
    pub fn is_allocatable(&self) -> bool {
        self.status.is_allocatable()
    }
}
