// ==========================================
// 瓶装燃气配送调度系统 - 订单重量估算引擎
// ==========================================
// 职责: 将订单行折算为估算物理重量 (kg)
// 输入: 订单行 + 产品目录 + 气瓶重量参考表
// 输出: 总重量 + 逐行明细 (每行必须输出估算规则)
// 红线: 永不失败;参考数据缺失按文档化默认值降级
// ==========================================

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::weight_table::CylinderWeightTable;
use crate::domain::product::{OrderLine, Product, ProductCatalog};
use crate::domain::types::CylinderVariant;

// ==========================================
// LineWeightEstimate - 单行估算明细
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineWeightEstimate {
    pub line_no: i32,            // 行号
    pub product_id: String,      // 产品ID
    pub quantity: i32,           // 数量
    pub unit_weight_kg: f64,     // 单瓶估算重量
    pub line_weight_kg: f64,     // 行重量 = 单重 × 数量
    pub rule: String,            // 估算规则 (可解释性)
}

// ==========================================
// WeightEstimate - 订单估算结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEstimate {
    pub total_weight_kg: f64,           // 总估算重量
    pub lines: Vec<LineWeightEstimate>, // 逐行明细
}

// ==========================================
// WeightEstimator - 重量估算引擎
// ==========================================
// 无状态引擎;参考表由构造时注入
pub struct WeightEstimator {
    table: CylinderWeightTable,
}

impl WeightEstimator {
    pub fn new(table: CylinderWeightTable) -> Self {
        Self { table }
    }

    /// 估算订单行总重量
    ///
    /// # 规则
    /// 1) 变体行: 以母品公称容量查参考表,按满/空取值
    /// 2) 非变体且有容量: 按"满瓶"处理,容量 + 皮重 (皮重缺失按默认 10kg)
    /// 3) 无任何容量信息: 按默认参考单重 (13kg 级满瓶 27kg)
    ///
    /// # 返回
    /// 总重量与逐行明细;估算永不失败
    #[instrument(skip(self, lines, products), fields(lines_count = lines.len()))]
    pub fn estimate(&self, lines: &[OrderLine], products: &ProductCatalog) -> WeightEstimate {
        let mut estimates = Vec::with_capacity(lines.len());
        let mut total = 0.0;

        for line in lines {
            let (unit_weight, rule) = self.unit_weight_for(line, products);
            let line_weight = unit_weight * line.quantity as f64;
            total += line_weight;

            estimates.push(LineWeightEstimate {
                line_no: line.line_no,
                product_id: line.product_id.clone(),
                quantity: line.quantity,
                unit_weight_kg: unit_weight,
                line_weight_kg: line_weight,
                rule,
            });
        }

        WeightEstimate {
            total_weight_kg: total,
            lines: estimates,
        }
    }

    // ==========================================
    // 单瓶重量判定
    // ==========================================

    fn unit_weight_for(&self, line: &OrderLine, products: &ProductCatalog) -> (f64, String) {
        let defaults = &self.table.defaults;

        let product = match products.get(&line.product_id) {
            Some(p) => p,
            None => {
                // 产品目录缺失: 按默认参考单重降级
                return (
                    defaults.full_cylinder_kg,
                    format!(
                        "PRODUCT_UNKNOWN_DEFAULT: product_id={}, unit={}kg",
                        line.product_id, defaults.full_cylinder_kg
                    ),
                );
            }
        };

        if product.is_variant() {
            return self.variant_unit_weight(product, products);
        }

        match product.capacity_kg {
            Some(capacity) if capacity > 0.0 && capacity.is_finite() => {
                // 非变体按满瓶处理: 内容物 + 皮重
                let tare = product
                    .tare_weight_kg
                    .filter(|t| t.is_finite() && *t > 0.0)
                    .unwrap_or(defaults.tare_kg);
                (
                    capacity + tare,
                    format!(
                        "ASSUMED_FULL: capacity={}kg + tare={}kg",
                        capacity, tare
                    ),
                )
            }
            _ => (
                defaults.full_cylinder_kg,
                format!(
                    "DEFAULT_REFERENCE: no capacity info, unit={}kg",
                    defaults.full_cylinder_kg
                ),
            ),
        }
    }

    fn variant_unit_weight(&self, product: &Product, products: &ProductCatalog) -> (f64, String) {
        let defaults = &self.table.defaults;
        // is_variant() 保证两个字段都存在
        let variant = product.variant.unwrap_or(CylinderVariant::Full);

        let parent_capacity = product
            .parent_product_id
            .as_ref()
            .and_then(|pid| products.get(pid))
            .and_then(|parent| parent.capacity_kg);

        if let Some(capacity) = parent_capacity {
            if let Some(class) = self.table.lookup(capacity) {
                let unit = match variant {
                    CylinderVariant::Full => class.full_weight_kg,
                    CylinderVariant::Empty => class.empty_weight_kg,
                };
                return (
                    unit,
                    format!(
                        "VARIANT_TABLE: class={}kg, variant={}, unit={}kg",
                        class.capacity_kg, variant, unit
                    ),
                );
            }
        }

        // 母品缺失/容量缺失/无匹配等级: 按变体默认单重降级
        let unit = match variant {
            CylinderVariant::Full => defaults.full_cylinder_kg,
            CylinderVariant::Empty => defaults.empty_cylinder_kg,
        };
        (
            unit,
            format!("VARIANT_DEFAULT: variant={}, unit={}kg", variant, unit),
        )
    }
}

impl Default for WeightEstimator {
    fn default() -> Self {
        Self::new(CylinderWeightTable::standard())
    }
}
