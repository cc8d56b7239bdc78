// ==========================================
// 瓶装燃气配送调度系统 - API层错误类型
// ==========================================
// 职责: 定义对外接口的错误类型
// 约定: 约束违反走校验结果结构体,不走错误;
//       此处只承载真正意外的输入形态问题,
//       且所有错误信息必须包含显式原因 (可解释性)
// ==========================================

use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入形态错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 状态流转错误
    // ==========================================
    #[error("无效的状态迁移: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
