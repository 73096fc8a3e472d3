//! 映射层统一错误定义
//!
//! 聚焦序列化、类型解析、主体推导与密钥仓储等最小必要集合，
//! 便于在各实现层统一转换为 `MappingError`。
//!
use thiserror::Error;

/// 统一错误类型（映射层最小必要集）
///
/// 注意：主体密钥已被遗忘不是错误 —— 读取路径以 `ForgottenData` 标记替换
/// 对应字段（见 `transformation::EncryptionTransform`）。
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum MappingError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("serialization error: {reason}")]
    Serialization { reason: String },
    #[error("parse error: {reason}")]
    Parse { reason: String },

    // --- 事件类型与加密模式 ---
    #[error("type resolution failed: unknown event_type={event_type}")]
    TypeResolution { event_type: String },
    #[error("subject resolution failed: field={field}, reason={reason}")]
    SubjectResolution { field: String, reason: String },

    // --- 加密与密钥 ---
    #[error("missing encryption key: subject_id={subject_id}")]
    MissingKey { subject_id: String },
    #[error("encryption error: {reason}")]
    Encryption { reason: String },
    #[error("corrupted record: {reason}")]
    CorruptedRecord { reason: String },
    #[error("key repository error: {reason}")]
    KeyRepository { reason: String },
}

/// 统一 Result 类型别名
pub type MappingResult<T> = Result<T, MappingError>;
