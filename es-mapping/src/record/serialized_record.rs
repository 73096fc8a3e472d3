use bon::Builder;
use serde::{Deserialize, Serialize};

/// 存储中立的持久化记录
///
/// 任何存储后端持久化的最小单元；`data`/`metadata` 为序列化器产生的
/// 不透明编码字符串，本类型对加密一无所知。
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
pub struct SerializedRecord {
    /// 事件唯一标识符
    event_id: String,
    /// 事件类型（全限定类型名）
    event_type: String,
    /// 编码后的事件负载
    data: String,
    /// 编码后的事件元数据
    metadata: String,
}

impl SerializedRecord {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}
