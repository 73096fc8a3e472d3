use super::EventValue;
use bon::Builder;
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// 事件负载字段集（字段名 → 字段值）
pub type EventData = BTreeMap<String, EventValue>;

/// 事件元数据集（字段名 → JSON 值；本设计中元数据永不加密）
pub type EventMetadata = BTreeMap<String, Value>;

/// 领域事件
///
/// 构造后不可变；相等性是 (类型, 数据, 元数据, ID) 上的结构相等。
/// 被遗忘字段由 `EventValue::Forgotten` 表示，任意两个标记互相相等，
/// 因此同一条记录遗忘前后的往返比较语义由字段值类型自身给出。
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct DomainEvent {
    /// 事件唯一标识符，未指定时生成 UUID v4
    #[builder(default = Uuid::new_v4().to_string())]
    event_id: String,
    /// 事件类型（全限定类型名，须在 `EventTypeRegistry` 中登记）
    event_type: String,
    /// 事件负载
    #[builder(default)]
    data: EventData,
    /// 操作性上下文，不参与加密
    #[builder(default)]
    metadata: EventMetadata,
}

impl DomainEvent {
    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    pub fn data(&self) -> &EventData {
        &self.data
    }

    pub fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }

    pub fn into_parts(self) -> (String, String, EventData, EventMetadata) {
        (self.event_id, self.event_type, self.data, self.metadata)
    }
}
