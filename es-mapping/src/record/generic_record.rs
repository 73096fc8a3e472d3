use crate::domain_event::{EventData, EventMetadata};
use bon::Builder;

/// 通用中间记录
///
/// 领域事件转换的输出、序列化器编码的输入；各转换阶段以
/// `GenericRecord → GenericRecord` 的纯函数形式对其加工。
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct GenericRecord {
    event_id: String,
    event_type: String,
    #[builder(default)]
    data: EventData,
    #[builder(default)]
    metadata: EventMetadata,
}

impl GenericRecord {
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
