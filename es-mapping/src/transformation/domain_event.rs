use crate::domain_event::{DomainEvent, EventTypeRegistry};
use crate::error::MappingResult;
use crate::record::GenericRecord;
use std::sync::Arc;

/// 领域事件转换：类型化事件 ⇄ 通用记录
///
/// 流水线两端的端点转换，无副作用。对没有加密模式的事件类型，它就是
/// 完整的映射基座（恒等转换 + 类型解析）。
pub struct DomainEventTransform {
    registry: Arc<EventTypeRegistry>,
}

impl DomainEventTransform {
    pub fn new(registry: Arc<EventTypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn dump(&self, event: &DomainEvent) -> GenericRecord {
        GenericRecord::builder()
            .event_id(event.event_id().to_string())
            .event_type(event.event_type().to_string())
            .data(event.data().clone())
            .metadata(event.metadata().clone())
            .build()
    }

    /// 将通用记录解析回类型化事件；未注册的 `event_type` 解析失败
    pub fn load(&self, record: GenericRecord) -> MappingResult<DomainEvent> {
        let constructor = self.registry.resolve(record.event_type())?.clone();
        constructor(record)
    }
}
