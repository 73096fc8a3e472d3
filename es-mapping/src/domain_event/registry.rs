//! 事件类型注册表
//!
//! 以显式注册取代运行期类型内省：启动时登记全部事件类型，读取路径据此
//! 将持久化的 `event_type` 解析回事件构造函数；未登记的类型解析失败。
//!
use crate::domain_event::DomainEvent;
use crate::error::{MappingError, MappingResult};
use crate::record::GenericRecord;
use std::collections::HashMap;
use std::sync::Arc;

/// 事件构造函数：由通用记录重建领域事件
pub type EventConstructor = Arc<dyn Fn(GenericRecord) -> MappingResult<DomainEvent> + Send + Sync>;

/// 事件类型 → 构造函数
#[derive(Clone, Default)]
pub struct EventTypeRegistry {
    constructors: HashMap<String, EventConstructor>,
}

impl EventTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册事件类型（默认构造：按记录字段原样重建事件）
    pub fn register(&mut self, event_type: impl Into<String>) {
        self.register_with(event_type, Arc::new(reconstruct));
    }

    /// 注册事件类型及自定义构造函数（例如附加校验）
    pub fn register_with(&mut self, event_type: impl Into<String>, constructor: EventConstructor) {
        self.constructors.insert(event_type.into(), constructor);
    }

    pub fn resolve(&self, event_type: &str) -> MappingResult<&EventConstructor> {
        self.constructors
            .get(event_type)
            .ok_or_else(|| MappingError::TypeResolution {
                event_type: event_type.to_string(),
            })
    }

    pub fn contains(&self, event_type: &str) -> bool {
        self.constructors.contains_key(event_type)
    }
}

fn reconstruct(record: GenericRecord) -> MappingResult<DomainEvent> {
    let (event_id, event_type, data, metadata) = record.into_parts();
    Ok(DomainEvent::builder()
        .event_id(event_id)
        .event_type(event_type)
        .data(data)
        .metadata(metadata)
        .build())
}

impl<S> FromIterator<S> for EventTypeRegistry
where
    S: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut registry = Self::new();
        for event_type in iter {
            registry.register(event_type);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_type() {
        let registry = EventTypeRegistry::from_iter(["order.placed"]);
        assert!(registry.contains("order.placed"));
        assert!(registry.resolve("order.placed").is_ok());
    }

    #[test]
    fn unknown_type_fails_resolution() {
        let registry = EventTypeRegistry::new();
        let err = registry.resolve("order.cancelled").err().unwrap();
        assert!(matches!(
            err,
            MappingError::TypeResolution { event_type } if event_type == "order.cancelled"
        ));
    }
}
