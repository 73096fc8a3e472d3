//! 流水线阶段在映射器中的组合
//!
//! 补充阶段（时间戳补全、类型重命名）与端点转换的协作：阶段可插入而
//! 无需改动映射器或其余阶段。

use anyhow::Result as AnyResult;
use es_mapping::domain_event::{DomainEvent, EventTypeRegistry};
use es_mapping::mapper::{Mapper, RecordMapper};
use es_mapping::record::SerializedRecord;
use es_mapping::transformation::{EventTypeRemapper, TimestampEnrichment};
use std::sync::Arc;

#[test]
fn dumped_records_are_stamped() -> AnyResult<()> {
    let mapper = RecordMapper::new(Arc::new(EventTypeRegistry::from_iter(["order.placed"])))
        .with_transformation(Arc::new(TimestampEnrichment::default()));
    let event = DomainEvent::builder()
        .event_type("order.placed".to_string())
        .build();

    let record = mapper.event_to_serialized_record(&event)?;
    let metadata: serde_json::Value = serde_json::from_str(record.metadata())?;
    assert!(metadata["timestamp"].is_string());
    Ok(())
}

#[test]
fn legacy_type_names_load_through_the_remapper() -> AnyResult<()> {
    // 注册表只认识当前类型名；历史记录经重命名阶段落到它上面
    let mapper = RecordMapper::new(Arc::new(EventTypeRegistry::from_iter(["order.placed"])))
        .with_transformation(Arc::new(EventTypeRemapper::from_iter([(
            "legacy.order.created",
            "order.placed",
        )])));

    let record = SerializedRecord::builder()
        .event_id("e-1".to_string())
        .event_type("legacy.order.created".to_string())
        .data("{}".to_string())
        .metadata("{}".to_string())
        .build();
    let event = mapper.serialized_record_to_event(&record)?;
    assert_eq!(event.event_type(), "order.placed");
    Ok(())
}
