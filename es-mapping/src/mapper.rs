//! 映射器（编排层）
//!
//! 把领域事件转换、转换流水线与序列化器组合为 `事件 ⇄ 序列化记录` 的
//! 双向映射。组合顺序即契约：
//! - dump：领域事件转换 → 流水线各阶段 → 序列化（data 与 metadata 各自
//!   独立编码）；
//! - load：反序列化 → 流水线逆序 → 领域事件转换。
//!
//! 密钥仓储、被遗忘标记与序列化器都是构造期配置，映射器生命周期内固定；
//! 映射器本身无状态，只要注入的密钥仓储并发安全即可被多方并发使用。
//!
use crate::domain_event::{
    DomainEvent, EventData, EventMetadata, EventTypeRegistry, ForgottenData,
};
use crate::encryption::{EncryptionKeyRepository, EncryptionSchemaRegistry};
use crate::error::MappingResult;
use crate::record::{GenericRecord, SerializedRecord};
use crate::serializer::{JsonSerializer, Serializer};
use crate::transformation::{
    DomainEventTransform, EncryptionTransform, Transformation, TransformationPipeline,
};
use std::sync::Arc;

pub trait Mapper: Send + Sync {
    fn event_to_serialized_record(&self, event: &DomainEvent) -> MappingResult<SerializedRecord>;

    fn serialized_record_to_event(&self, record: &SerializedRecord) -> MappingResult<DomainEvent>;
}

/// 通用映射器：端点转换 + 任意流水线阶段 + 序列化器
///
/// 空流水线即“无加密”映射器。
pub struct RecordMapper {
    event_transform: DomainEventTransform,
    pipeline: TransformationPipeline,
    serializer: Arc<dyn Serializer>,
}

impl RecordMapper {
    pub fn new(event_types: Arc<EventTypeRegistry>) -> Self {
        Self {
            event_transform: DomainEventTransform::new(event_types),
            pipeline: TransformationPipeline::new(),
            serializer: Arc::new(JsonSerializer),
        }
    }

    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    /// 追加一个流水线阶段（dump 按追加顺序应用）
    pub fn with_transformation(mut self, stage: Arc<dyn Transformation>) -> Self {
        self.pipeline.push(stage);
        self
    }
}

impl Mapper for RecordMapper {
    fn event_to_serialized_record(&self, event: &DomainEvent) -> MappingResult<SerializedRecord> {
        let record = self.pipeline.dump(self.event_transform.dump(event))?;
        let (event_id, event_type, data, metadata) = record.into_parts();
        let data = self.serializer.dump(&serde_json::to_value(&data)?)?;
        let metadata = self.serializer.dump(&serde_json::to_value(&metadata)?)?;
        Ok(SerializedRecord::builder()
            .event_id(event_id)
            .event_type(event_type)
            .data(data)
            .metadata(metadata)
            .build())
    }

    fn serialized_record_to_event(&self, record: &SerializedRecord) -> MappingResult<DomainEvent> {
        let data: EventData = serde_json::from_value(self.serializer.load(record.data())?)?;
        let metadata: EventMetadata =
            serde_json::from_value(self.serializer.load(record.metadata())?)?;
        let generic = GenericRecord::builder()
            .event_id(record.event_id().to_string())
            .event_type(record.event_type().to_string())
            .data(data)
            .metadata(metadata)
            .build();
        self.event_transform.load(self.pipeline.load(generic)?)
    }
}

/// 加密映射器：流水线中含加密转换的 `RecordMapper`
pub struct EncryptionMapper {
    inner: RecordMapper,
    event_types: Arc<EventTypeRegistry>,
    schemas: Arc<EncryptionSchemaRegistry>,
    key_repository: Arc<dyn EncryptionKeyRepository>,
    serializer: Arc<dyn Serializer>,
    forgotten_data: ForgottenData,
}

impl EncryptionMapper {
    pub fn new(
        event_types: Arc<EventTypeRegistry>,
        schemas: Arc<EncryptionSchemaRegistry>,
        key_repository: Arc<dyn EncryptionKeyRepository>,
    ) -> Self {
        Self::assemble(
            event_types,
            schemas,
            key_repository,
            Arc::new(JsonSerializer),
            ForgottenData::default(),
        )
    }

    /// 覆盖序列化器；记录编码与字段标量加密共用同一实现
    pub fn with_serializer(self, serializer: Arc<dyn Serializer>) -> Self {
        Self::assemble(
            self.event_types,
            self.schemas,
            self.key_repository,
            serializer,
            self.forgotten_data,
        )
    }

    /// 覆盖被遗忘标记的展示文本
    pub fn with_forgotten_data(self, forgotten_data: ForgottenData) -> Self {
        Self::assemble(
            self.event_types,
            self.schemas,
            self.key_repository,
            self.serializer,
            forgotten_data,
        )
    }

    fn assemble(
        event_types: Arc<EventTypeRegistry>,
        schemas: Arc<EncryptionSchemaRegistry>,
        key_repository: Arc<dyn EncryptionKeyRepository>,
        serializer: Arc<dyn Serializer>,
        forgotten_data: ForgottenData,
    ) -> Self {
        let encryption = EncryptionTransform::new(key_repository.clone(), schemas.clone())
            .with_serializer(serializer.clone())
            .with_forgotten_data(forgotten_data.clone());
        let inner = RecordMapper::new(event_types.clone())
            .with_serializer(serializer.clone())
            .with_transformation(Arc::new(encryption));
        Self {
            inner,
            event_types,
            schemas,
            key_repository,
            serializer,
            forgotten_data,
        }
    }
}

impl Mapper for EncryptionMapper {
    fn event_to_serialized_record(&self, event: &DomainEvent) -> MappingResult<SerializedRecord> {
        self.inner.event_to_serialized_record(event)
    }

    fn serialized_record_to_event(&self, record: &SerializedRecord) -> MappingResult<DomainEvent> {
        self.inner.serialized_record_to_event(record)
    }
}
