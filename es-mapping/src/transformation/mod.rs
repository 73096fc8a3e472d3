//! 记录转换阶段与流水线
//!
//! 每个阶段实现统一的 `Transformation` 能力（`GenericRecord` 上的纯函数
//! dump/load），`TransformationPipeline` 负责按序组合：dump 正序、load
//! 逆序。新的阶段（压缩、模式上抬等）可直接插入，无需改动既有阶段。
//!
mod domain_event;
mod encryption;
mod event_type_remapper;
mod timestamp_enrichment;

pub use domain_event::DomainEventTransform;
pub use encryption::EncryptionTransform;
pub use event_type_remapper::EventTypeRemapper;
pub use timestamp_enrichment::TimestampEnrichment;

use crate::error::MappingResult;
use crate::record::GenericRecord;
use std::sync::Arc;

/// 记录转换阶段
pub trait Transformation: Send + Sync {
    /// 写方向：事件记录 → 待编码记录
    fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord>;

    /// 读方向：已解码记录 → 事件记录
    fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord>;
}

impl<T> Transformation for Arc<T>
where
    T: Transformation + ?Sized,
{
    fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        (**self).dump(record)
    }

    fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        (**self).load(record)
    }
}

/// 转换流水线：dump 按注册顺序应用各阶段，load 按逆序还原
#[derive(Clone, Default)]
pub struct TransformationPipeline {
    stages: Vec<Arc<dyn Transformation>>,
}

impl TransformationPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, stage: Arc<dyn Transformation>) {
        self.stages.push(stage);
    }

    pub fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        self.stages
            .iter()
            .try_fold(record, |record, stage| stage.dump(record))
    }

    pub fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        self.stages
            .iter()
            .rev()
            .try_fold(record, |record, stage| stage.load(record))
    }
}

impl FromIterator<Arc<dyn Transformation>> for TransformationPipeline {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Transformation>>>(iter: I) -> Self {
        Self {
            stages: iter.into_iter().collect(),
        }
    }
}
