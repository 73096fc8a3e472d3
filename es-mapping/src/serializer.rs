//! 载荷序列化（可插拔能力）
//!
//! 在结构化 JSON 值与可存储的不透明字符串之间编解码。实现必须能往返
//! 领域事件转换与加密转换产生的全部标量/映射形态（含密文/IV 对）；
//! 换一种编码只改变 `SerializedRecord` 的表示，不影响逻辑往返结果。
//!
use crate::error::MappingResult;
use serde_json::Value;
use std::sync::Arc;

pub trait Serializer: Send + Sync {
    fn dump(&self, value: &Value) -> MappingResult<String>;

    fn load(&self, raw: &str) -> MappingResult<Value>;
}

impl<T> Serializer for Arc<T>
where
    T: Serializer + ?Sized,
{
    fn dump(&self, value: &Value) -> MappingResult<String> {
        (**self).dump(value)
    }

    fn load(&self, raw: &str) -> MappingResult<Value> {
        (**self).load(raw)
    }
}

/// 默认序列化器：JSON 文本编码
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn dump(&self, value: &Value) -> MappingResult<String> {
        Ok(serde_json::to_string(value)?)
    }

    fn load(&self, raw: &str) -> MappingResult<Value> {
        Ok(serde_json::from_str(raw)?)
    }
}
