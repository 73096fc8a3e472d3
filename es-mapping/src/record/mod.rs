//! 记录模型
//!
//! - `GenericRecord`：转换阶段之间流转的中间记录（已解码、未编码）；
//! - `SerializedRecord`：存储中立的持久化记录，负载为不透明编码字符串。

mod generic_record;
mod serialized_record;

pub use generic_record::GenericRecord;
pub use serialized_record::SerializedRecord;
