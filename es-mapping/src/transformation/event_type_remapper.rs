use super::Transformation;
use crate::error::MappingResult;
use crate::record::GenericRecord;
use std::collections::HashMap;

/// 事件类型重命名
///
/// 读取路径上把历史记录中的旧类型名映射为当前类型名，使事件类型可以
/// 在不迁移存量数据的情况下改名。写方向恒等：新写入的记录总是携带
/// 当前类型名。
pub struct EventTypeRemapper {
    /// 旧类型名 → 当前类型名
    renames: HashMap<String, String>,
}

impl EventTypeRemapper {
    pub fn new(renames: HashMap<String, String>) -> Self {
        Self { renames }
    }
}

impl<K, V> FromIterator<(K, V)> for EventTypeRemapper
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(old, new)| (old.into(), new.into()))
                .collect(),
        )
    }
}

impl Transformation for EventTypeRemapper {
    fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        Ok(record)
    }

    fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        let Some(renamed) = self.renames.get(record.event_type()) else {
            return Ok(record);
        };
        let renamed = renamed.clone();
        let (event_id, _, data, metadata) = record.into_parts();
        Ok(GenericRecord::builder()
            .event_id(event_id)
            .event_type(renamed)
            .data(data)
            .metadata(metadata)
            .build())
    }
}
