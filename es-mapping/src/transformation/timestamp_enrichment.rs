use super::Transformation;
use crate::error::MappingResult;
use crate::record::GenericRecord;
use chrono::Utc;
use serde_json::Value;

const DEFAULT_TIMESTAMP_KEY: &str = "timestamp";

/// 时间戳补全
///
/// 写方向为缺少时间戳的记录补上 RFC 3339（UTC）时间戳元数据；
/// 调用方已提供的时间戳原样保留。读方向恒等。
pub struct TimestampEnrichment {
    key: String,
}

impl TimestampEnrichment {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for TimestampEnrichment {
    fn default() -> Self {
        Self::new(DEFAULT_TIMESTAMP_KEY)
    }
}

impl Transformation for TimestampEnrichment {
    fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        if record.metadata().contains_key(&self.key) {
            return Ok(record);
        }
        let (event_id, event_type, data, mut metadata) = record.into_parts();
        metadata.insert(self.key.clone(), Value::String(Utc::now().to_rfc3339()));
        Ok(GenericRecord::builder()
            .event_id(event_id)
            .event_type(event_type)
            .data(data)
            .metadata(metadata)
            .build())
    }

    fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::EventMetadata;
    use chrono::DateTime;
    use serde_json::json;

    fn record(metadata: EventMetadata) -> GenericRecord {
        GenericRecord::builder()
            .event_id("e-1".to_string())
            .event_type("order.placed".to_string())
            .metadata(metadata)
            .build()
    }

    #[test]
    fn stamps_missing_timestamp_on_dump() {
        let dumped = TimestampEnrichment::default()
            .dump(record(EventMetadata::new()))
            .unwrap();
        let stamped = dumped.metadata()["timestamp"].as_str().unwrap();
        assert!(DateTime::parse_from_rfc3339(stamped).is_ok());
    }

    #[test]
    fn keeps_caller_provided_timestamp() {
        let metadata =
            EventMetadata::from([("timestamp".to_string(), json!("2024-01-01T00:00:00Z"))]);
        let dumped = TimestampEnrichment::default()
            .dump(record(metadata))
            .unwrap();
        assert_eq!(dumped.metadata()["timestamp"], json!("2024-01-01T00:00:00Z"));
    }
}
