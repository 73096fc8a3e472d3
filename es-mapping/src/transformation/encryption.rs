//! 加密转换
//!
//! 写方向：对事件类型声明的每个加密字段，推导主体、取当前密钥、用新 IV
//! 加密字段标量的序列化形式，并以 `{cipher, iv}`（base64）对替换字段值。
//! 读方向：同样的推导取密钥解密；密钥缺失或对当前密钥认证失败（遗忘后
//! 重建密钥的旧密文）都不是错误，以 `ForgottenData` 标记替换字段值。
//!
use super::Transformation;
use crate::domain_event::{EventValue, ForgottenData};
use crate::encryption::{EncryptionKey, EncryptionKeyRepository, EncryptionSchemaRegistry};
use crate::error::{MappingError, MappingResult};
use crate::record::GenericRecord;
use crate::serializer::{JsonSerializer, Serializer};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Value, json};
use std::sync::Arc;

const CIPHER_FIELD: &str = "cipher";
const IV_FIELD: &str = "iv";

pub struct EncryptionTransform {
    key_repository: Arc<dyn EncryptionKeyRepository>,
    schemas: Arc<EncryptionSchemaRegistry>,
    serializer: Arc<dyn Serializer>,
    forgotten_data: ForgottenData,
}

impl EncryptionTransform {
    pub fn new(
        key_repository: Arc<dyn EncryptionKeyRepository>,
        schemas: Arc<EncryptionSchemaRegistry>,
    ) -> Self {
        Self {
            key_repository,
            schemas,
            serializer: Arc::new(JsonSerializer),
            forgotten_data: ForgottenData::default(),
        }
    }

    /// 替换字段标量所用的序列化器（与映射器共用同一实现）
    pub fn with_serializer(mut self, serializer: Arc<dyn Serializer>) -> Self {
        self.serializer = serializer;
        self
    }

    pub fn with_forgotten_data(mut self, forgotten_data: ForgottenData) -> Self {
        self.forgotten_data = forgotten_data;
        self
    }

    fn encrypt_value(&self, key: &EncryptionKey, value: &EventValue) -> MappingResult<EventValue> {
        let plaintext = self.serializer.dump(&value.to_plain_value())?;
        let iv = key.random_iv();
        let ciphertext = key.encrypt(plaintext.as_bytes(), &iv)?;
        Ok(EventValue::Json(json!({
            CIPHER_FIELD: BASE64.encode(&ciphertext),
            IV_FIELD: BASE64.encode(&iv),
        })))
    }

    fn decrypt_value(&self, key: &EncryptionKey, value: &EventValue) -> MappingResult<EventValue> {
        let (ciphertext, iv) = decode_pair(value)?;
        match key.decrypt(&ciphertext, &iv) {
            Ok(plaintext) => {
                let raw =
                    String::from_utf8(plaintext).map_err(|_| MappingError::CorruptedRecord {
                        reason: "decrypted payload is not valid utf-8".to_string(),
                    })?;
                Ok(EventValue::Json(self.serializer.load(&raw)?))
            }
            // 当前密钥无法认证旧密文：主体密钥在遗忘后被重建。
            // 旧数据已被永久抹除，等同于密钥缺失。
            Err(_) => {
                tracing::debug!("ciphertext rejected by current key, substituting forgotten data");
                Ok(EventValue::Forgotten(self.forgotten_data.clone()))
            }
        }
    }
}

impl Transformation for EncryptionTransform {
    fn dump(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        let Some(schema) = self.schemas.schema_of(record.event_type()) else {
            return Ok(record);
        };
        let (event_id, event_type, mut data, metadata) = record.into_parts();
        for (field, derive_subject) in schema.fields() {
            let Some(value) = data.get(field) else {
                continue;
            };
            let subject_id = derive_subject(&data)?;
            let key = self.key_repository.key_of(&subject_id)?.ok_or_else(|| {
                MappingError::MissingKey {
                    subject_id: subject_id.clone(),
                }
            })?;
            let encrypted = self.encrypt_value(&key, value)?;
            data.insert(field.clone(), encrypted);
        }
        Ok(GenericRecord::builder()
            .event_id(event_id)
            .event_type(event_type)
            .data(data)
            .metadata(metadata)
            .build())
    }

    fn load(&self, record: GenericRecord) -> MappingResult<GenericRecord> {
        let Some(schema) = self.schemas.schema_of(record.event_type()) else {
            return Ok(record);
        };
        let (event_id, event_type, mut data, metadata) = record.into_parts();
        for (field, derive_subject) in schema.fields() {
            let Some(value) = data.get(field) else {
                continue;
            };
            let subject_id = derive_subject(&data)?;
            let decrypted = match self.key_repository.key_of(&subject_id)? {
                Some(key) => self.decrypt_value(&key, value)?,
                // 密钥已遗忘：预期的稳态，而非失败
                None => {
                    tracing::debug!(%subject_id, field = field.as_str(), "substituting forgotten data");
                    EventValue::Forgotten(self.forgotten_data.clone())
                }
            };
            data.insert(field.clone(), decrypted);
        }
        Ok(GenericRecord::builder()
            .event_id(event_id)
            .event_type(event_type)
            .data(data)
            .metadata(metadata)
            .build())
    }
}

fn decode_pair(value: &EventValue) -> MappingResult<(Vec<u8>, Vec<u8>)> {
    let corrupted = |reason: &str| MappingError::CorruptedRecord {
        reason: reason.to_string(),
    };
    let Some(Value::Object(pair)) = value.as_json() else {
        return Err(corrupted("encrypted field is not a cipher/iv pair"));
    };
    let ciphertext = pair
        .get(CIPHER_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| corrupted("encrypted field is missing its ciphertext"))?;
    let iv = pair
        .get(IV_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| corrupted("encrypted field is missing its iv"))?;
    Ok((
        BASE64
            .decode(ciphertext)
            .map_err(|_| corrupted("ciphertext is not valid base64"))?,
        BASE64
            .decode(iv)
            .map_err(|_| corrupted("iv is not valid base64"))?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_event::EventData;
    use crate::encryption::{EncryptionSchema, InMemoryEncryptionKeyRepository};

    fn transform(
        repository: Arc<InMemoryEncryptionKeyRepository>,
    ) -> EncryptionTransform {
        let mut schemas = EncryptionSchemaRegistry::new();
        schemas.register(
            "crm.customer_registered",
            EncryptionSchema::new().field_keyed_by("personal_info", "user_id"),
        );
        EncryptionTransform::new(repository, Arc::new(schemas))
    }

    fn record() -> GenericRecord {
        GenericRecord::builder()
            .event_id("e-1".to_string())
            .event_type("crm.customer_registered".to_string())
            .data(EventData::from([
                ("personal_info".to_string(), EventValue::from("test@example.com")),
                ("user_id".to_string(), EventValue::from(123i64)),
            ]))
            .build()
    }

    #[test]
    fn dump_without_key_is_a_missing_key_error() {
        let transform = transform(Arc::new(InMemoryEncryptionKeyRepository::new()));
        let err = transform.dump(record()).unwrap_err();
        assert!(matches!(err, MappingError::MissingKey { subject_id } if subject_id == "123"));
    }

    #[test]
    fn dump_replaces_declared_fields_only() {
        let repository = Arc::new(InMemoryEncryptionKeyRepository::new());
        repository.create("123").unwrap();
        let dumped = transform(repository).dump(record()).unwrap();
        let pair = dumped.data()["personal_info"].as_json().unwrap();
        assert!(pair.get("cipher").is_some() && pair.get("iv").is_some());
        assert_eq!(dumped.data()["user_id"], EventValue::from(123i64));
    }

    #[test]
    fn malformed_encrypted_field_is_a_corrupted_record() {
        let repository = Arc::new(InMemoryEncryptionKeyRepository::new());
        repository.create("123").unwrap();
        let transform = transform(repository);
        // 明文字符串出现在本应是密文对的位置
        let err = transform.load(record()).unwrap_err();
        assert!(matches!(err, MappingError::CorruptedRecord { .. }));
    }

    #[test]
    fn undeclared_event_types_pass_through() {
        let transform = transform(Arc::new(InMemoryEncryptionKeyRepository::new()));
        let plain = GenericRecord::builder()
            .event_id("e-2".to_string())
            .event_type("crm.customer_archived".to_string())
            .data(EventData::from([(
                "personal_info".to_string(),
                EventValue::from("kept"),
            )]))
            .build();
        assert_eq!(transform.dump(plain.clone()).unwrap(), plain);
        assert_eq!(transform.load(plain.clone()).unwrap(), plain);
    }
}
