//! 加密模式（EncryptionSchema）与其注册表
//!
//! 按事件类型声明哪些 `data` 字段携带个人信息、如何从负载推导主体 ID。
//! 注册表在启动时填充（显式注册，无运行期类型内省）；未注册的事件类型
//! 不做任何加密处理，这是合法且常见的情形。模式永远不作用于元数据。
//!
use crate::domain_event::{EventData, EventValue};
use crate::error::{MappingError, MappingResult};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

/// 主体 ID 推导函数：`data → subject_id`
///
/// 推导在 dump 与 load 两个方向都会执行，因此必须只依赖未加密字段
/// （典型地：主体 ID 本身存放在 `user_id` 这类明文字段中）。
pub type SubjectIdFn = Arc<dyn Fn(&EventData) -> MappingResult<String> + Send + Sync>;

/// 单个事件类型的加密模式：字段名 → 主体推导
#[derive(Clone, Default)]
pub struct EncryptionSchema {
    fields: BTreeMap<String, SubjectIdFn>,
}

impl EncryptionSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// 声明一个加密字段与其主体推导函数
    pub fn field(
        mut self,
        name: impl Into<String>,
        derive: impl Fn(&EventData) -> MappingResult<String> + Send + Sync + 'static,
    ) -> Self {
        self.fields.insert(name.into(), Arc::new(derive));
        self
    }

    /// 常见情形：主体 ID 存放在同一事件的明文字段中
    pub fn field_keyed_by(self, name: impl Into<String>, subject_field: impl Into<String>) -> Self {
        let subject_field = subject_field.into();
        self.field(name, move |data| {
            subject_id_from_field(data, &subject_field)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = (&String, &SubjectIdFn)> {
        self.fields.iter()
    }
}

impl fmt::Debug for EncryptionSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionSchema")
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

fn subject_id_from_field(data: &EventData, field: &str) -> MappingResult<String> {
    match data.get(field) {
        Some(EventValue::Json(Value::String(subject_id))) => Ok(subject_id.clone()),
        Some(EventValue::Json(Value::Number(subject_id))) => Ok(subject_id.to_string()),
        Some(_) => Err(MappingError::SubjectResolution {
            field: field.to_string(),
            reason: "subject field is not a string or number".to_string(),
        }),
        None => Err(MappingError::SubjectResolution {
            field: field.to_string(),
            reason: "subject field missing from data".to_string(),
        }),
    }
}

/// 事件类型 → 加密模式
#[derive(Clone, Default)]
pub struct EncryptionSchemaRegistry {
    schemas: HashMap<String, Arc<EncryptionSchema>>,
}

impl EncryptionSchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, event_type: impl Into<String>, schema: EncryptionSchema) {
        self.schemas.insert(event_type.into(), Arc::new(schema));
    }

    pub fn schema_of(&self, event_type: &str) -> Option<Arc<EncryptionSchema>> {
        self.schemas.get(event_type).cloned()
    }
}

impl fmt::Debug for EncryptionSchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionSchemaRegistry")
            .field("event_types", &self.schemas.keys().collect::<Vec<_>>())
            .finish()
    }
}
