//! 事件字段值与“被遗忘数据”标记
//!
//! `EventValue` 是事件 `data` 中单个字段的取值：普通 JSON 值，或其主体
//! 密钥已被销毁后的 `ForgottenData` 标记。标记只会出现在解密路径的输出
//! 中，序列化时退化为其展示文本，反序列化永远得到普通 JSON 值。
//!
use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// 默认的被遗忘数据展示文本
pub const DEFAULT_FORGOTTEN_TEXT: &str = "FORGOTTEN_DATA";

/// 被遗忘数据标记
///
/// 仅携带一个展示文本。相等性只看类型本身：任意两个 `ForgottenData`
/// 相等，与文本无关 —— 已遗忘字段之间的比较不应因映射器配置不同而失败。
#[derive(Debug, Clone)]
pub struct ForgottenData {
    text: String,
}

impl ForgottenData {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for ForgottenData {
    fn default() -> Self {
        Self::new(DEFAULT_FORGOTTEN_TEXT)
    }
}

impl fmt::Display for ForgottenData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for ForgottenData {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ForgottenData {}

/// 事件字段值
#[derive(Debug, Clone, PartialEq)]
pub enum EventValue {
    /// 普通 JSON 值（明文，或加密后的密文/IV 对）
    Json(Value),
    /// 主体密钥已被销毁的字段
    Forgotten(ForgottenData),
}

impl EventValue {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            EventValue::Json(value) => Some(value),
            EventValue::Forgotten(_) => None,
        }
    }

    pub fn is_forgotten(&self) -> bool {
        matches!(self, EventValue::Forgotten(_))
    }

    /// 退化为普通 JSON 值；标记以其展示文本表示
    pub fn to_plain_value(&self) -> Value {
        match self {
            EventValue::Json(value) => value.clone(),
            EventValue::Forgotten(forgotten) => Value::String(forgotten.text().to_string()),
        }
    }
}

impl From<Value> for EventValue {
    fn from(value: Value) -> Self {
        EventValue::Json(value)
    }
}

impl From<ForgottenData> for EventValue {
    fn from(forgotten: ForgottenData) -> Self {
        EventValue::Forgotten(forgotten)
    }
}

impl From<&str> for EventValue {
    fn from(value: &str) -> Self {
        EventValue::Json(Value::String(value.to_string()))
    }
}

impl From<String> for EventValue {
    fn from(value: String) -> Self {
        EventValue::Json(Value::String(value))
    }
}

impl From<bool> for EventValue {
    fn from(value: bool) -> Self {
        EventValue::Json(Value::Bool(value))
    }
}

impl From<i64> for EventValue {
    fn from(value: i64) -> Self {
        EventValue::Json(Value::from(value))
    }
}

impl From<f64> for EventValue {
    fn from(value: f64) -> Self {
        EventValue::Json(Value::from(value))
    }
}

impl Serialize for EventValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_plain_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for EventValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(EventValue::Json(Value::deserialize(deserializer)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn forgotten_data_compares_equal_regardless_of_text() {
        let default = ForgottenData::default();
        let custom = ForgottenData::new("Key is forgotten");
        assert_eq!(default, custom);
        assert_eq!(
            EventValue::from(default.clone()),
            EventValue::from(custom.clone())
        );
        // 展示文本各自保留
        assert_eq!(default.to_string(), "FORGOTTEN_DATA");
        assert_eq!(custom.to_string(), "Key is forgotten");
    }

    #[test]
    fn forgotten_marker_never_equals_plain_value() {
        let marker = EventValue::from(ForgottenData::default());
        assert_ne!(marker, EventValue::from("FORGOTTEN_DATA"));
    }

    #[test]
    fn serializes_marker_as_its_text() {
        let marker = EventValue::from(ForgottenData::new("gone"));
        assert_eq!(serde_json::to_value(&marker).unwrap(), json!("gone"));
    }

    #[test]
    fn deserializes_into_plain_json_value() {
        let value: EventValue = serde_json::from_value(json!({"a": 1})).unwrap();
        assert_eq!(value, EventValue::from(json!({"a": 1})));
    }
}
