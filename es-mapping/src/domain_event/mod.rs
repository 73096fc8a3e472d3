//! 领域事件（Domain Event）
//!
//! 定义作为映射输入/输出的不可变事件值（`DomainEvent`）、其字段值表示
//! （`EventValue` 与 `ForgottenData` 标记），以及启动时注册的事件类型
//! 构造注册表（`EventTypeRegistry`）。

mod event;
mod event_value;
mod registry;

pub use event::{DomainEvent, EventData, EventMetadata};
pub use event_value::{DEFAULT_FORGOTTEN_TEXT, EventValue, ForgottenData};
pub use registry::{EventConstructor, EventTypeRegistry};
