//! 事件记录映射层（es-mapping）
//!
//! 事件溯源持久化的记录转换核心：在类型化领域事件与存储中立的序列化记录之间
//! 双向转换，并通过“按主体字段级加密”（crypto-shredding）支持 GDPR 式的
//! 被遗忘权：
//! - 领域事件与中间记录（`domain_event`、`record`）
//! - 可插拔的转换阶段与流水线（`transformation`）
//! - 主体密钥、加密模式与密钥仓储（`encryption`）
//! - 可插拔的载荷编码（`serializer`）
//! - 组合以上各层的映射器（`mapper`）
//!
//! 本 crate 不关心记录的物理存储与传输，仅定义映射层接口与最小必要的错误
//! 类型，以便在不同存储后端上进行适配实现。
//!
//! 典型用法：
//! 1. 启动时注册事件类型（`EventTypeRegistry`）与各类型的加密模式
//!    （`EncryptionSchemaRegistry`）；
//! 2. 为每个主体显式创建密钥（`EncryptionKeyRepository::create`）；
//! 3. 通过 `EncryptionMapper` 完成事件 ⇄ 序列化记录的双向转换；
//! 4. 收到抹除请求后调用 `forget`，旧密文随密钥不可达而永久不可读，
//!    读取路径以 `ForgottenData` 标记替换对应字段。
//!
pub mod domain_event;
pub mod encryption;
pub mod error;
pub mod mapper;
pub mod record;
pub mod serializer;
pub mod transformation;
