//! 加密能力：主体密钥、密钥仓储与加密模式
//!
//! - `Cipher`：对称加密原语（可插拔），默认 AES-256-GCM；
//! - `EncryptionKey`：绑定单个主体的密钥材料，每次调用产生新 IV；
//! - `EncryptionKeyRepository`：按主体创建/查询/遗忘密钥的能力接口，
//!   crypto-shredding 的抹除语义由“密钥不可达”实现；
//! - `EncryptionSchema`：按事件类型声明哪些负载字段加密、主体如何推导。

mod cipher;
mod key;
mod key_repository;
mod schema;

pub use cipher::{Aes256GcmCipher, Cipher, IV_BYTES, KEY_BYTES};
pub use key::EncryptionKey;
pub use key_repository::{EncryptionKeyRepository, InMemoryEncryptionKeyRepository};
pub use schema::{EncryptionSchema, EncryptionSchemaRegistry, SubjectIdFn};
