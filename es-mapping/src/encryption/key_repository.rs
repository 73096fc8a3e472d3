//! 密钥仓储（可插拔能力）
//!
//! 主体 ID → 密钥的唯一共享可变状态。`create` 总是生成新密钥并覆盖映射：
//! 旧密钥随之不可达，其密文永久不可读 —— 这是 crypto-shredding 正确性的
//! 显式契约，不是实现巧合。所有操作同步返回 `Result`，持久化实现的存储
//! 失败必须同步暴露；重试策略归调用方。
//!
use super::{Aes256GcmCipher, Cipher, EncryptionKey};
use crate::error::MappingResult;
use dashmap::DashMap;
use std::sync::Arc;

pub trait EncryptionKeyRepository: Send + Sync {
    /// 为主体创建并登记一把新密钥（总是覆盖，显式、可审计的动作）
    fn create(&self, subject_id: &str) -> MappingResult<EncryptionKey>;

    /// 查询主体当前密钥；已遗忘的主体返回 `None`
    fn key_of(&self, subject_id: &str) -> MappingResult<Option<EncryptionKey>>;

    /// 移除主体的密钥映射；不触碰任何已产生的密文
    fn forget(&self, subject_id: &str) -> MappingResult<()>;
}

impl<T> EncryptionKeyRepository for Arc<T>
where
    T: EncryptionKeyRepository + ?Sized,
{
    fn create(&self, subject_id: &str) -> MappingResult<EncryptionKey> {
        (**self).create(subject_id)
    }

    fn key_of(&self, subject_id: &str) -> MappingResult<Option<EncryptionKey>> {
        (**self).key_of(subject_id)
    }

    fn forget(&self, subject_id: &str) -> MappingResult<()> {
        (**self).forget(subject_id)
    }
}

/// 进程内密钥仓储
///
/// 并发安全：分片锁保证同一主体上 create/key_of/forget 的原子可见性。
pub struct InMemoryEncryptionKeyRepository {
    cipher: Arc<dyn Cipher>,
    keys: DashMap<String, EncryptionKey>,
}

impl InMemoryEncryptionKeyRepository {
    pub fn new() -> Self {
        Self::with_cipher(Arc::new(Aes256GcmCipher))
    }

    pub fn with_cipher(cipher: Arc<dyn Cipher>) -> Self {
        Self {
            cipher,
            keys: DashMap::new(),
        }
    }
}

impl Default for InMemoryEncryptionKeyRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl EncryptionKeyRepository for InMemoryEncryptionKeyRepository {
    fn create(&self, subject_id: &str) -> MappingResult<EncryptionKey> {
        let key = EncryptionKey::generate(self.cipher.clone());
        self.keys.insert(subject_id.to_string(), key.clone());
        tracing::debug!(subject_id, "encryption key created");
        Ok(key)
    }

    fn key_of(&self, subject_id: &str) -> MappingResult<Option<EncryptionKey>> {
        Ok(self.keys.get(subject_id).map(|entry| entry.value().clone()))
    }

    fn forget(&self, subject_id: &str) -> MappingResult<()> {
        let removed = self.keys.remove(subject_id).is_some();
        tracing::debug!(subject_id, removed, "encryption key forgotten");
        Ok(())
    }
}
