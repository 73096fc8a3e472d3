use super::Cipher;
use crate::error::MappingResult;
use std::fmt;
use std::sync::Arc;

/// 主体加密密钥
///
/// 持有密钥材料与其加密原语；材料的所有权归密钥仓储，转换阶段只在单次
/// dump/load 期间借用克隆。`Debug` 不输出密钥材料。
#[derive(Clone)]
pub struct EncryptionKey {
    cipher: Arc<dyn Cipher>,
    material: Vec<u8>,
}

impl EncryptionKey {
    /// 用给定原语生成一把新密钥
    pub fn generate(cipher: Arc<dyn Cipher>) -> Self {
        let material = cipher.generate_key();
        Self { cipher, material }
    }

    /// 产生一个新的随机 IV；每次加密调用都必须取新值
    pub fn random_iv(&self) -> Vec<u8> {
        self.cipher.random_iv()
    }

    pub fn encrypt(&self, plaintext: &[u8], iv: &[u8]) -> MappingResult<Vec<u8>> {
        self.cipher.encrypt(&self.material, iv, plaintext)
    }

    pub fn decrypt(&self, ciphertext: &[u8], iv: &[u8]) -> MappingResult<Vec<u8>> {
        self.cipher.decrypt(&self.material, iv, ciphertext)
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionKey").finish_non_exhaustive()
    }
}

impl PartialEq for EncryptionKey {
    fn eq(&self, other: &Self) -> bool {
        self.material == other.material
    }
}

impl Eq for EncryptionKey {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encryption::Aes256GcmCipher;

    #[test]
    fn debug_never_prints_material() {
        let key = EncryptionKey::generate(Arc::new(Aes256GcmCipher));
        assert_eq!(format!("{key:?}"), "EncryptionKey { .. }");
    }

    #[test]
    fn two_generated_keys_differ() {
        let cipher: Arc<dyn Cipher> = Arc::new(Aes256GcmCipher);
        let a = EncryptionKey::generate(cipher.clone());
        let b = EncryptionKey::generate(cipher);
        assert_ne!(a, b);
    }
}
