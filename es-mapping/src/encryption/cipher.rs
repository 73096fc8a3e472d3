//! 对称加密原语（可插拔能力）
//!
//! 契约：IV 对同一密钥永不复用（每次加密取新随机 IV）；密文加 IV 在
//! 正确密钥下充分且必要地还原明文；错误密钥下的解密必须显式失败。
//! 默认实现为 AES-256-GCM，认证失败即解密失败。
//!
use crate::error::{MappingError, MappingResult};
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;

/// 密钥长度（字节）
pub const KEY_BYTES: usize = 32;

/// IV（nonce）长度（字节）
pub const IV_BYTES: usize = 12;

pub trait Cipher: Send + Sync {
    fn generate_key(&self) -> Vec<u8>;

    fn random_iv(&self) -> Vec<u8>;

    fn encrypt(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> MappingResult<Vec<u8>>;

    fn decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> MappingResult<Vec<u8>>;
}

/// 默认加密原语：AES-256-GCM
#[derive(Debug, Clone, Copy, Default)]
pub struct Aes256GcmCipher;

impl Cipher for Aes256GcmCipher {
    fn generate_key(&self) -> Vec<u8> {
        let mut key = vec![0u8; KEY_BYTES];
        rand::rng().fill_bytes(&mut key);
        key
    }

    fn random_iv(&self) -> Vec<u8> {
        let mut iv = vec![0u8; IV_BYTES];
        rand::rng().fill_bytes(&mut iv);
        iv
    }

    fn encrypt(&self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> MappingResult<Vec<u8>> {
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| MappingError::Encryption {
            reason: "invalid key length".to_string(),
        })?;
        cipher
            .encrypt(Nonce::from_slice(iv), plaintext)
            .map_err(|_| MappingError::Encryption {
                reason: "encryption failed".to_string(),
            })
    }

    fn decrypt(&self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> MappingResult<Vec<u8>> {
        if iv.len() != IV_BYTES {
            return Err(MappingError::Encryption {
                reason: format!("invalid iv length: {}", iv.len()),
            });
        }
        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| MappingError::Encryption {
            reason: "invalid key length".to_string(),
        })?;
        cipher
            .decrypt(Nonce::from_slice(iv), ciphertext)
            .map_err(|_| MappingError::Encryption {
                reason: "decryption failed".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypts_and_decrypts() {
        let cipher = Aes256GcmCipher;
        let key = cipher.generate_key();
        let iv = cipher.random_iv();
        let ciphertext = cipher.encrypt(&key, &iv, b"test@example.com").unwrap();
        assert_ne!(ciphertext.as_slice(), b"test@example.com".as_slice());
        let plaintext = cipher.decrypt(&key, &iv, &ciphertext).unwrap();
        assert_eq!(plaintext, b"test@example.com");
    }

    #[test]
    fn wrong_key_fails_authentication() {
        let cipher = Aes256GcmCipher;
        let key = cipher.generate_key();
        let other = cipher.generate_key();
        let iv = cipher.random_iv();
        let ciphertext = cipher.encrypt(&key, &iv, b"secret").unwrap();
        assert!(cipher.decrypt(&other, &iv, &ciphertext).is_err());
    }

    #[test]
    fn rejects_malformed_iv() {
        let cipher = Aes256GcmCipher;
        let key = cipher.generate_key();
        assert!(cipher.decrypt(&key, &[0u8; 4], b"junk").is_err());
    }
}
