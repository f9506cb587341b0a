mod error;
pub use error::CipherError;

pub use rand::{DefaultRand, Rand};

pub mod rsa;

/// 数字签名, 签名以十六进制文本表示
pub trait Sign {
    fn sign(&self, msg: &[u8]) -> Result<String, CipherError>;
}

/// 验证数字签名.
///
/// 签名与消息不匹配时返回`Ok(false)`, 签名文本本身不合法时返回错误.
pub trait Verify {
    fn verify(&self, msg: &[u8], sign: &str) -> Result<bool, CipherError>;
}
