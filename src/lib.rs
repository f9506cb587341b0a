//! MD4/MD5消息摘要, 以及基于它们的教学用RSA签名.
//!
//! 外部调用者(图形界面或命令行)只需要使用本crate导出的函数: 计算字节串或文件的摘要, 生成/保存/读取RSA密钥,
//! 以及对文本消息签名和验证签名.

mod error;
pub use error::MyError;

mod config;
pub use self::config::MdConfig;

mod digest;
pub use digest::{hash, hash_file, save_checksum};

mod key;
pub use key::{generate_default_keypair, generate_keypair, read_key, save_key, save_keypair};

mod sign;
pub use sign::{sign, sign_file, verify, verify_file};

pub use cipher::rsa::{KeyId, PrivateKey, PublicKey, RSAKey, RSAKeyPair};
pub use crypto_hash::HasherType;
