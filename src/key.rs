use crate::{MdConfig, MyError};
use cipher::rsa::{KeyKind, RSAKey, RSAKeyPair};
use cipher::DefaultRand;
use std::path::{Path, PathBuf};

/// 生成素数位长度为`bits_len`的RSA密钥对, 模数约为`2 * bits_len`位
pub fn generate_keypair(bits_len: usize) -> Result<RSAKeyPair, MyError> {
    let rounds = MdConfig::config()?.prime_test_rounds;
    let mut rng = DefaultRand::default();
    Ok(RSAKeyPair::generate(bits_len, rounds, &mut rng)?)
}

/// 以`MdConfig::key_bits`生成RSA密钥对
pub fn generate_default_keypair() -> Result<RSAKeyPair, MyError> {
    generate_keypair(MdConfig::config()?.key_bits)
}

/// 将密钥保存到新文件`path`中
pub fn save_key<K: KeyKind, P: AsRef<Path>>(key: &RSAKey<K>, path: P) -> Result<(), MyError> {
    Ok(key.save(path)?)
}

/// 读取`K`类型的密钥, 文件中的密钥类型不匹配时返回错误
pub fn read_key<K: KeyKind, P: AsRef<Path>>(path: P) -> Result<RSAKey<K>, MyError> {
    Ok(RSAKey::read(path)?)
}

/// 保存为`dir/<basename>.private`和`dir/<basename>.public`, 返回两者的路径
pub fn save_keypair<P: AsRef<Path>>(
    dir: P,
    basename: &str,
    pair: &RSAKeyPair,
) -> Result<(PathBuf, PathBuf), MyError> {
    Ok(pair.save(dir, basename)?)
}
