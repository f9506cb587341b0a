use crate::key::read_key;
use crate::MyError;
use cipher::rsa::{PrivateKey, PublicKey, RSASign, RSAVerify};
use cipher::{Sign, Verify};
use crypto_hash::HasherType;
use std::io::ErrorKind;
use std::path::Path;

/// 对文本消息的UTF-8编码签名, 返回十六进制签名
pub fn sign(message: &str, key: &PrivateKey, alg: HasherType) -> Result<String, MyError> {
    Ok(RSASign::new(key.clone(), alg).sign(message.as_bytes())?)
}

/// 验证十六进制签名`signature`, 签名文本不合法时返回错误
pub fn verify(
    message: &str,
    signature: &str,
    key: &PublicKey,
    alg: HasherType,
) -> Result<bool, MyError> {
    Ok(RSAVerify::new(key.clone(), alg).verify(message.as_bytes(), signature)?)
}

fn read_text(path: &Path) -> Result<String, MyError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::InvalidData {
            MyError::NotUtf8(path.to_path_buf())
        } else {
            MyError::io(path, e)
        }
    })
}

/// 读取文本消息文件`message`和私钥文件`key`, 将签名写入`signature`文件并返回签名
pub fn sign_file<P, Q, S>(message: P, key: Q, signature: S, alg: HasherType) -> Result<String, MyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<Path>,
{
    let msg = read_text(message.as_ref())?;
    let key: PrivateKey = read_key(key)?;
    let sig = sign(&msg, &key, alg)?;

    let signature = signature.as_ref();
    std::fs::write(signature, sig.as_bytes()).map_err(|e| MyError::io(signature, e))?;
    log::debug!("save {alg} signature to `{}`", signature.display());

    Ok(sig)
}

/// 读取文本消息文件`message`, 签名文件`signature`和公钥文件`key`, 验证签名
pub fn verify_file<P, Q, S>(message: P, signature: Q, key: S, alg: HasherType) -> Result<bool, MyError>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    S: AsRef<Path>,
{
    let msg = read_text(message.as_ref())?;
    let sig = read_text(signature.as_ref())?;
    let key: PublicKey = read_key(key)?;

    verify(&msg, sig.trim(), &key, alg)
}
