use crate::{MdConfig, MyError};
use crypto_hash::HasherType;
use std::path::Path;

fn to_hex(digest: &[u8]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// 内存中消息的摘要, 32个字符的小写十六进制字符串
pub fn hash(data: &[u8], alg: HasherType) -> String {
    to_hex(&alg.digest(data))
}

/// 流式计算文件的摘要, 每次读取`MdConfig::io_buf_size`字节
pub fn hash_file<P: AsRef<Path>>(path: P, alg: HasherType) -> Result<String, MyError> {
    let page_size = MdConfig::config()?.io_buf_size;
    Ok(to_hex(&alg.digest_file(path, page_size)?))
}

/// 计算文件`message`的摘要并写入`checksum`文件, 返回摘要
pub fn save_checksum<P: AsRef<Path>, Q: AsRef<Path>>(
    message: P,
    checksum: Q,
    alg: HasherType,
) -> Result<String, MyError> {
    let digest = hash_file(message, alg)?;

    let checksum = checksum.as_ref();
    std::fs::write(checksum, digest.as_bytes()).map_err(|e| MyError::io(checksum, e))?;
    log::debug!("save {alg} checksum to `{}`", checksum.display());

    Ok(digest)
}

#[cfg(test)]
mod tests {
    use super::{hash, hash_file, save_checksum};
    use crate::{HasherType, MyError};

    #[test]
    fn hash_known_vectors() {
        let cases = [
            ("", HasherType::MD4, "31d6cfe0d16ae931b73c59d7e0c089c0"),
            ("abc", HasherType::MD4, "a448017aaf21d8525fc10ae87aa6729d"),
            ("", HasherType::MD5, "d41d8cd98f00b204e9800998ecf8427e"),
            ("abc", HasherType::MD5, "900150983cd24fb0d6963f7d28e17f72"),
        ];

        for (msg, alg, tgt) in cases {
            assert_eq!(hash(msg.as_bytes(), alg), tgt, "case => {alg}({msg})");
        }
    }

    #[test]
    fn hash_file_and_checksum() {
        let dir = tempfile::tempdir().unwrap();
        let data = (0..10000u32).map(|x| (x % 251) as u8).collect::<Vec<_>>();
        let (msg, sum) = (dir.path().join("msg.bin"), dir.path().join("msg.md5"));
        std::fs::write(&msg, &data).unwrap();

        for alg in [HasherType::MD4, HasherType::MD5] {
            assert_eq!(hash_file(&msg, alg).unwrap(), hash(&data, alg), "case => {alg}");
        }

        let digest = save_checksum(&msg, &sum, HasherType::MD5).unwrap();
        assert_eq!(digest.len(), 32);
        assert_eq!(std::fs::read_to_string(&sum).unwrap(), digest);

        assert!(matches!(
            hash_file(dir.path().join("missing"), HasherType::MD5),
            Err(MyError::Hash(_))
        ));
    }
}
