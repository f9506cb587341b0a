use std::{error::Error, fmt::Display, path::PathBuf};

#[derive(Debug)]
pub enum HashError {
    /// 实际字节长度`real`和目标字节长度`target`不匹配
    MismatchingByteLen { target: usize, real: usize },

    /// 不支持的哈希算法名称或标识
    UnknownAlgorithm(String),

    /// 读取文件`path`失败
    Io { path: PathBuf, err: std::io::Error },
}

impl Display for HashError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashError::MismatchingByteLen { target, real } => f.write_fmt(format_args!(
                "real byte length `{real}` not match to target byte length `{target}`"
            )),
            HashError::UnknownAlgorithm(s) => {
                f.write_fmt(format_args!("`{s}` is not a supported hash algorithm"))
            }
            HashError::Io { path, err } => {
                f.write_fmt(format_args!("read `{}` failed, {err}", path.display()))
            }
        }
    }
}

impl Error for HashError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            HashError::Io { err, .. } => Some(err),
            _ => None,
        }
    }
}
