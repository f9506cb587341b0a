use crate::{Digest, DigestX, HashError, MD4, MD5};
use std::convert::TryFrom;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

macro_rules! impl_hasher_type {
    ($NAME: ident, $([$ITEM: ident $(=$VAL: literal)?, $STR: literal]),+) => {
        /// 运行时可选的哈希算法
        #[repr(u32)]
        #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
        pub enum $NAME {
            $($ITEM $(=$VAL)?,)+
        }

        impl $NAME {
            pub const ALL: &'static [$NAME] = &[$(Self::$ITEM,)+];

            pub const fn name(&self) -> &'static str {
                match self {
                    $(Self::$ITEM => $STR,)+
                }
            }
        }

        impl TryFrom<u32> for $NAME {
            type Error = HashError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                match value {
                    $(x if x == Self::$ITEM as u32 => Ok(Self::$ITEM),)+
                    _ => Err(HashError::UnknownAlgorithm(format!("{value:#x}"))),
                }
            }
        }

        /// 忽略大小写
        impl FromStr for $NAME {
            type Err = HashError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($STR) {
                    return Ok(Self::$ITEM);
                })+

                Err(HashError::UnknownAlgorithm(s.to_string()))
            }
        }

        impl Display for $NAME {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.name())
            }
        }

        #[cfg(test)]
        mod tests {
            use super::$NAME;
            use crate::DigestX;

            #[test]
            fn check_hasher_type_repeat() {
                let mut x = [$($NAME::$ITEM as u64,)+].to_vec();
                x.sort();
                let len1 = x.len();
                x.dedup();
                assert_eq!(len1, x.len());
            }

            #[test]
            fn hasher_type_parse() {
                for &h in $NAME::ALL {
                    assert_eq!(h.to_string().parse::<$NAME>().unwrap(), h);
                    assert_eq!(h.name().to_lowercase().parse::<$NAME>().unwrap(), h);
                    assert_eq!($NAME::try_from(h as u32).unwrap(), h);
                }
                assert!("sha1".parse::<$NAME>().is_err());
                assert!($NAME::try_from(0u32).is_err());
            }

            #[test]
            fn hasher_type_digest() {
                let cases = [
                    ($NAME::MD4, "a448017aaf21d8525fc10ae87aa6729d"),
                    ($NAME::MD5, "900150983cd24fb0d6963f7d28e17f72"),
                ];
                for (h, tgt) in cases {
                    let mut hasher = h.build();
                    hasher.write_x(b"ab");
                    hasher.write_x(b"c");
                    let out = hasher.finish_x();
                    let hex = out.iter().map(|b| format!("{b:02x}")).collect::<String>();
                    assert_eq!(hex, tgt, "case => {h}");
                    assert_eq!(h.digest(b"abc"), out, "case => {h}");
                    assert_eq!(hasher.digest_bits_x(), 128);
                    assert_eq!(hasher.block_bits_x(), 512);
                }
            }
        }
    };
}

impl_hasher_type!(HasherType, [MD4 = 0x10, "MD4"], [MD5, "MD5"]);

impl HasherType {
    pub fn build(&self) -> Box<dyn DigestX> {
        match self {
            HasherType::MD4 => Box::new(MD4::new()),
            HasherType::MD5 => Box::new(MD5::new()),
        }
    }

    /// 计算内存中消息的摘要
    pub fn digest(&self, msg: &[u8]) -> Vec<u8> {
        match self {
            HasherType::MD4 => MD4::digest(msg).into(),
            HasherType::MD5 => MD5::digest(msg).into(),
        }
    }

    /// 以`page_size`字节为单位流式计算文件摘要
    pub fn digest_file<P: AsRef<Path>>(&self, path: P, page_size: usize) -> Result<Vec<u8>, HashError> {
        let out = match self {
            HasherType::MD4 => MD4::digest_file(path, page_size)?.into(),
            HasherType::MD5 => MD5::digest_file(path, page_size)?.into(),
        };

        Ok(out)
    }
}
