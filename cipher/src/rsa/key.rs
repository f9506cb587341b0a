//! RSA密钥及其文本格式:
//!
//! ```text
//! -----BEGIN RSAKeyPublic KEY-----
//! <十进制指数>
//! <十进制模数>
//! <密钥标识, 不存在时为None>
//! -----END RSAKeyPublic KEY-----
//! ```
//!
//! 私钥的类型名为`RSAKeyPrivate`. 读取时需事先指定期望的密钥类型.

use crate::CipherError;
use num_bigint::BigUint;
use num_traits::{Num, Zero};
use std::fmt::{Debug, Display, Formatter};
use std::fs::{self, File, OpenOptions};
use std::hash::Hash;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

// 文本格式中表示无标识的字面量
const NONE_ID: &str = "None";

/// 区分公钥和私钥的类型标记
pub trait KeyKind: Copy + Debug + Eq + Hash {
    /// 密钥文件头尾使用的类型名
    const NAME: &'static str;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Public;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Private;

impl KeyKind for Public {
    const NAME: &'static str = "RSAKeyPublic";
}

impl KeyKind for Private {
    const NAME: &'static str = "RSAKeyPrivate";
}

/// 密钥标识: 非空, 单行, 首尾不含空白字符, 且不能是字面量`None`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyId(String);

impl KeyId {
    pub fn new<S: Into<String>>(id: S) -> Result<Self, CipherError> {
        let id = id.into();
        if id.is_empty()
            || id.trim() != id
            || id.contains(['\n', '\r'])
            || id == NONE_ID
        {
            Err(CipherError::InvalidKeyId(id))
        } else {
            Ok(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for KeyId {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for KeyId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Display for KeyId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// RSA密钥`(exponent, modulus)`, 公钥和私钥结构相同, 以类型参数`K`区分.
///
/// 相等比较只比较指数和模数, 不比较标识.
#[derive(Clone, Debug)]
pub struct RSAKey<K: KeyKind> {
    exp: BigUint,
    n: BigUint,
    id: Option<KeyId>,
    kind: PhantomData<K>,
}

/// 公钥`(e, n)`
pub type PublicKey = RSAKey<Public>;
/// 私钥`(d, n)`
pub type PrivateKey = RSAKey<Private>;

impl<K: KeyKind> RSAKey<K> {
    /// note: not to check the `exp` and `n` are right RSA parameters
    pub fn new_uncheck(exp: BigUint, n: BigUint) -> Self {
        Self {
            exp,
            n,
            id: None,
            kind: PhantomData,
        }
    }

    pub fn with_id(mut self, id: KeyId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn set_id(&mut self, id: Option<KeyId>) {
        self.id = id;
    }

    pub fn id(&self) -> Option<&KeyId> {
        self.id.as_ref()
    }

    /// 公钥为e, 私钥为d
    pub fn exponent(&self) -> &BigUint {
        &self.exp
    }

    /// n
    pub fn modulus(&self) -> &BigUint {
        &self.n
    }

    /// $m^{exp} \mod n$
    pub(crate) fn apply(&self, m: &BigUint) -> BigUint {
        utils::BigUintExt(m).mod_exp(&self.exp, &self.n)
    }

    fn header() -> String {
        format!("-----BEGIN {} KEY-----", K::NAME)
    }

    fn footer() -> String {
        format!("-----END {} KEY-----", K::NAME)
    }

    /// 生成密钥的文本格式, 以换行结尾
    pub fn to_text(&self) -> String {
        format!(
            "{}\n{}\n{}\n{}\n{}\n",
            Self::header(),
            self.exp,
            self.n,
            self.id.as_ref().map_or(NONE_ID, |id| id.as_str()),
            Self::footer()
        )
    }

    /// 解析`to_text`生成的文本, 文件头尾的类型名必须与`K`匹配.
    pub fn from_text(s: &str) -> Result<Self, CipherError> {
        let mut lines = s.lines().collect::<Vec<_>>();
        while lines.last().is_some_and(|l| l.trim().is_empty()) {
            lines.pop();
        }

        let [header, exp, n, id, footer] = lines.as_slice() else {
            return Err(CipherError::MalformedKey(format!(
                "expect 5 lines, but found {} lines",
                lines.len()
            )));
        };

        if *header != Self::header() {
            return Err(Self::mismatch_or_malformed(header, "BEGIN"));
        }
        if *footer != Self::footer() {
            return Err(Self::mismatch_or_malformed(footer, "END"));
        }

        let (exp, n) = (Self::parse_decimal(exp)?, Self::parse_decimal(n)?);
        // n = p * q不会小于2, 指数也不会为0
        if n < BigUint::from(2u8) {
            return Err(CipherError::MalformedKey(format!(
                "modulus `{n}` must be at least 2"
            )));
        }
        if exp.is_zero() {
            return Err(CipherError::MalformedKey("exponent must not be 0".to_string()));
        }

        let id = if *id == NONE_ID {
            None
        } else {
            Some(KeyId::new(*id).map_err(|e| CipherError::MalformedKey(e.to_string()))?)
        };

        Ok(Self {
            exp,
            n,
            id,
            kind: PhantomData,
        })
    }

    // 另一种密钥的头尾说明读取时指定了错误的类型
    fn mismatch_or_malformed(line: &str, tag: &str) -> CipherError {
        let kind = line
            .strip_prefix(&format!("-----{tag} "))
            .and_then(|x| x.strip_suffix(" KEY-----"));
        match kind {
            Some(kind) if !kind.is_empty() => CipherError::KeyKindMismatch {
                expected: K::NAME,
                found: kind.to_string(),
            },
            _ => CipherError::MalformedKey(format!("invalid {tag} line `{line}`")),
        }
    }

    fn parse_decimal(s: &str) -> Result<BigUint, CipherError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CipherError::MalformedKey(format!(
                "`{s}` is not a decimal integer"
            )));
        }

        BigUint::from_str_radix(s, 10).map_err(|e| CipherError::MalformedKey(e.to_string()))
    }

    /// 将密钥保存到新文件`path`中, 不会覆盖已存在的文件.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), CipherError> {
        let path = path.as_ref();
        log::debug!("save {} key to `{}`", K::NAME, path.display());

        write_new_file(path, |f| f.write_all(self.to_text().as_bytes())).map_err(|err| {
            CipherError::Io {
                path: path.to_path_buf(),
                err,
            }
        })
    }

    /// 从文件`path`中读取`K`类型的密钥
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, CipherError> {
        let path = path.as_ref();
        log::debug!("read {} key from `{}`", K::NAME, path.display());

        let s = fs::read_to_string(path).map_err(|err| CipherError::Io {
            path: path.to_path_buf(),
            err,
        })?;
        Self::from_text(&s)
    }
}

// 创建新文件并写入, 写入失败时删除该文件, 不留下残缺的密钥文件
fn write_new_file<F>(path: &Path, write: F) -> std::io::Result<()>
where
    F: FnOnce(&mut File) -> std::io::Result<()>,
{
    let mut f = OpenOptions::new().write(true).create_new(true).open(path)?;
    if let Err(err) = write(&mut f) {
        drop(f);
        if let Err(e) = fs::remove_file(path) {
            log::warn!("remove incomplete file `{}` failed, {e}", path.display());
        }
        return Err(err);
    }

    Ok(())
}

impl<K: KeyKind> PartialEq for RSAKey<K> {
    fn eq(&self, other: &Self) -> bool {
        self.exp == other.exp && self.n == other.n
    }
}

impl<K: KeyKind> Eq for RSAKey<K> {}

/// 与`to_text`相同
impl<K: KeyKind> Display for RSAKey<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl<K: KeyKind> FromStr for RSAKey<K> {
    type Err = CipherError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
