use crate::{Digest, HashError};
use num_bigint::BigUint;
use std::{
    fmt::{Display, LowerHex, UpperHex},
    marker::PhantomData,
};
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

/// 消息哈希摘要输出, 创建后不可修改.
///
/// MD4/MD5的摘要按寄存器A, B, C, D的小端序字节依次拼接存储, 即摘要十六进制字符串的书写顺序.
#[derive(Debug)]
pub struct Output<T: ?Sized> {
    // Output是由哈希算法生成, 由实现算法保证`self.len() == Self::bytes()`
    pub(crate) data: Vec<u8>,
    pub(crate) digest: PhantomData<T>,
}

impl<T> Output<T> {
    pub(crate) const fn from_vec(digest: Vec<u8>) -> Self {
        Self {
            data: digest,
            digest: PhantomData,
        }
    }

    /// 字节长度
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 将摘要按书写顺序(大端序)解释为一个大整数, 与解析其十六进制字符串的结果相同.
    pub fn to_biguint(&self) -> BigUint {
        BigUint::from_bytes_be(self.as_ref())
    }

    /// 小写十六进制字符串, 不含`0x`前缀, 长度固定为`2 * self.len()`
    pub fn to_hex(&self) -> String {
        format!("{:x}", self)
    }
}

impl<T: Digest> Output<T> {
    /// 字节长度
    pub const fn bytes() -> usize {
        (<T>::DIGEST_BITS + 7) >> 3
    }

    /// 位长度
    pub const fn bits() -> usize {
        <T>::DIGEST_BITS
    }
}

impl<T> Clone for Output<T> {
    fn clone(&self) -> Self {
        Self::from_vec(self.data.clone())
    }
}

impl<T> PartialEq for Output<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T> Eq for Output<T> {}

#[cfg(feature = "sec-zeroize")]
impl<T: Digest> Zeroize for Output<T> {
    fn zeroize(&mut self) {
        self.data.zeroize();
    }
}

impl<T> AsRef<[u8]> for Output<T> {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

/// `N`必须和`Output.len()`匹配, 否则会返回`HashError`.
impl<T: Digest, const N: usize> TryFrom<Output<T>> for [u8; N] {
    type Error = HashError;

    fn try_from(value: Output<T>) -> Result<Self, Self::Error> {
        if N != Output::<T>::bytes() {
            Err(HashError::MismatchingByteLen {
                target: N,
                real: Output::<T>::bytes(),
            })
        } else {
            let mut arr = [0u8; N];
            arr.copy_from_slice(value.as_ref());

            Ok(arr)
        }
    }
}

impl<T> From<Output<T>> for Vec<u8> {
    fn from(value: Output<T>) -> Self {
        value.data
    }
}

/// 与`LowerHex`相同
impl<T> Display for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        LowerHex::fmt(self, f)
    }
}

impl<T> LowerHex for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        for &b in self.as_ref() {
            f.write_fmt(format_args!("{:02x}", b))?;
        }

        Ok(())
    }
}

impl<T> UpperHex for Output<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            f.write_str("0X")?;
        }
        for &b in self.as_ref() {
            f.write_fmt(format_args!("{:02X}", b))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Digest, HashError, Output, MD5};

    #[test]
    fn output_format() {
        let out = MD5::digest(b"abc");
        assert_eq!(out.len(), Output::<MD5>::bytes());
        assert_eq!(Output::<MD5>::bits(), 128);
        assert_eq!(format!("{out}"), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(format!("{out:#x}"), "0x900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(format!("{out:X}"), "900150983CD24FB0D6963F7D28E17F72");
        assert_eq!(out.to_hex(), format!("{out:x}"));
    }

    #[test]
    fn output_to_biguint() {
        // 前导0字节不影响数值
        let out = MD5::digest(b"");
        let n = out.to_biguint();
        assert_eq!(format!("{n:032x}"), out.to_hex());
    }

    #[test]
    fn output_to_array() {
        let out = MD5::digest(b"a");
        let arr: [u8; 16] = out.clone().try_into().unwrap();
        assert_eq!(arr.as_slice(), out.as_ref());

        let short: Result<[u8; 8], HashError> = out.try_into();
        assert!(matches!(
            short,
            Err(HashError::MismatchingByteLen { target: 8, real: 16 })
        ));
    }
}
