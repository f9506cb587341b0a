use crate::rsa::{PrivateKey, PublicKey};
use crate::{CipherError, Sign, Verify};
use crypto_hash::HasherType;
use num_bigint::BigUint;
use num_traits::Num;

/// 以哈希函数`hasher`计算消息摘要, 再用公钥验证签名`s^e mod n == H(m) mod n`.
pub struct RSAVerify {
    key: PublicKey,
    hasher: HasherType,
}

/// 以哈希函数`hasher`计算消息摘要, 签名`s = H(m)^d mod n`.
pub struct RSASign {
    key: PrivateKey,
    hasher: HasherType,
}

impl AsRef<PublicKey> for RSAVerify {
    fn as_ref(&self) -> &PublicKey {
        &self.key
    }
}

impl AsRef<PrivateKey> for RSASign {
    fn as_ref(&self) -> &PrivateKey {
        &self.key
    }
}

// 摘要按书写顺序解释为大整数, 与解析摘要的十六进制字符串相同
fn digest_as_biguint(hasher: HasherType, msg: &[u8]) -> BigUint {
    BigUint::from_bytes_be(hasher.digest(msg).as_slice())
}

impl RSAVerify {
    pub fn new(key: PublicKey, hasher: HasherType) -> Self {
        Self { key, hasher }
    }

    /// 解析十六进制签名, 不含`0x`前缀, 大小写均可
    pub fn parse_signature(sign: &str) -> Result<BigUint, CipherError> {
        if sign.is_empty() || !sign.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CipherError::MalformedSignature(sign.to_string()));
        }

        BigUint::from_str_radix(sign, 16)
            .map_err(|_| CipherError::MalformedSignature(sign.to_string()))
    }
}

impl RSASign {
    pub fn new(key: PrivateKey, hasher: HasherType) -> Self {
        Self { key, hasher }
    }
}

impl Sign for RSASign {
    /// 签名为不定长的小写十六进制文本, 不补齐到模数的宽度
    fn sign(&self, msg: &[u8]) -> Result<String, CipherError> {
        let h = digest_as_biguint(self.hasher, msg);
        let s = self.key.apply(&h);
        Ok(format!("{:x}", s))
    }
}

impl Verify for RSAVerify {
    fn verify(&self, msg: &[u8], sign: &str) -> Result<bool, CipherError> {
        let s = Self::parse_signature(sign)?;
        let h = digest_as_biguint(self.hasher, msg) % self.key.modulus();
        let u = self.key.apply(&s);

        Ok(h == u)
    }
}

#[cfg(test)]
mod tests {
    use crate::rsa::{PrivateKey, PublicKey, RSAKeyPair, RSASign, RSAVerify};
    use crate::{CipherError, DefaultRand, Sign, Verify};
    use crypto_hash::HasherType;
    use num_bigint::BigUint;

    fn textbook_key() -> (PublicKey, PrivateKey) {
        // p = 61, q = 53, e = 17, d = 2753
        let n = BigUint::from(3233u32);
        (
            PublicKey::new_uncheck(BigUint::from(17u32), n.clone()),
            PrivateKey::new_uncheck(BigUint::from(2753u32), n),
        )
    }

    #[test]
    fn sign_textbook_key() {
        let (pk, sk) = textbook_key();
        let n = pk.modulus().clone();

        // 摘要大于模数时实际签名的是H(m) mod n
        let h = BigUint::parse_bytes(b"900150983cd24fb0d6963f7d28e17f72", 16).unwrap() % &n;
        let sig = RSASign::new(sk, HasherType::MD5).sign(b"abc").unwrap();
        assert_eq!(sig, format!("{:x}", h.modpow(&BigUint::from(2753u32), &n)));

        let s = BigUint::parse_bytes(sig.as_bytes(), 16).unwrap();
        assert_eq!(s.modpow(&BigUint::from(17u32), &n), h);

        let verifier = RSAVerify::new(pk, HasherType::MD5);
        assert!(verifier.verify(b"abc", &sig).unwrap());
        assert!(verifier.verify(b"abc", &sig.to_uppercase()).unwrap());
    }

    #[test]
    fn sign_verify_round_trip() {
        let mut rng = DefaultRand::default();
        let msgs = [
            "",
            "a",
            "hello world",
            "The quick brown fox jumps over the lazy dog",
            "消息摘要",
        ];

        for bits_len in [8usize, 32, 64, 128] {
            let (pk, sk) = RSAKeyPair::generate(bits_len, 5, &mut rng)
                .unwrap()
                .into_keys();
            for hasher in [HasherType::MD4, HasherType::MD5] {
                let (signer, verifier) = (
                    RSASign::new(sk.clone(), hasher),
                    RSAVerify::new(pk.clone(), hasher),
                );
                for msg in msgs {
                    let sig = signer.sign(msg.as_bytes()).unwrap();
                    assert!(!sig.starts_with("0x"));
                    assert!(
                        verifier.verify(msg.as_bytes(), &sig).unwrap(),
                        "case => {bits_len}, {hasher}, {msg}"
                    );
                }
            }
        }
    }

    #[test]
    fn verify_tampered() {
        let mut rng = DefaultRand::default();
        let (pk, sk) = RSAKeyPair::generate(64, 5, &mut rng).unwrap().into_keys();
        let (signer, verifier) = (
            RSASign::new(sk, HasherType::MD5),
            RSAVerify::new(pk.clone(), HasherType::MD5),
        );

        let msg = b"transfer 100 coins to alice".to_vec();
        let sig = signer.sign(&msg).unwrap();
        assert!(verifier.verify(&msg, &sig).unwrap());

        for i in 0..(msg.len() * 8) {
            let mut tampered = msg.clone();
            tampered[i >> 3] ^= 1 << (i & 7);
            assert!(!verifier.verify(&tampered, &sig).unwrap(), "case => bit {i}");
        }

        // 不同的哈希函数或不同的公钥
        assert!(!RSAVerify::new(pk, HasherType::MD4).verify(&msg, &sig).unwrap());
        let (other, _) = RSAKeyPair::generate(64, 5, &mut rng).unwrap().into_keys();
        assert!(!RSAVerify::new(other, HasherType::MD5).verify(&msg, &sig).unwrap());
    }

    #[test]
    fn verify_malformed_signature() {
        let (pk, _) = textbook_key();
        let verifier = RSAVerify::new(pk, HasherType::MD5);
        for sig in ["", "0x1f", "xyz", "12 34", "+12", "1_2", "-1"] {
            assert!(
                matches!(
                    verifier.verify(b"abc", sig),
                    Err(CipherError::MalformedSignature(_))
                ),
                "case => {sig:?}"
            );
        }
    }
}
