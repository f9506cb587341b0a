use crate::rsa::{KeyId, PrivateKey, PublicKey};
use crate::{CipherError, Rand};
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::One;
use std::fs;
use std::path::{Path, PathBuf};
use utils::BigUintExt;

/// 共享同一模数的公钥和私钥
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RSAKeyPair {
    pk: PublicKey,
    sk: PrivateKey,
}

impl RSAKeyPair {
    /// 生成RSA密钥对:
    /// - 生成两个不同的`bits_len`位素数$p, q$, $n = p * q$, $\phi = (p-1)(q-1)$;
    /// - 在$[2, \phi-1]$中随机选择与$\phi$互质的私钥指数$d$;
    /// - 公钥指数$e = d^{-1} \mod \phi$.
    ///
    /// `prime_test_rounds`是素数生成时Miller-Rabin测试的见证数个数. 生成的密钥不带标识.
    ///
    /// `bits_len < 3`时不存在满足条件的密钥, 返回`CipherError::InvalidBitsLen`.
    pub fn generate<R: Rand>(
        bits_len: usize,
        prime_test_rounds: usize,
        rd: &mut R,
    ) -> Result<Self, CipherError> {
        if bits_len < 3 {
            return Err(CipherError::InvalidBitsLen(bits_len));
        }

        let p = BigUintExt::<BigUint>::generate_prime(bits_len, prime_test_rounds, rd)?;
        let q = loop {
            let q = BigUintExt::<BigUint>::generate_prime(bits_len, prime_test_rounds, rd)?;
            if q != p {
                break q;
            }
            log::trace!("rsa: regenerate q that equal to p");
        };

        let n = &p * &q;
        let phi = (p - 1u32) * (q - 1u32);

        // d = 2 + [0, phi - 2)
        let range = &phi - 2u32;
        let d = loop {
            let d = BigUintExt(&range).gen_random(rd)? + 2u32;
            if d.gcd(&phi).is_one() {
                break d;
            }
            log::trace!("rsa: private exponent candidate not coprime to phi");
        };
        let e = BigUintExt(&d).modinv(&phi)?;

        log::debug!(
            "rsa: generate key pair with {bits_len}-bits primes, modulus {}-bits",
            n.bits()
        );

        Ok(Self {
            pk: PublicKey::new_uncheck(e, n.clone()),
            sk: PrivateKey::new_uncheck(d, n),
        })
    }

    /// 给公钥和私钥设置相同的标识
    pub fn with_id(self, id: KeyId) -> Self {
        Self {
            pk: self.pk.with_id(id.clone()),
            sk: self.sk.with_id(id),
        }
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.pk
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.sk
    }

    pub fn into_keys(self) -> (PublicKey, PrivateKey) {
        (self.pk, self.sk)
    }

    /// 将私钥和公钥分别保存到`dir`下的`<basename>.private`和`<basename>.public`中, 返回两者的路径.
    ///
    /// 不会覆盖已存在的文件. 私钥保存失败时不会保存公钥, 公钥保存失败时会删除已保存的私钥文件.
    pub fn save<P: AsRef<Path>>(
        &self,
        dir: P,
        basename: &str,
    ) -> Result<(PathBuf, PathBuf), CipherError> {
        let dir = dir.as_ref();
        let (sk_path, pk_path) = (
            dir.join(format!("{basename}.private")),
            dir.join(format!("{basename}.public")),
        );

        self.sk.save(&sk_path)?;
        if let Err(e) = self.pk.save(&pk_path) {
            if let Err(err) = fs::remove_file(&sk_path) {
                log::warn!("rsa: remove `{}` failed, {err}", sk_path.display());
            }
            return Err(e);
        }

        Ok((sk_path, pk_path))
    }
}

impl From<RSAKeyPair> for (PublicKey, PrivateKey) {
    fn from(value: RSAKeyPair) -> Self {
        value.into_keys()
    }
}
