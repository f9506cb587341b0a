use crate::NumError;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Euclid, One, Signed, Zero};
use std::borrow::Borrow;
use std::ops::Deref;

pub struct BigIntExt<T: Borrow<BigInt>>(pub T);

impl<T: Borrow<BigInt>> Deref for BigIntExt<T> {
    type Target = BigInt;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigInt>> BigIntExt<T> {
    /// 扩展欧几里得算法, 返回`(x, y)`满足`x * self + y * b = gcd(self, b)`, 其中`gcd(self, b) > 0`.
    ///
    /// 迭代计算: 维护`r_i = s_i * self + t_i * b`, 每步以`q = r_{i-1} / r_i`更新余数和系数直到余数为0.
    ///
    /// `self`和`b`同时为0时gcd无定义, 返回`NumError::UndefinedGcd`.
    pub fn extended_euclid(&self, b: &BigInt) -> Result<(BigInt, BigInt), NumError> {
        let a = self.deref();
        if a.is_zero() && b.is_zero() {
            return Err(NumError::UndefinedGcd);
        }

        let (mut r0, mut r1) = (a.clone(), b.clone());
        let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());
        let (mut t0, mut t1) = (BigInt::zero(), BigInt::one());

        while !r1.is_zero() {
            let q = &r0 / &r1;
            let r2 = &r0 - &q * &r1;
            let s2 = &s0 - &q * &s1;
            let t2 = &t0 - &q * &t1;
            (r0, r1) = (r1, r2);
            (s0, s1) = (s1, s2);
            (t0, t1) = (t1, t2);
        }

        // 负数输入时余数序列可能以负数结束
        if r0.is_negative() {
            Ok((-s0, -t0))
        } else {
            Ok((s0, t0))
        }
    }

    /// <<算法导论>>
    /// 定理31.23: 若有d=gcd(a, n), 假设对于某些整数x'和y', 有d=ax'+ny'. 如果d|b, 则方程
    /// ax=b(mod n)有一个解的值位x0, 则x0=x'(b/d) mod n;
    /// 取b=1, 当且仅当gcd(a, n)=1时存在逆元.
    ///
    /// 返回`inv`满足`self * inv = 1 \mod |modulus|`, 且`0 <= inv < |modulus|`.
    pub fn modinv(&self, modulus: &BigInt) -> Result<BigInt, NumError> {
        let n = modulus.abs();
        if n.is_zero() {
            return Err(NumError::NotInvertible);
        }

        let a = self.rem_euclid(&n);
        if !a.gcd(&n).is_one() {
            return Err(NumError::NotInvertible);
        }

        let (x, _) = BigIntExt(&a).extended_euclid(&n)?;
        Ok(x.rem_euclid(&n))
    }
}
