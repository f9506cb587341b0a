use crate::{BigIntExt, NumError};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};
use rand::Rand;
use std::borrow::Borrow;
use std::collections::HashSet;
use std::ops::Deref;

/// 不超过809的全部140个素数, 用于小素数判定和试除
pub const SMALL_PRIMES: [u32; 140] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43,
    47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101, 103, 107,
    109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181,
    191, 193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263,
    269, 271, 277, 281, 283, 293, 307, 311, 313, 317, 331, 337, 347, 349,
    353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419, 421, 431, 433,
    439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521,
    523, 541, 547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613,
    617, 619, 631, 641, 643, 647, 653, 659, 661, 673, 677, 683, 691, 701,
    709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787, 797, 809,
];

const LARGEST_SMALL_PRIME: u32 = SMALL_PRIMES[SMALL_PRIMES.len() - 1];

pub struct BigUintExt<T: Borrow<BigUint>>(pub T);

impl<T: Borrow<BigUint>> Deref for BigUintExt<T> {
    type Target = BigUint;
    fn deref(&self) -> &Self::Target {
        self.0.borrow()
    }
}

impl<T: Borrow<BigUint>> BigUintExt<T> {
    /// 平方-乘算法计算`self^exp mod modulus`, 从指数的最高位开始处理.
    ///
    /// `exp = 0`时结果为1, `modulus = 1`时结果为0.
    ///
    /// # Panics
    ///
    /// `modulus`为0时panic, 与`BigUint::modpow`相同.
    pub fn mod_exp(&self, exp: &BigUint, modulus: &BigUint) -> BigUint {
        assert!(!modulus.is_zero(), "divide by zero!");

        if modulus.is_one() {
            return BigUint::zero();
        }

        let base = self.deref() % modulus;
        let mut r = BigUint::one();
        for i in (0..exp.bits()).rev() {
            r = &r * &r % modulus;
            if exp.bit(i) {
                r = r * &base % modulus;
            }
        }

        r
    }

    /// self * inv = 1 \mod modulus, 见`BigIntExt::modinv`
    pub fn modinv(&self, modulus: &BigUint) -> Result<BigUint, NumError> {
        let (a, n) = (BigInt::from(self.deref().clone()), BigInt::from(modulus.clone()));
        let (_, inv) = BigIntExt(a).modinv(&n)?.into_parts();
        Ok(inv)
    }

    /// 生成[0..self)之间均匀分布的随机数, `self`为0时返回`NumError::EmptyRange`.
    pub fn gen_random<R: Rand>(&self, rng: &mut R) -> Result<BigUint, NumError> {
        let bound = self.deref();
        if bound.is_zero() {
            return Err(NumError::EmptyRange);
        }

        let bits = bound.bits() as usize;
        let mut n = vec![0u8; (bits + 7) >> 3];

        loop {
            rng.rand_bits(n.as_mut_slice(), bits);
            let r = BigUint::from_bytes_le(n.as_slice());
            if &r < bound {
                return Ok(r);
            }
        }
    }

    /// 素性测试: 小于等于1的数不是素数; 不超过809的数查表判定; 其余数先用小素数试除, 再进行`repeats`轮
    /// Miller-Rabin测试.
    ///
    /// 返回`true`时`self`为合数的概率至多为`4^(-repeats)`. `repeats`为0时返回`NumError::InvalidRepeats`.
    pub fn is_probable_prime<R: Rand>(&self, repeats: usize, rng: &mut R) -> Result<bool, NumError> {
        if repeats == 0 {
            return Err(NumError::InvalidRepeats);
        }

        let n = self.deref();
        if n <= &BigUint::one() {
            return Ok(false);
        }

        if let Some(x) = n.to_u32() {
            if x <= LARGEST_SMALL_PRIME {
                return Ok(SMALL_PRIMES.binary_search(&x).is_ok());
            }
        }

        if SMALL_PRIMES.iter().any(|&p| (n % p).is_zero()) {
            return Ok(false);
        }

        self.miller_rabin(repeats, rng)
    }

    /// Miller-Rabin素数测试.
    ///
    /// 令`self - 1 = m * 2^d`, m为奇数. 从`[2, self - 1]`中随机选取`repeats`个互不相同的见证数w(区间不足
    /// `repeats`个数时取遍整个区间), 若`t = w^m mod self`不为1, 且`t, t^2, ..., t^(2^(d-1))`均不为`self - 1`,
    /// 则w证明了`self`是合数.
    ///
    /// note: `self`为偶数, 不大于2或`repeats`为0时返回错误, 区别于合数的判定结果.
    pub fn miller_rabin<R: Rand>(&self, repeats: usize, rng: &mut R) -> Result<bool, NumError> {
        let n = self.deref();
        if n <= &BigUint::from(2u8) {
            return Err(NumError::CandidateTooSmall);
        } else if n.is_even() {
            return Err(NumError::EvenCandidate);
        } else if repeats == 0 {
            return Err(NumError::InvalidRepeats);
        }

        let n_m1 = n - 1u32;
        let d = n_m1.trailing_zeros().unwrap_or(0);
        let m = &n_m1 >> d;

        // 见证数区间[2, n - 1]中共有n - 2个数
        let range = n - 2u32;
        let repeats = range.to_usize().map_or(repeats, |r| r.min(repeats));

        let mut tried = HashSet::with_capacity(repeats);
        while tried.len() < repeats {
            let w = BigUintExt(&range).gen_random(rng)? + 2u32;
            if tried.contains(&w) {
                continue;
            }

            if self.is_composite_witness(&w, &m, d, &n_m1) {
                return Ok(false);
            }
            tried.insert(w);
        }

        Ok(true)
    }

    fn is_composite_witness(&self, w: &BigUint, m: &BigUint, d: u64, n_m1: &BigUint) -> bool {
        let n = self.deref();
        let mut t = BigUintExt(w).mod_exp(m, n);
        if t.is_one() {
            return false;
        }

        for _ in 0..d {
            if &t == n_m1 {
                return false;
            }
            t = &t * &t % n;
        }

        true
    }

    /// 生成位长度恰为`bits_len`的素数(以`test_rounds`轮Miller-Rabin测试判定).
    ///
    /// 候选数为随机的`bits_len`位整数, 最高位置1以保证位长度; `bits_len > 2`时最低位也置1. 候选数未通过测试时
    /// 重新生成. `bits_len < 2`时返回`NumError::InvalidBitsLen`.
    pub fn generate_prime<R: Rand>(
        bits_len: usize,
        test_rounds: usize,
        rng: &mut R,
    ) -> Result<BigUint, NumError> {
        if bits_len < 2 {
            return Err(NumError::InvalidBitsLen(bits_len));
        } else if test_rounds == 0 {
            return Err(NumError::InvalidRepeats);
        }

        let (mut p, top) = (vec![0u8; (bits_len + 7) >> 3], bits_len - 1);
        let mut candidates = 0usize;
        loop {
            rng.rand_bits(p.as_mut_slice(), bits_len);
            p[top >> 3] |= 1 << (top & 7);
            if bits_len > 2 {
                p[0] |= 1;
            }

            candidates += 1;
            let n = BigUint::from_bytes_le(p.as_slice());
            if BigUintExt(&n).is_probable_prime(test_rounds, rng)? {
                log::debug!("generate {bits_len}-bits prime after {candidates} candidates");
                return Ok(n);
            }

            log::trace!("{bits_len}-bits prime candidate rejected");
        }
    }
}
