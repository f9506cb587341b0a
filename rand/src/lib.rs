//! 密码学安全的随机数源.
//!
//! 素数生成, Miller-Rabin见证数选取以及RSA私钥指数的选取都必须使用该crate提供的随机数源.

use xrand::rngs::OsRng;
use xrand::RngCore;

/// 随机字节生成器
pub trait Rand: Default {
    /// 以随机字节填满`random`
    fn rand(&mut self, random: &mut [u8]);

    /// 以随机字节填满`random`(按小端序解释), 并清除位序号大于等于`bits`的位.
    ///
    /// `random.len()`需至少为`(bits + 7) / 8`, 多余的高位字节会被清零.
    fn rand_bits(&mut self, random: &mut [u8], bits: usize) {
        self.rand(random);

        let (bytes, b) = (bits >> 3, bits & 7);
        if bytes < random.len() {
            random[bytes] &= ((1u16 << b) - 1) as u8;
            random[(bytes + 1)..].fill(0);
        }
    }
}

/// 操作系统提供的随机数源(`getrandom`), 无内部状态, 可随意复制.
#[derive(Copy, Clone, Default, Debug)]
pub struct DefaultRand {
    rng: OsRng,
}

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}
