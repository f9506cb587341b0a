use std::io::Write;

mod output;
pub use output::Output;

mod error;
pub use error::HashError;

pub mod chunk;
pub use chunk::{Chunk, ReadChunks, SliceChunks};

pub mod mdx;
pub use mdx::{MD4, MD5};

mod builder;
pub use builder::HasherType;

/// 哈希算法实现该trait, 计算消息的摘要. 可直接调用`Digest::digest(msg)`生成消息的摘要, 或者通过`Write` trait
/// (或`Digest::update`)将数据更新到`self`中后使用`self.finalize()`生成消息摘要.
///
/// MD4/MD5已不具备抗碰撞性, 仅可用于:
/// - 数据一致性验证(校验和);
/// - 教学性质的数字签名生成和验证;
pub trait Digest: Write {
    /// 哈希算法每次按块处理消息的块的位长度
    const BLOCK_BITS: usize;
    /// 哈希算法将每个块按该位长度划分为若干个单词
    const WORD_BITS: usize;
    /// 哈希算法生成的摘要的位长度
    const DIGEST_BITS: usize;

    /// 生成消息摘要
    fn digest(msg: &[u8]) -> Output<Self>;

    /// 将`data`追加到待处理的消息中, 该操作不会失败
    fn update(&mut self, data: &[u8]);

    /// 生成消息摘要
    fn finalize(&mut self) -> Output<Self>;

    /// 重置哈希算法到初始化状态
    fn reset(&mut self);
}

/// `Digest`的对象安全版本, 用于运行时选择哈希算法
pub trait DigestX: Write {
    fn block_bits_x(&self) -> usize;
    fn word_bits_x(&self) -> usize;
    fn digest_bits_x(&self) -> usize;
    fn write_x(&mut self, data: &[u8]);
    fn finish_x(&mut self) -> Vec<u8>;
    fn reset_x(&mut self);
}

impl<T> DigestX for T
where
    T: Digest,
{
    fn block_bits_x(&self) -> usize {
        <T as Digest>::BLOCK_BITS
    }

    fn word_bits_x(&self) -> usize {
        <T as Digest>::WORD_BITS
    }

    fn digest_bits_x(&self) -> usize {
        <T as Digest>::DIGEST_BITS
    }

    fn write_x(&mut self, data: &[u8]) {
        self.update(data)
    }

    fn finish_x(&mut self) -> Vec<u8> {
        self.finalize().into()
    }

    fn reset_x(&mut self) {
        self.reset()
    }
}
