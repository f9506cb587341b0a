//! MD4/MD5共用的Merkle-Damgård结构, 参考:
//! - [RFC 1320](https://www.rfc-editor.org/rfc/rfc1320) The MD4 Message-Digest Algorithm
//! - [RFC 1321](https://www.rfc-editor.org/rfc/rfc1321) The MD5 Message-Digest Algorithm
//!
//! 消息按64字节分块, 每块按小端序划分为16个32位单词后交给压缩函数更新摘要状态. 最后一块填充一个`1`位和若干
//! `0`位, 使得消息位长度模512余448, 再追加小端序的64位消息位长度(模2^64). 若最后不足一块的数据放不下填充位和
//! 长度字段, 则需多处理一个填充块.
//!
//! 两个算法仅压缩函数不同, 压缩函数作为类型参数`C: Compress`静态分发给通用的`MDx<C>`.

use crate::chunk::{ReadChunks, DEFAULT_PAGE_SIZE};
use crate::{Digest, HashError, Output};
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;
#[cfg(feature = "sec-zeroize")]
use zeroize::Zeroize;

mod md4;
pub use md4::{MD4Compress, MD4};

mod md5;
pub use md5::{MD5Compress, MD5};

/// 摘要状态由4个32位寄存器A, B, C, D组成
pub const DIGEST_WSIZE: usize = 4;
/// 每块划分为16个32位单词
pub const WORD_NUMS: usize = 16;
/// 块字节长度
pub const BLOCK_SIZE: usize = 64;
// 数据需填充到模BLOCK_SIZE余该值的字节长度, 剩余8字节存放消息位长度
const DATA_PADDING_BYTES: usize = 56;

/// 寄存器初始化向量, 按小端序解释即`01 23 45 67 89 ab cd ef fe dc ba 98 76 54 32 10`
pub const INIT: [u32; DIGEST_WSIZE] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476];

#[inline]
pub(in crate::mdx) fn f_ch(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | ((!x) & z)
}

#[inline]
pub(in crate::mdx) fn f_maj(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline]
pub(in crate::mdx) fn f_parity(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// 压缩函数: 用一个块的16个单词更新摘要状态.
///
/// 实现需在所有轮次完成后将工作寄存器模2^32累加到`digest`上.
pub trait Compress {
    fn compress(digest: &mut [u32; DIGEST_WSIZE], words: &[u32; WORD_NUMS]);
}

/// 通用的Merkle-Damgård驱动, 内存占用固定为一个块缓存加4个寄存器, 与消息长度无关.
#[derive(Clone, Debug)]
pub struct MDx<C> {
    digest: [u32; DIGEST_WSIZE],
    buf: [u8; BLOCK_SIZE],
    // 记录buf下一个可写入位置的索引
    idx: usize,
    // 已写入消息的位长度, 模2^64
    bits: u64,
    is_finalize: bool,
    compress: PhantomData<C>,
}

impl<C: Compress> MDx<C> {
    pub const fn new() -> Self {
        Self {
            digest: INIT,
            buf: [0; BLOCK_SIZE],
            idx: 0,
            bits: 0,
            is_finalize: false,
            compress: PhantomData,
        }
    }

    fn compress_block(digest: &mut [u32; DIGEST_WSIZE], block: &[u8]) {
        let mut words = [0u32; WORD_NUMS];
        for (word, bytes) in words.iter_mut().zip(block.chunks_exact(4)) {
            *word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }

        C::compress(digest, &words);
    }

    fn update_inner(&mut self, mut data: &[u8]) {
        if self.is_finalize {
            self.reset_inner();
        }

        self.bits = self.bits.wrapping_add((data.len() as u64).wrapping_mul(8));

        if self.idx > 0 {
            let ava_len = data.len().min(BLOCK_SIZE - self.idx);
            self.buf[self.idx..(self.idx + ava_len)].copy_from_slice(&data[..ava_len]);
            self.idx += ava_len;
            data = &data[ava_len..];

            if self.idx < BLOCK_SIZE {
                return;
            }

            Self::compress_block(&mut self.digest, &self.buf);
            self.idx = 0;
        }

        let mut blocks = data.chunks_exact(BLOCK_SIZE);
        for block in blocks.by_ref() {
            Self::compress_block(&mut self.digest, block);
        }

        let rem = blocks.remainder();
        self.buf[..rem.len()].copy_from_slice(rem);
        self.idx = rem.len();
    }

    fn finalize_inner(&mut self) -> Output<Self> {
        if !self.is_finalize {
            let mut block = [0u8; BLOCK_SIZE];
            block[..self.idx].copy_from_slice(&self.buf[..self.idx]);
            block[self.idx] = 0x80;

            // 剩余空间放不下长度字段, 溢出到第二个全0填充块
            if self.idx >= DATA_PADDING_BYTES {
                Self::compress_block(&mut self.digest, &block);
                block = [0u8; BLOCK_SIZE];
            }

            block[DATA_PADDING_BYTES..].copy_from_slice(&self.bits.to_le_bytes());
            Self::compress_block(&mut self.digest, &block);

            self.idx = 0;
            self.is_finalize = true;
        }

        Output::from_vec(self.digest.iter().flat_map(|x| x.to_le_bytes()).collect())
    }

    fn reset_inner(&mut self) {
        self.digest = INIT;
        self.buf = [0; BLOCK_SIZE];
        self.idx = 0;
        self.bits = 0;
        self.is_finalize = false;
    }

    /// 对分块数据源计算摘要.
    ///
    /// `chunks`除最后一块外每块恰为64字节, 最后一块严格小于64字节(可以为空), 作为消息结束的标志.
    /// 遇到短块后不再读取后续数据; 数据源未给出短块便结束时, 视为最后给出了一个空块.
    pub fn digest_chunks<I>(chunks: I) -> Output<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut h = Self::new();
        for chunk in chunks {
            let chunk = chunk.as_ref();
            h.update_inner(chunk);
            if chunk.len() < BLOCK_SIZE {
                break;
            }
        }

        h.finalize_inner()
    }

    /// 同`digest_chunks`, 数据源读取出错时立即返回该错误.
    pub fn try_digest_chunks<I, B, E>(chunks: I) -> Result<Output<Self>, E>
    where
        I: IntoIterator<Item = Result<B, E>>,
        B: AsRef<[u8]>,
    {
        let mut h = Self::new();
        for chunk in chunks {
            let chunk = chunk?;
            let chunk = chunk.as_ref();
            h.update_inner(chunk);
            if chunk.len() < BLOCK_SIZE {
                break;
            }
        }

        Ok(h.finalize_inner())
    }

    /// 流式计算文件摘要, 以`page_size`字节为单位读取文件, 文件句柄在返回前关闭.
    pub fn digest_file<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Output<Self>, HashError> {
        let path = path.as_ref();
        log::debug!("digest file `{}` with page size {page_size}", path.display());

        let chunks = ReadChunks::open(path, page_size)?;
        Self::try_digest_chunks(chunks).map_err(|err| HashError::Io {
            path: path.to_path_buf(),
            err,
        })
    }

    /// 使用默认页大小流式计算文件摘要
    pub fn digest_file_default<P: AsRef<Path>>(path: P) -> Result<Output<Self>, HashError> {
        Self::digest_file(path, DEFAULT_PAGE_SIZE)
    }
}

impl<C: Compress> Default for MDx<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Compress> Write for MDx<C> {
    fn write(&mut self, data: &[u8]) -> std::io::Result<usize> {
        self.update_inner(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<C: Compress> Digest for MDx<C> {
    const BLOCK_BITS: usize = BLOCK_SIZE * 8;
    const WORD_BITS: usize = 32;
    const DIGEST_BITS: usize = DIGEST_WSIZE * 32;

    fn digest(msg: &[u8]) -> Output<Self> {
        let mut h = Self::new();
        h.update_inner(msg);
        h.finalize_inner()
    }

    fn update(&mut self, data: &[u8]) {
        self.update_inner(data)
    }

    fn finalize(&mut self) -> Output<Self> {
        self.finalize_inner()
    }

    fn reset(&mut self) {
        self.reset_inner()
    }
}

#[cfg(feature = "sec-zeroize")]
impl<C> Zeroize for MDx<C> {
    fn zeroize(&mut self) {
        self.digest.zeroize();
        self.buf.zeroize();
        self.bits.zeroize();
    }
}

#[cfg(feature = "sec-zeroize-drop")]
impl<C> Drop for MDx<C> {
    fn drop(&mut self) {
        self.zeroize();
    }
}
