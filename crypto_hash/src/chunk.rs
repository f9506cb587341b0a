//! 消息分块数据源.
//!
//! 数据源依次给出64字节的块, 最后给出一个长度严格小于64字节的块(可以为空)表示消息结束. `MDx::digest_chunks`
//! 只依赖这一约定, 因此内存中的字节串和文件可以用同一个驱动流式计算摘要.

use crate::mdx::BLOCK_SIZE;
use crate::HashError;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// 读取文件时默认的页大小
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// 将字节串按64字节分块, 最后一块长度小于64字节
#[derive(Clone, Debug)]
pub struct SliceChunks<'a> {
    data: &'a [u8],
    is_done: bool,
}

impl<'a> SliceChunks<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            is_done: false,
        }
    }
}

impl<'a> Iterator for SliceChunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done {
            return None;
        }

        if self.data.len() >= BLOCK_SIZE {
            let (chunk, rem) = self.data.split_at(BLOCK_SIZE);
            self.data = rem;
            Some(chunk)
        } else {
            self.is_done = true;
            Some(self.data)
        }
    }
}

/// 从页缓存中复制出的一个块
#[derive(Clone, Copy, Debug)]
pub struct Chunk {
    data: [u8; BLOCK_SIZE],
    len: usize,
}

impl Chunk {
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl AsRef<[u8]> for Chunk {
    fn as_ref(&self) -> &[u8] {
        &self.data[..self.len]
    }
}

/// 以页为单位读取`reader`, 再将每页按64字节分块.
///
/// 页大小会向上取整为64的倍数, 保证只有最后一页才会出现短块. 若数据恰好在页边界结束, 最后给出一个空块.
/// 读取出错后迭代结束.
pub struct ReadChunks<R> {
    reader: R,
    page: Vec<u8>,
    // page[pos..len]为尚未分块的数据
    pos: usize,
    len: usize,
    is_eof: bool,
    is_done: bool,
}

impl<R: Read> ReadChunks<R> {
    pub fn new(reader: R, page_size: usize) -> Self {
        let page_size = (page_size.max(1) + BLOCK_SIZE - 1) / BLOCK_SIZE * BLOCK_SIZE;
        Self {
            reader,
            page: vec![0; page_size],
            pos: 0,
            len: 0,
            is_eof: false,
            is_done: false,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page.len()
    }

    // 读满一页或直到EOF
    fn refill(&mut self) -> std::io::Result<()> {
        self.pos = 0;
        self.len = 0;
        while self.len < self.page.len() {
            match self.reader.read(&mut self.page[self.len..]) {
                Ok(0) => {
                    self.is_eof = true;
                    break;
                }
                Ok(n) => self.len += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }

        log::trace!("read page {} bytes, eof: {}", self.len, self.is_eof);
        Ok(())
    }
}

impl ReadChunks<File> {
    /// 打开文件`path`作为数据源
    pub fn open<P: AsRef<Path>>(path: P, page_size: usize) -> Result<Self, HashError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|err| HashError::Io {
            path: path.to_path_buf(),
            err,
        })?;

        Ok(Self::new(file, page_size))
    }
}

impl<R: Read> Iterator for ReadChunks<R> {
    type Item = std::io::Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done {
            return None;
        }

        if self.pos == self.len && !self.is_eof {
            if let Err(e) = self.refill() {
                self.is_done = true;
                return Some(Err(e));
            }
        }

        let n = (self.len - self.pos).min(BLOCK_SIZE);
        let mut chunk = Chunk {
            data: [0; BLOCK_SIZE],
            len: n,
        };
        chunk.data[..n].copy_from_slice(&self.page[self.pos..(self.pos + n)]);
        self.pos += n;

        if n < BLOCK_SIZE {
            self.is_done = true;
        }

        Some(Ok(chunk))
    }
}

#[cfg(test)]
mod tests {
    use super::{ReadChunks, SliceChunks};
    use crate::{Digest, HashError, MD4, MD5};
    use std::io::{Cursor, Write};

    fn message(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 13 + 1) as u8).collect()
    }

    #[test]
    fn slice_chunks_layout() {
        let cases = [(0, vec![0]), (5, vec![5]), (64, vec![64, 0]), (130, vec![64, 64, 2])];
        for (len, tgt) in cases {
            let msg = message(len);
            let lens = SliceChunks::new(&msg).map(|c| c.len()).collect::<Vec<_>>();
            assert_eq!(lens, tgt, "case => len {len}");
        }
    }

    #[test]
    fn read_chunks_layout() {
        // 页大小100向上取整为128
        let cases = [
            (0, vec![0]),
            (63, vec![63]),
            (128, vec![64, 64, 0]),
            (200, vec![64, 64, 64, 8]),
            (256, vec![64, 64, 64, 64, 0]),
        ];
        for (len, tgt) in cases {
            let chunks = ReadChunks::new(Cursor::new(message(len)), 100);
            assert_eq!(chunks.page_size(), 128);
            let lens = chunks
                .map(|c| c.map(|c| c.len()))
                .collect::<std::io::Result<Vec<_>>>()
                .unwrap();
            assert_eq!(lens, tgt, "case => len {len}");
        }
    }

    #[test]
    fn file_digest_match_buffered() {
        let dir = tempfile::tempdir().unwrap();
        for len in [0usize, 1, 55, 56, 64, 4095, 4096, 4097, 8192, 10000] {
            let msg = message(len);
            let path = dir.path().join(format!("msg-{len}"));
            std::fs::File::create(&path)
                .and_then(|mut f| f.write_all(&msg))
                .unwrap();

            for page in [64, 100, 4096] {
                assert_eq!(
                    MD5::digest_file(&path, page).unwrap(),
                    MD5::digest(&msg),
                    "case => md5 len {len}, page {page}"
                );
                assert_eq!(
                    MD4::digest_file(&path, page).unwrap(),
                    MD4::digest(&msg),
                    "case => md4 len {len}, page {page}"
                );
            }
        }
    }

    #[test]
    fn file_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let res = MD5::digest_file_default(&path);
        assert!(matches!(res, Err(HashError::Io { path: p, .. }) if p == path));
    }
}
