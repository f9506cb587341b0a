use super::{f_ch, f_parity, Compress, MDx, DIGEST_WSIZE, WORD_NUMS};

/// MD5压缩函数, 4轮每轮16步
#[derive(Clone, Copy, Debug, Default)]
pub struct MD5Compress;

/// [RFC 1321](https://www.rfc-editor.org/rfc/rfc1321) MD5消息摘要算法, 摘要长度128位
pub type MD5 = MDx<MD5Compress>;

// K[i] = floor(|sin(i + 1)| * 2^32)
const K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee, 0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be, 0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa, 0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed, 0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c, 0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05, 0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039, 0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1, 0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

#[inline]
fn f_g(x: u32, y: u32, z: u32) -> u32 {
    (x & z) | (y & (!z))
}

#[inline]
fn f_i(x: u32, y: u32, z: u32) -> u32 {
    y ^ (x | (!z))
}

macro_rules! md5_op {
    ($f: ident, $a: ident, $b: ident, $c: ident, $d: ident, $x: expr, $k: expr, $s: literal) => {
        $a = $b.wrapping_add(
            $a.wrapping_add($f($b, $c, $d))
                .wrapping_add($x)
                .wrapping_add($k)
                .rotate_left($s),
        );
    };
}

// 第k组4步中第一步所用单词索引为`(base + 4k) mod 16`
#[inline]
const fn idx_inc(base: usize, k: usize) -> usize {
    (base + 4 * k) & 0xf
}

// 第k组4步中第一步所用单词索引为`(base - 4k) mod 16`
#[inline]
const fn idx_dec(base: usize, k: usize) -> usize {
    base.wrapping_sub(4 * k) & 0xf
}

impl Compress for MD5Compress {
    fn compress(digest: &mut [u32; DIGEST_WSIZE], x: &[u32; WORD_NUMS]) {
        let [mut a, mut b, mut c, mut d] = *digest;

        for k in 0..4 {
            let i = 4 * k;
            md5_op!(f_ch, a, b, c, d, x[i], K[i], 7);
            md5_op!(f_ch, d, a, b, c, x[i + 1], K[i + 1], 12);
            md5_op!(f_ch, c, d, a, b, x[i + 2], K[i + 2], 17);
            md5_op!(f_ch, b, c, d, a, x[i + 3], K[i + 3], 22);
        }

        for k in 0..4 {
            let i = 16 + 4 * k;
            md5_op!(f_g, a, b, c, d, x[idx_inc(1, k)], K[i], 5);
            md5_op!(f_g, d, a, b, c, x[idx_inc(6, k)], K[i + 1], 9);
            md5_op!(f_g, c, d, a, b, x[idx_inc(11, k)], K[i + 2], 14);
            md5_op!(f_g, b, c, d, a, x[idx_inc(0, k)], K[i + 3], 20);
        }

        for k in 0..4 {
            let i = 32 + 4 * k;
            md5_op!(f_parity, a, b, c, d, x[idx_dec(5, k)], K[i], 4);
            md5_op!(f_parity, d, a, b, c, x[idx_dec(8, k)], K[i + 1], 11);
            md5_op!(f_parity, c, d, a, b, x[idx_dec(11, k)], K[i + 2], 16);
            md5_op!(f_parity, b, c, d, a, x[idx_dec(14, k)], K[i + 3], 23);
        }

        for k in 0..4 {
            let i = 48 + 4 * k;
            md5_op!(f_i, a, b, c, d, x[idx_dec(0, k)], K[i], 6);
            md5_op!(f_i, d, a, b, c, x[idx_dec(7, k)], K[i + 1], 10);
            md5_op!(f_i, c, d, a, b, x[idx_dec(14, k)], K[i + 2], 15);
            md5_op!(f_i, b, c, d, a, x[idx_dec(5, k)], K[i + 3], 21);
        }

        digest[0] = digest[0].wrapping_add(a);
        digest[1] = digest[1].wrapping_add(b);
        digest[2] = digest[2].wrapping_add(c);
        digest[3] = digest[3].wrapping_add(d);
    }
}
