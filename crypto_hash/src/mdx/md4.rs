use super::{f_ch, f_maj, f_parity, Compress, MDx, DIGEST_WSIZE, WORD_NUMS};

/// MD4压缩函数, 3轮每轮16步
#[derive(Clone, Copy, Debug, Default)]
pub struct MD4Compress;

/// [RFC 1320](https://www.rfc-editor.org/rfc/rfc1320) MD4消息摘要算法, 摘要长度128位
pub type MD4 = MDx<MD4Compress>;

const ROUND2_K: u32 = 0x5A827999;
const ROUND3_K: u32 = 0x6ED9EBA1;

macro_rules! md4_op {
    ($f: ident, $a: ident, $b: ident, $c: ident, $d: ident, $x: expr, $k: expr, $s: literal) => {
        $a = $a
            .wrapping_add($f($b, $c, $d))
            .wrapping_add($x)
            .wrapping_add($k)
            .rotate_left($s);
    };
}

impl Compress for MD4Compress {
    fn compress(digest: &mut [u32; DIGEST_WSIZE], x: &[u32; WORD_NUMS]) {
        let [mut a, mut b, mut c, mut d] = *digest;

        for i in (0..WORD_NUMS).step_by(4) {
            md4_op!(f_ch, a, b, c, d, x[i], 0, 3);
            md4_op!(f_ch, d, a, b, c, x[i + 1], 0, 7);
            md4_op!(f_ch, c, d, a, b, x[i + 2], 0, 11);
            md4_op!(f_ch, b, c, d, a, x[i + 3], 0, 19);
        }

        for k in 0..4 {
            md4_op!(f_maj, a, b, c, d, x[k], ROUND2_K, 3);
            md4_op!(f_maj, d, a, b, c, x[k + 4], ROUND2_K, 5);
            md4_op!(f_maj, c, d, a, b, x[k + 8], ROUND2_K, 9);
            md4_op!(f_maj, b, c, d, a, x[k + 12], ROUND2_K, 13);
        }

        for k in [0, 2, 1, 3] {
            md4_op!(f_parity, a, b, c, d, x[k], ROUND3_K, 3);
            md4_op!(f_parity, d, a, b, c, x[k + 8], ROUND3_K, 9);
            md4_op!(f_parity, c, d, a, b, x[k + 4], ROUND3_K, 11);
            md4_op!(f_parity, b, c, d, a, x[k + 12], ROUND3_K, 15);
        }

        digest[0] = digest[0].wrapping_add(a);
        digest[1] = digest[1].wrapping_add(b);
        digest[2] = digest[2].wrapping_add(c);
        digest[3] = digest[3].wrapping_add(d);
    }
}

#[cfg(test)]
mod tests {
    use super::MD4;
    use crate::Digest;
    use std::io::Write;

    #[test]
    fn md4_rfc1320() {
        let cases = [
            ("", "31d6cfe0d16ae931b73c59d7e0c089c0"),
            ("a", "bde52cb31de33e46245e05fbdbd6fb24"),
            ("abc", "a448017aaf21d8525fc10ae87aa6729d"),
            ("message digest", "d9130a8164549fe818874806e1c7014b"),
            (
                "abcdefghijklmnopqrstuvwxyz",
                "d79e1c308aa5bbcdeea8ed63df412da9",
            ),
            (
                "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "043f8582f241db351ce627e153e7f0e4",
            ),
            (
                "12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "e33b4ddc9c38f2199c3e7b164fcc0536",
            ),
            (
                "The quick brown fox jumps over the lazy dog",
                "1bee69a46ba811185c194762abaeae90",
            ),
        ];

        let mut md4 = MD4::new();
        for (msg, tgt) in cases {
            assert_eq!(MD4::digest(msg.as_bytes()).to_hex(), tgt, "case => {msg}");

            md4.write_all(msg.as_bytes()).unwrap();
            assert_eq!(md4.finalize().to_hex(), tgt, "case => write {msg}");
        }
    }
}
