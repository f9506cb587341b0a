//! RSA
//!
//! - 随机选择两个位长度相同的质数$p$和$q$($p\neq q$), 则模数$n=p*q$, $\phi(n)=(p-1)(q-1)$;
//! - 在$[2,\phi(n)-1]$之中, 随机选择一个与$\phi(n)$互质的整数$d$作为私钥的指数部分;
//! - 公钥的指数部分$e$满足: $d*e \equiv 1 \mod \phi(n)$, 即$e$是$d$模$\phi(n)$的逆元;
//!
//! 签名: $s = H(m) ^ d \mod n$;
//!
//! 验证: $s^e \mod n = H(m) \mod n$;
//!
//! 原理: 欧拉定理$a^{\phi(n)} \equiv 1 \mod n$
//! - $x ^ {k(p-1)(q-1)+1} \equiv x \mod n$
//!
//! 这里对消息摘要直接做模幂运算, 不做任何填充, 摘要不小于$n$时实际签名的是$H(m) \mod n$.

mod key;
pub use key::{KeyId, KeyKind, Private, PrivateKey, Public, PublicKey, RSAKey};

mod pair;
pub use pair::RSAKeyPair;

mod sign;
pub use sign::{RSASign, RSAVerify};
