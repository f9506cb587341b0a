//! 大整数的数论工具: 扩展欧几里得算法, 模逆, 模幂, 素性测试及素数生成.

mod error;
pub use error::NumError;

mod bigint_ext;
pub use bigint_ext::BigIntExt;

mod biguint_ext;
pub use biguint_ext::{BigUintExt, SMALL_PRIMES};
