use std::{error::Error, fmt::Display};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumError {
    /// gcd(0, 0)无定义
    UndefinedGcd,

    /// 素性测试的候选数必须是奇数
    EvenCandidate,

    /// 素性测试的候选数必须大于2
    CandidateTooSmall,

    /// 见证数个数必须大于0
    InvalidRepeats,

    /// 无法生成该位长度的素数
    InvalidBitsLen(usize),

    /// 在模数下不存在逆元
    NotInvertible,

    /// 随机数的取值区间为空
    EmptyRange,
}

impl Display for NumError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumError::UndefinedGcd => f.write_str("gcd(0, 0) is undefined"),
            NumError::EvenCandidate => f.write_str("Miller-Rabin test requires an odd candidate"),
            NumError::CandidateTooSmall => {
                f.write_str("Miller-Rabin test requires a candidate greater than 2")
            }
            NumError::InvalidRepeats => f.write_str("the number of witnesses must be positive"),
            NumError::InvalidBitsLen(bits) => f.write_fmt(format_args!(
                "cannot generate a prime with `{bits}` bits, at least 2 bits required"
            )),
            NumError::NotInvertible => f.write_str("the inverse does not exist"),
            NumError::EmptyRange => f.write_str("cannot draw a random number from an empty range"),
        }
    }
}

impl Error for NumError {}
