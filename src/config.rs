use std::path::Path;
use std::sync::OnceLock;

use config::Config;
use serde::{Deserialize, Serialize};

use crate::MyError;

static CONFIG: OnceLock<MdConfig> = OnceLock::new();

/// 运行时配置, 按默认值, 配置文件(json), 以`MDRSA__`为前缀的环境变量的顺序依次覆盖.
///
/// e.g. `MDRSA__IO_BUF_SIZE=8192`
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct MdConfig {
    // 流式读取文件时每次读取的字节数, 向上取整为64的倍数
    pub io_buf_size: usize,

    // 生成素数时Miller-Rabin测试的见证数个数
    pub prime_test_rounds: usize,

    // 默认的RSA素数位长度
    pub key_bits: usize,
}

impl Default for MdConfig {
    fn default() -> Self {
        Self {
            io_buf_size: 4096,
            prime_test_rounds: 5,
            key_bits: 128,
        }
    }
}

impl MdConfig {
    /// 全局配置, 首次调用时从环境变量加载
    pub fn config() -> Result<&'static Self, MyError> {
        if let Some(c) = CONFIG.get() {
            return Ok(c);
        }

        let c = Self::load(None)?;
        Ok(CONFIG.get_or_init(|| c))
    }

    /// 以配置文件`f`初始化全局配置, 全局配置已经初始化时直接返回已有的配置
    pub fn config_with_file<P: AsRef<Path>>(f: P) -> Result<&'static Self, MyError> {
        if let Some(c) = CONFIG.get() {
            log::warn!("config already initialized, ignore `{}`", f.as_ref().display());
            return Ok(c);
        }

        let c = Self::load(Some(f.as_ref()))?;
        Ok(CONFIG.get_or_init(|| c))
    }

    /// 加载配置但不缓存, 指定的配置文件必须存在
    pub fn load(f: Option<&Path>) -> Result<Self, MyError> {
        let default_config = Config::try_from(&MdConfig::default())?;

        let mut config = Config::builder().add_source(default_config);
        if let Some(f) = f {
            config = config.add_source(config::File::from(f).required(true));
        }
        config = config.add_source(
            config::Environment::with_prefix("MDRSA")
                .try_parsing(true)
                .separator("__"),
        );

        let mut myconfig: MdConfig = config.build()?.try_deserialize()?;

        myconfig.io_buf_size = ((myconfig.io_buf_size.max(1) + 63) >> 6) << 6;
        myconfig.prime_test_rounds = myconfig.prime_test_rounds.max(1);

        log::trace!("{:?}", myconfig);

        Ok(myconfig)
    }
}
