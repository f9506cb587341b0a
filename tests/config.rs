//! 环境变量会影响同一进程中的全局配置, 因此单独放在一个测试二进制中.

use mdrsa::MdConfig;

#[test]
fn config_env_file_global() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir()?;

    let path = dir.path().join("mdrsa.json");
    std::fs::write(
        &path,
        r#"{"io_buf_size": 8192, "prime_test_rounds": 9, "key_bits": 64}"#,
    )?;
    assert_eq!(
        MdConfig::load(Some(&path))?,
        MdConfig {
            io_buf_size: 8192,
            prime_test_rounds: 9,
            key_bits: 64
        }
    );

    // 环境变量覆盖配置文件, 并且同样会被规范化
    std::env::set_var("MDRSA__IO_BUF_SIZE", "200");
    std::env::set_var("MDRSA__PRIME_TEST_ROUNDS", "0");
    let tgt = MdConfig {
        io_buf_size: 256,
        prime_test_rounds: 1,
        key_bits: 64,
    };
    assert_eq!(MdConfig::load(Some(&path))?, tgt);
    assert_eq!(
        MdConfig::load(None)?,
        MdConfig {
            key_bits: 128,
            ..tgt.clone()
        }
    );

    // 全局配置只初始化一次
    let c = MdConfig::config_with_file(&path)?;
    assert_eq!(c, &tgt);
    assert!(std::ptr::eq(c, MdConfig::config()?));

    let other = dir.path().join("other.json");
    std::fs::write(&other, r#"{"key_bits": 32}"#)?;
    assert_eq!(MdConfig::config_with_file(&other)?, &tgt);

    Ok(())
}
