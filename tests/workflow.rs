use mdrsa::{
    generate_default_keypair, generate_keypair, hash, hash_file, read_key, save_checksum,
    save_keypair, sign, sign_file, verify, verify_file, HasherType, KeyId, MdConfig, MyError,
    PrivateKey, PublicKey,
};

fn init_log() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn checksum_action() -> anyhow::Result<()> {
    init_log();
    let dir = tempfile::tempdir()?;
    let page = MdConfig::config()?.io_buf_size;

    // 恰好在页边界结束以及跨页的文件
    for len in [0, 56, 64, page, page + 1, 2 * page] {
        let data = (0..len).map(|i| (i * 31 + 7) as u8).collect::<Vec<_>>();
        let (msg, sum) = (
            dir.path().join(format!("{len}.bin")),
            dir.path().join(format!("{len}.md5")),
        );
        std::fs::write(&msg, &data)?;

        let digest = save_checksum(&msg, &sum, HasherType::MD5)?;
        assert_eq!(digest, hash(&data, HasherType::MD5), "case => {len}");
        assert_eq!(std::fs::read_to_string(&sum)?, digest);
        assert_eq!(hash_file(&msg, HasherType::MD4)?, hash(&data, HasherType::MD4));
    }

    Ok(())
}

#[test]
fn keypair_sign_verify_actions() -> anyhow::Result<()> {
    init_log();
    let dir = tempfile::tempdir()?;

    let pair = generate_keypair(64)?.with_id(KeyId::new("grace")?);
    let (sk_path, pk_path) = save_keypair(dir.path(), "grace", &pair)?;
    assert!(sk_path.ends_with("grace.private"));
    assert!(pk_path.ends_with("grace.public"));

    let pk: PublicKey = read_key(&pk_path)?;
    let sk: PrivateKey = read_key(&sk_path)?;
    assert_eq!(pk.id().map(|x| x.as_str()), Some("grace"));
    assert_eq!(pk.modulus(), sk.modulus());

    let (msg, sig) = (dir.path().join("note.txt"), dir.path().join("note.sig"));
    std::fs::write(&msg, "meet at noon\n")?;
    for alg in [HasherType::MD4, HasherType::MD5] {
        let s = sign_file(&msg, &sk_path, &sig, alg)?;
        assert_eq!(s, sign("meet at noon\n", &sk, alg)?);
        assert!(verify_file(&msg, &sig, &pk_path, alg)?, "case => {alg}");
        assert!(verify("meet at noon\n", &s, &pk, alg)?);
        assert!(!verify("meet at noon!", &s, &pk, alg)?);
    }

    // 密钥对不会覆盖已有文件
    assert!(matches!(
        save_keypair(dir.path(), "grace", &pair),
        Err(MyError::Cipher(_))
    ));

    Ok(())
}

#[test]
fn default_keypair() -> anyhow::Result<()> {
    init_log();
    let config = MdConfig::config()?;
    let (pk, sk) = generate_default_keypair()?.into_keys();
    let bits = pk.modulus().bits() as usize;
    assert!(bits >= 2 * config.key_bits - 1 && bits <= 2 * config.key_bits);

    let s = sign("default", &sk, HasherType::MD5)?;
    assert!(verify("default", &s, &pk, HasherType::MD5)?);

    Ok(())
}
