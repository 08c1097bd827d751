// tests/stream_tests.rs
use pixel_vault::aliases::{DerivedKey32, Nonce16};
use pixel_vault::crypto::{apply_keystream, decrypt_to_vec, encrypt_to_vec};
use rand::RngCore;

fn key_from_hex(s: &str) -> DerivedKey32 {
    DerivedKey32::new(hex::decode(s).unwrap().try_into().unwrap())
}

fn nonce_from_hex(s: &str) -> Nonce16 {
    Nonce16::new(hex::decode(s).unwrap().try_into().unwrap())
}

#[test]
fn test_aes256_ctr_nist_sp800_38a_vector() {
    // SP 800-38A F.5.5 CTR-AES256.Encrypt, blocks 1 and 2
    let key = key_from_hex("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4");
    let nonce = nonce_from_hex("f0f1f2f3f4f5f6f7f8f9fafbfcfdfeff");
    let plaintext =
        hex::decode("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51").unwrap();

    let ciphertext = encrypt_to_vec(&plaintext, &key, &nonce);
    assert_eq!(
        hex::encode(&ciphertext),
        "601ec313775789a5b7a7f504bbf3d228f443e3ca4d62b59aca84e990cacaf5c5"
    );
    assert_eq!(decrypt_to_vec(&ciphertext, &key, &nonce), plaintext);
}

#[test]
fn test_decrypt_inverts_encrypt_for_random_buffers() {
    let mut rng = rand::rng();
    let key = DerivedKey32::new([0x42; 32]);
    let nonce = Nonce16::new([0x24; 16]);

    for len in [0usize, 1, 15, 16, 17, 12, 3 * 640 * 3, 4099] {
        let mut plaintext = vec![0u8; len];
        rng.fill_bytes(&mut plaintext);
        let ciphertext = encrypt_to_vec(&plaintext, &key, &nonce);
        assert_eq!(ciphertext.len(), len);
        assert_eq!(decrypt_to_vec(&ciphertext, &key, &nonce), plaintext);
    }
}

#[test]
fn test_each_call_restarts_the_counter() {
    let key = DerivedKey32::new([1; 32]);
    let nonce = Nonce16::new([2; 16]);
    let zeros = vec![0u8; 64];

    let first = encrypt_to_vec(&zeros, &key, &nonce);
    let second = encrypt_to_vec(&zeros, &key, &nonce);
    assert_eq!(first, second);

    // A short buffer sees the prefix of a longer buffer's keystream
    let short = encrypt_to_vec(&zeros[..20], &key, &nonce);
    assert_eq!(short, first[..20]);
}

#[test]
fn test_counter_is_one_stream_across_blocks() {
    let key = DerivedKey32::new([9; 32]);
    let nonce = Nonce16::new([0x10; 16]);
    let mut buf = vec![0u8; 48];
    apply_keystream(&mut buf, &key, &nonce);

    // Blocks differ: the counter advances rather than repeating
    assert_ne!(buf[..16], buf[16..32]);
    assert_ne!(buf[16..32], buf[32..48]);
}

#[test]
fn test_wrong_key_garbles_without_error() {
    let nonce = Nonce16::new([0; 16]);
    let plaintext = vec![0u8; 12];
    let ciphertext = encrypt_to_vec(&plaintext, &DerivedKey32::new([1; 32]), &nonce);
    let garbled = decrypt_to_vec(&ciphertext, &DerivedKey32::new([2; 32]), &nonce);
    assert_eq!(garbled.len(), 12);
    assert_ne!(garbled, plaintext);
}
