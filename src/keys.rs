use rand::distributions::{Distribution, Uniform};
use rand::Rng;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random base-36 key of the given length.
pub fn generate_key<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    let index = Uniform::from(0..ALPHABET.len());
    (0..length)
        .map(|_| ALPHABET[index.sample(rng)] as char)
        .collect()
}
