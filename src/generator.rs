//! Random password generation.
//!
//! Passwords are drawn uniformly from the printable ASCII range
//! `'!'` (33) through `'~'` (126), which excludes the space character.

use rand::Rng;

const FIRST_PRINTABLE: u8 = b'!';
const LAST_PRINTABLE: u8 = b'~';

/// Generate a password of exactly `len` printable ASCII characters.
///
/// Uses the thread-local CSPRNG seeded from the operating system.
pub fn generate(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(rng.random_range(FIRST_PRINTABLE..=LAST_PRINTABLE)))
        .collect()
}
