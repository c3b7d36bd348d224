/// djb2 string hash over the word's bytes
///
/// Stable across runs and platforms, so a word always lands in the same bucket
/// for a given table size.
pub fn hash_word(word: &str) -> u64 {
    word.bytes().fold(5381u64, |hash, byte| {
        hash.wrapping_mul(33).wrapping_add(u64::from(byte))
    })
}
