use ibig::UBig;
use thiserror::Error;

///Each word in the word list gets assigned an ID integer (its position in load order)
pub type WordId = u32;

///Index of a letter in the alphabet (0 for 'a' up to 25 for 'z')
pub type CharIndexType = u8;

///Index of a node in the trie arena
pub type NodeId = u32;

pub type CharType = u32;

///Number of letters in the (fixed) alphabet
pub const ALPHABET_SIZE: usize = 26;

///One prime per letter, used to compute the anagram value of a letter multiset
pub const PRIMES: &[CharType] = &[2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97, 101];

///The anagram value: the product of the primes of all letters (with repetition). Two letter
///multisets are equal if and only if their anagram values are equal.
pub type AnaValue = UBig;

///A single anagram, as a sequence of words
pub type Anagram = Vec<String>;

///Maps a character to its index in the alphabet, folding ASCII upper case to lower case
pub fn char_index(c: char) -> Option<CharIndexType> {
    let c = c.to_ascii_lowercase();
    if c.is_ascii_lowercase() {
        Some(c as u8 - b'a')
    } else {
        None
    }
}

///Maps an alphabet index back to its (lowercase) character
pub fn index_char(index: CharIndexType) -> char {
    (b'a' + index) as char
}

#[derive(Debug, Error)]
pub enum AnagramError {
    ///A word contains something other than the letters a-z
    #[error("invalid word {0:?}: only the letters a-z are allowed")]
    InvalidWord(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Clone,Debug,PartialEq)]
pub struct SearchParameters {
    /// May the word-level search use the same word more than once in a single anagram?
    pub allow_repeats: bool,

    /// Maximum number of words per anagram (0 for unlimited)
    pub max_words: usize,

    /// Minimum length (in letters) of every word in an anagram
    pub min_word_length: usize,
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self {
            allow_repeats: true,
            max_words: 0,
            min_word_length: 1,
        }
    }
}

impl SearchParameters {
    pub fn with_repeats(mut self, allow_repeats: bool) -> Self {
        self.allow_repeats = allow_repeats;
        self
    }
    pub fn with_max_words(mut self, max_words: usize) -> Self {
        self.max_words = max_words;
        self
    }
    pub fn with_min_word_length(mut self, length: usize) -> Self {
        self.min_word_length = length;
        self
    }

    ///The word budget as used internally by the searches, None if unlimited
    pub(crate) fn word_budget(&self) -> Option<usize> {
        if self.max_words == 0 {
            None
        } else {
            Some(self.max_words)
        }
    }
}
