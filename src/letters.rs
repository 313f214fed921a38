use std::fmt;
use ibig::UBig;
use num_traits::One;

use crate::types::*;

///A count for each of the 26 lowercase letters. Serves both as the letter budget of a search
///and (via its anagram value) as a cache key.
#[derive(Clone,PartialEq,Eq,Hash,Default)]
pub struct LetterMultiset {
    counts: [usize; ALPHABET_SIZE],
    total: usize,
}

///Trait for objects that can be turned into a letter multiset (string-like)
pub trait Letterable {
    ///Counts the alphabetic characters, folded to lowercase, discarding everything else
    fn letters(&self) -> LetterMultiset;
}

impl Letterable for str {
    fn letters(&self) -> LetterMultiset {
        let mut letters = LetterMultiset::new();
        for c in self.chars() {
            if let Some(index) = char_index(c) {
                letters.take_back(index);
            }
        }
        letters
    }
}

impl LetterMultiset {
    pub fn new() -> Self {
        Self::default()
    }

    ///Builds the multiset for a single dictionary word, every character must be a letter
    pub fn from_word(word: &str) -> Result<Self, AnagramError> {
        let mut letters = Self::new();
        for c in word.chars() {
            match char_index(c) {
                Some(index) => letters.take_back(index),
                None => return Err(AnagramError::InvalidWord(word.to_string())),
            }
        }
        Ok(letters)
    }

    pub fn count(&self, index: CharIndexType) -> usize {
        self.counts[index as usize]
    }

    ///Total number of letters
    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    ///Tests whether every letter of this multiset is also available in `other`
    pub fn fits_in(&self, other: &LetterMultiset) -> bool {
        self.total <= other.total && self.counts.iter().zip(other.counts.iter()).all(|(a, b)| a <= b)
    }

    ///Returns what remains of this multiset after removing the letters of `other`,
    ///or None if `other` does not fit
    pub fn subtract(&self, other: &LetterMultiset) -> Option<LetterMultiset> {
        if !other.fits_in(self) {
            return None;
        }
        let mut result = self.clone();
        for (count, delta) in result.counts.iter_mut().zip(other.counts.iter()) {
            *count -= delta;
        }
        result.total -= other.total;
        Some(result)
    }

    ///Returns the union (sum) of both multisets
    pub fn add(&self, other: &LetterMultiset) -> LetterMultiset {
        let mut result = self.clone();
        for (count, delta) in result.counts.iter_mut().zip(other.counts.iter()) {
            *count += delta;
        }
        result.total += other.total;
        result
    }

    ///Uses up one occurrence of a letter. Returns false (and changes nothing) if the letter is
    ///not available.
    pub fn take(&mut self, index: CharIndexType) -> bool {
        let count = &mut self.counts[index as usize];
        if *count == 0 {
            false
        } else {
            *count -= 1;
            self.total -= 1;
            true
        }
    }

    ///Returns one occurrence of a letter, the counterpart of `take()`
    pub fn take_back(&mut self, index: CharIndexType) {
        self.counts[index as usize] += 1;
        self.total += 1;
    }

    ///Iterates over all letters that occur at least once, with their counts, in alphabetical order
    pub fn iter(&self) -> impl Iterator<Item = (char, usize)> + '_ {
        self.counts.iter().enumerate().filter(|(_, count)| **count > 0).map(|(index, count)| (index_char(index as CharIndexType), *count))
    }

    ///Computes the anagram value, a pure function of the counts
    ///
    /// # Examples
    ///
    /// ```
    /// # use anatrie::*;
    /// assert_eq!("stressed".letters().anahash(), "desserts".letters().anahash());
    /// assert_eq!("ab".letters().anahash(), AnaValue::from(6 as usize));
    /// ```
    pub fn anahash(&self) -> AnaValue {
        let mut hash = AnaValue::one();
        for (index, count) in self.counts.iter().enumerate() {
            if *count > 0 {
                hash *= UBig::from(PRIMES[index]).pow(*count);
            }
        }
        hash
    }
}

impl fmt::Display for LetterMultiset {
    ///Renders the multiset as its letters in alphabetical order
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (c, count) in self.iter() {
            for _ in 0..count {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for LetterMultiset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_fold_and_discard() {
        let letters = "You chunnin' bro?".letters();
        assert_eq!(letters.len(), 13);
        assert_eq!(letters.count(char_index('n').unwrap()), 3);
        assert_eq!(letters.to_string(), "bchinnnooruuy");
    }

    #[test]
    fn from_word_rejects_non_letters() {
        assert!(LetterMultiset::from_word("don't").is_err());
        assert_eq!(LetterMultiset::from_word("Cat").unwrap(), "act".letters());
    }

    #[test]
    fn subtract_checked() {
        let abc = "abc".letters();
        assert_eq!(abc.subtract(&"b".letters()), Some("ac".letters()));
        assert_eq!(abc.subtract(&"bb".letters()), None);
        assert_eq!(abc.subtract(&"x".letters()), None);
        assert_eq!(abc.subtract(&abc), Some(LetterMultiset::new()));
    }

    #[test]
    fn take_and_take_back() {
        let mut letters = "aab".letters();
        assert!(letters.take(0));
        assert!(letters.take(0));
        assert!(!letters.take(0));
        assert_eq!(letters, "b".letters());
        letters.take_back(0);
        assert_eq!(letters.len(), 2);
    }

    #[test]
    fn long_phrase_counts() {
        let mut letters = "a".repeat(70000).letters();
        assert_eq!(letters.count(0), 70000);
        assert_eq!(letters.len(), 70000);
        letters.take_back(0);
        assert_eq!(letters.add(&letters.clone()).count(0), 140002);
        assert_ne!(letters.anahash(), "a".repeat(70000 - 65536).letters().anahash());
    }

    #[test]
    fn anahash_of_empty_is_one() {
        assert_eq!(LetterMultiset::new().anahash(), AnaValue::from(1 as usize));
        assert_eq!("aab".letters().anahash(), AnaValue::from((2 * 2 * 3) as usize));
    }
}
