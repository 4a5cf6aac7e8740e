use crate::constants::MAX_CAS_RETRIES;
use crate::store::codec::{self, EMPTY_JSON};
use crate::store::keys;
use crate::store::{Store, StoreError};
use crate::study::word::WordEntry;

impl Store {
    pub fn load_words(&self) -> Result<Vec<WordEntry>, StoreError> {
        match self.words.get(keys::WORDS_JSON.as_bytes())? {
            Some(raw) => Ok(codec::decode_words(&raw)),
            None => Ok(Vec::new()),
        }
    }

    /// Replaces the whole stored collection with one insert.
    pub fn set_words(&self, words: &[WordEntry]) -> Result<(), StoreError> {
        let encoded = codec::encode_words(words)?;
        self.words
            .insert(keys::WORDS_JSON.as_bytes(), encoded.as_bytes())?;
        Ok(())
    }

    /// Stores `defaults` only while the collection is still empty. Returns whether it wrote.
    ///
    /// The write is a compare-and-swap against the empty value just observed,
    /// so a concurrent writer always wins and seeding backs off.
    pub fn ensure_seeded(&self, defaults: &[WordEntry]) -> Result<bool, StoreError> {
        if defaults.is_empty() {
            return Ok(false);
        }
        let encoded = codec::encode_words(defaults)?;
        let key = keys::WORDS_JSON.as_bytes();

        for _ in 0..MAX_CAS_RETRIES {
            let current = self.words.get(key)?;
            if !codec::is_empty_words_payload(current.as_deref()) {
                return Ok(false);
            }
            match self
                .words
                .compare_and_swap(key, current, Some(encoded.as_bytes()))?
            {
                Ok(()) => return Ok(true),
                Err(_) => continue,
            }
        }

        Err(StoreError::CasRetryExhausted {
            entity: "words".to_string(),
            key: keys::WORDS_JSON.to_string(),
            attempts: MAX_CAS_RETRIES,
        })
    }

    pub fn clear_words(&self) -> Result<(), StoreError> {
        self.words
            .insert(keys::WORDS_JSON.as_bytes(), EMPTY_JSON.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn open(dir: &tempfile::TempDir, name: &str) -> Store {
        Store::open(dir.path().join(name).to_str().unwrap()).unwrap()
    }

    #[test]
    fn missing_words_load_as_empty() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-empty");
        assert!(store.load_words().unwrap().is_empty());
    }

    #[test]
    fn set_words_replaces_collection() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-set");

        store
            .set_words(&[WordEntry::new(2, "b", "x"), WordEntry::new(1, "a", "x")])
            .unwrap();
        store.set_words(&[WordEntry::new(9, "z", "x")]).unwrap();

        let words = store.load_words().unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].id, 9);
    }

    #[test]
    fn seeding_fills_empty_store_once() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-seed");
        let defaults = vec![WordEntry::new(1, "apple", "fruit")];

        assert!(store.ensure_seeded(&defaults).unwrap());
        assert!(!store.ensure_seeded(&[WordEntry::new(7, "other", "x")]).unwrap());
        assert_eq!(store.load_words().unwrap(), defaults);
    }

    #[test]
    fn seeding_does_not_overwrite_existing_words() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-seed-existing");
        let mine = WordEntry::new(5, "mine", "kept");
        store.set_words(&[mine.clone()]).unwrap();

        assert!(!store
            .ensure_seeded(&[WordEntry::new(1, "apple", "fruit")])
            .unwrap());
        assert_eq!(store.load_words().unwrap(), vec![mine]);
    }

    #[test]
    fn seeding_treats_cleared_store_as_empty() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-seed-cleared");
        store.set_words(&[WordEntry::new(5, "mine", "x")]).unwrap();
        store.clear_words().unwrap();

        assert!(store
            .ensure_seeded(&[WordEntry::new(1, "apple", "fruit")])
            .unwrap());
        assert_eq!(store.load_words().unwrap().len(), 1);
    }

    #[test]
    fn empty_defaults_are_a_noop() {
        let dir = tempdir().unwrap();
        let store = open(&dir, "words-seed-noop");
        assert!(!store.ensure_seeded(&[]).unwrap());
        assert!(store.words.get(keys::WORDS_JSON.as_bytes()).unwrap().is_none());
    }
}
