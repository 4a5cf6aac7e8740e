use crate::store::codec;
use crate::store::keys;
use crate::store::{Store, StoreError};
use crate::study::progress::UserProgress;

impl Store {
    pub fn load_progress(&self) -> Result<UserProgress, StoreError> {
        match self.progress.get(keys::PROGRESS_JSON.as_bytes())? {
            Some(raw) => Ok(codec::decode_progress(&raw)),
            None => Ok(UserProgress::default()),
        }
    }

    /// Overwrites the single stored snapshot.
    pub fn save_progress(&self, progress: &UserProgress) -> Result<(), StoreError> {
        let encoded = codec::encode_progress(progress)?;
        self.progress
            .insert(keys::PROGRESS_JSON.as_bytes(), encoded.as_bytes())?;
        Ok(())
    }

    pub fn clear_progress(&self) -> Result<(), StoreError> {
        self.progress.remove(keys::PROGRESS_JSON.as_bytes())?;
        Ok(())
    }
}
