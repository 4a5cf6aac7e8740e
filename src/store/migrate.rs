use crate::store::keys;
use crate::store::{Store, StoreError};
use crate::study::classifier;

type MigrationFn = fn(&Store) -> Result<(), StoreError>;

fn migrations() -> Vec<(&'static str, MigrationFn)> {
    vec![
        ("001_initial", m001_initial),
        ("002_backfill_categories", m002_backfill_categories),
    ]
}

/// Runs every migration newer than the stored schema version.
///
/// Each migration must be idempotent: the version is written only after the
/// migration returns, so a crash in between replays it on the next start.
pub fn run(store: &Store) -> Result<(), StoreError> {
    let current = get_current_version(store)?;

    for (index, (name, func)) in migrations().iter().enumerate() {
        let version = (index + 1) as u32;
        if version > current {
            tracing::info!(version, name, "Running migration");
            func(store)?;
            set_version(store, version)?;
            tracing::info!(version, name, "Migration complete");
        } else {
            tracing::debug!(version, name, "Migration already applied, skipping");
        }
    }

    Ok(())
}

pub fn get_current_version(store: &Store) -> Result<u32, StoreError> {
    match store.config_versions.get(keys::SCHEMA_VERSION.as_bytes())? {
        Some(raw) => {
            let bytes: [u8; 4] = raw.as_ref().try_into().unwrap_or([0; 4]);
            Ok(u32::from_be_bytes(bytes))
        }
        None => Ok(0),
    }
}

pub fn set_version(store: &Store, version: u32) -> Result<(), StoreError> {
    let current = get_current_version(store)?;
    if version < current {
        return Err(StoreError::Migration {
            version,
            message: format!("Refuse to downgrade from {} to {}", current, version),
        });
    }

    store
        .config_versions
        .insert(keys::SCHEMA_VERSION.as_bytes(), &version.to_be_bytes())?;
    Ok(())
}

fn m001_initial(_store: &Store) -> Result<(), StoreError> {
    Ok(())
}

/// Words written before classification existed are tagged `uncategorized`.
fn m002_backfill_categories(store: &Store) -> Result<(), StoreError> {
    let mut words = store.load_words()?;
    let changed = classifier::backfill(&mut words);
    if changed > 0 {
        store.set_words(&words)?;
        tracing::info!(changed, "Backfilled word categories");
    }
    Ok(())
}
