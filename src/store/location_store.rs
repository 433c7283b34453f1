//! Location store interface used to persist verification stamps

use crate::core::Fix;
use crate::store::{StoreError, StoreResult};

/// Durable record of which fixes have been verified and when.
///
/// Writes happen through a scoped edit session: `edit` opens it, `put`
/// upserts fixes keyed by their source identity and `end` commits and
/// closes it.
pub trait LocationStore {
    /// Open an edit session
    fn edit(&mut self) -> StoreResult<Box<dyn StoreEditor + '_>>;
}

/// An open batch of writes against a location store
pub trait StoreEditor {
    /// Upsert the verification state of `fix`
    fn put(&mut self, fix: &Fix) -> StoreResult<()>;

    /// Commit the batch and close the session
    fn end(self: Box<Self>) -> StoreResult<()>;
}

/// Persist every fix in `fixes` through a single edit session.
///
/// The session is always ended, also when a `put` fails. The first error
/// encountered is returned.
pub fn write_batch(store: &mut dyn LocationStore, fixes: &[Fix]) -> StoreResult<usize> {
    let mut editor = store.edit()?;

    let mut failure: Option<StoreError> = None;
    for fix in fixes {
        if let Err(e) = editor.put(fix) {
            failure = Some(e);
            break;
        }
    }

    let ended = editor.end();
    match failure {
        Some(e) => Err(e),
        None => ended.map(|_| fixes.len()),
    }
}
