/// Read-only view of the currently active knowledge version.
///
/// The versioned cache validates entries against this; the knowledge store
/// implements it. `None` means no knowledge store has ever been built.
pub trait IVersionProbe: Send + Sync {
    fn current_version_id(&self) -> Option<String>;
}
