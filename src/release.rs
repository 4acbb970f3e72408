//! Release hooks: where keys and values go when the table lets them go.

/// Receives ownership of a key or value the table no longer holds.
///
/// Called on overwrite (the displaced value, and the surplus key argument),
/// on removal, on clear and when the table is dropped. Never called during
/// resize.
pub trait Release<T> {
    fn release(&mut self, item: T);
}

/// Default hook: the item is simply dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DropRelease;

impl<T> Release<T> for DropRelease {
    #[inline]
    fn release(&mut self, item: T) {
        drop(item);
    }
}

impl<T, F> Release<T> for F
where
    F: FnMut(T),
{
    #[inline]
    fn release(&mut self, item: T) {
        self(item)
    }
}
