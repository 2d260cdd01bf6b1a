//! Reference-counted shared resource.
//!
//! Several sessions on one page share a single base stylesheet. The first
//! [`StyleRegistry::acquire`] creates it, the last [`StyleRegistry::release`]
//! hands it back to the caller for teardown.

/// Proof that the holder took part in the shared resource's count.
///
/// Not `Clone`: each acquire is matched by exactly one release.
#[derive(Debug)]
#[must_use = "a handle that is dropped without release keeps the resource alive"]
pub struct StyleHandle {
	registry_id: u64,
}

/// Explicit reference-counted slot for a shared resource.
#[derive(Debug)]
pub struct StyleRegistry<T> {
	id: u64,
	resource: Option<T>,
	count: usize,
}

impl<T> StyleRegistry<T> {
	/// Create an empty registry. `id` distinguishes handles of different registries.
	pub const fn new(id: u64) -> Self {
		Self {
			id,
			resource: None,
			count: 0,
		}
	}

	/// Take a reference, creating the resource on the first acquire.
	pub fn acquire(&mut self, create: impl FnOnce() -> T) -> StyleHandle {
		if self.resource.is_none() {
			self.resource = Some(create());
		}
		self.count += 1;
		StyleHandle { registry_id: self.id }
	}

	/// Like [`acquire`](Self::acquire) with a fallible `create`.
	///
	/// A failed creation takes no reference and caches nothing, so the next
	/// acquire tries again.
	pub fn try_acquire<E>(&mut self, create: impl FnOnce() -> Result<T, E>) -> Result<StyleHandle, E> {
		if self.resource.is_none() {
			self.resource = Some(create()?);
		}
		self.count += 1;
		Ok(StyleHandle { registry_id: self.id })
	}

	/// Drop a reference. Returns the resource when the count reaches zero.
	///
	/// Handles from another registry are ignored and return `None`.
	pub fn release(&mut self, handle: StyleHandle) -> Option<T> {
		if handle.registry_id != self.id || self.count == 0 {
			return None;
		}
		self.count -= 1;
		if self.count == 0 { self.resource.take() } else { None }
	}

	/// Number of live handles.
	pub fn count(&self) -> usize {
		self.count
	}

	pub fn get(&self) -> Option<&T> {
		self.resource.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn first_acquire_creates_last_release_destroys() {
		let mut registry = StyleRegistry::new(1);
		let mut created = 0;

		let a = registry.acquire(|| {
			created += 1;
			"style"
		});
		let b = registry.acquire(|| {
			created += 1;
			"other"
		});
		assert_eq!(created, 1);
		assert_eq!(registry.count(), 2);
		assert_eq!(registry.get(), Some(&"style"));

		assert_eq!(registry.release(a), None);
		assert_eq!(registry.get(), Some(&"style"));
		assert_eq!(registry.release(b), Some("style"));
		assert_eq!(registry.count(), 0);
		assert!(registry.get().is_none());
	}

	#[test]
	fn resource_is_recreated_after_teardown() {
		let mut registry = StyleRegistry::new(1);
		let h = registry.acquire(|| 1);
		assert_eq!(registry.release(h), Some(1));
		let h = registry.acquire(|| 2);
		assert_eq!(registry.get(), Some(&2));
		assert_eq!(registry.release(h), Some(2));
	}

	#[test]
	fn failed_creation_is_retried() {
		let mut registry = StyleRegistry::new(1);
		assert_eq!(registry.try_acquire(|| Err::<&str, _>("no body")).err(), Some("no body"));
		assert_eq!(registry.count(), 0);
		assert!(registry.get().is_none());

		let h = registry.try_acquire(|| Ok::<_, &str>("style")).unwrap();
		assert_eq!(registry.get(), Some(&"style"));
		let again = registry.try_acquire(|| Err("not called")).unwrap();
		assert_eq!(registry.count(), 2);
		assert_eq!(registry.release(h), None);
		assert_eq!(registry.release(again), Some("style"));
	}

	#[test]
	fn foreign_handle_is_ignored() {
		let mut mine = StyleRegistry::new(1);
		let mut other = StyleRegistry::new(2);
		let _keep = mine.acquire(|| "a");
		let foreign = other.acquire(|| "b");
		assert_eq!(mine.release(foreign), None);
		assert_eq!(mine.count(), 1);
	}
}
